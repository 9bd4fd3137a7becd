use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use lagrum_scrape::criteria::Court;
use lagrum_scrape::sink::ReportSink;

/// Scrape court rulings from the Lagrummet search service.
#[derive(Debug, Parser)]
#[command(name = "lagrum", version, about)]
pub struct Cli {
    /// Write a single report to this file (the default mode).
    #[arg(long, default_value = "report.txt", conflicts_with = "output_dir")]
    pub output: PathBuf,

    /// Write one file per search result into this directory instead.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Cap the number of reports scraped in directory mode.
    #[arg(long, requires = "output_dir")]
    pub max_reports: Option<usize>,

    /// Court code to filter on; ALLAMYND searches every court.
    #[arg(long, default_value = "ALLAMYND")]
    pub court: Court,

    /// Earliest decision date, yyyy-mm-dd.
    #[arg(long, default_value = "2020-01-01")]
    pub from: NaiveDate,

    /// Latest decision date, yyyy-mm-dd.
    #[arg(long, default_value = "2021-01-01")]
    pub to: NaiveDate,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    pub headed: bool,

    /// Pause this many milliseconds after each browser interaction.
    #[arg(long, value_name = "MS")]
    pub slow_mo: Option<u64>,

    /// Config file to load (defaults to `lagrum.yaml` when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The report sink the flags describe.
    pub fn sink(&self) -> ReportSink {
        match &self.output_dir {
            Some(dir) => ReportSink::Directory(dir.clone()),
            None => ReportSink::SingleFile(self.output.clone()),
        }
    }
}
