use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use lagrum_common::observability::{init_logging, LogConfig};
use lagrum_config::{LagrumConfig, LagrumConfigLoader};
use lagrum_driver::browser::SessionOptions;
use lagrum_scrape::browser::WebdriverBrowser;
use lagrum_scrape::criteria::SearchCriteria;
use lagrum_scrape::workflow::{self, ScrapeOptions, WaitBudgets};

mod cli;

use cli::Cli;

const DEFAULT_CONFIG_FILE: &str = "lagrum.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file)
    let mut loader = LagrumConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        loader = loader.with_file(DEFAULT_CONFIG_FILE);
    }
    let config: LagrumConfig = loader.load()?;

    let log_path = init_logging(LogConfig {
        app_name: "lagrum",
        emit_stderr: true,
        ..LogConfig::default()
    })?;
    info!(target: "app.start", log = %log_path.display(), "starting");

    let criteria = SearchCriteria::new(cli.court, cli.from, cli.to)?;
    let session = SessionOptions {
        webdriver_url: config.webdriver_url.clone(),
        headless: config.headless && !cli.headed,
        slow_mo: Duration::from_millis(cli.slow_mo.unwrap_or(config.slow_mo_ms)),
    };
    let options = ScrapeOptions {
        start_url: config.start_url.clone(),
        criteria,
        sink: cli.sink(),
        max_reports: cli.max_reports,
        waits: WaitBudgets {
            page_load: Duration::from_secs(config.waits.page_load_secs),
            element: Duration::from_secs(config.waits.element_secs),
            popup: Duration::from_secs(config.waits.popup_secs),
        },
    };

    let browser = WebdriverBrowser::launch(&session).await?;
    // The session is released on every exit path: the run's outcome is held
    // until the browser has been closed.
    let outcome = workflow::run(&browser, &options).await;
    if let Err(close_error) = browser.close().await {
        warn!(
            target: "app.shutdown",
            error = %close_error,
            "browser session did not close cleanly"
        );
    }

    let summary = outcome?;
    info!(
        target: "app.done",
        results = summary.results_found,
        written = summary.reports_written.len(),
        "scrape finished"
    );
    Ok(())
}
