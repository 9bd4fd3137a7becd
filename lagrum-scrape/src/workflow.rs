//! The sequential scrape: submit one search, then pull each report out of
//! its popup window.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use lagrum_common::Result;

use crate::browser::Browser;
use crate::criteria::SearchCriteria;
use crate::results::{parse_results, ResultRef};
use crate::sink::ReportSink;
use crate::site;
use crate::text::html_to_text;

/// Timeout budgets for the workflow's explicit waits.
#[derive(Debug, Clone)]
pub struct WaitBudgets {
    /// Initial page load (readiness heuristic).
    pub page_load: Duration,
    /// Any single element or frame.
    pub element: Duration,
    /// A popup window appearing after a link activation.
    pub popup: Duration,
}

impl Default for WaitBudgets {
    fn default() -> Self {
        Self {
            page_load: Duration::from_secs(30),
            element: Duration::from_secs(10),
            popup: Duration::from_secs(10),
        }
    }
}

/// Everything one scrape run needs besides the browser itself.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Search page the run starts from.
    pub start_url: String,
    /// Court filter and date range to submit.
    pub criteria: SearchCriteria,
    /// Where report text ends up.
    pub sink: ReportSink,
    /// Cap on how many results are processed in directory mode. `None`
    /// processes every result. A single-file sink always caps at one.
    pub max_reports: Option<usize>,
    /// Timeout budgets for the explicit waits.
    pub waits: WaitBudgets,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct ScrapeSummary {
    /// Rows the search returned, before any cap.
    pub results_found: usize,
    /// Paths written, in result order.
    pub reports_written: Vec<PathBuf>,
}

/// Run one complete scrape: navigate, search, then extract each selected
/// result's report from its popup.
///
/// The flow is strictly sequential. One popup is open at a time and it is
/// closed before the next result is touched, so the browser's footprint
/// stays flat however long the result list is. Failures are fatal and
/// propagate immediately; the caller owns closing the browser session.
pub async fn run<B: Browser>(browser: &B, options: &ScrapeOptions) -> Result<ScrapeSummary> {
    info!(
        target: "scrape.session",
        url = %options.start_url,
        court = %options.criteria.court,
        from = %options.criteria.from,
        to = %options.criteria.to,
        "starting search"
    );

    browser.navigate(&options.start_url).await?;
    browser.wait_until_ready(options.waits.page_load).await?;
    enter_search_frame(browser, &options.waits).await?;

    submit_search(browser, &options.criteria, &options.waits).await?;
    browser
        .wait_for_selector(site::RESULTS_TABLE, options.waits.element)
        .await?;

    let results = parse_results(&browser.document_source().await?)?;
    info!(target: "scrape.results", count = results.len(), "results enumerated");

    let selected = select_results(&results, &options.sink, options.max_reports);
    options.sink.prepare().await?;

    let mut written = Vec::with_capacity(selected.len());
    for result in selected {
        debug!(
            target: "scrape.report",
            index = result.index,
            label = %result.label,
            "opening report"
        );
        browser
            .open_popup(&site::result_link_xpath(result.index), options.waits.popup)
            .await?;
        browser
            .enter_frame(site::FRAME_CONTAINER, site::REPORT_FRAME, options.waits.element)
            .await?;

        let markup = browser.document_source().await?;
        let path = options.sink.write(&result.label, &html_to_text(&markup)).await?;
        written.push(path);

        // Closing the popup drops us back on the main window's top-level
        // document, so the results frame has to be re-entered.
        browser.close_popup().await?;
        enter_search_frame(browser, &options.waits).await?;
    }

    info!(
        target: "scrape.session",
        results = results.len(),
        written = written.len(),
        "search finished"
    );
    Ok(ScrapeSummary {
        results_found: results.len(),
        reports_written: written,
    })
}

/// Apply the report cap: a single-file sink takes the first result only,
/// a directory sink takes up to `max_reports` (or everything).
fn select_results<'a>(
    results: &'a [ResultRef],
    sink: &ReportSink,
    max_reports: Option<usize>,
) -> &'a [ResultRef] {
    let cap = match sink {
        ReportSink::SingleFile(_) => 1,
        ReportSink::Directory(_) => max_reports.unwrap_or(results.len()),
    };
    &results[..results.len().min(cap)]
}

async fn enter_search_frame<B: Browser>(browser: &B, waits: &WaitBudgets) -> Result<()> {
    browser
        .enter_frame(site::FRAME_CONTAINER, site::SEARCH_FRAME, waits.element)
        .await
}

/// Fill the form and submit it. The results table showing up is the
/// completion signal, awaited by the caller.
async fn submit_search<B: Browser>(
    browser: &B,
    criteria: &SearchCriteria,
    waits: &WaitBudgets,
) -> Result<()> {
    browser
        .select_option(site::COURT_SELECT, criteria.court.code(), waits.element)
        .await?;
    browser
        .fill_field(site::FROM_DATE_FIELD, &criteria.from_field(), waits.element)
        .await?;
    browser
        .fill_field(site::TO_DATE_FIELD, &criteria.to_field(), waits.element)
        .await?;
    browser.click(site::SEARCH_BUTTON, waits.element).await?;
    Ok(())
}
