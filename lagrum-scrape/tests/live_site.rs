//! Live smoke test against the real search service. Needs a running
//! chromedriver (or compatible endpoint) plus network access, so it stays
//! behind `--ignored`.

mod common;

use std::time::Duration;

use chrono::NaiveDate;
use tempfile::TempDir;

use lagrum_driver::browser::SessionOptions;
use lagrum_scrape::browser::WebdriverBrowser;
use lagrum_scrape::criteria::{Court, SearchCriteria};
use lagrum_scrape::sink::ReportSink;
use lagrum_scrape::workflow::{run, ScrapeOptions, WaitBudgets};

fn webdriver_url_or_skip() -> String {
    std::env::var("LAGRUM_WEBDRIVER_URL").unwrap_or_else(|_| {
        tracing::debug!("Skipping: LAGRUM_WEBDRIVER_URL not set");

        panic!("SKIP");
    })
}

#[tokio::test]
#[ignore]
async fn scrapes_first_report_from_live_site() -> lagrum_common::Result<()> {
    common::init_test_tracing();
    let webdriver_url = webdriver_url_or_skip();

    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("report.txt");

    let session = SessionOptions {
        webdriver_url,
        headless: true,
        slow_mo: Duration::ZERO,
    };
    let criteria = SearchCriteria::new(
        Court::All,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
    )?;
    let options = ScrapeOptions {
        start_url: "https://rattsinfosok.domstol.se/lagrummet/".to_string(),
        criteria,
        sink: ReportSink::SingleFile(target.clone()),
        max_reports: None,
        waits: WaitBudgets::default(),
    };

    let browser = WebdriverBrowser::launch(&session).await?;
    let outcome = run(&browser, &options).await;
    let _ = browser.close().await;
    let summary = outcome?;

    assert!(summary.results_found > 0, "live search should return rows");
    let text = std::fs::read_to_string(&target).unwrap();
    assert!(
        !text.trim().is_empty(),
        "extracted report text should not be empty"
    );
    Ok(())
}
