//! Scrape workflow for the Lagrummet court-ruling search.
//!
//! The crate is split along the seams of the job:
//!
//! - [`criteria`]: court filter and date range for one search
//! - [`site`]: the selectors the rendered search pages expose
//! - [`browser`]: the [`Browser`] capability trait and its WebDriver-backed
//!   implementation
//! - [`results`]: pure parsing of the results table into [`ResultRef`]s
//! - [`text`]: pure HTML to plain-text conversion
//! - [`sink`]: report persistence (single file or directory of files)
//! - [`workflow`]: the sequential driver tying the above together
//!
//! Everything except `browser` is runnable without a live browser, which is
//! how the integration tests exercise the workflow end to end.

pub mod browser;
pub mod criteria;
pub mod results;
pub mod sink;
pub mod site;
pub mod text;
pub mod workflow;

pub use browser::{Browser, WebdriverBrowser};
pub use criteria::{Court, SearchCriteria};
pub use results::{parse_results, ResultRef};
pub use sink::ReportSink;
pub use text::html_to_text;
pub use workflow::{run, ScrapeOptions, ScrapeSummary, WaitBudgets};
