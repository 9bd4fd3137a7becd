//! Pure parsing of the results table into activatable references.

use scraper::{Html, Selector};

use lagrum_common::{Result, ScrapeError};

use crate::site;

/// One row of the results table: its position in document order and the
/// trimmed text of its report link.
///
/// The index is what later re-locates the row for activation; the label is
/// what names the written report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRef {
    pub index: usize,
    pub label: String,
}

/// Enumerate the result rows of a serialized results document.
///
/// Rows are matched by the site's two alternating row classes, in document
/// order. A row without a link in its last cell is malformed and fatal. No
/// matching rows at all is a successful empty search, not an error.
pub fn parse_results(html: &str) -> Result<Vec<ResultRef>> {
    let document = Html::parse_document(html);
    let rows = create_selector(site::RESULT_ROWS)?;
    let link = create_selector(site::RESULT_ROW_LINK)?;

    let mut refs = Vec::new();
    for (index, row) in document.select(&rows).enumerate() {
        let anchor = row
            .select(&link)
            .next()
            .ok_or(ScrapeError::MalformedRow { index })?;
        let label = anchor.text().collect::<String>().trim().to_string();
        refs.push(ResultRef { index, label });
    }
    Ok(refs)
}

fn create_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(e.to_string()))
}
