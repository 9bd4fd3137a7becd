//! Selectors for the Lagrummet search pages.
//!
//! The search UI is a frameset of legacy server-rendered pages, and several
//! of its controls carry no usable id or name. Those are addressed by
//! structural position, which is brittle on purpose: if the markup shifts,
//! the scrape should fail loudly here rather than quietly read the wrong
//! field.

/// Container that proves the page has produced its frameset.
pub const FRAME_CONTAINER: &str = "#lowerFrame > iframe";

/// Name of the embedded document holding the search form and results.
pub const SEARCH_FRAME: &str = "LagrummetFrame2";

/// Name of the embedded document holding a single report, inside its popup.
pub const REPORT_FRAME: &str = "DetaljFrame2";

/// Court/authority dropdown in the search form.
pub const COURT_SELECT: &str = "#select-domstolmyndighet";

/// Decision-date lower bound field.
pub const FROM_DATE_FIELD: &str = "#falt-avgorandedatum-fran";

/// Decision-date upper bound field. No id on this one; positional path.
pub const TO_DATE_FIELD: &str =
    "body > form > div:nth-child(5) > div > div > div:nth-child(1) > div:nth-child(2) > input[type=text]:nth-child(3)";

/// Submit button of the search form. Also positional.
pub const SEARCH_BUTTON: &str =
    "body > form > div:nth-child(5) > div > div > div:nth-child(2) > div.formularKnappOmrade > button";

/// Results table; its appearance signals that the search has completed.
pub const RESULTS_TABLE: &str = "body > form > div.centrerad > table";

/// Result rows alternate between these two classes.
pub const FIRST_ROW_CLASS: &str = "forstaRad";
pub const ALT_ROW_CLASS: &str = "andraRad";

/// All result rows, in document order.
pub const RESULT_ROWS: &str = "tr.forstaRad, tr.andraRad";

/// The report link inside a result row.
pub const RESULT_ROW_LINK: &str = "td:last-child a";

/// XPath locating the report link of the result row at `index`.
///
/// Activation re-locates the row by position instead of holding on to an
/// element handle: handles go stale once a popup window has been opened and
/// closed around them.
pub fn result_link_xpath(index: usize) -> String {
    format!(
        "(//tr[contains(@class, '{FIRST_ROW_CLASS}') or contains(@class, '{ALT_ROW_CLASS}')])[{}]/td[last()]//a",
        index + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn row_and_link_selectors_parse() {
        assert!(Selector::parse(RESULT_ROWS).is_ok());
        assert!(Selector::parse(RESULT_ROW_LINK).is_ok());
        assert!(Selector::parse(RESULTS_TABLE).is_ok());
    }

    #[test]
    fn positional_selectors_parse() {
        assert!(Selector::parse(TO_DATE_FIELD).is_ok());
        assert!(Selector::parse(SEARCH_BUTTON).is_ok());
    }

    #[test]
    fn link_xpath_is_one_based() {
        let xpath = result_link_xpath(0);
        assert!(xpath.contains("[1]"));
        assert!(xpath.contains("forstaRad"));
        assert!(xpath.contains("andraRad"));
        assert!(xpath.ends_with("/td[last()]//a"));
    }
}
