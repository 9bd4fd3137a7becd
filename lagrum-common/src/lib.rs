//! Common types and utilities shared across the Lagrum crates.
//!
//! This crate defines the shared error taxonomy and observability helpers
//! used throughout the workspace. It is intentionally lightweight so that
//! all crates can depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`ScrapeError`] and [`Result`]: Shared error handling
//! - [`observability`]: Centralised tracing/logging initialisation
use std::path::PathBuf;
use std::time::Duration;

pub mod observability;

/// Error types used across the scrape workflow.
///
/// Every variant is fatal for the run: the workflow stops at the first
/// failure and the only guaranteed cleanup is closing the browser session.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The automation layer (WebDriver session or command) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// An explicit wait expired before its condition was observed.
    ///
    /// Distinguishable from [`ScrapeError::ElementMissing`]: the element may
    /// still appear, we just ran out of budget.
    #[error("timed out after {waited:?} waiting for `{selector}`")]
    WaitTimeout { selector: String, waited: Duration },

    /// A lookup that must succeed right now found nothing.
    #[error("expected element `{selector}` is missing")]
    ElementMissing { selector: String },

    /// A named nested document was absent from the page.
    #[error("frame `{name}` not found")]
    FrameMissing { name: String },

    /// A result row did not carry the expected link in its last cell.
    #[error("malformed result row at index {index}: no link in last cell")]
    MalformedRow { index: usize },

    /// No new window appeared after activating a result link.
    #[error("no popup window appeared within {waited:?}")]
    PopupTimeout { waited: Duration },

    /// A CSS selector string failed to parse.
    #[error("invalid selector: {0}")]
    Selector(String),

    /// Search criteria were rejected before any browser work started.
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// A file or directory operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenient alias for results that use [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;
