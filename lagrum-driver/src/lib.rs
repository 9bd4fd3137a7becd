//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver session wrapper the scrape workflow
//! runs on. It owns connection setup, explicit waits, frame and window
//! switching, and the error classification that keeps timeouts apart from
//! elements that are simply absent.
//!
//! - [`browser::BrowserSession`]: WebDriver client wrapper
//! - [`browser::SessionOptions`]: connection settings
pub mod browser;
