//! The browser capability the workflow runs on.

use std::time::Duration;

use async_trait::async_trait;

use lagrum_common::Result;
use lagrum_driver::browser::{BrowserSession, SessionOptions};

/// Browser operations the scrape workflow needs.
///
/// The workflow is written against this trait so the integration tests can
/// run it on an in-memory fake; [`WebdriverBrowser`] is the real thing.
/// Every waiting operation takes an explicit timeout budget.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate the main document to `url`.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Heuristic idle wait: the document reports itself complete.
    async fn wait_until_ready(&self, timeout: Duration) -> Result<()>;

    /// Wait until `selector` matches in the current document.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Wait for `container`, then switch into the embedded document named
    /// `frame_name`. A present container with a missing frame is fatal.
    async fn enter_frame(&self, container: &str, frame_name: &str, timeout: Duration)
        -> Result<()>;

    /// Choose the option carrying `value` in the select at `selector`.
    async fn select_option(&self, selector: &str, value: &str, timeout: Duration) -> Result<()>;

    /// Clear the field at `selector` and type `value` into it.
    async fn fill_field(&self, selector: &str, value: &str, timeout: Duration) -> Result<()>;

    /// Click the element at `selector`.
    async fn click(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Serialized markup of the current document (frame-aware).
    async fn document_source(&self) -> Result<String>;

    /// Activate the link at `link_xpath` and adopt the popup window it opens.
    async fn open_popup(&self, link_xpath: &str, timeout: Duration) -> Result<()>;

    /// Close the popup window and return to the main window's top-level
    /// document.
    async fn close_popup(&self) -> Result<()>;
}

/// WebDriver-backed implementation over [`BrowserSession`].
pub struct WebdriverBrowser {
    session: BrowserSession,
}

impl WebdriverBrowser {
    /// Connect a new browser session.
    pub async fn launch(options: &SessionOptions) -> Result<Self> {
        Ok(Self {
            session: BrowserSession::connect(options).await?,
        })
    }

    /// Shut the session down. Callers run this on every exit path, success
    /// or failure.
    pub async fn close(self) -> Result<()> {
        self.session.close().await
    }
}

#[async_trait]
impl Browser for WebdriverBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.session.goto(url).await
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<()> {
        self.session.wait_until_ready(timeout).await
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.session.wait_for(selector, timeout).await.map(|_| ())
    }

    async fn enter_frame(
        &self,
        container: &str,
        frame_name: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.session
            .enter_frame_by_name(container, frame_name, timeout)
            .await
    }

    async fn select_option(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
        self.session.select_value(selector, value, timeout).await
    }

    async fn fill_field(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
        self.session.fill(selector, value, timeout).await
    }

    async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.session.click(selector, timeout).await
    }

    async fn document_source(&self) -> Result<String> {
        self.session.page_source().await
    }

    async fn open_popup(&self, link_xpath: &str, timeout: Duration) -> Result<()> {
        self.session.open_popup(link_xpath, timeout).await
    }

    async fn close_popup(&self) -> Result<()> {
        self.session.close_popup().await
    }
}
