use std::collections::HashMap;
use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};
use webdriver::capabilities::Capabilities;

use lagrum_common::{Result, ScrapeError};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Connection settings for [`BrowserSession::connect`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// WebDriver endpoint, e.g. a locally running chromedriver.
    pub webdriver_url: String,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Fixed pause inserted after each interaction. Meant for watching a
    /// headed run; zero disables it.
    pub slow_mo: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            slow_mo: Duration::ZERO,
        }
    }
}

/// Thin wrapper around a `fantoccini` WebDriver client, plus the window and
/// pacing state the scrape needs.
///
/// Frame and window switches mutate session state on the WebDriver side, so
/// a session must only be driven from one task at a time.
pub struct BrowserSession {
    client: Client,
    main_window: WindowHandle,
    slow_mo: Duration,
}

impl BrowserSession {
    /// Create a new session against a running WebDriver service.
    pub async fn connect(options: &SessionOptions) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();
        chrome_opts.insert(
            "args".to_string(),
            json!(build_chrome_args(options.headless)),
        );
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&options.webdriver_url)
            .await
            .map_err(|e| ScrapeError::Driver(e.into()))?;
        let main_window = client.window().await.map_err(driver_err)?;

        info!(
            target: "browser.session",
            url = %options.webdriver_url,
            headless = options.headless,
            "session established"
        );

        Ok(Self {
            client,
            main_window,
            slow_mo: options.slow_mo,
        })
    }

    /// Navigate the main document to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(driver_err)?;
        self.pace().await;
        Ok(())
    }

    /// Poll until the document reports itself complete.
    ///
    /// This is a heuristic idle signal: the page may still be loading frame
    /// content afterwards, so callers wait for the selectors they actually
    /// need on top of this.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self
                .client
                .execute("return document.readyState;", vec![])
                .await
                .map_err(driver_err)?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::WaitTimeout {
                    selector: "document.readyState".to_string(),
                    waited: timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until `selector` matches, or run out of budget.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element> {
        debug!(target: "browser.selector", %selector, "waiting");
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|e| classify(selector, timeout, e))
    }

    /// Wait for the frame container, then switch into the embedded document
    /// named `frame_name`.
    ///
    /// The container selector proves the embedding page has produced its
    /// frameset; the frame itself is then looked up by name, and its absence
    /// at that point is fatal rather than a timeout.
    pub async fn enter_frame_by_name(
        &self,
        container: &str,
        frame_name: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_for(container, timeout).await?;

        let locator = format!("iframe[name='{frame_name}']");
        let frame = match self.client.find(Locator::Css(&locator)).await {
            Ok(frame) => frame,
            Err(e) if e.is_no_such_element() => {
                return Err(ScrapeError::FrameMissing {
                    name: frame_name.to_string(),
                })
            }
            Err(e) => return Err(driver_err(e)),
        };
        frame.enter_frame().await.map_err(driver_err)?;
        debug!(target: "browser.frame", name = %frame_name, "entered frame");
        Ok(())
    }

    /// Clear the field at `selector` and type `value` into it.
    pub async fn fill(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
        let field = self.wait_for(selector, timeout).await?;
        field.clear().await.map_err(driver_err)?;
        field.send_keys(value).await.map_err(driver_err)?;
        self.pace().await;
        Ok(())
    }

    /// Choose the option carrying `value` in the select element at `selector`.
    pub async fn select_value(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
        let select = self.wait_for(selector, timeout).await?;
        select.select_by_value(value).await.map_err(driver_err)?;
        self.pace().await;
        Ok(())
    }

    /// Click the element at `selector`.
    pub async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for(selector, timeout).await?;
        element.click().await.map_err(driver_err)?;
        self.pace().await;
        Ok(())
    }

    /// Serialized source of the current document. Inside a frame this is the
    /// frame's own markup, not the embedding page.
    pub async fn page_source(&self) -> Result<String> {
        self.client.source().await.map_err(driver_err)
    }

    /// Click the link at `link_xpath` and switch to the window it opens.
    pub async fn open_popup(&self, link_xpath: &str, timeout: Duration) -> Result<()> {
        let link = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(link_xpath))
            .await
            .map_err(|e| classify(link_xpath, timeout, e))?;

        let before = self.client.windows().await.map_err(driver_err)?;
        link.click().await.map_err(driver_err)?;

        let deadline = Instant::now() + timeout;
        let popup = loop {
            let now = self.client.windows().await.map_err(driver_err)?;
            if let Some(new) = now.iter().find(|handle| !before.contains(*handle)) {
                break new.clone();
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::PopupTimeout { waited: timeout });
            }
            sleep(POLL_INTERVAL).await;
        };

        self.client.switch_to_window(popup).await.map_err(driver_err)?;
        debug!(target: "browser.window", "switched to popup window");
        self.pace().await;
        Ok(())
    }

    /// Close the current popup window and return to the main window.
    ///
    /// The switch lands on the main window's top-level document; any frame
    /// context has to be re-entered by the caller.
    pub async fn close_popup(&self) -> Result<()> {
        self.client.close_window().await.map_err(driver_err)?;
        self.client
            .switch_to_window(self.main_window.clone())
            .await
            .map_err(driver_err)?;
        debug!(target: "browser.window", "returned to main window");
        self.pace().await;
        Ok(())
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.map_err(driver_err)
    }

    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            sleep(self.slow_mo).await;
        }
    }
}

fn build_chrome_args(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--window-size=1600,1200".to_string(),
    ];
    if headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

fn driver_err(e: CmdError) -> ScrapeError {
    ScrapeError::Driver(e.into())
}

/// Map a wait or lookup failure onto the shared taxonomy, keeping expired
/// waits distinguishable from elements that are simply not there.
fn classify(selector: &str, waited: Duration, e: CmdError) -> ScrapeError {
    match e {
        CmdError::WaitTimeout => ScrapeError::WaitTimeout {
            selector: selector.to_string(),
            waited,
        },
        e if e.is_no_such_element() => ScrapeError::ElementMissing {
            selector: selector.to_string(),
        },
        e => driver_err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantoccini::error::{ErrorStatus, WebDriver};

    #[test]
    fn headless_mode_adds_headless_flags() {
        let args = build_chrome_args(true);
        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--disable-gpu".to_string()));
    }

    #[test]
    fn headed_mode_omits_headless_flags() {
        let args = build_chrome_args(false);
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
        assert!(!args.contains(&"--disable-gpu".to_string()));
    }

    #[test]
    fn wait_expiry_maps_to_timeout() {
        let err = classify("#results", Duration::from_secs(5), CmdError::WaitTimeout);
        match err {
            ScrapeError::WaitTimeout { selector, waited } => {
                assert_eq!(selector, "#results");
                assert_eq!(waited, Duration::from_secs(5));
            }
            other => panic!("expected WaitTimeout, got {other:?}"),
        }
    }

    #[test]
    fn missing_element_is_not_a_timeout() {
        let inner = WebDriver::new(ErrorStatus::NoSuchElement, "no such element");
        let err = classify("#gone", Duration::ZERO, CmdError::Standard(inner));
        assert!(matches!(err, ScrapeError::ElementMissing { .. }));
    }

    #[test]
    fn other_failures_pass_through_as_driver_errors() {
        let inner = WebDriver::new(ErrorStatus::UnknownError, "session crashed");
        let err = classify("#x", Duration::ZERO, CmdError::Standard(inner));
        assert!(matches!(err, ScrapeError::Driver(_)));
    }
}
