//! Loader for runtime configuration with YAML + environment overlays.
//!
//! Precedence is defaults, then the YAML file, then `LAGRUM__`-prefixed
//! environment variables. `${VAR}` placeholders inside string values are
//! expanded after the sources are merged.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Runtime settings for the scraper.
///
/// Every field has a default, so a missing config file is not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct LagrumConfig {
    /// WebDriver endpoint the browser session connects to.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Search page the scrape starts from.
    #[serde(default = "default_start_url")]
    pub start_url: String,
    /// Run the browser without a visible window.
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Fixed pause in milliseconds after each browser interaction. Useful
    /// when watching a headed run; leave at zero otherwise.
    #[serde(default)]
    pub slow_mo_ms: u64,
    /// Per-wait timeout budgets.
    #[serde(default)]
    pub waits: WaitConfig,
}

/// Timeout budgets for the explicit waits in the workflow, in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitConfig {
    /// Budget for the initial page to report itself loaded.
    #[serde(default = "default_page_load_secs")]
    pub page_load_secs: u64,
    /// Budget for any single element or frame to appear.
    #[serde(default = "default_element_secs")]
    pub element_secs: u64,
    /// Budget for a popup window to open after a result link is activated.
    #[serde(default = "default_popup_secs")]
    pub popup_secs: u64,
}

impl Default for LagrumConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            start_url: default_start_url(),
            headless: default_headless(),
            slow_mo_ms: 0,
            waits: WaitConfig::default(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            page_load_secs: default_page_load_secs(),
            element_secs: default_element_secs(),
            popup_secs: default_popup_secs(),
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_start_url() -> String {
    "https://rattsinfosok.domstol.se/lagrummet/".into()
}
fn default_headless() -> bool {
    true
}
fn default_page_load_secs() -> u64 {
    30
}
fn default_element_secs() -> u64 {
    10
}
fn default_popup_secs() -> u64 {
    10
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct LagrumConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for LagrumConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LagrumConfigLoader {
    /// Start an empty loader. Sources merge in the order they are added and
    /// the environment overlay is attached last, so it wins over files.
    ///
    /// ```
    /// use lagrum_config::LagrumConfigLoader;
    ///
    /// let config = LagrumConfigLoader::new().load().expect("defaults");
    ///
    /// assert_eq!(config.webdriver_url, "http://localhost:9515");
    /// assert!(config.headless);
    /// assert_eq!(config.waits.page_load_secs, 30);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use lagrum_config::LagrumConfigLoader;
    ///
    /// let config = LagrumConfigLoader::new()
    ///     .with_yaml_str("headless: false\nslow_mo_ms: 400")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(!config.headless);
    /// assert_eq!(config.slow_mo_ms, 400);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// The loader combines file sources with `LAGRUM__`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// typed struct.
    ///
    /// ```
    /// use lagrum_config::LagrumConfigLoader;
    ///
    /// unsafe { std::env::set_var("CHROMEDRIVER_PORT", "4444"); }
    ///
    /// let config = LagrumConfigLoader::new()
    ///     .with_yaml_str("webdriver_url: \"http://localhost:${CHROMEDRIVER_PORT}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.webdriver_url, "http://localhost:4444");
    ///
    /// unsafe { std::env::remove_var("CHROMEDRIVER_PORT"); }
    /// ```
    pub fn load(self) -> Result<LagrumConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("LAGRUM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        // Deserialize into the strongly-typed config
        let typed: LagrumConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temp_env;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("DRIVER_HOST", Some("chromedriver"), || {
            let mut v = json!("http://${DRIVER_HOST}:9515");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("http://chromedriver:9515"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("HOST", Some("domstol")), ("TLD", Some("se"))], || {
            let mut v = json!([
                "www.$HOST",
                { "url": "https://${HOST}.${TLD}/" },
                9515,
                false,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["www.domstol", { "url": "https://domstol.se/" }, 9515, false, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                // PORT references SCHEME; URL references PORT: two hops.
                ("SCHEME", Some("http")),
                ("HOST_PORT", Some("localhost:9515")),
                ("DRIVER_URL", Some("${SCHEME}://${HOST_PORT}")),
            ],
            || {
                let mut v = json!("endpoint=${DRIVER_URL}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("endpoint=http://localhost:9515"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            // The depth cap guarantees termination; the cycle stays unresolved.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let config = LagrumConfig::default();
        assert_eq!(config.start_url, "https://rattsinfosok.domstol.se/lagrummet/");
        assert_eq!(config.slow_mo_ms, 0);
        assert_eq!(config.waits.element_secs, 10);
        assert_eq!(config.waits.popup_secs, 10);
    }
}
