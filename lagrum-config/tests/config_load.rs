use lagrum_config::LagrumConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn file_values_override_defaults() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
webdriver_url: "http://chromedriver:4444"
headless: false
waits:
  element_secs: 3
"#;
    let p = write_yaml(&tmp, "lagrum.yaml", file_yaml);

    let config = LagrumConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.webdriver_url, "http://chromedriver:4444");
    assert!(!config.headless);
    assert_eq!(config.waits.element_secs, 3);
    // Untouched fields keep their defaults.
    assert_eq!(config.waits.popup_secs, 10);
    assert_eq!(config.start_url, "https://rattsinfosok.domstol.se/lagrummet/");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "lagrum.yaml", "slow_mo_ms: 100\n");

    temp_env::with_var("LAGRUM__SLOW_MO_MS", Some("250"), || {
        let config = LagrumConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config");
        assert_eq!(config.slow_mo_ms, 250);
    });
}

#[test]
#[serial]
fn environment_reaches_nested_fields() {
    temp_env::with_var("LAGRUM__WAITS__POPUP_SECS", Some("25"), || {
        let config = LagrumConfigLoader::new().load().expect("load config");
        assert_eq!(config.waits.popup_secs, 25);
        // Siblings keep their defaults.
        assert_eq!(config.waits.element_secs, 10);
    });
}

#[test]
#[serial]
fn file_placeholders_expand_from_environment() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "lagrum.yaml",
        "start_url: \"https://${LAGRUM_TEST_HOST}/lagrummet/\"\n",
    );

    temp_env::with_var("LAGRUM_TEST_HOST", Some("rattsinfosok.domstol.se"), || {
        let config = LagrumConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config");
        assert_eq!(config.start_url, "https://rattsinfosok.domstol.se/lagrummet/");
    });
}
