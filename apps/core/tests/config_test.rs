use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anilauncher_core::config::{self, Config, ConfigError, WebSearchProvider};

fn unique_temp_path(label: &str, extension: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "anilauncher-{label}-{}-{unique}.{extension}",
        std::process::id()
    ))
}

#[test]
fn rejects_max_results_out_of_range() {
    let cfg = Config {
        max_results: 200,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.max_results, 20);
    assert_eq!(cfg.hotkey, "Option+Space");
    assert_eq!(cfg.applications_dir, PathBuf::from("/Applications"));
    assert_eq!(cfg.web_search_provider, WebSearchProvider::Google);

    let folder_names: Vec<String> = cfg
        .common_folders
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(folder_names, ["Documents", "Downloads", "Desktop", "Pictures"]);
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn custom_provider_requires_query_placeholder() {
    let cfg = Config {
        web_search_provider: WebSearchProvider::Custom,
        web_search_custom_template: "https://example.com/search".to_string(),
        ..Default::default()
    };
    let error = config::validate(&cfg).unwrap_err();
    assert!(error.contains("{query}"));
}

#[test]
fn rejects_reserved_hotkey() {
    let cfg = Config {
        hotkey: "Cmd+Space".to_string(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn missing_file_yields_defaults_at_requested_path() {
    let path = unique_temp_path("missing-config", "toml");
    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.max_results, Config::default().max_results);
}

#[test]
fn loads_partial_toml_over_defaults() {
    let path = unique_temp_path("partial-config", "toml");
    std::fs::write(
        &path,
        "hotkey = \"ctrl+shift+k\"\nweb_search_provider = \"duckduckgo\"\napplications_dir = \"/tmp/apps\"\n",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.hotkey, "ctrl+shift+k");
    assert_eq!(cfg.web_search_provider, WebSearchProvider::Duckduckgo);
    assert_eq!(cfg.applications_dir, PathBuf::from("/tmp/apps"));
    assert_eq!(cfg.max_results, 20);
}

#[test]
fn loads_json5_with_comments() {
    let path = unique_temp_path("json5-config", "json5");
    std::fs::write(
        &path,
        "{\n  // fewer rows\n  max_results: 8,\n  common_folders: ['/tmp/Projects'],\n}\n",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.max_results, 8);
    assert_eq!(cfg.common_folders, vec![PathBuf::from("/tmp/Projects")]);
}

#[test]
fn invalid_file_contents_are_reported() {
    let path = unique_temp_path("bad-config", "toml");
    std::fs::write(&path, "max_results = 1\n").unwrap();

    let result = config::load(Some(&path));
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn saved_config_loads_back() {
    let path = unique_temp_path("saved-config", "toml");
    let cfg = Config {
        max_results: 42,
        web_search_provider: WebSearchProvider::Brave,
        config_path: path.clone(),
        ..Default::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, cfg);
}
