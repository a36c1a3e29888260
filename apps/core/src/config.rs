use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hotkey::validate_hotkey;

const APP_DIR_NAME: &str = "Anilauncher";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebSearchProvider {
    Google,
    Duckduckgo,
    Bing,
    Brave,
    Startpage,
    Ecosia,
    Yahoo,
    Custom,
}

impl WebSearchProvider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Duckduckgo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Brave => "Brave",
            Self::Startpage => "Startpage",
            Self::Ecosia => "Ecosia",
            Self::Yahoo => "Yahoo",
            Self::Custom => "the Web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: String,
    pub max_results: u16,
    pub applications_dir: PathBuf,
    pub common_folders: Vec<PathBuf>,
    pub web_search_provider: WebSearchProvider,
    pub web_search_custom_template: String,
    pub assistant_url: String,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        Self {
            hotkey: "Option+Space".to_string(),
            max_results: 20,
            applications_dir: PathBuf::from("/Applications"),
            common_folders: ["Documents", "Downloads", "Desktop", "Pictures"]
                .iter()
                .map(|name| home.join(name))
                .collect(),
            web_search_provider: WebSearchProvider::Google,
            web_search_custom_template: String::new(),
            assistant_url: "https://claude.ai/chat".to_string(),
            config_path: default_config_path(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Serialize(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Serialize(error) => write!(f, "serialize error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// `~/Library/Application Support/Anilauncher` on macOS.
pub fn stable_app_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME.to_ascii_lowercase()))
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join(CONFIG_FILE_NAME)
}

pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Missing files are not an error: the defaults are returned with
/// `config_path` pointing at the requested location.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !path.exists() {
        return Ok(Config {
            config_path: path,
            ..Config::default()
        });
    }

    let raw = fs::read_to_string(&path)?;
    let mut config: Config = if is_json_path(&path) {
        json5::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
    } else {
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
    };
    config.config_path = path;

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let serialized = if is_json_path(&cfg.config_path) {
        serde_json::to_string_pretty(cfg).map_err(|e| ConfigError::Serialize(e.to_string()))?
    } else {
        toml::to_string_pretty(cfg).map_err(|e| ConfigError::Serialize(e.to_string()))?
    };
    fs::write(&cfg.config_path, serialized)?;
    Ok(())
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.max_results < 5 || cfg.max_results > 100 {
        return Err("max_results out of range".into());
    }

    validate_hotkey(&cfg.hotkey)?;

    if cfg.applications_dir.as_os_str().is_empty() {
        return Err("applications_dir is required".into());
    }

    if cfg
        .common_folders
        .iter()
        .any(|folder| folder.as_os_str().is_empty())
    {
        return Err("common_folders entries must not be empty".into());
    }

    if cfg.web_search_provider == WebSearchProvider::Custom
        && !cfg.web_search_custom_template.contains("{query}")
    {
        return Err("web_search_custom_template must contain {query}".into());
    }

    let assistant = cfg.assistant_url.trim();
    if !assistant.starts_with("https://") && !assistant.starts_with("http://") {
        return Err("assistant_url must be an http(s) URL".into());
    }

    Ok(())
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false)
}
