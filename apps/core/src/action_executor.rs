use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::config::{home_dir, Config, WebSearchProvider};
use crate::model::{ResultKind, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    EmptyPath,
    MissingPath(PathBuf),
    InvalidUrl(String),
    LaunchFailed { target: String, reason: String },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "empty path"),
            Self::MissingPath(path) => write!(f, "path does not exist: {}", path.display()),
            Self::InvalidUrl(url) => write!(f, "invalid url: {url}"),
            Self::LaunchFailed { target, reason } => {
                write!(f, "failed to open {target}: {reason}")
            }
        }
    }
}

impl std::error::Error for LaunchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    OpenApplication(PathBuf),
    OpenPath(PathBuf),
    OpenUrl(String),
}

impl LaunchPlan {
    pub fn target(&self) -> String {
        match self {
            Self::OpenApplication(path) | Self::OpenPath(path) => {
                path.to_string_lossy().into_owned()
            }
            Self::OpenUrl(url) => url.clone(),
        }
    }
}

pub fn plan_launch(result: &SearchResult, cfg: &Config) -> Result<LaunchPlan, LaunchError> {
    match result.kind {
        ResultKind::Application => {
            if result.path.trim().is_empty() {
                // The "Applications" suggestion row.
                return existing_path(&cfg.applications_dir).map(LaunchPlan::OpenPath);
            }
            existing_path(Path::new(result.path.trim())).map(LaunchPlan::OpenApplication)
        }
        ResultKind::Folder => {
            let trimmed = result.path.trim();
            if trimmed.is_empty() {
                return Err(LaunchError::EmptyPath);
            }
            existing_path(Path::new(trimmed)).map(LaunchPlan::OpenPath)
        }
        ResultKind::File => {
            let trimmed = result.path.trim();
            if trimmed.is_empty() {
                return Err(LaunchError::EmptyPath);
            }
            let candidate = Path::new(trimmed);
            let resolved = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                home_dir().join(candidate)
            };
            existing_path(&resolved).map(LaunchPlan::OpenPath)
        }
        ResultKind::Web => web_search_url(cfg, &result.path).map(LaunchPlan::OpenUrl),
        ResultKind::Assistant => {
            let url = cfg.assistant_url.trim();
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(LaunchError::InvalidUrl(url.to_string()));
            }
            Ok(LaunchPlan::OpenUrl(url.to_string()))
        }
    }
}

pub fn web_search_url(cfg: &Config, query: &str) -> Result<String, LaunchError> {
    let encoded = url_encode_component(query.trim());
    let url = match cfg.web_search_provider {
        WebSearchProvider::Google => format!("https://www.google.com/search?q={encoded}"),
        WebSearchProvider::Duckduckgo => format!("https://duckduckgo.com/?q={encoded}"),
        WebSearchProvider::Bing => format!("https://www.bing.com/search?q={encoded}"),
        WebSearchProvider::Brave => format!("https://search.brave.com/search?q={encoded}"),
        WebSearchProvider::Startpage => {
            format!("https://www.startpage.com/sp/search?query={encoded}")
        }
        WebSearchProvider::Ecosia => format!("https://www.ecosia.org/search?q={encoded}"),
        WebSearchProvider::Yahoo => format!("https://search.yahoo.com/search?p={encoded}"),
        WebSearchProvider::Custom => {
            let template = cfg.web_search_custom_template.trim();
            if template.is_empty() || !template.contains("{query}") {
                return Err(LaunchError::InvalidUrl(template.to_string()));
            }
            template.replace("{query}", &encoded)
        }
    };
    Ok(url)
}

/// Program and arguments that open `plan` with the desktop's default handler.
pub fn command_for(plan: &LaunchPlan) -> (&'static str, Vec<String>) {
    #[cfg(target_os = "macos")]
    {
        match plan {
            LaunchPlan::OpenApplication(path) => (
                "open",
                vec!["-a".to_string(), path.to_string_lossy().into_owned()],
            ),
            LaunchPlan::OpenPath(_) | LaunchPlan::OpenUrl(_) => ("open", vec![plan.target()]),
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        ("xdg-open", vec![plan.target()])
    }
}

pub trait Opener: Send + Sync {
    fn open(&self, plan: &LaunchPlan) -> Result<(), LaunchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

/// Waits for the opener command; `open` and `xdg-open` hand off and exit.
impl Opener for SystemOpener {
    fn open(&self, plan: &LaunchPlan) -> Result<(), LaunchError> {
        let (program, args) = command_for(plan);
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|error| LaunchError::LaunchFailed {
                target: plan.target(),
                reason: error.to_string(),
            })?;

        if !status.success() {
            return Err(LaunchError::LaunchFailed {
                target: plan.target(),
                reason: format!("exit status: {status}"),
            });
        }
        Ok(())
    }
}

/// Captures plans instead of spawning anything. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    plans: Arc<Mutex<Vec<LaunchPlan>>>,
}

impl RecordingOpener {
    pub fn plans(&self) -> Vec<LaunchPlan> {
        self.plans
            .lock()
            .map(|plans| plans.clone())
            .unwrap_or_default()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, plan: &LaunchPlan) -> Result<(), LaunchError> {
        let mut plans = self.plans.lock().map_err(|_| LaunchError::LaunchFailed {
            target: plan.target(),
            reason: "recording lock poisoned".to_string(),
        })?;
        plans.push(plan.clone());
        Ok(())
    }
}

fn existing_path(path: &Path) -> Result<PathBuf, LaunchError> {
    if path.as_os_str().is_empty() {
        return Err(LaunchError::EmptyPath);
    }
    if !path.exists() {
        return Err(LaunchError::MissingPath(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn url_encode_component(input: &str) -> String {
    let mut out = String::new();
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else if byte == b' ' {
            out.push('+');
        } else {
            out.push('%');
            out.push_str(&format!("{byte:02X}"));
        }
    }
    out
}
