use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::logging;
use crate::model::{ResultKind, SearchResult};

const APP_BUNDLE_EXTENSION: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

pub trait DiscoveryProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;
    fn kind(&self) -> ResultKind;
    fn discover(&self) -> Result<Vec<SearchResult>, ProviderError>;
}

/// Application bundles directly inside one directory, usually `/Applications`.
pub struct ApplicationDirectoryProvider {
    root: PathBuf,
}

impl ApplicationDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DiscoveryProvider for ApplicationDirectoryProvider {
    fn provider_name(&self) -> &'static str {
        "applications"
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Application
    }

    fn discover(&self) -> Result<Vec<SearchResult>, ProviderError> {
        fs::read_dir(&self.root).map_err(|error| unreadable_root(&self.root, &error))?;

        let mut apps = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    return Err(unreadable_root(&self.root, &error));
                }
                Err(error) => {
                    logging::warn(&format!("skipping unreadable application entry: {error}"));
                    continue;
                }
            };

            if let Some(app) = application_result(entry.path()) {
                apps.push(app);
            }
        }

        Ok(apps)
    }
}

fn unreadable_root(root: &Path, error: &dyn Display) -> ProviderError {
    ProviderError::new(format!(
        "applications directory is not readable: {}: {error}",
        root.display()
    ))
}

fn application_result(path: &Path) -> Option<SearchResult> {
    let extension = path.extension()?.to_str()?;
    if extension != APP_BUNDLE_EXTENSION {
        return None;
    }

    let name = path.file_stem()?.to_string_lossy().into_owned();
    Some(SearchResult::from_owned(
        ResultKind::Application,
        name,
        "Application".to_string(),
        path.to_string_lossy().into_owned(),
    ))
}

/// The fixed shortlist of user folders. Paths are not checked for existence.
pub struct CommonFolderProvider {
    folders: Vec<PathBuf>,
}

impl CommonFolderProvider {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }
}

impl DiscoveryProvider for CommonFolderProvider {
    fn provider_name(&self) -> &'static str {
        "folders"
    }

    fn kind(&self) -> ResultKind {
        ResultKind::Folder
    }

    fn discover(&self) -> Result<Vec<SearchResult>, ProviderError> {
        Ok(self
            .folders
            .iter()
            .filter_map(|folder| {
                let name = folder.file_name()?.to_string_lossy().into_owned();
                Some(SearchResult::from_owned(
                    ResultKind::Folder,
                    name,
                    "Folder".to_string(),
                    folder.to_string_lossy().into_owned(),
                ))
            })
            .collect())
    }
}

pub struct StaticProvider {
    name: &'static str,
    kind: ResultKind,
    items: Vec<SearchResult>,
}

impl StaticProvider {
    pub fn new(name: &'static str, kind: ResultKind, items: Vec<SearchResult>) -> Self {
        Self { name, kind, items }
    }
}

impl DiscoveryProvider for StaticProvider {
    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> ResultKind {
        self.kind
    }

    fn discover(&self) -> Result<Vec<SearchResult>, ProviderError> {
        Ok(self.items.clone())
    }
}
