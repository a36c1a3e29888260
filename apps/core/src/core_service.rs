use crate::action_executor::{plan_launch, LaunchError, LaunchPlan, Opener, SystemOpener};
use crate::config::{validate, Config};
use crate::contract::{CoreRequest, CoreResponse, ExecuteResponse, SearchResponse};
use crate::discovery::{ApplicationDirectoryProvider, CommonFolderProvider, DiscoveryProvider};
use crate::logging;
use crate::model::{ResultKind, SearchResult};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Launch(LaunchError),
    InvalidRequest(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Launch(error) => write!(f, "launch error: {error}"),
            Self::InvalidRequest(error) => write!(f, "invalid request: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<LaunchError> for ServiceError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

pub struct LauncherService {
    config: Config,
    providers: Vec<Box<dyn DiscoveryProvider>>,
    opener: Box<dyn Opener>,
}

impl LauncherService {
    /// Uses the configured applications directory and folder list and opens
    /// targets through the desktop.
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let providers = runtime_providers(&config);
        Ok(Self {
            config,
            providers,
            opener: Box::new(SystemOpener),
        })
    }

    pub fn with_providers(mut self, providers: Vec<Box<dyn DiscoveryProvider>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_opener(mut self, opener: Box<dyn Opener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Providers are enumerated on every call; a failing provider contributes
    /// nothing and is logged.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut applications = Vec::new();
        let mut folders = Vec::new();
        for provider in &self.providers {
            let discovered = match provider.discover() {
                Ok(items) => items,
                Err(error) => {
                    logging::warn(&format!(
                        "provider {} failed: {error}",
                        provider.provider_name()
                    ));
                    continue;
                }
            };

            match provider.kind() {
                ResultKind::Application => applications.extend(discovered),
                ResultKind::Folder => folders.extend(discovered),
                other => logging::warn(&format!(
                    "provider {} yields {} results; skipped",
                    provider.provider_name(),
                    other.as_str()
                )),
            }
        }

        crate::search::search(
            query,
            &applications,
            &folders,
            self.config.web_search_provider,
            self.config.max_results as usize,
        )
    }

    pub fn default_suggestions(&self) -> Vec<SearchResult> {
        crate::search::default_suggestions(self.config.web_search_provider)
    }

    pub fn execute(&self, result: &SearchResult) -> Result<LaunchPlan, ServiceError> {
        logging::info(&format!("selected: {}", result.title));
        let plan = plan_launch(result, &self.config)?;
        self.opener.open(&plan)?;
        logging::info(&format!("opened {}", plan.target()));
        Ok(plan)
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(search) => Ok(CoreResponse::Search(SearchResponse::from_results(
                self.search(&search.query),
            ))),
            CoreRequest::Suggestions => Ok(CoreResponse::Suggestions(
                SearchResponse::from_results(self.default_suggestions()),
            )),
            CoreRequest::Execute(execute) => {
                if execute.title.trim().is_empty() && execute.path.trim().is_empty() {
                    return Err(ServiceError::InvalidRequest(
                        "execute requires a title or path".to_string(),
                    ));
                }
                let plan = self.execute(&SearchResult::from(execute))?;
                Ok(CoreResponse::Execute(ExecuteResponse {
                    target: plan.target(),
                    hide_window: true,
                }))
            }
        }
    }
}

fn runtime_providers(config: &Config) -> Vec<Box<dyn DiscoveryProvider>> {
    vec![
        Box::new(ApplicationDirectoryProvider::new(
            config.applications_dir.clone(),
        )),
        Box::new(CommonFolderProvider::new(config.common_folders.clone())),
    ]
}
