use serde::{Deserialize, Serialize};

use crate::model::{ResultKind, SearchResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultDto {
    pub id: String,
    pub kind: ResultKind,
    pub title: String,
    pub subtitle: String,
    pub path: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<SearchResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub kind: ResultKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecuteResponse {
    pub target: String,
    pub hide_window: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Search(SearchRequest),
    Suggestions,
    Execute(ExecuteRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Search(SearchResponse),
    Suggestions(SearchResponse),
    Execute(ExecuteResponse),
}

impl From<SearchResult> for SearchResultDto {
    fn from(value: SearchResult) -> Self {
        Self {
            icon: value.kind.icon_hint().to_string(),
            id: value.id,
            kind: value.kind,
            title: value.title,
            subtitle: value.subtitle,
            path: value.path,
        }
    }
}

impl From<ExecuteRequest> for SearchResult {
    fn from(value: ExecuteRequest) -> Self {
        SearchResult::from_owned(value.kind, value.title, value.subtitle, value.path)
    }
}

impl SearchResponse {
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        Self {
            results: results.into_iter().map(SearchResultDto::from).collect(),
        }
    }
}
