use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Application,
    File,
    Folder,
    Web,
    Assistant,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::File => "file",
            Self::Folder => "folder",
            Self::Web => "web",
            Self::Assistant => "assistant",
        }
    }

    /// SF Symbol name the window shows when no bundle icon is available.
    pub fn icon_hint(&self) -> &'static str {
        match self {
            Self::Application => "app.square",
            Self::File => "doc",
            Self::Folder => "folder.fill",
            Self::Web => "globe",
            Self::Assistant => "bubble.left.and.bubble.right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub kind: ResultKind,
    pub title: String,
    pub subtitle: String,
    pub path: String,
    folded_title: String,
}

impl SearchResult {
    pub fn new(kind: ResultKind, title: &str, subtitle: &str, path: &str) -> Self {
        Self::from_owned(kind, title.to_string(), subtitle.to_string(), path.to_string())
    }

    pub fn from_owned(kind: ResultKind, title: String, subtitle: String, path: String) -> Self {
        let key = if path.is_empty() { &title } else { &path };
        let id = format!("{}:{key}", kind.as_str());
        let folded_title = fold_for_match(&title);
        Self {
            id,
            kind,
            title,
            subtitle,
            path,
            folded_title,
        }
    }

    pub fn folded_title(&self) -> &str {
        &self.folded_title
    }

    /// `folded_query` must already be passed through [`fold_for_match`].
    pub fn matches(&self, folded_query: &str) -> bool {
        self.folded_title.contains(folded_query)
    }
}

pub fn fold_for_match(input: &str) -> String {
    input.to_lowercase()
}
