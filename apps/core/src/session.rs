use crate::model::SearchResult;

/// Query text, current results and selection of the single launcher window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherSession {
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
}

impl LauncherSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_query_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn set_results(&mut self, query: &str, results: Vec<SearchResult>) {
        self.query = query.to_string();
        self.results = results;
        self.selected = 0;
    }

    /// Suggestions stand in for results while nothing has been typed.
    pub fn visible_rows<'a>(&'a self, suggestions: &'a [SearchResult]) -> &'a [SearchResult] {
        if self.is_query_empty() {
            suggestions
        } else {
            &self.results
        }
    }

    pub fn move_selection(&mut self, direction: i32, row_count: usize) {
        self.selected = next_selection_index(self.selected, row_count, direction);
    }

    pub fn submission_target<'a>(
        &'a self,
        suggestions: &'a [SearchResult],
    ) -> Option<&'a SearchResult> {
        let rows = self.visible_rows(suggestions);
        rows.get(self.selected.min(rows.len().saturating_sub(1)))
    }

    pub fn activate<'a>(
        &'a mut self,
        index: usize,
        suggestions: &'a [SearchResult],
    ) -> Option<&'a SearchResult> {
        if index >= self.visible_rows(suggestions).len() {
            return None;
        }
        self.selected = index;
        self.visible_rows(suggestions).get(index)
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }
}

pub fn next_selection_index(current: usize, len: usize, direction: i32) -> usize {
    if len == 0 {
        return 0;
    }

    let max = len - 1;
    if direction < 0 {
        current.saturating_sub(1).min(max)
    } else if direction > 0 {
        (current + 1).min(max)
    } else {
        current.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::{next_selection_index, LauncherSession};
    use crate::model::{ResultKind, SearchResult};

    fn suggestions() -> Vec<SearchResult> {
        vec![
            SearchResult::new(ResultKind::Application, "Applications", "Open an application", ""),
            SearchResult::new(ResultKind::Web, "Search on Google", "Web Search", ""),
        ]
    }

    fn results() -> Vec<SearchResult> {
        vec![
            SearchResult::new(
                ResultKind::Application,
                "Notes",
                "Application",
                "/Applications/Notes.app",
            ),
            SearchResult::new(ResultKind::Web, "Search \"no\" on Google", "Web Search", "no"),
        ]
    }

    #[test]
    fn empty_query_submits_first_suggestion() {
        let session = LauncherSession::default();
        let defaults = suggestions();
        let target = session.submission_target(&defaults).unwrap();
        assert_eq!(target.title, "Applications");
    }

    #[test]
    fn typed_query_submits_selected_result() {
        let mut session = LauncherSession::default();
        let defaults = suggestions();
        session.set_results("no", results());
        assert_eq!(session.submission_target(&defaults).unwrap().title, "Notes");

        session.move_selection(1, session.results().len());
        assert_eq!(session.submission_target(&defaults).unwrap().path, "no");
    }

    #[test]
    fn typed_query_without_results_has_no_target() {
        let mut session = LauncherSession::default();
        session.set_results("zzz", Vec::new());
        assert!(session.submission_target(&suggestions()).is_none());
    }

    #[test]
    fn activate_ignores_out_of_range_rows() {
        let mut session = LauncherSession::default();
        let defaults = suggestions();
        assert!(session.activate(5, &defaults).is_none());
        assert_eq!(session.activate(1, &defaults).unwrap().kind, ResultKind::Web);
    }

    #[test]
    fn reset_clears_query_and_selection() {
        let mut session = LauncherSession::default();
        session.set_results("no", results());
        session.move_selection(1, 2);
        session.reset();
        assert!(session.is_query_empty());
        assert!(session.results().is_empty());
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn selection_index_bounds_are_stable() {
        assert_eq!(next_selection_index(0, 0, 1), 0);
        assert_eq!(next_selection_index(0, 3, -1), 0);
        assert_eq!(next_selection_index(1, 3, -1), 0);
        assert_eq!(next_selection_index(1, 3, 1), 2);
        assert_eq!(next_selection_index(2, 3, 1), 2);
        assert_eq!(next_selection_index(5, 3, 0), 2);
    }
}
