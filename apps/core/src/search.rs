use crate::config::WebSearchProvider;
use crate::model::{fold_for_match, ResultKind, SearchResult};

const FINDER_KEYWORDS: [&str; 2] = ["find", "file"];

/// Builds the result list for one query.
///
/// Order is fixed: matching applications, the Finder row when the query
/// mentions `find`/`file`, matching folders, then the web fallback. Only the
/// application and folder matches count against `max_results`.
pub fn search(
    query: &str,
    applications: &[SearchResult],
    folders: &[SearchResult],
    engine: WebSearchProvider,
    max_results: usize,
) -> Vec<SearchResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let folded_query = fold_for_match(trimmed);
    let mut budget = max_results;
    let mut results = Vec::new();

    results.extend(take_matching(applications, &folded_query, &mut budget));

    if let Some(finder) = finder_result(trimmed) {
        results.push(finder);
    }

    results.extend(take_matching(folders, &folded_query, &mut budget));
    results.push(web_result(trimmed, engine));
    results
}

/// Rows shown while the query is empty.
pub fn default_suggestions(engine: WebSearchProvider) -> Vec<SearchResult> {
    vec![
        SearchResult::new(
            ResultKind::Application,
            "Applications",
            "Open an application",
            "",
        ),
        SearchResult::from_owned(
            ResultKind::Web,
            format!("Search on {}", engine.display_name()),
            "Web Search".to_string(),
            String::new(),
        ),
    ]
}

pub fn finder_result(query: &str) -> Option<SearchResult> {
    let folded = fold_for_match(query);
    if !FINDER_KEYWORDS.iter().any(|keyword| folded.contains(keyword)) {
        return None;
    }

    let term = strip_finder_keywords(query);
    Some(SearchResult::from_owned(
        ResultKind::File,
        format!("Find \"{term}\" in Finder"),
        "Open Finder Search".to_string(),
        term,
    ))
}

pub fn web_result(query: &str, engine: WebSearchProvider) -> SearchResult {
    SearchResult::from_owned(
        ResultKind::Web,
        format!("Search \"{query}\" on {}", engine.display_name()),
        "Web Search".to_string(),
        query.to_string(),
    )
}

fn take_matching(
    items: &[SearchResult],
    folded_query: &str,
    budget: &mut usize,
) -> Vec<SearchResult> {
    let matched: Vec<SearchResult> = items
        .iter()
        .filter(|item| item.matches(folded_query))
        .take(*budget)
        .cloned()
        .collect();
    *budget -= matched.len();
    matched
}

/// Removes every `find ` / `file ` prefix word, ignoring case.
fn strip_finder_keywords(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut rest = query;
    'scan: while !rest.is_empty() {
        for keyword in FINDER_KEYWORDS {
            if let Some(word) = rest.get(..keyword.len()) {
                let after = &rest[keyword.len()..];
                if word.eq_ignore_ascii_case(keyword) && after.starts_with(' ') {
                    rest = &after[1..];
                    continue 'scan;
                }
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out.trim().to_string()
}
