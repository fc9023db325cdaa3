//! Search box suggestions.
//!
//! Mirrors the autocomplete box on the update page: case-insensitive
//! substring match on board names, optionally sorted, capped in length.

use tracing::trace;

use crate::catalog::{BoardRecord, Catalog};
use crate::config::SearchConfig;

/// Boards whose name contains `query`, for the search dropdown.
///
/// An empty or blank query suggests nothing.
#[must_use]
pub fn suggest<'a>(
    catalog: &'a Catalog,
    query: &str,
    config: &SearchConfig,
) -> Vec<&'a BoardRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&BoardRecord> = catalog
        .boards()
        .iter()
        .filter(|board| board.name.to_lowercase().contains(&needle))
        .collect();

    if config.sort {
        matches.sort_by_cached_key(|board| board.name.to_lowercase());
    }
    matches.truncate(config.max_suggestions);

    trace!(query, suggestions = matches.len(), "Search suggestions");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_catalog_str;
    use crate::config::CatalogConfig;

    fn catalog(names: &[&str]) -> Catalog {
        let boards: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::json!({
                    "name": name,
                    "product_code": format!("{i:04}"),
                    "logoURL": "",
                    "instructions": {"windows": "w", "linux": "l", "osx": "o"}
                })
            })
            .collect();
        let doc = serde_json::json!({ "boards": boards }).to_string();
        load_catalog_str(&doc, &CatalogConfig::default())
            .unwrap()
            .catalog
    }

    fn names<'a>(boards: &[&'a BoardRecord]) -> Vec<&'a str> {
        boards.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_substring_case_insensitive() {
        let catalog = catalog(&["FRDM-K64F", "FRDM-KL25Z", "LPC1768", "nRF51-DK"]);
        let found = suggest(&catalog, "frdm", &SearchConfig::default());
        assert_eq!(names(&found), vec!["FRDM-K64F", "FRDM-KL25Z"]);

        let found = suggest(&catalog, "51", &SearchConfig::default());
        assert_eq!(names(&found), vec!["nRF51-DK"]);
    }

    #[test]
    fn test_sorted() {
        let catalog = catalog(&["b-board", "C-board", "a-board"]);
        let found = suggest(&catalog, "board", &SearchConfig::default());
        assert_eq!(names(&found), vec!["a-board", "b-board", "C-board"]);
    }

    #[test]
    fn test_unsorted_keeps_catalog_order() {
        let catalog = catalog(&["b-board", "C-board", "a-board"]);
        let config = SearchConfig {
            sort: false,
            ..SearchConfig::default()
        };
        let found = suggest(&catalog, "board", &config);
        assert_eq!(names(&found), vec!["b-board", "C-board", "a-board"]);
    }

    #[test]
    fn test_capped() {
        let list: Vec<String> = (0..12).map(|i| format!("board-{i:02}")).collect();
        let refs: Vec<&str> = list.iter().map(String::as_str).collect();
        let catalog = catalog(&refs);

        let found = suggest(&catalog, "board", &SearchConfig::default());
        assert_eq!(found.len(), 8);
        assert_eq!(found[0].name, "board-00");
    }

    #[test]
    fn test_empty_query() {
        let catalog = catalog(&["FRDM-K64F"]);
        assert!(suggest(&catalog, "", &SearchConfig::default()).is_empty());
        assert!(suggest(&catalog, "   ", &SearchConfig::default()).is_empty());
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog(&["FRDM-K64F"]);
        assert!(suggest(&catalog, "stm32", &SearchConfig::default()).is_empty());
    }
}
