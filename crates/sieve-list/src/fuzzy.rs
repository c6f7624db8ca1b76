//! Subsequence fuzzy matching.

use crate::item::Item;
use std::sync::Arc;

/// Returns `true` if every character of `term` occurs in `haystack`, in
/// order, ignoring case. Any number of characters may sit between two
/// matched characters. An empty term matches everything.
///
/// Term characters are literal: `.` or `*` only match themselves.
pub fn fuzzy_match(haystack: &str, term: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    term.chars()
        .flat_map(char::to_lowercase)
        .all(|wanted| hay.any(|c| c == wanted))
}

/// Keep the items whose identifiers fuzzy-match `term`, preserving order.
pub fn fuzzy_filter<I: Item>(items: &[Arc<I>], term: &str) -> Vec<Arc<I>> {
    if term.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| fuzzy_match(item.id(), term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches_everything() {
        assert!(fuzzy_match("anything", ""));
        assert!(fuzzy_match("", ""));
    }

    #[test]
    fn matches_in_order_with_gaps() {
        assert!(fuzzy_match("Banana", "an"));
        assert!(fuzzy_match("Banana", "bnn"));
        assert!(fuzzy_match("project-structure", "pjst"));
        assert!(!fuzzy_match("Zebra", "an"));
        assert!(!fuzzy_match("Banana", "nb"));
    }

    #[test]
    fn case_insensitive_both_ways() {
        assert!(fuzzy_match("apple", "APL"));
        assert!(fuzzy_match("APPLE", "apl"));
    }

    #[test]
    fn repeated_term_characters_need_repeated_matches() {
        assert!(fuzzy_match("aa", "aa"));
        assert!(!fuzzy_match("a", "aa"));
    }

    #[test]
    fn metacharacters_are_literal() {
        assert!(!fuzzy_match("abc", "a.c"));
        assert!(fuzzy_match("a.b.c", "a.c"));
        assert!(!fuzzy_match("abc", "*"));
    }

    #[test]
    fn term_longer_than_haystack_fails() {
        assert!(!fuzzy_match("ab", "abc"));
        assert!(!fuzzy_match("", "a"));
    }

    #[test]
    fn filter_keeps_order_and_identity() {
        let items: Vec<_> = ["apple", "Banana", "Zebra"].into_iter().map(Arc::new).collect();
        let out = fuzzy_filter(&items, "an");
        assert_eq!(out.len(), 1);
        assert!(Arc::ptr_eq(&out[0], &items[1]));

        let out = fuzzy_filter(&items, "a");
        assert_eq!(out.len(), 3);

        assert!(fuzzy_filter(&items, "xyz").is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let items: Vec<_> = ["alpha", "beta", "gamma", "delta"].into_iter().map(Arc::new).collect();
        let once = fuzzy_filter(&items, "ta");
        let twice = fuzzy_filter(&items, "ta");
        assert_eq!(once.len(), twice.len());
        assert!(once.iter().zip(&twice).all(|(a, b)| Arc::ptr_eq(a, b)));
        assert_eq!(fuzzy_filter(&once, "ta").len(), once.len());
    }
}
