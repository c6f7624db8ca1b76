//! Case-insensitive ordering by identifier.

use crate::item::Item;
use std::cmp::Ordering;
use std::sync::Arc;

/// Compare two identifiers lexicographically, ignoring case.
///
/// Characters are lowercased one at a time, so multi-character lowercase
/// expansions compare as their expanded sequence.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    a.cmp(b)
}

/// Compare two items by identifier. See [`compare_ids`].
pub fn compare<I: Item>(a: &I, b: &I) -> Ordering {
    compare_ids(a.id(), b.id())
}

/// Return the items sorted by identifier.
///
/// The sort is stable: items whose identifiers compare equal keep their
/// relative input order, so repeated sorts of the same input are identical.
pub fn sorted<I: Item>(items: &[Arc<I>]) -> Vec<Arc<I>> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| compare(&**a, &**b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Arc<&'static str>]) -> Vec<&'static str> {
        items.iter().map(|i| **i).collect()
    }

    #[test]
    fn sorts_case_insensitively() {
        let items: Vec<_> = ["Zebra", "apple", "Banana"].into_iter().map(Arc::new).collect();
        assert_eq!(ids(&sorted(&items)), vec!["apple", "Banana", "Zebra"]);
    }

    #[test]
    fn equal_ids_compare_equal() {
        assert_eq!(compare_ids("Apple", "aPPLE"), Ordering::Equal);
        assert_eq!(compare_ids("a", "B"), Ordering::Less);
        assert_eq!(compare_ids("b", "A"), Ordering::Greater);
        assert_eq!(compare_ids("ab", "a"), Ordering::Greater);
    }

    #[test]
    fn sort_is_stable_for_case_variants() {
        let first = Arc::new("item");
        let second = Arc::new("ITEM");
        let items = vec![first.clone(), Arc::new("alpha"), second.clone()];
        let out = sorted(&items);
        assert!(Arc::ptr_eq(&out[1], &first));
        assert!(Arc::ptr_eq(&out[2], &second));
    }

    #[test]
    fn output_is_non_decreasing() {
        let items: Vec<_> = ["delta", "Alpha", "charlie", "bravo", "ALPHA2", "echo", "Bravo"]
            .into_iter()
            .map(Arc::new)
            .collect();
        let out = sorted(&items);
        for pair in out.windows(2) {
            assert_ne!(compare(&*pair[0], &*pair[1]), Ordering::Greater);
        }
        assert_eq!(sorted(&out).len(), items.len());
    }

    #[test]
    fn empty_input() {
        let items: Vec<Arc<String>> = Vec::new();
        assert!(sorted(&items).is_empty());
    }
}
