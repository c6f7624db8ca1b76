//! Keeping the current item in every derived list.

use std::sync::Arc;

/// Whether `list` holds `item` itself (pointer identity, not equal content).
pub fn contains<I>(list: &[Arc<I>], item: &Arc<I>) -> bool {
    list.iter().any(|entry| Arc::ptr_eq(entry, item))
}

/// Append `current` to `list` unless it is unset or already present.
///
/// Pinning only ever adds: an item pinned earlier stays until the list is
/// rebuilt from scratch.
pub fn pin<I>(list: &mut Vec<Arc<I>>, current: Option<&Arc<I>>) {
    if let Some(current) = current {
        if !contains(list, current) {
            list.push(Arc::clone(current));
        }
    }
}

/// Owned variant of [`pin`].
pub fn pinned<I>(mut list: Vec<Arc<I>>, current: Option<&Arc<I>>) -> Vec<Arc<I>> {
    pin(&mut list, current);
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_current() {
        let a = Arc::new("a");
        let z = Arc::new("z");
        let out = pinned(vec![a.clone()], Some(&z));
        assert_eq!(out.len(), 2);
        assert!(Arc::ptr_eq(&out[1], &z));
    }

    #[test]
    fn present_current_is_not_duplicated() {
        let a = Arc::new("a");
        let out = pinned(vec![a.clone()], Some(&a));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn identity_not_equality() {
        let a = Arc::new("a");
        let twin = Arc::new("a");
        let out = pinned(vec![a.clone()], Some(&twin));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn none_leaves_list_alone() {
        let a = Arc::new("a");
        let out = pinned(vec![a], None);
        assert_eq!(out.len(), 1);
        assert!(pinned(Vec::<Arc<&str>>::new(), None).is_empty());
    }

    #[test]
    fn pinning_is_additive() {
        let a = Arc::new("a");
        let b = Arc::new("b");
        let mut list = vec![];
        pin(&mut list, Some(&a));
        pin(&mut list, Some(&b));
        pin(&mut list, Some(&a));
        assert_eq!(list.len(), 2);
        assert!(contains(&list, &a));
        assert!(contains(&list, &b));
    }
}
