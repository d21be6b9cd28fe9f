//! Set deltas for membership and category edits.
//!
//! Access dialogs snapshot the member list when they open and compare it with
//! the checked list on save; the task editor does the same with category ids.
//! Only the difference is sent to the backend.

use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Items to add and remove to turn `original` into `selected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetDelta<T> {
    pub to_add: Vec<T>,
    pub to_remove: Vec<T>,
}

impl<T> SetDelta<T> {
    /// `true` when nothing changed and no request should be made.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

impl<T> Default for SetDelta<T> {
    fn default() -> Self {
        Self {
            to_add: Vec::new(),
            to_remove: Vec::new(),
        }
    }
}

/// Compute `selected - original` and `original - selected`.
///
/// `to_add` follows `selected` order and `to_remove` follows `original`
/// order; repeated entries count once.
#[must_use]
pub fn diff_sets<'a, T, O, S>(original: O, selected: S) -> SetDelta<T>
where
    T: Eq + Hash + Clone + 'a,
    O: IntoIterator<Item = &'a T>,
    S: IntoIterator<Item = &'a T>,
{
    let original = dedup(original);
    let selected = dedup(selected);
    let original_set: HashSet<&T> = original.iter().copied().collect();
    let selected_set: HashSet<&T> = selected.iter().copied().collect();

    SetDelta {
        to_add: selected
            .into_iter()
            .filter(|item| !original_set.contains(item))
            .cloned()
            .collect(),
        to_remove: original
            .into_iter()
            .filter(|item| !selected_set.contains(item))
            .cloned()
            .collect(),
    }
}

fn dedup<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// Username delta for workspace- or board-level access changes.
#[must_use]
pub fn diff_usernames(original: &[String], selected: &[String]) -> SetDelta<String> {
    diff_sets(original, selected)
}

/// Category id delta for a task edit.
#[must_use]
pub fn diff_category_ids(original: &[i64], selected: &[i64]) -> SetDelta<i64> {
    diff_sets(original, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn usernames_add_and_remove() {
        let delta = diff_usernames(&names(&["a", "b"]), &names(&["b", "c"]));
        assert_eq!(delta.to_add, names(&["c"]));
        assert_eq!(delta.to_remove, names(&["a"]));
        assert!(!delta.is_noop());
    }

    #[test]
    fn unchanged_selection_is_noop() {
        let delta = diff_usernames(&names(&["a"]), &names(&["a"]));
        assert!(delta.to_add.is_empty());
        assert!(delta.to_remove.is_empty());
        assert!(delta.is_noop());
    }

    #[test]
    fn comparison_is_exact() {
        let delta = diff_usernames(&names(&["Ana"]), &names(&["ana"]));
        assert_eq!(delta.to_add, names(&["ana"]));
        assert_eq!(delta.to_remove, names(&["Ana"]));
    }

    #[test]
    fn order_follows_inputs_and_duplicates_collapse() {
        let delta = diff_usernames(&names(&["z", "y", "z"]), &names(&["c", "a", "c"]));
        assert_eq!(delta.to_add, names(&["c", "a"]));
        assert_eq!(delta.to_remove, names(&["z", "y"]));
    }

    #[test]
    fn category_ids_diff() {
        let delta = diff_category_ids(&[1, 2, 3], &[3, 4]);
        assert_eq!(delta.to_add, vec![4]);
        assert_eq!(delta.to_remove, vec![1, 2]);
        assert!(diff_category_ids(&[], &[]).is_noop());
    }
}
