//! Derived view over the item collection.
//!
//! Everything here is a pure function of the current collection, recomputed
//! on every render and never cached. The controller stores items in arrival
//! order; display order and aggregate statistics are derived on demand.

use crate::types::BucketItem;

/// Returns the items sorted for display: most recently created first.
///
/// The sort is stable, so items sharing a creation timestamp keep their
/// collection order.
#[must_use]
pub fn sorted(items: &[BucketItem]) -> Vec<BucketItem> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

/// Number of completed items.
#[must_use]
pub fn completed_count(items: &[BucketItem]) -> usize {
    items.iter().filter(|item| item.completed).count()
}

/// Total number of items.
#[must_use]
pub fn total_count(items: &[BucketItem]) -> usize {
    items.len()
}

/// Completed fraction in `[0, 1]`; `0.0` for an empty collection.
#[must_use]
pub fn progress(items: &[BucketItem]) -> f64 {
    let total = total_count(items);
    if total == 0 {
        return 0.0;
    }
    completed_count(items) as f64 / total as f64
}

/// Whether the empty-list presentation should be shown instead of the grid.
#[must_use]
pub fn is_empty_state(items: &[BucketItem], loading: bool) -> bool {
    items.is_empty() && !loading
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, completed: bool, created_secs: u32) -> BucketItem {
        let created = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, created_secs)
            .unwrap();
        BucketItem {
            id: id.to_string(),
            title: format!("item {id}"),
            description: String::new(),
            completed,
            created_at: created,
            updated_at: created,
            owner: None,
        }
    }

    #[test]
    fn sorted_orders_newest_first() {
        let items = vec![item("a", false, 1), item("b", false, 3), item("c", false, 2)];

        let view = sorted(&items);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn sorted_is_stable_for_equal_timestamps() {
        let items = vec![item("a", false, 1), item("b", false, 1), item("c", false, 1)];

        let view = sorted(&items);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn sorted_is_non_increasing_by_created_at() {
        let items = vec![
            item("a", false, 5),
            item("b", true, 1),
            item("c", false, 9),
            item("d", true, 3),
        ];

        let view = sorted(&items);
        for window in view.windows(2) {
            assert!(window[0].created_at >= window[1].created_at);
        }
    }

    #[test]
    fn counts_and_progress() {
        let items = vec![item("a", true, 1), item("b", false, 2), item("c", true, 3)];

        assert_eq!(completed_count(&items), 2);
        assert_eq!(total_count(&items), 3);
        assert!((progress(&items) - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_never_divides_by_zero() {
        assert_eq!(progress(&[]), 0.0);
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        let all_done = vec![item("a", true, 1), item("b", true, 2)];
        let none_done = vec![item("a", false, 1)];

        assert!(completed_count(&all_done) <= total_count(&all_done));
        assert_eq!(progress(&all_done), 1.0);
        assert_eq!(progress(&none_done), 0.0);
    }

    #[test]
    fn empty_state_requires_not_loading() {
        assert!(is_empty_state(&[], false));
        assert!(!is_empty_state(&[], true));
        assert!(!is_empty_state(&[item("a", false, 1)], false));
    }
}
