//! Pure helpers for locating and rewriting past snapshots.

use crate::core::{Merge, Snapshot};
use std::sync::Arc;

/// Index of the most recent entry in `past` that is the same snapshot
/// (by reference) as `snapshot`.
///
/// Searching from the newest end picks the amendment point closest to
/// the present when several operations captured the same snapshot.
pub fn find_snapshot<S>(past: &[Snapshot<S>], snapshot: &Snapshot<S>) -> Option<usize> {
    past.iter().rposition(|entry| Arc::ptr_eq(entry, snapshot))
}

/// Rewrite `original[from..]` through `merge`, then drop the newest entry.
///
/// The newest entry is the one the wrapped reducer pushed for the END
/// action itself. `original` is left untouched; a fresh vector is always
/// returned.
///
/// # Example
///
/// ```rust
/// use retcon::amend::amend_past;
/// use retcon::core::Merge;
/// use std::sync::Arc;
///
/// let past = vec![Arc::new(1), Arc::new(2), Arc::new(3), Arc::new(4)];
/// let merge = Merge::new(|present: &Arc<i32>, entry: &Arc<i32>, _: &()| Arc::new(**entry + **present));
///
/// let amended = amend_past(&past, 1, &Arc::new(10), &(), &merge);
/// let values: Vec<i32> = amended.iter().map(|s| **s).collect();
/// assert_eq!(values, vec![1, 12, 13]);
/// assert_eq!(past.len(), 4);
/// ```
pub fn amend_past<S, A>(
    original: &[Snapshot<S>],
    from: usize,
    present: &Snapshot<S>,
    action: &A,
    merge: &Merge<S, A>,
) -> Vec<Snapshot<S>> {
    let from = from.min(original.len());
    let mut amended: Vec<Snapshot<S>> = Vec::with_capacity(original.len());
    amended.extend(original[..from].iter().cloned());
    amended.extend(
        original[from..]
            .iter()
            .map(|entry| merge.apply(present, entry, action)),
    );
    amended.pop();
    amended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshots(values: &[&'static str]) -> Vec<Snapshot<&'static str>> {
        values.iter().map(|v| Arc::new(*v)).collect()
    }

    #[test]
    fn find_snapshot_uses_reference_identity() {
        let past = snapshots(&["a", "b"]);
        let lookalike = Arc::new("a");

        assert_eq!(find_snapshot(&past, &past[0]), Some(0));
        assert_eq!(find_snapshot(&past, &lookalike), None);
    }

    #[test]
    fn find_snapshot_prefers_most_recent() {
        let shared = Arc::new("shared");
        let past = vec![
            Arc::clone(&shared),
            Arc::new("x"),
            Arc::clone(&shared),
            Arc::new("y"),
        ];

        assert_eq!(find_snapshot(&past, &shared), Some(2));
    }

    #[test]
    fn amend_past_rewrites_tail_and_drops_last() {
        let past = snapshots(&["p0", "p1", "p2"]);
        let merge = Merge::new(|_: &Arc<&'static str>, _: &Arc<&'static str>, _: &()| {
            Arc::new("merged")
        });

        let amended = amend_past(&past, 0, &Arc::new("p3"), &(), &merge);
        let values: Vec<&str> = amended.iter().map(|s| **s).collect();

        assert_eq!(values, vec!["merged", "merged"]);
    }

    #[test]
    fn amend_past_keeps_prefix_references() {
        let past = snapshots(&["a", "b", "c", "d"]);
        let merge = Merge::new(|_: &Arc<&'static str>, _: &Arc<&'static str>, _: &()| {
            Arc::new("m")
        });

        let amended = amend_past(&past, 2, &Arc::new("e"), &(), &merge);

        assert_eq!(amended.len(), 3);
        assert!(Arc::ptr_eq(&amended[0], &past[0]));
        assert!(Arc::ptr_eq(&amended[1], &past[1]));
        assert_eq!(*amended[2], "m");
    }

    #[test]
    fn amend_past_leaves_original_untouched() {
        let past = snapshots(&["a", "b"]);
        let merge = Merge::new(|_: &Arc<&'static str>, _: &Arc<&'static str>, _: &()| {
            Arc::new("m")
        });

        let _ = amend_past(&past, 0, &Arc::new("c"), &(), &merge);

        assert_eq!(*past[0], "a");
        assert_eq!(*past[1], "b");
    }

    #[test]
    fn identity_merge_only_trims() {
        let past = snapshots(&["a", "b", "c"]);
        let amended = amend_past(&past, 1, &Arc::new("d"), &(), &Merge::identity());

        assert_eq!(amended.len(), 2);
        assert!(Arc::ptr_eq(&amended[1], &past[1]));
    }
}
