//! Checkpoint and restore for amended histories.
//!
//! Snapshot identity cannot survive serialization, so each distinct
//! snapshot is written once to a table and every history position and
//! pending operation refers to it by index. Restoring builds one `Arc`
//! per table entry, so snapshots that were shared stay shared.

use crate::amend::AmendedHistory;
use crate::core::{History, Snapshot};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, ReferenceViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// A pending operation and the table entry holding its captured snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry<Id> {
    pub id: Id,
    pub snapshot: usize,
}

/// Serializable checkpoint of an amended history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<S, Id> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Distinct snapshot values, in first-seen order
    pub snapshots: Vec<S>,

    /// Past entries as indices into `snapshots`, oldest first
    pub past: Vec<usize>,

    pub present: usize,

    /// Future entries as indices into `snapshots`, nearest first
    pub future: Vec<usize>,

    /// Operations awaiting their END directive
    pub pending: Vec<PendingEntry<Id>>,
}

/// Collects distinct snapshots, keyed by allocation.
struct SnapshotTable<S> {
    indices: HashMap<*const S, usize>,
    values: Vec<S>,
}

impl<S: Clone> SnapshotTable<S> {
    fn new() -> Self {
        Self {
            indices: HashMap::new(),
            values: Vec::new(),
        }
    }

    fn intern(&mut self, snapshot: &Snapshot<S>) -> usize {
        let values = &mut self.values;
        *self.indices.entry(Arc::as_ptr(snapshot)).or_insert_with(|| {
            values.push((**snapshot).clone());
            values.len() - 1
        })
    }

    fn intern_all(&mut self, snapshots: &[Snapshot<S>]) -> Vec<usize> {
        snapshots.iter().map(|snapshot| self.intern(snapshot)).collect()
    }
}

impl<S, Id> Checkpoint<S, Id>
where
    S: Clone,
    Id: Clone + Eq + Hash + Debug,
{
    /// Capture the current history.
    ///
    /// Every `Arc` is written once no matter how many positions share it.
    /// Pending snapshots that already left history are kept too, so an END
    /// for them fails after restore exactly as it would have before.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retcon::checkpoint::Checkpoint;
    /// use retcon::core::History;
    /// use retcon::AmendedHistory;
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    ///
    /// let shared = Arc::new(7);
    /// let history = History::from_parts(vec![Arc::clone(&shared)], Arc::clone(&shared), vec![]);
    /// let state = AmendedHistory::new(Arc::new(history), HashMap::from([("op", shared)]));
    ///
    /// let checkpoint = Checkpoint::capture(&state);
    /// assert_eq!(checkpoint.snapshots, vec![7]);
    /// assert_eq!(checkpoint.past, vec![0]);
    /// assert_eq!(checkpoint.present, 0);
    /// ```
    pub fn capture(state: &AmendedHistory<S, Id>) -> Self {
        let mut table = SnapshotTable::new();
        let past = table.intern_all(state.past());
        let present = table.intern(state.present());
        let future = table.intern_all(state.future());
        let pending = state
            .pending()
            .iter()
            .map(|(id, snapshot)| PendingEntry {
                id: id.clone(),
                snapshot: table.intern(snapshot),
            })
            .collect();

        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            snapshots: table.values,
            past,
            present,
            future,
            pending,
        }
    }

    /// Rebuild the amended history with the captured sharing intact.
    ///
    /// Every reference problem is reported at once.
    pub fn restore(self) -> Result<AmendedHistory<S, Id>, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Validation::Failure(violations) = self.validate() {
            return Err(CheckpointError::InvalidReferences(
                violations.iter().cloned().collect(),
            ));
        }

        let table: Vec<Snapshot<S>> = self.snapshots.into_iter().map(Arc::new).collect();
        let resolve = |indices: Vec<usize>| -> Vec<Snapshot<S>> {
            indices.into_iter().map(|index| Arc::clone(&table[index])).collect()
        };

        let past = resolve(self.past);
        let present = Arc::clone(&table[self.present]);
        let future = resolve(self.future);
        let pending: HashMap<Id, Snapshot<S>> = self
            .pending
            .into_iter()
            .map(|entry| (entry.id, Arc::clone(&table[entry.snapshot])))
            .collect();

        let history = History::from_parts(past, present, future);
        Ok(AmendedHistory::new(Arc::new(history), pending))
    }

    /// Check every table reference, accumulating ALL violations.
    fn validate(&self) -> Validation<(), NonEmptyVec<ReferenceViolation>> {
        let len = self.snapshots.len();
        let entry = |position: String, index: usize| -> Validation<(), NonEmptyVec<ReferenceViolation>> {
            if index < len {
                Validation::success(())
            } else {
                Validation::fail(ReferenceViolation::EntryOutOfRange {
                    position,
                    index,
                    len,
                })
            }
        };

        let mut checks: Vec<Validation<(), NonEmptyVec<ReferenceViolation>>> = Vec::new();
        for (i, index) in self.past.iter().enumerate() {
            checks.push(entry(format!("past[{i}]"), *index));
        }
        checks.push(entry("present".to_string(), self.present));
        for (i, index) in self.future.iter().enumerate() {
            checks.push(entry(format!("future[{i}]"), *index));
        }

        let mut seen = HashSet::new();
        for pending in &self.pending {
            let id = format!("{:?}", pending.id);
            if !seen.insert(&pending.id) {
                checks.push(Validation::fail(ReferenceViolation::DuplicateOperation {
                    id: id.clone(),
                }));
            }
            if pending.snapshot >= len {
                checks.push(Validation::fail(ReferenceViolation::PendingOutOfRange {
                    id,
                    index: pending.snapshot,
                    len,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<S, Id> Checkpoint<S, Id>
where
    S: Serialize + DeserializeOwned,
    Id: Serialize + DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AmendedHistory<String, u32> {
        let first = Arc::new("a".to_string());
        let second = Arc::new("b".to_string());
        let present = Arc::new("c".to_string());
        let ahead = Arc::new("d".to_string());

        let history = History::from_parts(
            vec![Arc::clone(&first), Arc::clone(&second)],
            Arc::clone(&present),
            vec![Arc::clone(&ahead)],
        );
        let pending = HashMap::from([
            (1, Arc::clone(&second)),
            (2, Arc::clone(&present)),
            (3, Arc::clone(&ahead)),
            (4, Arc::new("gone".to_string())),
        ]);
        AmendedHistory::new(Arc::new(history), pending)
    }

    /// `x` sits at past[1], past[3] and the present.
    fn shared() -> AmendedHistory<String, u32> {
        let start = Arc::new("start".to_string());
        let x = Arc::new("x".to_string());
        let b = Arc::new("b".to_string());

        let history = History::from_parts(
            vec![start, Arc::clone(&x), b, Arc::clone(&x)],
            Arc::clone(&x),
            vec![],
        );
        AmendedHistory::new(Arc::new(history), HashMap::from([(1, x)]))
    }

    fn pending_index(checkpoint: &Checkpoint<String, u32>, id: u32) -> Option<usize> {
        checkpoint
            .pending
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.snapshot)
    }

    #[test]
    fn capture_writes_each_snapshot_once() {
        let checkpoint = Checkpoint::capture(&shared());

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.snapshots, vec!["start", "x", "b"]);
        assert_eq!(checkpoint.past, vec![0, 1, 2, 1]);
        assert_eq!(checkpoint.present, 1);
        assert_eq!(pending_index(&checkpoint, 1), Some(1));
    }

    #[test]
    fn capture_keeps_pending_snapshots_outside_history() {
        let checkpoint = Checkpoint::capture(&sample());

        assert_eq!(checkpoint.snapshots.len(), 5);
        assert_eq!(pending_index(&checkpoint, 1), Some(1));
        assert_eq!(pending_index(&checkpoint, 2), Some(checkpoint.present));
        assert_eq!(pending_index(&checkpoint, 3), Some(checkpoint.future[0]));
        let gone = pending_index(&checkpoint, 4).unwrap();
        assert_eq!(checkpoint.snapshots[gone], "gone");
    }

    #[test]
    fn restore_relinks_snapshot_identity() {
        let restored = Checkpoint::capture(&sample()).restore().unwrap();

        assert!(Arc::ptr_eq(&restored.pending()[&1], &restored.past()[1]));
        assert!(Arc::ptr_eq(&restored.pending()[&2], restored.present()));
        assert!(Arc::ptr_eq(&restored.pending()[&3], &restored.future()[0]));
        assert_eq!(restored.pending()[&4].as_str(), "gone");
    }

    #[test]
    fn json_roundtrip_keeps_shared_snapshots_shared() {
        let json = Checkpoint::capture(&shared()).to_json().unwrap();
        let restored = Checkpoint::<String, u32>::from_json(&json)
            .unwrap()
            .restore()
            .unwrap();

        let past = restored.past();
        assert!(Arc::ptr_eq(&past[1], &past[3]));
        assert!(Arc::ptr_eq(&past[3], restored.present()));
        assert!(Arc::ptr_eq(&restored.pending()[&1], restored.present()));
        assert!(!Arc::ptr_eq(&past[0], &past[2]));
    }

    #[test]
    fn binary_roundtrip_preserves_checkpoint_id() {
        let checkpoint = Checkpoint::capture(&sample());
        let bytes = checkpoint.to_binary().unwrap();
        let decoded = Checkpoint::<String, u32>::from_binary(&bytes).unwrap();

        assert_eq!(decoded.id, checkpoint.id);
        assert_eq!(decoded.snapshots, checkpoint.snapshots);
        assert_eq!(decoded.pending.len(), checkpoint.pending.len());
    }

    #[test]
    fn restore_rejects_unknown_version() {
        let mut checkpoint = Checkpoint::capture(&sample());
        checkpoint.version = 99;

        let result = checkpoint.restore();
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn restore_accumulates_all_reference_violations() {
        let mut checkpoint = Checkpoint::capture(&shared());
        checkpoint.past[2] = 10;
        checkpoint.present = 3;
        checkpoint.pending = vec![
            PendingEntry { id: 1, snapshot: 7 },
            PendingEntry { id: 1, snapshot: 0 },
        ];

        match checkpoint.restore() {
            Err(CheckpointError::InvalidReferences(violations)) => {
                assert_eq!(violations.len(), 4);
                assert!(violations.contains(&ReferenceViolation::EntryOutOfRange {
                    position: "past[2]".to_string(),
                    index: 10,
                    len: 3,
                }));
                assert!(violations.contains(&ReferenceViolation::EntryOutOfRange {
                    position: "present".to_string(),
                    index: 3,
                    len: 3,
                }));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ReferenceViolation::PendingOutOfRange { index: 7, .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ReferenceViolation::DuplicateOperation { .. })));
            }
            other => panic!("Expected reference violations, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = Checkpoint::<String, u32>::from_json("{not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
