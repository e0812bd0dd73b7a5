use crate::{Error, Result};
use recview_types::{CallRecord, CallRecordId, Method, RecordedValue, Recording, RecordingId};
use std::collections::HashMap;
use std::ops::Index;

/// Position of a call inside a [`CallArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordIndex(usize);

/// A call record moved into the arena; children are arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaRecord {
    pub id: CallRecordId,
    pub method: Method,
    pub arguments: Vec<RecordedValue>,
    pub return_value: Option<RecordedValue>,
    pub thrown: bool,
    parent: Option<RecordIndex>,
    children: Vec<RecordIndex>,
}

impl ArenaRecord {
    pub fn parent(&self) -> Option<RecordIndex> {
        self.parent
    }

    pub fn children(&self) -> &[RecordIndex] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Flat, read-only storage of one recording's call tree.
///
/// Built once per recording snapshot; the root always sits at index 0 and
/// every call appears after its parent.
#[derive(Debug, Clone)]
pub struct CallArena {
    recording_id: RecordingId,
    records: Vec<ArenaRecord>,
    by_id: HashMap<CallRecordId, RecordIndex>,
}

impl CallArena {
    /// Flatten a recording without recursion; duplicate call ids are rejected.
    pub fn from_recording(recording: Recording) -> Result<Self> {
        let mut records: Vec<ArenaRecord> = Vec::new();
        let mut by_id = HashMap::new();
        let mut stack: Vec<(CallRecord, Option<RecordIndex>)> = vec![(recording.root, None)];

        while let Some((mut call, parent)) = stack.pop() {
            let index = RecordIndex(records.len());
            if by_id.insert(call.id, index).is_some() {
                return Err(Error::MalformedRecord(format!(
                    "call id {} appears more than once in {}",
                    call.id, recording.id
                )));
            }

            let children = std::mem::take(&mut call.children);
            records.push(ArenaRecord {
                id: call.id,
                method: std::mem::take(&mut call.method),
                arguments: std::mem::take(&mut call.arguments),
                return_value: call.return_value.take(),
                thrown: call.thrown,
                parent,
                children: Vec::with_capacity(children.len()),
            });
            if let Some(parent) = parent {
                records[parent.0].children.push(index);
            }

            // Reverse so the first child is popped (and indexed) first.
            stack.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }

        Ok(Self {
            recording_id: recording.id,
            records,
            by_id,
        })
    }

    pub fn recording_id(&self) -> RecordingId {
        self.recording_id
    }

    pub fn root(&self) -> RecordIndex {
        RecordIndex(0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: RecordIndex) -> Option<&ArenaRecord> {
        self.records.get(index.0)
    }

    pub fn find(&self, id: CallRecordId) -> Option<RecordIndex> {
        self.by_id.get(&id).copied()
    }
}

impl Index<RecordIndex> for CallArena {
    type Output = ArenaRecord;

    fn index(&self, index: RecordIndex) -> &Self::Output {
        &self.records[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: u64, name: &str, children: Vec<CallRecord>) -> CallRecord {
        let mut record = CallRecord::new(id, Method::new("app.Main", name));
        record.children = children;
        record
    }

    #[test]
    fn test_flatten_preserves_child_order() {
        let root = call(
            1,
            "main",
            vec![
                call(2, "first", vec![call(4, "nested", vec![])]),
                call(3, "second", vec![]),
            ],
        );
        let arena = CallArena::from_recording(Recording::new(1, root)).unwrap();

        assert_eq!(arena.len(), 4);
        let root = &arena[arena.root()];
        assert_eq!(root.id, CallRecordId(1));
        let child_ids: Vec<_> = root.children().iter().map(|c| arena[*c].id).collect();
        assert_eq!(child_ids, vec![CallRecordId(2), CallRecordId(3)]);

        let nested = arena.find(CallRecordId(4)).unwrap();
        let parent = arena[nested].parent().unwrap();
        assert_eq!(arena[parent].id, CallRecordId(2));
    }

    #[test]
    fn test_duplicate_ids_are_malformed() {
        let root = call(1, "main", vec![call(2, "a", vec![]), call(2, "b", vec![])]);
        let err = CallArena::from_recording(Recording::new(5, root)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 50_000u64;
        let mut current = call(depth, "leaf", vec![]);
        for id in (1..depth).rev() {
            current = call(id, "step", vec![current]);
        }
        let arena = CallArena::from_recording(Recording::new(1, current)).unwrap();
        assert_eq!(arena.len(), depth as usize);
    }
}
