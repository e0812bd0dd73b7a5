use crate::RecordedValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a call record, unique within one recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallRecordId(pub u64);

impl fmt::Display for CallRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingId(pub u64);

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recording-{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub declaring_type: String,
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_constructor: bool,
}

impl Method {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            is_static: false,
            is_constructor: false,
        }
    }

    /// Declaring type without its package, e.g. `HashMap` for `java.util.HashMap`.
    pub fn simple_type_name(&self) -> &str {
        simple_name(&self.declaring_type)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Strips the package/module path from a qualified type name.
pub fn simple_name(qualified: &str) -> &str {
    qualified
        .rsplit(['.', '$'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(qualified)
}

/// One recorded method invocation and the calls it made.
///
/// Recordings of recursive programs nest thousands of levels deep, so
/// `Clone` and `Drop` walk the subtree with a heap stack instead of
/// recursing per level.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: CallRecordId,
    pub method: Method,
    #[serde(default)]
    pub arguments: Vec<RecordedValue>,
    /// Return value, or the throwable when `thrown` is set.
    #[serde(default)]
    pub return_value: Option<RecordedValue>,
    #[serde(default)]
    pub thrown: bool,
    #[serde(default)]
    pub children: Vec<CallRecord>,
}

impl CallRecord {
    pub fn new(id: u64, method: Method) -> Self {
        Self {
            id: CallRecordId(id),
            method,
            arguments: Vec::new(),
            return_value: None,
            thrown: false,
            children: Vec::new(),
        }
    }

    /// Copy of this call without its children.
    fn shallow_clone(&self) -> Self {
        Self {
            id: self.id,
            method: self.method.clone(),
            arguments: self.arguments.clone(),
            return_value: self.return_value.clone(),
            thrown: self.thrown,
            children: Vec::with_capacity(self.children.len()),
        }
    }

    /// Number of calls in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(call) = stack.pop() {
            count += 1;
            stack.extend(call.children.iter());
        }
        count
    }
}

impl Clone for CallRecord {
    fn clone(&self) -> Self {
        // Frames are (source call, next child to copy, copy being filled).
        // A finished copy moves into its parent's copy; the root's is returned.
        let mut stack = vec![(self, 0usize, self.shallow_clone())];
        loop {
            let top = stack.len() - 1;
            let source: &CallRecord = stack[top].0;
            if let Some(child) = source.children.get(stack[top].1) {
                stack[top].1 += 1;
                stack.push((child, 0, child.shallow_clone()));
                continue;
            }

            let (_, _, done) = stack.swap_remove(top);
            match stack.last_mut() {
                Some((_, _, parent)) => parent.children.push(done),
                None => return done,
            }
        }
    }
}

impl Drop for CallRecord {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut call) = pending.pop() {
            pending.append(&mut call.children);
        }
    }
}

/// One captured execution trace rooted at a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordingId,
    pub root: CallRecord,
}

impl Recording {
    pub fn new(id: u64, root: CallRecord) -> Self {
        Self {
            id: RecordingId(id),
            root,
        }
    }

    pub fn call_count(&self) -> usize {
        self.root.subtree_size()
    }
}
