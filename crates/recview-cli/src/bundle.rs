use anyhow::{Context, Result};
use futures::FutureExt;
use recview_runtime::{LocateFuture, SourceLocator};
use recview_types::{
    CallRecord, CallRecordId, Method, ProcessMetadata, RecordedValue, Recording, RecordingId,
    SourceCode,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Source file collected by the capture side, with the class path entry it
/// was found under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundledSource {
    pub origin: PathBuf,
    pub source: SourceCode,
}

/// One call as stored in a bundle. Calls are listed flat and point at their
/// parent, so a recording of any depth parses without nesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundledCall {
    pub id: CallRecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CallRecordId>,
    pub method: Method,
    #[serde(default)]
    pub arguments: Vec<RecordedValue>,
    #[serde(default)]
    pub return_value: Option<RecordedValue>,
    #[serde(default)]
    pub thrown: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundledRecording {
    pub id: RecordingId,
    pub calls: Vec<BundledCall>,
}

impl BundledRecording {
    /// Relink the flat call list into a call tree. Children keep the order
    /// in which they are listed.
    ///
    /// Exactly one call may lack a parent; every parent must be listed and
    /// every call must hang off the root.
    pub fn into_recording(self) -> recview_types::Result<Recording> {
        let BundledRecording { id, calls } = self;
        let count = calls.len();

        let mut index_of = HashMap::with_capacity(count);
        for (index, call) in calls.iter().enumerate() {
            if index_of.insert(call.id, index).is_some() {
                return Err(malformed(format!("call {} is listed more than once", call.id)));
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut root = None;
        for (index, call) in calls.iter().enumerate() {
            match call.parent {
                None => {
                    if let Some(previous) = root.replace(index) {
                        return Err(malformed(format!(
                            "calls {} and {} both have no parent",
                            calls[previous].id, call.id
                        )));
                    }
                }
                Some(parent) => {
                    let parent_index = index_of.get(&parent).ok_or_else(|| {
                        malformed(format!("call {} names unknown parent {}", call.id, parent))
                    })?;
                    children[*parent_index].push(index);
                }
            }
        }
        let root = root.ok_or_else(|| malformed(format!("{} has no root call", id)))?;

        // Parents come before their children in pre-order, so building in
        // reverse always finds the children finished.
        let mut order = Vec::with_capacity(count);
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(children[index].iter().rev());
        }
        if order.len() != count {
            return Err(malformed(format!(
                "{} calls are not reachable from the root call",
                count - order.len()
            )));
        }

        let mut built: Vec<Option<CallRecord>> = calls
            .into_iter()
            .map(|call| {
                let mut record = CallRecord::new(call.id.0, call.method);
                record.arguments = call.arguments;
                record.return_value = call.return_value;
                record.thrown = call.thrown;
                Some(record)
            })
            .collect();

        for &index in order.iter().rev() {
            let linked: Vec<CallRecord> = children[index]
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            if let Some(record) = built[index].as_mut() {
                record.children = linked;
            }
        }

        let root = built[root]
            .take()
            .ok_or_else(|| malformed(format!("{} lost its root call", id)))?;
        Ok(Recording { id, root })
    }
}

fn malformed(reason: String) -> recview_types::Error {
    recview_types::Error::MalformedRecord(reason)
}

#[derive(Deserialize)]
struct BundleFile {
    recording: BundledRecording,
    #[serde(default)]
    metadata: ProcessMetadata,
    #[serde(default)]
    sources: Vec<BundledSource>,
}

/// One recording plus everything needed to browse it offline.
#[derive(Debug, Clone)]
pub struct RecordingBundle {
    pub recording: Recording,
    pub metadata: ProcessMetadata,
    pub sources: Vec<BundledSource>,
}

impl RecordingBundle {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle {}", path.display()))?;
        let bundle = Self::from_json(&content)
            .with_context(|| format!("Failed to parse bundle {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            recording = %bundle.recording.id,
            calls = bundle.recording.call_count(),
            sources = bundle.sources.len(),
            "loaded bundle"
        );
        Ok(bundle)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: BundleFile = serde_json::from_str(content)?;
        Ok(Self {
            recording: file.recording.into_recording()?,
            metadata: file.metadata,
            sources: file.sources,
        })
    }

    /// Locator over the bundled sources, restricted to the recorded class path.
    pub fn locator(&self) -> BundledSourceLocator {
        BundledSourceLocator::new(&self.metadata, &self.sources)
    }
}

/// Resolves declaring types against bundled sources. A source only counts if
/// its origin is one of the process's class path entries; the first such
/// source for a type wins.
pub struct BundledSourceLocator {
    sources: HashMap<String, SourceCode>,
}

impl BundledSourceLocator {
    pub fn new(metadata: &ProcessMetadata, sources: &[BundledSource]) -> Self {
        let class_path: &BTreeSet<PathBuf> = &metadata.class_path_entries;
        let mut resolved = HashMap::new();
        for bundled in sources {
            if !class_path.contains(&bundled.origin) {
                tracing::debug!(
                    type_name = %bundled.source.type_name,
                    origin = %bundled.origin.display(),
                    "skipping source outside the class path"
                );
                continue;
            }
            resolved
                .entry(bundled.source.type_name.clone())
                .or_insert_with(|| bundled.source.clone());
        }
        Self { sources: resolved }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceLocator for BundledSourceLocator {
    fn locate(&self, type_name: &str) -> LocateFuture {
        // Nested types live in their outer type's file.
        let outer = type_name.split('$').next().unwrap_or(type_name);
        let found = self
            .sources
            .get(type_name)
            .or_else(|| self.sources.get(outer))
            .cloned();
        async move { Ok(found) }.boxed()
    }
}
