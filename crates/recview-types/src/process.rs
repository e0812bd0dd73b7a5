use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Facts about the recorded process. Opaque to the presentation core; only the
/// source locator looks at the class path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetadata {
    #[serde(default)]
    pub main_class: Option<String>,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub class_path_entries: BTreeSet<PathBuf>,
}

impl ProcessMetadata {
    pub fn with_class_path<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            class_path_entries: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
