//! Enrichment pane that records what was shown.

use recview_runtime::EnrichmentPane;
use recview_types::SourceCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    Shown {
        /// `None` when the lookup found no source.
        source: Option<SourceCode>,
        method_name: String,
    },
    Cleared,
}

#[derive(Debug, Default)]
pub struct RecordingPane {
    pub events: Vec<PaneEvent>,
}

impl RecordingPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type name of every source shown, in order; `None` for "no source".
    pub fn shown_types(&self) -> Vec<Option<String>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PaneEvent::Shown { source, .. } => {
                    Some(source.as_ref().map(|source| source.type_name.clone()))
                }
                PaneEvent::Cleared => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&PaneEvent> {
        self.events.last()
    }
}

impl EnrichmentPane for RecordingPane {
    fn set_text(&mut self, source: Option<&SourceCode>, method_name: &str) {
        self.events.push(PaneEvent::Shown {
            source: source.cloned(),
            method_name: method_name.to_string(),
        });
    }

    fn clear(&mut self) {
        self.events.push(PaneEvent::Cleared);
    }
}
