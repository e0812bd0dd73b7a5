use crate::enrichment::{
    CompletionOutcome, EnrichmentPane, Epoch, SelectionEnrichment, SourceLocator,
};
use crate::{Error, Result};
use recview_engine::{CallTree, NodeId, RefreshSummary, RenderSettings, RenderedFragment};
use recview_types::{CallRecordId, ProcessMetadata, Recording, RecordingId};
use std::sync::Arc;

/// One open recording: its lazily expanded call tree, the selection and the
/// source enrichment that follows it.
///
/// Every mutating operation takes `&mut self`, so init, update and refresh
/// on one view can never interleave. Hosts that share a view across threads
/// wrap it in a mutex.
pub struct RecordingView {
    recording_id: RecordingId,
    metadata: ProcessMetadata,
    /// Newest snapshot not yet applied to the tree.
    pending: Option<Recording>,
    tree: Option<CallTree>,
    enrichment: SelectionEnrichment,
    settings: RenderSettings,
}

impl RecordingView {
    pub fn new(
        recording: Recording,
        metadata: ProcessMetadata,
        enrichment: SelectionEnrichment,
        settings: RenderSettings,
    ) -> Self {
        Self {
            recording_id: recording.id,
            metadata,
            pending: Some(recording),
            tree: None,
            enrichment,
            settings,
        }
    }

    pub fn recording_id(&self) -> RecordingId {
        self.recording_id
    }

    pub fn metadata(&self) -> &ProcessMetadata {
        &self.metadata
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.tree.is_some()
    }

    /// Build the call tree from the latest snapshot. Runs once; later calls
    /// return `Ok(false)` and change nothing.
    ///
    /// The snapshot moves into the tree. After [`dispose`](Self::dispose) a
    /// fresh [`update`](Self::update) is needed before the view can be built
    /// again.
    pub fn init(&mut self) -> Result<bool> {
        if self.tree.is_some() {
            return Ok(false);
        }
        let recording = self.pending.take().ok_or_else(|| {
            Error::NotInitialized(format!("{} has no snapshot to build from", self.recording_id))
        })?;
        let tree = CallTree::new(recording)?;
        tracing::info!(
            recording = %self.recording_id,
            calls = tree.arena().len(),
            "initialized recording view"
        );
        self.tree = Some(tree);
        Ok(true)
    }

    /// Store a newer snapshot of the same recording. The tree picks it up on
    /// the next [`refresh`](Self::refresh), or on [`init`](Self::init) if it
    /// has not been built yet.
    pub fn update(&mut self, recording: Recording) -> Result<()> {
        if recording.id != self.recording_id {
            return Err(Error::Engine(recview_engine::Error::RecordingMismatch {
                expected: self.recording_id,
                actual: recording.id,
            }));
        }
        tracing::debug!(recording = %self.recording_id, calls = recording.call_count(), "received update");
        self.pending = Some(recording);
        Ok(())
    }

    /// Apply the latest snapshot, keeping expansion state for calls that
    /// are still present. Clears the enrichment pane if the selected call
    /// disappeared. Without a pending snapshot nothing changes.
    pub fn refresh(&mut self, pane: &mut dyn EnrichmentPane) -> Result<RefreshSummary> {
        if self.init()? {
            return Ok(RefreshSummary {
                retained: 0,
                added: 1,
                dropped: 0,
                selection_cleared: false,
            });
        }
        let Some(recording) = self.pending.take() else {
            let retained = self.tree()?.arena().len();
            return Ok(RefreshSummary {
                retained,
                ..RefreshSummary::default()
            });
        };
        let summary = self.tree_mut()?.refresh(recording)?;
        if summary.selection_cleared {
            self.enrichment.on_selection_changed(None, pane);
        }
        Ok(summary)
    }

    /// Swap in the process metadata and source locator of a re-read capture.
    /// The next selection looks its source up through `locator`.
    pub fn set_sources(&mut self, metadata: ProcessMetadata, locator: Arc<dyn SourceLocator>) {
        self.metadata = metadata;
        self.enrichment.set_locator(locator);
    }

    pub fn tree(&self) -> Result<&CallTree> {
        self.tree
            .as_ref()
            .ok_or_else(|| Error::NotInitialized(self.recording_id.to_string()))
    }

    fn tree_mut(&mut self) -> Result<&mut CallTree> {
        let recording_id = self.recording_id;
        self.tree
            .as_mut()
            .ok_or_else(|| Error::NotInitialized(recording_id.to_string()))
    }

    pub fn expand(&mut self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.tree_mut()?.expand(node)?.to_vec())
    }

    /// Change the selection and start the source lookup for it.
    pub fn select(&mut self, node: Option<NodeId>, pane: &mut dyn EnrichmentPane) -> Result<Epoch> {
        let recording_id = self.recording_id;
        let tree = self
            .tree
            .as_mut()
            .ok_or_else(|| Error::NotInitialized(recording_id.to_string()))?;
        tree.select(node)?;
        let record = match node {
            Some(_) => Some(tree.selected_record()?),
            None => None,
        };
        Ok(self.enrichment.on_selection_changed(record, pane))
    }

    /// The selected node; fails with a no-selection error when nothing is
    /// selected.
    pub fn selected(&self) -> Result<NodeId> {
        Ok(self.tree()?.selected()?)
    }

    pub fn selected_call_id(&self) -> Option<CallRecordId> {
        let tree = self.tree.as_ref()?;
        tree.selected_record().ok().map(|record| record.id)
    }

    pub fn label(&self, node: NodeId) -> Result<RenderedFragment> {
        Ok(self.tree()?.render_label(node, &self.settings)?)
    }

    /// Apply lookups that have already finished, dropping stale ones.
    pub fn poll_enrichment(&mut self, pane: &mut dyn EnrichmentPane) -> usize {
        let current = self.selected_call_id();
        self.enrichment.poll(current, pane)
    }

    /// Wait for the next lookup to finish and apply it if it is still
    /// current. Pends until some lookup completes.
    pub async fn wait_enrichment(
        &mut self,
        pane: &mut dyn EnrichmentPane,
    ) -> Option<CompletionOutcome> {
        let completion = self.enrichment.next_completion().await?;
        let current = self.selected_call_id();
        Some(self.enrichment.apply(completion, current, pane))
    }

    /// Drop the tree and selection state. Pending lookups are forgotten and
    /// the selection epoch starts over at zero.
    pub fn dispose(&mut self) {
        if self.tree.take().is_some() {
            tracing::info!(recording = %self.recording_id, "disposed recording view");
        }
        self.enrichment.reset();
    }

    pub fn current_epoch(&self) -> Epoch {
        self.enrichment.current_epoch()
    }
}
