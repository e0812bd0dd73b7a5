use super::epoch::{Epoch, SelectionEpoch};
use super::locator::{EnrichmentPane, LocateError, LocateResult, SourceLocator};
use futures::FutureExt;
use recview_engine::ArenaRecord;
use recview_types::CallRecordId;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Result of one source lookup, handed back to the view's thread.
#[derive(Debug)]
pub struct LookupCompletion {
    pub epoch: Epoch,
    pub call_id: CallRecordId,
    pub type_name: String,
    pub method_name: String,
    pub result: LocateResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied,
    Discarded,
}

/// Issues a source lookup per selection change and lets through only the
/// completion that still matches the current selection.
///
/// Lookups run on the given tokio runtime and never touch the pane. The
/// owner drains completions with [`poll`](Self::poll) or
/// [`next_completion`](Self::next_completion) on its own thread and passes
/// them to [`apply`](Self::apply) together with the id of the call that is
/// selected right now.
///
/// In-flight lookups are not aborted; a superseded result is dropped when it
/// arrives. A locator that panics yields a failed lookup, so the pane still
/// settles on "no source".
pub struct SelectionEnrichment {
    locator: Arc<dyn SourceLocator>,
    runtime: Handle,
    epoch: SelectionEpoch,
    tx: mpsc::UnboundedSender<LookupCompletion>,
    rx: mpsc::UnboundedReceiver<LookupCompletion>,
}

impl SelectionEnrichment {
    pub fn new(locator: Arc<dyn SourceLocator>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            locator,
            runtime,
            epoch: SelectionEpoch::new(),
            tx,
            rx,
        }
    }

    pub fn current_epoch(&self) -> Epoch {
        self.epoch.current()
    }

    /// Use `locator` for lookups issued from now on. Lookups already in
    /// flight finish against the old one.
    pub fn set_locator(&mut self, locator: Arc<dyn SourceLocator>) {
        self.locator = locator;
    }

    pub fn on_selection_changed(
        &mut self,
        selection: Option<&ArenaRecord>,
        pane: &mut dyn EnrichmentPane,
    ) -> Epoch {
        let epoch = self.epoch.advance();

        let Some(record) = selection else {
            tracing::debug!(%epoch, "selection cleared");
            pane.clear();
            return epoch;
        };

        let type_name = record.method.declaring_type.clone();
        let method_name = record.method.name.clone();
        let call_id = record.id;
        tracing::debug!(%epoch, %call_id, type_name = %type_name, "issuing source lookup");

        let locator = Arc::clone(&self.locator);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let lookup = AssertUnwindSafe(async { locator.locate(&type_name).await });
            let result = lookup.catch_unwind().await.unwrap_or_else(|_| {
                Err(LocateError::Failed(format!(
                    "locator panicked while looking up {}",
                    type_name
                )))
            });
            // Receiver gone means the view was disposed; nothing to deliver to.
            let _ = tx.send(LookupCompletion {
                epoch,
                call_id,
                type_name,
                method_name,
                result,
            });
        });

        epoch
    }

    /// Apply a completion if it is still current, otherwise drop it.
    ///
    /// `current` is the id of the call selected at the time of the call, not
    /// the one that was selected when the lookup was issued.
    pub fn apply(
        &self,
        completion: LookupCompletion,
        current: Option<CallRecordId>,
        pane: &mut dyn EnrichmentPane,
    ) -> CompletionOutcome {
        let LookupCompletion {
            epoch,
            call_id,
            type_name,
            method_name,
            result,
        } = completion;

        if !self.epoch.is_current(epoch) || current != Some(call_id) {
            tracing::debug!(
                %epoch,
                %call_id,
                current_epoch = %self.epoch.current(),
                "discarding stale source lookup"
            );
            return CompletionOutcome::Discarded;
        }

        match result {
            Ok(Some(source)) => pane.set_text(Some(&source), &method_name),
            Ok(None) => {
                tracing::debug!(type_name = %type_name, "no source found");
                pane.set_text(None, &method_name);
            }
            Err(err) => {
                tracing::warn!(type_name = %type_name, error = %err, "source lookup failed");
                pane.set_text(None, &method_name);
            }
        }
        CompletionOutcome::Applied
    }

    /// Apply every completion that has already arrived. Returns how many
    /// reached the pane.
    pub fn poll(&mut self, current: Option<CallRecordId>, pane: &mut dyn EnrichmentPane) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion, current, pane) == CompletionOutcome::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion, stale or not.
    pub async fn next_completion(&mut self) -> Option<LookupCompletion> {
        self.rx.recv().await
    }

    /// Forget every pending lookup and start over at epoch zero.
    ///
    /// The channel is replaced, so lookups issued before the reset can never
    /// be mistaken for ones issued after it.
    pub fn reset(&mut self) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.tx = tx;
        self.rx = rx;
        self.epoch.reset();
    }
}
