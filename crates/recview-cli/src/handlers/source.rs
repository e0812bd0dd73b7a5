use crate::bundle::RecordingBundle;
use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::CommandResultViewModel;
use anyhow::{anyhow, Result};
use recview_engine::{ArenaRecord, NodeId, RenderSettings};
use recview_runtime::{EnrichmentPane, RecordingView, SelectionEnrichment};
use recview_types::{CallRecordId, SourceCode};
use std::path::Path;
use std::sync::Arc;

/// Keeps whatever the enrichment last applied.
#[derive(Default)]
struct CapturePane {
    source: Option<SourceCode>,
}

impl EnrichmentPane for CapturePane {
    fn set_text(&mut self, source: Option<&SourceCode>, _method_name: &str) {
        self.source = source.cloned();
    }

    fn clear(&mut self) {
        self.source = None;
    }
}

/// Select one call the way the viewer would and print what the source
/// lookup found for it.
pub fn handle(
    ctx: &HandlerContext,
    settings: &RenderSettings,
    bundle_path: &Path,
    call: u64,
) -> Result<()> {
    let bundle = RecordingBundle::load(bundle_path)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (record, source) = runtime.block_on(lookup(bundle, settings.clone(), CallRecordId(call)))?;

    let view_model = presenters::build_source_view_model(&record, source.as_ref());
    ctx.render(CommandResultViewModel::new(view_model))
}

async fn lookup(
    bundle: RecordingBundle,
    settings: RenderSettings,
    call_id: CallRecordId,
) -> Result<(ArenaRecord, Option<SourceCode>)> {
    let locator = Arc::new(bundle.locator());
    let enrichment = SelectionEnrichment::new(locator, tokio::runtime::Handle::current());
    let mut view = RecordingView::new(bundle.recording, bundle.metadata, enrichment, settings);
    view.init()?;

    let node = reveal(&mut view, call_id)?;
    let mut pane = CapturePane::default();
    view.select(Some(node), &mut pane)?;
    let outcome = view.wait_enrichment(&mut pane).await;
    tracing::debug!(?outcome, call = call_id.0, "source lookup finished");

    let record = view.tree()?.record(node)?.clone();
    view.dispose();
    Ok((record, pane.source))
}

/// Expand every ancestor of `call_id` so it gets a node, and return that node.
fn reveal(view: &mut RecordingView, call_id: CallRecordId) -> Result<NodeId> {
    let path = {
        let tree = view.tree()?;
        let arena = tree.arena();
        let index = arena
            .find(call_id)
            .ok_or_else(|| anyhow!("No call {} in {}", call_id.0, tree.recording_id()))?;

        let mut path = vec![arena[index].id];
        let mut parent = arena[index].parent();
        while let Some(current) = parent {
            path.push(arena[current].id);
            parent = arena[current].parent();
        }
        path.reverse();
        path
    };

    let (target, ancestors) = path
        .split_last()
        .ok_or_else(|| anyhow!("Empty call path for {}", call_id.0))?;
    for ancestor in ancestors {
        let node = node_for(view, *ancestor)?;
        view.expand(node)?;
    }
    node_for(view, *target)
}

fn node_for(view: &RecordingView, call_id: CallRecordId) -> Result<NodeId> {
    view.tree()?
        .node_for(call_id)
        .ok_or_else(|| anyhow!("Call {} is not reachable in the tree", call_id.0))
}
