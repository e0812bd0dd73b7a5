use crate::bundle::RecordingBundle;
use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::CommandResultViewModel;
use anyhow::{Context, Result};
use recview_engine::{CallTree, RenderSettings};
use std::path::Path;

pub fn handle(
    ctx: &HandlerContext,
    settings: &RenderSettings,
    bundle_path: &Path,
    depth: Option<usize>,
    full_type_names: bool,
) -> Result<()> {
    let bundle = RecordingBundle::load(bundle_path)?;
    let mut tree = CallTree::new(bundle.recording)
        .with_context(|| format!("Failed to open recording in {}", bundle_path.display()))?;
    let expanded = tree.expand_to_depth(depth)?;
    tracing::debug!(expanded, ?depth, "expanded call tree");

    let mut settings = settings.clone();
    if full_type_names {
        settings.show_full_type_names = true;
    }

    let view_model = presenters::build_tree_view_model(&tree, &settings);
    let total = view_model.call_count;
    let hidden = total - view_model.row_count();

    let mut result = CommandResultViewModel::new(view_model);
    if hidden > 0 {
        result = result.with_note(format!(
            "{} of {} calls hidden; raise --depth to show them",
            hidden, total
        ));
    }
    ctx.render_tree(result)
}
