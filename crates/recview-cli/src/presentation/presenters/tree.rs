use crate::presentation::view_models::TreeViewModel;
use recview_engine::{CallTree, RenderSettings};

/// Rows of every visible node, labels rendered with `settings` as they are written.
pub fn build_tree_view_model<'a>(tree: &'a CallTree, settings: &RenderSettings) -> TreeViewModel<'a> {
    TreeViewModel::new(tree, settings)
}
