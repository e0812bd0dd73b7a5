mod source;
mod styles;
mod tree;

pub use source::build_source_view_model;
pub use styles::build_styles_view_model;
pub use tree::build_tree_view_model;
