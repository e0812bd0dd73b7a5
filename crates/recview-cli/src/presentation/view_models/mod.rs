mod result;
mod source;
mod styles;
mod tree;

pub use result::CommandResultViewModel;
pub use source::SourceViewModel;
pub use styles::StylesViewModel;
pub use tree::{CallRowViewModel, TreeViewModel};
