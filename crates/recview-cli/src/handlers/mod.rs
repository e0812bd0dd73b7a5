mod context;

pub mod source;
pub mod styles;
pub mod tree;
pub mod view;

pub use context::HandlerContext;
