mod arena;
mod model;

pub use arena::{ArenaRecord, CallArena, RecordIndex};
pub use model::{CallTree, NodeId, RefreshSummary, VisibleRow};
