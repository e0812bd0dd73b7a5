// Engine module - presentation core (rendering and call tree state)
// This layer sits between recorded data (types) and the host views (runtime/cli)

pub mod error;
pub mod render;
pub mod settings;
pub mod tree;

pub use error::{Error, Result};
pub use render::{
    render, render_call, render_collection, render_map, FragmentPart, RenderedFragment,
    StyleClass, StyledAtom,
};
pub use settings::RenderSettings;
pub use tree::{ArenaRecord, CallArena, CallTree, NodeId, RecordIndex, RefreshSummary, VisibleRow};
