// Runtime layer - hosts a recording view: async source enrichment, style
// regeneration and viewer configuration on top of the engine's call tree

pub mod config;
pub mod enrichment;
pub mod error;
pub mod font;
pub mod styles;
pub mod view;

pub use config::{resolve_config_path, EnrichmentConfig, ViewerConfig};
pub use enrichment::{
    CompletionOutcome, EnrichmentPane, Epoch, LocateError, LocateFuture, LocateResult,
    LookupCompletion, SelectionEnrichment, SelectionEpoch, SourceLocator,
};
pub use error::{Error, Result};
pub use font::{FontCommand, FontSettings, FONT_SIZE_STEP, MIN_FONT_SIZE};
pub use styles::{render_style_sheet, LookAndFeel, StyleRef, StyleRegenerator, STYLE_TAG_PREFIX};
pub use view::RecordingView;
