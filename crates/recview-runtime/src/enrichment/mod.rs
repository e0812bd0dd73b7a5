mod coordinator;
mod epoch;
mod locator;

pub use coordinator::{CompletionOutcome, LookupCompletion, SelectionEnrichment};
pub use epoch::{Epoch, SelectionEpoch};
pub use locator::{EnrichmentPane, LocateError, LocateFuture, LocateResult, SourceLocator};
