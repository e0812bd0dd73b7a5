use futures::future::BoxFuture;
use recview_types::SourceCode;
use std::fmt;

/// Why a source lookup produced nothing usable. Never fatal: the coordinator
/// logs it and shows "no source".
#[derive(Debug)]
pub enum LocateError {
    Io(std::io::Error),
    Failed(String),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Io(err) => write!(f, "source lookup IO error: {}", err),
            LocateError::Failed(msg) => write!(f, "source lookup failed: {}", msg),
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocateError::Io(err) => Some(err),
            LocateError::Failed(_) => None,
        }
    }
}

impl From<std::io::Error> for LocateError {
    fn from(err: std::io::Error) -> Self {
        LocateError::Io(err)
    }
}

/// `Ok(None)` means the lookup ran but found no source for the type.
pub type LocateResult = std::result::Result<Option<SourceCode>, LocateError>;
pub type LocateFuture = BoxFuture<'static, LocateResult>;

/// Resolves source code for a declaring type name.
///
/// `locate` is called on the view's thread and must return quickly; the
/// actual work belongs inside the returned future, which runs on a worker.
pub trait SourceLocator: Send + Sync {
    fn locate(&self, type_name: &str) -> LocateFuture;
}

/// Display surface for enrichment results. Only touched on the view's thread.
pub trait EnrichmentPane {
    fn set_text(&mut self, source: Option<&SourceCode>, method_name: &str);

    fn clear(&mut self);
}
