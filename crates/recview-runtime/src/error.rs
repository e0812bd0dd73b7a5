use std::fmt;

/// Result type for recview-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Presentation core error (malformed record, no selection, ...)
    Engine(recview_engine::Error),

    /// Writing a regenerated style sheet failed; the active styles are untouched
    StyleWrite(std::io::Error),

    /// Font parameters that cannot produce a style sheet
    InvalidFont(String),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// The view has not been initialized (or was disposed)
    NotInitialized(String),
}

impl Error {
    pub fn is_no_selection(&self) -> bool {
        matches!(self, Error::Engine(recview_engine::Error::NoSelection))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(err) => write!(f, "{}", err),
            Error::StyleWrite(err) => write!(f, "Could not write style sheet: {}", err),
            Error::InvalidFont(msg) => write!(f, "Invalid font: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::NotInitialized(msg) => write!(f, "View not initialized: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(err) => Some(err),
            Error::StyleWrite(err) | Error::Io(err) => Some(err),
            Error::InvalidFont(_) | Error::Config(_) | Error::NotInitialized(_) => None,
        }
    }
}

impl From<recview_engine::Error> for Error {
    fn from(err: recview_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
