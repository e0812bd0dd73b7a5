use std::fmt;

/// Result type for recview-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A recorded value or call record violates its structural invariant.
    /// Always a capture-side defect, never recovered locally.
    MalformedRecord(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRecord(reason) => write!(f, "Malformed record: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
