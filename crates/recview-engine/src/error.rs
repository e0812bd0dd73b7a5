use crate::tree::NodeId;
use recview_types::RecordingId;
use std::fmt;

/// Result type for recview-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the presentation core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A recorded value or call record violates its structural invariant
    MalformedRecord(String),

    /// The current selection was requested while nothing is selected
    NoSelection,

    /// A node handle that does not belong to (or no longer exists in) this tree
    UnknownNode(NodeId),

    /// A refresh was attempted with a snapshot of a different recording
    RecordingMismatch {
        expected: RecordingId,
        actual: RecordingId,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRecord(reason) => write!(f, "Malformed record: {}", reason),
            Error::NoSelection => write!(f, "No call is selected"),
            Error::UnknownNode(node) => write!(f, "Unknown tree node: {}", node),
            Error::RecordingMismatch { expected, actual } => write!(
                f,
                "Recording mismatch: view shows {} but got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<recview_types::Error> for Error {
    fn from(err: recview_types::Error) -> Self {
        match err {
            recview_types::Error::MalformedRecord(reason) => Error::MalformedRecord(reason),
        }
    }
}
