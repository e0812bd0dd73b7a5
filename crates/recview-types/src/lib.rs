pub mod call;
pub mod error;
pub mod process;
pub mod source;
pub mod value;

pub use call::{simple_name, CallRecord, CallRecordId, Method, Recording, RecordingId};
pub use error::{Error, Result};
pub use process::ProcessMetadata;
pub use source::SourceCode;
pub use value::{ArrayLike, MapEntry, MapLike, RecordedField, RecordedValue, ValueKind};
