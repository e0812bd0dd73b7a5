use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Coarse classification of a recorded value, used by renderers to pick a
/// strategy without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    ArrayLike,
    ObjectGraph,
}

/// The recorded representation of one runtime value at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedValue {
    Null,
    Bool {
        value: bool,
    },
    Number {
        type_name: String,
        text: String,
    },
    Char {
        value: char,
    },
    String {
        value: String,
    },
    /// A value captured through its printed form (dates, paths, enums...).
    Printed {
        type_name: String,
        text: String,
    },
    Class {
        name: String,
    },
    Array(ArrayLike),
    Collection(ArrayLike),
    Object {
        type_name: String,
        identity_hash: u32,
        #[serde(default)]
        fields: Vec<RecordedField>,
    },
    Map(MapLike),
    Throwable {
        type_name: String,
        #[serde(default)]
        message: Option<Box<RecordedValue>>,
    },
    Optional {
        #[serde(default)]
        value: Option<Box<RecordedValue>>,
    },
}

impl RecordedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RecordedValue::Null
            | RecordedValue::Bool { .. }
            | RecordedValue::Number { .. }
            | RecordedValue::Char { .. }
            | RecordedValue::String { .. }
            | RecordedValue::Printed { .. }
            | RecordedValue::Class { .. } => ValueKind::Scalar,
            RecordedValue::Array(_) | RecordedValue::Collection(_) => ValueKind::ArrayLike,
            RecordedValue::Object { .. }
            | RecordedValue::Map(_)
            | RecordedValue::Throwable { .. }
            | RecordedValue::Optional { .. } => ValueKind::ObjectGraph,
        }
    }

    /// Array-like view of this value, if it is one.
    pub fn as_array_like(&self) -> Option<&ArrayLike> {
        match self {
            RecordedValue::Array(array) | RecordedValue::Collection(array) => Some(array),
            _ => None,
        }
    }

    /// Checks the structural invariant of this value only; nested values are
    /// checked by whoever walks them.
    pub fn validate(&self) -> Result<()> {
        match self {
            RecordedValue::Array(array) | RecordedValue::Collection(array) => {
                array.omitted().map(|_| ())
            }
            RecordedValue::Map(map) => map.omitted().map(|_| ()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedField {
    pub name: String,
    pub value: RecordedValue,
}

/// An indexable collection whose capture may have been truncated at record time.
///
/// `elements.len() <= declared_length` must hold; the length is signed because
/// it arrives from the capture side unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayLike {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub declared_length: i64,
    #[serde(default)]
    pub elements: Vec<RecordedValue>,
}

impl ArrayLike {
    pub fn new(declared_length: i64, elements: Vec<RecordedValue>) -> Self {
        Self {
            type_name: None,
            declared_length,
            elements,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Number of elements that exist in the recorded value but were not captured.
    pub fn omitted(&self) -> Result<usize> {
        omitted_count("array", self.declared_length, self.elements.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: RecordedValue,
    pub value: RecordedValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLike {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub declared_size: i64,
    #[serde(default)]
    pub entries: Vec<MapEntry>,
}

impl MapLike {
    pub fn new(declared_size: i64, entries: Vec<MapEntry>) -> Self {
        Self {
            type_name: None,
            declared_size,
            entries,
        }
    }

    pub fn omitted(&self) -> Result<usize> {
        omitted_count("map", self.declared_size, self.entries.len())
    }
}

fn omitted_count(what: &str, declared: i64, captured: usize) -> Result<usize> {
    let declared = usize::try_from(declared).map_err(|_| {
        Error::MalformedRecord(format!("{} has negative declared length {}", what, declared))
    })?;

    declared.checked_sub(captured).ok_or_else(|| {
        Error::MalformedRecord(format!(
            "{} captured {} items but declares only {}",
            what, captured, declared
        ))
    })
}
