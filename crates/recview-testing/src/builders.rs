//! Fluent builders for call trees and recorded values.

use recview_types::{CallRecord, Method, RecordedValue, Recording};

/// Start building a call of `declaring_type.method`.
pub fn call(id: u64, declaring_type: &str, method: &str) -> CallBuilder {
    CallBuilder {
        record: CallRecord::new(id, Method::new(declaring_type, method)),
    }
}

pub struct CallBuilder {
    record: CallRecord,
}

impl CallBuilder {
    pub fn arg(mut self, value: RecordedValue) -> Self {
        self.record.arguments.push(value);
        self
    }

    pub fn returns(mut self, value: RecordedValue) -> Self {
        self.record.return_value = Some(value);
        self.record.thrown = false;
        self
    }

    pub fn throws(mut self, throwable: RecordedValue) -> Self {
        self.record.return_value = Some(throwable);
        self.record.thrown = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.record.method.is_static = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.record.method.is_constructor = true;
        self
    }

    pub fn child(mut self, child: CallBuilder) -> Self {
        self.record.children.push(child.build());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = CallBuilder>) -> Self {
        self.record
            .children
            .extend(children.into_iter().map(CallBuilder::build));
        self
    }

    pub fn build(self) -> CallRecord {
        self.record
    }

    pub fn recording(self, id: u64) -> Recording {
        Recording::new(id, self.build())
    }
}

/// Shorthand constructors for recorded values.
pub mod values {
    use recview_types::{ArrayLike, MapEntry, MapLike, RecordedField, RecordedValue};

    pub fn null() -> RecordedValue {
        RecordedValue::Null
    }

    pub fn boolean(value: bool) -> RecordedValue {
        RecordedValue::Bool { value }
    }

    pub fn int(value: i64) -> RecordedValue {
        RecordedValue::Number {
            type_name: "java.lang.Integer".to_string(),
            text: value.to_string(),
        }
    }

    pub fn string(value: &str) -> RecordedValue {
        RecordedValue::String {
            value: value.to_string(),
        }
    }

    pub fn array(declared_length: i64, elements: Vec<RecordedValue>) -> RecordedValue {
        RecordedValue::Array(ArrayLike::new(declared_length, elements))
    }

    /// Integer array of `declared_length` whose first `captured` elements were
    /// recorded as `0, 1, 2, ...`.
    pub fn int_array(declared_length: i64, captured: usize) -> RecordedValue {
        array(declared_length, (0..captured as i64).map(int).collect())
    }

    pub fn list(declared_length: i64, elements: Vec<RecordedValue>) -> RecordedValue {
        RecordedValue::Collection(
            ArrayLike::new(declared_length, elements).with_type_name("java.util.ArrayList"),
        )
    }

    pub fn map(declared_size: i64, entries: Vec<(RecordedValue, RecordedValue)>) -> RecordedValue {
        RecordedValue::Map(MapLike::new(
            declared_size,
            entries
                .into_iter()
                .map(|(key, value)| MapEntry { key, value })
                .collect(),
        ))
    }

    pub fn object(type_name: &str, identity_hash: u32, fields: Vec<(&str, RecordedValue)>) -> RecordedValue {
        RecordedValue::Object {
            type_name: type_name.to_string(),
            identity_hash,
            fields: fields
                .into_iter()
                .map(|(name, value)| RecordedField {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        }
    }

    pub fn throwable(type_name: &str, message: &str) -> RecordedValue {
        RecordedValue::Throwable {
            type_name: type_name.to_string(),
            message: Some(Box::new(string(message))),
        }
    }
}
