use super::collection::{render_collection, render_map};
use super::fragment::{RenderedFragment, StyleClass};
use crate::settings::RenderSettings;
use crate::Result;
use recview_types::{RecordedField, RecordedValue};

/// Render one recorded value into a display fragment.
///
/// Pure: identical inputs always produce identical fragments. Structurally
/// invalid values fail with [`crate::Error::MalformedRecord`] instead of being
/// coerced into something displayable.
pub fn render(value: &RecordedValue, settings: &RenderSettings) -> Result<RenderedFragment> {
    let fragment = match value {
        RecordedValue::Null => RenderedFragment::atom("null", StyleClass::Null),
        RecordedValue::Bool { value } => RenderedFragment::atom(value.to_string(), StyleClass::Boolean),
        RecordedValue::Number { text, .. } => RenderedFragment::atom(text.clone(), StyleClass::Number),
        RecordedValue::Char { value } => {
            RenderedFragment::atom(format!("'{}'", value.escape_default()), StyleClass::Char)
        }
        RecordedValue::String { value } => RenderedFragment::atom(
            quote_truncated(value, settings.max_string_length),
            StyleClass::String,
        ),
        RecordedValue::Printed { text, .. } => RenderedFragment::atom(text.clone(), StyleClass::Printed),
        RecordedValue::Class { name } => RenderedFragment::atom(
            format!("{}.class", settings.type_name(name)),
            StyleClass::TypeName,
        ),
        RecordedValue::Array(array) | RecordedValue::Collection(array) => {
            render_collection(array, settings)?
        }
        RecordedValue::Map(map) => render_map(map, settings)?,
        RecordedValue::Object {
            type_name,
            identity_hash,
            fields,
        } => render_object(type_name, *identity_hash, fields, settings)?,
        RecordedValue::Throwable { type_name, message } => {
            let mut builder = RenderedFragment::builder();
            builder.push_atom(settings.type_name(type_name), StyleClass::TypeName);
            if let Some(message) = message {
                builder
                    .push_atom(": ", StyleClass::Separator)
                    .push_fragment(render(message, settings)?);
            }
            builder.build()
        }
        RecordedValue::Optional { value } => {
            let mut builder = RenderedFragment::builder();
            match value {
                Some(inner) => {
                    builder
                        .push_atom("Optional", StyleClass::TypeName)
                        .push_atom("[", StyleClass::CollectionBracket)
                        .push_fragment(render(inner, settings)?)
                        .push_atom("]", StyleClass::CollectionBracket);
                }
                None => {
                    builder.push_atom("Optional.empty", StyleClass::TypeName);
                }
            }
            builder.build()
        }
    };
    Ok(fragment)
}

/// Identity marker (`Type@hash`) followed by the field fragments, if any.
fn render_object(
    type_name: &str,
    identity_hash: u32,
    fields: &[RecordedField],
    settings: &RenderSettings,
) -> Result<RenderedFragment> {
    let mut builder = RenderedFragment::builder();
    builder
        .push_atom(settings.type_name(type_name), StyleClass::TypeName)
        .push_atom(format!("@{:x}", identity_hash), StyleClass::IdentityHashCode);

    if !fields.is_empty() {
        let mut body = RenderedFragment::builder();
        body.push_atom("{", StyleClass::CollectionBracket);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                body.push_atom(", ", StyleClass::Separator);
            }
            body.push_atom(field.name.clone(), StyleClass::FieldName)
                .push_atom("=", StyleClass::Separator)
                .push_fragment(render(&field.value, settings)?);
        }
        body.push_atom("}", StyleClass::CollectionBracket);
        builder.push_fragment(body.build());
    }

    Ok(builder.build())
}

fn quote_truncated(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("\"{}...\"", &value[..cut]),
        None => format!("\"{}\"", value),
    }
}
