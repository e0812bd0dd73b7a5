use super::fragment::{RenderedFragment, StyleClass};
use super::value::render;
use crate::settings::RenderSettings;
use crate::tree::ArenaRecord;
use crate::Result;

/// Render the label of one call: `Type.method(arg, ...) -> result`.
///
/// Constructors read `new Type(...)`, calls that threw show `!! throwable`
/// instead of a return value, and void calls end at the closing paren.
pub fn render_call(call: &ArenaRecord, settings: &RenderSettings) -> Result<RenderedFragment> {
    let method = &call.method;
    let type_name = settings.type_name(&method.declaring_type);
    let mut builder = RenderedFragment::builder();

    if method.is_constructor {
        builder
            .push_atom("new ", StyleClass::MethodName)
            .push_atom(type_name, StyleClass::TypeName);
    } else {
        let name_style = if method.is_static {
            StyleClass::StaticMethodName
        } else {
            StyleClass::MethodName
        };
        builder
            .push_atom(type_name, StyleClass::TypeName)
            .push_atom(".", StyleClass::Separator)
            .push_atom(method.name.clone(), name_style);
    }

    builder.push_atom("(", StyleClass::Separator);
    for (i, argument) in call.arguments.iter().enumerate() {
        if i > 0 {
            builder.push_atom(", ", StyleClass::Separator);
        }
        builder.push_fragment(render(argument, settings)?);
    }
    builder.push_atom(")", StyleClass::Separator);

    match &call.return_value {
        Some(thrown) if call.thrown => {
            builder
                .push_atom(" !! ", StyleClass::Thrown)
                .push_fragment(render(thrown, settings)?);
        }
        Some(value) if !method.is_constructor => {
            builder
                .push_atom(" -> ", StyleClass::Separator)
                .push_fragment(render(value, settings)?);
        }
        _ => {}
    }

    Ok(builder.build())
}
