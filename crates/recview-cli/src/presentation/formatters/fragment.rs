use owo_colors::OwoColorize;
use recview_engine::{RenderedFragment, StyleClass};

/// Fragment text with ANSI colors per atom style.
pub fn paint(fragment: &RenderedFragment) -> String {
    let mut out = String::new();
    for atom in fragment.atoms() {
        let text = atom.text.as_str();
        let painted = match atom.style {
            StyleClass::CollectionBracket | StyleClass::Separator => text.dimmed().to_string(),
            StyleClass::TruncationMarker => text.dimmed().italic().to_string(),
            StyleClass::Null | StyleClass::Boolean => text.magenta().to_string(),
            StyleClass::Number => text.blue().to_string(),
            StyleClass::String | StyleClass::Char => text.green().to_string(),
            StyleClass::Printed => text.cyan().to_string(),
            StyleClass::TypeName => text.yellow().to_string(),
            StyleClass::IdentityHashCode => text.bright_black().to_string(),
            StyleClass::FieldName => text.italic().to_string(),
            StyleClass::MethodName => text.bold().to_string(),
            StyleClass::StaticMethodName => text.bold().italic().to_string(),
            StyleClass::Thrown => text.red().bold().to_string(),
        };
        out.push_str(&painted);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text_in_order() {
        let mut builder = RenderedFragment::builder();
        builder
            .push_atom("[", StyleClass::CollectionBracket)
            .push_atom("1", StyleClass::Number)
            .push_atom("]", StyleClass::CollectionBracket);
        let painted = paint(&builder.build());

        assert!(painted.contains('1'));
        assert!(painted.contains("\u{1b}["));
        assert_ne!(painted, "[1]");
    }
}
