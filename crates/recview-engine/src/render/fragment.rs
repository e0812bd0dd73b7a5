use serde::Serialize;
use std::fmt;

/// Style of one text atom. Each class maps to a stable style-sheet class name
/// so hosts can skin atoms from the regenerated style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    CollectionBracket,
    Separator,
    TruncationMarker,
    Null,
    Boolean,
    Number,
    String,
    Char,
    Printed,
    TypeName,
    IdentityHashCode,
    FieldName,
    MethodName,
    StaticMethodName,
    Thrown,
}

impl StyleClass {
    pub fn css_class(self) -> &'static str {
        match self {
            StyleClass::CollectionBracket => "call-tree-collection-bracket",
            StyleClass::Separator => "call-tree-node-separator",
            StyleClass::TruncationMarker => "call-tree-collection-more",
            StyleClass::Null => "call-tree-null",
            StyleClass::Boolean => "call-tree-boolean",
            StyleClass::Number => "call-tree-number",
            StyleClass::String => "call-tree-string",
            StyleClass::Char => "call-tree-char",
            StyleClass::Printed => "call-tree-printed",
            StyleClass::TypeName => "call-tree-type-name",
            StyleClass::IdentityHashCode => "call-tree-identity-hash-code",
            StyleClass::FieldName => "call-tree-field-name",
            StyleClass::MethodName => "call-tree-method-name",
            StyleClass::StaticMethodName => "call-tree-static-method-name",
            StyleClass::Thrown => "call-tree-thrown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledAtom {
    pub text: String,
    pub style: StyleClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragmentPart {
    Atom(StyledAtom),
    Nested(RenderedFragment),
}

/// Immutable, composable visual fragment built from one recorded value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    parts: Vec<FragmentPart>,
}

impl RenderedFragment {
    pub fn atom(text: impl Into<String>, style: StyleClass) -> Self {
        let mut builder = Self::builder();
        builder.push_atom(text, style);
        builder.build()
    }

    pub fn builder() -> FragmentBuilder {
        FragmentBuilder { parts: Vec::new() }
    }

    pub fn parts(&self) -> &[FragmentPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// All atoms in reading order, descending into nested fragments.
    pub fn atoms(&self) -> Atoms<'_> {
        Atoms {
            stack: vec![self.parts.iter()],
        }
    }

    pub fn count_style(&self, style: StyleClass) -> usize {
        self.atoms().filter(|atom| atom.style == style).count()
    }

    pub fn plain_text(&self) -> String {
        self.atoms().map(|atom| atom.text.as_str()).collect()
    }
}

impl fmt::Display for RenderedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in self.atoms() {
            f.write_str(&atom.text)?;
        }
        Ok(())
    }
}

pub struct FragmentBuilder {
    parts: Vec<FragmentPart>,
}

impl FragmentBuilder {
    pub fn push_atom(&mut self, text: impl Into<String>, style: StyleClass) -> &mut Self {
        self.parts.push(FragmentPart::Atom(StyledAtom {
            text: text.into(),
            style,
        }));
        self
    }

    pub fn push_fragment(&mut self, fragment: RenderedFragment) -> &mut Self {
        self.parts.push(FragmentPart::Nested(fragment));
        self
    }

    pub fn build(self) -> RenderedFragment {
        RenderedFragment { parts: self.parts }
    }
}

/// Depth-first atom iterator with an explicit stack, so deeply nested
/// fragments do not recurse.
pub struct Atoms<'a> {
    stack: Vec<std::slice::Iter<'a, FragmentPart>>,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = &'a StyledAtom;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(FragmentPart::Atom(atom)) => return Some(atom),
                Some(FragmentPart::Nested(fragment)) => self.stack.push(fragment.parts.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoms_walk_nested_fragments_in_order() {
        let inner = {
            let mut builder = RenderedFragment::builder();
            builder
                .push_atom("b", StyleClass::Number)
                .push_atom("c", StyleClass::Number);
            builder.build()
        };
        let mut builder = RenderedFragment::builder();
        builder
            .push_atom("a", StyleClass::Separator)
            .push_fragment(inner)
            .push_fragment(RenderedFragment::default())
            .push_atom("d", StyleClass::Separator);
        let fragment = builder.build();

        assert_eq!(fragment.plain_text(), "abcd");
        assert_eq!(fragment.count_style(StyleClass::Number), 2);
        assert_eq!(fragment.to_string(), "abcd");
    }

    #[test]
    fn test_css_class_names_are_prefixed() {
        assert_eq!(
            StyleClass::IdentityHashCode.css_class(),
            "call-tree-identity-hash-code"
        );
        assert!(StyleClass::TruncationMarker
            .css_class()
            .starts_with("call-tree-"));
    }
}
