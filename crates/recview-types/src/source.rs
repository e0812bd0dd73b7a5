use serde::{Deserialize, Serialize};

/// Source text resolved for a declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCode {
    pub type_name: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub text: String,
}

impl SourceCode {
    pub fn new(type_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            file_name: None,
            text: text.into(),
        }
    }

    /// Zero-based index of the first line that looks like a declaration or
    /// call of `method_name`, i.e. the name as a whole word followed by `(`.
    pub fn line_of_method(&self, method_name: &str) -> Option<usize> {
        if method_name.is_empty() {
            return None;
        }
        self.text
            .lines()
            .position(|line| contains_invocation(line, method_name))
    }
}

fn contains_invocation(line: &str, name: &str) -> bool {
    line.match_indices(name).any(|(pos, _)| {
        let preceded_by_ident = line[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let rest = line[pos + name.len()..].trim_start();
        !preceded_by_ident && rest.starts_with('(')
    })
}
