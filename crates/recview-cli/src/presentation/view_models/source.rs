use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct SourceViewModel {
    pub call_id: u64,
    pub type_name: String,
    pub method_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Zero-based line of the method, if it could be found in the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl fmt::Display for SourceViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(text) = &self.text else {
            return writeln!(
                f,
                "No source available for {} (method {})",
                self.type_name, self.method_name
            );
        };

        let title = self.file_name.as_deref().unwrap_or(&self.type_name);
        writeln!(f, "{} :: {}", title, self.method_name)?;
        let width = text.lines().count().max(1).to_string().len();
        for (index, line) in text.lines().enumerate() {
            let marker = if self.method_line == Some(index) { ">" } else { " " };
            writeln!(f, "{} {:>width$} | {}", marker, index + 1, line, width = width)?;
        }
        Ok(())
    }
}
