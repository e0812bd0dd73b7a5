use recview_types::simple_name;
use serde::{Deserialize, Serialize};

/// Display-time knobs for rendering recorded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub show_full_type_names: bool,
    /// Strings longer than this many characters are cut and suffixed with `...`.
    pub max_string_length: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            show_full_type_names: false,
            max_string_length: 200,
        }
    }
}

impl RenderSettings {
    pub fn type_name<'a>(&self, qualified: &'a str) -> &'a str {
        if self.show_full_type_names {
            qualified
        } else {
            simple_name(qualified)
        }
    }
}
