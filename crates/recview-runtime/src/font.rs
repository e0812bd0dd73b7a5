use serde::{Deserialize, Serialize};

/// Step applied by one increase/decrease command, in em units.
pub const FONT_SIZE_STEP: f64 = 1.0;
pub const MIN_FONT_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCommand {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub size: f64,
    pub name: String,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            size: 1.0,
            name: "monospace".to_string(),
        }
    }
}

impl FontSettings {
    pub fn new(size: f64, name: impl Into<String>) -> Self {
        Self {
            size,
            name: name.into(),
        }
    }

    /// Settings after one font command. Decreasing never goes below
    /// [`MIN_FONT_SIZE`].
    pub fn apply(&self, command: FontCommand) -> Self {
        let size = match command {
            FontCommand::Increase => self.size + FONT_SIZE_STEP,
            FontCommand::Decrease => (self.size - FONT_SIZE_STEP).max(MIN_FONT_SIZE),
        };
        Self {
            size,
            name: self.name.clone(),
        }
    }
}
