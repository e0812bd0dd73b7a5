use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct StylesViewModel {
    pub font_size: f64,
    pub font_name: String,
    pub style_sheet: String,
}

impl fmt::Display for StylesViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style_sheet)
    }
}
