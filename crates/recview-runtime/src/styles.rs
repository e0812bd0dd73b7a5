use crate::font::{FontCommand, FontSettings};
use crate::{Error, Result};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// File name prefix shared by every regenerated font style sheet. An entry in
/// the active style list whose file name starts with it is the one that gets
/// replaced.
pub const STYLE_TAG_PREFIX: &str = "recview-call-tree-font-style";

/// Reference to a style sheet, as consumed by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRef(String);

impl StyleRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(format!("file://{}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_font_style(&self) -> bool {
        let file_name = self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0);
        file_name.starts_with(STYLE_TAG_PREFIX)
    }

    /// Local path behind a `file://` reference.
    pub fn path(&self) -> Option<PathBuf> {
        self.0.strip_prefix("file://").map(PathBuf::from)
    }
}

impl fmt::Display for StyleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style sheet text for a font. Pure; row height is twice the font size and
/// identity hash codes are drawn at 0.8 of it.
pub fn render_style_sheet(font_size: f64, font_name: &str) -> Result<String> {
    validate_font(font_size, font_name)?;

    Ok(format!(
        ".call-tree {{\n    font-family: \"{name}\";\n    font-size: {size}em;\n}}\n\n\
         .call-tree-row {{\n    height: {row}em;\n}}\n\n\
         .call-tree-identity-hash-code {{\n    font-size: {marker}em;\n}}\n",
        name = font_name,
        size = format_em(font_size),
        row = format_em(font_size * 2.0),
        marker = format_em(font_size * 0.8),
    ))
}

fn validate_font(font_size: f64, font_name: &str) -> Result<()> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(Error::InvalidFont(format!(
            "font size must be a positive number, got {}",
            font_size
        )));
    }
    if font_name.trim().is_empty() {
        return Err(Error::InvalidFont("font name is empty".to_string()));
    }
    if font_name.contains(['"', '{', '}', ';', '\n']) {
        return Err(Error::InvalidFont(format!(
            "font name contains characters not allowed in a style sheet: {}",
            font_name
        )));
    }
    Ok(())
}

/// Em value rounded to three decimals, always with a fractional part
/// (`3.0`, `1.2`, `1.125`).
fn format_em(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let mut text = format!("{:.3}", rounded);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

/// Writes font style sheets to temporary files and swaps them into a style
/// list.
///
/// Every file written stays on disk until the regenerator is dropped, since
/// the renderer may still be reading a superseded sheet.
pub struct StyleRegenerator {
    dir: Option<PathBuf>,
    resources: Vec<TempPath>,
}

impl StyleRegenerator {
    /// Regenerator writing into the system temporary directory.
    pub fn new() -> Self {
        Self {
            dir: None,
            resources: Vec::new(),
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            resources: Vec::new(),
        }
    }

    /// Write a style sheet for the font and put it into `styles`, replacing the
    /// existing font style entry in place or appending one.
    ///
    /// On error `styles` is left exactly as it was.
    pub fn regenerate(
        &mut self,
        styles: &mut Vec<StyleRef>,
        font_size: f64,
        font_name: &str,
    ) -> Result<StyleRef> {
        let text = render_style_sheet(font_size, font_name)?;
        let path = self.write_resource(&text).map_err(Error::StyleWrite)?;
        let style = StyleRef::from_path(&path);

        match styles.iter().position(StyleRef::is_font_style) {
            Some(index) => styles[index] = style.clone(),
            None => styles.push(style.clone()),
        }
        self.resources.push(path);

        tracing::info!(font_size, font_name, style = %style, "regenerated font style sheet");
        Ok(style)
    }

    fn write_resource(&self, text: &str) -> std::io::Result<TempPath> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STYLE_TAG_PREFIX).suffix(".css");
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(file.into_temp_path())
    }

    /// Number of style files currently kept alive.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

impl Default for StyleRegenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Current font plus the active style list it was rendered into.
pub struct LookAndFeel {
    font: FontSettings,
    regenerator: StyleRegenerator,
    styles: Vec<StyleRef>,
}

impl LookAndFeel {
    pub fn new(font: FontSettings, regenerator: StyleRegenerator, styles: Vec<StyleRef>) -> Self {
        Self {
            font,
            regenerator,
            styles,
        }
    }

    /// Render the current font into the style list.
    pub fn apply_current(&mut self) -> Result<StyleRef> {
        self.regenerator
            .regenerate(&mut self.styles, self.font.size, &self.font.name)
    }

    /// Run a font command. The font only changes when its style sheet was
    /// written; on error the previous font and styles stay active.
    pub fn adjust(&mut self, command: FontCommand) -> Result<&FontSettings> {
        let next = self.font.apply(command);
        if let Err(err) = self
            .regenerator
            .regenerate(&mut self.styles, next.size, &next.name)
        {
            tracing::warn!(?command, error = %err, "font change rejected");
            return Err(err);
        }
        self.font = next;
        Ok(&self.font)
    }

    pub fn font(&self) -> &FontSettings {
        &self.font
    }

    pub fn styles(&self) -> &[StyleRef] {
        &self.styles
    }

    pub fn regenerator(&self) -> &StyleRegenerator {
        &self.regenerator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_em() {
        assert_eq!(format_em(3.0), "3.0");
        assert_eq!(format_em(1.5 * 0.8), "1.2");
        assert_eq!(format_em(1.125), "1.125");
        assert_eq!(format_em(2.0 / 3.0), "0.667");
    }

    #[test]
    fn test_style_sheet_for_one_and_a_half_em() {
        let sheet = render_style_sheet(1.5, "Fira Code").unwrap();
        insta::assert_snapshot!(sheet, @r#"
        .call-tree {
            font-family: "Fira Code";
            font-size: 1.5em;
        }

        .call-tree-row {
            height: 3.0em;
        }

        .call-tree-identity-hash-code {
            font-size: 1.2em;
        }
        "#);
    }

    #[test]
    fn test_rejects_unusable_fonts() {
        assert!(matches!(
            render_style_sheet(0.0, "monospace"),
            Err(Error::InvalidFont(_))
        ));
        assert!(matches!(
            render_style_sheet(f64::NAN, "monospace"),
            Err(Error::InvalidFont(_))
        ));
        assert!(matches!(render_style_sheet(1.0, "  "), Err(Error::InvalidFont(_))));
        assert!(matches!(
            render_style_sheet(1.0, "a\"; color: red"),
            Err(Error::InvalidFont(_))
        ));
    }

    #[test]
    fn test_style_ref_prefix_match_uses_file_name() {
        assert!(StyleRef::new(format!("file:///tmp/{}abc.css", STYLE_TAG_PREFIX)).is_font_style());
        assert!(!StyleRef::new("file:///tmp/base.css").is_font_style());
        assert!(!StyleRef::new(format!("file:///{}/base.css", STYLE_TAG_PREFIX)).is_font_style());
    }
}
