use crate::presentation::view_models::StylesViewModel;
use recview_runtime::{render_style_sheet, FontSettings, Result};

pub fn build_styles_view_model(font: &FontSettings) -> Result<StylesViewModel> {
    Ok(StylesViewModel {
        font_size: font.size,
        font_name: font.name.clone(),
        style_sheet: render_style_sheet(font.size, &font.name)?,
    })
}
