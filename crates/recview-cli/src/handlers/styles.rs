use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::CommandResultViewModel;
use anyhow::Result;
use recview_runtime::FontSettings;

/// Print the style sheet for the configured font, with flag overrides.
pub fn handle(
    ctx: &HandlerContext,
    configured: &FontSettings,
    font_size: Option<f64>,
    font_name: Option<String>,
) -> Result<()> {
    let font = FontSettings::new(
        font_size.unwrap_or(configured.size),
        font_name.unwrap_or_else(|| configured.name.clone()),
    );

    let view_model = presenters::build_styles_view_model(&font)?;
    ctx.render(CommandResultViewModel::new(view_model))
}
