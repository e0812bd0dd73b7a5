use crate::presentation::renderers::{ConsoleRenderer, Renderer};
use crate::presentation::view_models::{CommandResultViewModel, TreeViewModel};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::fmt::Display;

/// Context for handler execution with consistent presentation utilities
pub struct HandlerContext {
    pub format: OutputFormat,
    /// Paint labels with terminal colors. Only when stdout is a terminal.
    pub color: bool,
}

impl HandlerContext {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: format == OutputFormat::Plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        let renderer = ConsoleRenderer::new(self.format, self.color);
        renderer.render(view_model)
    }

    pub fn render_tree(&self, view_model: CommandResultViewModel<TreeViewModel<'_>>) -> Result<()> {
        ConsoleRenderer::new(self.format, self.color).render_tree(view_model)
    }
}
