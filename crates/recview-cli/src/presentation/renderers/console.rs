use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, BufWriter, Write};

use super::traits::Renderer;
use crate::presentation::view_models::{CommandResultViewModel, TreeViewModel};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    json_mode: bool,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            json_mode: format == OutputFormat::Json,
            color,
        }
    }

    /// Write a tree straight to stdout, one row at a time.
    pub fn render_tree(&self, result: CommandResultViewModel<TreeViewModel<'_>>) -> Result<()> {
        let mut out = BufWriter::new(io::stdout().lock());

        if self.json_mode {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        } else {
            result.content.write_plain(&mut out, self.color)?;
            for note in &result.notes {
                if self.color {
                    writeln!(out, "{}", note.dimmed())?;
                } else {
                    writeln!(out, "{}", note)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        if self.json_mode {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        print!("{}", result.content);

        for note in &result.notes {
            if self.color {
                println!("{}", note.dimmed());
            } else {
                println!("{}", note);
            }
        }

        Ok(())
    }
}
