mod app;
mod ui;

pub use app::{Notice, NoticeLevel, PaneContent, SourcePane, TreeRow, ViewerApp};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Interactive call tree browser. Source lookups are applied on every tick,
/// so the pane catches up without a key press.
pub struct TuiRenderer {
    tick_rate: Duration,
}

impl Default for TuiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiRenderer {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    pub fn run(&self, app: &mut ViewerApp) -> Result<()> {
        app.start()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(0);
        })?;

        let result = self.event_loop(&mut terminal, app);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut ViewerApp,
    ) -> Result<()> {
        while !app.should_quit {
            terminal.draw(|f| ui::draw(f, app))?;

            if event::poll(self.tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                app.handle_key(key);
            }

            app.poll_enrichment();
        }
        Ok(())
    }
}
