use crate::bundle::RecordingBundle;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use recview_engine::{NodeId, RenderedFragment};
use recview_runtime::{EnrichmentPane, FontCommand, LookAndFeel, RecordingView};
use recview_types::SourceCode;
use std::path::PathBuf;
use std::sync::Arc;

/// What the source pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneContent {
    Empty,
    Pending { method_name: String },
    NoSource { method_name: String },
    Source {
        source: SourceCode,
        method_name: String,
        method_line: Option<usize>,
    },
}

pub struct SourcePane {
    pub content: PaneContent,
}

impl SourcePane {
    pub fn new() -> Self {
        Self {
            content: PaneContent::Empty,
        }
    }
}

impl EnrichmentPane for SourcePane {
    fn set_text(&mut self, source: Option<&SourceCode>, method_name: &str) {
        self.content = match source {
            Some(source) => PaneContent::Source {
                method_line: source.line_of_method(method_name),
                source: source.clone(),
                method_name: method_name.to_string(),
            },
            None => PaneContent::NoSource {
                method_name: method_name.to_string(),
            },
        };
    }

    fn clear(&mut self) {
        self.content = PaneContent::Empty;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Dismissible status line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// One visible tree row with its label already rendered.
pub struct TreeRow {
    pub node: NodeId,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub label: RenderedFragment,
}

pub struct ViewerApp {
    pub view: RecordingView,
    pub look: LookAndFeel,
    pub pane: SourcePane,
    pub rows: Vec<TreeRow>,
    pub cursor: usize,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    bundle_path: PathBuf,
}

impl ViewerApp {
    pub fn new(view: RecordingView, look: LookAndFeel, bundle_path: PathBuf) -> Self {
        Self {
            view,
            look,
            pane: SourcePane::new(),
            rows: Vec::new(),
            cursor: 0,
            notice: None,
            should_quit: false,
            bundle_path,
        }
    }

    /// Build the tree, publish the initial style sheet and select the root.
    pub fn start(&mut self) -> Result<()> {
        self.view.init()?;
        if let Err(err) = self.look.apply_current() {
            self.error(format!("Could not apply font: {}", err));
        }
        self.rebuild_rows()?;
        self.select_cursor()
    }

    fn rebuild_rows(&mut self) -> Result<()> {
        let tree = self.view.tree()?;
        let settings = self.view.settings();
        let mut rows = Vec::new();
        for row in tree.visible_rows() {
            rows.push(TreeRow {
                node: row.node,
                depth: row.depth,
                has_children: tree.has_children(row.node)?,
                expanded: tree.is_expanded(row.node)?,
                label: tree.render_label(row.node, settings)?,
            });
        }
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    fn current_node(&self) -> Option<NodeId> {
        self.rows.get(self.cursor).map(|row| row.node)
    }

    fn select_cursor(&mut self) -> Result<()> {
        let node = self.current_node();
        self.view.select(node, &mut self.pane)?;
        if let Some(node) = node {
            let method_name = self.view.tree()?.record(node)?.method.name.clone();
            self.pane.content = PaneContent::Pending { method_name };
        }
        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) -> Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let last = self.rows.len() - 1;
        let next = self.cursor.saturating_add_signed(delta).min(last);
        if next != self.cursor {
            self.cursor = next;
            self.select_cursor()?;
        }
        Ok(())
    }

    fn expand_current(&mut self) -> Result<()> {
        if let Some(node) = self.current_node() {
            self.view.expand(node)?;
            self.rebuild_rows()?;
        }
        Ok(())
    }

    fn go_to_parent(&mut self) -> Result<()> {
        let Some(node) = self.current_node() else {
            return Ok(());
        };
        let tree = self.view.tree()?;
        let parent = tree
            .record(node)?
            .parent()
            .and_then(|index| tree.arena().get(index))
            .and_then(|record| tree.node_for(record.id));
        if let Some(parent) = parent
            && let Some(position) = self.rows.iter().position(|row| row.node == parent)
        {
            self.cursor = position;
            self.select_cursor()?;
        }
        Ok(())
    }

    fn adjust_font(&mut self, command: FontCommand) {
        match self.look.adjust(command) {
            Ok(font) => {
                let message = format!("Font size {}em", font.size);
                self.info(message);
            }
            Err(err) => self.error(format!("Could not change font size: {}", err)),
        }
    }

    /// Re-read the bundle from disk and merge it into the open tree. Source
    /// lookups switch to the sources of the re-read bundle.
    fn reload(&mut self) -> Result<()> {
        let bundle = RecordingBundle::load(&self.bundle_path)?;
        let selected = self.current_node();
        let locator = Arc::new(bundle.locator());
        self.view.update(bundle.recording)?;
        self.view.set_sources(bundle.metadata, locator);
        let summary = self.view.refresh(&mut self.pane)?;
        self.rebuild_rows()?;

        if let Some(position) = selected.and_then(|node| self.rows.iter().position(|row| row.node == node)) {
            self.cursor = position;
        }
        if summary.selection_cleared {
            self.select_cursor()?;
        }

        self.info(format!(
            "Refreshed: {} kept, {} new, {} gone",
            summary.retained, summary.added, summary.dropped
        ));
        Ok(())
    }

    /// Apply source lookups that finished since the last tick.
    pub fn poll_enrichment(&mut self) {
        self.view.poll_enrichment(&mut self.pane);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => self.expand_current(),
            KeyCode::Left | KeyCode::Char('h') => self.go_to_parent(),
            KeyCode::Char('=') | KeyCode::Char('+') => {
                self.adjust_font(FontCommand::Increase);
                Ok(())
            }
            KeyCode::Char('-') => {
                self.adjust_font(FontCommand::Decrease);
                Ok(())
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('x') => {
                self.notice = None;
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.error(format!("{:#}", err));
        }
    }

    fn info(&mut self, message: String) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            message,
        });
    }

    fn error(&mut self, message: String) {
        tracing::warn!(%message, "viewer error");
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    /// Drop the tree and forget pending lookups.
    pub fn dispose(&mut self) {
        self.view.dispose();
        self.pane.clear();
    }
}
