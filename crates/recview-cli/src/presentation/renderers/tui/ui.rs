use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use recview_engine::StyleClass;

use super::app::{NoticeLevel, PaneContent, TreeRow, ViewerApp};

const KEY_HELP: &str = "j/k move  l expand  h parent  +/- font  r reload  x dismiss  q quit";

pub(crate) fn draw(f: &mut Frame, app: &ViewerApp) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[0]);

    render_tree(f, panes[0], app);
    render_source(f, panes[1], &app.pane.content);
    render_status_bar(f, main_chunks[1], app);
}

pub(crate) fn atom_style(style: StyleClass) -> Style {
    let base = Style::default();
    match style {
        StyleClass::CollectionBracket | StyleClass::Separator => base.fg(Color::DarkGray),
        StyleClass::TruncationMarker => base.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        StyleClass::Null => base.fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        StyleClass::Boolean | StyleClass::Number => base.fg(Color::Cyan),
        StyleClass::String | StyleClass::Char => base.fg(Color::Green),
        StyleClass::Printed => base,
        StyleClass::TypeName => base.fg(Color::Yellow),
        StyleClass::IdentityHashCode => base.fg(Color::DarkGray),
        StyleClass::FieldName => base.fg(Color::Blue),
        StyleClass::MethodName => base.add_modifier(Modifier::BOLD),
        StyleClass::StaticMethodName => base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        StyleClass::Thrown => base.fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn row_line(row: &TreeRow) -> Line<'_> {
    let marker = match (row.has_children, row.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        _ => "  ",
    };
    let mut spans = vec![Span::raw("  ".repeat(row.depth)), Span::raw(marker)];
    spans.extend(
        row.label
            .atoms()
            .map(|atom| Span::styled(atom.text.as_str(), atom_style(atom.style))),
    );
    Line::from(spans)
}

fn render_tree(f: &mut Frame, area: Rect, app: &ViewerApp) {
    let items: Vec<ListItem> = app.rows.iter().map(|row| ListItem::new(row_line(row))).collect();
    let title = format!(" {} ", app.view.recording_id());

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_source(f: &mut Frame, area: Rect, content: &PaneContent) {
    let block = Block::default().borders(Borders::ALL);
    let muted = Style::default().fg(Color::DarkGray);

    let (title, text, scroll) = match content {
        PaneContent::Empty => (String::from(" Source "), Text::default(), 0),
        PaneContent::Pending { method_name } => (
            format!(" {} ", method_name),
            Text::from(Line::styled("Looking up source...", muted)),
            0,
        ),
        PaneContent::NoSource { method_name } => (
            format!(" {} ", method_name),
            Text::from(Line::styled("No source available", muted)),
            0,
        ),
        PaneContent::Source {
            source,
            method_name,
            method_line,
        } => {
            let width = source.text.lines().count().max(1).to_string().len();
            let lines: Vec<Line> = source
                .text
                .lines()
                .enumerate()
                .map(|(index, line)| {
                    let number = Span::styled(format!("{:>width$} ", index + 1), muted);
                    let style = if Some(index) == *method_line {
                        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![number, Span::styled(line, style)])
                })
                .collect();
            let scroll = method_line.unwrap_or(0).saturating_sub(2);
            (
                format!(" {} :: {} ", source.type_name, method_name),
                Text::from(lines),
                scroll as u16,
            )
        }
    };

    let paragraph = Paragraph::new(text)
        .block(block.title(title))
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &ViewerApp) {
    let font = app.look.font();
    let style_file = app
        .look
        .styles()
        .iter()
        .rev()
        .find(|style| style.is_font_style())
        .and_then(|style| style.path())
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| String::from("no style sheet"));

    let mut spans = vec![
        Span::styled(
            format!(" {}em {} ", font.size, font.name),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(format!(" {} ", style_file), Style::default().fg(Color::DarkGray)),
    ];

    let right = match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Span::styled(format!(" {}", notice.message), Style::default().fg(color))
        }
        None => Span::styled(format!(" {}", KEY_HELP), Style::default().fg(Color::DarkGray)),
    };
    spans.push(right);

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thrown_atoms_stand_out_from_values() {
        assert_eq!(atom_style(StyleClass::Thrown).fg, Some(Color::Red));
        assert_ne!(
            atom_style(StyleClass::String),
            atom_style(StyleClass::Number)
        );
        assert_eq!(atom_style(StyleClass::Printed), Style::default());
    }
}
