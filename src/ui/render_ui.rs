use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    app::App,
    ui::{footer::render_footer, split_view::render_split_view},
};

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout with optional footer
    let (content_area, footer_area) = if app.show_shortcuts {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);
        (main_chunks[0], Some(main_chunks[1]))
    } else {
        (size, None)
    };

    // Content layout (optional file list and the split view)
    let diff_area = if app.show_file_list {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(content_area);
        render_file_list(f, chunks[0], app);
        chunks[1]
    } else {
        content_area
    };

    if let Some(file) = app.files.get(app.selected_file) {
        render_split_view(f, diff_area, file, app.scroll_offset, app);
    } else {
        let empty = Paragraph::new("No changes to display")
            .block(Block::default().borders(Borders::ALL).title("Diff"));
        f.render_widget(empty, diff_area);
    }

    // Footer with keyboard shortcuts (if enabled)
    if let Some(footer_area) = footer_area {
        render_footer(f, footer_area);
    }
}

fn render_file_list(f: &mut Frame, area: Rect, app: &App) {
    let files: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| {
            ListItem::new(Line::from(vec![
                Span::raw(file.file_name.clone()),
                Span::raw(" "),
                Span::styled(
                    format!("+{}", file.additions),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("-{}", file.deletions),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let files_list = List::new(files)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(files_list, area, &mut app.file_list_state.clone());
}
