use std::ops::Range;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{
    app::App,
    patch::{DiffLine, LineKind, ParsedFile},
    split::SplitRow,
    ui::overlay::{changed_ranges, overlay_changes},
};

pub fn render_split_view(
    f: &mut Frame,
    area: Rect,
    file: &ParsedFile,
    scroll_offset: usize,
    app: &App,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let visible_rows = area.height.saturating_sub(2) as usize;
    let panel_width = (chunks[0].width.saturating_sub(2)) as usize; // Width minus borders
    let language = app.language_for(file);

    let rows: Vec<&SplitRow> = file
        .rows
        .iter()
        .filter(|row| app.show_hunk_headers || !is_hunk_row(row))
        .collect();

    let mut old_lines = Vec::new();
    let mut new_lines = Vec::new();

    for row in rows.iter().skip(scroll_offset).take(visible_rows).copied() {
        if is_hunk_row(row) {
            let header = row
                .left
                .as_ref()
                .map(|l| l.content.clone())
                .unwrap_or_default();
            let hunk_line = Line::from(Span::styled(
                header,
                Style::default()
                    .bg(app.theme.hunk_bg)
                    .fg(app.theme.hunk_fg)
                    .add_modifier(Modifier::BOLD),
            ));
            old_lines.push(hunk_line.clone());
            new_lines.push(hunk_line);
            continue;
        }

        let (old_ranges, new_ranges) = match &row.inline_diff {
            Some(spans) => changed_ranges(spans),
            None => (Vec::new(), Vec::new()),
        };

        old_lines.push(render_side(
            row.left.as_ref(),
            &old_ranges,
            true,
            panel_width,
            &language,
            app,
        ));
        new_lines.push(render_side(
            row.right.as_ref(),
            &new_ranges,
            false,
            panel_width,
            &language,
            app,
        ));
    }

    let old_title = format!("Old: {}", file.file_name);
    let new_title = format!("New: {}", file.file_name);

    let old_paragraph = Paragraph::new(Text::from(old_lines))
        .block(Block::default().borders(Borders::ALL).title(old_title));
    let new_paragraph = Paragraph::new(Text::from(new_lines))
        .block(Block::default().borders(Borders::ALL).title(new_title));

    f.render_widget(old_paragraph, chunks[0]);
    f.render_widget(new_paragraph, chunks[1]);

    // Render scrollbars for both panels
    let total_rows = rows.len();
    if total_rows > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(total_rows).position(scroll_offset);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        for chunk in [chunks[0], chunks[1]] {
            f.render_stateful_widget(
                scrollbar.clone(),
                chunk.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

fn is_hunk_row(row: &SplitRow) -> bool {
    matches!(&row.left, Some(line) if line.kind == LineKind::Hunk)
}

/// Builds one panel line for one side of a row. An absent side becomes a
/// filler line padded to the panel width.
fn render_side<'a>(
    line: Option<&DiffLine>,
    ranges: &[Range<usize>],
    old_side: bool,
    panel_width: usize,
    language: &str,
    app: &App,
) -> Line<'a> {
    let Some(line) = line else {
        return Line::from(Span::styled(
            " ".repeat(panel_width),
            Style::default().bg(app.theme.filler_bg),
        ));
    };

    let mut spans = Vec::new();
    if app.show_line_numbers {
        let number = if old_side {
            line.old_line_num
        } else {
            line.new_line_num
        };
        spans.push(Span::styled(
            format!("{:4} ", number.unwrap_or(0)),
            Style::default().fg(app.theme.line_number_fg),
        ));
    }

    let highlighted = app.highlight(&line.content, language);
    match line.kind {
        LineKind::Delete => spans.extend(overlay_changes(
            highlighted,
            ranges,
            app.theme.removed_bg,
            app.theme.removed_emphasis_bg,
        )),
        LineKind::Add => spans.extend(overlay_changes(
            highlighted,
            ranges,
            app.theme.added_bg,
            app.theme.added_emphasis_bg,
        )),
        LineKind::Context | LineKind::Hunk => spans.extend(
            highlighted
                .into_iter()
                .map(|s| Span::styled(s.text, s.style)),
        ),
    }

    Line::from(spans)
}
