use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_footer(f: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcuts = vec![Line::from(vec![
        Span::styled("q", key_style),
        Span::raw(":Quit  "),
        Span::styled("j/k", key_style),
        Span::raw(":Files  "),
        Span::styled("d/u", key_style),
        Span::raw(":Scroll  "),
        Span::styled("g/G", key_style),
        Span::raw(":Top/Bottom  "),
        Span::styled("n", key_style),
        Span::raw(":Line Numbers  "),
        Span::styled("h", key_style),
        Span::raw(":Hunk Headers  "),
        Span::styled("f", key_style),
        Span::raw(":File List  "),
        Span::styled("?", key_style),
        Span::raw(":Hide Help"),
    ])];

    let footer = Paragraph::new(shortcuts)
        .block(Block::default().borders(Borders::ALL).title("Shortcuts"))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    f.render_widget(footer, area);
}
