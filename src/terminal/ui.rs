use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::chat::transcript::{Role, TranscriptEntry};
use crate::terminal::state::ChatState;

fn entry_lines(entry: &TranscriptEntry) -> Vec<Line<'static>> {
    let (label, color) = match entry.role {
        Role::User => ("you", Color::Cyan),
        Role::Assistant => ("assistant", Color::Yellow),
    };
    let mut lines = vec![Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(entry.text.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::default());
    lines
}

/// Rows the lines take when wrapped at `width` characters. Word wrap can
/// need a few more, which only costs a short scroll.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    rows.min(u16::MAX as usize) as u16
}

pub fn render(f: &mut Frame, state: &ChatState) {
    let [body, input, footer] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(f.area());

    // TOP: transcript, pinned to the bottom unless scrolled back
    let lines: Vec<Line> = state
        .conversation
        .transcript()
        .entries()
        .iter()
        .flat_map(entry_lines)
        .collect();

    let block = Block::default()
        .title(state.header.clone())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_width = body.width.saturating_sub(2).max(1);
    let inner_height = body.height.saturating_sub(2);
    let total = wrapped_height(&lines, inner_width);
    let p = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    let bottom = total.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(state.scroll_back);
    f.render_widget(p.scroll((offset, 0)), body);

    // MIDDLE: input box
    let (title, border) = if state.is_busy() {
        (" Waiting for the server... ", Color::DarkGray)
    } else {
        (" Type a command ", Color::Green)
    };
    let input_box = Paragraph::new(state.input.as_str()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input_box, input);

    if !state.is_busy() {
        let x = input.x + 1 + state.input.chars().count() as u16;
        f.set_cursor_position((x.min(input.right().saturating_sub(2)), input.y + 1));
    }

    // BOTTOM: status or key hints
    let hint = match &state.status {
        Some(s) => Line::from(Span::styled(s.clone(), Style::default().fg(Color::Gray))),
        None => Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" send  "),
            Span::styled("↑/↓ PgUp/PgDn", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" scroll  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]),
    };
    f.render_widget(Paragraph::new(hint), footer);
}
