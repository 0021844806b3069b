//! On-screen keypad grid

use crate::keypad::{KeyAction, KeyCap, KeypadCursor, COLUMNS, LAYOUT};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_keypad_pane(frame: &mut Frame, area: Rect, cursor: KeypadCursor, is_focused: bool) {
    let block = Block::default()
        .title(" Keypad ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused))
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(LAYOUT.iter().map(|_| Constraint::Ratio(1, LAYOUT.len() as u32)))
        .split(inner);

    for (row_index, keys) in LAYOUT.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                keys.iter()
                    .map(|k| Constraint::Ratio(u32::from(k.span), u32::from(COLUMNS))),
            )
            .split(rows[row_index]);

        for (col_index, cap) in keys.iter().enumerate() {
            let is_cursor =
                is_focused && cursor.row == row_index && cursor.col == col_index;
            render_key(frame, cells[col_index], cap, is_cursor);
        }
    }
}

fn render_key(frame: &mut Frame, area: Rect, cap: &KeyCap, is_cursor: bool) {
    let accent = key_color(cap);
    let (border, label) = if is_cursor {
        (
            Style::default().fg(accent),
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(DEFAULT_THEME.dim),
            Style::default().fg(accent).bg(DEFAULT_THEME.dark),
        )
    };

    // Bordered keys need three rows; fall back to a flat label on short terminals
    if area.height >= 3 {
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let paragraph = Paragraph::new(cap.label)
            .alignment(Alignment::Center)
            .style(label)
            .block(block);
        frame.render_widget(paragraph, area);
    } else {
        let paragraph = Paragraph::new(cap.label)
            .alignment(Alignment::Center)
            .style(label);
        frame.render_widget(paragraph, area);
    }
}

fn key_color(cap: &KeyCap) -> Color {
    match cap.action {
        KeyAction::Clear | KeyAction::Delete => DEFAULT_THEME.key_danger,
        KeyAction::Execute => DEFAULT_THEME.fg,
        KeyAction::Insert(literal) if literal.chars().all(|c| c.is_ascii_digit() || c == '.') => {
            DEFAULT_THEME.bright
        }
        KeyAction::Insert(_) => DEFAULT_THEME.key_operator,
    }
}
