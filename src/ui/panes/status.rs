//! Status bar rendering with keybindings and request state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the request badge on the left shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Ready,
    Loading,
    Error,
    /// Full-screen diagram, no request state to show
    Chart,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, state: RequestState) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let (badge, badge_bg) = match state {
        RequestState::Ready => (" READY ", DEFAULT_THEME.fg),
        RequestState::Loading => (" LOADING ", DEFAULT_THEME.bright),
        RequestState::Error => (" ERROR ", DEFAULT_THEME.error),
        RequestState::Chart => (" CHART ", DEFAULT_THEME.fg),
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default().bg(DEFAULT_THEME.dark).fg(DEFAULT_THEME.muted),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(DEFAULT_THEME.dark).fg(if state == RequestState::Error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.dark))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.dim).fg(DEFAULT_THEME.fg);
    let desc_style = Style::default().bg(DEFAULT_THEME.dark).fg(DEFAULT_THEME.fg);
    let sep_style = Style::default().bg(DEFAULT_THEME.dark).fg(DEFAULT_THEME.muted);

    let bindings: &[(&str, &str)] = if state == RequestState::Chart {
        &[(" Esc ", " back ")]
    } else {
        &[
            (" F1-F3 ", " mode "),
            (" ⇥ ", " focus "),
            (" ↵ ", " execute "),
            (" F7 ", " vars "),
            (" F8 ", " chart "),
            (" Esc ", " quit "),
        ]
    };

    let mut right_spans = Vec::with_capacity(bindings.len() * 3);
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.dark))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
