//! Active field rendering

use crate::editor::InputBuffer;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render the active field. The caret shows as a reversed cell when the
/// selection is collapsed; a selection shows on the selection background.
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    buffer: &InputBuffer,
    is_focused: bool,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(field_line(buffer, is_focused))
        .block(block)
        .style(Style::default().bg(DEFAULT_THEME.bg));
    frame.render_widget(paragraph, area);
}

/// Styled spans for a buffer: text before, selection or caret, text after
pub fn field_line(buffer: &InputBuffer, show_caret: bool) -> Line<'_> {
    let text = Style::default().fg(DEFAULT_THEME.bright);
    if buffer.is_empty() && !show_caret {
        return Line::from(Span::styled("…", Style::default().fg(DEFAULT_THEME.muted)));
    }

    let (before, selected, after) = buffer.segments();
    let mut spans = vec![Span::styled(before, text)];

    if !selected.is_empty() {
        spans.push(Span::styled(
            selected,
            text.bg(DEFAULT_THEME.selection_bg),
        ));
        spans.push(Span::styled(after, text));
    } else if show_caret {
        let caret = Style::default()
            .fg(DEFAULT_THEME.fg)
            .add_modifier(Modifier::REVERSED);
        match after.chars().next() {
            Some(c) => {
                let width = c.len_utf8();
                spans.push(Span::styled(&after[..width], caret));
                spans.push(Span::styled(&after[width..], text));
            }
            None => spans.push(Span::styled(" ", caret)),
        }
    } else {
        spans.push(Span::styled(after, text));
    }
    Line::from(spans)
}
