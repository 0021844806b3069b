//! Variable bank pane

use crate::editor::{VarKey, VariableBank};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

use super::input::field_line;

pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    bank: &VariableBank,
    selected: VarKey,
    is_focused: bool,
) {
    let block = Block::default()
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(DEFAULT_THEME.bg));

    let items: Vec<ListItem> = VarKey::ALL
        .iter()
        .map(|&key| {
            let is_selected = key == selected;
            let key_style = if is_selected && is_focused {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", key.symbol()), key_style),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.muted)),
            ];
            spans.extend(field_line(bank.buffer(key), is_selected && is_focused).spans);
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
