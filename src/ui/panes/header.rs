//! Mode tabs and trigonometry options

use crate::solver::{Quadrant, Tab, TrigFunc, TrigMode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub struct HeaderRenderData {
    pub tab: Tab,
    pub trig_mode: TrigMode,
    pub is_radians: bool,
    pub trig_func: TrigFunc,
    pub quadrant: Quadrant,
}

pub fn render_header(frame: &mut Frame, area: Rect, data: &HeaderRenderData) {
    let block = Block::default()
        .title(" SolveTTY ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(inner);

    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("F{} {}", i + 1, tab.label()));
    let selected = Tab::ALL.iter().position(|t| *t == data.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(DEFAULT_THEME.dim))
        .highlight_style(
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(Span::styled("│", Style::default().fg(DEFAULT_THEME.dim)));
    frame.render_widget(tabs, columns[0]);

    if data.tab == Tab::Trig {
        frame.render_widget(
            Paragraph::new(trig_options(data)).alignment(Alignment::Right),
            columns[1],
        );
    }
}

fn trig_options(data: &HeaderRenderData) -> Line<'static> {
    let key = Style::default().fg(DEFAULT_THEME.muted);
    let value = Style::default()
        .fg(DEFAULT_THEME.fg)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("F4 ", key),
        Span::styled(data.trig_mode.label(), value),
        Span::raw("  "),
    ];
    match data.trig_mode {
        TrigMode::Angle => {
            spans.push(Span::styled("F5 ", key));
            spans.push(Span::styled(
                if data.is_radians { "RAD" } else { "DEG" },
                value,
            ));
        }
        TrigMode::Func => {
            spans.push(Span::styled("F5 ", key));
            spans.push(Span::styled(data.trig_func.name(), value));
            spans.push(Span::raw("  "));
            spans.push(Span::styled("F6 ", key));
            spans.push(Span::styled(data.quadrant.to_string(), value));
        }
    }
    Line::from(spans)
}
