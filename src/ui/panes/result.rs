//! Result pane: fragments, error line and loading indicator

use crate::chart::{ViewDescriptor, PREVIEW};
use crate::render::{Fragment, QuadrantCell};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::chart::{render_chart, ChartRenderData};

/// Minimum pane height before the inline chart preview is shown
const PREVIEW_MIN_HEIGHT: u16 = 18;
const PREVIEW_HEIGHT: u16 = 11;

pub struct ResultRenderData<'a> {
    pub fragments: &'a [Fragment],
    pub error: Option<&'a str>,
    pub is_loading: bool,
    /// Typeset label for the chart fragment, if any
    pub chart_caption: Option<String>,
}

pub fn render_result_pane(frame: &mut Frame, area: Rect, data: &ResultRenderData) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut text_area = inner;
    let chart = data.fragments.iter().find_map(|f| match f {
        Fragment::Chart(view) => Some(view),
        _ => None,
    });
    if let Some(view) = chart {
        if inner.height >= PREVIEW_MIN_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(PREVIEW_HEIGHT), Constraint::Min(0)])
                .split(inner);
            render_preview(frame, chunks[0], view, data.chart_caption.clone());
            text_area = chunks[1];
        }
    }

    let lines = if data.is_loading {
        vec![Line::from(Span::styled(
            "Solving...",
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::SLOW_BLINK),
        ))]
    } else if let Some(error) = data.error {
        vec![Line::from(vec![
            Span::styled(
                "ERROR ",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ])]
    } else if data.fragments.is_empty() {
        vec![Line::from(Span::styled(
            "Enter an input and press EXECUTE",
            Style::default().fg(DEFAULT_THEME.muted),
        ))]
    } else {
        data.fragments.iter().flat_map(fragment_lines).collect()
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        text_area,
    );
}

fn render_preview(frame: &mut Frame, area: Rect, view: &ViewDescriptor, caption: Option<String>) {
    // Keep the preview roughly square: terminal cells are about twice as tall as wide
    let width = (area.height * 2 + 2).min(area.width);
    let area = Rect { width, ..area };
    let data = ChartRenderData {
        view,
        caption,
        circle: PREVIEW,
        detailed: false,
    };
    render_chart(frame, area, &data);
}

fn fragment_lines(fragment: &Fragment) -> Vec<Line<'static>> {
    let label = Style::default().fg(DEFAULT_THEME.muted);
    let value = Style::default().fg(DEFAULT_THEME.bright);

    match fragment {
        // The chart is drawn as a preview, not as text
        Fragment::Chart(_) => Vec::new(),
        Fragment::Expression { text, emphasis } => {
            if *emphasis {
                vec![Line::from(vec![
                    Span::styled("= ", Style::default().fg(DEFAULT_THEME.fg)),
                    Span::styled(
                        text.clone(),
                        Style::default()
                            .fg(DEFAULT_THEME.fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])]
            } else {
                vec![Line::from(Span::styled(text.clone(), value))]
            }
        }
        Fragment::Field { label: name, value: text } => vec![Line::from(vec![
            Span::styled(format!("{}: ", name), label),
            Span::styled(text.clone(), value),
        ])],
        Fragment::FunctionGrid(values) => values
            .chunks(3)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .flat_map(|(name, text)| {
                        [
                            Span::styled(format!("{} ", name), label),
                            Span::styled(format!("{:<12}", text), value),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect(),
        Fragment::QuadrantGrid(cells) => cells.iter().map(quadrant_line).collect(),
        Fragment::Benchmarks {
            human,
            machine,
            speedup,
        } => vec![
            Line::default(),
            Line::from(vec![
                Span::styled("Human ", label),
                Span::styled(human.clone(), value),
                Span::styled("  Machine ", label),
                Span::styled(machine.clone(), value),
                Span::styled("  Speedup ", label),
                Span::styled(
                    speedup.clone(),
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ],
    }
}

fn quadrant_line(cell: &QuadrantCell) -> Line<'static> {
    let base = if cell.selected {
        Style::default()
            .fg(DEFAULT_THEME.fg)
            .bg(DEFAULT_THEME.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.muted)
    };
    let marker = if cell.selected { "▶ " } else { "  " };
    Line::from(vec![
        Span::styled(format!("{}{} ", marker, cell.label), base),
        Span::styled(format!("{:<10}", cell.angle), base),
        Span::styled(cell.value.clone(), base),
    ])
}
