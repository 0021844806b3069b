//! Unit-circle diagram on a ratatui canvas
//!
//! Geometry comes from [`UnitCircle`] in screen space (y down). The canvas
//! has y growing up, so every point is flipped with `size - y` before drawing.

use crate::chart::{UnitCircle, ViewDescriptor, ARC_RADIUS};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

const ARC_STEPS: usize = 48;

pub struct ChartRenderData<'a> {
    pub view: &'a ViewDescriptor,
    /// Typeset coordinate label
    pub caption: Option<String>,
    pub circle: UnitCircle,
    /// Full-screen view: axes labels, projections and the angle arc
    pub detailed: bool,
}

pub fn render_chart(frame: &mut Frame, area: Rect, data: &ChartRenderData) {
    let title = if data.detailed {
        " Unit Circle (Esc to close) "
    } else {
        " Unit Circle (F8) "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let circle = data.circle;
    let angle = data.view.angle;
    let detailed = data.detailed;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(DEFAULT_THEME.bg)
        .x_bounds([0.0, circle.size])
        .y_bounds([0.0, circle.size])
        .paint(move |ctx| paint(ctx, circle, angle, detailed));
    frame.render_widget(canvas, chunks[0]);

    let caption = Paragraph::new(caption_line(data)).alignment(Alignment::Center);
    frame.render_widget(caption, chunks[1]);
}

fn caption_line(data: &ChartRenderData) -> TextLine<'static> {
    let angle = format!("θ = {}°", data.view.angle);
    match &data.caption {
        Some(coords) => TextLine::from(vec![
            Span::styled(angle, Style::default().fg(DEFAULT_THEME.muted)),
            Span::raw("   "),
            Span::styled(
                format!("P {}", coords),
                Style::default()
                    .fg(DEFAULT_THEME.point)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => TextLine::from(Span::styled(
            angle,
            Style::default().fg(DEFAULT_THEME.fg),
        )),
    }
}

fn paint(ctx: &mut Context, circle: UnitCircle, angle: f64, detailed: bool) {
    let size = circle.size;
    let center = circle.center();
    let flip = |(x, y): (f64, f64)| (x, size - y);

    // Axes
    let reach = circle.radius * 1.15;
    ctx.draw(&Line::new(center - reach, center, center + reach, center, DEFAULT_THEME.dim));
    ctx.draw(&Line::new(center, center - reach, center, center + reach, DEFAULT_THEME.dim));

    ctx.draw(&Circle {
        x: center,
        y: center,
        radius: circle.radius,
        color: DEFAULT_THEME.fg,
    });
    ctx.layer();

    let (px, py) = flip(circle.point(angle));
    if detailed {
        // Projections onto both axes
        ctx.draw(&Line::new(px, py, px, center, DEFAULT_THEME.muted));
        ctx.draw(&Line::new(px, py, center, py, DEFAULT_THEME.muted));

        let arc: Vec<(f64, f64)> = circle
            .arc(angle, ARC_RADIUS, ARC_STEPS)
            .into_iter()
            .map(flip)
            .collect();
        ctx.draw(&Points {
            coords: &arc,
            color: DEFAULT_THEME.fg,
        });

        let label_offset = circle.radius * 0.08;
        ctx.print(center + reach, center + label_offset, "x");
        ctx.print(center + label_offset, center + reach, "y");
    }

    ctx.draw(&Line::new(center, center, px, py, DEFAULT_THEME.point));
    ctx.draw(&Points {
        coords: &[(px, py)],
        color: DEFAULT_THEME.point,
    });
}
