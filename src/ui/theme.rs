use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,        // Matrix green
    pub dim: Color,       // Dark green for idle borders and grid lines
    pub dark: Color,      // Near-black green for panel fills
    pub muted: Color,     // Grey captions
    pub bright: Color,    // White digits and operands
    pub error: Color,     // Red
    pub point: Color,     // Terminal point and radius on the chart
    pub border_focused: Color,
    pub border_normal: Color,
    pub selection_bg: Color,
    pub key_operator: Color,
    pub key_danger: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(13, 13, 13),
    fg: Color::Rgb(0, 255, 65),
    dim: Color::Rgb(0, 59, 0),
    dark: Color::Rgb(0, 26, 0),
    muted: Color::Rgb(120, 120, 120),
    bright: Color::Rgb(235, 235, 235),
    error: Color::Rgb(239, 68, 68),
    point: Color::Rgb(255, 75, 75),
    border_focused: Color::Rgb(0, 255, 65),
    border_normal: Color::Rgb(0, 59, 0),
    selection_bg: Color::Rgb(0, 59, 0),
    key_operator: Color::Rgb(0, 255, 65),
    key_danger: Color::Rgb(239, 68, 68),
};
