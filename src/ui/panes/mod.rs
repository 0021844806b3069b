//! TUI pane rendering modules
//!
//! Every pane is a stateless `render_*` function taking the frame, its area
//! and borrowed session data. Nothing here mutates the session.
//!
//! # Pane Modules
//!
//! - [`header`]: mode tabs and the trigonometry options line
//! - [`input`]: the active field with caret and selection
//! - [`keypad`]: the on-screen key grid
//! - [`variables`]: the A/B/C variable bank
//! - [`result`]: result fragments, errors and the loading indicator
//! - [`chart`]: unit-circle diagram (inline preview and full screen)
//! - [`status`]: status bar with keybindings and request state

pub mod chart;
pub mod header;
pub mod input;
pub mod keypad;
pub mod result;
pub mod status;
pub mod variables;

pub use chart::{render_chart, ChartRenderData};
pub use header::{render_header, HeaderRenderData};
pub use input::render_input_pane;
pub use keypad::render_keypad_pane;
pub use result::{render_result_pane, ResultRenderData};
pub use status::{render_status_bar, RequestState};
pub use variables::render_variables_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by all focusable panes
fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
