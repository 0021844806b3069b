//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: event loop, pane focus, key bindings and the full-screen chart screen
//! - **[`panes`]**: stateless render functions for each visible pane (header, input,
//!   keypad, variables, result, chart, status bar)
//! - **[`theme`]**: the matrix palette used by all panes
//!
//! The entry point is [`App`]: construct it with a [`Session`] and a
//! [`Dispatcher`], then call [`App::run`] to start the event loop.
//!
//! [`Session`]: crate::session::Session
//! [`Dispatcher`]: crate::solver::Dispatcher
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
