//! # Introduction
//!
//! SolveTTY is a keypad calculator for algebra, equation solving and
//! trigonometry. Input is edited locally through an on-screen keypad; the
//! mathematics happens on a remote HTTP solving service and the answer is
//! drawn in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Keys → Session → InputBuffer → substitute → SolveRequest → Dispatcher
//!      → HTTP service → Completion → Session → fragments → TUI
//! ```
//!
//! 1. [`editor`]: caret-aware text buffers and the A/B/C variable bank.
//! 2. [`session`]: the single state object; every change goes through
//!    [`session::Session::apply`].
//! 3. [`solver`]: request payloads, the HTTP transport and background
//!    submission tagged with sequence numbers.
//! 4. [`render`]: maps a result to display fragments, typeset by [`latex`].
//! 5. [`chart`]: unit-circle geometry and the chart view descriptor.
//! 6. [`keypad`]: the key grid and key → action mapping.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`config`] and [`logging`] carry the settings file and the tracing setup.

pub mod chart;
pub mod config;
pub mod editor;
pub mod keypad;
pub mod latex;
pub mod logging;
pub mod render;
pub mod session;
pub mod solver;
pub mod ui;
