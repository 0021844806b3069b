//! Main TUI application state and logic

use crate::chart::{ViewDescriptor, FULL};
use crate::editor::{EditCommand, VarKey};
use crate::keypad::{KeyAction, Keypad, KeypadCursor};
use crate::latex::{PlainTypesetter, Typesetter};
use crate::render;
use crate::session::{Action, Effect, Field, Outcome, Session};
use crate::solver::{Completion, Dispatcher, SolveError, Tab, Ticket, TrigMode};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::panes::{
    self, ChartRenderData, HeaderRenderData, RequestState, ResultRenderData,
};

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Input,
    Keypad,
    Variables,
}

impl FocusedPane {
    /// Move focus to the next pane (input -> keypad -> variables)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Input => FocusedPane::Keypad,
            FocusedPane::Keypad => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Input => FocusedPane::Variables,
            FocusedPane::Keypad => FocusedPane::Input,
            FocusedPane::Variables => FocusedPane::Keypad,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Main,
    /// Full-screen diagram
    Chart(ViewDescriptor),
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Runs submissions in the background; `None` for the standalone chart
    dispatcher: Option<Dispatcher>,

    keypad: Keypad,
    pub keypad_cursor: KeypadCursor,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Variable edited while the variables pane has focus
    pub selected_variable: VarKey,
    pub show_variables: bool,

    pub screen: Screen,

    /// Launched straight into a diagram; closing it quits
    standalone: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Origin the chart view URL is encoded against
    chart_origin: String,

    typesetter: Box<dyn Typesetter>,
}

impl App {
    /// Create the keypad app around a session and its dispatcher
    pub fn new(session: Session, dispatcher: Option<Dispatcher>, chart_origin: String) -> Self {
        App {
            session,
            dispatcher,
            keypad: Keypad::new(),
            keypad_cursor: KeypadCursor::default(),
            focused_pane: FocusedPane::Input,
            selected_variable: VarKey::A,
            show_variables: false,
            screen: Screen::Main,
            standalone: false,
            should_quit: false,
            status_message: String::from("Ready"),
            chart_origin,
            typesetter: Box::new(PlainTypesetter),
        }
    }

    /// An app that only shows `view` full screen
    pub fn standalone_chart(view: ViewDescriptor) -> Self {
        let mut app = App::new(Session::new(), None, String::new());
        app.screen = Screen::Chart(view);
        app.standalone = true;
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.drain_completions();

            // Poll with a timeout so completions are picked up without a key press
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Feed every finished request back into the session
    pub fn drain_completions(&mut self) {
        let completions: Vec<Completion> = match &self.dispatcher {
            Some(dispatcher) => std::iter::from_fn(|| dispatcher.try_next()).collect(),
            None => return,
        };
        for completion in completions {
            self.apply(Action::Complete(completion));
        }
    }

    /// Apply an action, perform its effect and refresh the status line
    fn apply(&mut self, action: Action) {
        let was_loading = self.session.is_loading();
        match self.session.apply(action) {
            Effect::None => {}
            Effect::Dispatch(ticket) => self.dispatch(ticket),
        }

        let is_loading = self.session.is_loading();
        if is_loading && !was_loading {
            self.status_message = "Solving...".to_string();
        } else if was_loading && !is_loading {
            self.status_message = match self.session.outcome() {
                Some(Outcome::Solved(_)) => "Solved".to_string(),
                Some(Outcome::Failed(_)) => "Request failed".to_string(),
                None => "Ready".to_string(),
            };
        }
    }

    fn dispatch(&mut self, ticket: Ticket) {
        match &self.dispatcher {
            Some(dispatcher) => dispatcher.submit(ticket),
            None => {
                warn!(sequence = ticket.sequence, "no dispatcher, failing submission");
                self.apply(Action::Complete(Completion {
                    sequence: ticket.sequence,
                    reply: Err(SolveError::Network(
                        "no solving service configured".to_string(),
                    )),
                }));
            }
        }
    }

    /// Draw one frame
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let state = if matches!(self.screen, Screen::Chart(_)) {
            RequestState::Chart
        } else if self.session.is_loading() {
            RequestState::Loading
        } else if self.session.error().is_some() {
            RequestState::Error
        } else {
            RequestState::Ready
        };

        match &self.screen {
            Screen::Chart(view) => {
                let data = ChartRenderData {
                    view,
                    caption: view.caption().map(|c| self.typesetter.render(c)),
                    circle: FULL,
                    detailed: true,
                };
                panes::render_chart(frame, main_chunks[0], &data);
            }
            Screen::Main => self.render_main(frame, main_chunks[0]),
        }

        panes::render_status_bar(frame, main_chunks[1], &self.status_message, state);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header = HeaderRenderData {
            tab: self.session.tab(),
            trig_mode: self.session.trig_mode(),
            is_radians: self.session.is_radians(),
            trig_func: self.session.trig_func(),
            quadrant: self.session.quadrant(),
        };
        panes::render_header(frame, rows[0], &header);

        // Left column: input, variables, result | right column: keypad
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(rows[1]);

        let variables_height = if self.show_variables { 5 } else { 0 };
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(variables_height),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        panes::render_input_pane(
            frame,
            left_rows[0],
            &self.field_title(),
            self.session.active_buffer(),
            self.focused_pane == FocusedPane::Input,
        );

        if self.show_variables {
            panes::render_variables_pane(
                frame,
                left_rows[1],
                self.session.variables(),
                self.selected_variable,
                self.focused_pane == FocusedPane::Variables,
            );
        }

        let fragments = self
            .session
            .result()
            .map(|result| render::fragments(result, self.typesetter.as_ref()))
            .unwrap_or_default();
        let chart_caption = self
            .session
            .chart_view()
            .and_then(|view| view.coords)
            .map(|coords| self.typesetter.render(&coords));
        let result = ResultRenderData {
            fragments: &fragments,
            error: self.session.error(),
            is_loading: self.session.is_loading(),
            chart_caption,
        };
        panes::render_result_pane(frame, left_rows[2], &result);

        panes::render_keypad_pane(
            frame,
            columns[1],
            self.keypad_cursor,
            self.focused_pane == FocusedPane::Keypad,
        );
    }

    fn field_title(&self) -> String {
        match self.session.active_field() {
            Field::Expression if self.session.tab() == Tab::Equation => "Equation".to_string(),
            Field::Expression => "Expression".to_string(),
            Field::Angle => {
                let unit = if self.session.is_radians() { "rad" } else { "deg" };
                format!("Angle ({})", unit)
            }
            Field::TrigValue => format!("{}(θ) =", self.session.trig_func().name()),
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if matches!(self.screen, Screen::Chart(_)) {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.close_chart();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::F(n @ 1..=3) => {
                let tab = Tab::ALL[usize::from(n - 1)];
                self.apply(Action::SelectTab(tab));
                self.status_message = format!("{} mode", tab.label());
            }
            KeyCode::F(4) if self.session.tab() == Tab::Trig => {
                let mode = self.session.trig_mode().toggle();
                self.apply(Action::SelectTrigMode(mode));
                self.status_message = format!("{} mode", mode.label());
            }
            KeyCode::F(5) if self.session.tab() == Tab::Trig => match self.session.trig_mode() {
                TrigMode::Angle => {
                    let is_radians = !self.session.is_radians();
                    self.apply(Action::SetRadians(is_radians));
                }
                TrigMode::Func => {
                    let func = self.session.trig_func().next();
                    self.apply(Action::SetTrigFunc(func));
                }
            },
            KeyCode::F(6)
                if self.session.tab() == Tab::Trig
                    && self.session.trig_mode() == TrigMode::Func =>
            {
                let quadrant = self.session.quadrant().next();
                self.apply(Action::SetQuadrant(quadrant));
            }
            KeyCode::F(7) => {
                self.show_variables = !self.show_variables;
                if !self.show_variables && self.focused_pane == FocusedPane::Variables {
                    self.focused_pane = FocusedPane::Input;
                }
            }
            KeyCode::F(8) => self.open_chart(),
            KeyCode::Tab => self.cycle_focus(FocusedPane::next),
            KeyCode::BackTab => self.cycle_focus(FocusedPane::prev),
            _ => match self.focused_pane {
                FocusedPane::Input => self.handle_input_key(key),
                FocusedPane::Keypad => self.handle_keypad_key(key),
                FocusedPane::Variables => self.handle_variables_key(key),
            },
        }
    }

    fn cycle_focus(&mut self, step: fn(FocusedPane) -> FocusedPane) {
        self.focused_pane = step(self.focused_pane);
        if self.focused_pane == FocusedPane::Variables && !self.show_variables {
            self.focused_pane = step(self.focused_pane);
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.apply(Action::Submit),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                if let Some(action) = self.keypad.alias(c) {
                    self.press(action);
                }
            }
            _ => {
                if let Some(command) = edit_command(key) {
                    self.apply(Action::Edit(command));
                }
            }
        }
    }

    fn handle_keypad_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.keypad_cursor.up(),
            KeyCode::Down => self.keypad_cursor.down(),
            KeyCode::Left => self.keypad_cursor.left(),
            KeyCode::Right => self.keypad_cursor.right(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cap = self.keypad_cursor.key();
                debug!(label = cap.label, "keypad press");
                self.press(cap.action);
            }
            _ => {}
        }
    }

    fn handle_variables_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.selected_variable = self.selected_variable.prev(),
            KeyCode::Down | KeyCode::Enter => {
                self.selected_variable = self.selected_variable.next()
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                if let Some(KeyAction::Insert(literal)) = self.keypad.alias(c) {
                    let command = EditCommand::Insert(literal.to_string());
                    self.apply(Action::EditVariable(self.selected_variable, command));
                }
            }
            _ => {
                if let Some(command) = edit_command(key) {
                    self.apply(Action::EditVariable(self.selected_variable, command));
                }
            }
        }
    }

    fn press(&mut self, action: KeyAction) {
        self.apply(action.to_action());
    }

    fn open_chart(&mut self) {
        let Some(view) = self.session.chart_view() else {
            self.status_message = "No diagram for this result".to_string();
            return;
        };
        match view.to_url(&self.chart_origin) {
            Ok(url) => {
                info!(%url, "opening chart view");
                self.status_message = url.to_string();
            }
            Err(e) => {
                warn!(error = %e, "could not encode chart view");
                self.status_message = "Chart".to_string();
            }
        }
        self.screen = Screen::Chart(view);
    }

    fn close_chart(&mut self) {
        if self.standalone {
            self.should_quit = true;
        } else {
            self.screen = Screen::Main;
            self.status_message = "Ready".to_string();
        }
    }
}

/// Keyboard → edit command shared by the input and variables panes
fn edit_command(key: KeyEvent) -> Option<EditCommand> {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let command = match key.code {
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            EditCommand::SelectAll
        }
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
        KeyCode::Char(c) => EditCommand::Insert(c.to_string()),
        KeyCode::Backspace => EditCommand::DeleteBackward,
        KeyCode::Delete => EditCommand::DeleteSelection,
        KeyCode::Left => EditCommand::MoveLeft { extend },
        KeyCode::Right => EditCommand::MoveRight { extend },
        KeyCode::Home => EditCommand::Home { extend },
        KeyCode::End => EditCommand::End { extend },
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_edits_the_active_field() {
        let mut app = App::new(Session::new(), None, String::new());
        type_text(&mut app, "x+2");
        app.handle_key_event(key(KeyCode::Left));
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.session.active_buffer().text(), "x2");
    }

    #[test]
    fn shift_arrows_extend_the_selection() {
        let mut app = App::new(Session::new(), None, String::new());
        type_text(&mut app, "abc");
        app.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        app.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        type_text(&mut app, "Z");
        assert_eq!(app.session.active_buffer().text(), "aZ");
    }

    #[test]
    fn alt_alias_inserts_glyph() {
        let mut app = App::new(Session::new(), None, String::new());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::ALT));
        assert_eq!(app.session.active_buffer().text(), "π");
    }

    #[test]
    fn submit_without_dispatcher_fails_locally() {
        let mut app = App::new(Session::new(), None, String::new());
        type_text(&mut app, "1+1");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(!app.session.is_loading());
        assert_eq!(
            app.session.error(),
            Some("SERVER_ERROR: no solving service configured")
        );
        assert_eq!(app.status_message, "Request failed");
    }

    #[test]
    fn keypad_focus_presses_keys() {
        let mut app = App::new(Session::new(), None, String::new());
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focused_pane, FocusedPane::Keypad);
        // Row 0 col 0 is "A"
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Right));
        app.handle_key_event(key(KeyCode::Char(' ')));
        assert_eq!(app.session.active_buffer().text(), "A/");
    }

    #[test]
    fn hidden_variables_pane_is_skipped() {
        let mut app = App::new(Session::new(), None, String::new());
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focused_pane, FocusedPane::Input);

        app.handle_key_event(key(KeyCode::F(7)));
        app.handle_key_event(key(KeyCode::BackTab));
        assert_eq!(app.focused_pane, FocusedPane::Variables);
        type_text(&mut app, "2x");
        assert_eq!(app.session.variables().get(VarKey::A), "2x");
    }

    #[test]
    fn trig_keys_only_apply_on_trig_tab() {
        let mut app = App::new(Session::new(), None, String::new());
        app.handle_key_event(key(KeyCode::F(4)));
        assert_eq!(app.session.trig_mode(), TrigMode::Angle);

        app.handle_key_event(key(KeyCode::F(3)));
        app.handle_key_event(key(KeyCode::F(5)));
        assert!(app.session.is_radians());
        app.handle_key_event(key(KeyCode::F(4)));
        assert_eq!(app.session.trig_mode(), TrigMode::Func);
        app.handle_key_event(key(KeyCode::F(6)));
        assert_eq!(app.session.quadrant().number(), 2);
    }

    #[test]
    fn chart_without_result_stays_on_main() {
        let mut app = App::new(Session::new(), None, String::new());
        app.handle_key_event(key(KeyCode::F(8)));
        assert_eq!(app.screen, Screen::Main);
    }

    #[test]
    fn standalone_chart_quits_on_escape() {
        let mut app = App::standalone_chart(ViewDescriptor::new(30.0, None));
        app.handle_key_event(key(KeyCode::Char('x')));
        assert!(!app.should_quit);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
