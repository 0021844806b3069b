//! Calculator session: all UI-independent state and its transitions
//!
//! [`Session::apply`] is the only way state changes. It returns an [`Effect`]
//! when the outside world has to do something (send a request); the caller
//! performs it and feeds the answer back as [`Action::Complete`].

use tracing::{debug, info};

use crate::chart::ViewDescriptor;
use crate::editor::{substitute, EditCommand, InputBuffer, VarKey, VariableBank};
use crate::solver::{Completion, Quadrant, SolveReply, SolveRequest, SolveResult, Tab, Ticket};
use crate::solver::{TrigFunc, TrigMode};

/// Which field receives edits for the current tab/mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Expression,
    Angle,
    TrigValue,
}

/// What the last completed submission produced. Never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Solved(SolveResult),
    Failed(String),
}

#[derive(Debug)]
pub enum Action {
    /// Edit the active field
    Edit(EditCommand),
    /// Edit one variable bank entry
    EditVariable(VarKey, EditCommand),
    SetVariable(VarKey, String),
    SelectTab(Tab),
    SelectTrigMode(TrigMode),
    SetRadians(bool),
    SetTrigFunc(TrigFunc),
    SetQuadrant(Quadrant),
    Submit,
    Complete(Completion),
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Dispatch(Ticket),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    tab: Tab,
    trig_mode: TrigMode,
    expression: InputBuffer,
    angle: InputBuffer,
    trig_value: InputBuffer,
    is_radians: bool,
    trig_func: TrigFunc,
    quadrant: Quadrant,
    variables: VariableBank,
    outcome: Option<Outcome>,
    /// Last sequence number handed out
    sequence: u64,
    /// Sequence number whose completion is still wanted
    pending: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with angles interpreted as radians
    pub fn with_radians(is_radians: bool) -> Self {
        Session {
            is_radians,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::Edit(command) => {
                if command == EditCommand::ClearAll {
                    self.discard_result();
                }
                self.active_buffer_mut().apply(&command);
            }
            Action::EditVariable(key, command) => {
                self.variables.buffer_mut(key).apply(&command);
            }
            Action::SetVariable(key, value) => self.variables.set(key, value),
            Action::SelectTab(tab) => {
                if tab != self.tab {
                    self.tab = tab;
                    self.reset_mode();
                }
            }
            Action::SelectTrigMode(mode) => {
                if mode != self.trig_mode {
                    self.trig_mode = mode;
                    self.reset_mode();
                }
            }
            Action::SetRadians(is_radians) => self.is_radians = is_radians,
            Action::SetTrigFunc(func) => self.trig_func = func,
            Action::SetQuadrant(quadrant) => self.quadrant = quadrant,
            Action::Submit => return self.submit(),
            Action::Complete(completion) => self.complete(completion),
        }
        Effect::None
    }

    /// The request the current fields describe, or `None` when the active
    /// field is empty
    pub fn build_request(&self) -> Option<SolveRequest> {
        let raw = self.active_buffer().text();
        if raw.is_empty() {
            return None;
        }
        let processed = substitute(raw, &self.variables);
        let request = match (self.tab, self.trig_mode) {
            (Tab::Algebra, _) => SolveRequest::Algebra {
                expression: processed,
            },
            (Tab::Equation, _) => SolveRequest::Equation {
                expression: processed,
            },
            (Tab::Trig, TrigMode::Angle) => SolveRequest::AnalyzeAngle {
                angle: processed,
                is_radians: self.is_radians,
            },
            (Tab::Trig, TrigMode::Func) => SolveRequest::TrigFunctions {
                func: self.trig_func,
                value: processed,
                quadrant: self.quadrant,
            },
        };
        Some(request)
    }

    fn submit(&mut self) -> Effect {
        let Some(request) = self.build_request() else {
            debug!("active field is empty, nothing to submit");
            return Effect::None;
        };
        self.outcome = None;
        self.sequence += 1;
        self.pending = Some(self.sequence);
        info!(sequence = self.sequence, endpoint = ?request.endpoint(), "solve submitted");
        Effect::Dispatch(Ticket {
            sequence: self.sequence,
            request,
        })
    }

    fn complete(&mut self, completion: Completion) {
        if self.pending != Some(completion.sequence) {
            debug!(
                sequence = completion.sequence,
                pending = ?self.pending,
                "discarding stale completion"
            );
            return;
        }
        self.pending = None;
        let outcome = match completion.reply {
            Ok(SolveReply::Solved(result)) => Outcome::Solved(result),
            Ok(SolveReply::Rejected(message)) => Outcome::Failed(message),
            Err(e) => Outcome::Failed(e.user_message()),
        };
        info!(
            sequence = completion.sequence,
            solved = matches!(outcome, Outcome::Solved(_)),
            "solve completed"
        );
        self.outcome = Some(outcome);
    }

    fn reset_mode(&mut self) {
        self.expression.clear();
        self.angle.clear();
        self.trig_value.clear();
        self.outcome = None;
        self.pending = None;
    }

    fn discard_result(&mut self) {
        if matches!(self.outcome, Some(Outcome::Solved(_))) {
            self.outcome = None;
        }
    }

    pub fn active_field(&self) -> Field {
        match (self.tab, self.trig_mode) {
            (Tab::Trig, TrigMode::Angle) => Field::Angle,
            (Tab::Trig, TrigMode::Func) => Field::TrigValue,
            _ => Field::Expression,
        }
    }

    pub fn active_buffer(&self) -> &InputBuffer {
        match self.active_field() {
            Field::Expression => &self.expression,
            Field::Angle => &self.angle,
            Field::TrigValue => &self.trig_value,
        }
    }

    fn active_buffer_mut(&mut self) -> &mut InputBuffer {
        match self.active_field() {
            Field::Expression => &mut self.expression,
            Field::Angle => &mut self.angle,
            Field::TrigValue => &mut self.trig_value,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn trig_mode(&self) -> TrigMode {
        self.trig_mode
    }

    pub fn is_radians(&self) -> bool {
        self.is_radians
    }

    pub fn trig_func(&self) -> TrigFunc {
        self.trig_func
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn variables(&self) -> &VariableBank {
        &self.variables
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&SolveResult> {
        match &self.outcome {
            Some(Outcome::Solved(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failed(message)) => Some(message),
            _ => None,
        }
    }

    /// A submission is in flight
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn chart_view(&self) -> Option<ViewDescriptor> {
        self.result().and_then(SolveResult::chart_view)
    }
}
