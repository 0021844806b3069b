// Session transitions: submission, completion, staleness and field resets

use solvetty::editor::{EditCommand, VarKey};
use solvetty::session::{Action, Effect, Outcome, Session};
use solvetty::solver::response::ExpressionResult;
use solvetty::solver::{
    Completion, SolveError, SolveReply, SolveRequest, SolveResult, Tab, Ticket, TrigMode,
};

fn expression(final_latex: &str) -> SolveResult {
    SolveResult::Expression(ExpressionResult {
        original_latex: "x".into(),
        final_latex: final_latex.into(),
        kind: "simplify".into(),
        benchmarks: None,
    })
}

fn submit(session: &mut Session, input: &str) -> Ticket {
    session.apply(Action::Edit(EditCommand::ClearAll));
    session.apply(Action::Edit(EditCommand::Insert(input.into())));
    match session.apply(Action::Submit) {
        Effect::Dispatch(ticket) => ticket,
        Effect::None => panic!("expected a dispatch for {input:?}"),
    }
}

fn solved(ticket: &Ticket, result: SolveResult) -> Action {
    Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Solved(result)),
    })
}

#[test]
fn submit_substitutes_variables() {
    let mut session = Session::new();
    session.apply(Action::SetVariable(VarKey::A, "2".into()));
    session.apply(Action::SetVariable(VarKey::C, "x".into()));

    let ticket = submit(&mut session, "A+B+C");
    assert_eq!(
        ticket.request,
        SolveRequest::Algebra {
            expression: "(2)+B+(x)".into()
        }
    );
    assert!(session.is_loading());
    assert!(session.outcome().is_none());
}

#[test]
fn completion_sets_exactly_one_outcome() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x+x");
    session.apply(solved(&ticket, expression("2 x")));
    assert!(session.result().is_some());
    assert!(session.error().is_none());
    assert!(!session.is_loading());

    let ticket = submit(&mut session, "x/0");
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Rejected("Input Error: division by zero".into())),
    }));
    assert!(session.result().is_none());
    assert_eq!(session.error(), Some("Input Error: division by zero"));
}

#[test]
fn transport_failure_is_prefixed() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x^");
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Err(SolveError::Status {
            status: 422,
            detail: Some("Invalid expression".into()),
        }),
    }));
    assert_eq!(session.error(), Some("SERVER_ERROR: Invalid expression"));
}

#[test]
fn stale_completion_is_discarded() {
    let mut session = Session::new();
    let first = submit(&mut session, "1+1");
    let second = submit(&mut session, "2+2");
    assert!(second.sequence > first.sequence);

    session.apply(solved(&second, expression("4")));
    let before = session.outcome().cloned();
    session.apply(solved(&first, expression("2")));
    assert_eq!(session.outcome().cloned(), before);
    assert_eq!(
        session.result(),
        Some(&expression("4")),
        "the later submission wins"
    );
}

#[test]
fn completion_after_mode_switch_is_discarded() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x+1");
    session.apply(Action::SelectTab(Tab::Trig));
    assert!(!session.is_loading());

    session.apply(solved(&ticket, expression("x + 1")));
    assert!(session.outcome().is_none());
}

#[test]
fn empty_submit_keeps_previous_outcome() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x");
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Rejected("bad".into())),
    }));

    session.apply(Action::Edit(EditCommand::SelectAll));
    session.apply(Action::Edit(EditCommand::DeleteBackward));
    assert_eq!(session.apply(Action::Submit), Effect::None);
    assert_eq!(session.error(), Some("bad"));
    assert!(!session.is_loading());
}

#[test]
fn clear_all_discards_result_but_keeps_error() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x");
    session.apply(solved(&ticket, expression("x")));
    session.apply(Action::Edit(EditCommand::ClearAll));
    assert!(session.outcome().is_none());
    assert!(session.active_buffer().is_empty());

    let ticket = submit(&mut session, "x^");
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Rejected("bad".into())),
    }));
    session.apply(Action::Edit(EditCommand::ClearAll));
    assert!(matches!(session.outcome(), Some(Outcome::Failed(_))));
}

#[test]
fn angle_mode_builds_angle_request() {
    let mut session = Session::with_radians(true);
    session.apply(Action::SelectTab(Tab::Trig));
    session.apply(Action::SelectTrigMode(TrigMode::Angle));
    session.apply(Action::SetVariable(VarKey::A, "π".into()));

    let ticket = submit(&mut session, "A/4");
    assert_eq!(
        ticket.request,
        SolveRequest::AnalyzeAngle {
            angle: "(π)/4".into(),
            is_radians: true,
        }
    );
}

#[test]
fn empty_submit_keeps_previous_result() {
    let mut session = Session::new();
    let ticket = submit(&mut session, "x+x");
    session.apply(solved(&ticket, expression("2 x")));

    session.apply(Action::Edit(EditCommand::SelectAll));
    session.apply(Action::Edit(EditCommand::DeleteSelection));
    assert!(session.active_buffer().is_empty());
    assert_eq!(session.apply(Action::Submit), Effect::None);

    assert!(matches!(session.outcome(), Some(Outcome::Solved(_))));
    assert!(!session.is_loading());
}

#[test]
fn empty_trig_value_is_not_submitted() {
    let mut session = Session::new();
    session.apply(Action::SelectTab(Tab::Trig));
    session.apply(Action::SelectTrigMode(TrigMode::Func));
    let ticket = submit(&mut session, "3/5");
    session.apply(solved(&ticket, expression("4/5")));

    session.apply(Action::Edit(EditCommand::SelectAll));
    session.apply(Action::Edit(EditCommand::DeleteSelection));
    assert_eq!(session.build_request(), None);
    assert_eq!(session.apply(Action::Submit), Effect::None);

    assert!(matches!(session.outcome(), Some(Outcome::Solved(_))));
    assert!(!session.is_loading());
}
