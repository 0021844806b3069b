// TUI smoke tests on ratatui's TestBackend

use ratatui::{backend::TestBackend, Terminal};
use solvetty::chart::ViewDescriptor;
use solvetty::editor::EditCommand;
use solvetty::session::{Action, Effect, Session};
use solvetty::solver::response::AngleAnalysis;
use solvetty::solver::{Completion, SolveReply, SolveResult, Tab};
use solvetty::ui::App;

/// Draw one frame and return it as one string per row
fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

fn solved_angle_session() -> Session {
    let mut session = Session::new();
    session.apply(Action::SelectTab(Tab::Trig));
    session.apply(Action::Edit(EditCommand::Insert("480".into())));
    let Effect::Dispatch(ticket) = session.apply(Action::Submit) else {
        panic!("expected a dispatch");
    };
    let result = SolveResult::AngleAnalysis(AngleAnalysis {
        base_deg: 120.0,
        base_rad: "\\frac{2\\pi}{3}".into(),
        neg_deg: -240.0,
        extra_pos: None,
        extra_neg: None,
        quadrant: "II".into(),
        input_interpretation: None,
        coords_latex: Some("\\left( - \\frac{1}{2}, \\frac{\\sqrt{3}}{2} \\right)".into()),
        benchmarks: None,
    });
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Solved(result)),
    }));
    session
}

#[test]
fn main_screen_shows_tabs_input_and_keypad() {
    let mut session = Session::new();
    session.apply(Action::Edit(EditCommand::Insert("x^2-1".into())));
    let mut app = App::new(session, None, String::new());

    let rows = draw(&mut app, 120, 40);
    assert!(contains(&rows, "ANALYSIS"));
    assert!(contains(&rows, "Expression"));
    assert!(contains(&rows, "x^2-1"));
    assert!(contains(&rows, "EXECUTE"));
    assert!(contains(&rows, "READY"));
}

#[test]
fn angle_result_is_listed_with_preview() {
    let mut app = App::new(solved_angle_session(), None, String::new());

    let rows = draw(&mut app, 120, 40);
    assert!(contains(&rows, "Quadrant: II"));
    assert!(contains(&rows, "Pos: 120°"));
    assert!(contains(&rows, "Unit Circle"));
}

#[test]
fn error_is_shown_in_place_of_result() {
    let mut session = Session::new();
    session.apply(Action::Edit(EditCommand::Insert("x/".into())));
    let Effect::Dispatch(ticket) = session.apply(Action::Submit) else {
        panic!("expected a dispatch");
    };
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply: Ok(SolveReply::Rejected("Input Error: unexpected end".into())),
    }));
    let mut app = App::new(session, None, String::new());

    let rows = draw(&mut app, 120, 40);
    assert!(contains(&rows, "ERROR Input Error: unexpected end"));
}

#[test]
fn full_screen_chart_shows_label() {
    let view = ViewDescriptor::new(90.0, Some("\\left(0, 1\\right)".into()));
    let mut app = App::standalone_chart(view);

    let rows = draw(&mut app, 100, 30);
    assert!(contains(&rows, "θ = 90°"));
    assert!(contains(&rows, "P (0, 1)"));
    assert!(contains(&rows, "CHART"));
}

#[test]
fn chart_without_label_shows_angle_only() {
    let mut app = App::standalone_chart(ViewDescriptor::from_url("?mode=chart&angle=45").unwrap());

    let rows = draw(&mut app, 100, 30);
    assert!(contains(&rows, "θ = 45°"));
    assert!(!contains(&rows, "P ("));
}
