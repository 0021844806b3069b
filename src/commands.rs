use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, info_span};

use solvetty::chart::ViewDescriptor;
use solvetty::config::{save_settings, settings_path, Settings};
use solvetty::editor::EditCommand;
use solvetty::latex::PlainTypesetter;
use solvetty::render;
use solvetty::session::{Action, Effect, Outcome, Session};
use solvetty::solver::{
    Completion, Dispatcher, HttpTransport, Quadrant, SolveTransport, Tab, TrigMode,
};
use solvetty::ui::App;

use crate::cli::{ChartArgs, ConfigArgs, SolveArgs, SolveKind};

pub fn run_tui(settings: &Settings) -> Result<()> {
    let transport = HttpTransport::new(&settings.api_url, settings.request_timeout())
        .context("build HTTP client")?;
    info!(api_url = transport.base_url(), "starting interactive session");

    let dispatcher = Dispatcher::new(Arc::new(transport));
    let session = Session::with_radians(settings.default_radians);
    let mut app = App::new(session, Some(dispatcher), settings.chart_origin.clone());
    run_app(&mut app)
}

/// Solve one input through the same session pipeline as the TUI.
///
/// Returns the process exit code: 0 when solved, 1 when the service failed
/// or rejected the input.
pub fn run_solve(args: &SolveArgs, settings: &Settings) -> Result<i32> {
    let span = info_span!("solve", kind = ?args.kind);
    let _guard = span.enter();

    let mut session = solve_session(args, settings)?;
    let Effect::Dispatch(ticket) = session.apply(Action::Submit) else {
        bail!("nothing to solve: INPUT is empty");
    };

    let transport = HttpTransport::new(&settings.api_url, settings.request_timeout())
        .context("build HTTP client")?;
    let reply = transport.post(&ticket.request);
    session.apply(Action::Complete(Completion {
        sequence: ticket.sequence,
        reply,
    }));

    match session.outcome() {
        Some(Outcome::Solved(result)) => {
            if args.json {
                let json = serde_json::to_string_pretty(result).context("serialize result")?;
                println!("{json}");
            } else {
                for fragment in render::fragments(result, &PlainTypesetter) {
                    println!("{fragment}");
                }
            }
            Ok(0)
        }
        Some(Outcome::Failed(message)) => {
            eprintln!("{message}");
            Ok(1)
        }
        None => bail!("request finished without an outcome"),
    }
}

/// Session with INPUT in the field `args.kind` selects.
///
/// Angles are radians when `--radians` is passed or the settings default to them.
fn solve_session(args: &SolveArgs, settings: &Settings) -> Result<Session> {
    let mut session = Session::with_radians(args.radians || settings.default_radians);
    let (tab, mode) = match args.kind {
        SolveKind::Algebra => (Tab::Algebra, None),
        SolveKind::Equation => (Tab::Equation, None),
        SolveKind::Angle => (Tab::Trig, Some(TrigMode::Angle)),
        SolveKind::Func => (Tab::Trig, Some(TrigMode::Func)),
    };
    session.apply(Action::SelectTab(tab));
    if let Some(mode) = mode {
        session.apply(Action::SelectTrigMode(mode));
    }
    session.apply(Action::SetTrigFunc(args.func.into()));
    let quadrant = Quadrant::new(args.quadrant).context("quadrant must be 1 through 4")?;
    session.apply(Action::SetQuadrant(quadrant));
    for (key, value) in &args.vars {
        session.apply(Action::SetVariable(*key, value.clone()));
    }
    session.apply(Action::Edit(EditCommand::Insert(args.input.clone())));
    Ok(session)
}

pub fn run_chart(args: &ChartArgs, settings: &Settings) -> Result<()> {
    let view = match (&args.url, args.angle) {
        (Some(url), _) => {
            ViewDescriptor::from_url(url).with_context(|| format!("read chart view '{url}'"))?
        }
        (None, Some(angle)) => ViewDescriptor::new(angle, args.coords.clone()),
        (None, None) => bail!("pass either --url or --angle"),
    };

    if args.print_url {
        let url = view
            .to_url(&settings.chart_origin)
            .context("encode chart view")?;
        println!("{url}");
        return Ok(());
    }

    let mut app = App::standalone_chart(view);
    run_app(&mut app)
}

pub fn run_config(args: &ConfigArgs, settings: &Settings, config: Option<&Path>) -> Result<()> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => settings_path().context("could not determine the settings directory")?,
    };

    println!("# {}", path.display());
    print!(
        "{}",
        toml::to_string_pretty(settings).context("serialize settings")?
    );

    if args.write_defaults {
        let written = save_settings(settings, Some(&path))?;
        println!("# wrote {}", written.display());
    }
    Ok(())
}

/// Take over the terminal, run the app, and restore the terminal even when
/// the app fails.
fn run_app(app: &mut App) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use solvetty::solver::SolveRequest;

    fn solve_args(argv: &[&str]) -> SolveArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected solve");
        };
        args
    }

    #[test]
    fn angle_follows_the_radians_setting() {
        let args = solve_args(&["solvetty", "solve", "angle", "π/3"]);
        let settings = Settings {
            default_radians: true,
            ..Settings::default()
        };

        let session = solve_session(&args, &settings).unwrap();
        assert_eq!(
            session.build_request(),
            Some(SolveRequest::AnalyzeAngle {
                angle: "π/3".into(),
                is_radians: true,
            })
        );
    }

    #[test]
    fn angle_defaults_to_degrees_without_flag_or_setting() {
        let args = solve_args(&["solvetty", "solve", "angle", "30"]);
        let session = solve_session(&args, &Settings::default()).unwrap();
        assert!(!session.is_radians());

        let args = solve_args(&["solvetty", "solve", "angle", "30", "--radians"]);
        let session = solve_session(&args, &Settings::default()).unwrap();
        assert!(session.is_radians());
    }
}
