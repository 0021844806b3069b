//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use solvetty::editor::VarKey;
use solvetty::solver::TrigFunc;

#[derive(Parser)]
#[command(
    name = "solvetty",
    version,
    about = "Keypad calculator for algebra, equations and trigonometry",
    long_about = "Keypad calculator for algebra, equations and trigonometry.\n\n\
                  Input is edited locally; solving happens on a remote service\n\
                  reached over HTTP (see --api-url)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Base URL of the solving service (overrides the settings file).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to a file (interactive sessions log nowhere otherwise).
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive keypad (default).
    Tui,

    /// Solve one input and print the result.
    Solve(SolveArgs),

    /// Show the full-screen unit-circle diagram for a chart view.
    Chart(ChartArgs),

    /// Show the settings file location and effective settings.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct SolveArgs {
    /// What kind of problem INPUT is.
    #[arg(value_enum)]
    pub kind: SolveKind,

    /// Expression, equation, angle or known function value.
    pub input: String,

    /// Variable bank entry, e.g. `--var A=2`. May be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub vars: Vec<(VarKey, String)>,

    /// Read the angle as radians (angle only).
    #[arg(long)]
    pub radians: bool,

    /// Known function (func only).
    #[arg(long, value_enum, default_value = "sin")]
    pub func: FuncArg,

    /// Quadrant of the angle (func only).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub quadrant: u8,

    /// Print the raw result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Chart view URL or query (`?mode=chart&angle=..&coords=..`).
    #[arg(long, conflicts_with_all = ["angle", "coords"])]
    pub url: Option<String>,

    /// Angle in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Coordinate label (LaTeX).
    #[arg(long)]
    pub coords: Option<String>,

    /// Print the view URL instead of opening the diagram.
    #[arg(long)]
    pub print_url: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file.
    #[arg(long)]
    pub write_defaults: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SolveKind {
    Algebra,
    Equation,
    Angle,
    Func,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FuncArg {
    Sin,
    Cos,
    Tan,
}

impl From<FuncArg> for TrigFunc {
    fn from(arg: FuncArg) -> Self {
        match arg {
            FuncArg::Sin => TrigFunc::Sin,
            FuncArg::Cos => TrigFunc::Cos,
            FuncArg::Tan => TrigFunc::Tan,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse `A=value`
pub fn parse_assignment(s: &str) -> Result<(VarKey, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.parse()?, value.to_string()))
}
