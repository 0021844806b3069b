//! SolveTTY: keypad calculator backed by a remote solving service

use std::io::{self, IsTerminal};

use clap::Parser;
use solvetty::config::load_settings;
use solvetty::logging::{init_logging, LogConfig, LogFormat, LogTarget};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_chart, run_config, run_solve, run_tui};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(api_url) = &cli.api_url {
        settings.api_url = api_url.clone();
    }

    let result = match &cli.command {
        None | Some(Command::Tui) => run_tui(&settings).map(|()| 0),
        Some(Command::Solve(args)) => run_solve(args, &settings),
        Some(Command::Chart(args)) => run_chart(args, &settings).map(|()| 0),
        Some(Command::Config(args)) => {
            run_config(args, &settings, cli.config.as_deref()).map(|()| 0)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags.
///
/// The TUI owns the terminal, so interactive commands only log to a file.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let interactive = matches!(
        cli.command,
        None | Some(Command::Tui) | Some(Command::Chart(_))
    );
    let target = match (&cli.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };

    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: target == LogTarget::Stderr && io::stderr().is_terminal(),
        target,
    }
}
