//! relup CLI
//!
//! Thin wiring over `relup-core`: parse the flags into a project layout and
//! a build command, pick the terminator, run the pipeline, render the
//! report.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};
use tracing_subscriber::EnvFilter;

use relup_core::invoke::BuildCommand;
use relup_core::layout::ProjectLayout;
use relup_core::output::{write_report_json, write_report_plain};
use relup_core::release::release;
use relup_core::terminate::{NoopTerminator, ProcessTerminator, SystemTerminator};

/// Environment variable consulted for the build command when `--build-cmd`
/// is absent.
const BUILD_CMD_ENV: &str = "RELUP_BUILD_CMD";

/// CLI entrypoint for relup.
#[derive(Debug, Parser)]
#[command(
    name = "relup",
    about = "Prepare a project for release: stop the app, link its config, run the build"
)]
pub struct Cli {
    /// Project root holding the config directory and build outputs
    #[arg(value_hint = ValueHint::DirPath, default_value = ".")]
    root: PathBuf,

    /// Application name (defaults to the project root directory name)
    #[arg(short = 'a', long = "app-name")]
    app_name: Option<String>,

    /// Directory holding <app>.toml, relative to the project root
    #[arg(long = "config-dir", default_value = "config", value_hint = ValueHint::DirPath)]
    config_dir: PathBuf,

    /// Build output directory receiving the config link (repeatable)
    #[arg(short = 'o', long = "out-dir", value_hint = ValueHint::DirPath)]
    out_dirs: Vec<PathBuf>,

    /// Build command line (default: cargo build --release)
    #[arg(long = "build-cmd")]
    build_cmd: Option<String>,

    /// Leave any running instance of the app alone
    #[arg(long = "keep-running", action = ArgAction::SetTrue)]
    keep_running: bool,

    /// Emit the release report as pretty JSON
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "quiet")]
    json: bool,

    /// Suppress the summary; exit status only
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

/// Parse CLI args, initialise logging, and run the release.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    run_release(Cli::parse())
}

fn run_release(cli: Cli) -> Result<()> {
    let mut layout = ProjectLayout::discover(&cli.root)?.with_config_dir(cli.config_dir);
    if let Some(name) = cli.app_name {
        layout = layout.with_app_name(name);
    }
    layout = layout.with_output_dirs(cli.out_dirs);

    let build = match build_command_line(cli.build_cmd.as_deref()) {
        Some(line) => BuildCommand::parse(&line, layout.root())?,
        None => BuildCommand::cargo_release(layout.root()),
    };

    let terminator: Box<dyn ProcessTerminator> = if cli.keep_running {
        Box::new(NoopTerminator)
    } else {
        Box::new(SystemTerminator)
    };

    let report = release(&layout, terminator.as_ref(), &build)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        write_report_json(&report, &mut handle)?;
    } else if !cli.quiet {
        write_report_plain(&report, &mut handle)?;
    }

    Ok(())
}

/// The `--build-cmd` flag wins over the environment override.
fn build_command_line(flag: Option<&str>) -> Option<String> {
    flag.map(str::to_owned)
        .or_else(|| env::var(BUILD_CMD_ENV).ok())
}
