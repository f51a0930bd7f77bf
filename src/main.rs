use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

/// fslengine runs FSL scripts. Files are processed left to right and share
/// one environment, so later scripts see what earlier ones defined.
#[derive(Parser, Debug)]
#[command(name = "fslengine", version, about, long_about = None)]
struct Args {
    /// Log evaluation to stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Script files to run.
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    if args.files.is_empty() {
        println!("{}", Args::command().render_help());
        return ExitCode::SUCCESS;
    }

    match run(&args.files) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(files: &[PathBuf]) -> anyhow::Result<()> {
    fsl::engine::run(files).context("aborting execution")
}

fn install_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::new(format!("fsl={level}"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
