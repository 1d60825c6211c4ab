//! snapring - rotate a ring of numbered camera snapshots.
//!
//! Provides both human-friendly and robot (JSON) interfaces.
#![forbid(unsafe_code)]

use std::io;

use clap::Parser;
use tracing::debug;

use snapring::cli::{Cli, Commands, RotateArgs};
use snapring::error::Result;
use snapring::logging::init_logging;
use snapring::output::{Output, OutputMode, VersionInfo};
use snapring::ring::SlotRing;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version are not errors.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let output = OutputMode::from_cli(&cli).into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &dyn Output) -> Result<()> {
    let ring = SlotRing::new(&cli.dir);
    debug!(dir = %ring.dir().display(), command = ?cli.command, "Dispatching");

    match &cli.command {
        None => cmd_rotate(&ring, &RotateArgs::default(), output),
        Some(Commands::Rotate(args)) => cmd_rotate(&ring, args, output),
        Some(Commands::Status) => cmd_status(&ring, output),
        Some(Commands::Version) => {
            cmd_version(output);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            use clap::CommandFactory;
            clap_complete::generate(args.shell, &mut Cli::command(), "snapring", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_rotate(ring: &SlotRing, args: &RotateArgs, output: &dyn Output) -> Result<()> {
    let plan = ring.plan()?;
    if args.dry_run {
        output.planned(ring, &plan);
        return Ok(());
    }
    let report = plan.apply(ring)?;
    output.rotated(ring, &report);
    Ok(())
}

fn cmd_status(ring: &SlotRing, output: &dyn Output) -> Result<()> {
    let slots = ring.status()?;
    output.slot_status(ring, &slots);
    Ok(())
}

fn cmd_version(output: &dyn Output) {
    output.version_info(&VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty() == "true",
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    });
}
