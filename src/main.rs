//! The main entry point for the `caption-edit` command-line application.
//!
//! This file parses command-line arguments, sets up diagnostics, and hands the
//! resulting settings to the `caption_edit` library.

use caption_edit::cli;
use caption_edit::errors::Result;
use caption_edit::report::RunContext;
use caption_edit::session;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse_args();
    let logging = init_tracing(args.verbose);

    let config = args.load_config()?;
    let settings = args.into_settings(config)?;

    // Stamped once; every log written by this run shares the name.
    let ctx = RunContext::new(&settings.log_dir);

    // No progress bar while log lines go to stderr.
    session::run_edit(settings, ctx, !logging)?;
    Ok(())
}

/// Installs a stderr subscriber when `--verbose` or `RUST_LOG` asks for output.
///
/// Returns `true` if a subscriber was installed.
fn init_tracing(verbose: bool) -> bool {
    let filter = if verbose {
        EnvFilter::new("caption_edit=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return false,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    true
}
