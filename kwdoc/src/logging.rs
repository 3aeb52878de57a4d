//! Tracing subscriber setup.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map `-v` / `-q` flags to a level: warnings by default, `-v` adds progress
/// messages, `-vv` adds debug output, `-q` keeps errors only.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// rendered output.
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
