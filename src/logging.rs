//! Tracing subscriber setup for the CLI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. With `log_file` the lines are
/// appended to that file (parent directories are created) without ANSI
/// colors; otherwise they go to stderr.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if verbose {
        "harvestapi=debug,harvest=debug,info"
    } else {
        "harvestapi=info,harvest=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .compact(),
                )
                .init();
        }
    }
    Ok(())
}
