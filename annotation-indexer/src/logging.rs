//! Tracing subscriber setup.

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::IndexingError;

/// Install the global subscriber. `RUST_LOG` overrides the level implied by
/// `--trace` / `--progress`; `--log-file` truncates the file and writes to
/// it without colours.
pub fn init_tracing(cli: &Cli) -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = Arc::new(File::create(path)?);
            if cli.log_json {
                builder.json().with_writer(file).init();
            } else {
                builder.with_ansi(false).with_writer(file).init();
            }
        }
        None if cli.log_json => builder.json().with_writer(std::io::stderr).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
