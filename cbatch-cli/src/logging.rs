// Logging setup
// Installs a tracing subscriber for the chosen output

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the defaults (`warn`, or `debug` with `--verbose`).
/// The terminal UI owns stderr, so it only logs when a file is given.
pub fn init(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None if interactive => return Ok(()),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .compact()
            .try_init(),
    };

    installed.map_err(|e| eyre!("failed to initialise logging: {}", e))
}
