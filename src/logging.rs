//! Log output, through `env_logger`.
//!
//! Records go to standard error. Diagnostics meant for the user are written
//! separately by the dispatcher and do not go through here.

use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Environment variable holding the log filter when `--log` is not given.
pub const LOG_ENV: &str = "MYSH_LOG";

fn builder(level: Option<LevelFilter>) -> Builder {
    let mut builder = match level {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::new().filter_or(LOG_ENV, "off")),
    };
    builder.format_timestamp(None);
    builder
}

/// Installs the global logger.
///
/// `level` comes from the command line and wins over `MYSH_LOG`; with neither,
/// logging is off. Fails if a logger has already been installed in this process.
pub fn init(level: Option<LevelFilter>) -> Result<(), SetLoggerError> {
    builder(level).try_init()
}
