use std::io;
use thiserror::Error;

/// Name printed in front of every diagnostic.
pub const SHELL_NAME: &str = "mysh";

/// What the read loop should do after a command has been dispatched.
///
/// Builtins decide this themselves; external programs always yield [`Continue`],
/// whatever their exit status was.
///
/// [`Continue`]: ShouldContinue::Continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShouldContinue {
    /// Read the next line.
    Continue,
    /// Leave the loop.
    Stop,
}

/// A failure confined to the current line.
///
/// The dispatcher writes these to the diagnostic stream, prefixed with [`SHELL_NAME`],
/// and then carries on with the next line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("expected argument to \"{0}\"")]
    MissingArgument(&'static str),

    /// The builtin's argument parser refused the arguments.
    #[error("{command}: {message}")]
    InvalidArguments {
        command: &'static str,
        message: String,
    },

    #[error("cd: {path}: {source}")]
    ChangeDirectory { path: String, source: io::Error },

    /// The program could not be found or is not executable.
    #[error("{program}: {source}")]
    Exec { program: String, source: io::Error },

    /// The OS refused to create a process at all.
    #[error("failed to create process for {program}: {source}")]
    Spawn { program: String, source: io::Error },

    /// A builtin could not write its own output.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// A failure that ends the read loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("cannot write diagnostics: {0}")]
    Diagnostics(#[source] io::Error),

    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),

    #[error("failed to wait for {program}: {source}")]
    Wait { program: String, source: io::Error },
}
