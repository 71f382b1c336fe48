use crate::builtin::BuiltinTable;
use crate::command::{CommandError, DispatchError, SHELL_NAME, ShouldContinue};
use crate::config::DEFAULT_PROMPT;
use crate::external::ExternalCommand;
use crate::io_adapters::{LineSource, ReadError};
use crate::lexer;
use log::{debug, info};
use std::fmt::Display;
use std::io::{self, Write};
use thiserror::Error;

/// Decides what a token sequence means and carries it out.
///
/// The first token is looked up in the [`BuiltinTable`]; anything else is launched as an
/// external program and waited for. Builtin output goes to `stdout`, diagnostics for
/// failed lines go to `stderr` with a `mysh: ` prefix.
///
/// Example
/// ```
/// use mysh::{Dispatcher, ShouldContinue};
/// let mut sh = Dispatcher::default();
/// let signal = sh.execute(&["exit".to_string()]).unwrap();
/// assert_eq!(signal, ShouldContinue::Stop);
/// ```
pub struct Dispatcher {
    builtins: BuiltinTable,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl Dispatcher {
    /// Create a dispatcher with a custom builtin table and output streams.
    pub fn new(builtins: BuiltinTable, stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        Self {
            builtins,
            stdout,
            stderr,
        }
    }

    /// Runs one command line that has already been tokenized.
    ///
    /// Recoverable failures (bad builtin arguments, `cd` errors, programs that cannot be
    /// started) are reported on the diagnostic stream and yield
    /// [`ShouldContinue::Continue`]. Only failures of the shell itself are returned as
    /// errors.
    pub fn execute(&mut self, tokens: &[String]) -> Result<ShouldContinue, DispatchError> {
        let Some(name) = tokens.first() else {
            return Ok(ShouldContinue::Continue);
        };

        if let Some(builtin) = self.builtins.lookup(name) {
            debug!("builtin {}", builtin.name());
            let result = builtin.invoke(tokens, self.stdout.as_mut());
            self.stdout.flush().map_err(DispatchError::Output)?;
            return match result {
                Ok(signal) => Ok(signal),
                Err(err) => {
                    self.fail(&err)?;
                    Ok(ShouldContinue::Continue)
                }
            };
        }

        self.launch(tokens)
    }

    fn launch(&mut self, tokens: &[String]) -> Result<ShouldContinue, DispatchError> {
        let Some(command) = ExternalCommand::from_tokens(tokens) else {
            return Ok(ShouldContinue::Continue);
        };
        debug!("launching {} with {} argument(s)", command.program(), tokens.len() - 1);
        // Our own buffered output must not end up after the child's.
        self.stdout.flush().map_err(DispatchError::Output)?;

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                self.fail(&err)?;
                return Ok(ShouldContinue::Continue);
            }
        };
        // Whatever the child's status, the loop goes on.
        command.wait(child)?;
        Ok(ShouldContinue::Continue)
    }

    fn fail(&mut self, err: &CommandError) -> Result<(), DispatchError> {
        info!("recovered: {err:?}");
        self.report(err)
    }

    /// Writes a `mysh: `-prefixed diagnostic.
    pub fn report(&mut self, message: &dyn Display) -> Result<(), DispatchError> {
        writeln!(self.stderr, "{SHELL_NAME}: {message}")
            .and_then(|()| self.stderr.flush())
            .map_err(DispatchError::Diagnostics)
    }
}

impl Default for Dispatcher {
    /// The default builtins (`cd`, `exit`) writing to the process's standard streams.
    fn default() -> Self {
        Self::new(
            BuiltinTable::default(),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }
}

/// Why the read loop gave up.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// The read-eval loop: prompt, read a line, tokenize it, dispatch it.
pub struct Shell<S> {
    source: S,
    dispatcher: Dispatcher,
    prompt: String,
}

impl<S: LineSource> Shell<S> {
    pub fn new(source: S, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            dispatcher,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Loops until end of input or until a command asks to stop.
    ///
    /// A line with an unterminated quote is reported and skipped.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while let Some(line) = self.source.read_line(&self.prompt)? {
            let tokens = match lexer::tokenize(&line) {
                Ok(tokens) => tokens,
                Err(err) => {
                    info!("skipping line {line:?}: {err}");
                    self.dispatcher.report(&err)?;
                    continue;
                }
            };
            debug!("tokens {tokens:?}");

            if self.dispatcher.execute(&tokens)? == ShouldContinue::Stop {
                debug!("stop requested");
                return Ok(());
            }
        }
        debug!("end of input");
        Ok(())
    }
}
