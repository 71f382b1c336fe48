use crate::command::{CommandError, ShouldContinue};
use argh::{EarlyExit, FromArgs};
use log::debug;
use std::env;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command. `stdout` receives anything the command prints.
    fn execute(self, stdout: &mut dyn Write) -> Result<ShouldContinue, CommandError>;

    /// Arguments as handed to `argh`, command name excluded.
    fn argh_args<'a>(args: &[&'a str]) -> Vec<&'a str> {
        args.to_vec()
    }

    /// Called instead of [`execute`](Self::execute) when `argh` stops early, either
    /// because `--help` was asked for or because the arguments were rejected.
    fn early_exit(
        early: EarlyExit,
        stdout: &mut dyn Write,
    ) -> Result<ShouldContinue, CommandError> {
        match early.status {
            Ok(()) => {
                stdout.write_all(early.output.as_bytes())?;
                Ok(ShouldContinue::Continue)
            }
            Err(()) => Err(CommandError::InvalidArguments {
                command: Self::name(),
                message: early.output.trim_end().to_string(),
            }),
        }
    }
}

/// Handler signature stored in the builtin table.
///
/// Receives the whole token sequence, command name included.
pub type Handler = fn(&[String], &mut dyn Write) -> Result<ShouldContinue, CommandError>;

/// One entry of the builtin table.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    handler: Handler,
}

impl Builtin {
    pub fn new(name: &'static str, handler: Handler) -> Self {
        Self { name, handler }
    }

    pub(crate) fn of<T: BuiltinCommand>() -> Self {
        Self::new(T::name(), run::<T>)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn invoke(
        &self,
        tokens: &[String],
        stdout: &mut dyn Write,
    ) -> Result<ShouldContinue, CommandError> {
        (self.handler)(tokens, stdout)
    }
}

fn run<T: BuiltinCommand>(
    tokens: &[String],
    stdout: &mut dyn Write,
) -> Result<ShouldContinue, CommandError> {
    let args: Vec<&str> = tokens
        .get(1..)
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();
    match T::from_args(&[T::name()], &T::argh_args(&args)) {
        Ok(cmd) => cmd.execute(stdout),
        Err(early) => T::early_exit(early, stdout),
    }
}

/// Ordered list of builtins. Lookup is by exact name and the first match wins.
///
/// The table is built once and never changes afterwards.
pub struct BuiltinTable {
    entries: Vec<Builtin>,
}

impl BuiltinTable {
    pub fn new(entries: Vec<Builtin>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<Builtin> {
        self.entries.iter().find(|b| b.name == name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name)
    }
}

impl Default for BuiltinTable {
    /// `cd` then `exit`.
    fn default() -> Self {
        Self::new(vec![Builtin::of::<Cd>(), Builtin::of::<Exit>()])
    }
}

#[derive(FromArgs)]
/// Change the current working directory of the shell.
/// The new directory is inherited by every command started afterwards.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    // Only a lone `--help` asks for usage. Anything else is a path, even `help` or
    // `-dir`, so option parsing ends before the first argument.
    fn argh_args<'a>(args: &[&'a str]) -> Vec<&'a str> {
        match args {
            ["--help"] | ["--", ..] => args.to_vec(),
            _ => std::iter::once("--").chain(args.iter().copied()).collect(),
        }
    }

    fn execute(self, _stdout: &mut dyn Write) -> Result<ShouldContinue, CommandError> {
        let Some(target) = self.target else {
            return Err(CommandError::MissingArgument(Self::name()));
        };
        // The working directory is process-wide; children spawned later start here.
        env::set_current_dir(&target)
            .map_err(|source| CommandError::ChangeDirectory { path: target, source })?;
        debug!("cd: working directory is now {:?}", env::current_dir().ok());
        Ok(ShouldContinue::Continue)
    }
}

#[derive(FromArgs)]
/// Exit the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write) -> Result<ShouldContinue, CommandError> {
        Ok(ShouldContinue::Stop)
    }

    // Arguments are never looked at, not even to reject them.
    fn early_exit(
        _early: EarlyExit,
        _stdout: &mut dyn Write,
    ) -> Result<ShouldContinue, CommandError> {
        Ok(ShouldContinue::Stop)
    }
}
