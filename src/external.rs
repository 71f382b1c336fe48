use crate::command::{CommandError, DispatchError};
use log::debug;
use std::fmt;
use std::io;
use std::process::{Child, Command, ExitStatus};

/// Command that is not a builtin.
///
/// The program name is looked up through `PATH` by the OS, and the child inherits
/// the shell's standard streams, environment and working directory.
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Builds the command from a token sequence; `tokens[0]` is the program name.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_tokens(tokens: &[String]) -> Option<Self> {
        let (program, args) = tokens.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Creates the child process.
    ///
    /// A missing or non-executable program is reported as [`CommandError::Exec`],
    /// any other failure to create the process as [`CommandError::Spawn`].
    pub fn spawn(&self) -> Result<Child, CommandError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => CommandError::Exec {
                    program: self.program.clone(),
                    source,
                },
                _ => CommandError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;
        debug!("spawned {} as pid {}", self.program, child.id());
        Ok(child)
    }

    /// Blocks until `child` has terminated and reaps it.
    ///
    /// The underlying `waitpid` is not asked to report stopped children, so a child
    /// that is stopped and later continued keeps the shell waiting.
    pub fn wait(&self, mut child: Child) -> Result<Termination, DispatchError> {
        let status = child.wait().map_err(|source| DispatchError::Wait {
            program: self.program.clone(),
            source,
        })?;
        let termination = Termination::from(status);
        debug!("{} {}", self.program, termination);
        Ok(termination)
    }
}

/// How a reaped child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Termination::Exited(code),
            None => terminated_by_signal(status),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exited with status {code}"),
            Termination::Signaled(signal) => write!(f, "killed by signal {signal}"),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    Termination::Signaled(status.signal().unwrap_or(-1))
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> Termination {
    Termination::Signaled(-1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::builtin::tests::tokens;

    fn run(words: &[&str]) -> Termination {
        let cmd = ExternalCommand::from_tokens(&tokens(words)).unwrap();
        let child = cmd.spawn().expect("spawn");
        cmd.wait(child).expect("wait")
    }

    #[test]
    fn test_from_tokens_splits_program_and_args() {
        let cmd = ExternalCommand::from_tokens(&tokens(&["ls", "-la", "/tmp"])).unwrap();
        assert_eq!(cmd.program(), "ls");
        assert_eq!(cmd.args, vec!["-la", "/tmp"]);
        assert!(ExternalCommand::from_tokens(&[]).is_none());
    }

    #[test]
    fn test_exit_codes_are_reported() {
        assert_eq!(run(&["true"]), Termination::Exited(0));
        assert_eq!(run(&["false"]), Termination::Exited(1));
        assert_eq!(run(&["sh", "-c", "exit 7"]), Termination::Exited(7));
    }

    #[test]
    fn test_signal_termination_is_reported() {
        assert_eq!(run(&["sh", "-c", "kill -9 $$"]), Termination::Signaled(9));
    }

    #[test]
    fn test_arguments_reach_child_verbatim() {
        // sh -c 'script' argv0 arg1: "$1" is the token that contains a space.
        let t = run(&["sh", "-c", "test \"$1\" = 'a b'", "sh", "a b"]);
        assert_eq!(t, Termination::Exited(0));
    }

    #[test]
    fn test_missing_program_is_exec_error() {
        let cmd = ExternalCommand::from_tokens(&tokens(&["nonexistent-binary-xyz"])).unwrap();
        match cmd.spawn() {
            Err(CommandError::Exec { program, source }) => {
                assert_eq!(program, "nonexistent-binary-xyz");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected exec error, got {:?}", other.map(|c| c.id())),
        }
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::Exited(3).to_string(), "exited with status 3");
        assert_eq!(Termination::Signaled(15).to_string(), "killed by signal 15");
    }
}
