//! A minimal interactive command shell.
//!
//! A line is split into arguments by [`tokenize`], honoring `'...'` and `"..."` spans,
//! and handed to a [`Dispatcher`]. The dispatcher runs the `cd` and `exit` builtins
//! in-process and launches everything else as a child process, waiting for it to
//! terminate before the next prompt. [`Shell`] ties a [`LineSource`] and a dispatcher
//! together into the read-eval loop.
//!
//! There are no pipelines, redirections, background jobs, variable expansion or
//! globbing.

pub mod builtin;
pub mod command;
pub mod config;
mod external;
mod interpreter;
pub mod io_adapters;
mod lexer;
pub mod logging;

pub use command::{CommandError, DispatchError, ShouldContinue};
pub use external::Termination;
pub use interpreter::{Dispatcher, Shell, ShellError};
pub use io_adapters::{LineSource, Plain, ReadError, Terminal};
pub use lexer::{ParseError, tokenize};
