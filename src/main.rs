use anyhow::{Context, Result};
use mysh::config::Options;
use mysh::{Dispatcher, Plain, Shell, Terminal, logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let options: Options = argh::from_env();
    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mysh: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> Result<()> {
    logging::init(options.log).context("cannot install logger")?;

    let dispatcher = Dispatcher::default();
    if options.no_editor || !io::stdin().is_terminal() {
        Shell::new(Plain::stdio(), dispatcher)
            .with_prompt(options.prompt)
            .run()?;
    } else {
        let terminal = Terminal::new().context("cannot set up line editor")?;
        Shell::new(terminal, dispatcher)
            .with_prompt(options.prompt)
            .run()?;
    }
    Ok(())
}
