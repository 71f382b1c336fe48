use argh::FromArgs;
use log::LevelFilter;

pub const DEFAULT_PROMPT: &str = "> ";

#[derive(FromArgs, Debug)]
/// A minimal interactive command shell.
pub struct Options {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text written before each line is read.
    pub prompt: String,

    #[argh(switch)]
    /// read plain lines from standard input even when it is a terminal.
    pub no_editor: bool,

    #[argh(option, from_str_fn(parse_level))]
    /// log verbosity: off, error, warn, info, debug or trace; overrides MYSH_LOG.
    pub log: Option<LevelFilter>,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("unknown log level `{value}`"))
}
