use getopts::Options;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Arguments(#[from] getopts::Fail),
    #[error("invalid seed `{0}`, expected an unsigned integer")]
    InvalidSeed(String),
    #[error("expected at most one script but got {0}")]
    TooManyScripts(usize),
}

/// Settings for one interpreter run.
#[derive(Debug, Default, PartialEq)]
pub struct Config {
    /// Script to evaluate instead of standard input
    pub script: Option<String>,
    /// Use the line editor even when stdin is not a terminal
    pub interactive: bool,
    pub seed: Option<u64>,
    /// Tracing filter directives, overriding `MUA_LOG`
    pub log_filter: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
    Version,
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optflag("i", "interactive", "read from the line editor even if stdin is piped");
    opts.optopt("", "seed", "seed the random generator", "N");
    opts.optopt("", "log", "tracing filter, e.g. `mua_interpreter=debug`", "FILTER");
    opts.optflag("h", "help", "print this help");
    opts.optflag("V", "version", "print the version");
    opts
}

pub fn usage(program: &str) -> String {
    options().usage(&format!("Usage: {} [options] [SCRIPT]", program))
}

/// Parse command line arguments, program name excluded.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let matches = options().parse(args)?;

    if matches.opt_present("h") {
        return Ok(Command::Help);
    }
    if matches.opt_present("V") {
        return Ok(Command::Version);
    }

    let seed = match matches.opt_str("seed") {
        Some(seed) => Some(
            seed.parse()
                .map_err(|_| ConfigError::InvalidSeed(seed.clone()))?,
        ),
        None => None,
    };

    if matches.free.len() > 1 {
        return Err(ConfigError::TooManyScripts(matches.free.len()));
    }

    let interactive = matches.opt_present("i");
    let log_filter = matches.opt_str("log");

    Ok(Command::Run(Config {
        script: matches.free.into_iter().next(),
        interactive,
        seed,
        log_filter,
    }))
}
