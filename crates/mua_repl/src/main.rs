mod config;
mod logging;
mod repl;

use std::io::{self, IsTerminal};
use std::process;

use mua_interpreter::{Evaluator, RuntimeError};
use mua_parser::ReaderSource;

use crate::config::{Command, Config};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "mua".into());

    let config = match config::parse_args(args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{}", config::usage(&program));
            return;
        }
        Ok(Command::Version) => {
            println!("mua {}", VERSION);
            return;
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprint!("{}", config::usage(&program));
            process::exit(2);
        }
    };

    logging::init_tracing(config.log_filter.as_deref());

    let mut evaluator = Evaluator::new(io::stdout());
    if let Some(seed) = config.seed {
        evaluator = evaluator.with_seed(seed);
    }

    // Every runtime error is fatal
    if let Err(err) = run(&config, &mut evaluator) {
        println!("[ERROR] : {}", err);
        process::exit(1);
    }
}

fn run(config: &Config, evaluator: &mut Evaluator<io::Stdout>) -> Result<(), RuntimeError> {
    match &config.script {
        Some(path) => {
            evaluator.load(path)?;
        }
        None if config.interactive || io::stdin().is_terminal() => repl::repl(evaluator)?,
        None => {
            let stdin = io::stdin();
            let mut source = ReaderSource::new(stdin.lock());
            evaluator.run(&mut source)?;
        }
    }

    if evaluator.is_halted() {
        tracing::debug!("stopped by exit");
    }

    Ok(())
}
