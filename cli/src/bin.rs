#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

mod app;
pub(crate) use app::Cli;

mod cmds;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Environment variable holding the log filter, as in `SPRIG_LOG=debug`.
const LOG_ENV: &str = "SPRIG_LOG";

#[allow(unused_must_use)]
fn main() {
    // Keep this function small; everything else is reachable from tests via `Cli`.

    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut cli = Cli {
        arg_matches: app::clap_app().get_matches(),
        stdout: &mut stdout,
    };

    let r = cli.run();

    cli.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    });
}
