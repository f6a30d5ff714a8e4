use super::{find_repo, log, Cli, Result};

use clap::{App, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("global-log").about("Show every commit ever made, newest first")
}

pub(crate) fn run(cli: &mut Cli) -> Result<()> {
    let repo = find_repo::from_cli(cli)?;

    for commit in repo.global_log()? {
        log::write_entry(cli, &commit)?;
    }

    Ok(())
}
