use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, SubCommand};
use sprig_core::object::Commit;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("log").about("Show the commits on the current branch, newest first")
}

pub(crate) fn run(cli: &mut Cli) -> Result<()> {
    let repo = find_repo::from_cli(cli)?;

    for commit in repo.log()? {
        write_entry(cli, &commit?)?;
    }

    Ok(())
}

/// Write one commit the way `log` and `global-log` show it.
pub(crate) fn write_entry(out: &mut dyn Write, commit: &Commit) -> Result<()> {
    writeln!(out, "===")?;
    writeln!(out, "commit {}", commit.id())?;
    writeln!(
        out,
        "Date:   {}",
        commit.timestamp().format("%a %b %-d %H:%M:%S %Y %z")
    )?;
    writeln!(out, "{}", commit.message())?;
    writeln!(out)?;
    Ok(())
}
