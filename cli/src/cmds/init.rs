use std::io::Write;

use super::{Cli, Result};

use clap::{App, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init").about("Create an empty sprig repository")
}

pub(crate) fn run(cli: &mut Cli) -> Result<()> {
    let work_dir = cli.work_dir()?;
    sprig_on_disk::init(&work_dir)?;

    writeln!(
        cli,
        "Initialized empty sprig repository in {}",
        sprig_on_disk::repo_dir(&work_dir).display()
    )?;

    Ok(())
}
