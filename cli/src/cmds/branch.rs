use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("branch")
        .about("Create a branch at the current commit")
        .arg(
            Arg::with_name("name")
                .required(true)
                .help("Name of the new branch"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let name = args.value_of("name").unwrap();

    let mut repo = find_repo::from_cli(cli)?;
    repo.branch(name)?;

    Ok(())
}
