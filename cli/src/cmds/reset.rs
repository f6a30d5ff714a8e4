use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("reset")
        .about("Check out all files of a commit and move the current branch to it")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("Full or abbreviated commit ID"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let commit = args.value_of("commit").unwrap();

    let mut repo = find_repo::from_cli(cli)?;
    repo.reset(commit)?;

    Ok(())
}
