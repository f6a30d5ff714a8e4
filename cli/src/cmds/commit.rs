use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the staged changes as a new commit")
        .arg(
            Arg::with_name("message")
                .required(true)
                .help("The commit message"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let message = args.value_of("message").unwrap();

    let mut repo = find_repo::from_cli(cli)?;
    repo.commit(message)?;

    Ok(())
}
