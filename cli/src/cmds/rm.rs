use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("rm")
        .about("Unstage a file, and stop tracking it if the current commit does")
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("Path of the file, relative to the working directory"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let file = args.value_of("file").unwrap();

    let mut repo = find_repo::from_cli(cli)?;
    repo.remove(file)?;

    Ok(())
}
