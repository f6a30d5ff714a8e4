use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};
use sprig_core::repo::MergeOutcome;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("merge")
        .about("Merge another branch into the current branch")
        .arg(
            Arg::with_name("branch")
                .required(true)
                .help("Branch to merge from"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let branch = args.value_of("branch").unwrap();

    let mut repo = find_repo::from_cli(cli)?;
    match repo.merge(branch)? {
        MergeOutcome::FastForward(_) => writeln!(cli, "Current branch fast-forwarded.")?,
        MergeOutcome::CleanMerge(_) => (),
        MergeOutcome::Conflict(_) => writeln!(cli, "Encountered a merge conflict.")?,
    }

    Ok(())
}
