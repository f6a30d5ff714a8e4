use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("find")
        .about("Print the IDs of all commits with exactly the given message")
        .arg(
            Arg::with_name("message")
                .required(true)
                .help("The commit message to look for"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let message = args.value_of("message").unwrap();

    let repo = find_repo::from_cli(cli)?;
    for id in repo.find(message)? {
        writeln!(cli, "{}", id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cmds::Cli;

    use sprig_on_disk::TempRepo;

    #[test]
    fn prints_matching_ids() {
        let tr = TempRepo::new();
        tr.write("f", "x");
        Cli::run_in(tr.path(), vec!["add", "f"]).unwrap();
        Cli::run_in(tr.path(), vec!["commit", "wanted"]).unwrap();
        let head = tr.open().head_commit().unwrap().id();

        let stdout = Cli::run_in(tr.path(), vec!["find", "wanted"]).unwrap();
        assert_eq!(stdout, format!("{}\n", head));
    }

    #[test]
    fn error_no_match() {
        let tr = TempRepo::new();

        let err = Cli::run_in(tr.path(), vec!["find", "nothing like this"]).unwrap_err();
        assert_eq!(err.to_string(), "Found no commit with that message.");
    }
}
