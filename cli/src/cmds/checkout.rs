use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Switch branches or restore a file from a commit")
        .after_help(
            "FORMS:\n    \
             sprig checkout <branch>\n    \
             sprig checkout -- <file>\n    \
             sprig checkout <commit> -- <file>",
        )
        .arg(
            Arg::with_name("target")
                .help("Branch to switch to, or commit to restore <file> from"),
        )
        .arg(
            Arg::with_name("file")
                .last(true)
                .help("File to restore"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let target = args.value_of("target");
    let file = args.value_of("file");

    let mut repo = find_repo::from_cli(cli)?;

    match (target, file) {
        (Some(branch), None) => repo.checkout_branch(branch)?,
        (None, Some(file)) => repo.checkout_file(file)?,
        (Some(commit), Some(file)) => repo.checkout_file_from_commit(commit, file)?,
        (None, None) => return Err("Incorrect operands.".into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cmds::Cli;

    use sprig_on_disk::TempRepo;

    fn commit(tr: &TempRepo, path: &str, content: &str, message: &str) {
        tr.write(path, content);
        Cli::run_in(tr.path(), vec!["add", path]).unwrap();
        Cli::run_in(tr.path(), vec!["commit", message]).unwrap();
    }

    #[test]
    fn file_from_head() {
        let tr = TempRepo::new();
        commit(&tr, "f", "one", "one");
        tr.write("f", "scribbled");

        Cli::run_in(tr.path(), vec!["checkout", "--", "f"]).unwrap();
        assert_eq!(tr.read("f").unwrap(), "one");
    }

    #[test]
    fn file_from_commit() {
        let tr = TempRepo::new();
        commit(&tr, "f", "one", "one");
        let first = tr.open().head_commit().unwrap().id().to_string();
        commit(&tr, "f", "two", "two");

        Cli::run_in(tr.path(), vec!["checkout", &first[..6], "--", "f"]).unwrap();
        assert_eq!(tr.read("f").unwrap(), "one");

        // Staging area is untouched; the file now differs from head.
        let stdout = Cli::run_in(tr.path(), vec!["status"]).unwrap();
        assert!(stdout.contains("f (modified)"));
    }

    #[test]
    fn branch() {
        let tr = TempRepo::new();
        Cli::run_in(tr.path(), vec!["branch", "dev"]).unwrap();
        commit(&tr, "f", "one", "on master");

        Cli::run_in(tr.path(), vec!["checkout", "dev"]).unwrap();

        assert_eq!(tr.open().current_branch(), "dev");
        assert_eq!(tr.read("f"), None);
    }

    #[test]
    fn error_no_operands() {
        let tr = TempRepo::new();

        let err = Cli::run_in(tr.path(), vec!["checkout"]).unwrap_err();
        assert_eq!(err.to_string(), "Incorrect operands.");
    }

    #[test]
    fn error_file_not_in_commit() {
        let tr = TempRepo::new();

        let err = Cli::run_in(tr.path(), vec!["checkout", "--", "nope"]).unwrap_err();
        assert_eq!(err.to_string(), "File does not exist in that commit.");
    }

    #[test]
    fn error_current_branch() {
        let tr = TempRepo::new();

        let err = Cli::run_in(tr.path(), vec!["checkout", "master"]).unwrap_err();
        assert_eq!(err.to_string(), "No need to checkout the current branch.");
    }

    #[test]
    fn error_untracked_in_the_way() {
        let tr = TempRepo::new();
        Cli::run_in(tr.path(), vec!["branch", "dev"]).unwrap();
        Cli::run_in(tr.path(), vec!["checkout", "dev"]).unwrap();
        commit(&tr, "f", "tracked on dev", "dev");
        Cli::run_in(tr.path(), vec!["checkout", "master"]).unwrap();
        tr.write("f", "untracked on master");

        let err = Cli::run_in(tr.path(), vec!["checkout", "dev"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
        assert_eq!(tr.read("f").unwrap(), "untracked on master");
        assert_eq!(tr.open().current_branch(), "master");
    }
}
