use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, SubCommand};
use sprig_core::repo::Status;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("status")
        .about("Show branches, staged and removed files, and working-tree changes")
}

pub(crate) fn run(cli: &mut Cli) -> Result<()> {
    let repo = find_repo::from_cli(cli)?;
    let status = repo.status()?;
    write_status(cli, &status)
}

fn write_status(out: &mut dyn Write, status: &Status) -> Result<()> {
    writeln!(out, "=== Branches ===")?;
    for branch in &status.branches {
        if *branch == status.current_branch {
            writeln!(out, "*{}", branch)?;
        } else {
            writeln!(out, "{}", branch)?;
        }
    }
    writeln!(out)?;

    write_section(out, "Staged Files", &status.staged)?;
    write_section(out, "Removed Files", &status.removed)?;

    let not_staged: Vec<String> = status
        .not_staged
        .iter()
        .map(|(path, modification)| format!("{} ({})", path, modification))
        .collect();
    write_section(out, "Modifications Not Staged For Commit", &not_staged)?;

    write_section(out, "Untracked Files", &status.untracked)
}

fn write_section(out: &mut dyn Write, title: &str, lines: &[String]) -> Result<()> {
    writeln!(out, "=== {} ===", title)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use sprig_core::repo::Modification;
    use sprig_on_disk::TempRepo;

    #[test]
    fn format() {
        let status = Status {
            current_branch: "master".to_string(),
            branches: vec!["dev".to_string(), "master".to_string()],
            staged: vec!["a.txt".to_string()],
            removed: vec!["b.txt".to_string()],
            not_staged: vec![
                ("c.txt".to_string(), Modification::Modified),
                ("d.txt".to_string(), Modification::Deleted),
            ],
            untracked: vec!["e.txt".to_string()],
        };

        let mut out = Vec::new();
        write_status(&mut out, &status).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "=== Branches ===\n\
             dev\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             a.txt\n\
             \n\
             === Removed Files ===\n\
             b.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             c.txt (modified)\n\
             d.txt (deleted)\n\
             \n\
             === Untracked Files ===\n\
             e.txt\n\
             \n"
        );
    }

    #[test]
    fn fresh_repo() {
        let tr = TempRepo::new();
        tr.write("scratch", "x");

        let stdout = Cli::run_in(tr.path(), vec!["status"]).unwrap();

        assert_eq!(
            stdout,
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\nscratch\n\n"
        );
    }
}
