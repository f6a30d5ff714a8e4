use crate::{Cli, Result};

mod add;
mod branch;
mod checkout;
mod commit;
mod find;
mod find_repo;
mod global_log;
mod init;
mod log;
mod merge;
mod reset;
mod rm;
mod rm_branch;
mod status;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(add::subcommand())
        .subcommand(branch::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(find::subcommand())
        .subcommand(global_log::subcommand())
        .subcommand(init::subcommand())
        .subcommand(log::subcommand())
        .subcommand(merge::subcommand())
        .subcommand(reset::subcommand())
        .subcommand(rm::subcommand())
        .subcommand(rm_branch::subcommand())
        .subcommand(status::subcommand())
}

pub(crate) fn dispatch(cli: &mut Cli) -> Result<()> {
    let matches = cli.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the Cli struct through to subcommand imps.

    match matches.subcommand() {
        ("add", Some(m)) => add::run(cli, &m),
        ("branch", Some(m)) => branch::run(cli, &m),
        ("checkout", Some(m)) => checkout::run(cli, &m),
        ("commit", Some(m)) => commit::run(cli, &m),
        ("find", Some(m)) => find::run(cli, &m),
        ("global-log", Some(_)) => global_log::run(cli),
        ("init", Some(_)) => init::run(cli),
        ("log", Some(_)) => log::run(cli),
        ("merge", Some(m)) => merge::run(cli, &m),
        ("reset", Some(m)) => reset::run(cli, &m),
        ("rm", Some(m)) => rm::run(cli, &m),
        ("rm-branch", Some(m)) => rm_branch::run(cli, &m),
        ("status", Some(_)) => status::run(cli),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
