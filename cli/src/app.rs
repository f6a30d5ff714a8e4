#![deny(warnings)]

use std::env;
use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, Arg, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("sprig")
        .version(crate_version!())
        .about("A small single-user version-control system")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("C")
                .short("C")
                .value_name("path")
                .takes_value(true)
                .help("Run as if sprig was started in <path> instead of the current directory"),
        );

    cmds::add_subcommands(app)
}

pub(crate) struct Cli<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> Cli<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    /// The working directory selected by `-C`, or else the current directory.
    pub fn work_dir(&self) -> Result<PathBuf> {
        match self.arg_matches.value_of("C") {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(env::current_dir()?),
        }
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("sprig"));

        let mut stdout = Vec::new();

        Cli {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }

    /// Like `run_with_args`, but in the working directory `path`.
    #[cfg(test)]
    pub fn run_in<P, I, T>(path: P, args: I) -> Result<String>
    where
        P: Into<OsString>,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut all: Vec<OsString> = vec![OsString::from("-C"), path.into()];
        all.extend(args.into_iter().map(|x| x.into()));

        let stdout = Cli::run_with_args(all)?;
        Ok(String::from_utf8(stdout)?)
    }
}

impl<'a> Write for Cli<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
