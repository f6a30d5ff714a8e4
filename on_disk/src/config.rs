use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprig_core::repo::{Error, Result};

use crate::atomic;

/// The only repository format this crate reads and writes.
pub const FORMAT_VERSION: u32 = 0;

const CONFIG_NAME: &str = "config";

/// Contents of `.sprig/config`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub core: CoreConfig,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CoreConfig {
    pub format_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            core: CoreConfig {
                format_version: FORMAT_VERSION,
            },
        }
    }
}

impl Config {
    pub fn read(repo_dir: &Path) -> Result<Config> {
        let path = repo_dir.join(CONFIG_NAME);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::Corrupt(format!("{} is missing", path.display())));
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&text)
            .map_err(|err| Error::Corrupt(format!("cannot parse {}: {}", path.display(), err)))
    }

    pub fn write(&self, repo_dir: &Path) -> Result<()> {
        let text = toml::to_string(self)
            .map_err(|err| Error::Corrupt(format!("cannot serialize config: {}", err)))?;

        atomic::write_file(&repo_dir.join(CONFIG_NAME), text.as_bytes())?;
        Ok(())
    }

    /// Fail unless this crate understands the repository's format.
    pub fn check(&self) -> Result<()> {
        if self.core.format_version == FORMAT_VERSION {
            Ok(())
        } else {
            Err(Error::UnsupportedFormatVersion(self.core.format_version))
        }
    }
}
