use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;

use sprig_core::object::{Id, Object};
use sprig_core::repo::{Error, Result};
use sprig_core::store::ObjectStore;

use crate::atomic;

/// An `ObjectStore` that keeps each object in its own zlib-compressed file.
///
/// An object with ID `d670460b...` lives at `objects/d6/70460b...`.
#[derive(Clone, Debug)]
pub struct LooseObjects {
    objects_dir: PathBuf,
}

impl LooseObjects {
    /// `objects_dir` must already exist.
    pub fn new<P: Into<PathBuf>>(objects_dir: P) -> LooseObjects {
        LooseObjects {
            objects_dir: objects_dir.into(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    fn object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_string();
        self.objects_dir.join(&hex[0..2]).join(&hex[2..])
    }
}

impl ObjectStore for LooseObjects {
    fn put(&mut self, object: &Object) -> Result<()> {
        let path = self.object_path(&object.id());
        if path.exists() {
            return Ok(());
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&object.encode())?;
        let compressed = encoder.finish()?;

        atomic::write_file(&path, &compressed)?;
        debug!("stored {} {}", object.kind(), object.id());
        Ok(())
    }

    fn get(&self, id: &Id) -> Result<Option<Object>> {
        let path = self.object_path(id);

        let compressed = match fs::read(&path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut encoded = Vec::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_end(&mut encoded)
            .map_err(|err| Error::Corrupt(format!("object {} can not be inflated: {}", id, err)))?;

        let object = Object::decode(&encoded)?;
        if object.id() != *id {
            return Err(Error::Corrupt(format!(
                "object stored as {} has ID {}",
                id,
                object.id()
            )));
        }

        Ok(Some(object))
    }

    fn ids(&self) -> Result<Vec<Id>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.objects_dir)? {
            let entry = entry?;
            if let Some(fanout) = fanout_name(&entry)? {
                ids.extend(ids_in_fanout(&entry.path(), &fanout)?);
            }
        }
        Ok(ids)
    }

    // Only the one fan-out directory can hold matches once two digits are known.
    fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Id>> {
        if prefix.len() < 2 || !prefix.is_char_boundary(2) {
            return Ok(self
                .ids()?
                .into_iter()
                .filter(|id| id.has_prefix(prefix))
                .collect());
        }

        let fanout = prefix[0..2].to_ascii_lowercase();
        let dir = self.objects_dir.join(&fanout);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        Ok(ids_in_fanout(&dir, &fanout)?
            .into_iter()
            .filter(|id| id.has_prefix(prefix))
            .collect())
    }
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn fanout_name(entry: &fs::DirEntry) -> Result<Option<String>> {
    if !entry.file_type()?.is_dir() {
        return Ok(None);
    }

    Ok(entry
        .file_name()
        .to_str()
        .filter(|name| name.len() == 2 && is_lower_hex(name))
        .map(|name| name.to_string()))
}

// Temporary files from interrupted writes don't look like IDs and are skipped.
fn ids_in_fanout(dir: &Path, fanout: &str) -> Result<Vec<Id>> {
    let mut ids = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) if name.len() == 38 && is_lower_hex(name) => name,
            _ => continue,
        };

        if let Ok(id) = Id::from_hex(format!("{}{}", fanout, name)) {
            ids.push(id);
        }
    }
    Ok(ids)
}
