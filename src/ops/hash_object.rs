use std::path::Path;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::{hash_object, write_object, ObjectKind};
use crate::repo::Repo;

/// digest a file's contents as a blob without persisting anything
pub fn hash_file(path: &Path) -> Result<Hash> {
    let payload = read_source(path)?;
    hash_object(ObjectKind::Blob, &payload)
}

/// store a file's contents as a blob, returning its digest
pub fn store_file(repo: &Repo, path: &Path) -> Result<Hash> {
    let payload = read_source(path)?;
    write_object(repo, ObjectKind::Blob, &payload)
}

/// store a byte slice as a blob, returning its digest
pub fn store_blob(repo: &Repo, payload: &[u8]) -> Result<Hash> {
    write_object(repo, ObjectKind::Blob, payload)
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}
