use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::{decode_tree, object_kind_for_mode, read_object, ObjectKind};
use crate::repo::Repo;

/// a decoded tree entry resolved for listing
#[derive(Debug, Clone)]
pub struct LsTreeEntry {
    pub mode: String,
    pub kind: ObjectKind,
    pub hash: Hash,
    pub name: Vec<u8>,
}

/// list the entries of a tree object
pub fn ls_tree(repo: &Repo, hash: &Hash) -> Result<Vec<LsTreeEntry>> {
    let (kind, payload) = read_object(repo, hash)?;
    if kind != ObjectKind::Tree {
        return Err(Error::NotATree(*hash));
    }

    decode_tree(&payload)?
        .into_iter()
        .map(|entry| {
            let kind = object_kind_for_mode(&entry.mode)?;
            Ok(LsTreeEntry {
                mode: entry.mode,
                kind,
                hash: entry.hash,
                name: entry.name,
            })
        })
        .collect()
}

impl std::fmt::Display for LsTreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode,
            self.kind,
            self.hash,
            String::from_utf8_lossy(&self.name)
        )
    }
}
