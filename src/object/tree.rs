use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::ObjectKind;

/// a single entry of a tree object's binary payload
///
/// wire form: `<mode> <name>\0<20 raw digest bytes>`, entries
/// concatenated with no separator. names are raw path-segment bytes and
/// are not guaranteed to be valid UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    /// 6-character zero-padded mode string, e.g. "040000"
    pub mode: String,
    pub name: Vec<u8>,
    pub hash: Hash,
}

impl TreeEntry {
    pub fn new(mode: impl Into<String>, name: impl Into<Vec<u8>>, hash: Hash) -> Self {
        Self {
            mode: normalize_mode(&mode.into()),
            name: name.into(),
            hash,
        }
    }

    /// entry name for display; invalid UTF-8 is replaced, not errored
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// left-pad a mode to 6 characters, so "40000" reads as "040000"
fn normalize_mode(mode: &str) -> String {
    format!("{:0>6}", mode)
}

/// map an entry mode to the kind of object it references
///
/// unrecognized modes are an error, never coerced to a guess.
pub fn object_kind_for_mode(mode: &str) -> Result<ObjectKind> {
    match mode {
        // regular file and executable differ only in permission bits;
        // a symlink stores its target as blob content
        "100644" | "100755" | "120000" => Ok(ObjectKind::Blob),
        "040000" => Ok(ObjectKind::Tree),
        // submodule reference
        "160000" => Ok(ObjectKind::Commit),
        _ => Err(Error::UnknownMode(mode.to_string())),
    }
}

/// lazy scanner over a tree payload, yielding entries in encoding order
///
/// restartable by constructing a new iterator over the same payload;
/// fuses after the first malformed entry.
pub struct TreeIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TreeIter<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            buf: payload,
            pos: 0,
        }
    }

    fn malformed(&mut self, message: &str) -> Error {
        // stop scanning; offsets past a malformed entry are meaningless
        self.pos = self.buf.len();
        Error::MalformedTree(message.to_string())
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = Result<TreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }

        let buf = self.buf;
        let rest = &buf[self.pos..];

        let Some(space) = rest.iter().position(|&b| b == b' ') else {
            return Some(Err(self.malformed("no space terminates the mode field")));
        };
        let mode = match std::str::from_utf8(&rest[..space]) {
            Ok(mode) => normalize_mode(mode),
            Err(_) => return Some(Err(self.malformed("mode field is not ASCII"))),
        };

        let name_start = space + 1;
        let Some(nul) = rest[name_start..].iter().position(|&b| b == 0) else {
            return Some(Err(self.malformed("no NUL terminates the name field")));
        };
        let name = rest[name_start..name_start + nul].to_vec();

        let digest_start = name_start + nul + 1;
        if rest.len() < digest_start + 20 {
            return Some(Err(
                self.malformed("payload ends before the 20-byte entry digest")
            ));
        }
        let hash = match Hash::from_slice(&rest[digest_start..digest_start + 20]) {
            Ok(hash) => hash,
            Err(e) => return Some(Err(e)),
        };

        self.pos += digest_start + 20;

        Some(Ok(TreeEntry { mode, name, hash }))
    }
}

/// decode a full tree payload into its entries, in encoding order
///
/// no sorting is imposed or verified; the encoded order is the order.
pub fn decode_tree(payload: &[u8]) -> Result<Vec<TreeEntry>> {
    TreeIter::new(payload).collect()
}

/// encode entries back into the binary tree payload
///
/// emits git's exact byte layout: leading zeros are stripped from the
/// mode ("040000" is written as "40000"), which decode re-pads.
pub fn encode_tree(entries: &[TreeEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();

    for entry in entries {
        validate_entry_name(&entry.name)?;

        let mode = entry.mode.trim_start_matches('0');
        let mode = if mode.is_empty() { "0" } else { mode };

        buf.extend_from_slice(mode.as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(&entry.name);
        buf.push(0);
        buf.extend_from_slice(entry.hash.as_bytes());
    }

    Ok(buf)
}

/// validate an entry name before encoding
fn validate_entry_name(name: &[u8]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidEntryName("empty name".to_string()));
    }
    if name.contains(&b'/') {
        return Err(Error::InvalidEntryName(format!(
            "name contains '/': {}",
            String::from_utf8_lossy(name)
        )));
    }
    if name.contains(&0) {
        return Err(Error::InvalidEntryName(format!(
            "name contains null byte: {}",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.mode, self.hash, self.name_lossy())
    }
}
