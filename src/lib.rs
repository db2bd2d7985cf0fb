//! silt - git-compatible content-addressed object store
//!
//! stores arbitrary byte payloads keyed by the SHA-1 digest of their tagged,
//! length-prefixed encoding, and decodes the binary tree-object format that
//! maps names to child object references. the on-disk layout is
//! bit-compatible with git's loose object database.
//!
//! # Core concepts
//!
//! - **Object**: a `(kind, payload)` pair; kind is one of blob, tree, commit
//! - **Canonical encoding**: `"<kind> <size>\0" + payload`; this exact byte
//!   string is hashed and zlib-compressed for storage
//! - **Digest**: SHA-1 of the canonical encoding, rendered as 40 lowercase
//!   hex chars and used as the storage key
//! - **Fan-out layout**: `objects/<hex[0..2]>/<hex[2..]>`
//! - **Tree payload**: concatenated `<mode> <name>\0<20 digest bytes>`
//!   entries, scanned on byte offsets (names and digests are not text)
//!
//! # Example usage
//!
//! ```no_run
//! use silt::{read_object, store_blob, decode_tree, ObjectKind, Repo};
//! use std::path::Path;
//!
//! // initialize a repository skeleton
//! let repo = Repo::init(Path::new("/path/to/project")).unwrap();
//!
//! // store a blob and read it back by digest
//! let hash = store_blob(&repo, b"hello\n").unwrap();
//! let (kind, payload) = read_object(&repo, &hash).unwrap();
//! assert_eq!(kind, ObjectKind::Blob);
//!
//! // decode a tree object's payload into structured entries
//! if kind == ObjectKind::Tree {
//!     for entry in decode_tree(&payload).unwrap() {
//!         println!("{} {}", entry.mode, entry.name_lossy());
//!     }
//! }
//! ```

mod config;
mod error;
mod hash;
mod repo;

pub mod object;
pub mod ops;

pub use config::{Config, CoreConfig};
pub use error::{Error, Result};
pub use hash::Hash;
pub use object::{
    decode_tree, encode_object, encode_tree, hash_object, object_exists, object_kind_for_mode,
    read_object, write_object, ObjectKind, TreeEntry, TreeIter,
};
pub use ops::{hash_file, ls_tree, store_blob, store_file, LsTreeEntry};
pub use repo::Repo;
