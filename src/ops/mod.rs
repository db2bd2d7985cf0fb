//! high-level operations on silt repositories

mod hash_object;
mod ls_tree;

pub use hash_object::{hash_file, store_blob, store_file};
pub use ls_tree::{ls_tree, LsTreeEntry};
