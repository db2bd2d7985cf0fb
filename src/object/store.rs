use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::object::{encode_object, ObjectKind};
use crate::repo::Repo;

/// compressed inputs below this are decoded in one read; larger ones go
/// through the chunked loop to bound peak buffer growth
const STREAMING_THRESHOLD: u64 = 10 * 1024 * 1024;

const CHUNK_SIZE: usize = 64 * 1024;

/// compute the digest of a payload without touching the store
pub fn hash_object(kind: ObjectKind, payload: &[u8]) -> Result<Hash> {
    let encoded = encode_object(kind, payload)?;
    Ok(Hash::digest(&encoded))
}

/// write an object to the store, returning its digest
///
/// the canonical encoding is zlib-compressed and placed at
/// `objects/<hex[0..2]>/<hex[2..]>`. writes are idempotent: an object
/// already present is left untouched, and new objects land via
/// temp-file-then-rename so a concurrent reader never sees a partial file.
pub fn write_object(repo: &Repo, kind: ObjectKind, payload: &[u8]) -> Result<Hash> {
    let encoded = encode_object(kind, payload)?;
    let hash = Hash::digest(&encoded);

    let (dir, file) = hash.to_path_components();
    let object_dir = repo.objects_path().join(dir);
    let object_path = object_dir.join(file);

    // deduplication: objects are content-immutable, so an existing file
    // is already byte-identical to what we would write
    if object_path.exists() {
        return Ok(hash);
    }

    fs::create_dir_all(&object_dir).with_path(&object_dir)?;

    // stage in the objects root, rename into the fan-out directory
    let tmp_path = repo
        .objects_path()
        .join(format!("tmp_obj_{}", uuid::Uuid::new_v4()));
    {
        let tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        let mut encoder = ZlibEncoder::new(tmp_file, Compression::default());
        encoder.write_all(&encoded).with_path(&tmp_path)?;
        let tmp_file = encoder.finish().with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    fs::rename(&tmp_path, &object_path).with_path(&object_path)?;
    fsync_dir(&object_dir)?;

    Ok(hash)
}

/// read an object back as (kind, payload)
pub fn read_object(repo: &Repo, hash: &Hash) -> Result<(ObjectKind, Vec<u8>)> {
    let path = repo.object_path(hash);

    let file = File::open(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;
    let compressed_len = file.metadata().with_path(&path)?.len();

    let decoded = decompress(file, compressed_len).map_err(|e| Error::CorruptObject {
        hash: *hash,
        message: format!("zlib decode failed: {}", e),
    })?;

    parse_object(hash, decoded)
}

/// check if an object exists in the store
pub fn object_exists(repo: &Repo, hash: &Hash) -> bool {
    repo.object_path(hash).exists()
}

/// inflate the stored bytes, size-thresholded
///
/// small objects are read in one go; large ones loop over a fixed
/// buffer. both paths reconstruct identical bytes, the split is purely
/// a memory policy.
fn decompress(file: File, compressed_len: u64) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(file);
    let mut decoded = Vec::new();

    if compressed_len < STREAMING_THRESHOLD {
        decoder.read_to_end(&mut decoded)?;
    } else {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = decoder.read(&mut buf)?;
            if n == 0 {
                break;
            }
            decoded.extend_from_slice(&buf[..n]);
        }
    }

    Ok(decoded)
}

/// split the canonical encoding back into (kind, payload)
///
/// scanning is byte-offset only: the payload (raw digest bytes inside
/// trees in particular) is not text and must never pass through a
/// character decode.
fn parse_object(hash: &Hash, decoded: Vec<u8>) -> Result<(ObjectKind, Vec<u8>)> {
    let corrupt = |message: String| Error::CorruptObject {
        hash: *hash,
        message,
    };

    let nul = decoded
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| corrupt("missing NUL after header".to_string()))?;

    let header = &decoded[..nul];
    let space = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| corrupt("missing space in header".to_string()))?;

    let kind = ObjectKind::from_bytes(&header[..space]).ok_or_else(|| {
        corrupt(format!(
            "unknown object type '{}'",
            String::from_utf8_lossy(&header[..space])
        ))
    })?;

    let size: u64 = std::str::from_utf8(&header[space + 1..])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| corrupt("unparseable size in header".to_string()))?;

    let payload = decoded[nul + 1..].to_vec();
    if payload.len() as u64 != size {
        return Err(corrupt(format!(
            "declared size {} but payload is {} bytes",
            size,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

/// fsync a directory
fn fsync_dir(path: &Path) -> Result<()> {
    let dir = File::open(path).with_path(path)?;
    dir.sync_all().with_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let (_dir, repo) = test_repo();

        let hash = write_object(&repo, ObjectKind::Blob, b"some payload").unwrap();
        assert!(object_exists(&repo, &hash));

        let (kind, payload) = read_object(&repo, &hash).unwrap();
        assert_eq!(kind, ObjectKind::Blob);
        assert_eq!(payload, b"some payload");
    }

    #[test]
    fn test_known_blob_digest() {
        let (_dir, repo) = test_repo();

        let hash = write_object(&repo, ObjectKind::Blob, b"hello\n").unwrap();
        assert_eq!(hash.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");

        let (kind, payload) = read_object(&repo, &hash).unwrap();
        assert_eq!(kind, ObjectKind::Blob);
        assert_eq!(payload, b"hello\n");
    }

    #[test]
    fn test_hash_object_matches_write() {
        let (_dir, repo) = test_repo();

        let computed = hash_object(ObjectKind::Blob, b"abc").unwrap();
        let written = write_object(&repo, ObjectKind::Blob, b"abc").unwrap();
        assert_eq!(computed, written);
    }

    #[test]
    fn test_hash_object_is_pure() {
        let (_dir, repo) = test_repo();

        let hash = hash_object(ObjectKind::Blob, b"never persisted").unwrap();
        assert!(!object_exists(&repo, &hash));
    }

    #[test]
    fn test_write_is_deterministic_and_stable() {
        let (_dir, repo) = test_repo();

        let h1 = write_object(&repo, ObjectKind::Blob, b"stable").unwrap();
        let bytes1 = std::fs::read(repo.object_path(&h1)).unwrap();

        let h2 = write_object(&repo, ObjectKind::Blob, b"stable").unwrap();
        let bytes2 = std::fs::read(repo.object_path(&h2)).unwrap();

        assert_eq!(h1, h2);
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_kind_is_part_of_identity() {
        let (_dir, repo) = test_repo();

        let blob = write_object(&repo, ObjectKind::Blob, b"x").unwrap();
        let tree = write_object(&repo, ObjectKind::Tree, b"x").unwrap();
        assert_ne!(blob, tree);
    }

    #[test]
    fn test_binary_payload_roundtrip() {
        let (_dir, repo) = test_repo();

        let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let hash = write_object(&repo, ObjectKind::Blob, &payload).unwrap();

        let (_, read_back) = read_object(&repo, &hash).unwrap();
        assert_eq!(read_back, payload);
    }

    #[test]
    fn test_read_nonexistent_object() {
        let (_dir, repo) = test_repo();

        let fake = Hash::from_hex("0000000000000000000000000000000000000000").unwrap();
        let result = read_object(&repo, &fake);

        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
    }

    #[test]
    fn test_flipped_byte_is_corrupt() {
        let (_dir, repo) = test_repo();

        let hash = write_object(&repo, ObjectKind::Blob, b"soon to be damaged").unwrap();
        let path = repo.object_path(&hash);

        let mut stored = std::fs::read(&path).unwrap();
        let mid = stored.len() / 2;
        stored[mid] ^= 0xff;
        std::fs::write(&path, stored).unwrap();

        let result = read_object(&repo, &hash);
        assert!(matches!(result, Err(Error::CorruptObject { .. })));
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let (_dir, repo) = test_repo();

        let payload: Vec<u8> = (0..2048u32).flat_map(|n| n.to_le_bytes()).collect();
        let hash = write_object(&repo, ObjectKind::Blob, &payload).unwrap();
        let path = repo.object_path(&hash);

        let stored = std::fs::read(&path).unwrap();
        std::fs::write(&path, &stored[..stored.len() / 2]).unwrap();

        let result = read_object(&repo, &hash);
        assert!(matches!(result, Err(Error::CorruptObject { .. })));
    }

    #[test]
    fn test_size_mismatch_is_corrupt() {
        let (_dir, repo) = test_repo();

        // hand-plant an object whose header lies about the payload length
        let hash = Hash::from_hex("1111111111111111111111111111111111111111").unwrap();
        let path = repo.object_path(&hash);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"blob 99\0hi").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let result = read_object(&repo, &hash);
        assert!(matches!(result, Err(Error::CorruptObject { .. })));
    }

    #[test]
    fn test_unknown_kind_is_corrupt() {
        let (_dir, repo) = test_repo();

        let hash = Hash::from_hex("2222222222222222222222222222222222222222").unwrap();
        let path = repo.object_path(&hash);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"tag 2\0hi").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let result = read_object(&repo, &hash);
        assert!(matches!(result, Err(Error::CorruptObject { .. })));
    }

    #[test]
    fn test_commit_kind_roundtrips_uninterpreted() {
        let (_dir, repo) = test_repo();

        let payload = b"tree 1111111111111111111111111111111111111111\n";
        let hash = write_object(&repo, ObjectKind::Commit, payload).unwrap();

        let (kind, read_back) = read_object(&repo, &hash).unwrap();
        assert_eq!(kind, ObjectKind::Commit);
        assert_eq!(read_back, payload);
    }
}
