//! Plain data carried between pipeline stages. Nothing in this module
//! performs I/O; it only describes shapes.

use std::path::PathBuf;

/// One `*.z` archive discovered under a raw mod directory, paired with the
/// expected uncompressed size read from its `.uncompressed_size` sidecar.
///
/// `rel_path` is relative to the parent of the raw mod directory, so the
/// mod-ID segment is retained as its first component — this is what lets
/// [`crate::unpack`] mirror per-mod layout under the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub abs_path: PathBuf,
    pub rel_path: PathBuf,
    pub expected_uncompressed_size: u64,
}

/// The fixed 32-byte header that precedes every `*.z` archive's chunk
/// directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// 6 bytes of signature concatenated with 2 bytes of format version,
    /// treated as an opaque tag. No known valid values are enforced.
    pub signature_and_version: u64,
    /// Nominal uncompressed size of a full chunk; only the last chunk may
    /// be smaller.
    pub unpacked_chunk_size: u64,
    /// Total size in bytes of the concatenated compressed chunk payloads.
    pub packed_size: u64,
    /// Total size in bytes of the fully decompressed archive.
    pub unpacked_size: u64,
}

pub(crate) const ARCHIVE_HEADER_LEN: usize = 32;
pub(crate) const CHUNK_METADATA_LEN: usize = 16;

/// One entry of the chunk directory following an [`ArchiveHeader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

/// A single `key`/`value` record from `modmeta.info`. Unlike [`crate::strings::Ue4String`]
/// these are raw length-prefixed byte blobs: no NUL terminator, no `+1` in
/// the length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModMetaPair {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl ModMetaPair {
    #[must_use]
    pub fn key_is(&self, expected: &str) -> bool {
        self.key == expected.as_bytes()
    }
}
