use std::{io, path::PathBuf};

/// Every fatal failure mode the unpacker can surface.
///
/// Non-fatal conditions (a sidecar missing its expected size, a decoded
/// payload disagreeing with its advertised size) are never represented
/// here — they are logged through the [`log`] facade and never change
/// control flow. See the crate root docs for the rationale.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("raw mod directory does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("raw mod path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("archive header is truncated: {0}")]
    HeaderTruncated(PathBuf),

    #[error("chunk directory is truncated in {path}: expected {expected} bytes of packed chunks, got {actual}")]
    ChunkDirectoryTruncated {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("chunk payload is truncated in {path}: chunk declared {declared} compressed bytes")]
    ChunkPayloadTruncated { path: PathBuf, declared: u64 },

    #[error("zlib stream in {path} is malformed")]
    InflateError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file} ended before its declared fields were fully read")]
    MetadataTruncated {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("mod id could not be parsed from directory name: {0}")]
    InvalidModId(PathBuf),

    #[error("could not walk raw mod directory")]
    WalkDir(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
