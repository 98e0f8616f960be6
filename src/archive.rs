//! Chunked-zlib archive decoder (C2).
//!
//! Each `*.z` file is a custom outer framing around one or more
//! independently zlib-compressed chunks: a fixed 32-byte header, a
//! variable-length chunk directory, then the chunks themselves,
//! concatenated.

use crate::{
    error::Error,
    model::{ArchiveHeader, ChunkMetadata, ARCHIVE_HEADER_LEN, CHUNK_METADATA_LEN},
    Result,
};
use byteorder::{LittleEndian, ReadBytesExt};
use flate2::write::ZlibDecoder;
use std::{
    io::{Read, Write},
    path::Path,
};

/// Decodes the full payload of a `*.z` archive read from `reader`.
///
/// `path` is used only to attribute errors and warnings to a file; the
/// archive's own bytes are not re-read from disk.
pub fn decode<R: Read>(reader: &mut R, path: &Path) -> Result<Vec<u8>> {
    let header = read_header(reader, path)?;
    let chunks = read_chunk_directory(reader, &header, path)?;

    let mut output = Vec::with_capacity(header.unpacked_size as usize);
    for chunk in &chunks {
        decode_chunk(reader, chunk, path, &mut output)?;
    }

    if output.len() as u64 != header.unpacked_size {
        log::warn!(
            "size mismatch decoding {}: header declares {} bytes, decoded {} bytes",
            path.display(),
            header.unpacked_size,
            output.len()
        );
    }

    Ok(output)
}

fn read_header<R: Read>(reader: &mut R, path: &Path) -> Result<ArchiveHeader> {
    let mut raw = [0u8; ARCHIVE_HEADER_LEN];
    reader
        .read_exact(&mut raw)
        .map_err(|_| Error::HeaderTruncated(path.to_path_buf()))?;

    let mut cursor = &raw[..];
    Ok(ArchiveHeader {
        signature_and_version: cursor.read_u64::<LittleEndian>().unwrap(),
        unpacked_chunk_size: cursor.read_u64::<LittleEndian>().unwrap(),
        packed_size: cursor.read_u64::<LittleEndian>().unwrap(),
        unpacked_size: cursor.read_u64::<LittleEndian>().unwrap(),
    })
}

fn read_chunk_directory<R: Read>(
    reader: &mut R,
    header: &ArchiveHeader,
    path: &Path,
) -> Result<Vec<ChunkMetadata>> {
    let mut chunks = Vec::new();
    let mut consumed = 0u64;

    while consumed < header.packed_size {
        let mut raw = [0u8; CHUNK_METADATA_LEN];
        reader
            .read_exact(&mut raw)
            .map_err(|_| Error::ChunkDirectoryTruncated {
                path: path.to_path_buf(),
                expected: header.packed_size,
                actual: consumed,
            })?;

        let mut cursor = &raw[..];
        let compressed_size = cursor.read_u64::<LittleEndian>().unwrap();
        let uncompressed_size = cursor.read_u64::<LittleEndian>().unwrap();

        consumed += compressed_size;
        chunks.push(ChunkMetadata {
            compressed_size,
            uncompressed_size,
        });
    }

    // The source code's own cross-check compares `consumed` (which by
    // construction equals header.packed_size once the loop exits) against
    // `header.unpacked_size` — two quantities measuring different things.
    // That check is preserved here as a diagnostic only; the check that
    // actually matters is below.
    if consumed != header.unpacked_size {
        log::warn!(
            "packed/unpacked size cross-check from source archive did not hold for {}: consumed={consumed}, unpacked_size={}",
            path.display(),
            header.unpacked_size
        );
    }

    let declared_unpacked: u64 = chunks.iter().map(|c| c.uncompressed_size).sum();
    if declared_unpacked != header.unpacked_size {
        log::warn!(
            "sum of chunk uncompressed sizes does not match header.unpacked_size for {}: sum={declared_unpacked}, header={}",
            path.display(),
            header.unpacked_size
        );
    }

    Ok(chunks)
}

/// Inflates one chunk and appends it to `output`, or logs and skips it if
/// its inflated length disagrees with its advertised size. Each chunk gets
/// a fresh inflater: chunks are independently zlib-framed and inflater
/// state never carries across a chunk boundary.
fn decode_chunk<R: Read>(
    reader: &mut R,
    chunk: &ChunkMetadata,
    path: &Path,
    output: &mut Vec<u8>,
) -> Result<()> {
    let mut compressed = vec![0u8; chunk.compressed_size as usize];
    reader
        .read_exact(&mut compressed)
        .map_err(|_| Error::ChunkPayloadTruncated {
            path: path.to_path_buf(),
            declared: chunk.compressed_size,
        })?;

    let mut inflated = Vec::with_capacity(chunk.uncompressed_size as usize);
    {
        let mut decoder = ZlibDecoder::new(&mut inflated);
        decoder
            .write_all(&compressed)
            .map_err(|source| Error::InflateError {
                path: path.to_path_buf(),
                source,
            })?;
        decoder.finish().map_err(|source| Error::InflateError {
            path: path.to_path_buf(),
            source,
        })?;
    }

    if inflated.len() as u64 == chunk.uncompressed_size {
        output.extend_from_slice(&inflated);
    } else {
        log::warn!(
            "chunk in {} inflated to {} bytes, expected {}; skipping chunk",
            path.display(),
            inflated.len(),
            chunk.uncompressed_size
        );
    }

    Ok(())
}
