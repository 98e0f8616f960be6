//! `modmeta.info` parser (C6): an int32 pair count, then that many
//! `(key_size, key, value_size, value)` records. These are raw
//! length-prefixed byte blobs, not UE4 strings — no NUL terminator, no
//! `+1` in the length.

use crate::{error::Error, model::ModMetaPair, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::{
    io::{Read, Write},
    path::Path,
};

/// Parses a `modmeta.info` byte stream into an ordered list of pairs.
/// Duplicate keys are preserved as separate entries; last-write-wins is a
/// caller-side concern, not something this parser applies.
pub fn parse<R: Read>(reader: &mut R, path: &Path) -> Result<Vec<ModMetaPair>> {
    let to_truncated = |source| Error::MetadataTruncated {
        file: path.to_path_buf(),
        source,
    };

    let pair_count = reader.read_i32::<LittleEndian>().map_err(to_truncated)?;
    let mut pairs = Vec::with_capacity(pair_count.max(0) as usize);

    for _ in 0..pair_count.max(0) {
        let key = read_blob(reader).map_err(to_truncated)?;
        let value = read_blob(reader).map_err(to_truncated)?;
        pairs.push(ModMetaPair { key, value });
    }

    Ok(pairs)
}

fn read_blob<R: Read>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let size = reader.read_i32::<LittleEndian>()?;
    let mut bytes = vec![0u8; size.max(0) as usize];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Looks up the value for `key` (exact ASCII match), returning the first
/// matching pair if duplicates are present.
#[must_use]
pub fn find<'a>(pairs: &'a [ModMetaPair], key: &str) -> Option<&'a [u8]> {
    pairs
        .iter()
        .find(|pair| pair.key_is(key))
        .map(|pair| pair.value.as_slice())
}

/// Serializes `pairs` back into the `modmeta.info` wire format. Not part
/// of the unpacker's own pipeline — exists so the parser's inverse can be
/// exercised directly in tests (§8 invariant 4).
pub fn write<W: Write>(writer: &mut W, pairs: &[ModMetaPair]) -> std::io::Result<()> {
    writer.write_i32::<LittleEndian>(i32::try_from(pairs.len()).unwrap_or(i32::MAX))?;
    for pair in pairs {
        write_blob(writer, &pair.key)?;
        write_blob(writer, &pair.value)?;
    }
    Ok(())
}

fn write_blob<W: Write>(writer: &mut W, blob: &[u8]) -> std::io::Result<()> {
    writer.write_i32::<LittleEndian>(i32::try_from(blob.len()).unwrap_or(i32::MAX))?;
    writer.write_all(blob)?;
    Ok(())
}
