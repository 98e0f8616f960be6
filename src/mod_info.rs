//! `mod.info` parser (C5): one header UE4 string, an int32 map count, then
//! that many map-name UE4 strings.

use crate::{error::Error, strings::{read_ue4_string, Ue4String}, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::{io::Read, path::Path};

/// The parsed contents of a `mod.info` file: the header string followed by
/// the map names, in file order.
///
/// The header is retained in [`ModInfo::all`] alongside the map names
/// because the synthesizer is bug-compatible with the source implementation,
/// which writes the entire returned list — header included — back out
/// under `map_count` (see DESIGN.md). [`ModInfo::header`] and
/// [`ModInfo::maps`] are exposed separately for callers that want the
/// corrected view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModInfo {
    all: Vec<Ue4String>,
}

impl ModInfo {
    /// The full list as read from the file: header string first, then
    /// `map_count` map names. This is what the synthesizer consumes.
    #[must_use]
    pub fn all(&self) -> &[Ue4String] {
        &self.all
    }

    /// The header/internal-name string, if present.
    #[must_use]
    pub fn header(&self) -> Option<&Ue4String> {
        self.all.first()
    }

    /// Just the map names, excluding the header.
    #[must_use]
    pub fn maps(&self) -> &[Ue4String] {
        self.all.get(1..).unwrap_or_default()
    }
}

/// Parses a `mod.info` byte stream.
pub fn parse<R: Read>(reader: &mut R, path: &Path) -> Result<ModInfo> {
    let to_truncated = |source| Error::MetadataTruncated {
        file: path.to_path_buf(),
        source,
    };

    let header = read_ue4_string(reader).map_err(to_truncated)?;
    let map_count = reader.read_i32::<LittleEndian>().map_err(to_truncated)?;

    let mut all = Vec::with_capacity(1 + map_count.max(0) as usize);
    all.push(header);
    for _ in 0..map_count.max(0) {
        all.push(read_ue4_string(reader).map_err(to_truncated)?);
    }

    Ok(ModInfo { all })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::write_ue4_string;
    use std::io::Cursor;

    fn build(header: &str, maps: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_ue4_string(&mut buf, header.as_bytes()).unwrap();
        buf.extend_from_slice(&(maps.len() as i32).to_le_bytes());
        for map in maps {
            write_ue4_string(&mut buf, map.as_bytes()).unwrap();
        }
        buf
    }

    #[test]
    fn parses_header_and_maps_in_order() {
        let bytes = build("StructuresPlusMod", &["TheIsland", "Ragnarok"]);
        let mut cursor = Cursor::new(bytes);
        let info = parse(&mut cursor, Path::new("mod.info")).unwrap();

        assert_eq!(info.header().unwrap(), "StructuresPlusMod");
        assert_eq!(info.maps(), ["TheIsland", "Ragnarok"]);
        assert_eq!(info.all().len(), 3);
    }

    #[test]
    fn zero_maps_still_retains_header() {
        let bytes = build("EmptyMapsMod", &[]);
        let mut cursor = Cursor::new(bytes);
        let info = parse(&mut cursor, Path::new("mod.info")).unwrap();

        assert_eq!(info.all().len(), 1);
        assert!(info.maps().is_empty());
    }

    #[test]
    fn truncated_stream_is_fatal() {
        let bytes = build("Mod", &["Map1", "Map2"]);
        let truncated = &bytes[..bytes.len() - 2];
        let mut cursor = Cursor::new(truncated);
        let err = parse(&mut cursor, Path::new("mod.info")).unwrap_err();
        assert!(matches!(err, Error::MetadataTruncated { .. }));
    }
}
