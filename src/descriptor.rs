//! `.mod` descriptor synthesizer (C7): composes the parsed `mod.info`
//! strings, `modmeta.info` pairs, and the mod ID into the fixed binary
//! layout the game loader expects.

use crate::{
    mod_meta,
    model::ModMetaPair,
    strings::{write_ue4_string, Ue4String},
};
use byteorder::{LittleEndian, WriteBytesExt};

/// Empirically discovered constant the game loader checks for. Do not
/// change.
const MAGIC: u32 = 0xFF22_FFF3;

/// Both marker fields in the layout are this literal value.
const MARKER: u32 = 2;

/// Builds the byte layout of a synthesized `.mod` descriptor.
///
/// `mod_info` is the full list returned by [`crate::mod_info::parse`]
/// (header string plus map names) and is written back verbatim under
/// `map_count` — this implementation is intentionally bug-compatible with
/// the source: see DESIGN.md for why the header ends up counted as a
/// phantom map name.
#[must_use]
pub fn build(mod_id: u32, mod_info: &[Ue4String], mod_meta: &[ModMetaPair]) -> Vec<u8> {
    let mut out = Vec::new();

    out.write_u32::<LittleEndian>(mod_id).unwrap();
    out.extend_from_slice(&[0u8; 4]);

    write_ue4_string(&mut out, b"ModName").unwrap();
    write_ue4_string(&mut out, b"").unwrap();

    out.write_u32::<LittleEndian>(mod_info.len() as u32).unwrap();
    for name in mod_info {
        write_ue4_string(&mut out, name).unwrap();
    }

    out.write_u32::<LittleEndian>(MAGIC).unwrap();
    out.write_u32::<LittleEndian>(MARKER).unwrap();

    let mod_type: u8 = if mod_meta::find(mod_meta, "ModType").is_some() {
        1
    } else {
        0
    };
    out.write_u8(mod_type).unwrap();

    out.write_u32::<LittleEndian>(MARKER).unwrap();

    out.write_u32::<LittleEndian>(mod_meta.len() as u32).unwrap();
    for pair in mod_meta {
        write_ue4_string(&mut out, &pair.key).unwrap();
        write_ue4_string(&mut out, &pair.value).unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> ModMetaPair {
        ModMetaPair {
            key: key.as_bytes().to_vec(),
            value: value.as_bytes().to_vec(),
        }
    }

    #[test]
    fn mod_id_731604991_empty_maps_one_pair() {
        let mod_meta = vec![pair("ModType", "1")];
        let bytes = build(731_604_991, &[], &mod_meta);

        // 731_604_991 == 0x2B9B67FF; LE bytes are FF 67 9B 2B.
        assert_eq!(&bytes[0..8], &[0xFF, 0x67, 0x9B, 0x2B, 0x00, 0x00, 0x00, 0x00]);

        // "ModName" UE4String starts at offset 8: count=8, then bytes, NUL.
        assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
        assert_eq!(&bytes[12..19], b"ModName");
        assert_eq!(bytes[19], 0);

        // Empty UE4String: count=1, one NUL.
        assert_eq!(&bytes[20..24], &1u32.to_le_bytes());
        assert_eq!(bytes[24], 0);

        // map_count = 0
        let map_count_offset = 25;
        assert_eq!(&bytes[map_count_offset..map_count_offset + 4], &0u32.to_le_bytes());

        let magic_offset = map_count_offset + 4;
        assert_eq!(
            &bytes[magic_offset..magic_offset + 4],
            &[0xF3, 0xFF, 0x22, 0xFF]
        );

        let marker_offset = magic_offset + 4;
        assert_eq!(&bytes[marker_offset..marker_offset + 4], &2u32.to_le_bytes());

        let mod_type_offset = marker_offset + 4;
        assert_eq!(bytes[mod_type_offset], 1);
    }

    #[test]
    fn mod_type_byte_is_zero_without_mod_type_pair() {
        let mod_meta = vec![pair("GUID", "abc123")];
        let bytes = build(1, &[], &mod_meta);

        // Walk the fixed prefix: id(4) + pad(4) + ModName UE4String(12) +
        // empty UE4String(5) + map_count(4) + magic(4) + marker(4).
        let mod_type_offset = 4 + 4 + 12 + 5 + 4 + 4 + 4;
        assert_eq!(bytes[mod_type_offset], 0);
    }

    #[test]
    fn mod_info_header_is_written_as_phantom_map_bug_compatibly() {
        let mod_info: Vec<Ue4String> =
            vec!["StructuresPlusMod".into(), "TheIsland".into()];
        let bytes = build(1, &mod_info, &[]);

        let map_count_offset = 4 + 4 + 12 + 5;
        let map_count = u32::from_le_bytes(
            bytes[map_count_offset..map_count_offset + 4]
                .try_into()
                .unwrap(),
        );
        assert_eq!(map_count, 2);
    }

    #[test]
    fn is_deterministic() {
        let mod_meta = vec![pair("ModType", "1"), pair("Version", "2")];
        let mod_info: Vec<Ue4String> = vec!["Mod".into(), "Map".into()];

        let a = build(42, &mod_info, &mod_meta);
        let b = build(42, &mod_info, &mod_meta);
        assert_eq!(a, b);
    }

    #[test]
    fn pair_count_and_pairs_follow_mod_type_block() {
        let mod_meta = vec![pair("ModType", "1"), pair("Extra", "x")];
        let bytes = build(1, &[], &mod_meta);

        // pair_count sits right after the second marker.
        let pair_count_offset = 4 + 4 + 12 + 5 + 4 + 4 + 4 + 1 + 4;
        let pair_count = u32::from_le_bytes(
            bytes[pair_count_offset..pair_count_offset + 4]
                .try_into()
                .unwrap(),
        );
        assert_eq!(pair_count, 2);
    }
}
