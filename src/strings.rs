//! The UE4 string primitive (C4): a 32-bit little-endian length, counting
//! its own NUL terminator, followed by that many bytes of ASCII.

use bstr::BString;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Text read from or destined for a length-prefixed UE4 string field.
///
/// Held as a [`BString`] rather than a native `String` because the source
/// format makes no UTF-8 guarantee; it only promises ASCII, and a handful
/// of modded assets in the wild carry stray high-bit bytes in the header
/// name. `BString` lets us carry those through without a lossy re-encode.
pub type Ue4String = BString;

/// Reads one [`Ue4String`].
///
/// A negative length is a flag this format never sets in practice. Rather
/// than guess at how many bytes a negative count would imply, the field is
/// treated as consumed and an empty string is yielded, matching the
/// source's observed behavior.
pub fn read_ue4_string<R: Read>(reader: &mut R) -> io::Result<Ue4String> {
    let count = reader.read_i32::<LittleEndian>()?;
    if count <= 0 {
        return Ok(BString::from(Vec::new()));
    }

    let count = count as usize;
    let mut bytes = vec![0u8; count];
    reader.read_exact(&mut bytes)?;
    // The final byte is documented as a NUL terminator, but a malformed
    // file is accepted anyway rather than rejected.
    bytes.truncate(count - 1);
    Ok(BString::from(bytes))
}

/// Writes `text` as a [`Ue4String`]: `len(text) + 1` as an i32 LE count,
/// then the bytes of `text`, then a single NUL terminator.
pub fn write_ue4_string<W: Write>(writer: &mut W, text: &[u8]) -> io::Result<()> {
    let count = i32::try_from(text.len() + 1).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "string too long for a UE4String count")
    })?;
    writer.write_i32::<LittleEndian>(count)?;
    writer.write_all(text)?;
    writer.write_u8(0)?;
    Ok(())
}
