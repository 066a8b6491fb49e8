// src/map/sector.rs

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// A sector in classic DOOM format (26 bytes).
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field          type / size
/// ------  -------------  ------------
///  0-1    floor_height   i16
///  2-3    ceiling_height i16
///  4-11   floor_tex      [u8; 8]
/// 12-19   ceiling_tex    [u8; 8]
/// 20-21   light          i16
/// 22-23   special        i16
/// 24-25   tag            i16
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    /// The floor height (in map units).
    pub floor_height: i16,

    /// The ceiling height (in map units).
    pub ceiling_height: i16,

    /// The name of the floor flat. Classic DOOM uses up to 8 chars (padded).
    pub floor_tex: String,

    /// The name of the ceiling flat, up to 8 chars (padded).
    pub ceiling_tex: String,

    /// Light level (0-255 in classic DOOM).
    pub light: i16,

    /// Special type (a.k.a. "effect" or "sector type").
    pub special: i16,

    /// Sector tag, used to link linedefs, etc.
    pub tag: i16,
}

impl Sector {
    /// Size of a packed sector record.
    pub const LUMP_SIZE: usize = 26;

    /// Reads a `Sector` from its 26-byte packed lump format.
    /// Textures are trimmed for trailing spaces/zeros.
    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        let floor_height = reader.read_i16::<LE>()?;
        let ceiling_height = reader.read_i16::<LE>()?;
        let floor_tex = read_flat8(reader)?;
        let ceiling_tex = read_flat8(reader)?;
        let light = reader.read_i16::<LE>()?;
        let special = reader.read_i16::<LE>()?;
        let tag = reader.read_i16::<LE>()?;

        Ok(Sector {
            floor_height,
            ceiling_height,
            floor_tex,
            ceiling_tex,
            light,
            special,
            tag,
        })
    }

    /// Returns the difference between ceiling and floor height.
    pub fn headroom(&self) -> i32 {
        i32::from(self.ceiling_height) - i32::from(self.floor_height)
    }
}

/// Helper: reads an 8-byte "flat name" from the lump.
/// Trims trailing `\0` and spaces, uppercases it.
fn read_flat8<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;

    let raw = buf
        .iter()
        .map(|&c| c as char)
        .collect::<String>()
        .to_uppercase();

    let trimmed = raw.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    Ok(trimmed.to_string())
}
