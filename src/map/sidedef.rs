// src/map/sidedef.rs

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// A sidedef in classic DOOM format (30 bytes total).
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field       type / size
/// ------  ----------  ------------
///  0-1    x_offset    i16
///  2-3    y_offset    i16
///  4-11   upper_tex   [u8; 8]
/// 12-19   lower_tex   [u8; 8]
/// 20-27   mid_tex     [u8; 8]
/// 28-29   sector      u16  (index into sector list)
/// ```
///
/// The query core never reads the texture fields; they are carried because
/// the geometry store owns the full sidedef record for its consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct SideDef {
    /// Horizontal texture offset (signed 16-bit in a WAD).
    pub x_offset: i16,

    /// Vertical texture offset (signed 16-bit in a WAD).
    pub y_offset: i16,

    /// Upper texture name, up to 8 chars (trimmed/padded in WAD).
    pub upper_tex: String,

    /// Lower texture name, up to 8 chars (trimmed/padded in WAD).
    pub lower_tex: String,

    /// Middle (a.k.a. "mid" or "normal") texture name, up to 8 chars.
    pub mid_tex: String,

    /// Sector this sidedef's wall faces into.
    pub sector: usize,
}

impl SideDef {
    /// Size of a packed sidedef record.
    pub const LUMP_SIZE: usize = 30;

    /// Reads a `SideDef` from its 30-byte packed lump format.
    /// Textures are typically uppercase, zero-padded. We trim trailing zeros
    /// (and spaces) for convenience.
    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        let x_offset = reader.read_i16::<LE>()?;
        let y_offset = reader.read_i16::<LE>()?;

        let upper_tex = read_tex8(reader)?;
        let lower_tex = read_tex8(reader)?;
        let mid_tex = read_tex8(reader)?;

        let sector = reader.read_u16::<LE>()? as usize;

        Ok(SideDef {
            x_offset,
            y_offset,
            upper_tex,
            lower_tex,
            mid_tex,
            sector,
        })
    }
}

/// Reads exactly 8 bytes of texture name, trimming trailing `\0` and spaces.
fn read_tex8<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;

    // Convert to ASCII/UTF-8 lossily, uppercase, then trim trailing `\0`/space.
    let raw = buf
        .iter()
        .map(|&c| c as char)
        .collect::<String>()
        .to_uppercase();

    let trimmed = raw.trim_end_matches(|ch: char| ch == '\0' || ch.is_ascii_whitespace());
    Ok(trimmed.to_string())
}
