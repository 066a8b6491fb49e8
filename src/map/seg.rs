// src/map/seg.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// A seg: one boundary piece of a subsector, cut from a parent linedef
/// by the node builder. Packed record is 12 bytes:
///
/// ```text
/// start u16, end u16, angle i16, linedef u16, side i16, offset i16
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seg {
    pub start: usize,
    pub end: usize,

    /// BAM angle of the seg, as stored by the node builder.
    pub angle: i16,

    /// Parent linedef this seg was cut from.
    pub linedef: usize,

    /// 0 if the seg runs along the linedef's right (front) side, 1 if it
    /// runs along the left (back) side.
    pub side: i16,

    /// Distance along the parent linedef to the start of this seg.
    pub offset: i16,
}

impl Seg {
    /// Size of a packed seg record.
    pub const LUMP_SIZE: usize = 12;

    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Seg {
            start: reader.read_u16::<LE>()? as usize,
            end: reader.read_u16::<LE>()? as usize,
            angle: reader.read_i16::<LE>()?,
            linedef: reader.read_u16::<LE>()? as usize,
            side: reader.read_i16::<LE>()?,
            offset: reader.read_i16::<LE>()?,
        })
    }
}
