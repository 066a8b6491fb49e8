// src/map/subsector.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// A subsector: a convex leaf region of the BSP tree, bounded by a
/// contiguous run of segs. Packed record is two little-endian u16s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsector {
    pub seg_count: usize,
    pub first_seg: usize,
}

impl Subsector {
    /// Size of a packed subsector record.
    pub const LUMP_SIZE: usize = 4;

    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Subsector {
            seg_count: reader.read_u16::<LE>()? as usize,
            first_seg: reader.read_u16::<LE>()? as usize,
        })
    }
}
