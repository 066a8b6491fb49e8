// src/map/linedef.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

/// A raw sidedef reference of 0xFFFF marks a one-sided line.
const NO_SIDEDEF: u16 = 0xFFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDef {
    pub start: usize,
    pub end: usize,
    pub flags: i16,
    pub special: i16,
    pub tag: i16,
    pub right: Option<usize>,
    pub left: Option<usize>,
}

impl LineDef {
    /// Size of a packed linedef record (seven little-endian 16-bit fields).
    pub const LUMP_SIZE: usize = 14;

    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(LineDef {
            start: reader.read_u16::<LE>()? as usize,
            end: reader.read_u16::<LE>()? as usize,
            flags: reader.read_i16::<LE>()?,
            special: reader.read_i16::<LE>()?,
            tag: reader.read_i16::<LE>()?,
            right: read_sidedef_ref(reader)?,
            left: read_sidedef_ref(reader)?,
        })
    }

    /// Returns the sidedef index facing the given side: 0 for the right
    /// (front) side, anything else for the left (back) side.
    pub fn sidedef_for(&self, side: i16) -> Option<usize> {
        if side == 0 {
            self.right
        } else {
            self.left
        }
    }

    pub fn is_two_sided(&self) -> bool {
        self.right.is_some() && self.left.is_some()
    }
}

fn read_sidedef_ref<R: Read>(reader: &mut R) -> io::Result<Option<usize>> {
    let raw = reader.read_u16::<LE>()?;
    if raw == NO_SIDEDEF {
        Ok(None)
    } else {
        Ok(Some(raw as usize))
    }
}
