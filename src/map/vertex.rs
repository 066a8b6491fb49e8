// src/map/vertex.rs
use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl Vertex {
    /// Size of a packed vertex record (two little-endian i16).
    pub const LUMP_SIZE: usize = 4;

    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Vertex {
            x: reader.read_i16::<LE>()?,
            y: reader.read_i16::<LE>()?,
        })
    }

    pub fn matches(&self, tx: i16, ty: i16) -> bool {
        self.x == tx && self.y == ty
    }
}
