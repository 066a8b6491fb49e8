// src/bsp/mod.rs
// Side classification and box intersection primitives for BSP queries.
pub mod intersect;
pub mod side;

pub use intersect::box_intersects_line;
pub use side::{box_on_line_side, point_on_line_side, point_on_node_side};

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

// Enum for classifying box positions relative to a partition line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSide {
    Front,
    Back,
    Straddling,
}

impl LineSide {
    /// Maps a binary side indicator (0 = front, 1 = back) to the enum.
    pub fn from_side(side: usize) -> Self {
        if side == 0 {
            LineSide::Front
        } else {
            LineSide::Back
        }
    }
}

/// An axis-aligned bounding box in map coordinates. Doom maps are y-up,
/// so `top >= bottom` for a non-empty box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl BoundingBox {
    pub fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        BoundingBox {
            left,
            top,
            right,
            bottom,
        }
    }

    /// An inverted box that any `expand_point` call will snap to a point.
    pub fn new_empty() -> Self {
        BoundingBox {
            left: i16::MAX,
            top: i16::MIN,
            right: i16::MIN,
            bottom: i16::MAX,
        }
    }

    /// Reads the packed 8-byte form used inside node records: top, bottom,
    /// left, right, each a little-endian i16.
    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        let top = reader.read_i16::<LE>()?;
        let bottom = reader.read_i16::<LE>()?;
        let left = reader.read_i16::<LE>()?;
        let right = reader.read_i16::<LE>()?;
        Ok(BoundingBox {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn expand_point(&mut self, x: i16, y: i16) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.bottom = self.bottom.min(y);
        self.top = self.top.max(y);
    }

    pub fn width(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }

    pub fn height(&self) -> i32 {
        i32::from(self.top) - i32::from(self.bottom)
    }

    // Check if the bounding box contains a point
    pub fn contains_point(&self, x: i16, y: i16) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    // Checks if two bounding boxes intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.top >= other.bottom
            && self.bottom <= other.top
    }
}
