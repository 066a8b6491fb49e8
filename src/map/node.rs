// src/map/node.rs

use std::io::{self, Read};
use byteorder::{LE, ReadBytesExt};

use crate::bsp::BoundingBox;

/// Stored child references mark subsectors with the top bit of the index.
const SUBSECTOR_FLAG: u16 = 0x8000;

/// A decoded BSP node child reference: either another node or a subsector
/// leaf. The on-disk format packs the variant tag into the high bit of a
/// u16 index; it is decoded once here so the traversal loop dispatches on
/// the enum instead of masking bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Node(u16),
    Subsector(u16),
}

impl Child {
    pub fn from_raw(raw: u16) -> Self {
        if raw & SUBSECTOR_FLAG != 0 {
            Child::Subsector(raw & !SUBSECTOR_FLAG)
        } else {
            Child::Node(raw)
        }
    }
}

/// A BSP node in classic DOOM format (28 bytes).
///
/// Layout (all little-endian):
///
/// ```text
/// offset  field      type / size
/// ------  ---------  ------------
///  0-1    x          i16  (partition line origin)
///  2-3    y          i16
///  4-5    dx         i16  (partition line direction)
///  6-7    dy         i16
///  8-15   bbox[0]    4 x i16: top, bottom, left, right (right child)
/// 16-23   bbox[1]    4 x i16: top, bottom, left, right (left child)
/// 24-27   children   2 x u16, high bit set = subsector index
/// ```
///
/// Child slot 0 is the front (right) half-space, slot 1 the back (left)
/// half-space, matching the side indicator returned by
/// [`crate::bsp::point_on_node_side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub bbox: [BoundingBox; 2],
    pub children: [Child; 2],
}

impl Node {
    /// Size of a packed node record.
    pub const LUMP_SIZE: usize = 28;

    pub fn from_lump<R: Read>(reader: &mut R) -> io::Result<Self> {
        let x = reader.read_i16::<LE>()?;
        let y = reader.read_i16::<LE>()?;
        let dx = reader.read_i16::<LE>()?;
        let dy = reader.read_i16::<LE>()?;
        let bbox = [
            BoundingBox::from_lump(reader)?,
            BoundingBox::from_lump(reader)?,
        ];
        let children = [
            Child::from_raw(reader.read_u16::<LE>()?),
            Child::from_raw(reader.read_u16::<LE>()?),
        ];

        Ok(Node {
            x,
            y,
            dx,
            dy,
            bbox,
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_decodes_node_index() {
        assert_eq!(Child::from_raw(0), Child::Node(0));
        assert_eq!(Child::from_raw(0x7FFF), Child::Node(0x7FFF));
    }

    #[test]
    fn test_child_decodes_subsector_index() {
        assert_eq!(Child::from_raw(0x8000), Child::Subsector(0));
        assert_eq!(Child::from_raw(0x8005), Child::Subsector(5));
        assert_eq!(Child::from_raw(0xFFFF), Child::Subsector(0x7FFF));
    }

    #[test]
    fn test_node_from_lump() {
        let mut data = Vec::new();
        for value in [64i16, 0, 0, 128] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        // Right child box, then left child box: top, bottom, left, right.
        for value in [128i16, 0, 64, 128, 128, 0, 0, 64] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&0x8000u16.to_le_bytes());
        data.extend_from_slice(&0x0000u16.to_le_bytes());

        let node = Node::from_lump(&mut &data[..]).unwrap();
        assert_eq!((node.x, node.y, node.dx, node.dy), (64, 0, 0, 128));
        assert_eq!(node.bbox[0], BoundingBox::new(64, 128, 128, 0));
        assert_eq!(node.bbox[1], BoundingBox::new(0, 128, 64, 0));
        assert_eq!(node.children, [Child::Subsector(0), Child::Node(0)]);
    }
}
