// src/bsp/intersect.rs
// Finite segment vs. axis-aligned box boundary test.

use crate::bsp::BoundingBox;

/// Returns true if the segment (x1, y1)-(x2, y2) crosses the boundary of
/// the box.
///
/// Each of the four box edges is tested independently: when the segment's
/// endpoints bracket an edge coordinate, the crossing point is found by
/// linear interpolation and accepted if it falls within the edge's span.
/// The interpolation runs in 32-bit arithmetic (the 16-bit deltas multiply
/// out past 16 bits) with native truncating division; every divisor is
/// nonzero because the guard on each branch requires the corresponding
/// coordinates to differ.
///
/// A segment that lies entirely inside the box crosses no edge and
/// reports false.
pub fn box_intersects_line(bbox: &BoundingBox, x1: i16, y1: i16, x2: i16, y2: i16) -> bool {
    let (x1, y1) = (i32::from(x1), i32::from(y1));
    let (x2, y2) = (i32::from(x2), i32::from(y2));
    let left = i32::from(bbox.left);
    let top = i32::from(bbox.top);
    let right = i32::from(bbox.right);
    let bottom = i32::from(bbox.bottom);

    if x1 < left && x2 >= left {
        let iy = y1 + (y2 - y1) * (left - x1) / (x2 - x1);
        if iy >= bottom && iy <= top {
            return true;
        }
    } else if x1 > right && x2 <= right {
        let iy = y1 + (y2 - y1) * (right - x1) / (x2 - x1);
        if iy >= bottom && iy <= top {
            return true;
        }
    }

    if y1 < bottom && y2 >= bottom {
        let ix = x1 + (x2 - x1) * (bottom - y1) / (y2 - y1);
        if ix >= left && ix <= right {
            return true;
        }
    } else if y1 > top && y2 <= top {
        let ix = x1 + (x2 - x1) * (top - y1) / (y2 - y1);
        if ix >= left && ix <= right {
            return true;
        }
    }

    false
}
