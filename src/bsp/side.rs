// src/bsp/side.rs
// Point and box side classification against partition lines.

use crate::bsp::{BoundingBox, LineSide};
use crate::map::Node;

/// Returns which side of a node's partition line the point (x, y) is on:
/// 0 for the front half-space, 1 for the back half-space. The result
/// indexes the node's `children` pair directly.
///
/// Every point maps to a definite side, including points exactly on the
/// partition. Purely vertical and horizontal partitions are resolved by
/// coordinate comparison, tie-broken by the sign of the direction delta so
/// the answer stays consistent with the general cross-product test. The
/// general case keeps a sign-XOR guard: when the sign bits of the four
/// operands disagree, the side falls out of the signs alone, without
/// forming either product.
pub fn point_on_node_side(x: i16, y: i16, node: &Node) -> usize {
    if node.dx == 0 {
        return if x <= node.x {
            usize::from(node.dy > 0)
        } else {
            usize::from(node.dy < 0)
        };
    }
    if node.dy == 0 {
        return if y <= node.y {
            usize::from(node.dx < 0)
        } else {
            usize::from(node.dx > 0)
        };
    }

    // Translate into the node-local frame. Wrapping matches the 16-bit
    // narrowing the on-disk coordinate range implies.
    let x = x.wrapping_sub(node.x);
    let y = y.wrapping_sub(node.y);

    if (node.dy ^ node.dx ^ x ^ y) < 0 {
        return usize::from((node.dy ^ x) < 0);
    }

    usize::from(i32::from(y) * i32::from(node.dx) >= i32::from(node.dy) * i32::from(x))
}

/// Single-tier variant of [`point_on_node_side`] for a line whose origin
/// and direction deltas are already at hand. Same front/back convention.
pub fn point_on_line_side(x: i16, y: i16, x1: i16, y1: i16, dx: i16, dy: i16) -> usize {
    if dx == 0 {
        return if x <= x1 {
            usize::from(dy > 0)
        } else {
            usize::from(dy < 0)
        };
    }
    if dy == 0 {
        return if y <= y1 {
            usize::from(dx < 0)
        } else {
            usize::from(dx > 0)
        };
    }

    let x = x.wrapping_sub(x1);
    let y = y.wrapping_sub(y1);

    usize::from(i32::from(y) * i32::from(dx) >= i32::from(dy) * i32::from(x))
}

// Slope classes for picking the extreme corners of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlopeType {
    Horizontal,
    Vertical,
    Positive,
    Negative,
}

fn classify_slope(dx: i16, dy: i16) -> SlopeType {
    if dx == 0 {
        SlopeType::Vertical
    } else if dy == 0 {
        SlopeType::Horizontal
    } else if (dx > 0) == (dy > 0) {
        // dy/dx truncates toward zero for shallow slopes, so classify by
        // sign agreement instead of the quotient.
        SlopeType::Positive
    } else {
        SlopeType::Negative
    }
}

/// Classifies a box against the infinite line through (x1, y1)-(x2, y2):
/// entirely in front, entirely behind, or straddling both sides.
///
/// Only the two box corners that are extreme for the line's slope class
/// need testing; if they agree, every corner agrees. The axis-aligned
/// classes flip both partial results when the delta runs negative, which
/// keeps the front/back convention aligned with [`point_on_node_side`].
pub fn box_on_line_side(bbox: &BoundingBox, x1: i16, y1: i16, x2: i16, y2: i16) -> LineSide {
    let dx = x2.wrapping_sub(x1);
    let dy = y2.wrapping_sub(y1);

    let (p1, p2) = match classify_slope(dx, dy) {
        SlopeType::Horizontal => {
            let mut p1 = usize::from(bbox.top > y1);
            let mut p2 = usize::from(bbox.bottom > y1);
            if dx < 0 {
                p1 ^= 1;
                p2 ^= 1;
            }
            (p1, p2)
        }
        SlopeType::Vertical => {
            let mut p1 = usize::from(bbox.right < x1);
            let mut p2 = usize::from(bbox.left < x1);
            if dy < 0 {
                p1 ^= 1;
                p2 ^= 1;
            }
            (p1, p2)
        }
        SlopeType::Positive => (
            point_on_line_side(bbox.left, bbox.top, x1, y1, dx, dy),
            point_on_line_side(bbox.right, bbox.bottom, x1, y1, dx, dy),
        ),
        SlopeType::Negative => (
            point_on_line_side(bbox.right, bbox.top, x1, y1, dx, dy),
            point_on_line_side(bbox.left, bbox.bottom, x1, y1, dx, dy),
        ),
    };

    if p1 == p2 {
        LineSide::from_side(p1)
    } else {
        LineSide::Straddling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i16, y: i16, dx: i16, dy: i16) -> Node {
        Node {
            x,
            y,
            dx,
            dy,
            bbox: [BoundingBox::new_empty(), BoundingBox::new_empty()],
            children: [crate::map::Child::Node(0), crate::map::Child::Node(0)],
        }
    }

    #[test]
    fn test_horizontal_partition_sides() {
        // Partition through (0,0) pointing +x: front is below the line.
        let n = node(0, 0, 64, 0);
        assert_eq!(point_on_node_side(10, -5, &n), 0);
        assert_eq!(point_on_node_side(10, 5, &n), 1);
        // On the line counts as "below".
        assert_eq!(point_on_node_side(10, 0, &n), 0);
    }

    #[test]
    fn test_horizontal_partition_flips_with_dx_sign() {
        let n = node(0, 0, -64, 0);
        assert_eq!(point_on_node_side(10, -5, &n), 1);
        assert_eq!(point_on_node_side(10, 5, &n), 0);
        assert_eq!(point_on_node_side(10, 0, &n), 1);
    }

    #[test]
    fn test_vertical_partition_sides() {
        let n = node(64, 0, 0, 128);
        assert_eq!(point_on_node_side(63, 50, &n), 1);
        assert_eq!(point_on_node_side(64, 50, &n), 1);
        assert_eq!(point_on_node_side(65, 50, &n), 0);

        let n = node(64, 0, 0, -128);
        assert_eq!(point_on_node_side(63, 50, &n), 0);
        assert_eq!(point_on_node_side(64, 50, &n), 0);
        assert_eq!(point_on_node_side(65, 50, &n), 1);
    }

    #[test]
    fn test_general_partition_sides() {
        // Diagonal through the origin pointing northeast.
        let n = node(0, 0, 64, 64);
        assert_eq!(point_on_node_side(10, 20, &n), 1);
        assert_eq!(point_on_node_side(20, 10, &n), 0);
        // Exactly on the line resolves to the back side.
        assert_eq!(point_on_node_side(32, 32, &n), 1);
    }

    #[test]
    fn test_extreme_coordinates_match_wide_reference() {
        let n = node(0, 0, 32767, 32767);
        for &(x, y) in &[
            (32767i16, -32768i16),
            (-32768, 32767),
            (32767, 32767),
            (-32768, -32768),
            (1, -1),
        ] {
            // i64 never overflows for 16-bit inputs, so it serves as the
            // arbitrary-precision reference.
            let expected = usize::from(
                i64::from(y) * i64::from(n.dx) >= i64::from(n.dy) * i64::from(x),
            );
            assert_eq!(point_on_node_side(x, y, &n), expected, "point ({x}, {y})");
        }
    }

    #[test]
    fn test_translation_wraps_like_the_packed_format() {
        // 32767 - (-32768) wraps to -1 in 16 bits; the classification must
        // follow the wrapped value.
        let n = node(-32768, -32768, 1, 1);
        assert_eq!(point_on_node_side(32767, 32767, &n), 1);

        // Here the wrapped and unwrapped translations land on opposite
        // sides: the wrapped x of -1 puts the point behind the partition.
        let n = node(-32768, 0, 1, 2);
        assert_eq!(point_on_node_side(32767, 5, &n), 1);
    }

    #[test]
    fn test_point_on_line_side_matches_node_test() {
        let n = node(16, -16, 48, 32);
        for &(x, y) in &[(0i16, 0i16), (100, -50), (16, -16), (-64, 64), (64, 16)] {
            assert_eq!(
                point_on_line_side(x, y, n.x, n.y, n.dx, n.dy),
                point_on_node_side(x, y, &n),
                "point ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_box_straddles_horizontal_line() {
        let bbox = BoundingBox::new(-10, 10, 10, -10);
        assert_eq!(box_on_line_side(&bbox, -20, 0, 20, 0), LineSide::Straddling);
    }

    #[test]
    fn test_box_on_one_side_of_horizontal_line() {
        let bbox = BoundingBox::new(-10, 30, 10, 20);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 40, 0), LineSide::Back);
        // Reversing the line swaps front and back.
        assert_eq!(box_on_line_side(&bbox, 40, 0, 0, 0), LineSide::Front);
    }

    #[test]
    fn test_box_on_one_side_of_vertical_line() {
        let bbox = BoundingBox::new(5, 10, 15, -10);
        assert_eq!(box_on_line_side(&bbox, 0, -20, 0, 20), LineSide::Front);
        assert_eq!(box_on_line_side(&bbox, 0, 20, 0, -20), LineSide::Back);
    }

    #[test]
    fn test_box_against_sloped_lines() {
        let bbox = BoundingBox::new(-10, 10, 10, -10);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 10, 10), LineSide::Straddling);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 10, -10), LineSide::Straddling);

        // Box entirely below-right of the rising diagonal.
        let bbox = BoundingBox::new(20, 10, 40, -10);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 10, 10), LineSide::Front);
        assert_eq!(box_on_line_side(&bbox, 10, 10, 0, 0), LineSide::Back);
    }

    #[test]
    fn test_shallow_slope_is_not_misclassified() {
        // dy/dx truncates to 0 in integer division; the box below this
        // near-horizontal line must still classify as a definite side.
        let bbox = BoundingBox::new(10, -5, 90, -20);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 100, 1), LineSide::Front);
        let bbox = BoundingBox::new(10, 20, 90, 5);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 100, 1), LineSide::Back);

        // Straddle that only the positive-slope corner pair can see; the
        // negative-slope pair sits entirely on the back side.
        let bbox = BoundingBox::new(-50, 2, 90, 0);
        assert_eq!(box_on_line_side(&bbox, 0, 0, 100, 1), LineSide::Straddling);
    }

    #[test]
    fn test_box_side_agrees_with_corner_classification() {
        // When all four corners classify alike, the box test must return
        // that side and never report a straddle.
        let boxes = [
            BoundingBox::new(-40, -10, -20, -30),
            BoundingBox::new(20, 40, 40, 20),
            BoundingBox::new(-8, 8, 8, -8),
            BoundingBox::new(100, 130, 140, 90),
        ];
        let lines = [
            (0i16, 0i16, 64i16, 0i16),
            (0, 0, 0, 64),
            (0, 0, 48, 48),
            (0, 0, 48, -48),
            (-16, 8, 80, 24),
        ];
        for bbox in &boxes {
            for &(x1, y1, x2, y2) in &lines {
                let dx = x2 - x1;
                let dy = y2 - y1;
                let corners = [
                    point_on_line_side(bbox.left, bbox.top, x1, y1, dx, dy),
                    point_on_line_side(bbox.right, bbox.top, x1, y1, dx, dy),
                    point_on_line_side(bbox.left, bbox.bottom, x1, y1, dx, dy),
                    point_on_line_side(bbox.right, bbox.bottom, x1, y1, dx, dy),
                ];
                let result = box_on_line_side(bbox, x1, y1, x2, y2);
                if corners.iter().all(|&c| c == corners[0]) {
                    assert_eq!(
                        result,
                        LineSide::from_side(corners[0]),
                        "box {bbox:?} vs line ({x1},{y1})-({x2},{y2})"
                    );
                } else {
                    assert_eq!(
                        result,
                        LineSide::Straddling,
                        "box {bbox:?} vs line ({x1},{y1})-({x2},{y2})"
                    );
                }
            }
        }
    }
}
