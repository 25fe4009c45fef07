//! Finite-difference normal estimation from up to eight grid neighbors.

use surfplot_core::Tolerance;
use surfplot_math::{Point3, Vector3};

/// Parameter-space directions of the eight neighbors, as `(column, row)`
/// unit steps, in clockwise order starting east: E, SE, S, SW, W, NW, N, NE.
///
/// With this order `cross(next, current)` points along +z for a surface that
/// preserves the orientation of the parameter plane.
pub const COMPASS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, -1.0),
    (0.0, -1.0),
    (-1.0, -1.0),
    (-1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Pairs spanning half a turn or more of the compass cannot be oriented.
const MAX_PAIR_GAP: usize = 4;

/// Estimate the unit normal at `center` from its compass neighbors.
///
/// `neighbors[k]` is the position in direction [`COMPASS`]`[k]`, or `None`
/// where the surface is undefined. Falls back to `+z` when fewer than two
/// usable, non-colinear neighbors remain.
pub fn estimate_normal(center: Point3, neighbors: &[Option<Point3>; 8], tol: Tolerance) -> Vector3 {
    let tangents: Vec<(usize, Vector3)> = neighbors
        .iter()
        .enumerate()
        .filter_map(|(slot, n)| {
            let t = (*n)? - center;
            tol.usable_tangent(t.length()).then_some((slot, t))
        })
        .collect();

    let mut sum = Vector3::ZERO;
    let count = tangents.len();
    if count >= 2 {
        for k in 0..count {
            let (slot_a, a) = tangents[k];
            let (slot_b, b) = tangents[(k + 1) % count];
            let gap = (slot_b + COMPASS.len() - slot_a) % COMPASS.len();
            if gap >= MAX_PAIR_GAP {
                continue;
            }

            let n = b.cross(a);
            let len = n.length();
            if !tol.usable_normal(len) {
                continue;
            }
            let n = n / len;

            // Keep every candidate on the side of the running sum.
            if sum.dot(n) < 0.0 {
                sum -= n;
            } else {
                sum += n;
            }
        }
    }

    let len = sum.length();
    if tol.usable_normal(len) {
        sum / len
    } else {
        Vector3::Z
    }
}
