//! Line segments visualizing vertex normals.

use surfplot_geometry::Lattice;
use surfplot_math::Point3;

/// Length of a drawn normal, in world units.
pub const NORMAL_LENGTH: f64 = 0.1;

/// Two points per defined vertex: the vertex and the tip of its normal.
pub fn normal_segments(lattice: &Lattice, length: f64) -> Vec<Point3> {
    lattice
        .samples()
        .iter()
        .filter(|s| s.defined)
        .flat_map(|s| [s.position, s.position + length * s.normal])
        .collect()
}
