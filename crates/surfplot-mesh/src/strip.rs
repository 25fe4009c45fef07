//! Triangle-strip topology over a partially defined lattice.
//!
//! Each row of cells is emitted as one strip. Fully defined cells extend the
//! running strip by their left edge `(upper-left, lower-left)`; cells with a
//! single missing corner contribute one stand-alone triangle; cells with two
//! or more missing corners break the strip. Breaks are [`RESTART_INDEX`]
//! markers, never emitted twice in a row and never at the start.

use surfplot_geometry::Lattice;

use crate::RESTART_INDEX;

/// Build the triangle-strip index buffer for `lattice`.
///
/// A fully defined `rows x columns` lattice yields
/// `(rows - 1) * (2 * columns + 1)` indices, one restart per row of cells.
pub fn strip_indices(lattice: &Lattice) -> Vec<u32> {
    let rows = lattice.rows();
    let cols = lattice.columns();
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let idx = |i: usize, j: usize| lattice.index(i, j) as u32;
    let mut out = Vec::with_capacity((rows - 1) * (2 * cols + 1));

    for i in 0..rows - 1 {
        // No strip is running at the start of a row.
        let mut broken = true;

        for j in 0..cols - 1 {
            let (ul, ll, ur, lr) = (idx(i, j), idx(i + 1, j), idx(i, j + 1), idx(i + 1, j + 1));
            let defined = [
                lattice.is_defined(i, j),
                lattice.is_defined(i + 1, j),
                lattice.is_defined(i, j + 1),
                lattice.is_defined(i + 1, j + 1),
            ];

            match defined.iter().filter(|&&d| d).count() {
                4 => {
                    out.extend_from_slice(&[ul, ll]);
                    broken = false;
                }
                3 => {
                    let triangle = match defined {
                        [_, _, _, false] => [ul, ll, ur],
                        [_, false, _, _] => [ul, lr, ur],
                        [_, _, false, _] => [ul, ll, lr],
                        _ => [ur, ll, lr],
                    };
                    // Triangles starting with the left edge continue a running
                    // strip; the others need it closed first.
                    if !broken && triangle[..2] != [ul, ll] {
                        out.extend_from_slice(&[ul, ll]);
                        out.push(RESTART_INDEX);
                    }
                    out.extend_from_slice(&triangle);
                    out.push(RESTART_INDEX);
                    broken = true;
                }
                _ => {
                    if !broken {
                        // Close the previous full cell with its right edge.
                        out.extend_from_slice(&[ul, ll]);
                        out.push(RESTART_INDEX);
                        broken = true;
                    }
                }
            }
        }

        if !broken {
            out.extend_from_slice(&[idx(i, cols - 1), idx(i + 1, cols - 1)]);
            out.push(RESTART_INDEX);
        }
    }

    out
}

/// Expand a restart-separated strip into independent triangles.
///
/// Odd triangles of each run have their first two vertices swapped so that
/// every triangle keeps the strip's winding. Degenerate triangles are dropped.
pub fn strip_to_triangles(strip: &[u32]) -> Vec<[u32; 3]> {
    let mut triangles = Vec::new();
    for run in strip.split(|&i| i == RESTART_INDEX) {
        for (k, w) in run.windows(3).enumerate() {
            let tri = if k % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            };
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                triangles.push(tri);
            }
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfplot_geometry::GridSample;
    use surfplot_math::{DVec3, Point2, Vector3};

    /// Lattice whose vertex `(i, j)` sits at `(j, -i, 0)`; `mask[k]` marks
    /// sample `k` as defined.
    fn lattice(rows: usize, cols: usize, mask: &[bool]) -> Lattice {
        let samples = (0..rows * cols)
            .map(|k| {
                if mask[k] {
                    GridSample {
                        position: DVec3::new((k % cols) as f64, -((k / cols) as f64), 0.0),
                        texcoord: Point2::ZERO,
                        normal: Vector3::Z,
                        defined: true,
                    }
                } else {
                    GridSample::undefined(Point2::ZERO)
                }
            })
            .collect();
        Lattice::new(rows, cols, samples).unwrap()
    }

    fn mask_from_bits(bits: u32, n: usize) -> Vec<bool> {
        (0..n).map(|k| bits & (1 << k) != 0).collect()
    }

    /// Triangles every cell should contribute: 2 when full, 1 with one
    /// corner missing, otherwise none.
    fn expected_triangles(lat: &Lattice) -> usize {
        let mut count = 0;
        for i in 0..lat.rows() - 1 {
            for j in 0..lat.columns() - 1 {
                let defined = [(i, j), (i + 1, j), (i, j + 1), (i + 1, j + 1)]
                    .iter()
                    .filter(|&&(r, c)| lat.is_defined(r, c))
                    .count();
                count += match defined {
                    4 => 2,
                    3 => 1,
                    _ => 0,
                };
            }
        }
        count
    }

    fn check_invariants(lat: &Lattice) {
        let strip = strip_indices(lat);
        let cols = lat.columns();

        assert_ne!(strip.first(), Some(&RESTART_INDEX), "leading restart");
        for pair in strip.windows(2) {
            assert!(
                !(pair[0] == RESTART_INDEX && pair[1] == RESTART_INDEX),
                "consecutive restarts in {strip:?}"
            );
        }

        let triangles = strip_to_triangles(&strip);
        assert_eq!(triangles.len(), expected_triangles(lat), "strip {strip:?}");

        for tri in &triangles {
            let cells: Vec<(usize, usize)> =
                tri.iter().map(|&v| (v as usize / cols, v as usize % cols)).collect();
            for &(r, c) in &cells {
                assert!(lat.is_defined(r, c), "triangle {tri:?} uses undefined vertex");
            }
            let rs = cells.iter().map(|c| c.0);
            let cs = cells.iter().map(|c| c.1);
            assert!(rs.clone().max().unwrap() - rs.min().unwrap() <= 1);
            assert!(cs.clone().max().unwrap() - cs.min().unwrap() <= 1);

            // Counter-clockwise when viewed from +z.
            let p: Vec<DVec3> = tri
                .iter()
                .map(|&v| lat.samples()[v as usize].position)
                .collect();
            let area = (p[1] - p[0]).cross(p[2] - p[0]).z;
            assert!(area > 0.0, "triangle {tri:?} is clockwise");
        }
    }

    #[test]
    fn test_fully_defined_counts() {
        let lat = lattice(3, 4, &[true; 12]);
        let strip = strip_indices(&lat);
        assert_eq!(strip.len(), 2 * (2 * 4 + 1));
        assert_eq!(
            strip,
            vec![0, 4, 1, 5, 2, 6, 3, 7, RESTART_INDEX, 4, 8, 5, 9, 6, 10, 7, 11, RESTART_INDEX]
        );
        // Only the row terminators are restarts.
        let restarts = strip.iter().filter(|&&i| i == RESTART_INDEX).count();
        assert_eq!(restarts, 2);
        assert_eq!(strip_to_triangles(&strip).len(), 2 * 2 * 3);
    }

    #[test]
    fn test_single_undefined_interior_point() {
        let mut mask = [true; 25];
        mask[12] = false;
        let lat = lattice(5, 5, &mask);
        let triangles = strip_to_triangles(&strip_indices(&lat));
        assert_eq!(triangles.len(), 32 - 4);
        assert!(triangles.iter().all(|t| !t.contains(&12)));
        check_invariants(&lat);
    }

    #[test]
    fn test_every_single_cell_pattern() {
        for bits in 0..16 {
            let lat = lattice(2, 2, &mask_from_bits(bits, 4));
            check_invariants(&lat);
        }
    }

    #[test]
    fn test_single_cell_missing_corner_triangles() {
        // Vertex order: 0 = ul, 1 = ur, 2 = ll, 3 = lr.
        let cases = [
            ([true, true, true, false], vec![0, 2, 1, RESTART_INDEX]),
            ([true, true, false, true], vec![0, 3, 1, RESTART_INDEX]),
            ([true, false, true, true], vec![0, 2, 3, RESTART_INDEX]),
            ([false, true, true, true], vec![1, 2, 3, RESTART_INDEX]),
        ];
        for (mask, expected) in cases {
            assert_eq!(strip_indices(&lattice(2, 2, &mask)), expected);
        }
    }

    #[test]
    fn test_every_3x3_pattern() {
        for bits in 0..(1 << 9) {
            check_invariants(&lattice(3, 3, &mask_from_bits(bits, 9)));
        }
    }

    #[test]
    fn test_every_2x5_pattern() {
        for bits in 0..(1 << 10) {
            check_invariants(&lattice(2, 5, &mask_from_bits(bits, 10)));
        }
    }

    #[test]
    fn test_full_cell_then_hole_closes_strip() {
        // Row of three cells: full, empty, full.
        let mask = [true, true, false, true, true, true, true, false, true, true];
        let lat = lattice(2, 5, &mask);
        let strip = strip_indices(&lat);
        assert_eq!(
            strip,
            vec![0, 5, 1, 6, RESTART_INDEX, 3, 8, 4, 9, RESTART_INDEX]
        );
    }

    #[test]
    fn test_all_undefined_is_empty() {
        let lat = lattice(4, 4, &[false; 16]);
        assert!(strip_indices(&lat).is_empty());
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(strip_indices(&lattice(1, 5, &[true; 5])).is_empty());
        assert!(strip_indices(&lattice(5, 1, &[true; 5])).is_empty());
        assert!(strip_indices(&Lattice::default()).is_empty());
    }
}
