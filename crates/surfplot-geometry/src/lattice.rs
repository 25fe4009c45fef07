//! Sampled grid of surface points.

use surfplot_math::{Aabb3, Point2, Point3, Vector3};

/// One grid point of a sampled surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    pub position: Point3,
    /// Texture coordinate in `[0, 1] x [0, 1]`.
    pub texcoord: Point2,
    pub normal: Vector3,
    pub defined: bool,
}

impl GridSample {
    /// Placeholder for a point where the surface is undefined.
    pub fn undefined(texcoord: Point2) -> Self {
        Self {
            position: Point3::ZERO,
            texcoord,
            normal: Vector3::Z,
            defined: false,
        }
    }
}

/// Row-major `rows x columns` grid of samples; index `i * columns + j`.
///
/// Row 0 lies at the maximum of the row axis, column 0 at the minimum of the
/// column axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lattice {
    rows: usize,
    columns: usize,
    samples: Vec<GridSample>,
}

impl Lattice {
    /// Wrap a sample vector. Returns `None` if its length is not `rows * columns`.
    pub fn new(rows: usize, columns: usize, samples: Vec<GridSample>) -> Option<Self> {
        (samples.len() == rows * columns).then_some(Self {
            rows,
            columns,
            samples,
        })
    }

    /// Wrap samples produced by a full `rows x columns` walk.
    pub(crate) fn from_grid(rows: usize, columns: usize, samples: Vec<GridSample>) -> Self {
        debug_assert_eq!(samples.len(), rows * columns);
        Self {
            rows,
            columns,
            samples,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&GridSample> {
        if row < self.rows && column < self.columns {
            self.samples.get(self.index(row, column))
        } else {
            None
        }
    }

    pub fn is_defined(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(|s| s.defined)
    }

    pub fn samples(&self) -> &[GridSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn defined_count(&self) -> usize {
        self.samples.iter().filter(|s| s.defined).count()
    }

    /// Bounding box of all defined samples.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.samples.iter().filter(|s| s.defined).map(|s| s.position))
    }
}
