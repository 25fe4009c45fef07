use log::debug;
use surfplot_geometry::Lattice;
use surfplot_math::Point3;

use crate::grid::grid_line_indices;
use crate::normals::{normal_segments, NORMAL_LENGTH};
use crate::strip::{strip_indices, strip_to_triangles};
use crate::RESTART_INDEX;

/// Index buffers derived from one lattice.
///
/// All three buffers are built together; a new lattice means a new
/// `SurfaceMesh`, never an in-place update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Triangle strip with restart markers.
    pub strip: Vec<u32>,
    /// Line strip with restart markers.
    pub grid: Vec<u32>,
    /// Line list, two points per defined vertex.
    pub normal_lines: Vec<Point3>,
}

impl SurfaceMesh {
    pub fn build(lattice: &Lattice) -> Self {
        let mesh = Self {
            strip: strip_indices(lattice),
            grid: grid_line_indices(lattice),
            normal_lines: normal_segments(lattice, NORMAL_LENGTH),
        };
        debug!(
            "mesh {}x{}: {} strip indices ({} restarts), {} grid indices, {} normal segments",
            lattice.rows(),
            lattice.columns(),
            mesh.strip.len(),
            mesh.restart_count(),
            mesh.grid.len(),
            mesh.normal_lines.len() / 2
        );
        mesh
    }

    /// Number of triangles the strip expands to.
    pub fn triangle_count(&self) -> usize {
        self.triangles().len()
    }

    /// The strip expanded into an independent triangle list.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        strip_to_triangles(&self.strip)
    }

    /// Restart markers in the triangle strip.
    pub fn restart_count(&self) -> usize {
        self.strip.iter().filter(|&&i| i == RESTART_INDEX).count()
    }

    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }
}
