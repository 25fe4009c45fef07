pub mod buffers;
pub mod grid;
pub mod normals;
pub mod strip;

pub use buffers::SurfaceMesh;
pub use grid::{grid_line_indices, line_strip_segments};
pub use normals::normal_segments;
pub use strip::{strip_indices, strip_to_triangles};

/// Index value that breaks a strip; the renderer enables primitive restart
/// with this value.
pub const RESTART_INDEX: u32 = u32::MAX;
