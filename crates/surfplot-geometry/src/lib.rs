//! surfplot geometry: coordinate systems, grid sampling, normals and the cursor.

pub mod cursor;
pub mod lattice;
pub mod normal;
pub mod sampler;
pub mod system;

pub use cursor::{Cursor, CursorMoved, Direction};
pub use lattice::{GridSample, Lattice};
pub use normal::estimate_normal;
pub use sampler::{BoundExprs, Resolution, Sampler};
pub use system::{CoordinateSystem, Formula, SampleValue, SurfaceKind};
