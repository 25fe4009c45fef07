pub mod aabb;
pub mod range;

pub use glam::{DMat4, DVec2, DVec3};
pub use aabb::Aabb3;
pub use range::AxisRange;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
