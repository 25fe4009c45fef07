//! surfplot render layer: graph registry, settings, camera and GPU-facing buffers.

pub mod camera;
pub mod lighting;
pub mod pipeline;
pub mod scene;
pub mod settings;

pub use camera::{CameraKey, InputSnapshot, OrbitCamera};
pub use lighting::Lighting;
pub use pipeline::{CameraUniforms, GpuVertex, LightUniforms, RenderBuffers};
pub use scene::{DrawCall, Graph, GraphId, Material, Primitive, Scene, SceneEvent};
pub use settings::{DisplayFlags, Fill, GraphSettings, RawGraphSettings};
