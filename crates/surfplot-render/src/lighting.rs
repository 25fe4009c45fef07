use serde::{Deserialize, Serialize};
use surfplot_math::Vector3;

/// Scene-wide directional Phong light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Direction the light shines from, towards the origin.
    pub direction: Vector3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vector3::new(1.0, 1.0, 2.0).normalize(),
            ambient: 0.3,
            diffuse: 0.7,
            specular: 0.4,
            shininess: 32.0,
        }
    }
}

impl Lighting {
    /// Set the light direction; zero-length directions are ignored.
    pub fn set_direction(&mut self, direction: Vector3) {
        if let Some(dir) = direction.try_normalize() {
            self.direction = dir;
        }
    }
}
