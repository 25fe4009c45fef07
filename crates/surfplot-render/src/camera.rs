use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use surfplot_math::{Aabb3, DMat4, Point3, Vector3};

/// Closest the eye may get to the target.
const MIN_DISTANCE: f64 = 0.1;
/// Elevation stays this far from the poles so the view never flips.
const POLE_MARGIN: f64 = 0.01;
/// Orbit speed for held keys, radians per second.
const ORBIT_RATE: f64 = 1.5;
/// Zoom speed for held keys, fraction of the distance per second.
const ZOOM_RATE: f64 = 1.0;

/// A perspective camera orbiting a target point, with `+z` up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3,
    pub distance: f64,
    /// Angle around `+z`, measured from `+x`, in radians.
    pub azimuth: f64,
    /// Angle above the `xy` plane, in radians.
    pub elevation: f64,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Width over height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for OrbitCamera {
    /// Looking at the origin from 5 units away, 45° FOV, 16:9 aspect.
    fn default() -> Self {
        Self {
            target: Point3::ZERO,
            distance: 5.0,
            azimuth: -FRAC_PI_2 + 0.5,
            elevation: 0.5,
            fov_y: FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    /// Unit vector from the target towards the eye.
    fn offset_dir(&self) -> Vector3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        Vector3::new(ce * ca, ce * sa, se)
    }

    pub fn eye(&self) -> Point3 {
        self.target + self.distance * self.offset_dir()
    }

    /// World to camera transform; the camera looks down `-z` in view space.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye(), self.target, Vector3::Z)
    }

    /// OpenGL-style perspective projection (clip `z` in `[-1, 1]`).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Orbit around the target; deltas in radians.
    pub fn orbit(&mut self, d_azimuth: f64, d_elevation: f64) {
        let limit = FRAC_PI_2 - POLE_MARGIN;
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-limit, limit);
    }

    /// Move towards the target by `delta`; negative moves away.
    pub fn zoom(&mut self, delta: f64) {
        let distance = self.distance - delta;
        if distance > MIN_DISTANCE {
            self.distance = distance;
        }
    }

    /// Re-target on the box and back off until all of it is in view.
    pub fn fit_to_aabb(&mut self, aabb: &Aabb3) {
        let radius = (0.5 * aabb.diagonal()).max(MIN_DISTANCE);
        let half_fov = 0.5 * self.fov_y.min(self.fov_y * self.aspect);
        self.target = aabb.center();
        self.distance = radius / half_fov.sin();
        self.near = (self.distance - radius).max(MIN_DISTANCE) * 0.5;
        self.far = (self.distance + radius) * 2.0;
    }

    /// Advance held-key motion by one frame.
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        let dt = input.dt;
        let axis = |pos: CameraKey, neg: CameraKey| {
            (input.is_held(pos) as i32 - input.is_held(neg) as i32) as f64
        };

        let d_az = axis(CameraKey::OrbitRight, CameraKey::OrbitLeft) * ORBIT_RATE * dt;
        let d_el = axis(CameraKey::OrbitUp, CameraKey::OrbitDown) * ORBIT_RATE * dt;
        if d_az != 0.0 || d_el != 0.0 {
            self.orbit(d_az, d_el);
        }

        let zoom = axis(CameraKey::ZoomIn, CameraKey::ZoomOut);
        if zoom != 0.0 {
            self.zoom(zoom * ZOOM_RATE * self.distance * dt);
        }
    }
}

/// Keys that move the camera while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
    ZoomIn,
    ZoomOut,
}

/// Input state of one frame: which keys are down and how long the frame was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: HashSet<CameraKey>,
    /// Frame duration in seconds.
    pub dt: f64,
}

impl InputSnapshot {
    pub fn new(dt: f64) -> Self {
        Self {
            held: HashSet::new(),
            dt,
        }
    }

    pub fn with_key(mut self, key: CameraKey) -> Self {
        self.held.insert(key);
        self
    }

    pub fn press(&mut self, key: CameraKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: CameraKey) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: CameraKey) -> bool {
        self.held.contains(&key)
    }
}
