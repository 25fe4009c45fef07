use std::num::FpCategory;

/// Thresholds used by the normal estimator when discarding degenerate vectors.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Tangents shorter than this are treated as missing neighbors.
    pub tangent: f64,
    /// Cross products and averaged normals shorter than this are rejected.
    pub normal: f64,
}

impl Tolerance {
    pub const DEFAULT_TANGENT: f64 = f64::EPSILON / 2.0;
    pub const DEFAULT_NORMAL: f64 = f64::EPSILON;

    pub fn new(tangent: f64, normal: f64) -> Self {
        Self { tangent, normal }
    }

    pub fn default_precision() -> Self {
        Self {
            tangent: Self::DEFAULT_TANGENT,
            normal: Self::DEFAULT_NORMAL,
        }
    }

    /// Check whether a tangent length is long enough to be used
    pub fn usable_tangent(self, length: f64) -> bool {
        length >= self.tangent
    }

    /// Check whether a normal length is long enough to be normalized
    pub fn usable_normal(self, length: f64) -> bool {
        length > self.normal
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

/// A value is defined iff it is IEEE normal or zero.
///
/// NaN, infinities and subnormals are all undefined.
pub fn is_defined(v: f64) -> bool {
    matches!(v.classify(), FpCategory::Normal | FpCategory::Zero)
}
