//! Spherical graph `r = f(theta, phi)`.

use surfplot_core::EvalError;
use surfplot_expr::Expr;
use surfplot_math::{DVec3, Point3};

use super::{AxisLabels, CoordinateSystem, SampleValue, SurfaceKind};

/// Radius as a function of direction: column axis polar angle `phi`
/// (measured from +z), row axis azimuth `theta`.
///
/// Points are computed as:
/// `P = r * (sin(phi)*cos(theta), sin(phi)*sin(theta), cos(phi))`
#[derive(Debug, Clone)]
pub struct Spherical {
    r: Expr,
}

impl Spherical {
    pub fn new(r: Expr) -> Self {
        Self { r }
    }
}

impl CoordinateSystem for Spherical {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Spherical
    }

    fn evaluate(&self, col: f64, row: f64) -> Result<SampleValue, EvalError> {
        Ok(SampleValue::Scalar(self.r.eval(&[col, row])?))
    }

    fn to_cartesian(&self, phi: f64, theta: f64, value: SampleValue) -> Point3 {
        match value {
            SampleValue::Scalar(r) => {
                let (sin_phi, cos_phi) = phi.sin_cos();
                r * DVec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
            }
            SampleValue::Vector(v) => v,
        }
    }

    fn axis_labels(&self) -> AxisLabels {
        AxisLabels {
            column: "φ",
            row: "θ",
            value: "r",
        }
    }
}
