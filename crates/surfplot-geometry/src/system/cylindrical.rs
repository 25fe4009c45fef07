//! Cylindrical graph `z = f(r, theta)`.

use surfplot_core::EvalError;
use surfplot_expr::Expr;
use surfplot_math::{DVec3, Point3};

use super::{AxisLabels, CoordinateSystem, SampleValue, SurfaceKind};

/// Height over a polar plane: column axis radius `r`, row axis angle `theta`.
///
/// Points are computed as `(r*cos(theta), r*sin(theta), z)`.
#[derive(Debug, Clone)]
pub struct Cylindrical {
    z: Expr,
}

impl Cylindrical {
    pub fn new(z: Expr) -> Self {
        Self { z }
    }
}

impl CoordinateSystem for Cylindrical {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Cylindrical
    }

    fn evaluate(&self, col: f64, row: f64) -> Result<SampleValue, EvalError> {
        Ok(SampleValue::Scalar(self.z.eval(&[col, row])?))
    }

    fn to_cartesian(&self, r: f64, theta: f64, value: SampleValue) -> Point3 {
        match value {
            SampleValue::Scalar(z) => DVec3::new(r * theta.cos(), r * theta.sin(), z),
            SampleValue::Vector(v) => v,
        }
    }

    fn axis_labels(&self) -> AxisLabels {
        AxisLabels {
            column: "r",
            row: "θ",
            value: "z",
        }
    }
}
