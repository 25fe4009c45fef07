//! Cartesian graph `z = f(x, y)`.

use surfplot_core::EvalError;
use surfplot_expr::Expr;
use surfplot_math::{DVec3, Point3};

use super::{AxisLabels, CoordinateSystem, SampleValue, SurfaceKind};

/// Height field over the xy plane: column axis `x`, row axis `y`.
#[derive(Debug, Clone)]
pub struct Cartesian {
    z: Expr,
}

impl Cartesian {
    pub fn new(z: Expr) -> Self {
        Self { z }
    }
}

impl CoordinateSystem for Cartesian {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Cartesian
    }

    fn evaluate(&self, col: f64, row: f64) -> Result<SampleValue, EvalError> {
        Ok(SampleValue::Scalar(self.z.eval(&[col, row])?))
    }

    fn to_cartesian(&self, col: f64, row: f64, value: SampleValue) -> Point3 {
        match value {
            SampleValue::Scalar(z) => DVec3::new(col, row, z),
            SampleValue::Vector(v) => v,
        }
    }

    fn axis_labels(&self) -> AxisLabels {
        AxisLabels {
            column: "x",
            row: "y",
            value: "z",
        }
    }
}
