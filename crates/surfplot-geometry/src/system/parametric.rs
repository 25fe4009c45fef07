//! Parametric surface `(x, y, z) = (fx(u, v), fy(u, v), fz(u, v))`.

use surfplot_core::EvalError;
use surfplot_expr::Expr;
use surfplot_math::{DVec3, Point3};

use super::{AxisLabels, CoordinateSystem, SampleValue, SurfaceKind};

/// Column axis `u`, row axis `v`; three component expressions.
#[derive(Debug, Clone)]
pub struct Parametric {
    x: Expr,
    y: Expr,
    z: Expr,
}

impl Parametric {
    pub fn new(x: Expr, y: Expr, z: Expr) -> Self {
        Self { x, y, z }
    }
}

impl CoordinateSystem for Parametric {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Parametric
    }

    fn evaluate(&self, col: f64, row: f64) -> Result<SampleValue, EvalError> {
        let slots = [col, row];
        Ok(SampleValue::Vector(DVec3::new(
            self.x.eval(&slots)?,
            self.y.eval(&slots)?,
            self.z.eval(&slots)?,
        )))
    }

    fn to_cartesian(&self, _col: f64, _row: f64, value: SampleValue) -> Point3 {
        match value {
            SampleValue::Vector(v) => v,
            SampleValue::Scalar(s) => DVec3::splat(s),
        }
    }

    fn axis_labels(&self) -> AxisLabels {
        AxisLabels {
            column: "u",
            row: "v",
            value: "(x, y, z)",
        }
    }
}
