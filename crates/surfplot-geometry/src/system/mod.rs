//! Coordinate systems a surface can be plotted in.
//!
//! Every system maps a (column, row) parameter pair to a 3D position through
//! one or three user expressions. Slot 0 of each expression is the column
//! variable, slot 1 the row variable.

mod cartesian;
mod cylindrical;
mod parametric;
mod spherical;

use std::fmt;

use serde::{Deserialize, Serialize};
use surfplot_core::{is_defined, ErrorField, EvalError, PlotError, Result};
use surfplot_expr::{Expr, Variables};
use surfplot_math::{DVec3, Point3};

pub use cartesian::Cartesian;
pub use cylindrical::Cylindrical;
pub use parametric::Parametric;
pub use spherical::Spherical;

/// The fixed family of coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Cartesian,
    Cylindrical,
    Spherical,
    Parametric,
}

impl SurfaceKind {
    /// Free variables available to this system's expressions.
    pub fn variables(self) -> Variables {
        match self {
            SurfaceKind::Cartesian => Variables::new().with("x", 0).with("y", 1),
            SurfaceKind::Cylindrical => Variables::new()
                .with("r", 0)
                .with("theta", 1)
                .with("t", 1)
                .with("θ", 1),
            SurfaceKind::Spherical => Variables::new()
                .with("phi", 0)
                .with("p", 0)
                .with("φ", 0)
                .with("theta", 1)
                .with("t", 1)
                .with("θ", 1),
            SurfaceKind::Parametric => Variables::new().with("u", 0).with("v", 1),
        }
    }

    /// Number of scalar expressions evaluated per sample.
    pub fn expression_count(self) -> usize {
        match self {
            SurfaceKind::Parametric => 3,
            _ => 1,
        }
    }

    /// Whether the column axis wraps around at the domain edge.
    ///
    /// The radial column axis of cylindrical and spherical systems clamps.
    pub fn wraps_columns(self) -> bool {
        matches!(self, SurfaceKind::Cartesian | SurfaceKind::Parametric)
    }

    /// Whether texture coordinates are laid out as a polar disc.
    pub fn polar_texture(self) -> bool {
        matches!(self, SurfaceKind::Cylindrical | SurfaceKind::Spherical)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceKind::Cartesian => "cartesian",
            SurfaceKind::Cylindrical => "cylindrical",
            SurfaceKind::Spherical => "spherical",
            SurfaceKind::Parametric => "parametric",
        };
        f.write_str(name)
    }
}

/// Raw result of evaluating a system's expression(s) at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Scalar(f64),
    Vector(DVec3),
}

impl SampleValue {
    /// Every component must be IEEE normal or zero.
    pub fn is_defined(&self) -> bool {
        match self {
            SampleValue::Scalar(v) => is_defined(*v),
            SampleValue::Vector(v) => is_defined(v.x) && is_defined(v.y) && is_defined(v.z),
        }
    }
}

/// Display names of the two parameter axes and the plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub column: &'static str,
    pub row: &'static str,
    pub value: &'static str,
}

/// Capability set shared by all coordinate systems.
pub trait CoordinateSystem: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    /// Evaluate the value expression(s) at parameters `(col, row)`.
    fn evaluate(&self, col: f64, row: f64) -> std::result::Result<SampleValue, EvalError>;

    /// Convert an evaluated value at `(col, row)` to a Cartesian position.
    fn to_cartesian(&self, col: f64, row: f64, value: SampleValue) -> Point3;

    fn axis_labels(&self) -> AxisLabels;
}

/// The user's value expression(s), tagged by coordinate system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Formula {
    Cartesian { z: String },
    Cylindrical { z: String },
    Spherical { r: String },
    Parametric { x: String, y: String, z: String },
}

impl Formula {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Formula::Cartesian { .. } => SurfaceKind::Cartesian,
            Formula::Cylindrical { .. } => SurfaceKind::Cylindrical,
            Formula::Spherical { .. } => SurfaceKind::Spherical,
            Formula::Parametric { .. } => SurfaceKind::Parametric,
        }
    }

    /// Compile the expression(s) into a ready-to-evaluate system.
    pub fn compile(&self) -> Result<Box<dyn CoordinateSystem>> {
        let vars = self.kind().variables();
        let system: Box<dyn CoordinateSystem> = match self {
            Formula::Cartesian { z } => {
                Box::new(Cartesian::new(compile_field(z, &vars, ErrorField::Equation)?))
            }
            Formula::Cylindrical { z } => {
                Box::new(Cylindrical::new(compile_field(z, &vars, ErrorField::Equation)?))
            }
            Formula::Spherical { r } => {
                Box::new(Spherical::new(compile_field(r, &vars, ErrorField::Equation)?))
            }
            Formula::Parametric { x, y, z } => Box::new(Parametric::new(
                compile_field(x, &vars, ErrorField::EquationX)?,
                compile_field(y, &vars, ErrorField::EquationY)?,
                compile_field(z, &vars, ErrorField::EquationZ)?,
            )),
        };
        Ok(system)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Cartesian { z } | Formula::Cylindrical { z } => write!(f, "z = {z}"),
            Formula::Spherical { r } => write!(f, "r = {r}"),
            Formula::Parametric { x, y, z } => write!(f, "(x, y, z) = ({x}, {y}, {z})"),
        }
    }
}

fn compile_field(source: &str, vars: &Variables, field: ErrorField) -> Result<Expr> {
    Expr::compile(source, vars).map_err(|e| PlotError::expression(field, e))
}
