//! Surface sampling over a regular parameter grid.
//!
//! A [`Sampler`] is created in two steps: the four bound expressions are
//! resolved to an [`AxisRange`] per axis, then the value expression(s) are
//! compiled. [`Sampler::sample`] walks the grid and produces a [`Lattice`].
//! A settings change always builds a new sampler.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use surfplot_core::{is_defined, ErrorCode, ErrorField, EvalError, PlotError, Result, Tolerance};
use surfplot_expr::Expr;
use surfplot_math::{AxisRange, Point2, Point3};

use crate::lattice::{GridSample, Lattice};
use crate::normal::{estimate_normal, COMPASS};
use crate::system::{CoordinateSystem, Formula, SampleValue, SurfaceKind};

/// The four axis-bound expressions, each free of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundExprs {
    pub row_min: String,
    pub row_max: String,
    pub col_min: String,
    pub col_max: String,
}

impl BoundExprs {
    pub fn new(col_min: &str, col_max: &str, row_min: &str, row_max: &str) -> Self {
        Self {
            row_min: row_min.to_string(),
            row_max: row_max.to_string(),
            col_min: col_min.to_string(),
            col_max: col_max.to_string(),
        }
    }
}

/// Number of samples along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub rows: usize,
    pub columns: usize,
}

impl Resolution {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn sample_count(&self) -> usize {
        self.rows * self.columns
    }
}

/// Evaluate one bound expression, attributing failures to `field`.
fn resolve_bound(source: &str, field: ErrorField) -> Result<f64> {
    let value = Expr::constant(source).map_err(|e| PlotError::expression(field, e))?;
    if !is_defined(value) {
        return Err(PlotError::expression(
            field,
            EvalError::new(
                ErrorCode::NotFinite,
                format!("Bound evaluates to {value}"),
                source,
                source,
                0,
            ),
        ));
    }
    Ok(value)
}

/// A compiled surface ready to be evaluated over its domain.
pub struct Sampler {
    formula: Formula,
    system: Box<dyn CoordinateSystem>,
    col_range: AxisRange,
    row_range: AxisRange,
    resolution: Resolution,
    tolerance: Tolerance,
}

impl Sampler {
    /// Resolve bounds, then compile the value expression(s).
    ///
    /// Bounds are resolved in the order `row_min`, `row_max`, `col_min`,
    /// `col_max`; the first failure aborts construction.
    pub fn new(formula: &Formula, bounds: &BoundExprs, resolution: Resolution) -> Result<Self> {
        let row_min = resolve_bound(&bounds.row_min, ErrorField::RowMin)?;
        let row_max = resolve_bound(&bounds.row_max, ErrorField::RowMax)?;
        let col_min = resolve_bound(&bounds.col_min, ErrorField::ColMin)?;
        let col_max = resolve_bound(&bounds.col_max, ErrorField::ColMax)?;
        let col_range = AxisRange::new(col_min, col_max);
        let row_range = AxisRange::new(row_min, row_max);
        debug!(
            "bounds resolved: columns [{}, {}], rows [{}, {}]",
            col_range.min, col_range.max, row_range.min, row_range.max
        );

        let system = formula.compile()?;
        Ok(Self {
            formula: formula.clone(),
            system,
            col_range,
            row_range,
            resolution,
            tolerance: Tolerance::default(),
        })
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn kind(&self) -> SurfaceKind {
        self.system.kind()
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn system(&self) -> &dyn CoordinateSystem {
        self.system.as_ref()
    }

    pub fn col_range(&self) -> AxisRange {
        self.col_range
    }

    pub fn row_range(&self) -> AxisRange {
        self.row_range
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Evaluate the live expression(s) at one point; errors propagate.
    pub fn eval(&self, col: f64, row: f64) -> std::result::Result<SampleValue, EvalError> {
        self.system.evaluate(col, row)
    }

    /// Cartesian position at `(col, row)`, or `None` where the surface is
    /// undefined or evaluation fails.
    pub fn point(&self, col: f64, row: f64) -> Option<Point3> {
        match self.system.evaluate(col, row) {
            Ok(value) if value.is_defined() => Some(self.system.to_cartesian(col, row, value)),
            _ => None,
        }
    }

    /// Texture coordinate of the parameter pair `(col, row)`.
    pub fn texcoord(&self, col: f64, row: f64) -> Point2 {
        let c = self.col_range.normalize(col);
        if self.kind().polar_texture() {
            // Column axis is radial, row axis is the angle.
            Point2::new(0.5 + 0.5 * c * row.cos(), 0.5 + 0.5 * c * row.sin())
        } else {
            Point2::new(c, self.row_range.normalize(row))
        }
    }

    /// Parameter pair of grid point `(row, column)`.
    pub fn grid_params(&self, row: usize, column: usize) -> (f64, f64) {
        (
            self.col_range.grid_value(column, self.resolution.columns),
            self.row_range.grid_value_desc(row, self.resolution.rows),
        )
    }

    /// Sample the whole grid.
    ///
    /// Undefined points and failed evaluations never abort the walk; they
    /// become undefined samples or missing neighbors.
    pub fn sample(&self) -> Lattice {
        let Resolution { rows, columns } = self.resolution;
        let mut samples = Vec::with_capacity(self.resolution.sample_count());
        for i in 0..rows {
            for j in 0..columns {
                let (col, row) = self.grid_params(i, j);
                samples.push(self.sample_at(col, row));
            }
        }

        let lattice = Lattice::from_grid(rows, columns, samples);
        info!(
            "sampled {} surface {}x{}: {}/{} points defined",
            self.kind(),
            rows,
            columns,
            lattice.defined_count(),
            lattice.len()
        );
        lattice
    }

    fn sample_at(&self, col: f64, row: f64) -> GridSample {
        let texcoord = self.texcoord(col, row);
        let Some(position) = self.point(col, row) else {
            return GridSample::undefined(texcoord);
        };

        let hc = self.col_range.neighbor_offset(self.resolution.columns);
        let hr = self.row_range.neighbor_offset(self.resolution.rows);
        let neighbors = COMPASS.map(|(dc, dr)| self.point(col + dc * hc, row + dr * hr));
        let normal = estimate_normal(position, &neighbors, self.tolerance);

        GridSample {
            position,
            texcoord,
            normal,
            defined: true,
        }
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("formula", &self.formula)
            .field("col_range", &self.col_range)
            .field("row_range", &self.row_range)
            .field("resolution", &self.resolution)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use surfplot_math::DVec3;

    fn cartesian(z: &str, rows: usize, columns: usize) -> Sampler {
        Sampler::new(
            &Formula::Cartesian { z: z.into() },
            &BoundExprs::new("-1", "1", "-1", "1"),
            Resolution::new(rows, columns),
        )
        .unwrap()
    }

    #[test]
    fn test_bounds_ordered() {
        let s = Sampler::new(
            &Formula::Cartesian { z: "0".into() },
            &BoundExprs::new("2*pi", "0", "3", "-e"),
            Resolution::new(4, 4),
        )
        .unwrap();
        assert_relative_eq!(s.col_range().min, 0.0);
        assert_relative_eq!(s.col_range().max, std::f64::consts::TAU);
        assert_relative_eq!(s.row_range().min, -std::f64::consts::E);
        assert_relative_eq!(s.row_range().max, 3.0);
    }

    #[test]
    fn test_bound_error_tagged() {
        let err = Sampler::new(
            &Formula::Cartesian { z: "x".into() },
            &BoundExprs::new("-1", "1", "-1", "1/0"),
            Resolution::new(4, 4),
        )
        .err()
        .unwrap();
        assert_eq!(err.field(), Some(ErrorField::RowMax));
        assert_eq!(err.eval_error().unwrap().code, ErrorCode::NotFinite);
    }

    #[test]
    fn test_bound_with_variable_rejected() {
        let err = Sampler::new(
            &Formula::Cartesian { z: "x".into() },
            &BoundExprs::new("x", "1", "-1", "1"),
            Resolution::new(4, 4),
        )
        .err()
        .unwrap();
        assert_eq!(err.field(), Some(ErrorField::ColMin));
        assert_eq!(err.eval_error().unwrap().token, "x");
    }

    #[test]
    fn test_bounds_checked_before_equation() {
        let err = Sampler::new(
            &Formula::Cartesian { z: "x +".into() },
            &BoundExprs::new("-1", "1", "(", "1"),
            Resolution::new(4, 4),
        )
        .err()
        .unwrap();
        assert_eq!(err.field(), Some(ErrorField::RowMin));
    }

    #[test]
    fn test_grid_walk_order() {
        let s = cartesian("x + y", 3, 5);
        assert_eq!(s.grid_params(0, 0), (-1.0, 1.0));
        assert_eq!(s.grid_params(2, 4), (1.0, -1.0));
        let lattice = s.sample();
        let first = lattice.get(0, 0).unwrap().position;
        assert_eq!(first, DVec3::new(-1.0, 1.0, 0.0));
        let p = lattice.get(1, 1).unwrap().position;
        assert_relative_eq!(p.x, -0.5);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_undefined_points_marked() {
        let s = cartesian("sqrt(x)", 3, 3);
        let lattice = s.sample();
        assert!(!lattice.is_defined(0, 0));
        assert!(lattice.is_defined(0, 1));
        assert!(lattice.is_defined(0, 2));
        assert_eq!(lattice.defined_count(), 6);
        let hole = lattice.get(1, 0).unwrap();
        assert_eq!(hole.position, Point3::ZERO);
        assert_eq!(hole.normal, DVec3::Z);
    }

    #[test]
    fn test_plane_normals() {
        let lattice = cartesian("2*x - y", 4, 4).sample();
        let expected = DVec3::new(-2.0, 1.0, 1.0).normalize();
        for s in lattice.samples() {
            assert!(s.defined);
            assert!((s.normal - expected).length() < 1e-6, "normal {:?}", s.normal);
        }
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let s = Sampler::new(
            &Formula::Spherical { r: "2".into() },
            &BoundExprs::new("0.2", "pi - 0.2", "0", "2*pi"),
            Resolution::new(8, 8),
        )
        .unwrap();
        for sample in s.sample().samples() {
            assert!(sample.defined);
            let outward = sample.position.normalize();
            assert!(sample.normal.dot(outward) > 0.99, "inward normal {:?}", sample.normal);
        }
    }

    #[test]
    fn test_texcoords_in_unit_square() {
        let s = Sampler::new(
            &Formula::Cylindrical { z: "r".into() },
            &BoundExprs::new("0", "2", "0", "2*pi"),
            Resolution::new(6, 6),
        )
        .unwrap();
        for sample in s.sample().samples() {
            let t = sample.texcoord;
            assert!((-1e-12..=1.0 + 1e-12).contains(&t.x), "texcoord {t:?}");
            assert!((-1e-12..=1.0 + 1e-12).contains(&t.y), "texcoord {t:?}");
        }
        let center = s.texcoord(0.0, 1.0);
        assert_relative_eq!(center.x, 0.5);
        assert_relative_eq!(center.y, 0.5);
    }

    #[test]
    fn test_low_resolution_does_not_divide_by_zero() {
        let lattice = cartesian("x", 1, 1).sample();
        assert_eq!(lattice.len(), 1);
        assert!(lattice.samples()[0].position.is_finite());
        assert_eq!(cartesian("x", 0, 7).sample().len(), 0);
    }

    #[test]
    fn test_sample_fills_every_cell() {
        let lattice = cartesian("1/x", 3, 4).sample();
        assert_eq!((lattice.rows(), lattice.columns()), (3, 4));
        assert_eq!(lattice.len(), 12);
        assert!(lattice.get(2, 3).is_some());
    }
}
