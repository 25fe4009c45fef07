//! Grid-stepping cursor on a sampled surface.

use log::trace;
use serde::{Deserialize, Serialize};
use surfplot_math::Point3;

use crate::sampler::Sampler;

/// Longest equation text shown in cursor notifications.
const MAX_EQUATION_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Notification produced by every cursor move.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorMoved {
    /// Parameter pair `(column, row)` after the move.
    pub params: (f64, f64),
    /// Cartesian position, `None` where the surface is undefined.
    pub position: Option<Point3>,
    /// Human-readable description for the status line.
    pub text: String,
}

/// Cursor position on one surface.
///
/// The cursor holds no reference to its surface; every operation takes the
/// sampler it belongs to, and the owner recreates the cursor whenever the
/// surface is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    col: f64,
    row: f64,
    position: Point3,
    defined: bool,
}

impl Cursor {
    /// Place a cursor at the center of the sampler's domain.
    pub fn new(sampler: &Sampler) -> Self {
        let mut cursor = Self {
            col: sampler.col_range().center(),
            row: sampler.row_range().center(),
            position: Point3::ZERO,
            defined: false,
        };
        cursor.refresh(sampler);
        cursor
    }

    pub fn params(&self) -> (f64, f64) {
        (self.col, self.row)
    }

    pub fn position(&self) -> Option<Point3> {
        self.defined.then_some(self.position)
    }

    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Step one cell in `direction`, wrapping or clamping at the domain edge.
    pub fn step(&mut self, sampler: &Sampler, direction: Direction) -> CursorMoved {
        let cols = sampler.col_range();
        let rows = sampler.row_range();
        let res = sampler.resolution();
        let dc = cols.cursor_step(res.columns);
        let dr = rows.cursor_step(res.rows);

        match direction {
            Direction::Right => self.col = self.move_column(sampler, self.col + dc),
            Direction::Left => self.col = self.move_column(sampler, self.col - dc),
            Direction::Up => self.row = rows.wrap(self.row + dr),
            Direction::Down => self.row = rows.wrap(self.row - dr),
        }
        self.refresh(sampler);
        trace!("cursor {direction:?} -> ({}, {})", self.col, self.row);

        CursorMoved {
            params: self.params(),
            position: self.position(),
            text: self.describe(sampler),
        }
    }

    fn move_column(&self, sampler: &Sampler, col: f64) -> f64 {
        let range = sampler.col_range();
        if sampler.kind().wraps_columns() {
            range.wrap(col)
        } else {
            range.clamp(col)
        }
    }

    /// Re-evaluate the live expression at the current parameters.
    fn refresh(&mut self, sampler: &Sampler) {
        match sampler.eval(self.col, self.row) {
            Ok(value) if value.is_defined() => {
                self.position = sampler.system().to_cartesian(self.col, self.row, value);
                self.defined = true;
            }
            _ => {
                self.position = Point3::ZERO;
                self.defined = false;
            }
        }
    }

    /// Status text: equation, parameter values and position.
    pub fn describe(&self, sampler: &Sampler) -> String {
        let labels = sampler.system().axis_labels();
        let equation = truncate(&sampler.formula().to_string(), MAX_EQUATION_CHARS);
        let params = format!(
            "{} = {:.4}, {} = {:.4}",
            labels.column, self.col, labels.row, self.row
        );
        if self.defined {
            let p = self.position;
            format!("{equation}\n{params}\n(x, y, z) = ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z)
        } else {
            format!("{equation}\n{params}\nundefined")
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{BoundExprs, Resolution};
    use crate::system::Formula;
    use approx::assert_relative_eq;

    fn sampler(formula: Formula, bounds: BoundExprs, res: usize) -> Sampler {
        Sampler::new(&formula, &bounds, Resolution::new(res, res)).unwrap()
    }

    fn saddle() -> Sampler {
        sampler(
            Formula::Cartesian { z: "x*x - y*y".into() },
            BoundExprs::new("-1", "1", "-1", "1"),
            10,
        )
    }

    #[test]
    fn test_starts_at_center() {
        let s = saddle();
        let cursor = Cursor::new(&s);
        assert_eq!(cursor.params(), (0.0, 0.0));
        let p = cursor.position().unwrap();
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_right_wraps_past_max() {
        let s = saddle();
        let mut cursor = Cursor::new(&s);
        // Center plus five steps of 0.2 reaches the max edge.
        for _ in 0..5 {
            cursor.step(&s, Direction::Right);
        }
        let before = cursor.params().0;
        assert_relative_eq!(before, 1.0, epsilon = 1e-12);
        cursor.step(&s, Direction::Right);
        let after = cursor.params().0;
        assert_relative_eq!(after, before + 0.2 - 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_right_reaches_max_at_high_resolution() {
        use std::f64::consts::PI;
        let s = sampler(
            Formula::Cartesian { z: "sin(x)".into() },
            BoundExprs::new("-pi", "pi", "-pi", "pi"),
            50,
        );
        let mut cursor = Cursor::new(&s);
        for _ in 0..25 {
            cursor.step(&s, Direction::Right);
        }
        assert_eq!(cursor.params().0, PI);
        let moved = cursor.step(&s, Direction::Right);
        assert_relative_eq!(moved.params.0, -PI + 2.0 * PI / 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let s = saddle();
        let mut cursor = Cursor::new(&s);
        let start = cursor.params();
        for dir in [Direction::Right, Direction::Left, Direction::Up, Direction::Down] {
            for _ in 0..10 {
                cursor.step(&s, dir);
            }
            assert_relative_eq!(cursor.params().0, start.0, epsilon = 1e-9);
            assert_relative_eq!(cursor.params().1, start.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_radial_axis_clamps() {
        let s = sampler(
            Formula::Cylindrical { z: "r".into() },
            BoundExprs::new("0", "1", "0", "2*pi"),
            4,
        );
        let mut cursor = Cursor::new(&s);
        for _ in 0..10 {
            cursor.step(&s, Direction::Right);
        }
        assert_relative_eq!(cursor.params().0, 1.0);
        for _ in 0..10 {
            cursor.step(&s, Direction::Left);
        }
        assert_relative_eq!(cursor.params().0, 0.0);
    }

    #[test]
    fn test_angular_axis_wraps() {
        let s = sampler(
            Formula::Spherical { r: "1".into() },
            BoundExprs::new("0", "pi", "0", "2*pi"),
            4,
        );
        let mut cursor = Cursor::new(&s);
        let start = cursor.params().1;
        for _ in 0..4 {
            cursor.step(&s, Direction::Up);
        }
        assert_relative_eq!(cursor.params().1, start, epsilon = 1e-9);
    }

    #[test]
    fn test_undefined_position() {
        let s = sampler(
            Formula::Cartesian { z: "1/x".into() },
            BoundExprs::new("-1", "1", "-1", "1"),
            4,
        );
        let cursor = Cursor::new(&s);
        assert!(!cursor.is_defined());
        assert!(cursor.position().is_none());
        assert!(cursor.describe(&s).ends_with("undefined"));
    }

    #[test]
    fn test_move_reports_text() {
        let s = saddle();
        let mut cursor = Cursor::new(&s);
        let event = cursor.step(&s, Direction::Up);
        assert_relative_eq!(event.params.1, 0.2, epsilon = 1e-12);
        assert!(event.text.starts_with("z = x*x - y*y\n"));
        assert!(event.text.contains("y = 0.2000"));
        assert!(event.text.contains("(x, y, z) = (0.0000, 0.2000, -0.0400)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        let long = "x".repeat(60);
        let cut = truncate(&long, 50);
        assert_eq!(cut.chars().count(), 50);
        assert!(cut.ends_with("..."));
    }
}
