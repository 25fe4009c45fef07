use serde::{Deserialize, Serialize};

/// Relative size of the finite-difference offset used around each sample.
const NEIGHBOR_FRACTION: f64 = 1e-3;

/// Relative slack allowed past either end before [`AxisRange::wrap`] wraps.
const WRAP_TOLERANCE: f64 = 1e-9;

/// A closed parameter interval `[min, max]` along one grid axis.
///
/// `min <= max` always holds: construction orders the two ends instead of
/// rejecting inverted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Distance between adjacent grid samples for `resolution` samples.
    ///
    /// Zero when the resolution cannot span the interval (0 or 1 samples).
    pub fn grid_step(&self, resolution: usize) -> f64 {
        if resolution < 2 {
            0.0
        } else {
            self.size() / (resolution - 1) as f64
        }
    }

    /// Parameter value of grid sample `i` counted up from `min`.
    pub fn grid_value(&self, i: usize, resolution: usize) -> f64 {
        self.min + i as f64 * self.grid_step(resolution)
    }

    /// Parameter value of grid sample `i` counted down from `max`.
    pub fn grid_value_desc(&self, i: usize, resolution: usize) -> f64 {
        self.max - i as f64 * self.grid_step(resolution)
    }

    /// Cursor step: `size / resolution`.
    pub fn cursor_step(&self, resolution: usize) -> f64 {
        if resolution == 0 {
            0.0
        } else {
            self.size() / resolution as f64
        }
    }

    /// Finite-difference offset for normal estimation.
    pub fn neighbor_offset(&self, resolution: usize) -> f64 {
        NEIGHBOR_FRACTION * self.size() / resolution.max(1) as f64
    }

    /// Shift a value that left the interval by one period back inside.
    ///
    /// Values within rounding distance of an end are snapped onto it, so
    /// repeated cursor steps land on the edge instead of wrapping early.
    pub fn wrap(&self, v: f64) -> f64 {
        let size = self.size();
        let slack = size * WRAP_TOLERANCE;
        if v > self.max + slack {
            v - size
        } else if v < self.min - slack {
            v + size
        } else {
            v.clamp(self.min, self.max)
        }
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// Map `v` to `[0, 1]` relative to the interval. A zero-width interval maps to 0.
    pub fn normalize(&self, v: f64) -> f64 {
        let size = self.size();
        if size > 0.0 {
            (v - self.min) / size
        } else {
            0.0
        }
    }
}
