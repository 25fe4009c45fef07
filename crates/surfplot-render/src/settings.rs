//! Per-graph settings and their flat key/value persistence form.
//!
//! On disk a graph is a flat record of type flags, equation strings, bound
//! strings, resolutions and display flags ([`RawGraphSettings`]). In memory
//! it is a [`GraphSettings`], where the one-of constraints are carried by
//! the types. Conversion between the two rejects records that set more or
//! fewer than one type flag, or more or fewer than one of color/texture.

use log::warn;
use serde::{Deserialize, Serialize};
use surfplot_core::traits::Validate;
use surfplot_core::{PlotError, Result};
use surfplot_geometry::{BoundExprs, Formula, Resolution, SurfaceKind};

const DEFAULT_RESOLUTION: usize = 50;

/// Flat settings record, field for field as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGraphSettings {
    pub cartesian: bool,
    pub cylindrical: bool,
    pub spherical: bool,
    pub parametric: bool,
    pub equation: String,
    pub equation_x: String,
    pub equation_y: String,
    pub equation_z: String,
    pub row_min: String,
    pub row_max: String,
    pub col_min: String,
    pub col_max: String,
    pub rows: usize,
    pub columns: usize,
    pub draw: bool,
    pub transparent: bool,
    pub draw_normals: bool,
    pub draw_grid: bool,
    pub use_color: bool,
    pub use_texture: bool,
    pub color: [f32; 3],
    pub texture: String,
}

/// Missing keys read as unset type and fill flags, empty strings and the
/// default [`DisplayFlags`].
impl Default for RawGraphSettings {
    fn default() -> Self {
        let display = DisplayFlags::default();
        Self {
            cartesian: false,
            cylindrical: false,
            spherical: false,
            parametric: false,
            equation: String::new(),
            equation_x: String::new(),
            equation_y: String::new(),
            equation_z: String::new(),
            row_min: String::new(),
            row_max: String::new(),
            col_min: String::new(),
            col_max: String::new(),
            rows: DEFAULT_RESOLUTION,
            columns: DEFAULT_RESOLUTION,
            draw: display.draw,
            transparent: display.transparent,
            draw_normals: display.draw_normals,
            draw_grid: display.draw_grid,
            use_color: false,
            use_texture: false,
            color: [1.0; 3],
            texture: String::new(),
        }
    }
}

impl RawGraphSettings {
    fn kind(&self) -> Result<SurfaceKind> {
        let flags = [
            (self.cartesian, SurfaceKind::Cartesian),
            (self.cylindrical, SurfaceKind::Cylindrical),
            (self.spherical, SurfaceKind::Spherical),
            (self.parametric, SurfaceKind::Parametric),
        ];
        let mut set = flags.iter().filter(|(on, _)| *on).map(|(_, kind)| *kind);
        match (set.next(), set.next()) {
            (Some(kind), None) => Ok(kind),
            (None, _) => Err(PlotError::Settings("no graph type flag is set".into())),
            (Some(_), Some(_)) => Err(PlotError::Settings(
                "more than one graph type flag is set".into(),
            )),
        }
    }
}

impl Validate for RawGraphSettings {
    fn validate(&self) -> Result<()> {
        let required = match self.kind()? {
            SurfaceKind::Parametric => vec![
                ("equation_x", self.equation_x.as_str()),
                ("equation_y", self.equation_y.as_str()),
                ("equation_z", self.equation_z.as_str()),
            ],
            _ => vec![("equation", self.equation.as_str())],
        };
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PlotError::Settings(format!("missing {key}")));
        }
        if self.use_color == self.use_texture {
            return Err(PlotError::Settings(
                "exactly one of use_color and use_texture must be set".into(),
            ));
        }
        Ok(())
    }
}

/// What the surface is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// Linear RGB, each channel in `[0, 1]`.
    Color([f32; 3]),
    /// Image file name.
    Texture(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub draw: bool,
    pub transparent: bool,
    pub draw_normals: bool,
    pub draw_grid: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            draw: true,
            transparent: false,
            draw_normals: false,
            draw_grid: true,
        }
    }
}

/// Validated settings of one graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGraphSettings", into = "RawGraphSettings")]
pub struct GraphSettings {
    pub formula: Formula,
    pub bounds: BoundExprs,
    pub resolution: Resolution,
    pub display: DisplayFlags,
    pub fill: Fill,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            formula: Formula::Cartesian {
                z: "sin(x)*cos(y)".into(),
            },
            bounds: BoundExprs::new("-pi", "pi", "-pi", "pi"),
            resolution: Resolution::new(DEFAULT_RESOLUTION, DEFAULT_RESOLUTION),
            display: DisplayFlags::default(),
            fill: Fill::Color([0.3, 0.6, 0.9]),
        }
    }
}

impl GraphSettings {
    pub fn new(formula: Formula, bounds: BoundExprs, resolution: Resolution) -> Self {
        Self {
            formula,
            bounds,
            resolution,
            ..Self::default()
        }
    }

    pub fn with_display(mut self, display: DisplayFlags) -> Self {
        self.display = display;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PlotError::Settings(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlotError::Settings(e.to_string()))
    }
}

impl TryFrom<RawGraphSettings> for GraphSettings {
    type Error = PlotError;

    fn try_from(raw: RawGraphSettings) -> Result<Self> {
        if let Err(e) = raw.validate() {
            warn!("rejected graph settings: {e}");
            return Err(e);
        }
        let formula = match raw.kind()? {
            SurfaceKind::Cartesian => Formula::Cartesian { z: raw.equation },
            SurfaceKind::Cylindrical => Formula::Cylindrical { z: raw.equation },
            SurfaceKind::Spherical => Formula::Spherical { r: raw.equation },
            SurfaceKind::Parametric => Formula::Parametric {
                x: raw.equation_x,
                y: raw.equation_y,
                z: raw.equation_z,
            },
        };
        let fill = if raw.use_color {
            Fill::Color(raw.color)
        } else {
            Fill::Texture(raw.texture)
        };

        Ok(Self {
            formula,
            bounds: BoundExprs {
                row_min: raw.row_min,
                row_max: raw.row_max,
                col_min: raw.col_min,
                col_max: raw.col_max,
            },
            resolution: Resolution::new(raw.rows, raw.columns),
            display: DisplayFlags {
                draw: raw.draw,
                transparent: raw.transparent,
                draw_normals: raw.draw_normals,
                draw_grid: raw.draw_grid,
            },
            fill,
        })
    }
}

impl From<GraphSettings> for RawGraphSettings {
    fn from(settings: GraphSettings) -> Self {
        let kind = settings.formula.kind();
        let (equation, equation_x, equation_y, equation_z) = match settings.formula {
            Formula::Cartesian { z } | Formula::Cylindrical { z } => {
                (z, String::new(), String::new(), String::new())
            }
            Formula::Spherical { r } => (r, String::new(), String::new(), String::new()),
            Formula::Parametric { x, y, z } => (String::new(), x, y, z),
        };
        let (use_color, color, texture) = match settings.fill {
            Fill::Color(rgb) => (true, rgb, String::new()),
            Fill::Texture(name) => (false, [1.0; 3], name),
        };

        Self {
            cartesian: kind == SurfaceKind::Cartesian,
            cylindrical: kind == SurfaceKind::Cylindrical,
            spherical: kind == SurfaceKind::Spherical,
            parametric: kind == SurfaceKind::Parametric,
            equation,
            equation_x,
            equation_y,
            equation_z,
            row_min: settings.bounds.row_min,
            row_max: settings.bounds.row_max,
            col_min: settings.bounds.col_min,
            col_max: settings.bounds.col_max,
            rows: settings.resolution.rows,
            columns: settings.resolution.columns,
            draw: settings.display.draw,
            transparent: settings.display.transparent,
            draw_normals: settings.display.draw_normals,
            draw_grid: settings.display.draw_grid,
            use_color,
            use_texture: !use_color,
            color,
            texture,
        }
    }
}
