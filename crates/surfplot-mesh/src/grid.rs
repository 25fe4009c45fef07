//! Decimated grid lines drawn over the surface.

use surfplot_geometry::Lattice;

use crate::RESTART_INDEX;

/// Each axis is split into this many parts; the interior cuts become lines.
pub const GRID_DIVISIONS: usize = 10;

/// Build the line-strip index buffer for the surface grid.
///
/// Emits one line along every `1/10`th of the row span, then one along every
/// `1/10`th of the column span. Boundary rows and columns are left out, as
/// are lines that round onto the previous one at low resolution. Undefined
/// vertices are replaced by [`RESTART_INDEX`] and every line is terminated
/// by one.
pub fn grid_line_indices(lattice: &Lattice) -> Vec<u32> {
    let rows = lattice.rows();
    let cols = lattice.columns();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let vertex = |i: usize, j: usize| {
        if lattice.is_defined(i, j) {
            lattice.index(i, j) as u32
        } else {
            RESTART_INDEX
        }
    };

    let row_lines = interior_lines(rows);
    let col_lines = interior_lines(cols);
    let mut out = Vec::with_capacity(row_lines.len() * (cols + 1) + col_lines.len() * (rows + 1));

    for &i in &row_lines {
        out.extend((0..cols).map(|j| vertex(i, j)));
        out.push(RESTART_INDEX);
    }
    for &j in &col_lines {
        out.extend((0..rows).map(|i| vertex(i, j)));
        out.push(RESTART_INDEX);
    }

    out
}

/// Sample indices nearest to `k/10` of the span `0..=count-1`, for
/// `k = 1..=9`, without the two boundary samples and without repeats.
fn interior_lines(count: usize) -> Vec<usize> {
    let last = count.saturating_sub(1);
    let mut lines: Vec<usize> = Vec::with_capacity(GRID_DIVISIONS - 1);
    for k in 1..GRID_DIVISIONS {
        let index = (k * last + GRID_DIVISIONS / 2) / GRID_DIVISIONS;
        if index == 0 || index == last || lines.last() == Some(&index) {
            continue;
        }
        lines.push(index);
    }
    lines
}

/// Expand a restart-separated line strip into independent segments.
pub fn line_strip_segments(strip: &[u32]) -> Vec<[u32; 2]> {
    strip
        .split(|&i| i == RESTART_INDEX)
        .flat_map(|run| run.windows(2).map(|w| [w[0], w[1]]))
        .collect()
}
