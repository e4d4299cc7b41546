//! Flow-field grid: one force vector per cell, resampled from noise each frame.
//!
//! Cells are stored row-major. Unlike a wrapping scalar field, lookups outside
//! the grid are not an error and do not wrap: they mean "no field here".

use crate::error::EngineError;
use crate::noise::{NoiseField, NoiseMode};
use crate::vector::{Polar, Vector2};
use std::f64::consts::TAU;

/// Spatial frequency divisor for the angle sample.
const ANGLE_SCALE: f64 = 20.0;
/// Spatial frequency divisor for the magnitude sample.
const MAGNITUDE_SCALE: f64 = 40.0;
/// Offset moving the magnitude sample into an unrelated region of noise space.
const MAGNITUDE_OFFSET: f64 = 40_000.0;
/// Smallest cell edge used for allocation and lookup.
const MIN_CELL_SIZE: f64 = 1.0;

/// A `columns × rows` grid of force vectors.
#[derive(Debug, Clone)]
pub struct FlowFieldGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Vector2>,
}

impl FlowFieldGrid {
    /// Creates a zero-filled grid.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `columns * rows` overflows `usize`.
    pub fn new(columns: usize, rows: usize) -> Result<Self, EngineError> {
        if columns == 0 || rows == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = columns
            .checked_mul(rows)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            columns,
            rows,
            cells: vec![Vector2::ZERO; len],
        })
    }

    /// Allocates a grid covering a `width × height` viewport.
    ///
    /// `columns = round(width / cell) + 1`, `rows = round(height / cell) + 1`,
    /// so the grid always has at least one cell and reaches one cell past the
    /// right and bottom edges.
    pub fn for_viewport(width: usize, height: usize, cell_size: f64) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let cell = guard_cell_size(cell_size);
        let columns = (width as f64 / cell).round() as usize + 1;
        let rows = (height as f64 / cell).round() as usize + 1;
        Self::new(columns, rows)
    }

    /// Number of cells per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// All cells in row-major order, `columns * rows` long.
    pub fn cells(&self) -> &[Vector2] {
        &self.cells
    }

    /// Vector at cell `(cx, cy)`, `None` outside the grid.
    pub fn get(&self, cx: usize, cy: usize) -> Option<Vector2> {
        if cx < self.columns && cy < self.rows {
            Some(self.cells[cy * self.columns + cx])
        } else {
            None
        }
    }

    /// Vector of the cell under a pixel position.
    ///
    /// Positions left of or above the grid, past its last column or row, or
    /// non-finite, yield `None`.
    pub fn lookup(&self, position: Vector2, cell_size: f64) -> Option<Vector2> {
        let cell = guard_cell_size(cell_size);
        let gx = position.x / cell;
        let gy = position.y / cell;
        if gx >= 0.0 && gx < self.columns as f64 && gy >= 0.0 && gy < self.rows as f64 {
            self.get(gx.floor() as usize, gy.floor() as usize)
        } else {
            None
        }
    }

    /// Resamples every cell at noise time `time`.
    ///
    /// The angle comes from `noise(cx/20, cy/20, t)`, scaled to a full turn
    /// and normalised into `[0, 2π)`. The magnitude comes from a second,
    /// decorrelated sample `|noise(cx/40 + 40000, cy/40 + 40000, t)| · force`.
    /// Each cell is updated by setting its length first and its angle second.
    pub fn recompute(&mut self, noise: &NoiseField, time: f64, force: f64, mode: NoiseMode) {
        let columns = self.columns;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let cx = (i % columns) as f64;
            let cy = (i / columns) as f64;
            let angle = (noise.sample(mode, cx / ANGLE_SCALE, cy / ANGLE_SCALE, time) * TAU)
                .rem_euclid(TAU);
            let magnitude = (noise.sample(
                mode,
                cx / MAGNITUDE_SCALE + MAGNITUDE_OFFSET,
                cy / MAGNITUDE_SCALE + MAGNITUDE_OFFSET,
                time,
            ) * force)
                .abs();
            cell.set_length(magnitude).set_angle(angle);
        }
    }

    /// Iterates `(cx, cy, vector)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Vector2)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.columns, i / self.columns, v))
    }
}

fn guard_cell_size(cell_size: f64) -> f64 {
    if cell_size.is_finite() {
        cell_size.max(MIN_CELL_SIZE)
    } else {
        MIN_CELL_SIZE
    }
}
