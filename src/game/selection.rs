use std::collections::{HashMap, HashSet};

use crate::models::{Grid, Position};

/// Tracks the straight-line path of a single drag gesture.
///
/// The path is never grown incrementally: every hover recomputes it from
/// the gesture's fixed start cell, so a drag that changes direction stays
/// correct without any repair logic.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    start: Option<Position>,
    path: Vec<Position>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a gesture is in progress.
    pub fn is_selecting(&self) -> bool {
        self.start.is_some()
    }

    /// The currently selected cells, in drag order.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Start a new gesture at `cell`.
    pub fn begin(&mut self, cell: Position) {
        self.start = Some(cell);
        self.path = vec![cell];
    }

    /// Recompute the path from the gesture's start to the hovered `cell`.
    ///
    /// Only targets that are purely horizontal, purely vertical, or exactly
    /// diagonal from the start are accepted; any other hover leaves the
    /// current path untouched. Cells past the grid edge are clipped off the
    /// end of the path rather than rejecting the hover.
    pub fn extend(&mut self, cell: Position, size: usize) {
        let Some(start) = self.start else {
            return;
        };

        let d_row = cell.row as i64 - start.row as i64;
        let d_col = cell.col as i64 - start.col as i64;

        let steps = if d_row == 0 || d_col == 0 {
            d_row.abs().max(d_col.abs())
        } else if d_row.abs() == d_col.abs() {
            d_row.abs()
        } else {
            // Bent gesture: keep the previous path.
            return;
        };

        let step = (d_row.signum(), d_col.signum());
        let mut path = Vec::with_capacity(steps as usize + 1);
        for i in 0..=steps {
            let row = start.row as i64 + i * step.0;
            let col = start.col as i64 + i * step.1;
            if row < 0 || row >= size as i64 || col < 0 || col >= size as i64 {
                break;
            }
            path.push(Position {
                row: row as usize,
                col: col as usize,
            });
        }
        self.path = path;
    }

    /// Finish the gesture and match the path against the recorded
    /// placements, in either direction. Returns the matched word, if any.
    /// The path resets regardless of the outcome.
    ///
    /// A word matches only when the path's coordinates equal its recorded
    /// placement (forward or reversed). The letter comparison alone would
    /// accept a same-length run of identical letters somewhere else on the
    /// grid, so it only serves as a cheap pre-filter here.
    pub fn end(
        &mut self,
        grid: &Grid,
        placements: &HashMap<String, Vec<Position>>,
        found: &HashSet<String>,
    ) -> Option<String> {
        let path = std::mem::take(&mut self.path);
        self.start = None;

        if path.is_empty() {
            return None;
        }

        let forward: String = path.iter().filter_map(|&pos| grid.get(pos)).collect();
        let reverse: String = forward.chars().rev().collect();

        for (word, positions) in placements {
            if found.contains(word) {
                continue;
            }
            if forward != *word && reverse != *word {
                continue;
            }
            if path == *positions || path.iter().rev().eq(positions.iter()) {
                return Some(word.clone());
            }
        }

        None
    }
}
