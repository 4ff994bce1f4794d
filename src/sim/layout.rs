//! Brick layout generation
//!
//! Layouts are a pure function of difficulty and arena width: no RNG.

use super::brick::Brick;
use super::geom::Rect;
use super::state::Difficulty;
use crate::consts::*;

/// Grid cells (row, col) that hold indestructible obstacles on HARD
pub const OBSTACLE_CELLS: [(usize, usize); 5] = [(0, 2), (0, 7), (1, 4), (3, 1), (3, 5)];

/// Lay out a centered grid of bricks for `difficulty`
pub fn generate_bricks(difficulty: Difficulty, arena_width: f64) -> Vec<Brick> {
    let (rows, cols) = difficulty.grid();
    let hits = difficulty.brick_hits();

    let total_width = cols as f64 * (BRICK_SIZE + BRICK_GAP) - BRICK_GAP;
    let offset_left = (arena_width - total_width) / 2.0;

    let mut bricks = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let rect = Rect::new(
                offset_left + col as f64 * (BRICK_SIZE + BRICK_GAP),
                BRICK_OFFSET_TOP + row as f64 * (BRICK_SIZE + BRICK_GAP),
                BRICK_SIZE,
                BRICK_SIZE,
            );
            let obstacle =
                difficulty.has_obstacles() && OBSTACLE_CELLS.contains(&(row, col));
            bricks.push(if obstacle {
                Brick::indestructible(rect)
            } else {
                Brick::new(rect, hits)
            });
        }
    }

    log::debug!(
        "{:?} layout: {}x{} bricks, {} hits each",
        difficulty,
        rows,
        cols,
        hits
    );
    bricks
}
