//! Per-tile terrain selection used when generating boards.

use rand::Rng;
use wanderlands_core::{Tile, WorldConfig};

use crate::Board;

const TREE_UPPER_BOUND: f64 = 0.03;
const DIRT_UPPER_BOUND: f64 = 0.04;
const ROCK_UPPER_BOUND: f64 = 0.06;

/// Maps a uniform sample from `[0, 1)` onto a terrain kind.
///
/// `[0, 0.03)` is a tree, `[0.03, 0.04)` dirt, `[0.04, 0.06)` rock and
/// everything above is grass.
#[must_use]
pub fn terrain_for_sample(sample: f64) -> Tile {
    if sample < TREE_UPPER_BOUND {
        Tile::Tree
    } else if sample < DIRT_UPPER_BOUND {
        Tile::Dirt
    } else if sample < ROCK_UPPER_BOUND {
        Tile::Rock
    } else {
        Tile::Grass
    }
}

/// Reports whether the tile lies on the outer ring of a board.
#[must_use]
pub fn is_border(column: u32, row: u32, columns: u32, rows: u32) -> bool {
    column == 0 || row == 0 || column + 1 >= columns || row + 1 >= rows
}

/// Generates one board, forcing the outer ring to grass.
///
/// Border tiles do not consume a sample.
pub(crate) fn generate_board<R>(config: &WorldConfig, rng: &mut R) -> Board
where
    R: Rng + ?Sized,
{
    let columns = config.tiles_across;
    let rows = config.tiles_tall;
    Board::from_fn(columns, rows, |column, row| {
        if is_border(column, row, columns, rows) {
            Tile::Grass
        } else {
            terrain_for_sample(rng.gen::<f64>())
        }
    })
}
