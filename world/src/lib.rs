#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terrain storage and procedural generation for Wanderlands.
//!
//! The world is a grid of boards and every board is a grid of tiles. Both
//! grids are dense and row-major. Terrain is produced once, either by
//! [`World::generate`] or by an explicit fixture built through
//! [`World::from_fn`], and is never mutated afterwards. Systems read it
//! through the [`query`] module.

mod generation;

use rand::Rng;
use tracing::info;
use wanderlands_core::{BoardCoord, Position, Tile, WorldConfig};

pub use generation::{is_border, terrain_for_sample};

/// Rectangular grid of terrain tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds a board by asking `tile_at` for every `(column, row)` in row-major order.
    #[must_use]
    pub fn from_fn<F>(columns: u32, rows: u32, mut tile_at: F) -> Self
    where
        F: FnMut(u32, u32) -> Tile,
    {
        let capacity = columns as usize * rows as usize;
        let mut tiles = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                tiles.push(tile_at(column, row));
            }
        }
        Self {
            columns,
            rows,
            tiles,
        }
    }

    /// Board filled with a single terrain kind.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, tile: Tile) -> Self {
        Self::from_fn(columns, rows, |_, _| tile)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Terrain at the provided tile, or `None` outside the board.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<Tile> {
        if column < self.columns && row < self.rows {
            let index = row as usize * self.columns as usize + column as usize;
            self.tiles.get(index).copied()
        } else {
            None
        }
    }

    /// Iterates the rows of the board from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.columns.max(1) as usize)
    }

    /// Iterates every tile alongside its `(column, row)` coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Tile)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (index % columns, index / columns, *tile)
        })
    }
}

/// Immutable grid of boards that makes up the explorable world.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    boards: Vec<Board>,
}

impl World {
    /// Generates fresh terrain for every board using the provided random source.
    ///
    /// Boards are produced in row-major board order and each board draws one
    /// sample per interior tile. The configuration must already be validated.
    #[must_use]
    pub fn generate<R>(config: WorldConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        debug_assert!(config.validate().is_ok(), "invalid world configuration");
        let mut boards = Vec::with_capacity(config.board_count());
        for _ in 0..config.board_count() {
            boards.push(generation::generate_board(&config, rng));
        }
        info!(
            world_width = config.world_width,
            world_height = config.world_height,
            tiles_across = config.tiles_across,
            tiles_tall = config.tiles_tall,
            "generated world terrain"
        );
        Self { config, boards }
    }

    /// Builds a world whose terrain is chosen explicitly per board and tile.
    ///
    /// No border rule is applied; the closure decides every tile.
    #[must_use]
    pub fn from_fn<F>(config: WorldConfig, mut tile_at: F) -> Self
    where
        F: FnMut(BoardCoord, u32, u32) -> Tile,
    {
        let mut boards = Vec::with_capacity(config.board_count());
        for board_y in 0..config.world_height {
            for board_x in 0..config.world_width {
                let board = BoardCoord::new(board_x, board_y);
                boards.push(Board::from_fn(
                    config.tiles_across,
                    config.tiles_tall,
                    |column, row| tile_at(board, column, row),
                ));
            }
        }
        Self { config, boards }
    }

    /// World where every tile of every board holds the same terrain.
    #[must_use]
    pub fn filled(config: WorldConfig, tile: Tile) -> Self {
        Self::from_fn(config, |_, _, _| tile)
    }

    /// Reports whether the position lies on an existing, tile-aligned tile.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.config.contains(position)
    }

    fn board_index(&self, board: BoardCoord) -> Option<usize> {
        if self.config.contains_board(board) {
            Some(board.y() as usize * self.config.world_width as usize + board.x() as usize)
        } else {
            None
        }
    }
}

/// Query functions that provide read-only access to the terrain.
pub mod query {
    use super::{Board, World};
    use wanderlands_core::{BoardCoord, Position, Tile, WorldConfig};

    /// Dimensions the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Board stored at the provided coordinate, if it exists.
    #[must_use]
    pub fn board(world: &World, board: BoardCoord) -> Option<&Board> {
        world
            .board_index(board)
            .and_then(|index| world.boards.get(index))
    }

    /// Iterates every board alongside its coordinate in row-major order.
    pub fn boards(world: &World) -> impl Iterator<Item = (BoardCoord, &Board)> {
        let width = world.config.world_width.max(1);
        world.boards.iter().enumerate().map(move |(index, board)| {
            let index = index as u32;
            (BoardCoord::new(index % width, index / width), board)
        })
    }

    /// Terrain at a tile addressed by board and tile coordinates.
    #[must_use]
    pub fn tile(world: &World, board: BoardCoord, column: u32, row: u32) -> Option<Tile> {
        self::board(world, board).and_then(|board| board.tile(column, row))
    }

    /// Terrain underneath a position.
    #[must_use]
    pub fn tile_at(world: &World, position: Position) -> Option<Tile> {
        let tile_size = world.config.tile_size;
        tile(
            world,
            position.board(),
            position.column(tile_size),
            position.row(tile_size),
        )
    }

    /// Reports whether the tile addressed by board and tile coordinates can be entered.
    ///
    /// Coordinates outside the world are never passable.
    #[must_use]
    pub fn is_passable(world: &World, board: BoardCoord, column: u32, row: u32) -> bool {
        tile(world, board, column, row).is_some_and(Tile::is_passable)
    }
}
