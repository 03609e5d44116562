#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wanderlands engine.
//!
//! This crate defines the vocabulary every other crate speaks: terrain
//! [`Tile`] values, board-relative [`Position`] records, the [`Direction`]
//! of an intended step and the configuration that sizes the world. Adapters
//! submit [`Command`] values describing player intents and timer ticks, the
//! session executes them via its `apply` entry point and then reports the
//! outcome as [`Event`] values.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Wanderlands.";

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player attempt a single step in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the simulation by one fixed-interval tick.
    Tick,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two positions.
    PlayerMoved {
        /// Position occupied before the step.
        from: Position,
        /// Position occupied after the step.
        to: Position,
    },
    /// Reports that a requested player step was a no-op.
    PlayerBlocked {
        /// Position the player keeps occupying.
        at: Position,
        /// Direction that was requested.
        direction: Direction,
    },
    /// Announces that the player entered a different board.
    PlayerBoardChanged {
        /// Board the player occupies after the step.
        board: BoardCoord,
    },
    /// Indicates that every enemy advanced once.
    TimeAdvanced {
        /// Number of ticks processed since the session started.
        tick: u64,
    },
    /// Reports that the set of enemies sharing the player's board changed.
    VisibleEnemiesChanged {
        /// Number of enemies now sharing the player's board.
        count: usize,
    },
}

/// Terrain kinds that can occupy a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open ground.
    Grass,
    /// Impassable vegetation.
    Tree,
    /// Bare, walkable soil.
    Dirt,
    /// Impassable stone.
    Rock,
}

impl Tile {
    /// Every terrain kind in declaration order.
    pub const ALL: [Tile; 4] = [Tile::Grass, Tile::Tree, Tile::Dirt, Tile::Rock];

    /// Reports whether entities may step onto the tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Tile::Grass | Tile::Dirt)
    }
}

/// Cardinal movement directions available to entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row offsets.
    North,
    /// Movement toward increasing column offsets.
    East,
    /// Movement toward increasing row offsets.
    South,
    /// Movement toward decreasing column offsets.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Coordinate of a board within the world grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BoardCoord {
    x: u32,
    y: u32,
}

impl BoardCoord {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based board column within the world.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based board row within the world.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Location of one entity: a board plus a pixel offset inside that board.
///
/// Offsets are always whole multiples of the configured tile size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    board: BoardCoord,
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new position from a board and in-board pixel offsets.
    #[must_use]
    pub const fn new(board: BoardCoord, x: u32, y: u32) -> Self {
        Self { board, x, y }
    }

    /// Board containing the position.
    #[must_use]
    pub const fn board(&self) -> BoardCoord {
        self.board
    }

    /// Horizontal pixel offset within the board.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical pixel offset within the board.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Copy of the position with a different horizontal offset.
    #[must_use]
    pub const fn with_x(self, x: u32) -> Self {
        Self { x, ..self }
    }

    /// Copy of the position with a different vertical offset.
    #[must_use]
    pub const fn with_y(self, y: u32) -> Self {
        Self { y, ..self }
    }

    /// Copy of the position on a different board, keeping the offsets.
    #[must_use]
    pub const fn with_board(self, board: BoardCoord) -> Self {
        Self { board, ..self }
    }

    /// Tile column addressed by the horizontal offset.
    #[must_use]
    pub const fn column(&self, tile_size: u32) -> u32 {
        self.x / tile_size
    }

    /// Tile row addressed by the vertical offset.
    #[must_use]
    pub const fn row(&self, tile_size: u32) -> u32 {
        self.y / tile_size
    }
}

/// Dense identifier of one enemy within the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the enemy within dense population storage.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Fixed dimensions of the world, its boards and their tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Pixel span of one square tile.
    pub tile_size: u32,
    /// Number of tile columns in every board.
    pub tiles_across: u32,
    /// Number of tile rows in every board.
    pub tiles_tall: u32,
    /// Number of board columns in the world.
    pub world_width: u32,
    /// Number of board rows in the world.
    pub world_height: u32,
}

impl WorldConfig {
    /// Creates a configuration with explicit dimensions.
    #[must_use]
    pub const fn new(
        tile_size: u32,
        tiles_across: u32,
        tiles_tall: u32,
        world_width: u32,
        world_height: u32,
    ) -> Self {
        Self {
            tile_size,
            tiles_across,
            tiles_tall,
            world_width,
            world_height,
        }
    }

    /// Width of one board in pixels.
    #[must_use]
    pub const fn board_width_px(&self) -> u32 {
        self.tiles_across * self.tile_size
    }

    /// Height of one board in pixels.
    #[must_use]
    pub const fn board_height_px(&self) -> u32 {
        self.tiles_tall * self.tile_size
    }

    /// Number of tiles stored per board.
    #[must_use]
    pub const fn tiles_per_board(&self) -> usize {
        self.tiles_across as usize * self.tiles_tall as usize
    }

    /// Number of boards stored in the world.
    #[must_use]
    pub const fn board_count(&self) -> usize {
        self.world_width as usize * self.world_height as usize
    }

    /// Board where the player enters the world.
    #[must_use]
    pub const fn starting_board(&self) -> BoardCoord {
        BoardCoord::new(self.world_width / 2, self.world_height / 2)
    }

    /// Reports whether the board coordinate lies inside the world grid.
    #[must_use]
    pub const fn contains_board(&self, board: BoardCoord) -> bool {
        board.x() < self.world_width && board.y() < self.world_height
    }

    /// Reports whether the position addresses a tile of an existing board.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        self.contains_board(position.board())
            && position.x() < self.board_width_px()
            && position.y() < self.board_height_px()
            && position.x() % self.tile_size == 0
            && position.y() % self.tile_size == 0
    }

    /// Checks that every dimension is usable and that pixel spans fit in `u32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.tiles_across == 0 || self.tiles_tall == 0 {
            return Err(ConfigError::EmptyBoard {
                tiles_across: self.tiles_across,
                tiles_tall: self.tiles_tall,
            });
        }
        if self.world_width == 0 || self.world_height == 0 {
            return Err(ConfigError::EmptyWorld {
                world_width: self.world_width,
                world_height: self.world_height,
            });
        }
        if self.tiles_across.checked_mul(self.tile_size).is_none()
            || self.tiles_tall.checked_mul(self.tile_size).is_none()
        {
            return Err(ConfigError::PixelOverflow {
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(30, 62, 26, 100, 100)
    }
}

/// Complete configuration of a running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Dimensions of the generated world.
    pub world: WorldConfig,
    /// Number of enemies placed at session start.
    pub enemy_count: u32,
    /// Period of the simulation timer in milliseconds.
    pub tick_interval_ms: u64,
}

impl SessionConfig {
    /// Period of the simulation timer.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks the world dimensions and the timer period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            enemy_count: 10_000,
            tick_interval_ms: 300,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tiles must span at least one pixel.
    #[error("tile size must be greater than zero")]
    ZeroTileSize,
    /// Boards must contain at least one tile in each direction.
    #[error("board must be at least 1x1 tiles, got {tiles_across}x{tiles_tall}")]
    EmptyBoard {
        /// Configured tile columns.
        tiles_across: u32,
        /// Configured tile rows.
        tiles_tall: u32,
    },
    /// The world must contain at least one board.
    #[error("world must be at least 1x1 boards, got {world_width}x{world_height}")]
    EmptyWorld {
        /// Configured board columns.
        world_width: u32,
        /// Configured board rows.
        world_height: u32,
    },
    /// Board pixel dimensions overflow the offset type.
    #[error("board pixel size overflows with tile size {tile_size}")]
    PixelOverflow {
        /// Configured tile size.
        tile_size: u32,
    },
    /// The simulation timer must have a non-zero period.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
