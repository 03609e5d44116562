#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy population that performs an unbiased four-way random walk.
//!
//! Enemies are stored densely and addressed by [`EnemyId`]. Each tick every
//! enemy draws one sample, picks a direction from it and lets the movement
//! resolver decide where it ends up. Enemies never interact with each other
//! or with the player; only terrain and world edges constrain them.

use rand::Rng;
use tracing::debug;
use wanderlands_core::{BoardCoord, Direction, EnemyId, Position, WorldConfig};
use wanderlands_system_movement::step;
use wanderlands_world::World;

/// Maps a uniform sample from `[0, 1)` onto a step direction by quartiles.
///
/// `[0, 0.25)` west, `[0.25, 0.5)` east, `[0.5, 0.75)` north, the rest south.
#[must_use]
pub fn direction_for_sample(sample: f64) -> Direction {
    if sample < 0.25 {
        Direction::West
    } else if sample < 0.5 {
        Direction::East
    } else if sample < 0.75 {
        Direction::North
    } else {
        Direction::South
    }
}

/// Dense collection of enemy positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Population {
    enemies: Vec<Position>,
}

impl Population {
    /// Places `count` enemies on uniformly random boards and tiles.
    ///
    /// Per enemy the board column, board row, tile column and tile row are
    /// drawn in that order. Overlapping placements are allowed.
    #[must_use]
    pub fn generate<R>(config: &WorldConfig, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut enemies = Vec::with_capacity(count);
        for _ in 0..count {
            let board = BoardCoord::new(
                rng.gen_range(0..config.world_width),
                rng.gen_range(0..config.world_height),
            );
            let column = rng.gen_range(0..config.tiles_across);
            let row = rng.gen_range(0..config.tiles_tall);
            enemies.push(Position::new(
                board,
                column * config.tile_size,
                row * config.tile_size,
            ));
        }
        Self { enemies }
    }

    /// Wraps explicit enemy positions, in id order.
    #[must_use]
    pub fn from_positions(enemies: Vec<Position>) -> Self {
        Self { enemies }
    }

    /// Advances every enemy by one random step, in id order.
    ///
    /// Blocked enemies stay where they are for this tick.
    pub fn advance_all_once<R>(&mut self, world: &World, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut moved = 0_usize;
        for enemy in &mut self.enemies {
            let direction = direction_for_sample(rng.gen::<f64>());
            let next = step(world, *enemy, direction);
            if next != *enemy {
                moved += 1;
                *enemy = next;
            }
        }
        debug!(enemies = self.enemies.len(), moved, "advanced population");
    }

    /// Number of enemies in the population.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether the population holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Current position of one enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<Position> {
        self.enemies.get(id.index()).copied()
    }

    /// Iterates every enemy alongside its identifier.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, Position)> + '_ {
        self.enemies
            .iter()
            .enumerate()
            .map(|(index, position)| (EnemyId::new(index as u32), *position))
    }

    /// Iterates the enemies currently located on `board`.
    pub fn on_board(&self, board: BoardCoord) -> impl Iterator<Item = (EnemyId, Position)> + '_ {
        self.iter()
            .filter(move |(_, position)| position.board() == board)
    }

    /// Positions of every enemy in id order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.enemies
    }
}
