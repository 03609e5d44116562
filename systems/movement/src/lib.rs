#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement resolver that turns a step intent into a validated position.
//!
//! A step either moves one tile inside the current board, crosses into the
//! adjacent board, or leaves the position untouched. Stepping onto a tree or
//! rock is rejected silently. Crossing a board edge always succeeds when a
//! neighbouring board exists; the tile entered on the new board is not
//! checked.

use wanderlands_core::{BoardCoord, Direction, Position};
use wanderlands_world::{query, World};

/// Resolves one step in `direction` from `position`.
#[must_use]
pub fn step(world: &World, position: Position, direction: Direction) -> Position {
    match direction {
        Direction::North => move_up(world, position),
        Direction::East => move_right(world, position),
        Direction::South => move_down(world, position),
        Direction::West => move_left(world, position),
    }
}

/// Resolves one step toward decreasing horizontal offsets.
#[must_use]
pub fn move_left(world: &World, position: Position) -> Position {
    let bounds = Bounds::checked(world, position);
    if position.x() > 0 {
        let destination = position.with_x(position.x() - bounds.tile_size);
        return enter_if_passable(world, &bounds, position, destination);
    }
    if position.board().x() > 0 {
        let board = BoardCoord::new(position.board().x() - 1, position.board().y());
        return position.with_board(board).with_x(bounds.last_x);
    }
    position
}

/// Resolves one step toward increasing horizontal offsets.
#[must_use]
pub fn move_right(world: &World, position: Position) -> Position {
    let bounds = Bounds::checked(world, position);
    if position.x() < bounds.last_x {
        let destination = position.with_x(position.x() + bounds.tile_size);
        return enter_if_passable(world, &bounds, position, destination);
    }
    if position.board().x() + 1 < bounds.world_width {
        let board = BoardCoord::new(position.board().x() + 1, position.board().y());
        return position.with_board(board).with_x(0);
    }
    position
}

/// Resolves one step toward decreasing vertical offsets.
#[must_use]
pub fn move_up(world: &World, position: Position) -> Position {
    let bounds = Bounds::checked(world, position);
    if position.y() > 0 {
        let destination = position.with_y(position.y() - bounds.tile_size);
        return enter_if_passable(world, &bounds, position, destination);
    }
    if position.board().y() > 0 {
        let board = BoardCoord::new(position.board().x(), position.board().y() - 1);
        return position.with_board(board).with_y(bounds.last_y);
    }
    position
}

/// Resolves one step toward increasing vertical offsets.
#[must_use]
pub fn move_down(world: &World, position: Position) -> Position {
    let bounds = Bounds::checked(world, position);
    if position.y() < bounds.last_y {
        let destination = position.with_y(position.y() + bounds.tile_size);
        return enter_if_passable(world, &bounds, position, destination);
    }
    if position.board().y() + 1 < bounds.world_height {
        let board = BoardCoord::new(position.board().x(), position.board().y() + 1);
        return position.with_board(board).with_y(0);
    }
    position
}

/// Dimensions needed by every resolver, read once per call.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    tile_size: u32,
    last_x: u32,
    last_y: u32,
    world_width: u32,
    world_height: u32,
}

impl Bounds {
    fn checked(world: &World, position: Position) -> Self {
        let config = query::config(world);
        debug_assert!(
            config.contains(position),
            "position {position:?} lies outside the world"
        );
        Self {
            tile_size: config.tile_size,
            last_x: config.board_width_px() - config.tile_size,
            last_y: config.board_height_px() - config.tile_size,
            world_width: config.world_width,
            world_height: config.world_height,
        }
    }
}

fn enter_if_passable(
    world: &World,
    bounds: &Bounds,
    origin: Position,
    destination: Position,
) -> Position {
    let column = destination.column(bounds.tile_size);
    let row = destination.row(bounds.tile_size);
    if query::is_passable(world, destination.board(), column, row) {
        destination
    } else {
        origin
    }
}
