#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wanderlands adapters.
//!
//! A [`Scene`] is a snapshot of everything a shell needs to draw one frame:
//! the terrain of the player's board, the enemies sharing that board, the
//! player and the status line. Backends implement [`RenderingBackend`] and
//! never reach into the session directly.

use std::fmt::Write as _;

use anyhow::Result as AnyResult;
use glam::Vec2;
use thiserror::Error;
use wanderlands_core::{BoardCoord, Position, Tile};
use wanderlands_system_session::{query, Session};
use wanderlands_world::{query as world_query, Board};

/// Glyph drawn for the player in text frames.
pub const PLAYER_GLYPH: char = '@';
/// Glyph drawn for an enemy in text frames.
pub const ENEMY_GLYPH: char = 'E';

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Fixed display colors for terrain and entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color of grass tiles.
    pub grass: Color,
    /// Color of tree tiles.
    pub tree: Color,
    /// Color of dirt tiles.
    pub dirt: Color,
    /// Color of rock tiles.
    pub rock: Color,
    /// Color of enemies.
    pub enemy: Color,
    /// Color of the player.
    pub player: Color,
}

impl Palette {
    /// Display color of a terrain kind.
    #[must_use]
    pub const fn tile(&self, tile: Tile) -> Color {
        match tile {
            Tile::Grass => self.grass,
            Tile::Tree => self.tree,
            Tile::Dirt => self.dirt,
            Tile::Rock => self.rock,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grass: Color::from_rgb_u8(0x4e, 0x9f, 0x3d),
            tree: Color::from_rgb_u8(0x1e, 0x51, 0x28),
            dirt: Color::from_rgb_u8(0x8b, 0x5a, 0x2b),
            rock: Color::from_rgb_u8(0x80, 0x80, 0x80),
            enemy: Color::from_rgb_u8(0xd6, 0x5a, 0x31),
            player: Color::from_rgb_u8(0xee, 0xee, 0xee),
        }
    }
}

/// Text glyph of a terrain kind.
#[must_use]
pub const fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Grass => '.',
        Tile::Tree => 'T',
        Tile::Dirt => ',',
        Tile::Rock => '#',
    }
}

/// Terrain of the board being presented.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainPresentation {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Pixel span of one tile.
    pub tile_size: f32,
    /// Terrain rows from top to bottom.
    pub tiles: Vec<Vec<Tile>>,
}

impl TerrainPresentation {
    fn from_board(board: &Board, tile_size: u32) -> Self {
        Self {
            columns: board.columns(),
            rows: board.rows(),
            tile_size: tile_size as f32,
            tiles: board.rows_iter().map(<[Tile]>::to_vec).collect(),
        }
    }

    /// Width of the board in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Height of the board in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Tile column and row containing a pixel position, if inside the board.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        if position.x < 0.0
            || position.y < 0.0
            || position.x >= self.width()
            || position.y >= self.height()
        {
            return None;
        }
        let cell = (position / self.tile_size).floor();
        Some((cell.x as usize, cell.y as usize))
    }
}

/// Entity drawn on top of the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityPresentation {
    /// Top-left corner of the entity's tile in board pixels.
    pub position: Vec2,
    /// Fill color of the entity.
    pub color: Color,
}

impl EntityPresentation {
    fn at(position: Position, color: Color) -> Self {
        Self {
            position: Vec2::new(position.x() as f32, position.y() as f32),
            color,
        }
    }
}

/// Snapshot of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board the player currently occupies.
    pub board: BoardCoord,
    /// Terrain of that board.
    pub terrain: TerrainPresentation,
    /// Enemies sharing the player's board.
    pub enemies: Vec<EntityPresentation>,
    /// The player.
    pub player: EntityPresentation,
    /// Status text shown under the board.
    pub status: String,
    /// Number of ticks processed when the snapshot was taken.
    pub tick: u64,
    /// Palette used to color the frame.
    pub palette: Palette,
}

impl Scene {
    /// Captures the player's board and everything on it.
    pub fn capture<R>(session: &Session<R>, palette: Palette) -> Result<Self, RenderingError> {
        let world = query::world(session);
        let board = query::player_board(session);
        let tile_size = world_query::config(world).tile_size;
        let terrain = world_query::board(world, board)
            .map(|tiles| TerrainPresentation::from_board(tiles, tile_size))
            .ok_or(RenderingError::MissingBoard { board })?;

        let population = query::population(session);
        let enemies = query::visible_enemies(session)
            .iter()
            .filter_map(|id| population.get(*id))
            .map(|position| EntityPresentation::at(position, palette.enemy))
            .collect();

        Ok(Self {
            board,
            terrain,
            enemies,
            player: EntityPresentation::at(query::player(session), palette.player),
            status: query::status_line(session),
            tick: query::tick(session),
            palette,
        })
    }

    /// Renders the scene as text: one line per tile row followed by the status line.
    ///
    /// With `ansi` set every glyph is wrapped in a 24-bit foreground color escape.
    #[must_use]
    pub fn render_text(&self, ansi: bool) -> String {
        let mut grid: Vec<Vec<(char, Color)>> = self
            .terrain
            .tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| (tile_glyph(*tile), self.palette.tile(*tile)))
                    .collect()
            })
            .collect();

        let overlays = self
            .enemies
            .iter()
            .map(|enemy| (ENEMY_GLYPH, enemy))
            .chain(std::iter::once((PLAYER_GLYPH, &self.player)));
        for (glyph, entity) in overlays {
            if let Some((column, row)) = self.terrain.cell_at(entity.position) {
                if let Some(slot) = grid.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                    *slot = (glyph, entity.color);
                }
            }
        }

        let mut frame = String::new();
        for row in grid {
            for (glyph, color) in row {
                if ansi {
                    let [red, green, blue] = color.to_rgb_u8();
                    let _ = write!(frame, "\x1b[38;2;{red};{green};{blue}m{glyph}");
                } else {
                    frame.push(glyph);
                }
            }
            if ansi {
                frame.push_str("\x1b[0m");
            }
            frame.push('\n');
        }
        frame.push_str(&self.status);
        frame
    }
}

/// Rendering backend capable of presenting scenes.
pub trait RenderingBackend {
    /// Presents one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur when capturing scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The player's board is not stored in the world.
    #[error("board {board:?} is not part of the world")]
    MissingBoard {
        /// Board the player claims to occupy.
        board: BoardCoord,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use wanderlands_core::{SessionConfig, WorldConfig};
    use wanderlands_system_population::Population;
    use wanderlands_world::World;

    fn scene_with(positions: Vec<Position>) -> Scene {
        let config = SessionConfig {
            world: WorldConfig::new(10, 4, 3, 1, 1),
            enemy_count: positions.len() as u32,
            tick_interval_ms: 300,
        };
        let world = World::from_fn(config.world, |_, column, row| match (column, row) {
            (3, 0) => Tile::Tree,
            (2, 2) => Tile::Rock,
            (1, 1) => Tile::Dirt,
            _ => Tile::Grass,
        });
        let population = Population::from_positions(positions);
        let session = Session::from_parts(config, world, population, StepRng::new(0, 0));
        Scene::capture(&session, Palette::default()).expect("board exists")
    }

    #[test]
    fn byte_colors_are_usable_in_constants() {
        const GRASS: Color = Color::from_rgb_u8(0x4e, 0x9f, 0x3d);
        assert_eq!(GRASS, Palette::default().grass);
        assert_eq!(GRASS.alpha, 1.0);
    }

    #[test]
    fn palette_matches_terrain_kinds() {
        let palette = Palette::default();
        assert_eq!(palette.tile(Tile::Grass), palette.grass);
        assert_eq!(palette.tile(Tile::Rock).to_rgb_u8(), [0x80, 0x80, 0x80]);
        assert_eq!(palette.enemy.to_rgb_u8(), [0xd6, 0x5a, 0x31]);
    }

    #[test]
    fn text_frame_draws_terrain_entities_and_status() {
        let board = BoardCoord::new(0, 0);
        let scene = scene_with(vec![Position::new(board, 20, 10), Position::new(board, 0, 0)]);

        assert_eq!(scene.render_text(false), "@..T\n.,E.\n..#.\nBoard 0 0");
    }

    #[test]
    fn ansi_frame_wraps_glyphs_in_color_escapes() {
        let scene = scene_with(Vec::new());
        let frame = scene.render_text(true);

        assert!(frame.starts_with("\x1b[38;2;238;238;238m@"));
        assert_eq!(frame.matches("\x1b[0m").count(), 3);
    }

    #[test]
    fn cell_at_rejects_positions_outside_the_board() {
        let scene = scene_with(Vec::new());

        assert_eq!(scene.terrain.cell_at(Vec2::new(39.0, 29.0)), Some((3, 2)));
        assert_eq!(scene.terrain.cell_at(Vec2::new(40.0, 0.0)), None);
        assert_eq!(scene.terrain.cell_at(Vec2::new(-1.0, 0.0)), None);
    }
}
