#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Wanderlands.
//!
//! A session owns the generated world, the player, the enemy population and
//! the random source that drives both generation and the per-tick walk.
//! Adapters mutate it exclusively through [`apply`] and read it through the
//! [`query`] module. Every command completes fully before it returns, so a
//! tick is never observed half-applied.

use rand::Rng;
use tracing::{debug, info, trace};
use wanderlands_core::{Command, ConfigError, EnemyId, Event, Position, SessionConfig};
use wanderlands_system_movement::step;
use wanderlands_system_population::Population;
use wanderlands_world::World;

/// Running simulation: terrain, player, enemies and the random source.
#[derive(Debug)]
pub struct Session<R> {
    config: SessionConfig,
    world: World,
    player: Position,
    population: Population,
    visible: Vec<EnemyId>,
    tick: u64,
    rng: R,
}

impl<R> Session<R>
where
    R: Rng,
{
    /// Generates a world and a population and places the player at the
    /// top-left tile of the center board.
    pub fn new(config: SessionConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::generate(config.world, &mut rng);
        let population =
            Population::generate(&config.world, config.enemy_count as usize, &mut rng);
        info!(
            enemies = population.len(),
            boards = config.world.board_count(),
            "session started"
        );
        Ok(Self::from_parts(config, world, population, rng))
    }

    /// Assembles a session from pre-built terrain and enemies.
    ///
    /// The world must have been built with `config.world`.
    #[must_use]
    pub fn from_parts(
        config: SessionConfig,
        world: World,
        population: Population,
        rng: R,
    ) -> Self {
        let player = Position::new(config.world.starting_board(), 0, 0);
        let mut session = Self {
            config,
            world,
            player,
            population,
            visible: Vec::new(),
            tick: 0,
            rng,
        };
        let _ = session.refresh_visible();
        session
    }

    /// Moves the player to an explicit position and refreshes visibility.
    ///
    /// The position must lie inside the world.
    pub fn place_player(&mut self, position: Position) {
        debug_assert!(self.world.contains(position), "player placed outside world");
        self.player = position;
        let _ = self.refresh_visible();
    }

    /// Recomputes the enemies on the player's board and reports whether the set changed.
    fn refresh_visible(&mut self) -> bool {
        let board = self.player.board();
        let visible: Vec<EnemyId> = self.population.on_board(board).map(|(id, _)| id).collect();
        if visible == self.visible {
            return false;
        }
        self.visible = visible;
        true
    }

    fn report_visibility(&mut self, out_events: &mut Vec<Event>) {
        if self.refresh_visible() {
            out_events.push(Event::VisibleEnemiesChanged {
                count: self.visible.len(),
            });
        }
    }
}

/// Applies the provided command to the session, mutating state in place.
pub fn apply<R>(session: &mut Session<R>, command: Command, out_events: &mut Vec<Event>)
where
    R: Rng,
{
    match command {
        Command::MovePlayer { direction } => {
            let from = session.player;
            let to = step(&session.world, from, direction);
            if to == from {
                trace!(?direction, "player move blocked");
                out_events.push(Event::PlayerBlocked { at: from, direction });
                return;
            }

            session.player = to;
            trace!(?direction, x = to.x(), y = to.y(), "player moved");
            out_events.push(Event::PlayerMoved { from, to });

            if to.board() != from.board() {
                debug!(
                    board_x = to.board().x(),
                    board_y = to.board().y(),
                    "player changed board"
                );
                out_events.push(Event::PlayerBoardChanged { board: to.board() });
                session.report_visibility(out_events);
            }
        }
        Command::Tick => {
            session
                .population
                .advance_all_once(&session.world, &mut session.rng);
            session.tick = session.tick.saturating_add(1);
            out_events.push(Event::TimeAdvanced { tick: session.tick });
            session.report_visibility(out_events);
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::Session;
    use wanderlands_core::{BoardCoord, EnemyId, Position, SessionConfig, WELCOME_BANNER};
    use wanderlands_system_population::Population;
    use wanderlands_world::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner<R>(_session: &Session<R>) -> &'static str {
        WELCOME_BANNER
    }

    /// Configuration the session was started with.
    #[must_use]
    pub fn config<R>(session: &Session<R>) -> &SessionConfig {
        &session.config
    }

    /// Provides read-only access to the terrain.
    #[must_use]
    pub fn world<R>(session: &Session<R>) -> &World {
        &session.world
    }

    /// Current player position.
    #[must_use]
    pub fn player<R>(session: &Session<R>) -> Position {
        session.player
    }

    /// Board currently occupied by the player.
    #[must_use]
    pub fn player_board<R>(session: &Session<R>) -> BoardCoord {
        session.player.board()
    }

    /// Provides read-only access to the enemy population.
    #[must_use]
    pub fn population<R>(session: &Session<R>) -> &Population {
        &session.population
    }

    /// Enemies sharing the player's board, in id order.
    #[must_use]
    pub fn visible_enemies<R>(session: &Session<R>) -> &[EnemyId] {
        &session.visible
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick<R>(session: &Session<R>) -> u64 {
        session.tick
    }

    /// Status text naming the player's board.
    #[must_use]
    pub fn status_line<R>(session: &Session<R>) -> String {
        let board = session.player.board();
        format!("Board {} {}", board.x(), board.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use wanderlands_core::{BoardCoord, Tile, WorldConfig, WELCOME_BANNER};

    #[test]
    fn player_starts_at_center_board_origin() {
        let config = SessionConfig {
            world: WorldConfig::new(10, 4, 4, 5, 3),
            enemy_count: 0,
            tick_interval_ms: 300,
        };
        let world = World::filled(config.world, Tile::Grass);
        let session =
            Session::from_parts(config, world, Population::default(), StepRng::new(0, 0));

        assert_eq!(
            query::player(&session),
            Position::new(BoardCoord::new(2, 1), 0, 0)
        );
        assert_eq!(query::status_line(&session), "Board 2 1");
        assert_eq!(query::welcome_banner(&session), WELCOME_BANNER);
    }

    #[test]
    fn new_rejects_invalid_configuration() {
        let config = SessionConfig {
            world: WorldConfig::new(0, 4, 4, 1, 1),
            enemy_count: 1,
            tick_interval_ms: 300,
        };

        let result = Session::new(config, StepRng::new(0, 0));

        assert!(matches!(result, Err(ConfigError::ZeroTileSize)));
    }
}
