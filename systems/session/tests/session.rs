use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wanderlands_core::{
    BoardCoord, Command, Direction, EnemyId, Event, Position, SessionConfig, Tile, WorldConfig,
};
use wanderlands_system_population::Population;
use wanderlands_system_session::{self as session, query, Session};
use wanderlands_world::World;

const TILE: u32 = 30;

fn small_config(enemy_count: u32) -> SessionConfig {
    SessionConfig {
        world: WorldConfig::new(TILE, 6, 4, 3, 3),
        enemy_count,
        tick_interval_ms: 300,
    }
}

fn open_session(population: Population) -> Session<ChaCha8Rng> {
    let config = small_config(population.len() as u32);
    let world = World::filled(config.world, Tile::Grass);
    Session::from_parts(config, world, population, ChaCha8Rng::seed_from_u64(1))
}

fn brute_force_visible(session: &Session<ChaCha8Rng>) -> Vec<EnemyId> {
    let board = query::player_board(session);
    query::population(session)
        .iter()
        .filter(|(_, position)| position.board() == board)
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn new_session_generates_configured_population() {
    let config = small_config(40);
    let session = Session::new(config, ChaCha8Rng::seed_from_u64(0xabc)).expect("valid config");

    assert_eq!(query::population(&session).len(), 40);
    assert_eq!(query::tick(&session), 0);
    assert_eq!(query::player_board(&session), BoardCoord::new(1, 1));
    assert_eq!(query::visible_enemies(&session), brute_force_visible(&session).as_slice());
}

#[test]
fn player_move_emits_moved_event() {
    let mut session = open_session(Population::default());
    let mut events = Vec::new();

    session::apply(
        &mut session,
        Command::MovePlayer {
            direction: Direction::East,
        },
        &mut events,
    );

    let start = Position::new(BoardCoord::new(1, 1), 0, 0);
    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: start,
            to: start.with_x(TILE),
        }]
    );
    assert_eq!(query::player(&session), start.with_x(TILE));
}

#[test]
fn blocked_player_move_emits_blocked_event() {
    let config = small_config(0);
    let world = World::from_fn(config.world, |_, column, row| {
        if (column, row) == (1, 0) {
            Tile::Tree
        } else {
            Tile::Grass
        }
    });
    let mut session = Session::from_parts(
        config,
        world,
        Population::default(),
        ChaCha8Rng::seed_from_u64(2),
    );
    let start = query::player(&session);
    let mut events = Vec::new();

    session::apply(
        &mut session,
        Command::MovePlayer {
            direction: Direction::East,
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::PlayerBlocked {
            at: start,
            direction: Direction::East,
        }]
    );
    assert_eq!(query::player(&session), start);
}

#[test]
fn crossing_into_populated_board_reports_visibility() {
    let west_board = BoardCoord::new(0, 1);
    let population = Population::from_positions(vec![
        Position::new(west_board, 60, 30),
        Position::new(west_board, 90, 60),
        Position::new(BoardCoord::new(2, 2), 0, 0),
    ]);
    let mut session = open_session(population);
    assert!(query::visible_enemies(&session).is_empty());
    let mut events = Vec::new();

    session::apply(
        &mut session,
        Command::MovePlayer {
            direction: Direction::West,
        },
        &mut events,
    );

    let last_x = small_config(0).world.board_width_px() - TILE;
    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                from: Position::new(BoardCoord::new(1, 1), 0, 0),
                to: Position::new(west_board, last_x, 0),
            },
            Event::PlayerBoardChanged { board: west_board },
            Event::VisibleEnemiesChanged { count: 2 },
        ]
    );
    assert_eq!(
        query::visible_enemies(&session),
        &[EnemyId::new(0), EnemyId::new(1)]
    );
    assert_eq!(query::status_line(&session), "Board 0 1");
}

#[test]
fn crossing_between_boards_with_equal_counts_reports_new_set() {
    let west_board = BoardCoord::new(0, 1);
    let start_board = BoardCoord::new(1, 1);
    let population = Population::from_positions(vec![
        Position::new(west_board, 60, 30),
        Position::new(west_board, 90, 60),
        Position::new(start_board, 60, 30),
        Position::new(start_board, 90, 60),
    ]);
    let mut session = open_session(population);
    assert_eq!(
        query::visible_enemies(&session),
        &[EnemyId::new(2), EnemyId::new(3)]
    );
    let mut events = Vec::new();

    session::apply(
        &mut session,
        Command::MovePlayer {
            direction: Direction::West,
        },
        &mut events,
    );

    assert_eq!(
        events.last(),
        Some(&Event::VisibleEnemiesChanged { count: 2 })
    );
    assert_eq!(
        query::visible_enemies(&session),
        &[EnemyId::new(0), EnemyId::new(1)]
    );
}

#[test]
fn ticks_advance_counter_and_keep_visibility_consistent() {
    let mut session = Session::new(small_config(120), ChaCha8Rng::seed_from_u64(0x5150))
        .expect("valid config");
    let directions = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    for tick in 1..=60_u64 {
        let mut events = Vec::new();
        session::apply(&mut session, Command::Tick, &mut events);
        assert_eq!(events.first(), Some(&Event::TimeAdvanced { tick }));
        assert_eq!(query::tick(&session), tick);

        let direction = directions[(tick % 4) as usize];
        session::apply(&mut session, Command::MovePlayer { direction }, &mut events);

        assert_eq!(
            query::visible_enemies(&session),
            brute_force_visible(&session).as_slice()
        );
        let world_config = query::config(&session).world;
        assert!(world_config.contains(query::player(&session)));
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed: u64| {
        let mut session =
            Session::new(small_config(30), ChaCha8Rng::seed_from_u64(seed)).expect("valid config");
        let mut events = Vec::new();
        for _ in 0..20 {
            session::apply(&mut session, Command::Tick, &mut events);
        }
        (query::population(&session).positions().to_vec(), events)
    };

    assert_eq!(run(77), run(77));
}
