use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use broadside::{
    Coord, GameConfig, GameEngine, GameError, GameEvent, MatchOutcome, Orientation, ShipId,
    ShipType, ShotResult, Side, TileState, TurnState, Visibility,
};
use rand::{rngs::SmallRng, SeedableRng};

fn small_config() -> GameConfig {
    GameConfig {
        width: 5,
        height: 5,
        ..GameConfig::default()
    }
}

/// 5x5 match with one length-3 enemy ship on row 0 and one player ship.
fn scripted_engine() -> GameEngine {
    let mut engine = GameEngine::new(small_config()).unwrap();
    let cruiser = ShipType::new("Cruiser", 3);
    engine
        .place_ship(
            Side::Enemy,
            Coord::new(0, 0),
            &cruiser,
            Orientation::Horizontal,
            Visibility::Hidden,
        )
        .unwrap();
    engine
        .place_ship(
            Side::Player,
            Coord::new(4, 0),
            &ShipType::new("Destroyer", 2),
            Orientation::Vertical,
            Visibility::Revealed,
        )
        .unwrap();
    engine.start_turn_phase().unwrap();
    engine
}

#[test]
fn test_scripted_match_player_wins() {
    let mut engine = scripted_engine();
    let sunk = Arc::new(AtomicUsize::new(0));
    let s = Arc::clone(&sunk);
    engine.events().subscribe(GameEvent::ShipSunk, move || {
        s.fetch_add(1, Ordering::SeqCst);
    });
    let results = Arc::new(Mutex::new(Vec::new()));
    let r = Arc::clone(&results);
    engine.on_result(move |outcome| r.lock().unwrap().push(outcome));

    assert_eq!(engine.turn(), TurnState::PlayerTurn);
    assert_eq!(engine.remaining(Side::Enemy), 1);

    assert_eq!(engine.fire(Side::Player, Coord::new(0, 0)), Ok(ShotResult::Hit));
    assert_eq!(engine.fire(Side::Player, Coord::new(1, 0)), Ok(ShotResult::Hit));
    assert_eq!(sunk.load(Ordering::SeqCst), 0);
    assert_eq!(engine.turn(), TurnState::PlayerTurn);

    assert_eq!(engine.fire(Side::Player, Coord::new(2, 0)), Ok(ShotResult::Sink(ShipId(0))));
    assert_eq!(sunk.load(Ordering::SeqCst), 1);
    assert_eq!(engine.remaining(Side::Enemy), 0);
    assert_eq!(engine.outcome(), Some(MatchOutcome::PlayerWon));
    assert_eq!(engine.turn(), TurnState::Idle);
    assert_eq!(*results.lock().unwrap(), vec![MatchOutcome::PlayerWon]);

    assert_eq!(
        engine.fire(Side::Player, Coord::new(3, 3)),
        Err(GameError::OutOfTurn(Side::Player))
    );
    assert_eq!(results.lock().unwrap().len(), 1);
}

#[test]
fn test_enemy_can_win() {
    let mut engine = scripted_engine();
    let over = Arc::new(AtomicUsize::new(0));
    let o = Arc::clone(&over);
    engine.events().subscribe(GameEvent::MatchOver, move || {
        o.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(engine.fire(Side::Player, Coord::new(4, 4)), Ok(ShotResult::Miss));
    assert_eq!(engine.turn(), TurnState::EnemyTurn);
    assert_eq!(engine.fire(Side::Enemy, Coord::new(4, 0)), Ok(ShotResult::Hit));
    assert_eq!(engine.fire(Side::Enemy, Coord::new(4, 1)), Ok(ShotResult::Sink(ShipId(0))));
    assert_eq!(engine.outcome(), Some(MatchOutcome::EnemyWon));
    assert_eq!(over.load(Ordering::SeqCst), 1);
}

#[test]
fn test_out_of_turn_shot_is_rejected() {
    let mut engine = scripted_engine();
    let before = engine.grid(Side::Player).clone();
    assert_eq!(
        engine.fire(Side::Enemy, Coord::new(4, 0)),
        Err(GameError::OutOfTurn(Side::Enemy))
    );
    assert_eq!(engine.grid(Side::Player), &before);
    assert_eq!(engine.turn(), TurnState::PlayerTurn);
}

#[test]
fn test_repeat_shot_keeps_turn() {
    let mut engine = scripted_engine();
    assert_eq!(engine.fire(Side::Player, Coord::new(0, 0)), Ok(ShotResult::Hit));
    assert_eq!(engine.fire(Side::Player, Coord::new(0, 0)), Ok(ShotResult::Repeat));
    assert_eq!(engine.turn(), TurnState::PlayerTurn);

    engine.fire(Side::Player, Coord::new(3, 3)).unwrap();
    assert_eq!(engine.turn(), TurnState::EnemyTurn);
    engine.fire(Side::Enemy, Coord::new(0, 4)).unwrap();
    assert_eq!(engine.turn(), TurnState::PlayerTurn);
    assert_eq!(engine.fire(Side::Player, Coord::new(3, 3)), Ok(ShotResult::Repeat));
    assert_eq!(engine.turn(), TurnState::PlayerTurn);
}

#[test]
fn test_off_grid_shot_is_rejected() {
    let mut engine = scripted_engine();
    assert_eq!(
        engine.fire(Side::Player, Coord::new(-1, 2)),
        Err(GameError::OutOfBounds(Coord::new(-1, 2)))
    );
    assert_eq!(engine.turn(), TurnState::PlayerTurn);
}

#[test]
fn test_setup_rules() {
    let mut engine = GameEngine::new(small_config()).unwrap();
    assert_eq!(engine.turn(), TurnState::Setup);
    assert_eq!(
        engine.fire(Side::Player, Coord::new(0, 0)),
        Err(GameError::OutOfTurn(Side::Player))
    );
    assert_eq!(engine.start_turn_phase(), Err(GameError::EmptyFleet(Side::Player)));

    let mut rng = SmallRng::seed_from_u64(3);
    engine.place_player_fleet_randomly(&mut rng).unwrap();
    assert_eq!(engine.start_turn_phase(), Err(GameError::EmptyFleet(Side::Enemy)));
    engine.place_enemy_fleet(&mut rng).unwrap();
    assert_eq!(engine.start_turn_phase(), Ok(()));

    assert_eq!(engine.start_turn_phase(), Err(GameError::NotInSetup));
    assert!(engine.place_enemy_fleet(&mut rng).is_err());
    assert_eq!(
        engine.place_ship(
            Side::Player,
            Coord::new(0, 0),
            &ShipType::new("Late", 1),
            Orientation::Horizontal,
            Visibility::Revealed,
        ),
        Err(GameError::NotInSetup)
    );
}

#[test]
fn test_enemy_fleet_is_hidden_player_fleet_revealed() {
    let mut engine = GameEngine::new(GameConfig::default()).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    let enemy = engine.place_enemy_fleet(&mut rng).unwrap();
    let player = engine.place_player_fleet_randomly(&mut rng).unwrap();
    assert!(enemy.is_complete());
    assert!(player.is_complete());
    assert_eq!(engine.remaining(Side::Enemy), 5);
    assert_eq!(engine.remaining(Side::Player), 5);

    assert!(engine
        .grid(Side::Enemy)
        .tiles()
        .filter(|t| t.is_occupied())
        .all(|t| t.state() == TileState::PlacedHidden));
    assert!(engine
        .grid(Side::Player)
        .tiles()
        .filter(|t| t.is_occupied())
        .all(|t| t.state() == TileState::Placed));
}

#[test]
fn test_pass_turn() {
    let mut engine = scripted_engine();
    assert_eq!(engine.pass_turn(Side::Enemy), Err(GameError::OutOfTurn(Side::Enemy)));
    engine.pass_turn(Side::Player).unwrap();
    assert_eq!(engine.turn(), TurnState::EnemyTurn);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig {
        width: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameEngine::new(config),
        Err(GameError::InvalidDimensions { width: 0, .. })
    ));
}

#[test]
fn test_enemy_fleet_can_be_shown() {
    let config = GameConfig {
        show_enemy_ships: true,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::new(config).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    engine.place_enemy_fleet(&mut rng).unwrap();
    let occupied: Vec<_> = engine
        .grid(Side::Enemy)
        .tiles()
        .filter(|t| t.is_occupied())
        .collect();
    assert_eq!(occupied.len(), 17);
    assert!(occupied.iter().all(|t| t.state() == TileState::Placed));
}
