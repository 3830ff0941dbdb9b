use broadside::{
    AiShooter, GameConfig, GameEngine, MatchOutcome, MatchRunner, Side, ThinkingDelay,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <placement-seed> <play-seed>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut placement_rng = SmallRng::seed_from_u64(seed1);
    let mut play_rng = SmallRng::seed_from_u64(seed2);

    let mut engine = GameEngine::new(GameConfig::default())?;
    let enemy_report = engine.place_enemy_fleet(&mut placement_rng)?;
    let player_report = engine.place_player_fleet_randomly(&mut placement_rng)?;

    let mut runner = MatchRunner::new(
        engine,
        Box::new(AiShooter::new(ThinkingDelay::none())),
        Box::new(AiShooter::new(ThinkingDelay::none())),
    );
    let outcome = runner.run(&mut play_rng).await?;

    let winner = match outcome {
        MatchOutcome::PlayerWon => Some("player"),
        MatchOutcome::EnemyWon => Some("enemy"),
        MatchOutcome::Draw => None,
    };

    let result = json!({
        "player": {
            "shots": runner.shots_fired(Side::Player),
            "ships_left": runner.engine().remaining(Side::Player),
            "unplaced": player_report.unplaced.len(),
        },
        "enemy": {
            "shots": runner.shots_fired(Side::Enemy),
            "ships_left": runner.engine().remaining(Side::Enemy),
            "unplaced": enemy_report.unplaced.len(),
        },
        "outcome": outcome,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
