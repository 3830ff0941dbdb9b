#![cfg(feature = "runtime")]
//! Terminal front end: grid rendering, coordinate parsing and human input.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::SmallRng;

use crate::common::{Coord, Orientation, ShotResult, Side};
use crate::config::GameConfig;
use crate::game::GameEngine;
use crate::grid::Grid;
use crate::placement::PlacementController;
use crate::player::{AiShooter, Shooter, ThinkingDelay};
use crate::runner::MatchRunner;
use crate::tile::TileState;
use crate::win::MatchOutcome;

/// Widest grid the letter/number notation can address.
pub const MAX_CLI_WIDTH: usize = 26;

/// Line input shared by placement, the human shooter and the replay prompt,
/// so no buffered line is lost between them.
pub type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

pub fn shared_input<R: BufRead + Send + 'static>(reader: R) -> SharedInput {
    Arc::new(Mutex::new(Box::new(reader)))
}

pub fn shared_stdin() -> SharedInput {
    shared_input(BufReader::new(io::stdin()))
}

fn lock_input(input: &SharedInput) -> MutexGuard<'_, Box<dyn BufRead + Send>> {
    input.lock().unwrap_or_else(|e| e.into_inner())
}

/// Column letter for `x`, or `None` past `Z`.
fn column_letter(x: i32) -> Option<char> {
    u8::try_from(x)
        .ok()
        .filter(|&x| (x as usize) < MAX_CLI_WIDTH)
        .map(|x| (b'A' + x) as char)
}

/// Format a coordinate as `A1` (column letter, 1-based row). Coordinates the
/// notation cannot address fall back to `(x, y)`.
pub fn coord_to_string(c: Coord) -> String {
    match (column_letter(c.x), c.y.checked_add(1)) {
        (Some(col), Some(row)) if row >= 1 => format!("{}{}", col, row),
        _ => c.to_string(),
    }
}

/// Parse `A1`-style notation. Column letters are case-insensitive.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let mut chars = input.trim().chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let row: i32 = chars.as_str().parse().ok()?;
    if row < 1 {
        return None;
    }
    Some(Coord::new((col_ch as u8 - b'A') as i32, row - 1))
}

fn glyph(state: TileState, reveal: bool) -> char {
    match state {
        TileState::Empty => '.',
        TileState::ValidPreview => '+',
        TileState::InvalidPreview => '!',
        TileState::Placed => 'S',
        TileState::PlacedHidden if reveal => 'S',
        TileState::PlacedHidden => '.',
        TileState::Hit => 'X',
        TileState::Miss => 'o',
        TileState::Sunk => '#',
    }
}

/// Print a grid. Fogged ships are shown only when `reveal` is set.
pub fn print_grid(grid: &Grid, reveal: bool) {
    let width = grid.width().min(MAX_CLI_WIDTH);
    if width < grid.width() {
        println!("(showing the first {} of {} columns)", width, grid.width());
    }
    print!("   ");
    for x in 0..width as i32 {
        print!(" {}", column_letter(x).unwrap_or('?'));
    }
    println!();
    for y in 0..grid.height() as i32 {
        print!("{:2} ", y + 1);
        for x in 0..width as i32 {
            let state = grid.tile(x, y).map(|t| t.state()).unwrap_or_default();
            print!(" {}", glyph(state, reveal));
        }
        println!();
    }
}

/// Display the enemy grid (top, fogged) and the player's grid (bottom).
pub fn print_player_view(engine: &GameEngine) {
    println!(
        "Enemy waters ({} ships left):",
        engine.remaining(Side::Enemy)
    );
    print_grid(engine.grid(Side::Enemy), false);
    println!("\nYour fleet ({} ships left):", engine.remaining(Side::Player));
    print_grid(engine.grid(Side::Player), true);
}

fn read_line(input: &mut dyn BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow::anyhow!("input closed"));
    }
    Ok(line.trim().to_string())
}

/// Place the player's ships from text commands such as `A5 H` or `C2 v`.
/// An empty line places the pending ship randomly.
pub fn place_ships_interactively(
    engine: &mut GameEngine,
    rng: &mut SmallRng,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let mut placer = PlacementController::for_engine(engine);
    println!("Place your ships (e.g. A5 H). Press enter for random placement.");
    while let Some(ship) = placer.current().cloned() {
        print_grid(engine.grid(Side::Player), true);
        print!("Place {} (length {}): ", ship.name(), ship.length());
        io::stdout().flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            if placer.auto_place_current(engine, rng)?.is_none() {
                return Err(anyhow::anyhow!("no room left for {}", ship.name()));
            }
            continue;
        }
        let mut parts = line.split_whitespace();
        let coord = parts.next().and_then(parse_coord);
        let orientation = match parts.next().and_then(|p| p.chars().next()) {
            Some('v') | Some('V') => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        match coord {
            Some(at) => {
                if let Err(e) = placer.place_at(engine, at, orientation) {
                    println!("Error: {}", e);
                }
            }
            None => println!("Invalid input"),
        }
    }
    Ok(())
}

/// Human shooter reading targets from a line-based input.
pub struct CliShooter {
    input: SharedInput,
}

impl CliShooter {
    /// Read targets from standard input.
    pub fn new() -> Self {
        Self::shared(shared_stdin())
    }

    pub fn with_input(input: Box<dyn BufRead + Send>) -> Self {
        Self::shared(Arc::new(Mutex::new(input)))
    }

    /// Read targets from an input that other prompts also use.
    pub fn shared(input: SharedInput) -> Self {
        Self { input }
    }

    fn next_line(&self) -> anyhow::Result<String> {
        read_line(&mut *lock_input(&self.input))
    }
}

impl Default for CliShooter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Shooter for CliShooter {
    async fn select_target(
        &mut self,
        target: &Grid,
        _rng: &mut SmallRng,
    ) -> anyhow::Result<Option<Coord>> {
        println!();
        print_grid(target, false);
        loop {
            print!("Enter target: ");
            io::stdout().flush()?;
            let line = self.next_line()?;
            match parse_coord(&line) {
                Some(c) if !target.contains(c) => println!("{} is off the grid", line),
                Some(c) if target.get(c).is_some_and(|t| t.is_shot()) => {
                    println!("{} was already shot", coord_to_string(c))
                }
                Some(c) => return Ok(Some(c)),
                None => println!("Invalid coordinate"),
            }
        }
    }

    fn handle_shot_result(&mut self, coord: Coord, result: ShotResult) {
        println!("You fired at {} -> {}", coord_to_string(coord), describe(result));
    }

    fn handle_incoming_shot(&mut self, coord: Coord, result: ShotResult) {
        println!("Enemy fired at {} -> {}", coord_to_string(coord), describe(result));
    }
}

fn describe(result: ShotResult) -> &'static str {
    match result {
        ShotResult::Miss => "miss",
        ShotResult::Hit => "hit",
        ShotResult::Sink(_) => "hit and sunk!",
        ShotResult::Repeat => "already shot",
    }
}

/// Ask whether to start another match. Closed input counts as "no".
pub fn ask_play_again(input: &mut dyn BufRead) -> anyhow::Result<bool> {
    print!("Play again? [y/N]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// One human-vs-computer match on a fresh engine built from `config`.
pub async fn play_human_match(
    config: &GameConfig,
    rng: &mut SmallRng,
    input: &SharedInput,
    random_placement: bool,
) -> anyhow::Result<MatchOutcome> {
    let mut engine = GameEngine::new(config.clone())?;
    engine.on_result(announce);

    let report = engine.place_enemy_fleet(rng)?;
    if !report.is_complete() {
        println!(
            "Warning: {} enemy ship(s) did not fit on the grid",
            report.unplaced.len()
        );
    }
    if random_placement {
        engine.place_player_fleet_randomly(rng)?;
    } else {
        place_ships_interactively(&mut engine, rng, &mut *lock_input(input))?;
    }
    engine.start_turn_phase()?;

    let mut runner = MatchRunner::new(
        engine,
        Box::new(CliShooter::shared(Arc::clone(input))),
        Box::new(AiShooter::new(ThinkingDelay::from_config(config))),
    );
    let outcome = runner.run(rng).await?;
    print_player_view(runner.engine());
    Ok(outcome)
}

/// Play matches until the player declines a rematch. Every match starts
/// from a fresh engine.
pub async fn play_session(
    config: &GameConfig,
    rng: &mut SmallRng,
    input: SharedInput,
    random_placement: bool,
) -> anyhow::Result<Vec<MatchOutcome>> {
    let mut outcomes = Vec::new();
    loop {
        outcomes.push(play_human_match(config, rng, &input, random_placement).await?);
        if !ask_play_again(&mut *lock_input(&input))? {
            return Ok(outcomes);
        }
        log::info!("starting match {}", outcomes.len() + 1);
    }
}

/// Print the result banner.
pub fn announce(outcome: MatchOutcome) {
    match outcome {
        MatchOutcome::PlayerWon => println!("YOU WIN!"),
        MatchOutcome::EnemyWon => println!("YOU LOSE"),
        MatchOutcome::Draw => println!("DRAW"),
    }
}
