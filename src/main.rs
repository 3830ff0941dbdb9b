#[cfg(not(feature = "runtime"))]
fn main() {}

#[cfg(feature = "runtime")]
use std::path::PathBuf;

#[cfg(feature = "runtime")]
use broadside::{
    announce, init_logging, play_session, print_player_view, shared_stdin, AiShooter,
    GameConfig, GameEngine, MatchRunner, ThinkingDelay, MAX_CLI_WIDTH,
};
#[cfg(feature = "runtime")]
use clap::Parser;
#[cfg(feature = "runtime")]
use rand::rngs::SmallRng;
#[cfg(feature = "runtime")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "runtime")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "runtime")]
struct MatchArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON file with grid size, fleets and thinking delay")]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long, help = "Reveal the enemy fleet (debugging aid)")]
    show_enemy: bool,
}

#[derive(clap::Subcommand)]
#[cfg(feature = "runtime")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[command(flatten)]
        args: MatchArgs,
        /// Skip manual placement and scatter your ships randomly.
        #[arg(long)]
        random_placement: bool,
    },
    /// Watch the computer play against itself.
    Watch {
        #[command(flatten)]
        args: MatchArgs,
    },
}

#[cfg(feature = "runtime")]
fn load_config(args: &MatchArgs) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.show_enemy {
        config.show_enemy_ships = true;
    }
    if config.width > MAX_CLI_WIDTH {
        return Err(anyhow::anyhow!(
            "grid width {} exceeds the terminal limit of {}",
            config.width,
            MAX_CLI_WIDTH
        ));
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "runtime")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "runtime")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            args,
            random_placement,
        } => {
            let config = load_config(&args)?;
            let mut rng = make_rng(config.seed);
            let outcomes =
                play_session(&config, &mut rng, shared_stdin(), random_placement).await?;
            let wins = outcomes.iter().filter(|o| o.player_won()).count();
            println!("You won {} of {} match(es).", wins, outcomes.len());
        }
        Commands::Watch { args } => {
            let config = load_config(&args)?;
            let mut rng = make_rng(config.seed);
            let delay = ThinkingDelay::from_config(&config);
            let mut engine = GameEngine::new(config)?;
            engine.on_result(announce);
            engine.place_enemy_fleet(&mut rng)?;
            engine.place_player_fleet_randomly(&mut rng)?;

            let mut runner = MatchRunner::new(
                engine,
                Box::new(AiShooter::new(delay)),
                Box::new(AiShooter::new(delay)),
            );
            runner.run(&mut rng).await?;
            print_player_view(runner.engine());
        }
    }
    Ok(())
}
