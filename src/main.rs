use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use war_game::{
    console::Console,
    game::Game,
    game_config::{GameConfig, Variant},
};

/// War - territorial conquest in the terminal
#[derive(Parser, Debug)]
#[command(name = "war")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game config (default: the built-in five territories)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (default: current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the config's game variant
    #[arg(short, long)]
    variant: Option<Variant>,

    /// Register the territories interactively instead of loading them
    #[arg(long)]
    setup: bool,

    /// Print the final game state as JSON when the game ends
    #[arg(long)]
    state_json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args)?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    if args.setup {
        match console.setup_config(config.variant)? {
            Some(registered) => config = registered,
            None => return Ok(()),
        }
    }

    let mut game = Game::new(&config, args.seed)?;
    console.run(&mut game)?;

    if args.state_json {
        let state = game.get_game_state();
        let mut out = io::stdout();
        writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(io::stderr(), "Error: {e}");
            ExitCode::FAILURE
        }
    }
}
