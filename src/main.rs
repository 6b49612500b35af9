use anyhow::Result;
use clap::Parser;
use snake_rpg::config::CliConfig;
use snake_rpg::{Config, GameInterface, VERSION};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "snake-rpg")]
#[command(about = "A grid-based snake game with RPG-style progression")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };
    config.merge_with_cli(CliConfig {
        log_level: None,
        debug: cli.debug,
    });
    config.validate()?;

    // Log to stderr so the alternate-screen UI stays intact
    tracing_subscriber::fmt()
        .with_env_filter(format!("snake_rpg={},warn", config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting snake-rpg v{}", VERSION);

    let mut interface = GameInterface::new(config);
    if let Err(e) = interface.run() {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}
