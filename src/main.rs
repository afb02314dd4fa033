use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use tilestage::config::{ConfigError, StageConfig};
use tilestage::entity::EntityIdGenerator;
use tilestage::level::Level;
use tilestage::level_data::{EntityRegistry, LevelData, LevelError};
use tilestage::stage::Stage;
use tilestage::tile::Tileset;
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tileset {path}: {source}")]
    Tileset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tilestage", about = "Tile stage level tools")]
struct Cli {
    /// Stage config JSON. Without it the stage is read from `TILESTAGE_*` env vars.
    #[arg(long, env = "TILESTAGE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a level against a tileset and the stage, reporting the first problem.
    Check(CheckCommand),
    /// Print the effective stage config as JSON.
    Config,
}

#[derive(Args, Debug)]
struct CheckCommand {
    /// Tileset JSON file.
    #[arg(long)]
    tileset: PathBuf,

    /// Print the map, one character per tile.
    #[arg(long)]
    ascii: bool,

    /// Assign random ids to entities that have none.
    #[arg(long)]
    random_ids: bool,

    /// Level JSON file.
    level: PathBuf,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Check(args) => run_check(config, &args),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

fn load_config(path: Option<&Path>) -> Result<StageConfig, CliError> {
    match path {
        Some(path) => Ok(StageConfig::from_json(&read(path)?)?),
        None => Ok(StageConfig::from_env()?),
    }
}

fn run_check(config: StageConfig, args: &CheckCommand) -> Result<(), CliError> {
    let stage = Stage::shared(config)?;
    let tileset = Tileset::from_json(&read(&args.tileset)?)
        .map_err(|source| CliError::Tileset { path: args.tileset.clone(), source })?;
    let tileset = Rc::new(tileset);

    let registry = EntityRegistry::permissive();
    let mut ids = if args.random_ids { EntityIdGenerator::random() } else { EntityIdGenerator::default() };
    let data = LevelData::from_json(&read(&args.level)?, tileset, &stage, &registry, &mut ids)?;
    let level = Level::new(Rc::new(data));

    info!(
        level = level.name(),
        width = level.width(),
        height = level.height(),
        entities = level.entities().len(),
        tileset = level.tileset().name(),
        tiles = level.tileset().len(),
        "level ok"
    );
    println!(
        "{}: {}x{}, {} entities, tileset '{}' ({} tiles)",
        level.name(),
        level.width(),
        level.height(),
        level.entities().len(),
        level.tileset().name(),
        level.tileset().len()
    );
    if args.ascii {
        print!("{}", level.ascii_map());
    }
    Ok(())
}
