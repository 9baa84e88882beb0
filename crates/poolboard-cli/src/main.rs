mod display;
mod session;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use poolboard_core::{Board, BoardConfig};
use poolboard_store::SnapshotFile;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poolboard", version, about = "Claim squares on a prediction pool board")]
struct Cli {
    /// JSON board config (catalog, unit price, duplicate policy).
    #[arg(long, global = true, env = "POOLBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session reading commands from stdin.
    Board {
        /// Load claims from and save them to this JSON file.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print the board, entries, and pool total once.
    Show {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print the catalog.
    Catalog,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("poolboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("poolboard v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };

    match cli.command.unwrap_or(Command::Board { snapshot: None }) {
        Command::Board { snapshot } => {
            let snapshot = snapshot.map(SnapshotFile::new);
            let mut board = open_board(config, snapshot.as_ref())?;
            let stdin = std::io::stdin();
            session::run(&mut board, snapshot.as_ref(), stdin.lock(), std::io::stdout())?;
        }
        Command::Show { snapshot } => {
            let snapshot = snapshot.map(SnapshotFile::new);
            let board = open_board(config, snapshot.as_ref())?;
            println!("{}", display::render_table(&board));
            print!("{}", display::render_entries(&board));
        }
        Command::Catalog => {
            let board = Board::new(config).context("invalid board config")?;
            print!("{}", display::render_catalog(&board));
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<BoardConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = BoardConfig::from_json_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = config.catalog.len(), "loaded config");
    Ok(config)
}

fn open_board(config: BoardConfig, snapshot: Option<&SnapshotFile>) -> anyhow::Result<Board> {
    let claims = match snapshot {
        Some(snap) => snap
            .load()
            .with_context(|| format!("loading snapshot {}", snap.path().display()))?,
        None => Vec::new(),
    };
    Board::with_claims(config, claims).context("invalid board config or snapshot")
}
