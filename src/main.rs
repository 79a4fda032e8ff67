use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::game::{Dimensions, GameController, GameState};
use connect_four::logging::{self, LogSink};
use connect_four::script::{self, TextRenderer};
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Play these columns headlessly (e.g. "3,3,4") and print the result
    #[arg(long, allow_hyphen_values = true)]
    moves: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let (mut config, source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    config.validate().context("validating configuration")?;
    let dimensions = config.board.dimensions()?;

    match cli.moves {
        Some(moves) => {
            logging::init(&config.logging, LogSink::FileOrStderr)?;
            source.log();
            run_script(dimensions, &moves)
        }
        None => {
            logging::init(&config.logging, LogSink::FileOnly)?;
            source.log();
            let mut app = App::new(dimensions, &config.ui);
            run_tui(&mut app).context("running terminal ui")
        }
    }
}

fn run_script(dimensions: Dimensions, moves: &str) -> Result<()> {
    let moves = script::parse_moves(moves)?;
    let mut controller = GameController::new(
        GameState::with_dimensions(dimensions),
        TextRenderer::new(io::stdout().lock()),
    );

    let summary = script::play_script(&mut controller, &moves);
    let grid = controller.state().grid().clone();
    let renderer = controller.renderer_mut();
    if let Some(err) = renderer.take_error() {
        return Err(err).context("writing game output");
    }
    renderer.print_grid(&grid).context("writing board")?;

    tracing::info!(
        placed = summary.placed,
        ignored = summary.ignored,
        outcome = ?summary.outcome,
        "script finished"
    );
    Ok(())
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
