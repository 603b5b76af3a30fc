use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use level_snake::config::{GameConfig, default_log_path};
use level_snake::error::GameError;
use level_snake::game::ApplicationState;
use level_snake::input::{GameInput, InputHandler, InputSource};
use level_snake::level::Level;
use level_snake::renderer::{self, Scene};
use level_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{LevelFilter, info, warn};
use simplelog::WriteLogger;

/// Longest wait for input before the frame is redrawn.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file (defaults to the per-user config, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Start this level right away instead of showing the guide.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    level: Option<u8>,

    /// Log file (defaults to the per-user data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?;
    let start_level = cli.level.map(Level::try_from).transpose()?;

    init_logging(cli.log_file.unwrap_or_else(default_log_path), cli.log_level.into())?;
    install_panic_hook();

    let mut state = match cli.seed {
        Some(seed) => ApplicationState::new_with_seed(config, seed),
        None => ApplicationState::new(config),
    };

    info!("starting on a {}x{} grid", state.bounds().width, state.bounds().height);
    run(&mut state, start_level)?;
    info!("exiting");
    Ok(())
}

fn init_logging(path: PathBuf, level: LevelFilter) -> Result<(), GameError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(level, simplelog::Config::default(), File::create(path)?)?;
    Ok(())
}

fn run(state: &mut ApplicationState, start_level: Option<Level>) -> Result<(), GameError> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut scene = Scene::new();
    let theme = state.config().theme();

    if let Some(level) = start_level {
        report(state.start_level(level, &mut scene));
    }

    loop {
        let bounds = state.bounds();
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &scene, bounds, theme))?;

        let timeout = state
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(FRAME_INTERVAL, |due| due.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            report(state.apply_input(game_input, &mut scene));
        }

        report(state.run_due_tick(Instant::now(), &mut scene).map(|_| ()));
    }

    Ok(())
}

/// Core errors end at most the current session; the program keeps running.
fn report(result: Result<(), GameError>) {
    if let Err(error) = result {
        warn!("{error}");
    }
}
