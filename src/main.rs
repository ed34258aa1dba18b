use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use energy_snake::config::{
    self, DEFAULT_FOOD_CAPACITY, DEFAULT_TICK_INTERVAL_MS, GLYPHS_ASCII, GLYPHS_UNICODE,
    GameConfig, THEME_CLASSIC,
};
use energy_snake::input;
use energy_snake::renderer;
use energy_snake::session::Session;
use energy_snake::terminal_runtime::{TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(name = "energy-snake", about = "Terminal snake with an energy economy")]
struct Cli {
    /// Draw with plain ASCII glyphs instead of block characters.
    #[arg(long)]
    ascii: bool,

    /// Seed the simulation RNG for reproducible block placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the intro animation and start playing immediately.
    #[arg(long = "no-intro")]
    no_intro: bool,

    /// Initial delay between simulation ticks, in milliseconds.
    #[arg(long = "delay-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    delay_ms: u64,

    /// Maximum number of concurrent energy blocks.
    #[arg(long = "energy-blocks", default_value_t = DEFAULT_FOOD_CAPACITY)]
    energy_blocks: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (cols, rows) = match terminal::size() {
        Ok(size) => size,
        Err(error) => {
            eprintln!("energy-snake: cannot query terminal size: {error}");
            return ExitCode::FAILURE;
        }
    };

    let game_config = GameConfig {
        board: config::board_for_terminal(cols, rows),
        tick_interval_ms: cli.delay_ms,
        food_capacity: cli.energy_blocks,
        no_intro: cli.no_intro,
        seed: cli.seed,
    };

    // Bounds are checked before the terminal is touched, so a bad flag or
    // a tiny terminal fails with a readable message instead of a garbled
    // alternate screen.
    if let Err(error) = game_config.validate() {
        eprintln!("energy-snake: {error}");
        return ExitCode::FAILURE;
    }

    match run(&game_config, cli.ascii) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("energy-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(game_config: &GameConfig, ascii: bool) -> io::Result<()> {
    install_panic_hook();
    let mut terminal_session = TerminalSession::enter()?;
    let events = input::spawn_input_source();

    let glyphs = if ascii { &GLYPHS_ASCII } else { &GLYPHS_UNICODE };
    let theme = &THEME_CLASSIC;

    let mut session = Session::new(game_config, Instant::now());
    let mut last_tick = Instant::now();
    info!(
        width = game_config.board.width(),
        height = game_config.board.height(),
        food_capacity = game_config.food_capacity,
        "session started"
    );

    // The tick loop owns all game state. Input arrives as events drained
    // from the channel; a quit takes effect here, at a tick boundary.
    loop {
        let now = Instant::now();
        session.handle_events(events.try_iter(), now);
        if session.should_quit() {
            break;
        }

        if now.duration_since(last_tick) >= session.tick_interval() {
            session.tick(now);
            last_tick = now;
        }

        let snapshot = session.snapshot(now);
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, theme, glyphs))?;

        thread::sleep(Duration::from_millis(config::FRAME_INTERVAL_MS));
    }

    info!("session ended");
    Ok(())
}
