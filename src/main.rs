use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use env_logger::Env;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use nexus_2048::display::{self, Style};
use nexus_2048::game::Game;
use nexus_2048::input::Command;
use nexus_2048::tiles::TileSet;

/// Play 2048: GPU Edition in the terminal
#[derive(Parser, Debug)]
#[command(name = "nexus-2048")]
#[command(
    about = "Merge SSDs into RAM, CPUs, GPUs and finally the Nexus Cube",
    long_about = None
)]
struct Args {
    /// Seed for tile placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file describing the tile set (defaults to the built-in GPU Edition)
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    plain: bool,
}

/// Keeps the terminal in raw mode until dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Redraw the whole screen. Raw mode needs explicit carriage returns.
fn draw(out: &mut impl Write, screen: &str, note: Option<&str>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in screen.lines().chain(note.into_iter().flat_map(str::lines)) {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

fn main() -> anyhow::Result<()> {
    // Log lines would tear the raw-mode screen, so only warnings show by default.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let tiles = match &args.tiles {
        Some(path) => TileSet::from_toml(path)
            .with_context(|| format!("loading tile set from {}", path.display()))?,
        None => TileSet::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let style = if args.plain { Style::Plain } else { Style::Ansi };
    info!(
        "tile set {:?}: {} tiles, winning rank {}",
        tiles.name(),
        tiles.len(),
        tiles.winning_rank()
    );

    let mut game = Game::new(tiles.winning_rank(), rng);
    let _raw = RawModeGuard::enable().context("enabling raw mode")?;
    let mut stdout = io::stdout().lock();
    let mut note: Option<String> = None;

    loop {
        let screen = display::render_screen(game.board(), game.status(), &tiles, style);
        draw(&mut stdout, &screen, note.take().as_deref())?;

        let Event::Key(key) = event::read().context("reading key event")? else {
            continue;
        };
        let Some(command) = Command::from_key_event(&key) else {
            continue;
        };
        match command {
            Command::Quit => {
                info!("quit after {} moves", game.moves_made());
                return Ok(());
            }
            Command::Help => note = Some(display::help_text().to_string()),
            Command::Restart => game.restart(),
            Command::Dismiss => {
                if !game.dismiss_win() {
                    note = Some("nothing to dismiss".to_string());
                }
            }
            Command::Move(direction) => match game.play(direction) {
                Ok(turn) if !turn.moved => debug!("{direction}: nothing moved"),
                Ok(_) => {}
                Err(e) => note = Some(e.to_string()),
            },
        }
    }
}
