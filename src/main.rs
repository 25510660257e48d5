//! Breakout headless runner
//!
//! Loads settings and levels, then drives the full menu -> play flow with a
//! scripted autopilot for a fixed number of frames. Each frame is rendered
//! into a draw list and expanded to a vertex batch, exactly as a windowed
//! front end would before upload.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use breakout::audio::AudioManager;
use breakout::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use breakout::renderer::{DrawList, as_bytes, build_batches, build_vertices};
use breakout::ui::Key;
use breakout::{Game, GameMode, GameSpeed, LevelEntry, Settings};

#[derive(Debug, Parser)]
#[command(name = "breakout", about = "Run the Breakout game headless with an autopilot")]
struct Args {
    /// Directory holding the level files
    #[arg(long, default_value = "levels")]
    levels_dir: PathBuf,

    /// Settings file (created when the settings change)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Index of the level to play
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Override the stored game speed (0.5x, 1x, 1.5x, 2x)
    #[arg(long, value_parser = parse_speed)]
    speed: Option<GameSpeed>,
}

fn parse_speed(s: &str) -> Result<GameSpeed, String> {
    GameSpeed::from_str(s)
        .ok_or_else(|| format!("unknown game speed {s:?}, expected 0.5x, 1x, 1.5x or 2x"))
}

/// Scripted player: walks the menus to the chosen level, then keeps the
/// paddle under the ball.
struct Autopilot {
    level: usize,
    held: Vec<Key>,
}

impl Autopilot {
    fn new(level: usize) -> Self {
        Self {
            level,
            held: Vec::new(),
        }
    }

    /// Keys that should be down this frame
    fn wanted(&self, game: &Game, frame: u64) -> Vec<Key> {
        // Menu keys are edge-triggered; alternate press and release
        let tap = |key| if frame % 2 == 0 { vec![key] } else { Vec::new() };
        match game.mode() {
            GameMode::MainMenu => tap(Key::Enter),
            GameMode::LevelSelection => {
                if game.main_menu().current_level() < self.level {
                    tap(Key::S)
                } else {
                    tap(Key::Enter)
                }
            }
            GameMode::Active => {
                let playfield = game.viewport().playfield();
                let ball = playfield.ball().center().x;
                let paddle = playfield.paddle().center().x;
                let slack = playfield.paddle().size.x / 4.0;
                let mut keys = vec![Key::Space];
                if ball < paddle - slack {
                    keys.push(Key::A);
                } else if ball > paddle + slack {
                    keys.push(Key::D);
                }
                keys
            }
            GameMode::Won | GameMode::Lost => Vec::new(),
        }
    }

    fn drive(&mut self, game: &mut Game, frame: u64) {
        let wanted = self.wanted(game, frame);
        for key in self.held.iter().filter(|k| !wanted.contains(k)) {
            game.set_key(*key, false);
        }
        for key in wanted.iter().filter(|k| !self.held.contains(k)) {
            game.set_key(*key, true);
        }
        self.held = wanted;
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });
    log::info!("Breakout (headless) starting with seed {seed}");

    let levels = LevelEntry::defaults(&args.levels_dir);
    let level = args.level.min(levels.len() - 1);
    let mut settings = Settings::load(&args.settings);
    if let Some(speed) = args.speed {
        log::info!("Game speed set to {}", speed.as_str());
        settings.game_speed = speed;
    }

    let mut game = Game::new(
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        levels,
        settings,
        AudioManager::default(),
        seed,
    )
    .with_settings_path(&args.settings);
    game.initialize();

    let mut autopilot = Autopilot::new(level);
    let mut draw = DrawList::new();
    let mut frames_run = 0;

    for frame in 0..args.frames {
        autopilot.drive(&mut game, frame);
        game.process_input(args.dt);
        game.update(args.dt);

        draw.clear();
        game.render(&mut draw);
        let vertices = build_vertices(draw.sprites());
        let batches = build_batches(draw.sprites());
        if frame % 600 == 0 {
            log::debug!(
                "frame {frame}: {:?}, {} sprites in {} batches ({} bytes), {} texts",
                game.mode(),
                draw.sprites().len(),
                batches.len(),
                as_bytes(&vertices).len(),
                draw.texts().len()
            );
        }

        frames_run = frame + 1;
        if matches!(game.mode(), GameMode::Won | GameMode::Lost) {
            break;
        }
    }

    let playfield = game.viewport().playfield();
    log::info!(
        "Stopped after {frames_run} frames in {:?}: {} lives, {} bricks left",
        game.mode(),
        playfield.lives(),
        playfield.level().bricks_alive()
    );
}
