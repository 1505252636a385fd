use std::io::{stdout, BufWriter, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

use videogame::assets::AssetRegistry;
use videogame::audio::{Audio, SilentAudio, TerminalAudio};
use videogame::config::{GameConfig, GameKind, DEFAULT_DATA_DIR};
use videogame::display::{display_info, TerminalScreen};
use videogame::error::GameError;
use videogame::game::{scenes_for, RunSummary, SystemClock, VideoGame};
use videogame::input::TerminalEvents;
use videogame::log_init;

#[derive(Parser, Debug)]
#[command(name = "videogame")]
#[command(about = "Terminal arcade games built on a small scene engine")]
struct Cli {
    /// Which game to play
    #[arg(long, value_enum, default_value_t = CliGame::Invaders)]
    game: CliGame,
    /// Directory holding music and sound effects
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Play soundtracks and effects from the data directory
    #[arg(long)]
    music: bool,
    /// Where to write the log (the terminal is busy with the game)
    #[arg(long, default_value = "videogame.log")]
    log_file: PathBuf,
    /// Seed for alien fire and food placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliGame {
    Invaders,
    Snake,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        let (game, title) = match self.game {
            CliGame::Invaders => (GameKind::Invaders, "Space Invaders"),
            CliGame::Snake => (GameKind::Snake, "Snake"),
        };
        GameConfig {
            title: title.to_string(),
            game,
            data_dir: self.data_dir,
            music: self.music,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log_init::init(&cli.log_file)?;

    let config = cli.into_config();
    let assets = AssetRegistry::new(&config.data_dir);
    tracing::info!(game = ?config.game, data_dir = %assets.data_dir().display(), "starting");
    display_info();

    let mut out = stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&config, &assets, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(summary) => {
            tracing::info!(
                scenes = summary.scenes_played,
                frames = summary.frames,
                "good bye"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "game aborted");
            Err(err).context("game aborted")
        }
    }
}

fn run(
    config: &GameConfig,
    assets: &AssetRegistry,
    keyboard_enhanced: bool,
) -> Result<RunSummary, GameError> {
    let scenes = scenes_for(config, assets)?;
    let (cols, rows) = terminal::size()?;
    let screen = TerminalScreen::new(BufWriter::new(stdout()), config.world, cols, rows)
        .following_terminal_size();
    let events = TerminalEvents::spawn(keyboard_enhanced);

    if config.music {
        play(screen, events, TerminalAudio::new(), scenes)
    } else {
        play(screen, events, SilentAudio, scenes)
    }
}

fn play<A: Audio>(
    screen: TerminalScreen<BufWriter<Stdout>>,
    events: TerminalEvents,
    audio: A,
    scenes: Vec<Box<dyn videogame::scene::Scene>>,
) -> Result<RunSummary, GameError> {
    let mut game = VideoGame::new(screen, events, audio, SystemClock::new());
    game.build_scene_graph(scenes)?;
    game.run()
}
