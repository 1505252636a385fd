use std::path::PathBuf;

use glam::Vec2;

pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 800.0;
pub const DEFAULT_TITLE: &str = "Space Invaders";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    Invaders,
    Snake,
}

/// Settings fixed at process start.  Built by `main` from the command line
/// and handed down; nothing reads global state.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub world: Vec2,
    pub title: String,
    pub game: GameKind,
    pub data_dir: PathBuf,
    /// Start soundtracks and play effects from the data directory.
    pub music: bool,
    /// Seed for scene RNGs; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
            title: DEFAULT_TITLE.to_string(),
            game: GameKind::Invaders,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            music: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn width(&self) -> f32 {
        self.world.x
    }

    pub fn height(&self) -> f32 {
        self.world.y
    }
}
