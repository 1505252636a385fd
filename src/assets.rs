use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::GameError;

/// Symbolic key → file name under the data directory.
const DEFAULT_ASSETS: &[(&str, &str)] = &[
    ("soundtrack", "8bp051-06-random-happy_ending_after_all.mp3"),
    ("music-grid", "music-grid.wav"),
    ("music-grid.BJ", "music-grid.BJ.wav"),
    ("goofy_ahh", "goofy_ahh.mp3"),
    ("soundfx", "meow.mp3"),
    ("sun1", "sun1.bmp"),
    ("cat", "cat.png"),
    ("dragon", "Dragon.png"),
    ("fire", "Fueguito_magia_copia.png"),
];

/// Resolves asset keys to paths.  Built once at startup and passed to
/// whatever needs it.
#[derive(Clone, Debug)]
pub struct AssetRegistry {
    data_dir: PathBuf,
    files: HashMap<String, String>,
}

impl AssetRegistry {
    /// Registry holding the stock asset table.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let files = DEFAULT_ASSETS
            .iter()
            .map(|(key, file)| (key.to_string(), file.to_string()))
            .collect();
        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    /// Registry with no entries; fill it with `insert`.
    pub fn empty(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            files: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, file: impl Into<String>) {
        self.files.insert(key.into(), file.into());
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn get(&self, key: &str) -> Result<PathBuf, GameError> {
        self.files
            .get(key)
            .map(|file| self.data_dir.join(file))
            .ok_or_else(|| GameError::MissingAsset(key.to_string()))
    }
}
