/// Audio collaborator.  Scenes ask for music and one-shot effects; what
/// actually reaches the speakers is up to the backend.

use std::fs::File;
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};

use crate::error::GameError;

/// Volume every soundtrack is started at.
pub const MUSIC_VOLUME: f32 = 0.2;
/// Fade applied when a scene ends with music still playing.
pub const MUSIC_FADE_MS: u64 = 500;

pub trait Audio {
    /// Load `track` and loop it.  Fails if the track cannot be opened.
    fn play_music(&mut self, track: &Path, volume: f32) -> Result<(), GameError>;

    fn music_busy(&self) -> bool;

    fn fade_out(&mut self, millis: u64);

    fn stop_music(&mut self);

    fn play_effect(&mut self, effect: &Path);
}

/// Terminal backend: tracks are opened to prove they exist, effects ring the
/// terminal bell.
#[derive(Debug, Default)]
pub struct TerminalAudio {
    playing: Option<PathBuf>,
}

impl TerminalAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Audio for TerminalAudio {
    fn play_music(&mut self, track: &Path, volume: f32) -> Result<(), GameError> {
        File::open(track).map_err(|source| GameError::Audio {
            path: track.to_path_buf(),
            source,
        })?;
        tracing::info!(track = %track.display(), volume, "music started");
        self.playing = Some(track.to_path_buf());
        Ok(())
    }

    fn music_busy(&self) -> bool {
        self.playing.is_some()
    }

    fn fade_out(&mut self, millis: u64) {
        if let Some(track) = &self.playing {
            tracing::debug!(track = %track.display(), millis, "music fading out");
        }
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.playing.take() {
            tracing::info!(track = %track.display(), "music stopped");
        }
    }

    fn play_effect(&mut self, effect: &Path) {
        tracing::debug!(effect = %effect.display(), "sound effect");
        let mut out = stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

/// Backend that plays nothing; used when sound is disabled.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn play_music(&mut self, _track: &Path, _volume: f32) -> Result<(), GameError> {
        Ok(())
    }

    fn music_busy(&self) -> bool {
        false
    }

    fn fade_out(&mut self, _millis: u64) {}

    fn stop_music(&mut self) {}

    fn play_effect(&mut self, _effect: &Path) {}
}
