//! Scene lifecycle.
//!
//! A scene is one self-contained game state (title card, level, end screen).
//! The driver activates it with [`Scene::start_scene`], feeds it events and
//! ticks while [`Scene::is_valid`] holds, then calls [`Scene::end_scene`].
//! Before a scene invalidates itself it names its successor through the
//! [`SceneRouter`] in its [`SceneContext`]; if it does not, the game ends.
//!
//! Shared behaviour lives in [`SceneBase`], which every concrete scene embeds
//! and delegates to explicitly.

mod alien;
mod manager;
mod outcome;
mod snake;
mod title;

pub use alien::{AlienRoutes, AlienScene};
pub use manager::{Advance, SceneId, SceneManager, SceneRouter};
pub use outcome::{OutcomeRoutes, OutcomeScene};
pub use snake::{Heading, SnakeScene, SNAKE_CELL, SNAKE_FRAME_RATE};
pub use title::TitleScene;

use std::path::PathBuf;

use crate::audio::{Audio, MUSIC_FADE_MS, MUSIC_VOLUME};
use crate::colors::Rgb;
use crate::display::Screen;
use crate::error::GameError;
use crate::input::{InputEvent, Key};

pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    NotStarted,
    Running,
    Ended,
}

/// What a scene may touch while handling events or ticking.
pub struct SceneContext<'a> {
    pub router: &'a mut SceneRouter,
    pub audio: &'a mut dyn Audio,
}

pub trait Scene {
    fn base(&self) -> &SceneBase;

    fn base_mut(&mut self) -> &mut SceneBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Call exactly once per activation.
    fn start_scene(&mut self, audio: &mut dyn Audio) -> Result<(), GameError> {
        self.base_mut().start(audio)
    }

    fn is_valid(&self) -> bool {
        self.base().is_valid()
    }

    fn process_event(
        &mut self,
        event: &InputEvent,
        _ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        self.base_mut().process_event(event);
        Ok(())
    }

    /// Advance the simulation by one tick of `delta_time` milliseconds.
    fn update_scene(
        &mut self,
        _delta_time: f32,
        _ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        Ok(())
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.base().draw(screen);
    }

    /// Flush dirty regions, for scenes that track them.
    fn render_updates(&mut self, _screen: &mut dyn Screen) {}

    fn end_scene(&mut self, audio: &mut dyn Audio) {
        self.base_mut().end(audio);
    }

    /// Ticks per second the driver should pace this scene at.
    fn frame_rate(&self) -> u32 {
        self.base().frame_rate()
    }
}

/// State and reactions common to every scene.
#[derive(Clone, Debug)]
pub struct SceneBase {
    name: String,
    background: Rgb,
    frame_rate: u32,
    soundtrack: Option<PathBuf>,
    valid: bool,
    phase: ScenePhase,
}

impl SceneBase {
    pub fn new(name: impl Into<String>, background: Rgb) -> Self {
        Self {
            name: name.into(),
            background,
            frame_rate: DEFAULT_FRAME_RATE,
            soundtrack: None,
            valid: true,
            phase: ScenePhase::NotStarted,
        }
    }

    pub fn with_soundtrack(mut self, soundtrack: Option<PathBuf>) -> Self {
        self.soundtrack = soundtrack;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn soundtrack(&self) -> Option<&PathBuf> {
        self.soundtrack.as_ref()
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Make the scene playable again after it ended.
    pub fn rearm(&mut self) {
        self.valid = true;
    }

    pub fn start(&mut self, audio: &mut dyn Audio) -> Result<(), GameError> {
        if self.phase == ScenePhase::Running {
            tracing::warn!(scene = %self.name, "scene started while already running");
        }
        if let Some(track) = &self.soundtrack {
            audio.play_music(track, MUSIC_VOLUME)?;
        }
        self.phase = ScenePhase::Running;
        tracing::info!(scene = %self.name, "scene started");
        Ok(())
    }

    pub fn end(&mut self, audio: &mut dyn Audio) {
        if self.soundtrack.is_some() && audio.music_busy() {
            audio.fade_out(MUSIC_FADE_MS);
            audio.stop_music();
        }
        self.phase = ScenePhase::Ended;
        tracing::info!(scene = %self.name, "scene ended");
    }

    /// Quit and Escape end every scene.  Returns `true` when the event
    /// invalidated the scene.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Quit => {
                tracing::info!(scene = %self.name, "quit requested");
                self.valid = false;
                true
            }
            InputEvent::KeyDown(Key::Escape) => {
                tracing::info!(scene = %self.name, "escape pressed");
                self.valid = false;
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        screen.clear(self.background);
    }
}
