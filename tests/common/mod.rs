#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use glam::Vec2;
use videogame::audio::Audio;
use videogame::colors::Rgb;
use videogame::display::Screen;
use videogame::error::GameError;
use videogame::game::FrameClock;
use videogame::geometry::Rect;
use videogame::input::{EventSource, InputEvent};
use videogame::colors;
use videogame::scene::{Scene, SceneBase, SceneContext, SceneManager, SceneRouter};

// ── Screen ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Circle { center: Vec2, radius: f32, color: Rgb },
    Rect { rect: Rect, color: Rgb },
    Text { position: Vec2, text: String },
}

/// Records every primitive; each `present` closes one frame.
#[derive(Default)]
pub struct RecordingScreen {
    pub pending: Vec<DrawCall>,
    pub frames: Vec<Vec<DrawCall>>,
}

impl RecordingScreen {
    pub fn texts(&self) -> Vec<String> {
        self.pending
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Screen for RecordingScreen {
    fn size(&self) -> Vec2 {
        Vec2::new(800.0, 800.0)
    }

    fn clear(&mut self, color: Rgb) {
        self.pending.push(DrawCall::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.pending.push(DrawCall::Circle { center, radius, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.pending.push(DrawCall::Rect { rect, color });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, _size: u16, _color: Rgb, _bg: Rgb) {
        self.pending.push(DrawCall::Text { position, text: text.to_string() });
    }

    fn text_extent(&self, text: &str, _size: u16) -> Vec2 {
        Vec2::new(text.len() as f32 * 10.0, 20.0)
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCall {
    Play(PathBuf),
    FadeOut(u64),
    Stop,
    Effect(PathBuf),
}

#[derive(Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
    pub busy: bool,
    /// Tracks that fail to load.
    pub broken: Vec<PathBuf>,
}

impl Audio for RecordingAudio {
    fn play_music(&mut self, track: &Path, _volume: f32) -> Result<(), GameError> {
        if self.broken.iter().any(|b| b == track) {
            return Err(GameError::Audio {
                path: track.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            });
        }
        self.calls.push(AudioCall::Play(track.to_path_buf()));
        self.busy = true;
        Ok(())
    }

    fn music_busy(&self) -> bool {
        self.busy
    }

    fn fade_out(&mut self, millis: u64) {
        self.calls.push(AudioCall::FadeOut(millis));
    }

    fn stop_music(&mut self) {
        self.calls.push(AudioCall::Stop);
        self.busy = false;
    }

    fn play_effect(&mut self, effect: &Path) {
        self.calls.push(AudioCall::Effect(effect.to_path_buf()));
    }
}

// ── Input & clock ─────────────────────────────────────────────────────────────

/// Hands out one scripted batch per frame, then nothing.
#[derive(Default)]
pub struct ScriptedEvents {
    pub batches: VecDeque<Vec<InputEvent>>,
    pub polls: usize,
}

impl ScriptedEvents {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        Self { batches: batches.into(), polls: 0 }
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        self.batches.pop_front().unwrap_or_default()
    }
}

/// Never sleeps; reports a fixed frame time and remembers requested rates.
pub struct FixedClock {
    pub delta_ms: f32,
    pub requested: Vec<u32>,
}

impl FixedClock {
    pub fn new(delta_ms: f32) -> Self {
        Self { delta_ms, requested: Vec::new() }
    }
}

impl FrameClock for FixedClock {
    fn tick(&mut self, frame_rate: u32) -> f32 {
        self.requested.push(frame_rate);
        self.delta_ms
    }
}

// ── Scenes ────────────────────────────────────────────────────────────────────

/// Scene with nothing but the shared base behaviour.
pub struct Probe {
    base: SceneBase,
}

impl Probe {
    pub fn boxed(name: &str) -> Box<dyn Scene> {
        Box::new(Probe { base: SceneBase::new(name, colors::BLACK) })
    }
}

impl Scene for Probe {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }
}

/// `count` probes registered under `"0".."count-1"`, with the initial
/// arming already consumed.
pub fn probe_graph(count: usize) -> SceneManager {
    let mut manager = SceneManager::new();
    manager.add((0..count).map(|i| Probe::boxed(&format!("probe-{i}"))).collect());
    manager.advance();
    manager
}

// ── Helpers ───────────────────────────────────────────────────────────────────

pub fn send(
    scene: &mut dyn Scene,
    router: &mut SceneRouter,
    audio: &mut RecordingAudio,
    event: InputEvent,
) -> Result<(), GameError> {
    let mut ctx = SceneContext { router, audio };
    scene.process_event(&event, &mut ctx)
}

pub fn step(
    scene: &mut dyn Scene,
    router: &mut SceneRouter,
    audio: &mut RecordingAudio,
    delta_ms: f32,
) -> Result<(), GameError> {
    let mut ctx = SceneContext { router, audio };
    scene.update_scene(delta_ms, &mut ctx)
}
