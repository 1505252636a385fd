/// The driver: owns the collaborators and runs scenes one after another
/// until nobody names a successor.

use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::AssetRegistry;
use crate::audio::Audio;
use crate::colors;
use crate::config::{GameConfig, GameKind};
use crate::display::Screen;
use crate::error::GameError;
use crate::input::EventSource;
use crate::scene::{
    Advance, AlienRoutes, AlienScene, OutcomeRoutes, OutcomeScene, Scene, SceneContext,
    SceneManager, SnakeScene, TitleScene,
};

/// Registry keys of the Space Invaders scene graph.
pub mod invaders {
    pub const TITLE: &str = "0";
    pub const PLAY: &str = "1";
    pub const GAME_OVER: &str = "2";
    pub const WORLD_OVERRUN: &str = "3";
    pub const WIN: &str = "4";
}

/// Registry keys of the Snake scene graph.
pub mod snake {
    pub const TITLE: &str = "0";
    pub const PLAY: &str = "1";
    pub const GAME_OVER: &str = "2";
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

pub trait FrameClock {
    /// Block until one frame at `frame_rate` has passed since the previous
    /// call, then return the milliseconds actually elapsed.
    fn tick(&mut self, frame_rate: u32) -> f32;
}

#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self, frame_rate: u32) -> f32 {
        let frame = Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64);
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return 0.0;
        };
        let elapsed = last.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f32() * 1000.0
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Scene activations, counting repeats.
    pub scenes_played: usize,
    pub frames: u64,
}

pub struct VideoGame<S: Screen, E: EventSource, A: Audio, C: FrameClock> {
    screen: S,
    events: E,
    audio: A,
    clock: C,
    scene_graph: SceneManager,
}

impl<S: Screen, E: EventSource, A: Audio, C: FrameClock> VideoGame<S, E, A, C> {
    pub fn new(screen: S, events: E, audio: A, clock: C) -> Self {
        Self {
            screen,
            events,
            audio,
            clock,
            scene_graph: SceneManager::new(),
        }
    }

    /// Register `scenes` and start from key `"0"`.
    pub fn build_scene_graph(&mut self, scenes: Vec<Box<dyn Scene>>) -> Result<(), GameError> {
        self.scene_graph.add(scenes);
        self.scene_graph.set_next_scene("0")
    }

    pub fn scene_graph(&self) -> &SceneManager {
        &self.scene_graph
    }

    pub fn scene_graph_mut(&mut self) -> &mut SceneManager {
        &mut self.scene_graph
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The main loop.  Returns once a scene ends without naming a successor.
    pub fn run(&mut self) -> Result<RunSummary, GameError> {
        let mut summary = RunSummary::default();
        let mut current = match self.scene_graph.advance() {
            Advance::Scene(id) => id,
            Advance::EndOfSequence => {
                tracing::info!("no scenes to play");
                return Ok(summary);
            }
        };

        loop {
            let (scene, router) = self
                .scene_graph
                .scene_mut(current)
                .ok_or_else(|| GameError::UnknownScene(current.key()))?;
            summary.scenes_played += 1;
            tracing::info!(key = %current, scene = scene.name(), "activating scene");

            scene.start_scene(&mut self.audio)?;
            while scene.is_valid() {
                let delta_time = self.clock.tick(scene.frame_rate());
                let mut ctx = SceneContext {
                    router: &mut *router,
                    audio: &mut self.audio,
                };
                for event in self.events.poll_events() {
                    scene.process_event(&event, &mut ctx)?;
                }
                scene.update_scene(delta_time, &mut ctx)?;
                scene.draw(&mut self.screen);
                scene.render_updates(&mut self.screen);
                self.screen.present()?;
                summary.frames += 1;
            }
            scene.end_scene(&mut self.audio);

            current = match self.scene_graph.advance() {
                Advance::Scene(id) => id,
                Advance::EndOfSequence => break,
            };
        }

        tracing::info!(
            scenes = summary.scenes_played,
            frames = summary.frames,
            "scene sequence exhausted"
        );
        Ok(summary)
    }
}

// ── Scene graphs ──────────────────────────────────────────────────────────────

fn scene_rng(config: &GameConfig, stream: u64) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

/// Title, level, and the three outcome cards, in registry order.
pub fn invaders_scenes(
    config: &GameConfig,
    assets: &AssetRegistry,
) -> Result<Vec<Box<dyn Scene>>, GameError> {
    let (soundtrack, explosion) = if config.music {
        (Some(assets.get("soundtrack")?), Some(assets.get("soundfx")?))
    } else {
        (None, None)
    };
    let outcome_routes = OutcomeRoutes {
        menu: invaders::TITLE.to_string(),
        retry: invaders::PLAY.to_string(),
    };
    let routes = AlienRoutes {
        win: invaders::WIN.to_string(),
        world_overrun: invaders::WORLD_OVERRUN.to_string(),
        game_over: invaders::GAME_OVER.to_string(),
    };

    Ok(vec![
        Box::new(TitleScene::new(config.title.clone(), invaders::PLAY)) as Box<dyn Scene>,
        Box::new(
            AlienScene::new(config.world, routes, scene_rng(config, 0))
                .with_soundtrack(soundtrack)
                .with_explosion_sound(explosion),
        ),
        Box::new(OutcomeScene::new("Game Over. T^T", colors::RED, outcome_routes.clone())),
        Box::new(OutcomeScene::new("World Overrun!", colors::FIREBRICK, outcome_routes.clone())),
        Box::new(OutcomeScene::new("You have won!", colors::LIME_GREEN, outcome_routes)),
    ])
}

/// Title, snake board, game over.
pub fn snake_scenes(
    config: &GameConfig,
    assets: &AssetRegistry,
) -> Result<Vec<Box<dyn Scene>>, GameError> {
    let soundtrack = if config.music {
        Some(assets.get("music-grid")?)
    } else {
        None
    };
    let outcome_routes = OutcomeRoutes {
        menu: snake::TITLE.to_string(),
        retry: snake::PLAY.to_string(),
    };

    Ok(vec![
        Box::new(
            TitleScene::new("Snake", snake::PLAY)
                .with_colors(colors::LIME_GREEN, colors::MIDNIGHT_BLUE),
        ) as Box<dyn Scene>,
        Box::new(
            SnakeScene::new(config.world, snake::GAME_OVER, scene_rng(config, 1))
                .with_soundtrack(soundtrack),
        ),
        Box::new(OutcomeScene::new("Game Over", colors::RED, outcome_routes)),
    ])
}

pub fn scenes_for(
    config: &GameConfig,
    assets: &AssetRegistry,
) -> Result<Vec<Box<dyn Scene>>, GameError> {
    match config.game {
        GameKind::Invaders => invaders_scenes(config, assets),
        GameKind::Snake => snake_scenes(config, assets),
    }
}
