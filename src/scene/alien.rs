use std::path::PathBuf;

use glam::Vec2;
use rand::rngs::StdRng;

use super::{Scene, SceneBase, SceneContext};
use crate::audio::Audio;
use crate::colors;
use crate::compute::{
    advance_formation, alien_shot, alien_should_fire, build_formation, move_projectiles,
    player_shot, resolve_alien_shots, resolve_player_shots, update_effects, FORMATION_COLS,
    FORMATION_ROWS,
};
use crate::display::Screen;
use crate::entities::{AlienUnit, ExplosionEffect, Player, Projectile, Shield};
use crate::error::GameError;
use crate::input::{InputEvent, Key};

/// Distance from the bottom of the world to the player's centre.
pub const PLAYER_BASELINE: f32 = 100.0;
const HUD_SIZE: u16 = 24;
const HINT_SIZE: u16 = 18;

/// Scene keys the level hands control to.
#[derive(Clone, Debug)]
pub struct AlienRoutes {
    pub win: String,
    /// The formation reached the overrun line.
    pub world_overrun: String,
    /// An alien shot hit the player.
    pub game_over: String,
}

/// The playable Space Invaders level.
pub struct AlienScene {
    base: SceneBase,
    world: Vec2,
    routes: AlienRoutes,
    rng: StdRng,
    explosion_sound: Option<PathBuf>,
    /// Layout restored on every start.
    formation: Vec<AlienUnit>,
    player: Player,
    aliens: Vec<AlienUnit>,
    player_shots: Vec<Projectile>,
    alien_shots: Vec<Projectile>,
    effects: Vec<ExplosionEffect>,
    shields: Vec<Shield>,
}

impl AlienScene {
    pub fn new(world: Vec2, routes: AlienRoutes, rng: StdRng) -> Self {
        let formation = build_formation(FORMATION_ROWS, FORMATION_COLS);
        Self {
            base: SceneBase::new("aliens", colors::BLACK),
            world,
            routes,
            rng,
            explosion_sound: None,
            aliens: formation.clone(),
            formation,
            player: Self::fresh_player(world),
            player_shots: Vec::new(),
            alien_shots: Vec::new(),
            effects: Vec::new(),
            shields: Shield::row(),
        }
    }

    pub fn with_soundtrack(mut self, soundtrack: Option<PathBuf>) -> Self {
        self.base = self.base.with_soundtrack(soundtrack);
        self
    }

    pub fn with_explosion_sound(mut self, sound: Option<PathBuf>) -> Self {
        self.explosion_sound = sound;
        self
    }

    /// Replace the starting layout.
    pub fn with_formation(mut self, formation: Vec<AlienUnit>) -> Self {
        self.aliens = formation.clone();
        self.formation = formation;
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn aliens(&self) -> &[AlienUnit] {
        &self.aliens
    }

    pub fn player_shots(&self) -> &[Projectile] {
        &self.player_shots
    }

    pub fn alien_shots(&self) -> &[Projectile] {
        &self.alien_shots
    }

    pub fn effects(&self) -> &[ExplosionEffect] {
        &self.effects
    }

    fn fresh_player(world: Vec2) -> Player {
        Player::new(Vec2::new(world.x / 2.0, world.y - PLAYER_BASELINE), world.x)
    }

    fn reset(&mut self) {
        self.aliens = self.formation.clone();
        self.player = Self::fresh_player(self.world);
        self.player_shots.clear();
        self.alien_shots.clear();
        self.effects.clear();
    }

    fn transition(&mut self, ctx: &mut SceneContext<'_>, key: &str) -> Result<(), GameError> {
        ctx.router.set_next_scene(key)?;
        self.base.invalidate();
        Ok(())
    }

    fn draw_hud(&self, screen: &mut dyn Screen) {
        let bg = self.base.background();
        let counter = format!("Aliens left: {}", self.aliens.len());
        screen.draw_text(Vec2::new(10.0, 10.0), &counter, HUD_SIZE, colors::WHITE, bg);
        screen.draw_text(
            Vec2::new(10.0, self.world.y - 30.0),
            "<- -> / A D : Move   SPACE : Fire   ESC : Quit",
            HINT_SIZE,
            colors::DARK_GREY,
            bg,
        );
    }
}

impl Scene for AlienScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn start_scene(&mut self, audio: &mut dyn Audio) -> Result<(), GameError> {
        self.reset();
        self.base.start(audio)
    }

    fn process_event(
        &mut self,
        event: &InputEvent,
        _ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        if self.base.process_event(event) {
            return Ok(());
        }
        match event {
            InputEvent::KeyDown(Key::Left | Key::Char('a')) => self.player.move_left(),
            InputEvent::KeyDown(Key::Right | Key::Char('d')) => self.player.move_right(),
            InputEvent::KeyDown(Key::Space) => {
                let shot = player_shot(&self.player, self.world.y);
                self.player_shots.push(shot);
            }
            InputEvent::KeyUp(Key::Left | Key::Char('a')) if self.player.velocity().x < 0.0 => {
                self.player.stop();
            }
            InputEvent::KeyUp(Key::Right | Key::Char('d')) if self.player.velocity().x > 0.0 => {
                self.player.stop();
            }
            _ => {}
        }
        Ok(())
    }

    fn update_scene(
        &mut self,
        delta_time: f32,
        ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        self.player.update();

        if advance_formation(&mut self.aliens, self.world.x) {
            tracing::info!(scene = self.base.name(), "formation overran the world");
            let key = self.routes.world_overrun.clone();
            return self.transition(ctx, &key);
        }

        move_projectiles(&mut self.player_shots, delta_time);
        let destroyed =
            resolve_player_shots(&mut self.player_shots, &mut self.aliens, &mut self.effects);
        for name in &destroyed {
            tracing::debug!(alien = %name, "alien destroyed");
            if let Some(sound) = &self.explosion_sound {
                ctx.audio.play_effect(sound);
            }
        }
        if !destroyed.is_empty() && self.aliens.is_empty() {
            tracing::info!(scene = self.base.name(), "formation destroyed");
            let key = self.routes.win.clone();
            return self.transition(ctx, &key);
        }

        if alien_should_fire(&mut self.rng) {
            let shot = alien_shot(&mut self.rng, self.world.y);
            tracing::trace!(x = shot.position().x, "alien fired");
            self.alien_shots.push(shot);
        }
        move_projectiles(&mut self.alien_shots, delta_time);
        if resolve_alien_shots(&mut self.alien_shots, &self.player) {
            tracing::info!(scene = self.base.name(), "player hit");
            let key = self.routes.game_over.clone();
            return self.transition(ctx, &key);
        }

        update_effects(&mut self.effects);
        Ok(())
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.base.draw(screen);
        for shield in &self.shields {
            shield.draw(screen);
        }
        for alien in &self.aliens {
            alien.draw(screen);
        }
        for effect in &self.effects {
            effect.draw(screen);
        }
        for shot in self.player_shots.iter().chain(&self.alien_shots) {
            shot.draw(screen);
        }
        self.player.draw(screen);
        self.draw_hud(screen);
    }

    fn end_scene(&mut self, audio: &mut dyn Audio) {
        self.base.end(audio);
        self.base.rearm();
    }
}
