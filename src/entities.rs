/// Game entity types and their per-tick rules.  No I/O: drawing goes through
/// the `Screen` trait and every collection is owned by a scene.

use glam::Vec2;

use crate::colors::{self, mult_color, Rgb};
use crate::display::Screen;
use crate::geometry::{move_towards, Rect};

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_RADIUS: f32 = 25.0;
/// Horizontal step per tick while a direction key is held.
pub const PLAYER_STEP: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    color: Rgb,
    /// Exclusive right bound for `position.x`.
    screen_width: f32,
}

impl Player {
    pub fn new(position: Vec2, screen_width: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            color: colors::PURPLE2,
            screen_width,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.position, self.radius)
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn move_left(&mut self) {
        self.velocity = Vec2::new(-PLAYER_STEP, 0.0);
    }

    pub fn move_right(&mut self) {
        self.velocity = Vec2::new(PLAYER_STEP, 0.0);
    }

    /// Apply the velocity unless the new x would leave `(0, screen_width)`.
    pub fn update(&mut self) {
        let new_x = self.position.x + self.velocity.x;
        if new_x > 0.0 && new_x < self.screen_width {
            self.position += self.velocity;
        }
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        screen.fill_circle(self.position, self.radius, self.color);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_RADIUS: f32 = 10.0;
/// Squared distance to target under which a projectile is spent.
pub const ARRIVAL_TOLERANCE: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    Player,
    Alien,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    position: Vec2,
    target: Vec2,
    /// World units per millisecond.
    speed: f32,
    radius: f32,
    color: Rgb,
    kind: ProjectileKind,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, position: Vec2, target: Vec2, speed: f32) -> Self {
        let base = match kind {
            ProjectileKind::Player => colors::BLUE,
            ProjectileKind::Alien => colors::RED,
        };
        Self {
            position,
            target,
            speed,
            radius: PROJECTILE_RADIUS,
            color: mult_color(speed, base),
            kind,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.position, self.radius)
    }

    pub fn should_die(&self) -> bool {
        self.position.distance_squared(self.target) <= ARRIVAL_TOLERANCE
    }

    pub fn update(&mut self, delta_time: f32) {
        self.position = move_towards(self.position, self.target, self.speed * delta_time);
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        screen.fill_circle(self.position, self.radius, self.color);
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

pub const ALIEN_RADIUS: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct AlienUnit {
    center: Vec2,
    radius: f32,
    color: Rgb,
    name: String,
    is_exploding: bool,
}

impl AlienUnit {
    pub fn new(center: Vec2, radius: f32, color: Rgb, name: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            color,
            name: name.into(),
            is_exploding: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_exploding(&self) -> bool {
        self.is_exploding
    }

    pub fn rect(&self) -> Rect {
        Rect::around(self.center, self.radius)
    }

    /// Sink (or lift, for negative `dy`) the alien.
    pub fn advance(&mut self, dy: f32) {
        self.center.y += dy;
    }

    pub fn mark_exploding(&mut self) {
        self.is_exploding = true;
    }

    pub fn clear_exploding(&mut self) {
        self.is_exploding = false;
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        if !self.is_exploding {
            screen.fill_circle(self.center, self.radius, self.color);
        }
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_LIFE: u32 = 12;
/// Ticks each animation frame stays on screen.
pub const EXPLOSION_ANIM_CYCLE: u32 = 3;
pub const EXPLOSION_FRAMES: u32 = 2;

/// Death animation bound to the alien it owns.
#[derive(Clone, Debug)]
pub struct ExplosionEffect {
    actor: AlienUnit,
    life: u32,
    frame: u32,
}

impl ExplosionEffect {
    pub fn new(mut actor: AlienUnit) -> Self {
        actor.mark_exploding();
        Self {
            actor,
            life: EXPLOSION_LIFE,
            frame: 0,
        }
    }

    pub fn actor(&self) -> &AlienUnit {
        &self.actor
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.life == 0
    }

    /// Advance one tick.  Returns `true` on the tick the animation ends,
    /// which is also when the actor stops exploding.
    pub fn update(&mut self) -> bool {
        if self.life == 0 {
            return false;
        }
        self.life -= 1;
        self.frame = (self.life / EXPLOSION_ANIM_CYCLE) % EXPLOSION_FRAMES;
        if self.life == 0 {
            self.actor.clear_exploding();
            return true;
        }
        false
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        // Frame 1 is the first frame flipped: swap the ring colours.
        let (outer, inner) = if self.frame == 0 {
            (colors::ORANGE, colors::YELLOW)
        } else {
            (colors::YELLOW, colors::ORANGE)
        };
        let center = self.actor.center();
        let radius = self.actor.radius();
        screen.fill_circle(center, radius * 1.2, outer);
        screen.fill_circle(center, radius * 0.6, inner);
    }
}

// ── Shields ───────────────────────────────────────────────────────────────────

pub const SHIELD_SIZE: Vec2 = Vec2::new(50.0, 25.0);
pub const SHIELD_LEFTS: [f32; 3] = [200.0, 375.0, 550.0];
pub const SHIELD_TOP: f32 = 600.0;

/// Static bunkers in front of the player; purely decorative.
#[derive(Clone, Debug)]
pub struct Shield {
    rect: Rect,
    color: Rgb,
}

impl Shield {
    pub fn row() -> Vec<Shield> {
        SHIELD_LEFTS
            .iter()
            .map(|&left| Shield {
                rect: Rect::new(left, SHIELD_TOP, SHIELD_SIZE.x, SHIELD_SIZE.y),
                color: colors::PURPLE2,
            })
            .collect()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn draw(&self, screen: &mut dyn Screen) {
        screen.fill_rect(self.rect, self.color);
    }
}
