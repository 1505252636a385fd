/// Game rules for the alien level.
///
/// Every function works on collections the scene owns and reports what
/// happened; the scene decides what a result means for its lifecycle.
/// Randomness comes in through an injected RNG so tests can seed it.
/// Removal always goes through `retain`, never index removal mid-iteration.

use glam::Vec2;
use rand::Rng;

use crate::colors::{self, Rgb};
use crate::entities::{
    AlienUnit, ExplosionEffect, Player, Projectile, ProjectileKind, ALIEN_RADIUS,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

pub const FORMATION_ROWS: usize = 3;
pub const FORMATION_COLS: usize = 10;
pub const FORMATION_ORIGIN: Vec2 = Vec2::new(100.0, 100.0);
pub const FORMATION_SPACING: f32 = 60.0;
/// Downward drift per tick.
pub const FORMATION_STEP: f32 = 0.5;
/// Aliens this close to the right edge stop sinking.
pub const FORMATION_RIGHT_MARGIN: f32 = 50.0;
/// Any alien at or below this line has overrun the world.
pub const OVERRUN_Y: f32 = 650.0;

/// World units per millisecond.
pub const PLAYER_SHOT_SPEED: f32 = 0.5;
pub const ALIEN_SHOT_SPEED: f32 = 0.1;

/// Inclusive upper bound of each of the two alien-fire draws.
pub const ALIEN_FIRE_DRAW_MAX: u32 = 100;
pub const ALIEN_FIRE_BAND: (f32, f32) = (100.0, 700.0);
pub const ALIEN_FIRE_Y: f32 = 100.0;

fn row_color(row: usize) -> Rgb {
    match row % 3 {
        0 => colors::MAGENTA,
        1 => colors::LIME_GREEN,
        _ => colors::YELLOW,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The starting grid, named `alien-<row>-<col>`, listed row by row.
pub fn build_formation(rows: usize, cols: usize) -> Vec<AlienUnit> {
    let mut aliens = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let center = FORMATION_ORIGIN
                + Vec2::new(col as f32 * FORMATION_SPACING, row as f32 * FORMATION_SPACING);
            aliens.push(AlienUnit::new(
                center,
                ALIEN_RADIUS,
                row_color(row),
                format!("alien-{row}-{col}"),
            ));
        }
    }
    aliens
}

/// A shot from the player straight up by a full screen height.
pub fn player_shot(player: &Player, screen_height: f32) -> Projectile {
    let from = player.position();
    let target = Vec2::new(from.x, from.y - screen_height);
    Projectile::new(ProjectileKind::Player, from, target, PLAYER_SHOT_SPEED)
}

/// Two independent draws in `[0, ALIEN_FIRE_DRAW_MAX]` that happen to match:
/// a 1 in 101 chance per tick.
pub fn alien_should_fire(rng: &mut impl Rng) -> bool {
    let a = rng.gen_range(0..=ALIEN_FIRE_DRAW_MAX);
    let b = rng.gen_range(0..=ALIEN_FIRE_DRAW_MAX);
    a == b
}

/// A slow shot dropping straight down from a random column in the band.
pub fn alien_shot(rng: &mut impl Rng, screen_height: f32) -> Projectile {
    let x = rng.gen_range(ALIEN_FIRE_BAND.0..=ALIEN_FIRE_BAND.1);
    Projectile::new(
        ProjectileKind::Alien,
        Vec2::new(x, ALIEN_FIRE_Y),
        Vec2::new(x, screen_height),
        ALIEN_SHOT_SPEED,
    )
}

// ── Per-tick rules ───────────────────────────────────────────────────────────

/// Sink every alien left of the right margin.  Returns `true` once any alien
/// has reached the overrun line.
pub fn advance_formation(aliens: &mut [AlienUnit], screen_width: f32) -> bool {
    let limit = screen_width - FORMATION_RIGHT_MARGIN;
    for alien in aliens.iter_mut() {
        if alien.center().x < limit {
            alien.advance(FORMATION_STEP);
        }
    }
    aliens.iter().any(|alien| alien.center().y >= OVERRUN_Y)
}

pub fn move_projectiles(projectiles: &mut [Projectile], delta_time: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.update(delta_time);
    }
}

/// Expire spent player shots, then match each remaining shot against the
/// live aliens in list order.  A hit moves the alien out of `aliens` into a
/// new explosion and consumes the shot.  Returns the destroyed aliens' names
/// in the order they were hit.
pub fn resolve_player_shots(
    shots: &mut Vec<Projectile>,
    aliens: &mut Vec<AlienUnit>,
    effects: &mut Vec<ExplosionEffect>,
) -> Vec<String> {
    let mut destroyed = Vec::new();
    shots.retain(|shot| {
        if shot.should_die() {
            return false;
        }
        let rect = shot.rect();
        let hit = aliens
            .iter()
            .position(|alien| !alien.is_exploding() && alien.rect().intersects(&rect));
        match hit {
            Some(index) => {
                let alien = aliens.remove(index);
                destroyed.push(alien.name().to_string());
                effects.push(ExplosionEffect::new(alien));
                false
            }
            None => true,
        }
    });
    destroyed
}

/// Expire spent alien shots and consume any that reach the player.  Returns
/// `true` when the player was hit.
pub fn resolve_alien_shots(shots: &mut Vec<Projectile>, player: &Player) -> bool {
    let target = player.rect();
    let mut hit = false;
    shots.retain(|shot| {
        if shot.should_die() {
            return false;
        }
        if shot.rect().intersects(&target) {
            hit = true;
            return false;
        }
        true
    });
    hit
}

/// Tick every explosion and drop the finished ones.  Returns how many ended.
pub fn update_effects(effects: &mut Vec<ExplosionEffect>) -> usize {
    let mut finished = 0;
    for effect in effects.iter_mut() {
        if effect.update() {
            finished += 1;
        }
    }
    effects.retain(|effect| !effect.is_finished());
    finished
}
