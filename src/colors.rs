/// 24-bit colours used by every scene, plus the palette the games draw with.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Palette ───────────────────────────────────────────────────────────────────

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const MAGENTA: Rgb = Rgb(255, 0, 255);
pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
pub const DARK_SEA_GREEN: Rgb = Rgb(143, 188, 143);
pub const PURPLE2: Rgb = Rgb(145, 44, 238);
pub const LIME_GREEN: Rgb = Rgb(50, 205, 50);
pub const MIDNIGHT_BLUE: Rgb = Rgb(25, 25, 112);
pub const DARK_GREY: Rgb = Rgb(105, 105, 105);
pub const FIREBRICK: Rgb = Rgb(178, 34, 34);

/// Scale every channel of `color` by `factor`, clamping to the valid range.
pub fn mult_color(factor: f32, color: Rgb) -> Rgb {
    let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Rgb(scale(color.0), scale(color.1), scale(color.2))
}
