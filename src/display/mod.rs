/// Presentation layer.  Scenes describe a frame through the `Screen` trait;
/// the terminal implementation turns that into crossterm commands.

mod terminal;

pub use terminal::{display_info, TerminalScreen};

use glam::Vec2;

use crate::colors::Rgb;
use crate::error::GameError;
use crate::geometry::Rect;

/// Font size at and above which text is rendered bold.
pub const HEADLINE_SIZE: u16 = 48;

/// Drawing surface for one frame, in world coordinates.  Later calls occlude
/// earlier ones where they overlap.
pub trait Screen {
    /// World-space extent the screen maps onto its output.
    fn size(&self) -> Vec2;

    fn clear(&mut self, color: Rgb);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Render `text` with its top-left corner at `position`.
    fn draw_text(&mut self, position: Vec2, text: &str, size: u16, color: Rgb, background: Rgb);

    /// World-space width and height `text` occupies when drawn.
    fn text_extent(&self, text: &str, size: u16) -> Vec2;

    /// Push the finished frame to the output device.
    fn present(&mut self) -> Result<(), GameError>;
}

/// Draw `text` horizontally centred on `center_x`.
pub fn draw_text_centered(
    screen: &mut dyn Screen,
    center_x: f32,
    top: f32,
    text: &str,
    size: u16,
    color: Rgb,
    background: Rgb,
) {
    let extent = screen.text_extent(text, size);
    let left = (center_x - extent.x / 2.0).max(0.0);
    screen.draw_text(Vec2::new(left, top), text, size, color, background);
}
