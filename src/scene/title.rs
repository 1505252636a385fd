use std::path::PathBuf;

use super::{Scene, SceneBase, SceneContext};
use crate::audio::Audio;
use crate::colors::{self, Rgb};
use crate::display::{draw_text_centered, Screen};
use crate::error::GameError;
use crate::geometry::Rect;
use crate::input::InputEvent;

const TITLE_SIZE: u16 = 72;
const PROMPT_SIZE: u16 = 18;
const BADGE_SIZE: f32 = 100.0;

/// Title card: a badge, the game's name, and "press any key".  Any key other
/// than Escape moves on to `next`.
pub struct TitleScene {
    base: SceneBase,
    title: String,
    title_color: Rgb,
    next: String,
}

impl TitleScene {
    pub fn new(title: impl Into<String>, next: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            base: SceneBase::new(format!("title: {title}"), colors::SKY_BLUE),
            title,
            title_color: colors::MAGENTA,
            next: next.into(),
        }
    }

    pub fn with_colors(mut self, title_color: Rgb, background: Rgb) -> Self {
        self.base = self.base.with_background(background);
        self.title_color = title_color;
        self
    }

    pub fn with_soundtrack(mut self, soundtrack: Option<PathBuf>) -> Self {
        self.base = self.base.with_soundtrack(soundtrack);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Scene for TitleScene {
    fn base(&self) -> &SceneBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SceneBase {
        &mut self.base
    }

    fn process_event(
        &mut self,
        event: &InputEvent,
        ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        if self.base.process_event(event) {
            return Ok(());
        }
        if let InputEvent::KeyDown(_) = event {
            ctx.router.set_next_scene(&self.next)?;
            self.base.invalidate();
        }
        Ok(())
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.base.draw(screen);
        let world = screen.size();
        let center = world / 2.0;
        let badge = Rect::new(
            center.x - BADGE_SIZE / 2.0,
            center.y - BADGE_SIZE / 2.0,
            BADGE_SIZE,
            BADGE_SIZE,
        );
        screen.fill_rect(badge, colors::DARK_SEA_GREEN);
        let bg = self.base.background();
        draw_text_centered(
            screen,
            center.x,
            center.y - 50.0,
            &self.title,
            TITLE_SIZE,
            self.title_color,
            bg,
        );
        draw_text_centered(
            screen,
            center.x,
            world.y - 50.0,
            "Press any key to continue.",
            PROMPT_SIZE,
            colors::BLACK,
            bg,
        );
    }

    fn end_scene(&mut self, audio: &mut dyn Audio) {
        self.base.end(audio);
        self.base.rearm();
    }
}
