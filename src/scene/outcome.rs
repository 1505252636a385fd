use super::{Scene, SceneBase, SceneContext};
use crate::audio::Audio;
use crate::colors::{self, Rgb};
use crate::display::{draw_text_centered, Screen};
use crate::error::GameError;
use crate::input::{InputEvent, Key};

const MESSAGE_SIZE: u16 = 64;
const HINT_SIZE: u16 = 18;

#[derive(Clone, Debug)]
pub struct OutcomeRoutes {
    /// Space goes here.
    pub menu: String,
    /// Tab goes here.
    pub retry: String,
}

/// End-of-round card ("You have won!", "Game Over", ...).  Space returns to
/// the menu, Tab replays the level.
pub struct OutcomeScene {
    base: SceneBase,
    message: String,
    message_color: Rgb,
    routes: OutcomeRoutes,
}

impl OutcomeScene {
    pub fn new(message: impl Into<String>, message_color: Rgb, routes: OutcomeRoutes) -> Self {
        let message = message.into();
        Self {
            base: SceneBase::new(format!("outcome: {message}"), colors::BLACK),
            message,
            message_color,
            routes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Scene for OutcomeScene {
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
        let next = match event {
            InputEvent::KeyDown(Key::Space) => &self.routes.menu,
            InputEvent::KeyDown(Key::Tab) => &self.routes.retry,
            _ => return Ok(()),
        };
        ctx.router.set_next_scene(next)?;
        self.base.invalidate();
        Ok(())
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.base.draw(screen);
        let world = screen.size();
        let bg = self.base.background();
        draw_text_centered(
            screen,
            world.x / 2.0,
            world.y / 2.0 - 40.0,
            &self.message,
            MESSAGE_SIZE,
            self.message_color,
            bg,
        );
        draw_text_centered(
            screen,
            world.x / 2.0,
            world.y / 2.0 + 60.0,
            "SPACE : Title   TAB : Retry   ESC : Quit",
            HINT_SIZE,
            colors::WHITE,
            bg,
        );
    }

    fn end_scene(&mut self, audio: &mut dyn Audio) {
        self.base.end(audio);
        self.base.rearm();
    }
}
