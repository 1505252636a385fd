use std::collections::VecDeque;
use std::path::PathBuf;

use glam::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Scene, SceneBase, SceneContext};
use crate::audio::Audio;
use crate::colors;
use crate::display::Screen;
use crate::error::GameError;
use crate::geometry::Rect;
use crate::input::{InputEvent, Key};

/// Side of one grid cell in world units.
pub const SNAKE_CELL: f32 = 20.0;
pub const SNAKE_FRAME_RATE: u32 = 10;
const START_LENGTH: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Grid snake prototype.  One cell per tick at a slow frame rate; walls and
/// the snake's own body are fatal.
pub struct SnakeScene {
    base: SceneBase,
    grid: IVec2,
    lose: String,
    rng: StdRng,
    /// Head first.
    body: VecDeque<IVec2>,
    heading: Heading,
    pending: Heading,
    food: Option<IVec2>,
    score: u32,
}

impl SnakeScene {
    pub fn new(world: Vec2, lose: impl Into<String>, rng: StdRng) -> Self {
        let grid = IVec2::new(
            ((world.x / SNAKE_CELL) as i32).max(START_LENGTH + 1),
            ((world.y / SNAKE_CELL) as i32).max(1),
        );
        let mut scene = Self {
            base: SceneBase::new("snake", colors::MIDNIGHT_BLUE).with_frame_rate(SNAKE_FRAME_RATE),
            grid,
            lose: lose.into(),
            rng,
            body: VecDeque::new(),
            heading: Heading::Right,
            pending: Heading::Right,
            food: None,
            score: 0,
        };
        scene.reset();
        scene
    }

    pub fn with_soundtrack(mut self, soundtrack: Option<PathBuf>) -> Self {
        self.base = self.base.with_soundtrack(soundtrack);
        self
    }

    pub fn grid(&self) -> IVec2 {
        self.grid
    }

    pub fn body(&self) -> &VecDeque<IVec2> {
        &self.body
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or(IVec2::ZERO)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn food(&self) -> Option<IVec2> {
        self.food
    }

    /// Move the food to a chosen cell.
    pub fn place_food(&mut self, cell: IVec2) {
        self.food = Some(cell);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn reset(&mut self) {
        let center = self.grid / 2;
        self.body = (0..START_LENGTH).map(|i| center - IVec2::new(i, 0)).collect();
        self.heading = Heading::Right;
        self.pending = Heading::Right;
        self.score = 0;
        self.spawn_food();
    }

    fn spawn_food(&mut self) {
        let free: Vec<IVec2> = (0..self.grid.y)
            .flat_map(|y| (0..self.grid.x).map(move |x| IVec2::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        self.food = free.choose(&mut self.rng).copied();
    }

    fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.grid.x && cell.y < self.grid.y
    }

    fn steer(&mut self, heading: Heading) {
        if heading != self.heading.opposite() {
            self.pending = heading;
        }
    }

    fn cell_rect(cell: IVec2) -> Rect {
        Rect::new(cell.x as f32 * SNAKE_CELL, cell.y as f32 * SNAKE_CELL, SNAKE_CELL, SNAKE_CELL)
    }
}

impl Scene for SnakeScene {
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
            InputEvent::KeyDown(Key::Up | Key::Char('w')) => self.steer(Heading::Up),
            InputEvent::KeyDown(Key::Down | Key::Char('s')) => self.steer(Heading::Down),
            InputEvent::KeyDown(Key::Left | Key::Char('a')) => self.steer(Heading::Left),
            InputEvent::KeyDown(Key::Right | Key::Char('d')) => self.steer(Heading::Right),
            _ => {}
        }
        Ok(())
    }

    fn update_scene(
        &mut self,
        _delta_time: f32,
        ctx: &mut SceneContext<'_>,
    ) -> Result<(), GameError> {
        self.heading = self.pending;
        let next = self.head() + self.heading.delta();
        let growing = self.food == Some(next);
        // The tail cell frees up this tick unless the snake grows.
        let solid = self.body.len() - usize::from(!growing);
        let bites_itself = self.body.iter().take(solid).any(|&cell| cell == next);

        if !self.in_bounds(next) || bites_itself {
            tracing::info!(score = self.score, length = self.body.len(), "snake crashed");
            ctx.router.set_next_scene(&self.lose)?;
            self.base.invalidate();
            return Ok(());
        }

        self.body.push_front(next);
        if growing {
            self.score += 1;
            tracing::debug!(score = self.score, "snake ate");
            self.spawn_food();
        } else {
            self.body.pop_back();
        }
        Ok(())
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.base.draw(screen);
        if let Some(food) = self.food {
            let rect = Self::cell_rect(food);
            screen.fill_circle(rect.center(), SNAKE_CELL / 2.0, colors::RED);
        }
        for (index, &cell) in self.body.iter().enumerate() {
            let color = if index == 0 { colors::YELLOW } else { colors::LIME_GREEN };
            screen.fill_rect(Self::cell_rect(cell), color);
        }
        let score = format!("Score: {}", self.score);
        screen.draw_text(Vec2::new(10.0, 10.0), &score, 24, colors::WHITE, self.base.background());
    }

    fn end_scene(&mut self, audio: &mut dyn Audio) {
        self.base.end(audio);
        self.base.rearm();
    }
}
