use glam::Vec2;

/// Axis-aligned box in world units, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Square box enclosing a circle.
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Boxes that only share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Step from `from` toward `to` by at most `max_distance`, landing exactly on
/// `to` when it is within reach.
pub fn move_towards(from: Vec2, to: Vec2, max_distance: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_distance || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_distance
    }
}
