use std::collections::HashMap;
use std::fmt;

use super::Scene;
use crate::error::GameError;

/// Position of a scene in the registry.  Its key is the index as a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneId(usize);

impl SceneId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of asking the manager for the next scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Scene(SceneId),
    /// Nobody armed a successor: the game is over.
    EndOfSequence,
}

/// Key lookup plus the armed next scene.  Scenes get a `&mut` to this while
/// they run so they can name their successor.
#[derive(Debug, Default)]
pub struct SceneRouter {
    keys: HashMap<String, SceneId>,
    next: Option<SceneId>,
    reloaded: bool,
}

impl SceneRouter {
    pub fn lookup(&self, key: &str) -> Option<SceneId> {
        self.keys.get(key).copied()
    }

    pub fn set_next_scene(&mut self, key: &str) -> Result<(), GameError> {
        let id = self
            .lookup(key)
            .ok_or_else(|| GameError::UnknownScene(key.to_string()))?;
        self.next = Some(id);
        self.reloaded = true;
        tracing::debug!(next = %id, "next scene armed");
        Ok(())
    }

    pub fn is_armed(&self) -> bool {
        self.reloaded
    }

    pub fn next_scene(&self) -> Option<SceneId> {
        self.next
    }

    fn register(&mut self, id: SceneId) {
        self.keys.insert(id.key(), id);
    }

    /// Single-shot: hands out the armed scene once, then disarms.
    fn take_armed(&mut self) -> Option<SceneId> {
        if !self.reloaded {
            return None;
        }
        self.reloaded = false;
        self.next
    }
}

/// Registry of scenes keyed `"0".."N-1"` in registration order.
#[derive(Default)]
pub struct SceneManager {
    scenes: Vec<Box<dyn Scene>>,
    router: SceneRouter,
    current: Option<SceneId>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scenes` under the next free keys.  The first registration
    /// makes `"0"` current and arms it.
    pub fn add(&mut self, scenes: Vec<Box<dyn Scene>>) {
        let was_empty = self.scenes.is_empty();
        for scene in scenes {
            let id = SceneId(self.scenes.len());
            tracing::debug!(key = %id, scene = scene.name(), "scene registered");
            self.router.register(id);
            self.scenes.push(scene);
        }
        if was_empty && !self.scenes.is_empty() {
            let first = SceneId(0);
            self.current = Some(first);
            self.router.next = Some(first);
            self.router.reloaded = true;
        }
    }

    pub fn set_next_scene(&mut self, key: &str) -> Result<(), GameError> {
        self.router.set_next_scene(key)
    }

    /// The armed scene, or `EndOfSequence` when nothing was armed since the
    /// last call.
    pub fn advance(&mut self) -> Advance {
        match self.router.take_armed() {
            Some(id) => {
                self.current = Some(id);
                Advance::Scene(id)
            }
            None => Advance::EndOfSequence,
        }
    }

    pub fn current(&self) -> Option<SceneId> {
        self.current
    }

    pub fn lookup(&self, key: &str) -> Option<SceneId> {
        self.router.lookup(key)
    }

    pub fn router(&self) -> &SceneRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut SceneRouter {
        &mut self.router
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scene(&self, id: SceneId) -> Option<&dyn Scene> {
        self.scenes.get(id.0).map(|scene| &**scene)
    }

    /// The scene together with the router it reports transitions to.
    pub fn scene_mut(&mut self, id: SceneId) -> Option<(&mut dyn Scene, &mut SceneRouter)> {
        let scene: &mut dyn Scene = &mut **self.scenes.get_mut(id.0)?;
        Some((scene, &mut self.router))
    }
}
