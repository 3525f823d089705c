//! The current/next scene pair and its atomic swap.

use super::scene::Scene;
use crate::error::StageError;

/// Holder of the active scene (with its camera) and the one a transition swaps to.
pub trait SceneSlot {
    fn current(&self) -> &Scene;
    fn current_mut(&mut self) -> &mut Scene;
    /// The scene a swap would activate, if one is wired up.
    fn next(&self) -> Option<&Scene>;
    /// Exchange current and next. Fails if there is no next scene.
    fn swap(&mut self) -> Result<(), StageError>;
}

/// Two-scene slot: after a swap the previous scene becomes the next one.
pub struct SceneSlots {
    current: Scene,
    next: Option<Scene>,
    swaps: u32,
}

impl SceneSlots {
    /// Start on `current`, entering it immediately.
    pub fn new(mut current: Scene, next: Option<Scene>) -> Self {
        current.enter();
        Self {
            current,
            next,
            swaps: 0,
        }
    }

    /// Number of completed swaps.
    pub fn swap_count(&self) -> u32 {
        self.swaps
    }

    /// Update every camera's aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.current.camera.set_viewport(width, height);
        if let Some(next) = self.next.as_mut() {
            next.camera.set_viewport(width, height);
        }
    }
}

impl SceneSlot for SceneSlots {
    fn current(&self) -> &Scene {
        &self.current
    }

    fn current_mut(&mut self) -> &mut Scene {
        &mut self.current
    }

    fn next(&self) -> Option<&Scene> {
        self.next.as_ref()
    }

    fn swap(&mut self) -> Result<(), StageError> {
        let mut incoming = self.next.take().ok_or_else(|| {
            StageError::Configuration(format!(
                "scene '{}' has no next scene to swap to",
                self.current.id
            ))
        })?;

        self.current.exit();
        incoming.enter();
        let outgoing = std::mem::replace(&mut self.current, incoming);
        log::info!("scene swap: '{}' -> '{}'", outgoing.id, self.current.id);
        self.next = Some(outgoing);
        self.swaps += 1;
        Ok(())
    }
}
