//! Per-frame hover detection with press latching.
//!
//! The pointer ray is tested against an enlarged detection volume. A press that lands on the
//! volume latches hover on: while the button stays down the ray is ignored, so dragging off the
//! object does not drop it. Releasing re-tests the ray immediately.

use crate::camera::Projector;
use crate::input::PointerState;
use crate::picking::HitVolume;

/// Hover flag plus the press latch that pins it.
///
/// While `latched` is true `hovering` is true and cannot change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    pub hovering: bool,
    pub latched: bool,
}

/// Tracks hover for a single object across frames.
#[derive(Clone, Debug, Default)]
pub struct HoverDetector {
    state: HoverState,
}

impl HoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Drop any hover or latch, e.g. after the tracked object changes.
    pub fn reset(&mut self) {
        self.state = HoverState::default();
    }

    /// Cast the pointer ray and fold the result into the hover state.
    pub fn update<P, V>(&mut self, pointer: &PointerState, projector: &P, volume: &V) -> HoverState
    where
        P: Projector + ?Sized,
        V: HitVolume + ?Sized,
    {
        let ray = projector.project_ray(pointer.position());
        let hit = !volume.intersect(&ray).is_empty();
        self.apply(pointer.pressed(), pointer.released(), hit)
    }

    /// Fold one frame's button edges and ray result into the hover state.
    ///
    /// A press and a release in the same frame are applied in that order.
    pub fn apply(&mut self, pressed: bool, released: bool, hit: bool) -> HoverState {
        let before = self.state;

        if pressed && hit {
            if !self.state.latched {
                log::debug!("press latched on tracked object");
            }
            self.state = HoverState {
                hovering: true,
                latched: true,
            };
        }

        if released && self.state.latched {
            self.state.latched = false;
            self.state.hovering = hit;
            log::debug!("press released, hovering = {hit}");
        } else if !self.state.latched {
            self.state.hovering = hit;
        }

        if before.hovering != self.state.hovering {
            if self.state.hovering {
                log::debug!("pointer over tracked object");
            } else {
                log::debug!("pointer left tracked object");
            }
        }

        self.state
    }
}
