//! Fade-out, swap, optional camera fly-in, fade-in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::manager::SceneSlot;
use crate::easing::Easing;
use crate::error::StageError;
use crate::pose::{Pose, wrap_angle};

/// Progress within this distance of 1.0 counts as complete.
const PROGRESS_EPSILON: f32 = 1e-5;

/// Phase of the transition sequencer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionState {
    /// Waiting for a trigger.
    #[default]
    Idle,
    /// Old scene fading out (opacity 1 -> 0).
    FadingOut,
    /// Fully faded; the scene and camera swap on the next tick.
    Swapping,
    /// Camera flying from its start position toward the focal object.
    FlyingIn,
    /// New scene fading in (opacity 0 -> 1).
    FadingIn,
}

/// Camera fly-in performed right after the swap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlyIn {
    /// Final camera position relative to the focal object.
    pub offset: Vec3,
    /// Extra rotation (radians per frame) applied to the focal object while flying.
    pub spin_speed: f32,
}

impl Default for FlyIn {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.0, 4.0),
            spin_speed: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct FlyPath {
    start: Vec3,
    end: Vec3,
    focus: Vec3,
    spin_speed: f32,
}

/// Output of one sequencer tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub state: TransitionState,
    /// Surface opacity for this frame.
    pub opacity: f32,
    /// True on the tick that swapped scenes.
    pub swapped: bool,
    /// True on the tick that returned to idle.
    pub completed: bool,
}

/// Drives one scene change at a time with frame-count based progress.
#[derive(Clone, Debug)]
pub struct TransitionSequencer {
    state: TransitionState,
    frames: u32,
    progress: f32,
    step: f32,
    easing: Easing,
    fly_in: Option<FlyIn>,
    armed_fly_in: Option<FlyIn>,
    path: Option<FlyPath>,
}

impl TransitionSequencer {
    /// `step` is the progress added per frame, in (0, 1].
    pub fn new(step: f32) -> Result<Self, StageError> {
        if !(step.is_finite() && step > 0.0 && step <= 1.0) {
            return Err(StageError::InvalidArgument {
                name: "step",
                value: step,
                expected: "a value in (0, 1]",
            });
        }
        Ok(Self {
            state: TransitionState::Idle,
            frames: 0,
            progress: 0.0,
            step,
            easing: Easing::Linear,
            fly_in: None,
            armed_fly_in: None,
            path: None,
        })
    }

    /// Easing applied to progress before it becomes opacity.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Fly-in used by [`trigger`](Self::trigger).
    pub fn fly_in(mut self, fly_in: Option<FlyIn>) -> Self {
        self.fly_in = fly_in;
        self
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// Whether the tracked object's pose belongs to the sequencer this frame.
    pub fn suspends_pose(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Swapping | TransitionState::FlyingIn
        )
    }

    /// Start a transition with the configured fly-in. Ignored unless idle.
    pub fn trigger(&mut self) -> bool {
        self.trigger_with(self.fly_in)
    }

    /// Start a transition with an explicit fly-in for this activation. Ignored unless idle.
    pub fn trigger_with(&mut self, fly_in: Option<FlyIn>) -> bool {
        if !self.is_idle() {
            log::trace!("transition trigger ignored while {:?}", self.state);
            return false;
        }
        self.armed_fly_in = fly_in;
        self.enter(TransitionState::FadingOut);
        true
    }

    /// Surface opacity as a function of state and progress.
    pub fn opacity(&self) -> f32 {
        let eased = self.easing.apply(self.progress);
        match self.state {
            TransitionState::Idle => 1.0,
            TransitionState::FadingOut | TransitionState::FlyingIn => 1.0 - eased,
            TransitionState::Swapping => 0.0,
            TransitionState::FadingIn => eased,
        }
    }

    /// Advance one frame, swapping scenes in `slots` when the fade-out has finished.
    ///
    /// A missing next scene is returned as a [`StageError::Configuration`] and the sequencer
    /// stays in `Swapping`.
    pub fn tick<S>(&mut self, slots: &mut S) -> Result<TransitionFrame, StageError>
    where
        S: SceneSlot + ?Sized,
    {
        let mut swapped = false;
        let mut completed = false;

        match self.state {
            TransitionState::Idle => {}
            TransitionState::FadingOut => {
                if self.advance() {
                    self.enter(TransitionState::Swapping);
                    self.progress = 1.0;
                }
            }
            TransitionState::Swapping => {
                slots.swap()?;
                swapped = true;
                match self.armed_fly_in.take() {
                    Some(fly_in) => {
                        let scene = slots.current();
                        let focus = scene.tracked_pose().map_or(Vec3::ZERO, |p| p.position);
                        self.path = Some(FlyPath {
                            start: scene.camera.position,
                            end: focus + fly_in.offset,
                            focus,
                            spin_speed: fly_in.spin_speed,
                        });
                        self.enter(TransitionState::FlyingIn);
                    }
                    None => self.enter(TransitionState::FadingIn),
                }
            }
            TransitionState::FlyingIn => {
                let done = self.advance();
                if let Some(path) = self.path {
                    fly(slots, &path, self.progress);
                }
                if done {
                    self.path = None;
                    self.enter(TransitionState::FadingIn);
                }
            }
            TransitionState::FadingIn => {
                if self.advance() {
                    self.progress = 1.0;
                    self.enter(TransitionState::Idle);
                    completed = true;
                }
            }
        }

        Ok(TransitionFrame {
            state: self.state,
            opacity: self.opacity(),
            swapped,
            completed,
        })
    }

    fn enter(&mut self, state: TransitionState) {
        log::info!("transition {:?} -> {:?}", self.state, state);
        self.state = state;
        self.frames = 0;
        self.progress = 0.0;
    }

    /// Add one frame of progress; true once the phase is complete.
    fn advance(&mut self) -> bool {
        self.frames += 1;
        self.progress = (self.frames as f32 * self.step).min(1.0);
        if self.progress >= 1.0 - PROGRESS_EPSILON {
            self.progress = 1.0;
            true
        } else {
            false
        }
    }
}

fn fly<S: SceneSlot + ?Sized>(slots: &mut S, path: &FlyPath, progress: f32) {
    let scene = slots.current_mut();
    scene.camera.position = path.start.lerp(path.end, progress);
    scene.camera.look_at(path.focus);

    let Some(entity) = scene.tracked else {
        return;
    };
    match scene.world.get::<&mut Pose>(entity) {
        Ok(mut pose) => pose.rotation.y = wrap_angle(pose.rotation.y + path.spin_speed),
        Err(e) => log::warn!(
            "fly-in spin skipped, tracked entity in scene '{}' has no pose: {e}",
            scene.id
        ),
    }
}
