//! Target selection for a tracked object: idle oscillation, hover pose and click-drag follow.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::ease_in_out;
use crate::error::{StageError, check_finite};
use crate::hover::HoverState;
use crate::input::PointerState;
use crate::pose::{Axis, Pose, PoseInterpolator};

/// Per-axis sine oscillator: `amplitude * sin(elapsed * speed)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Peak angle per axis, radians.
    pub amplitude: Vec3,
    /// Angular speed per axis, radians per second.
    pub speed: Vec3,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            amplitude: Vec3::new(0.15, 0.15, 0.30),
            speed: Vec3::new(1.0, 0.8, 0.5),
        }
    }
}

impl Oscillator {
    pub fn sample(&self, elapsed: f32) -> Vec3 {
        Vec3::new(
            self.amplitude.x * (elapsed * self.speed.x).sin(),
            self.amplitude.y * (elapsed * self.speed.y).sin(),
            self.amplitude.z * (elapsed * self.speed.z).sin(),
        )
    }
}

/// What the idle target rotation does while nothing hovers the object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum IdleMotion {
    /// Settle back to the idle pose's rotation.
    Reset,
    /// Sway around the idle rotation.
    Oscillate(Oscillator),
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self::Oscillate(Oscillator::default())
    }
}

/// The two poses a tracked object moves between.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPoseSet {
    pub idle: Pose,
    pub hovered: Pose,
}

impl TargetPoseSet {
    pub fn select(&self, hovering: bool) -> &Pose {
        if hovering { &self.hovered } else { &self.idle }
    }
}

/// Implicit interaction state of a tracked object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionMode {
    /// Nothing over it; idle target (possibly oscillating).
    #[default]
    Idle,
    /// Pointer over the detection volume; hovered target.
    Hover,
    /// Pressed on the object and dragging; the follow axis tracks the pointer.
    Follow,
}

/// Controller component for the tracked object of a scene.
#[derive(Clone, Debug)]
pub struct Motion {
    pub targets: TargetPoseSet,
    pub interpolator: PoseInterpolator,
    pub idle: IdleMotion,
    pub follow_axis: Axis,
    /// Follow-axis angle per unit of normalized pointer offset.
    pub follow_range: f32,
    crossfade_step: f32,
    crossfade: f32,
    mode: MotionMode,
}

impl Motion {
    pub fn new(targets: TargetPoseSet, interpolator: PoseInterpolator) -> Self {
        Self {
            targets,
            interpolator,
            idle: IdleMotion::default(),
            follow_axis: Axis::Y,
            follow_range: std::f32::consts::FRAC_PI_2,
            crossfade_step: 1.0,
            crossfade: 0.0,
            mode: MotionMode::Idle,
        }
    }

    pub fn idle_motion(mut self, idle: IdleMotion) -> Self {
        self.idle = idle;
        self
    }

    /// Axis driven by the pointer while dragging, and its angle per unit of pointer offset.
    pub fn follow(mut self, axis: Axis, range: f32) -> Result<Self, StageError> {
        self.follow_axis = axis;
        self.follow_range = check_finite("follow_range", range)?;
        Ok(self)
    }

    /// Per-frame change of the hover crossfade, in (0, 1].
    ///
    /// `1.0` switches targets instantly; smaller values blend the idle and hovered targets
    /// through [`ease_in_out`] over several frames.
    pub fn crossfade_step(mut self, step: f32) -> Result<Self, StageError> {
        if !(step.is_finite() && step > 0.0 && step <= 1.0) {
            return Err(StageError::InvalidArgument {
                name: "crossfade_step",
                value: step,
                expected: "a value in (0, 1]",
            });
        }
        self.crossfade_step = step;
        Ok(self)
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Current hover crossfade progress, 0 = idle target, 1 = hovered target.
    pub fn crossfade(&self) -> f32 {
        self.crossfade
    }

    /// Pick the target for this frame and step `pose` toward it.
    ///
    /// Returns the target used, so companions can follow the same scale. On error `pose` and the
    /// controller state are left untouched. The public tuning fields are re-checked every call.
    pub fn update(
        &mut self,
        pose: &mut Pose,
        hover: HoverState,
        pointer: &PointerState,
        elapsed: f32,
    ) -> Result<Pose, StageError> {
        check_finite("follow_range", self.follow_range)?;

        let mode = if hover.hovering && hover.latched && pointer.is_dragging() {
            MotionMode::Follow
        } else if hover.hovering {
            MotionMode::Hover
        } else {
            MotionMode::Idle
        };
        if mode != self.mode {
            log::debug!("tracked object {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }

        self.crossfade = if hover.hovering {
            (self.crossfade + self.crossfade_step).min(1.0)
        } else {
            (self.crossfade - self.crossfade_step).max(0.0)
        };

        let mut idle = self.targets.idle;
        if let IdleMotion::Oscillate(oscillator) = self.idle {
            idle.rotation += oscillator.sample(elapsed);
        }

        let mut target = lerp_pose(&idle, &self.targets.hovered, ease_in_out(self.crossfade));
        let axis = match mode {
            MotionMode::Follow => {
                let i = self.follow_axis.index();
                let offset = pointer.position();
                target.rotation[i] = match self.follow_axis {
                    Axis::X => -offset.y * self.follow_range,
                    Axis::Y | Axis::Z => offset.x * self.follow_range,
                };
                Some(self.follow_axis)
            }
            MotionMode::Idle | MotionMode::Hover => None,
        };

        *pose = self.interpolator.step(pose, &target, axis)?;
        Ok(target)
    }
}

fn lerp_pose(from: &Pose, to: &Pose, t: f32) -> Pose {
    Pose {
        scale: from.scale.lerp(to.scale, t),
        rotation: from.rotation.lerp(to.rotation, t),
        position: from.position.lerp(to.position, t),
    }
}

/// Marker for objects whose scale follows the tracked object's target scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleCompanion;
