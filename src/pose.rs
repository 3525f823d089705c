//! Poses and per-frame exponential smoothing toward a target pose.
//!
//! Every frame each channel closes a fixed fraction of the remaining gap to its target:
//!
//! ```text
//! current += (target - current) * factor
//! ```
//!
//! With `factor` in (0, 1) this never overshoots and converges faster the further away the
//! value is. Rotation components are clamped to [-π, π] after every step.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{StageError, check_unit_factor};

/// Scale, Euler rotation (radians, XYZ) and position of a stage object.
///
/// Stored as a component on scene entities; only the pose interpolator and the transition
/// sequencer write it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub scale: Vec3,
    pub rotation: Vec3,
    pub position: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Pose {
    /// Identity pose placed at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Move one step toward `target`, closing `factor` of the gap on every channel.
    ///
    /// With `axis` set only that rotation axis is smoothed; the other two snap straight to the
    /// target. Scale and position are always smoothed on all three components.
    pub fn step_toward(
        &self,
        target: &Pose,
        factor: f32,
        axis: Option<Axis>,
    ) -> Result<Pose, StageError> {
        PoseInterpolator::uniform(factor)?.step(self, target, axis)
    }
}

/// A single rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.name() == s)
            .ok_or_else(|| StageError::InvalidAxis(s.to_string()))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-channel smoothing factors, each the fraction of the remaining gap closed per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseInterpolator {
    scale_factor: f32,
    rotation_factor: f32,
    position_factor: f32,
}

impl PoseInterpolator {
    pub fn new(
        scale_factor: f32,
        rotation_factor: f32,
        position_factor: f32,
    ) -> Result<Self, StageError> {
        Ok(Self {
            scale_factor: check_unit_factor("scale_factor", scale_factor)?,
            rotation_factor: check_unit_factor("rotation_factor", rotation_factor)?,
            position_factor: check_unit_factor("position_factor", position_factor)?,
        })
    }

    /// Same factor on every channel.
    pub fn uniform(factor: f32) -> Result<Self, StageError> {
        let factor = check_unit_factor("factor", factor)?;
        Ok(Self {
            scale_factor: factor,
            rotation_factor: factor,
            position_factor: factor,
        })
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn rotation_factor(&self) -> f32 {
        self.rotation_factor
    }

    pub fn position_factor(&self) -> f32 {
        self.position_factor
    }

    /// Advance `current` one frame toward `target`.
    pub fn step(
        &self,
        current: &Pose,
        target: &Pose,
        axis: Option<Axis>,
    ) -> Result<Pose, StageError> {
        let mut next = *current;
        next.scale = lerp_step(current.scale, target.scale, self.scale_factor);
        next.position = lerp_step(current.position, target.position, self.position_factor);
        next.rotation = match axis {
            None => lerp_step(current.rotation, target.rotation, self.rotation_factor),
            Some(axis) => {
                let i = axis.index();
                let mut rotation = target.rotation;
                rotation[i] = current.rotation[i]
                    + (target.rotation[i] - current.rotation[i]) * self.rotation_factor;
                rotation
            }
        };
        next.rotation = clamp_rotation(next.rotation);
        Ok(next)
    }

    /// Like [`step`](Self::step) with the axis given by name (`"x"`, `"y"` or `"z"`).
    pub fn step_named(
        &self,
        current: &Pose,
        target: &Pose,
        axis: &str,
    ) -> Result<Pose, StageError> {
        let axis = axis.parse::<Axis>()?;
        self.step(current, target, Some(axis))
    }
}

fn lerp_step(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// Clamp every Euler component into [-π, π].
pub fn clamp_rotation(rotation: Vec3) -> Vec3 {
    rotation.clamp(Vec3::splat(-PI), Vec3::splat(PI))
}

/// Wrap an angle into [-π, π], for free-running spins that must not stall at the clamp.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_closes_factor_of_the_gap() {
        let current = Pose::at(Vec3::ZERO);
        let target = Pose::at(Vec3::new(10.0, 0.0, 0.0));
        let next = current.step_toward(&target, 0.1, None).unwrap();
        assert_eq!(next.position.x, 1.0);
    }

    #[test]
    fn repeated_steps_converge_monotonically() {
        let target = Pose::default()
            .scale(Vec3::splat(1.25))
            .rotation(Vec3::new(0.6, -0.8, 0.2))
            .position(Vec3::new(-2.0, 1.0, 3.0));
        let interpolator = PoseInterpolator::new(0.1, 0.05, 0.2).unwrap();

        let mut pose = Pose::default();
        let mut gap = f32::INFINITY;
        for _ in 0..200 {
            pose = interpolator.step(&pose, &target, None).unwrap();
            let next_gap = (pose.scale - target.scale).length()
                + (pose.rotation - target.rotation).length()
                + (pose.position - target.position).length();
            assert!(next_gap < gap);
            gap = next_gap;
        }
        assert!(gap < 1e-3);
    }

    #[test]
    fn axis_step_snaps_the_other_rotation_axes() {
        let current = Pose::default().rotation(Vec3::new(0.5, 0.5, 0.5));
        let target = Pose::default().rotation(Vec3::new(-0.2, 1.5, 0.3));

        let next = current.step_toward(&target, 0.1, Some(Axis::Y)).unwrap();
        assert_eq!(next.rotation.x, -0.2);
        assert_eq!(next.rotation.z, 0.3);
        assert!((next.rotation.y - (0.5 + 0.1 * 1.0)).abs() < 1e-6);
    }

    #[test]
    fn rotation_is_clamped_after_each_step() {
        let current = Pose::default().rotation(Vec3::new(7.0, -9.0, 3.0));
        let target = Pose::default().rotation(Vec3::new(12.0, -12.0, 4.0));
        let next = current.step_toward(&target, 0.5, None).unwrap();
        assert_eq!(next.rotation, Vec3::new(PI, -PI, PI));
    }

    #[test]
    fn bad_factor_and_axis_are_argument_faults() {
        let pose = Pose::default();
        assert!(matches!(
            pose.step_toward(&pose, 1.0, None),
            Err(StageError::InvalidArgument { .. })
        ));
        assert!(matches!(
            PoseInterpolator::new(0.1, 0.0, 0.1),
            Err(StageError::InvalidArgument {
                name: "rotation_factor",
                ..
            })
        ));

        let interpolator = PoseInterpolator::uniform(0.1).unwrap();
        assert!(matches!(
            interpolator.step_named(&pose, &pose, "w"),
            Err(StageError::InvalidAxis(name)) if name == "w"
        ));
        assert!(interpolator.step_named(&pose, &pose, "z").is_ok());
    }

    #[test]
    fn axis_names_parse_back() {
        for axis in Axis::ALL {
            assert_eq!(axis.to_string().parse::<Axis>().unwrap(), axis);
        }
        assert!(matches!("Y".parse::<Axis>(), Err(StageError::InvalidAxis(_))));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(PI + 0.5) - (-PI + 0.5)).abs() < 1e-5);
        assert!((wrap_angle(-PI - 0.5) - (PI - 0.5)).abs() < 1e-5);
        assert_eq!(wrap_angle(0.25), 0.25);
    }
}
