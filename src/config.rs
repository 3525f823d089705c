//! Stage tuning, loadable from RON.
//!
//! Every value that used to differ between hand-tuned variants of the demo (fade speed, hover
//! scale, rotation targets, detection margin) lives here instead of in code.
//!
//! ```
//! use hoverstage::StageConfig;
//!
//! let config = StageConfig::from_ron_str("(hover: (margin: 1.5), transition: (step: 0.01))").unwrap();
//! assert_eq!(config.hover.margin, 1.5);
//! assert_eq!(config.motion.scale_factor, 0.1);
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::easing::Easing;
use crate::error::{StageError, check_finite, check_positive, check_unit_factor};
use crate::motion::{IdleMotion, Motion, TargetPoseSet};
use crate::orbit_camera::OrbitConfig;
use crate::pose::{Axis, Pose, PoseInterpolator};
use crate::scene::{FlyIn, TransitionSequencer};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub hover: HoverConfig,
    pub motion: MotionConfig,
    pub transition: TransitionConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Detection volume size relative to the tracked object's collider.
    pub margin: f32,
    /// Grow the detection volume with the object's animated scale.
    pub follow_scale: bool,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            margin: 1.2,
            follow_scale: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub scale_factor: f32,
    pub rotation_factor: f32,
    pub position_factor: f32,
    pub hovered_scale: f32,
    pub hovered_rotation: Vec3,
    pub hovered_position: Vec3,
    pub idle: IdleMotion,
    /// Per-frame hover crossfade change; 1.0 switches targets instantly.
    pub crossfade_step: f32,
    pub follow_axis: Axis,
    pub follow_range: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            scale_factor: 0.1,
            rotation_factor: 0.1,
            position_factor: 0.1,
            hovered_scale: 1.25,
            // Tilts the cube so its lower-left corner faces the viewer.
            hovered_rotation: Vec3::new(0.6155, std::f32::consts::FRAC_PI_4, 0.0),
            hovered_position: Vec3::ZERO,
            idle: IdleMotion::default(),
            crossfade_step: 1.0,
            follow_axis: Axis::Y,
            follow_range: std::f32::consts::FRAC_PI_2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Progress added per frame in every phase.
    pub step: f32,
    pub easing: Easing,
    pub fly_in: Option<FlyIn>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            step: 0.02,
            easing: Easing::Linear,
            fly_in: Some(FlyIn::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub position: Vec3,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl StageConfig {
    /// Parse and validate a RON document. Missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, StageError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StageError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source)?;
        log::info!("loaded stage config from {}", path.display());
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, StageError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| StageError::Configuration(format!("cannot serialize config: {e}")))
    }

    /// Check every factor and size before anything is built from the config.
    pub fn validate(&self) -> Result<(), StageError> {
        check_positive("margin", self.hover.margin)?;
        check_unit_factor("scale_factor", self.motion.scale_factor)?;
        check_unit_factor("rotation_factor", self.motion.rotation_factor)?;
        check_unit_factor("position_factor", self.motion.position_factor)?;
        check_positive("hovered_scale", self.motion.hovered_scale)?;
        check_finite("follow_range", self.motion.follow_range)?;
        for v in [self.motion.hovered_rotation, self.motion.hovered_position] {
            check_finite_vec("hovered pose", v)?;
        }
        if self.transition.step > 1.0 {
            return Err(StageError::InvalidArgument {
                name: "step",
                value: self.transition.step,
                expected: "a value in (0, 1]",
            });
        }
        check_positive("step", self.transition.step)?;
        if let Some(fly_in) = self.transition.fly_in {
            check_finite_vec("fly_in.offset", fly_in.offset)?;
            check_finite("fly_in.spin_speed", fly_in.spin_speed)?;
        }
        check_positive("fov_degrees", self.camera.fov_degrees)?;
        check_positive("near", self.camera.near)?;
        check_positive("aspect", self.camera.aspect)?;
        if self.camera.far <= self.camera.near {
            return Err(StageError::InvalidArgument {
                name: "far",
                value: self.camera.far,
                expected: "greater than near",
            });
        }
        check_unit_factor("orbit.damping", self.orbit.damping)?;
        check_finite("orbit.sensitivity", self.orbit.sensitivity)?;
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new()
            .at(self.camera.position)
            .with_fov(self.camera.fov_degrees)
            .with_aspect(self.camera.aspect);
        camera.near = self.camera.near;
        camera.far = self.camera.far;
        camera
    }

    pub fn interpolator(&self) -> Result<PoseInterpolator, StageError> {
        PoseInterpolator::new(
            self.motion.scale_factor,
            self.motion.rotation_factor,
            self.motion.position_factor,
        )
    }

    /// Motion controller for a tracked object resting at `idle`.
    pub fn motion(&self, idle: Pose) -> Result<Motion, StageError> {
        let hovered = Pose {
            scale: idle.scale * self.motion.hovered_scale,
            rotation: idle.rotation + self.motion.hovered_rotation,
            position: idle.position + self.motion.hovered_position,
        };
        Motion::new(TargetPoseSet { idle, hovered }, self.interpolator()?)
            .idle_motion(self.motion.idle)
            .follow(self.motion.follow_axis, self.motion.follow_range)?
            .crossfade_step(self.motion.crossfade_step)
    }

    pub fn sequencer(&self) -> Result<TransitionSequencer, StageError> {
        Ok(TransitionSequencer::new(self.transition.step)?
            .easing(self.transition.easing)
            .fly_in(self.transition.fly_in))
    }
}

fn check_finite_vec(name: &'static str, value: Vec3) -> Result<Vec3, StageError> {
    for component in value.to_array() {
        check_finite(name, component)?;
    }
    Ok(value)
}
