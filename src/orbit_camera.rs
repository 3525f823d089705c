use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::input::PointerState;

const ELEVATION_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Orbit control tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Fraction of the remaining angle closed per frame.
    pub damping: f32,
    /// Radians per unit of normalized pointer drag.
    pub sensitivity: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: 0.1,
            sensitivity: 1.5,
        }
    }
}

/// A damped camera controller that orbits around a target point.
///
/// Dragging moves the goal angles; the actual angles chase the goal by `damping` every frame.
///
/// # Example
/// ```
/// use hoverstage::{Camera, OrbitCamera, OrbitConfig, PointerState, Vec3};
///
/// let mut camera = Camera::new();
/// let mut orbit = OrbitCamera::new(OrbitConfig::default()).target(Vec3::ZERO);
/// orbit.sync_from(&camera);
///
/// // In the frame loop:
/// let pointer = PointerState::default();
/// orbit.update(&pointer);
/// orbit.apply(&mut camera);
/// ```
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle in radians (yaw).
    pub azimuth: f32,
    /// Vertical angle in radians (pitch), clamped away from the poles.
    pub elevation: f32,
    goal_azimuth: f32,
    goal_elevation: f32,
    config: OrbitConfig,
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            azimuth: 0.0,
            elevation: 0.0,
            goal_azimuth: 0.0,
            goal_elevation: 0.0,
            config,
        }
    }

    /// Set the target point to orbit around.
    pub fn target(mut self, target: impl Into<Vec3>) -> Self {
        self.target = target.into();
        self
    }

    /// Take distance and angles from where `camera` currently is, cancelling any pending drag.
    pub fn sync_from(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.distance = offset.length().max(f32::EPSILON);
        self.elevation = (offset.y / self.distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        self.azimuth = offset.x.atan2(offset.z);
        self.goal_azimuth = self.azimuth;
        self.goal_elevation = self.elevation;
    }

    /// Apply the frame's drag to the goal angles and chase them.
    pub fn update(&mut self, pointer: &PointerState) {
        if pointer.is_dragging() {
            let delta = pointer.delta();
            self.goal_azimuth -= delta.x * self.config.sensitivity;
            self.goal_elevation = (self.goal_elevation - delta.y * self.config.sensitivity)
                .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        }

        self.azimuth += (self.goal_azimuth - self.azimuth) * self.config.damping;
        self.elevation += (self.goal_elevation - self.elevation) * self.config.damping;
    }

    /// Place `camera` on the orbit, looking at the target.
    pub fn apply(&self, camera: &mut Camera) {
        // Spherical to Cartesian conversion
        let offset = Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.sin(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);
    }
}
