use glam::{Mat4, Vec2, Vec3};

use crate::error::{StageError, check_positive};
use crate::picking::Ray;

/// Anything that can turn a normalized pointer position into a world-space ray.
pub trait Projector {
    /// Project a ray through normalized device coordinates (x, y in [-1, 1], y up).
    fn project_ray(&self, ndc: Vec2) -> Ray;
}

/// A perspective camera for a stage scene.
///
/// Provides position, orientation, field of view and the clip planes needed to build
/// view and projection matrices for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // vertical, radians
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn looking_at(mut self, target: impl Into<Vec3>) -> Self {
        self.look_at(target.into());
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Turn the camera toward a world-space point, keeping its position.
    pub fn look_at(&mut self, target: Vec3) {
        self.forward = (target - self.position).normalize_or(self.forward);
    }

    /// Set the aspect ratio from a viewport size; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the right vector from forward and up.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Width and height of the visible area on a plane `depth` units in front of the camera.
    pub fn plane_size_at(&self, depth: f32) -> Vec2 {
        let height = 2.0 * (self.fov * 0.5).tan() * depth;
        Vec2::new(height * self.aspect, height)
    }

    /// Set the vertical fov so that `height` world units at `distance` fill the view exactly.
    pub fn fit_height(&mut self, distance: f32, height: f32) -> Result<(), StageError> {
        let distance = check_positive("distance", distance)?;
        let height = check_positive("height", height)?;
        self.fov = 2.0 * (height / (2.0 * distance)).atan();
        Ok(())
    }
}

impl Projector for Camera {
    fn project_ray(&self, ndc: Vec2) -> Ray {
        Ray::from_ndc(ndc, self.view_matrix(), self.projection_matrix())
    }
}
