//! Ray picking against stage objects.
//!
//! This module provides the hit-testing half of hover detection:
//!
//! - [`Ray`]: pointer ray in world space
//! - [`Collider`]: box or sphere shape attached to scene entities
//! - [`HitVolume`]: anything a ray can be tested against
//! - [`DetectionVolume`]: a collider enlarged by a margin so small or moving objects are easier
//!   to target
//!
//! # Example
//!
//! ```
//! use hoverstage::{Camera, Collider, DetectionVolume, HitVolume, Projector, Vec2, Vec3};
//!
//! let camera = Camera::new();
//! let volume = DetectionVolume::new(Collider::box_collider(Vec3::splat(2.0)), 1.2).unwrap();
//!
//! let ray = camera.project_ray(Vec2::ZERO);
//! assert!(!volume.intersect(&ray).is_empty());
//! ```

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{StageError, check_positive};
use crate::pose::Pose;

/// Half-line cast from the camera through the pointer.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length, or zero for a degenerate ray that hits nothing.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Unproject an NDC point through `projection * view`.
    ///
    /// The origin lies on the near clip plane (z = 0) and the ray passes through the matching
    /// point on the far clip plane (z = 1).
    pub fn from_ndc(ndc: Vec2, view_matrix: Mat4, projection_matrix: Mat4) -> Self {
        let clip_to_world = (projection_matrix * view_matrix).inverse();
        let unproject = |depth: f32| {
            let p = clip_to_world * Vec4::new(ndc.x, ndc.y, depth, 1.0);
            p.truncate() / p.w
        };

        let near = unproject(0.0);
        Self::new(near, unproject(1.0) - near)
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the entry distance, or the exit distance when the origin is inside the box.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let (mut enter, mut exit) = (f32::NEG_INFINITY, f32::INFINITY);

        for axis in 0..3 {
            let (o, d) = (self.origin[axis], self.direction[axis]);
            if d.abs() < f32::EPSILON {
                if !(min[axis]..=max[axis]).contains(&o) {
                    return None;
                }
                continue;
            }

            let (a, b) = ((min[axis] - o) / d, (max[axis] - o) / d);
            enter = enter.max(a.min(b));
            exit = exit.min(a.max(b));
            if enter > exit {
                return None;
            }
        }

        first_ahead(enter, exit)
    }

    /// Nearest sphere crossing in front of the origin.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_origin = self.origin - center;
        let half_b = to_origin.dot(self.direction);
        let disc = half_b * half_b - (to_origin.length_squared() - radius * radius);
        if disc < 0.0 {
            return None;
        }

        let root = disc.sqrt();
        first_ahead(-half_b - root, -half_b + root)
    }
}

fn first_ahead(near: f32, far: f32) -> Option<f32> {
    [near, far].into_iter().find(|t| *t > 0.0)
}

/// Pickable shape of an entity.
///
/// Rotation is ignored, so boxes are always axis aligned.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    /// Box from its full width, height and depth.
    pub fn box_collider(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Distance along `ray` to this shape placed at `position` and grown by `scale`.
    ///
    /// Spheres use the mean of the three scale components.
    pub fn intersect(&self, ray: &Ray, position: Vec3, scale: Vec3) -> Option<f32> {
        match *self {
            Collider::Box { half_extents } => {
                let half = half_extents * scale;
                ray.intersect_aabb(position - half, position + half)
            }
            Collider::Sphere { radius } => {
                ray.intersect_sphere(position, radius * scale.element_sum() / 3.0)
            }
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::box_collider(Vec3::ONE)
    }
}

/// A ray intersection.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// The entity that was hit, when the test ran against a world.
    pub entity: Option<hecs::Entity>,
    /// Distance from ray origin to the hit point.
    pub distance: f32,
    /// World-space position of the hit point.
    pub point: Vec3,
}

/// Something a picking ray can be tested against.
pub trait HitVolume {
    /// All intersections, nearest first. An empty list is a normal miss.
    fn intersect(&self, ray: &Ray) -> Vec<RayHit>;
}

/// A collider enlarged by a margin factor, used as the hover target for a tracked object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionVolume {
    pub collider: Collider,
    pub center: Vec3,
    pub scale: Vec3,
    margin: f32,
}

impl DetectionVolume {
    /// Wrap a collider centered at the origin; `margin` of 1.2 makes it 20% larger.
    pub fn new(collider: Collider, margin: f32) -> Result<Self, StageError> {
        Ok(Self {
            collider,
            center: Vec3::ZERO,
            scale: Vec3::ONE,
            margin: check_positive("margin", margin)?,
        })
    }

    /// Build a volume around an object's current pose.
    ///
    /// With `follow_scale` off the volume keeps the collider's base size and only tracks position.
    pub fn around(
        collider: Collider,
        pose: &Pose,
        margin: f32,
        follow_scale: bool,
    ) -> Result<Self, StageError> {
        let mut volume = Self::new(collider, margin)?.at(pose.position);
        if follow_scale {
            volume.scale = pose.scale;
        }
        Ok(volume)
    }

    pub fn at(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl HitVolume for DetectionVolume {
    fn intersect(&self, ray: &Ray) -> Vec<RayHit> {
        self.collider
            .intersect(ray, self.center, self.scale * self.margin)
            .map(|distance| RayHit {
                entity: None,
                distance,
                point: ray.point_at(distance),
            })
            .into_iter()
            .collect()
    }
}

/// Cast a ray against every entity with both a [`Pose`] and a [`Collider`].
///
/// Returns all hits sorted by distance (closest first).
pub fn raycast_all(world: &hecs::World, ray: &Ray) -> Vec<RayHit> {
    let mut hits = Vec::new();

    for (entity, (pose, collider)) in world.query::<(&Pose, &Collider)>().iter() {
        if let Some(distance) = collider.intersect(ray, pose.position, pose.scale) {
            hits.push(RayHit {
                entity: Some(entity),
                distance,
                point: ray.point_at(distance),
            });
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Cast a ray and return the closest hit.
pub fn raycast(world: &hecs::World, ray: &Ray) -> Option<RayHit> {
    raycast_all(world, ray).into_iter().next()
}
