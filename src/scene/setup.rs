//! The two demo scenes: the glass cube with its "Start" label, and the model viewer.

use glam::Vec3;

use super::manager::SceneSlots;
use super::scene::Scene;
use crate::config::StageConfig;
use crate::error::StageError;
use crate::motion::{IdleMotion, ScaleCompanion};
use crate::orbit_camera::OrbitCamera;
use crate::picking::Collider;
use crate::pose::Pose;

/// Text drawn for an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label(pub String);

pub const CUBE_SCENE: &str = "cube";
pub const VIEWER_SCENE: &str = "viewer";

/// 2×2×2 cube with a unit sphere inside and a clickable "Start" label below it.
pub fn cube_scene(config: &StageConfig) -> Result<Scene, StageError> {
    let mut scene = Scene::new(CUBE_SCENE, config.camera());

    let rest = Pose::default();
    let cube = scene.world.spawn((
        rest,
        Collider::box_collider(Vec3::splat(2.0)),
        config.motion(rest)?,
    ));
    scene.world.spawn((Pose::default(), ScaleCompanion));
    let start = scene.world.spawn((
        Pose::at(Vec3::new(0.0, -2.2, 0.0)),
        Collider::box_collider(Vec3::new(1.6, 0.4, 0.2)),
        Label("Start".to_string()),
    ));

    Ok(scene.track(cube).trigger_on(start))
}

/// Model viewer: a tracked model placeholder, viewed from further back, with orbit controls.
pub fn viewer_scene(config: &StageConfig) -> Result<Scene, StageError> {
    let camera = config
        .camera()
        .at(Vec3::new(0.0, 1.5, 10.0))
        .looking_at(Vec3::ZERO);
    let mut scene = Scene::new(VIEWER_SCENE, camera);

    let rest = Pose::default();
    let model = scene.world.spawn((
        rest,
        Collider::box_collider(Vec3::splat(1.5)),
        config.motion(rest)?.idle_motion(IdleMotion::Reset),
        Label("Model".to_string()),
    ));

    let mut orbit = OrbitCamera::new(config.orbit).target(rest.position);
    orbit.sync_from(&scene.camera);
    Ok(scene.track(model).with_orbit(orbit))
}

/// Cube scene first, viewer next.
pub fn demo_slots(config: &StageConfig) -> Result<SceneSlots, StageError> {
    config.validate()?;
    Ok(SceneSlots::new(
        cube_scene(config)?,
        Some(viewer_scene(config)?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneSlot;

    #[test]
    fn cube_scene_wires_tracked_object_and_trigger() {
        let scene = cube_scene(&StageConfig::default()).unwrap();
        let tracked = scene.tracked.unwrap();
        let trigger = scene.trigger.unwrap();
        assert_ne!(tracked, trigger);
        assert!(scene.world.get::<&crate::Motion>(tracked).is_ok());
        assert_eq!(
            scene.world.get::<&Label>(trigger).unwrap().0,
            "Start".to_string()
        );
        assert_eq!(scene.world.query::<&ScaleCompanion>().iter().count(), 1);
    }

    #[test]
    fn demo_starts_on_the_cube() {
        let slots = demo_slots(&StageConfig::default()).unwrap();
        assert_eq!(slots.current().id.as_str(), CUBE_SCENE);
        let viewer = slots.next().unwrap();
        assert_eq!(viewer.id.as_str(), VIEWER_SCENE);
        assert!(viewer.orbit.is_some());
        assert!(viewer.trigger.is_none());
    }
}
