//! A scene: camera, entity world and the two entities the stage reacts to.

use std::fmt;

use crate::camera::Camera;
use crate::orbit_camera::OrbitCamera;
use crate::pose::Pose;

/// Name a scene is logged and reported under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SceneId(String);

impl SceneId {
    pub fn new(name: impl Into<String>) -> Self {
        SceneId(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(name: &str) -> Self {
        SceneId::new(name)
    }
}

impl From<String> for SceneId {
    fn from(name: String) -> Self {
        SceneId(name)
    }
}

type Hook = Box<dyn FnMut()>;

/// A scene with its own camera and entity world.
///
/// The stage cares about two entities at most: the tracked object (hover-reactive, needs
/// [`Pose`], [`Collider`](crate::Collider) and [`Motion`](crate::Motion)) and the trigger label
/// whose click starts a transition. Everything else in the world is the renderer's business.
pub struct Scene {
    pub id: SceneId,
    /// Each scene keeps its own camera, so a fly-in in one never moves the other.
    pub camera: Camera,
    pub world: hecs::World,

    /// Hover-reactive object, if any.
    pub tracked: Option<hecs::Entity>,

    /// Clicking this entity starts a transition to the next scene.
    pub trigger: Option<hecs::Entity>,

    /// Orbit controls, driven once the scene is active and no transition is running.
    pub orbit: Option<OrbitCamera>,

    on_enter: Option<Hook>,
    on_exit: Option<Hook>,
}

impl Scene {
    pub fn new(id: impl Into<SceneId>, camera: Camera) -> Self {
        Self {
            id: id.into(),
            camera,
            world: hecs::World::new(),
            tracked: None,
            trigger: None,
            orbit: None,
            on_enter: None,
            on_exit: None,
        }
    }

    pub fn track(mut self, entity: hecs::Entity) -> Self {
        self.tracked = Some(entity);
        self
    }

    pub fn trigger_on(mut self, entity: hecs::Entity) -> Self {
        self.trigger = Some(entity);
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitCamera) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Set a callback to run when this scene becomes current.
    pub fn on_enter<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    /// Set a callback to run when this scene stops being current.
    pub fn on_exit<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// Current pose of the tracked object.
    pub fn tracked_pose(&self) -> Option<Pose> {
        let entity = self.tracked?;
        self.world.get::<&Pose>(entity).ok().map(|pose| *pose)
    }

    pub(crate) fn enter(&mut self) {
        self.on_enter.iter_mut().for_each(|hook| hook());
    }

    pub(crate) fn exit(&mut self) {
        self.on_exit.iter_mut().for_each(|hook| hook());
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("camera", &self.camera)
            .field("entities", &self.world.len())
            .field("tracked", &self.tracked)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}
