use crate::camera::Projector;
use crate::config::{HoverConfig, StageConfig};
use crate::error::StageError;
use crate::hover::{HoverDetector, HoverState};
use crate::input::PointerState;
use crate::motion::{Motion, MotionMode, ScaleCompanion};
use crate::picking::{Collider, DetectionVolume, raycast};
use crate::pose::Pose;
use crate::render::RenderSurface;
use crate::scene::{SceneId, SceneSlot, SceneSlots, TransitionSequencer, TransitionState};

/// What one frame tick did.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub scene: SceneId,
    pub hover: HoverState,
    /// Tracked object mode, `None` when the pose was not updated this frame.
    pub mode: Option<MotionMode>,
    pub transition: TransitionState,
    pub opacity: f32,
    /// Pose of the tracked object after the tick.
    pub pose: Option<Pose>,
}

/// Per-frame orchestration: hover detection, pose smoothing, transitions and presentation.
///
/// One call to [`tick`](Self::tick) runs a whole frame to completion. Input handlers write into
/// a [`PointerState`] between ticks; the loop only reads it.
///
/// # Example
///
/// ```
/// use hoverstage::{AnimationLoop, Camera, PointerState, RenderSurface, StageConfig};
/// use hoverstage::scene::{Scene, demo_slots};
///
/// struct Headless;
///
/// impl RenderSurface for Headless {
///     fn set_opacity(&mut self, _opacity: f32) {}
///     fn present(&mut self, _scene: &Scene, _camera: &Camera) {}
/// }
///
/// let config = StageConfig::default();
/// let slots = demo_slots(&config).unwrap();
/// let mut stage = AnimationLoop::new(slots, &config, Headless).unwrap();
///
/// let mut pointer = PointerState::new(1280, 720);
/// let report = stage.tick(&pointer, 1.0 / 60.0).unwrap();
/// pointer.begin_frame();
///
/// assert!(report.hover.hovering); // pointer starts at the centre, over the cube
/// ```
pub struct AnimationLoop<R: RenderSurface> {
    slots: SceneSlots,
    sequencer: TransitionSequencer,
    hover: HoverDetector,
    hover_config: HoverConfig,
    surface: R,
    elapsed: f32,
}

impl<R: RenderSurface> AnimationLoop<R> {
    pub fn new(slots: SceneSlots, config: &StageConfig, surface: R) -> Result<Self, StageError> {
        config.validate()?;
        Ok(Self {
            slots,
            sequencer: config.sequencer()?,
            hover: HoverDetector::new(),
            hover_config: config.hover,
            surface,
            elapsed: 0.0,
        })
    }

    pub fn slots(&self) -> &SceneSlots {
        &self.slots
    }

    pub fn sequencer(&self) -> &TransitionSequencer {
        &self.sequencer
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// Seconds of ticked time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Start a transition as if the trigger had been clicked. Ignored while one is running.
    pub fn trigger(&mut self) -> bool {
        self.sequencer.trigger()
    }

    /// Viewport changed: update camera aspect ratios, leaving poses and transition progress alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.slots.set_viewport(width, height);
    }

    /// Run one frame.
    ///
    /// Recoverable faults in the tracked object's update are logged and that frame's pose update
    /// is skipped; configuration faults (such as a swap with no next scene) are returned.
    pub fn tick(&mut self, pointer: &PointerState, dt: f32) -> Result<FrameReport, StageError> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.sequencer.is_idle() && pointer.pressed() && self.trigger_clicked(pointer) {
            log::info!("trigger clicked in scene '{}'", self.slots.current().id);
            self.sequencer.trigger();
        }

        let frame = self.sequencer.tick(&mut self.slots)?;
        if frame.swapped {
            self.hover.reset();
        }
        if frame.completed {
            let scene = self.slots.current_mut();
            if let Some(orbit) = scene.orbit.as_mut() {
                orbit.sync_from(&scene.camera);
            }
        }

        let mode = if self.sequencer.suspends_pose() {
            None
        } else {
            match self.update_tracked(pointer) {
                Ok(mode) => mode,
                Err(e) if e.is_recoverable() => {
                    log::warn!("skipping pose update this frame: {e}");
                    None
                }
                Err(e) => return Err(e),
            }
        };

        if self.sequencer.is_idle() && !self.hover.state().latched {
            let scene = self.slots.current_mut();
            if let Some(orbit) = scene.orbit.as_mut() {
                orbit.update(pointer);
                orbit.apply(&mut scene.camera);
            }
        }

        let scene = self.slots.current();
        self.surface.set_opacity(frame.opacity);
        self.surface.present(scene, &scene.camera);

        Ok(FrameReport {
            scene: scene.id.clone(),
            hover: self.hover.state(),
            mode,
            transition: frame.state,
            opacity: frame.opacity,
            pose: scene.tracked_pose(),
        })
    }

    fn trigger_clicked(&self, pointer: &PointerState) -> bool {
        let scene = self.slots.current();
        let Some(trigger) = scene.trigger else {
            return false;
        };
        let ray = scene.camera.project_ray(pointer.position());
        raycast(&scene.world, &ray).and_then(|hit| hit.entity) == Some(trigger)
    }

    fn update_tracked(&mut self, pointer: &PointerState) -> Result<Option<MotionMode>, StageError> {
        let scene = self.slots.current_mut();
        let Some(entity) = scene.tracked else {
            return Ok(None);
        };

        let (pose, collider, motion) = scene
            .world
            .query_one_mut::<(&mut Pose, &Collider, &mut Motion)>(entity)
            .map_err(|e| {
                StageError::Configuration(format!(
                    "tracked entity in scene '{}' is unusable: {e}",
                    scene.id
                ))
            })?;

        let volume = DetectionVolume::around(
            *collider,
            pose,
            self.hover_config.margin,
            self.hover_config.follow_scale,
        )?;
        let hover = self.hover.update(pointer, &scene.camera, &volume);
        let target = motion.update(pose, hover, pointer, self.elapsed)?;
        let mode = motion.mode();
        let factor = motion.interpolator.scale_factor();

        for (_, (companion, _)) in scene.world.query_mut::<(&mut Pose, &ScaleCompanion)>() {
            companion.scale += (target.scale - companion.scale) * factor;
        }

        Ok(Some(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::{Scene, demo_slots};
    use glam::{Vec2, Vec3};

    #[derive(Default)]
    struct Recorder {
        opacities: Vec<f32>,
        presented: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn set_opacity(&mut self, opacity: f32) {
            self.opacities.push(opacity);
        }

        fn present(&mut self, scene: &Scene, _camera: &Camera) {
            self.presented.push(scene.id.to_string());
        }
    }

    fn stage() -> AnimationLoop<Recorder> {
        let config = StageConfig::default();
        AnimationLoop::new(demo_slots(&config).unwrap(), &config, Recorder::default()).unwrap()
    }

    #[test]
    fn hovering_grows_cube_and_companion() {
        let mut stage = stage();
        let pointer = PointerState::default();

        let report = stage.tick(&pointer, 0.016).unwrap();
        assert!(report.hover.hovering);
        assert_eq!(report.mode, Some(MotionMode::Hover));
        assert!((report.pose.unwrap().scale.x - 1.025).abs() < 1e-5);

        let scene = stage.slots().current();
        let mut companions = scene.world.query::<(&Pose, &ScaleCompanion)>();
        let (_, (sphere, _)) = companions.iter().next().unwrap();
        assert!((sphere.scale.x - 1.025).abs() < 1e-5);
    }

    #[test]
    fn every_frame_is_presented_at_full_opacity_when_idle() {
        let mut stage = stage();
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(0.95, 0.95));

        for _ in 0..3 {
            let report = stage.tick(&pointer, 0.25).unwrap();
            assert!(!report.hover.hovering);
            assert_eq!(report.mode, Some(MotionMode::Idle));
        }
        assert_eq!(stage.surface().opacities, vec![1.0; 3]);
        assert_eq!(stage.surface().presented.len(), 3);
        assert_eq!(stage.elapsed(), 0.75);
    }

    #[test]
    fn clicking_the_label_starts_the_transition() {
        let mut stage = stage();
        let mut pointer = PointerState::default();

        let label = Vec3::new(0.0, -2.2, 0.0);
        let camera = stage.slots().current().camera;
        let clip = camera.projection_matrix() * camera.view_matrix() * label.extend(1.0);
        pointer.move_to(Vec2::new(clip.x / clip.w, clip.y / clip.w));
        pointer.button(true);

        let report = stage.tick(&pointer, 0.016).unwrap();
        assert_eq!(report.transition, TransitionState::FadingOut);
        assert!(report.opacity < 1.0);
    }

    #[test]
    fn clicking_elsewhere_does_nothing() {
        let mut stage = stage();
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(-0.9, 0.9));
        pointer.button(true);

        let report = stage.tick(&pointer, 0.016).unwrap();
        assert_eq!(report.transition, TransitionState::Idle);
    }

    #[test]
    fn resize_does_not_reset_transition_progress() {
        let mut stage = stage();
        let pointer = PointerState::default();
        stage.trigger();
        stage.tick(&pointer, 0.016).unwrap();
        let progress = stage.sequencer().progress();

        stage.resize(640, 640);
        assert_eq!(stage.sequencer().progress(), progress);
        assert_eq!(stage.slots().current().camera.aspect, 1.0);
    }

    #[test]
    fn recoverable_fault_skips_one_frame_and_keeps_the_pose() {
        let mut stage = stage();
        let pointer = PointerState::default();
        let before = stage.tick(&pointer, 0.016).unwrap().pose.unwrap();

        let scene = stage.slots.current_mut();
        let tracked = scene.tracked.unwrap();
        scene.world.get::<&mut Motion>(tracked).unwrap().follow_range = f32::NAN;

        let report = stage.tick(&pointer, 0.016).unwrap();
        assert_eq!(report.mode, None);
        assert_eq!(report.pose, Some(before));
        assert_eq!(stage.surface().presented.len(), 2);

        let scene = stage.slots.current_mut();
        scene.world.get::<&mut Motion>(tracked).unwrap().follow_range = 1.0;
        let report = stage.tick(&pointer, 0.016).unwrap();
        assert_eq!(report.mode, Some(MotionMode::Hover));
        assert!(report.pose.unwrap().scale.x > before.scale.x);
    }

    #[test]
    fn tracked_entity_without_motion_is_fatal() {
        let config = StageConfig::default();
        let mut scene = Scene::new("broken", Camera::new());
        let entity = scene.world.spawn((Pose::default(), Collider::default()));
        let slots = SceneSlots::new(scene.track(entity), None);
        let mut stage = AnimationLoop::new(slots, &config, Recorder::default()).unwrap();

        let err = stage.tick(&PointerState::default(), 0.016).unwrap_err();
        assert!(matches!(err, StageError::Configuration(_)));
    }
}
