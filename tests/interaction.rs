use hoverstage::scene::{
    CUBE_SCENE, Scene, SceneSlot, TransitionState, VIEWER_SCENE, demo_slots,
};
use hoverstage::{
    AnimationLoop, Camera, Collider, DetectionVolume, HoverDetector, MotionMode, PointerState,
    RenderSurface, StageConfig, StageError, Vec2, Vec3,
};

#[derive(Default)]
struct Recorder {
    opacities: Vec<f32>,
    scenes: Vec<String>,
}

impl RenderSurface for Recorder {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacities.push(opacity);
    }

    fn present(&mut self, scene: &Scene, _camera: &Camera) {
        self.scenes.push(scene.id.to_string());
    }
}

fn ndc_of(camera: &Camera, point: Vec3) -> Vec2 {
    let clip = camera.projection_matrix() * camera.view_matrix() * point.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn pointer_over_cube_hovers_and_corner_misses() {
    let camera = Camera::new();
    let volume = DetectionVolume::new(Collider::box_collider(Vec3::splat(2.0)), 1.0).unwrap();
    let mut detector = HoverDetector::new();
    let mut pointer = PointerState::new(1280, 720);

    pointer.move_to(Vec2::ZERO);
    assert!(detector.update(&pointer, &camera, &volume).hovering);

    pointer.move_to(Vec2::new(0.99, 0.99));
    assert!(!detector.update(&pointer, &camera, &volume).hovering);
}

#[test]
fn press_latch_survives_dragging_off_the_cube() {
    let camera = Camera::new();
    let volume = DetectionVolume::new(Collider::box_collider(Vec3::splat(2.0)), 1.2).unwrap();
    let mut detector = HoverDetector::new();
    let mut pointer = PointerState::new(1280, 720);

    pointer.button(true);
    let state = detector.update(&pointer, &camera, &volume);
    assert!(state.hovering && state.latched);
    pointer.begin_frame();

    pointer.move_to(Vec2::new(0.99, 0.99));
    let state = detector.update(&pointer, &camera, &volume);
    assert!(state.hovering && state.latched);
    pointer.begin_frame();

    pointer.button(false);
    let state = detector.update(&pointer, &camera, &volume);
    assert!(!state.hovering && !state.latched);
}

#[test]
fn clicking_start_flies_into_the_viewer() {
    let config = StageConfig::default();
    let mut stage = AnimationLoop::new(demo_slots(&config).unwrap(), &config, Recorder::default())
        .unwrap();
    let mut pointer = PointerState::new(1280, 720);

    let label = ndc_of(&stage.slots().current().camera, Vec3::new(0.0, -2.2, 0.0));
    pointer.move_to(label);
    pointer.button(true);

    let mut seen = Vec::new();
    let mut ticks = 0;
    loop {
        let report = stage.tick(&pointer, 1.0 / 60.0).unwrap();
        pointer.begin_frame();
        if seen.last() != Some(&report.transition) {
            seen.push(report.transition);
        }
        ticks += 1;
        if report.transition == TransitionState::Idle || ticks > 1000 {
            break;
        }
    }

    assert_eq!(
        seen,
        vec![
            TransitionState::FadingOut,
            TransitionState::Swapping,
            TransitionState::FlyingIn,
            TransitionState::FadingIn,
            TransitionState::Idle,
        ]
    );
    assert_eq!(stage.slots().swap_count(), 1);
    assert_eq!(stage.slots().current().id.as_str(), VIEWER_SCENE);
    assert_eq!(stage.slots().next().unwrap().id.as_str(), CUBE_SCENE);

    let camera = stage.slots().current().camera;
    assert!((camera.position - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-3);

    let opacities = &stage.surface().opacities;
    assert!(opacities.iter().all(|o| (0.0..=1.0).contains(o)));
    assert!(opacities.contains(&0.0));
    assert_eq!(opacities.last(), Some(&1.0));
    assert_eq!(stage.surface().scenes.first().map(String::as_str), Some(CUBE_SCENE));
    assert_eq!(stage.surface().scenes.last().map(String::as_str), Some(VIEWER_SCENE));
}

#[test]
fn pose_is_frozen_while_swapping_and_flying() {
    let config = StageConfig::default();
    let mut stage = AnimationLoop::new(demo_slots(&config).unwrap(), &config, Recorder::default())
        .unwrap();
    let pointer = PointerState::new(1280, 720);

    stage.trigger();
    loop {
        let report = stage.tick(&pointer, 1.0 / 60.0).unwrap();
        match report.transition {
            TransitionState::Swapping | TransitionState::FlyingIn => {
                assert_eq!(report.mode, None);
            }
            TransitionState::FadingOut | TransitionState::FadingIn => {
                assert!(report.mode.is_some());
            }
            TransitionState::Idle => break,
        }
    }
}

#[test]
fn quick_fade_from_ron_takes_five_frames() {
    let config =
        StageConfig::from_ron_str("(transition: (step: 0.5, fly_in: None))").unwrap();
    let mut stage = AnimationLoop::new(demo_slots(&config).unwrap(), &config, Recorder::default())
        .unwrap();
    let pointer = PointerState::new(1280, 720);

    assert!(stage.trigger());
    assert!(!stage.trigger());

    let states: Vec<_> = (0..5)
        .map(|_| stage.tick(&pointer, 1.0 / 60.0).unwrap())
        .map(|report| (report.transition, report.opacity))
        .collect();

    assert_eq!(
        states,
        vec![
            (TransitionState::FadingOut, 0.5),
            (TransitionState::Swapping, 0.0),
            (TransitionState::FadingIn, 0.0),
            (TransitionState::FadingIn, 0.5),
            (TransitionState::Idle, 1.0),
        ]
    );
    assert_eq!(stage.slots().current().id.as_str(), VIEWER_SCENE);
}

#[test]
fn hovering_the_cube_grows_it_toward_the_hover_scale() {
    let config = StageConfig::default();
    let mut stage = AnimationLoop::new(demo_slots(&config).unwrap(), &config, Recorder::default())
        .unwrap();
    let pointer = PointerState::new(1280, 720);

    let mut scale = 1.0;
    for _ in 0..120 {
        let report = stage.tick(&pointer, 1.0 / 60.0).unwrap();
        assert_eq!(report.mode, Some(MotionMode::Hover));
        let next = report.pose.unwrap().scale.x;
        assert!(next >= scale);
        scale = next;
    }
    assert!((scale - 1.25).abs() < 1e-3);
}

#[test]
fn invalid_config_is_rejected_before_the_stage_starts() {
    let err = StageConfig::from_ron_str("(transition: (step: 0.0))").unwrap_err();
    assert!(matches!(err, StageError::InvalidArgument { .. }));

    let err = StageConfig::from_ron_str("(hover: (margin: ").unwrap_err();
    assert!(matches!(err, StageError::Parse(_)));
}
