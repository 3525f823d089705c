//! # Hoverstage
//!
//! **Interaction and animation core for a hover-reactive 3D stage.**
//!
//! A tracked object (a glass cube, a model) grows and turns toward the viewer while the pointer is
//! over it, sways gently when it is not, follows the pointer while dragged, and a click on a
//! trigger label fades the stage into a second scene with an optional camera fly-in.
//!
//! Drawing is someone else's job: the stage hands each frame to a [`RenderSurface`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use hoverstage::*;
//! use hoverstage::scene::{Scene, demo_slots};
//!
//! struct Console;
//!
//! impl RenderSurface for Console {
//!     fn set_opacity(&mut self, _opacity: f32) {}
//!     fn present(&mut self, scene: &Scene, _camera: &Camera) {
//!         println!("{:?}", scene.tracked_pose());
//!     }
//! }
//!
//! fn main() -> Result<(), StageError> {
//!     let config = StageConfig::default();
//!     let mut stage = AnimationLoop::new(demo_slots(&config)?, &config, Console)?;
//!     let mut pointer = PointerState::new(1280, 720);
//!
//!     loop {
//!         // Window events go into `pointer` between frames.
//!         stage.tick(&pointer, 1.0 / 60.0)?;
//!         pointer.begin_frame();
//!     }
//! }
//! ```
//!
//! ## Per-frame data flow
//!
//! pointer events → [`PointerState`] → [`HoverDetector`] → [`Motion`] target selection →
//! [`PoseInterpolator`] → [`RenderSurface::present`]. A click on the scene's trigger starts the
//! [`TransitionSequencer`](scene::TransitionSequencer), which suspends pose smoothing while it
//! swaps scenes and flies the camera in.

mod app;
mod camera;
mod config;
mod easing;
mod error;
mod hover;
mod input;
mod motion;
mod orbit_camera;
mod picking;
mod pose;
mod render;
pub mod scene;

pub use app::{AnimationLoop, FrameReport};
pub use camera::{Camera, Projector};
pub use config::{CameraConfig, HoverConfig, MotionConfig, StageConfig, TransitionConfig};
pub use easing::{Easing, ease_in_out};
pub use error::StageError;
pub use hover::{HoverDetector, HoverState};
pub use input::PointerState;
pub use motion::{IdleMotion, Motion, MotionMode, Oscillator, ScaleCompanion, TargetPoseSet};
pub use orbit_camera::{OrbitCamera, OrbitConfig};
pub use picking::{Collider, DetectionVolume, HitVolume, Ray, RayHit, raycast, raycast_all};
pub use pose::{Axis, Pose, PoseInterpolator, clamp_rotation, wrap_angle};
pub use render::RenderSurface;

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3};

// Re-export the ECS types scenes are built from
pub use hecs::{Entity, World};
