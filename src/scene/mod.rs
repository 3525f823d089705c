//! Scenes and the transition between them.
//!
//! A stage holds two scenes in a [`SceneSlots`]: the current one, which is ticked and presented,
//! and the next one, which a transition swaps in. The [`TransitionSequencer`] drives the swap:
//!
//! ```text
//! Idle -> FadingOut -> Swapping -> [FlyingIn] -> FadingIn -> Idle
//! ```
//!
//! Triggers that arrive while a transition runs are ignored, and a started transition always
//! runs back to `Idle`.
//!
//! # Example
//!
//! ```
//! use hoverstage::Camera;
//! use hoverstage::scene::{Scene, SceneSlot, SceneSlots, TransitionSequencer};
//!
//! let mut slots = SceneSlots::new(
//!     Scene::new("intro", Camera::new()),
//!     Some(Scene::new("viewer", Camera::new())),
//! );
//! let mut sequencer = TransitionSequencer::new(0.05).unwrap();
//!
//! sequencer.trigger();
//! while !sequencer.tick(&mut slots).unwrap().completed {}
//!
//! assert_eq!(slots.current().id.as_str(), "viewer");
//! ```

mod manager;
pub mod scene;
mod setup;
mod transition;

pub use manager::{SceneSlot, SceneSlots};
pub use scene::{Scene, SceneId};
pub use setup::{CUBE_SCENE, Label, VIEWER_SCENE, cube_scene, demo_slots, viewer_scene};
pub use transition::{FlyIn, TransitionFrame, TransitionSequencer, TransitionState};
