//! Easing curves for progress values.

use serde::{Deserialize, Serialize};

/// Easing functions for smooth transitions.
///
/// These reshape a linear progress value and are never applied to a per-frame delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed throughout.
    #[default]
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    ///
    /// Inputs outside [0, 1] are clamped first.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => ease_in_out(t),
        }
    }
}

/// Quadratic ease-in-out: `2t²` below the midpoint, `1 - (2(1-t))²/2` above it.
///
/// ```
/// use hoverstage::ease_in_out;
///
/// assert_eq!(ease_in_out(0.0), 0.0);
/// assert_eq!(ease_in_out(0.5), 0.5);
/// assert_eq!(ease_in_out(1.0), 1.0);
/// ```
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 * (1.0 - t);
        1.0 - u * u / 2.0
    }
}
