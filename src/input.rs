use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Pointer state shared between input handlers and the frame tick.
///
/// Input handlers are the only writers (`handle_event`, `cursor_moved`, `button`); the frame tick
/// only reads it and calls [`begin_frame`](Self::begin_frame) once it has consumed the edges.
///
/// Positions are normalized device coordinates: x and y in [-1, 1], y pointing up.
#[derive(Clone, Debug)]
pub struct PointerState {
    viewport: Vec2,
    cursor: Vec2,
    position: Vec2,
    down: bool,
    pressed: bool,
    released: bool,
    delta: Vec2,
    dragged: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        let viewport = Vec2::new(1280.0, 720.0);
        Self {
            viewport,
            cursor: viewport * 0.5,
            position: Vec2::ZERO,
            down: false,
            pressed: false,
            released: false,
            delta: Vec2::ZERO,
            dragged: false,
        }
    }
}

impl PointerState {
    /// Pointer resting at the centre of a `width` x `height` viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let mut state = Self::default();
        state.set_viewport(width, height);
        state.cursor = state.viewport * 0.5;
        state.position = Vec2::ZERO;
        state
    }

    /// Update the viewport size used to normalize cursor pixels.
    ///
    /// Zero-sized viewports (minimized windows) are ignored. A cursor left outside a shrunken
    /// viewport is held at the nearest edge.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.position = self.normalize(self.cursor).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Call at the end of each frame tick to reset per-frame edges.
    pub fn begin_frame(&mut self) {
        self.pressed = false;
        self.released = false;
        self.delta = Vec2::ZERO;
    }

    /// Process a window event and update pointer state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.button(*state == ElementState::Pressed),
            WindowEvent::Resized(size) => self.set_viewport(size.width, size.height),
            _ => {}
        }
    }

    /// Cursor moved to a window position in pixels.
    pub fn cursor_moved(&mut self, cursor: Vec2) {
        self.cursor = cursor;
        self.move_to(self.normalize(cursor));
    }

    /// Move the pointer directly in normalized coordinates.
    pub fn move_to(&mut self, position: Vec2) {
        let position = position.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let step = position - self.position;
        self.delta += step;
        if self.down && step != Vec2::ZERO {
            self.dragged = true;
        }
        self.position = position;
    }

    /// Primary button changed level.
    pub fn button(&mut self, down: bool) {
        if down && !self.down {
            self.pressed = true;
            self.dragged = false;
        } else if !down && self.down {
            self.released = true;
        }
        self.down = down;
    }

    fn normalize(&self, cursor: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * cursor.x / self.viewport.x - 1.0,
            1.0 - 2.0 * cursor.y / self.viewport.y,
        )
    }

    /// Current pointer position in normalized coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns true while the primary button is held.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Returns true if the primary button was pressed since the last frame.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Returns true if the primary button was released since the last frame.
    pub fn released(&self) -> bool {
        self.released
    }

    /// Pointer movement since the last frame, in normalized units.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Returns true if the pointer has moved while the button is held.
    pub fn is_dragging(&self) -> bool {
        self.down && self.dragged
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_map_to_normalized_coordinates() {
        let mut pointer = PointerState::new(800, 600);

        pointer.cursor_moved(Vec2::new(400.0, 300.0));
        assert_eq!(pointer.position(), Vec2::ZERO);

        pointer.cursor_moved(Vec2::new(0.0, 0.0));
        assert_eq!(pointer.position(), Vec2::new(-1.0, 1.0));

        pointer.cursor_moved(Vec2::new(800.0, 600.0));
        assert_eq!(pointer.position(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn press_and_release_edges_last_one_frame() {
        let mut pointer = PointerState::default();
        pointer.button(true);
        assert!(pointer.pressed());
        assert!(pointer.is_down());

        pointer.begin_frame();
        assert!(!pointer.pressed());
        assert!(pointer.is_down());

        pointer.button(false);
        assert!(pointer.released());
        assert!(!pointer.is_down());
    }

    #[test]
    fn drag_requires_movement_while_held() {
        let mut pointer = PointerState::default();
        pointer.move_to(Vec2::new(0.2, 0.0));
        assert!(!pointer.is_dragging());

        pointer.button(true);
        assert!(!pointer.is_dragging());

        pointer.move_to(Vec2::new(0.3, 0.1));
        assert!(pointer.is_dragging());
        assert!((pointer.delta() - Vec2::new(0.3, 0.1)).length() < 1e-6);

        pointer.button(false);
        assert!(!pointer.is_dragging());
    }

    #[test]
    fn resize_keeps_cursor_pixel_and_ignores_zero_size() {
        let mut pointer = PointerState::new(100, 100);
        pointer.cursor_moved(Vec2::new(50.0, 50.0));
        pointer.set_viewport(200, 100);
        assert_eq!(pointer.position(), Vec2::new(-0.5, 0.0));

        pointer.set_viewport(0, 0);
        assert_eq!(pointer.viewport(), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn pointer_starts_at_the_centre() {
        assert_eq!(PointerState::default().position(), Vec2::ZERO);
        assert_eq!(PointerState::new(1280, 720).position(), Vec2::ZERO);
        assert_eq!(PointerState::new(333, 101).position(), Vec2::ZERO);

        let mut pointer = PointerState::default();
        pointer.set_viewport(1280, 720);
        assert_eq!(pointer.position(), Vec2::ZERO);
    }

    #[test]
    fn shrinking_the_viewport_keeps_the_pointer_in_range() {
        let mut pointer = PointerState::new(100, 100);
        pointer.cursor_moved(Vec2::new(90.0, 50.0));
        pointer.set_viewport(50, 100);
        assert_eq!(pointer.position(), Vec2::new(1.0, 0.0));

        pointer.cursor_moved(Vec2::new(-10.0, 130.0));
        assert_eq!(pointer.position(), Vec2::new(-1.0, -1.0));
    }
}
