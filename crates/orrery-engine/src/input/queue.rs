use glam::Vec2;

/// Input event types the engine understands.
/// Pointer coordinates are surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown { x: f32, y: f32 },
    /// Pointer released.
    PointerUp { x: f32, y: f32 },
    /// Pointer moved.
    PointerMove { x: f32, y: f32 },
    /// A click completed at this position.
    Click { x: f32, y: f32 },
    /// Wheel scroll; positive = away from the user.
    Wheel { delta: f32 },
    /// A custom event from the UI layer (HTML buttons, inputs).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Map surface pixels to normalized device coordinates:
/// [-1, 1] on both axes, origin at the center, +y up.
pub fn pixels_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(px.x / width * 2.0 - 1.0, -(px.y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::Click { x: 10.0, y: 20.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 4, a: 2.0, b: 2.9, c: 0.0 });
        match q.drain()[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 4);
                assert_eq!(a, 2.0);
                assert_eq!(b, 2.9);
                assert_eq!(c, 0.0);
            }
            other => panic!("Expected Custom event, got {other:?}"),
        }
    }

    #[test]
    fn ndc_corners_and_center() {
        assert_eq!(pixels_to_ndc(Vec2::new(400.0, 300.0), 800.0, 600.0), Vec2::ZERO);
        assert_eq!(pixels_to_ndc(Vec2::new(0.0, 0.0), 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(pixels_to_ndc(Vec2::new(800.0, 600.0), 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(pixels_to_ndc(Vec2::new(5.0, 5.0), 0.0, 600.0), Vec2::ZERO);
    }
}
