//! Input state management for pointer and keyboard events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default travel, in screen pixels, before a press becomes a pan.
pub const DEFAULT_PAN_THRESHOLD: f64 = 2.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// The pointer left the drawing surface.
    Leave,
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// A press-drag-release pan gesture.
///
/// A press starts tracking an anchor. Motion only starts moving the
/// camera once the pointer has travelled more than `threshold` pixels
/// from the anchor; from then on the gesture is a real pan and the click
/// that would follow the release is suppressed.
#[derive(Debug, Clone)]
pub struct PanGesture {
    anchor: Option<Point>,
    last: Point,
    real_pan: bool,
    threshold: f64,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::new(DEFAULT_PAN_THRESHOLD)
    }
}

impl PanGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            anchor: None,
            last: Point::ZERO,
            real_pan: false,
            threshold,
        }
    }

    /// Start tracking at `position`.
    pub fn begin(&mut self, position: Point) {
        self.anchor = Some(position);
        self.last = position;
        self.real_pan = false;
    }

    /// Track pointer motion. Returns the screen-space delta to pan by, if
    /// the gesture is a real pan.
    pub fn update(&mut self, position: Point) -> Option<Vec2> {
        let anchor = self.anchor?;
        if !self.real_pan && anchor.distance(position) > self.threshold {
            self.real_pan = true;
        }
        if !self.real_pan {
            return None;
        }
        let delta = position - self.last;
        self.last = position;
        Some(delta)
    }

    /// Finish the gesture. Returns whether it was a real pan.
    pub fn end(&mut self) -> bool {
        let was_pan = self.anchor.is_some() && self.real_pan;
        self.cancel();
        was_pan
    }

    /// Drop the gesture without reporting anything.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.real_pan = false;
    }

    /// Whether a press is being tracked.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Tracks pointer state across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates, if over the surface.
    pub pointer_position: Option<Point>,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Pan gesture in progress.
    pub pan: PanGesture,
}

impl InputState {
    /// Create a new input state.
    pub fn new(pan_threshold: f64) -> Self {
        Self {
            pointer_position: None,
            pressed_buttons: HashSet::new(),
            pan: PanGesture::new(pan_threshold),
        }
    }

    /// Record pointer position and button state. Returns whether a button
    /// release matched an earlier press.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = Some(position);
                self.pressed_buttons.insert(button);
                false
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = Some(position);
                self.pressed_buttons.remove(&button)
            }
            PointerEvent::Move { position } | PointerEvent::Scroll { position, .. } => {
                self.pointer_position = Some(position);
                false
            }
            PointerEvent::Leave => {
                self.pointer_position = None;
                self.pressed_buttons.clear();
                self.pan.cancel();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_motion_is_not_a_pan() {
        let mut pan = PanGesture::new(2.0);
        pan.begin(Point::new(100.0, 100.0));
        assert_eq!(pan.update(Point::new(101.0, 101.0)), None);
        assert!(!pan.end());
        assert!(!pan.is_active());
    }

    #[test]
    fn test_pan_deltas_follow_pointer() {
        let mut pan = PanGesture::new(2.0);
        pan.begin(Point::new(100.0, 100.0));

        // Crossing the threshold reports the full travel from the anchor
        let delta = pan.update(Point::new(105.0, 100.0)).unwrap();
        assert!((delta.x - 5.0).abs() < f64::EPSILON);

        let delta = pan.update(Point::new(105.0, 90.0)).unwrap();
        assert!(delta.x.abs() < f64::EPSILON);
        assert!((delta.y + 10.0).abs() < f64::EPSILON);

        assert!(pan.end());
        assert_eq!(pan.update(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_update_without_press() {
        let mut pan = PanGesture::default();
        assert_eq!(pan.update(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_button_press_release() {
        let mut input = InputState::new(2.0);
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        let released_right = input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        });
        assert!(!released_right);

        let released = input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(released);

        // A second release has no matching press
        let released = input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(!released);
    }

    #[test]
    fn test_release_without_press() {
        let mut input = InputState::new(2.0);
        let released = input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(!released);
    }

    #[test]
    fn test_leave_cancels_pan() {
        let mut input = InputState::new(2.0);
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        input.pan.begin(Point::new(10.0, 10.0));
        input.handle_pointer_event(&PointerEvent::Leave);

        assert!(!input.pan.is_active());
        assert_eq!(input.pointer_position, None);

        let released = input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(!released);
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"Down": {"position": {"x": 1.0, "y": 2.0}}}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
            }
        );
    }
}
