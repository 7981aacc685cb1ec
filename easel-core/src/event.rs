//! Pointer events routed to interactive tools.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Primary button.
    #[default]
    Left,
    /// Middle button / wheel press.
    Middle,
    /// Secondary button.
    Right,
}

/// Kind of a pointer event.
///
/// `Enter` and `Exit` are synthesized by the tool layer from hover changes;
/// event sources only deliver the raw kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Pointer moved with no button held.
    Move,
    /// Button pressed.
    Press,
    /// Button released.
    Release,
    /// Press and release on the same component.
    Click,
    /// Pointer moved with a button held.
    Drag,
    /// Pointer entered a component (synthesized).
    Enter,
    /// Pointer left a component (synthesized).
    Exit,
}

/// A pointer event in physical (device) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// X position in physical coordinates.
    pub x: f32,
    /// Y position in physical coordinates.
    pub y: f32,
    /// What happened.
    pub kind: PointerKind,
    /// Which button, for button events.
    pub button: PointerButton,
    /// Timestamp in milliseconds since the event source started.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create an event of the given kind at `(x, y)`.
    #[must_use]
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            kind,
            button: PointerButton::Left,
            timestamp_ms: 0,
        }
    }

    /// A move event.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// A press event.
    #[must_use]
    pub fn press(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Press, x, y)
    }

    /// A release event.
    #[must_use]
    pub fn release(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Release, x, y)
    }

    /// A click event.
    #[must_use]
    pub fn click(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    /// A drag event.
    #[must_use]
    pub fn drag(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Drag, x, y)
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// The event position as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The same position and metadata with a different kind.
    #[must_use]
    pub fn as_kind(&self, kind: PointerKind) -> Self {
        Self { kind, ..*self }
    }
}
