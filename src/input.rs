//! Pointer input events and per-frame tracking
//!
//! The session consumes discrete [`PointerEvent`]s instead of polling
//! device state, so mouse and single-touch hosts feed the same pipeline.
//! Hosts that only have per-frame state can run it through
//! [`PointerTracker`] to recover the event stream.

use crate::math::Vec2;

/// A discrete pointer event in screen coordinates (pixels, y-down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button or touch went down. `over_ui` marks presses that
    /// landed on host UI and must not reach the stage.
    Down { position: Vec2, over_ui: bool },
    /// Pointer travel. `over_ui` pauses in-flight gestures while the
    /// pointer crosses host UI without ending them.
    Moved { position: Vec2, over_ui: bool },
    Up { position: Vec2 },
    /// Wheel scroll, positive away from the user
    Scroll { delta: f32 },
    /// Two-finger pinch; ratio of current to previous finger spacing
    Pinch { ratio: f32 },
}

/// Per-frame pointer snapshot supplied by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub position: Vec2,
    pub button_down: bool,
    pub over_ui: bool,
    pub scroll_delta: f32,
    /// Distance between the two touch points, when two are down
    pub touch_spacing: Option<f32>,
}

/// Converts per-frame samples into discrete events.
///
/// Edge-detects the button, suppresses Moved while the button is up, and
/// derives pinch ratios from consecutive touch spacings.
#[derive(Debug, Default)]
pub struct PointerTracker {
    button_was_down: bool,
    last_position: Option<Vec2>,
    last_spacing: Option<f32>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of host state, collecting the events it implies
    pub fn update(&mut self, sample: &PointerSample, events: &mut Vec<PointerEvent>) {
        if sample.button_down && !self.button_was_down {
            events.push(PointerEvent::Down {
                position: sample.position,
                over_ui: sample.over_ui,
            });
        } else if !sample.button_down && self.button_was_down {
            events.push(PointerEvent::Up { position: sample.position });
        } else if sample.button_down {
            if self.last_position != Some(sample.position) {
                events.push(PointerEvent::Moved {
                    position: sample.position,
                    over_ui: sample.over_ui,
                });
            }
        }
        self.button_was_down = sample.button_down;
        self.last_position = Some(sample.position);

        if sample.scroll_delta != 0.0 {
            events.push(PointerEvent::Scroll { delta: sample.scroll_delta });
        }

        match (self.last_spacing, sample.touch_spacing) {
            (Some(prev), Some(cur)) if prev > 0.0 => {
                events.push(PointerEvent::Pinch { ratio: cur / prev });
            }
            _ => {}
        }
        self.last_spacing = sample.touch_spacing;
    }
}
