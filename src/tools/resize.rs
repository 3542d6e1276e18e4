//! Uniform resize via scroll or pinch
//!
//! Scales the selection around its own pivot. The factor accumulates
//! across events but is always clamped against the scale captured when
//! the object was selected, so no amount of scrolling escapes the range.

use crate::input::PointerEvent;
use crate::mode::OperationMode;
use crate::tools::{Manipulator, ToolContext};

/// Scale factor gained per unit of scroll delta
const SCROLL_STEP: f32 = 0.1;
/// Allowed factor range relative to the selection-time scale
const MIN_FACTOR: f32 = 0.1;
const MAX_FACTOR: f32 = 10.0;

/// Scroll/pinch resize strategy
#[derive(Debug, Default)]
pub struct Resizer;

impl Resizer {
    pub fn new() -> Self {
        Self
    }

    fn apply_factor(&self, factor: f32, ctx: &mut ToolContext) -> bool {
        let selection = match ctx.selection {
            Some(sel) => sel,
            None => return false,
        };
        let obj = match ctx.scene.get_mut(selection.id) {
            Some(obj) => obj,
            None => return false,
        };

        let snapshot = selection.scale_snapshot;
        let target = obj.transform.scale * factor;
        obj.transform.scale = target
            .max_componentwise(snapshot.scale(MIN_FACTOR))
            .min_componentwise(snapshot.scale(MAX_FACTOR));
        true
    }
}

impl Manipulator for Resizer {
    fn mode(&self) -> OperationMode {
        OperationMode::Resize
    }

    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext) -> bool {
        match *event {
            PointerEvent::Scroll { delta } => self.apply_factor(1.0 + delta * SCROLL_STEP, ctx),
            PointerEvent::Pinch { ratio } => self.apply_factor(ratio, ctx),
            _ => false,
        }
    }
}
