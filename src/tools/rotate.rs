//! Pointer-driven yaw rotation
//!
//! While rotate mode is armed and the pointer is held, horizontal travel
//! turns the selection about its own up axis. Position and scale never
//! change; half a degree per pixel, dragging right turns clockwise seen
//! from above.

use crate::input::PointerEvent;
use crate::math::{Quat, Vec2, Vec3};
use crate::mode::OperationMode;
use crate::tools::{Manipulator, ToolContext};

const DEGREES_PER_PIXEL: f32 = 0.5;

/// Yaw-rotate strategy
#[derive(Debug, Default)]
pub struct Rotator {
    /// Pointer position at the last handled event, while held
    anchor: Option<Vec2>,
}

impl Rotator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Manipulator for Rotator {
    fn mode(&self) -> OperationMode {
        OperationMode::Rotate
    }

    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext) -> bool {
        match *event {
            PointerEvent::Down { position, over_ui } => {
                if over_ui || ctx.selection.is_none() {
                    self.anchor = None;
                    return false;
                }
                self.anchor = Some(position);
                true
            }
            PointerEvent::Moved { position, over_ui } => {
                // Over host UI the gesture pauses; re-anchor so the drag
                // resumes from wherever the pointer comes back
                if over_ui {
                    if self.anchor.is_some() {
                        self.anchor = Some(position);
                    }
                    return false;
                }
                let anchor = match self.anchor {
                    Some(anchor) => anchor,
                    None => return false,
                };
                let selection = match ctx.selection {
                    Some(sel) => sel,
                    None => return false,
                };
                let obj = match ctx.scene.get_mut(selection.id) {
                    Some(obj) => obj,
                    None => return false,
                };

                let delta_x = position.x - anchor.x;
                self.anchor = Some(position);
                if delta_x == 0.0 {
                    return false;
                }

                // Turn about the object's own up axis, not world up
                let axis = obj.transform.rotation.rotate(Vec3::UP);
                let angle = (-delta_x * DEGREES_PER_PIXEL).to_radians();
                let turn = Quat::from_axis_angle(axis, angle);
                obj.transform.rotation = turn.mul(obj.transform.rotation).normalize();
                true
            }
            PointerEvent::Up { .. } => self.anchor.take().is_some(),
            _ => false,
        }
    }

    fn cancel(&mut self) {
        self.anchor = None;
    }
}
