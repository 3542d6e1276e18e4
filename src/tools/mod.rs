//! Manipulation tools
//!
//! Each tool is a strategy for interpreting pointer gestures against the
//! current selection. [`StageTools`] owns one of each and routes events to
//! whichever strategy serves the active operation mode.

pub mod drag;
pub mod resize;
pub mod rotate;
pub mod select;

use crate::camera::Camera;
use crate::input::PointerEvent;
use crate::mode::{OperationMode, OperationModes};
use crate::scene::room::RoomEnvelope;
use crate::scene::Scene;

pub use drag::{ButtonStateListener, DragHandler, MoveOutcome};
pub use resize::Resizer;
pub use rotate::Rotator;
pub use select::{Selection, SelectionChange, SelectionListener, Selector};

/// Everything a tool may read or mutate while handling one event
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a Camera,
    /// None until the room markers have been resolved; tools that need the
    /// envelope become no-ops without it
    pub room: Option<&'a RoomEnvelope>,
    pub modes: &'a OperationModes,
    pub selection: Option<Selection>,
}

/// A gesture-interpreting strategy bound to one operation mode
pub trait Manipulator {
    /// The mode this strategy serves
    fn mode(&self) -> OperationMode;

    /// Handle one event. Returns true if the event was consumed.
    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext) -> bool;

    /// Drop any in-flight gesture state
    fn cancel(&mut self) {}
}

/// The fixed set of manipulation strategies
#[derive(Default)]
pub struct StageTools {
    pub drag: DragHandler,
    pub resize: Resizer,
    pub rotate: Rotator,
}

impl StageTools {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_tool(&mut self, mode: OperationMode) -> Option<&mut dyn Manipulator> {
        match mode {
            // With no tool armed, drags still move the selection on the floor
            OperationMode::AxisDragXY | OperationMode::AxisDragXZ | OperationMode::None => {
                Some(&mut self.drag)
            }
            OperationMode::Resize => Some(&mut self.resize),
            OperationMode::Rotate => Some(&mut self.rotate),
        }
    }

    /// Route an event to the strategy for the current mode
    pub fn dispatch(&mut self, event: &PointerEvent, ctx: &mut ToolContext) -> bool {
        match self.active_tool(ctx.modes.current_mode()) {
            Some(tool) => tool.handle(event, ctx),
            None => false,
        }
    }

    /// Cancel every in-flight gesture, e.g. on mode or selection change
    pub fn cancel_all(&mut self) {
        self.drag.cancel();
        self.resize.cancel();
        self.rotate.cancel();
    }
}
