//! Staging session driver
//!
//! Owns the mode registry, the selector and the tool set, and routes
//! pointer events between them: a press first resolves the selection,
//! then every event reaches the strategy serving the current mode.

use log::warn;

use crate::camera::Camera;
use crate::input::PointerEvent;
use crate::mode::{OperationMode, OperationModes};
use crate::scene::room::{RoomEnvelope, WallMarker};
use crate::scene::Scene;
use crate::tools::{
    ButtonStateListener, Selection, SelectionChange, SelectionListener, Selector, StageTools,
    ToolContext,
};

/// One user's interaction state over a staged scene
#[derive(Default)]
pub struct StageSession {
    modes: OperationModes,
    selector: Selector,
    tools: StageTools,
    room: Option<RoomEnvelope>,
}

impl StageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the room envelope from wall markers. On failure the session
    /// keeps working but movement validation becomes a no-op.
    pub fn set_room_markers(&mut self, markers: &[WallMarker]) {
        match RoomEnvelope::from_markers(markers) {
            Ok(room) => self.room = Some(room),
            Err(err) => {
                warn!("room envelope unavailable, drags disabled: {}", err);
                self.room = None;
            }
        }
    }

    pub fn set_room(&mut self, room: RoomEnvelope) {
        self.room = Some(room);
    }

    pub fn room(&self) -> Option<&RoomEnvelope> {
        self.room.as_ref()
    }

    pub fn modes(&self) -> &OperationModes {
        &self.modes
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selector.selection()
    }

    pub fn set_selection_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.selector.set_listener(listener);
    }

    pub fn set_button_listener(&mut self, listener: Box<dyn ButtonStateListener>) {
        self.tools.drag.set_button_listener(listener);
    }

    /// Arm a mode, or revert to floor dragging if it is already armed.
    /// Returns the mode now current.
    pub fn toggle_mode(&mut self, mode: OperationMode) -> OperationMode {
        self.tools.cancel_all();
        self.modes.toggle_mode(mode)
    }

    pub fn set_mode(&mut self, mode: OperationMode) -> OperationMode {
        self.tools.cancel_all();
        self.modes.set_mode(mode)
    }

    /// Flip between floor and vertical dragging; true when XY is now active
    pub fn toggle_axis_mode(&mut self) -> bool {
        self.tools.drag.toggle_axis_mode(&mut self.modes)
    }

    /// Remove the selected object and its descendants
    pub fn delete_selected(&mut self, scene: &mut Scene) -> bool {
        let id = match self.selector.selected_id() {
            Some(id) => id,
            None => return false,
        };
        self.selector.clear(scene);
        self.tools.cancel_all();
        scene.remove_subtree(id) > 0
    }

    /// Feed one pointer event through selection and the active tool.
    /// Returns true if anything consumed it.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        scene: &mut Scene,
        camera: &Camera,
    ) -> bool {
        if let PointerEvent::Down { position, over_ui } = *event {
            if over_ui {
                return false;
            }
            let change = self.selector.select_at(scene, camera, position);
            if change != SelectionChange::Unchanged {
                // A selection change invalidates any in-flight gesture
                self.tools.cancel_all();
            }
        }

        let mut ctx = ToolContext {
            scene,
            camera,
            room: self.room.as_ref(),
            modes: &self.modes,
            selection: self.selector.selection(),
        };
        self.tools.dispatch(event, &mut ctx)
    }
}
