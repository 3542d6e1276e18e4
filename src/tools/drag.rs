//! Axis-constrained drag and drop
//!
//! Moves the selection on the floor plane (XZ) or the camera-facing
//! vertical plane (XY). Every candidate position is validated against the
//! room envelope and the other collidable objects before it is applied.

use log::debug;

use crate::input::PointerEvent;
use crate::math::{Vec2, Vec3};
use crate::mode::{OperationMode, OperationModes};
use crate::scene::room::RoomEnvelope;
use crate::scene::Scene;
use crate::tools::{Manipulator, ToolContext};

/// Pointer travel in pixels separating a click from a drag
const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Collaborator reflecting the XZ/XY toggle into the host's button sprite
pub trait ButtonStateListener {
    fn axis_button_state(&mut self, xy_active: bool);
}

/// Result of validating one candidate position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Position applied, possibly clamped to the room or snapped to the floor
    Applied,
    /// Candidate overlapped another collidable object; transform untouched
    RejectedOverlap,
    /// Object cannot fit in the room on some axis; transform untouched
    RejectedTooBig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Button down on a selection, threshold not yet crossed
    Pressed { start: Vec2 },
    Dragging,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

/// XZ / XY constrained drag with room clamping and overlap rejection
#[derive(Default)]
pub struct DragHandler {
    state: DragState,
    button_listener: Option<Box<dyn ButtonStateListener>>,
}

impl DragHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button_listener(&mut self, listener: Box<dyn ButtonStateListener>) {
        self.button_listener = Some(listener);
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Flip between floor and vertical dragging.
    ///
    /// Returns true when XY mode is now active, and mirrors that into the
    /// button-state collaborator.
    pub fn toggle_axis_mode(&mut self, modes: &mut OperationModes) -> bool {
        let xy_now = !modes.is_xy_mode();
        modes.set_mode(if xy_now {
            OperationMode::AxisDragXY
        } else {
            OperationMode::AxisDragXZ
        });
        // The drag plane changed under any in-flight gesture
        self.cancel();
        if let Some(listener) = self.button_listener.as_mut() {
            listener.axis_button_state(xy_now);
        }
        xy_now
    }

    fn drag_to(&self, position: Vec2, ctx: &mut ToolContext) -> Option<MoveOutcome> {
        let selection = ctx.selection?;
        let room = match ctx.room {
            Some(room) => room,
            None => {
                debug!("drag ignored: no room envelope");
                return None;
            }
        };

        let current = ctx.scene.get(selection.id)?.transform.position;
        let ray = ctx.camera.screen_to_ray(position);

        let candidate = if ctx.modes.is_xy_mode() {
            // Camera-facing vertical plane through the object; only Y moves
            let normal = -ctx.camera.forward();
            let t = ray.intersect_plane(current, normal)?;
            let hit = ray.at(t);
            Vec3::new(current.x, hit.y, current.z)
        } else {
            // Horizontal plane at the object's height; Y stays put
            let t = ray.intersect_plane(current, Vec3::UP)?;
            let hit = ray.at(t);
            Vec3::new(hit.x, current.y, hit.z)
        };

        Some(apply_move(ctx.scene, selection.id, candidate, room))
    }
}

impl Manipulator for DragHandler {
    fn mode(&self) -> OperationMode {
        OperationMode::AxisDragXZ
    }

    fn handle(&mut self, event: &PointerEvent, ctx: &mut ToolContext) -> bool {
        match *event {
            PointerEvent::Down { position, over_ui } => {
                if over_ui || !ctx.modes.can_move() || ctx.selection.is_none() {
                    self.state = DragState::Idle;
                    return false;
                }
                self.state = DragState::Pressed { start: position };
                true
            }
            PointerEvent::Moved { position, over_ui } => {
                // Crossing host UI pauses the gesture without ending it
                if over_ui {
                    return false;
                }
                match self.state {
                    DragState::Pressed { start } => {
                        if position.distance(start) <= DRAG_THRESHOLD_PX {
                            return false;
                        }
                        self.state = DragState::Dragging;
                        self.drag_to(position, ctx).is_some()
                    }
                    DragState::Dragging => self.drag_to(position, ctx).is_some(),
                    DragState::Idle => false,
                }
            }
            PointerEvent::Up { .. } => {
                let was_active = self.state != DragState::Idle;
                self.state = DragState::Idle;
                was_active
            }
            _ => false,
        }
    }

    fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Validate and apply a candidate position for one object.
///
/// Clamps to the room on X, Z and the ceiling, snaps up out of the floor,
/// then rejects on overlap with any other collidable object. Rejection
/// leaves the transform exactly as it was.
pub fn apply_move(
    scene: &mut Scene,
    id: u64,
    candidate: Vec3,
    room: &RoomEnvelope,
) -> MoveOutcome {
    let (bounds, current) = match scene.get(id) {
        Some(obj) => (obj.world_bounds(), obj.transform.position),
        None => return MoveOutcome::RejectedTooBig,
    };

    let size = bounds.size();
    let room_size = room.size();
    if size.x > room_size.x || size.z > room_size.z || size.y > room.max.y - room.floor_y {
        return MoveOutcome::RejectedTooBig;
    }

    let mut target = bounds.translate(candidate - current);
    let mut shift = Vec3::ZERO;

    if target.min.x < room.min.x {
        shift.x = room.min.x - target.min.x;
    } else if target.max.x > room.max.x {
        shift.x = room.max.x - target.max.x;
    }
    if target.min.z < room.min.z {
        shift.z = room.min.z - target.min.z;
    } else if target.max.z > room.max.z {
        shift.z = room.max.z - target.max.z;
    }
    if target.max.y > room.max.y {
        shift.y = room.max.y - target.max.y;
    }

    target = target.translate(shift);

    // The floor is a resting surface, not a wall: violations convert to a
    // snap-up instead of a rejection
    if target.min.y < room.floor_y {
        let up = room.floor_y - target.min.y;
        shift.y += up;
        target = target.translate(Vec3::new(0.0, up, 0.0));
    }

    if scene.overlaps_any(&target, id) {
        return MoveOutcome::RejectedOverlap;
    }

    if let Some(obj) = scene.get_mut(id) {
        obj.transform.position = candidate + shift;
    }
    MoveOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::{Category, SceneObject};
    use crate::tools::Selection;
    use std::cell::Cell;
    use std::rc::Rc;

    fn room() -> RoomEnvelope {
        RoomEnvelope {
            min: Vec3::new(-5.0, -0.6, -4.0),
            max: Vec3::new(5.0, 4.0, 4.0),
            floor_y: 0.0,
        }
    }

    fn item_at(scene: &mut Scene, position: Vec3) -> u64 {
        let mut obj = SceneObject::new("item");
        obj.tag = Some(Category::Item);
        obj.transform.position = position;
        scene.insert(obj)
    }

    fn selection_for(scene: &Scene, id: u64) -> Selection {
        let obj = scene.get(id).unwrap();
        Selection {
            id,
            scale_snapshot: obj.transform.scale,
            rotation_snapshot: obj.transform.rotation,
        }
    }

    #[test]
    fn test_apply_move_clamps_to_walls() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let room = room();

        // Way past the right wall
        let outcome = apply_move(&mut scene, id, Vec3::new(100.0, 0.5, 0.0), &room);
        assert_eq!(outcome, MoveOutcome::Applied);
        let b = scene.get(id).unwrap().world_bounds();
        assert!(b.max.x <= room.max.x + 0.001);
        assert!((b.max.x - room.max.x).abs() < 0.001, "should rest against the wall");
    }

    #[test]
    fn test_apply_move_snaps_up_from_floor() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let room = room();

        let outcome = apply_move(&mut scene, id, Vec3::new(1.0, -3.0, 0.0), &room);
        assert_eq!(outcome, MoveOutcome::Applied);
        let b = scene.get(id).unwrap().world_bounds();
        assert!((b.min.y - room.floor_y).abs() < 0.001, "min.y={}", b.min.y);
        let p = scene.get(id).unwrap().transform.position;
        assert!((p.x - 1.0).abs() < 0.001, "lateral part of the move survives");
    }

    #[test]
    fn test_apply_move_clamps_at_ceiling() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let room = room();

        apply_move(&mut scene, id, Vec3::new(0.0, 50.0, 0.0), &room);
        let b = scene.get(id).unwrap().world_bounds();
        assert!((b.max.y - room.max.y).abs() < 0.001);
    }

    #[test]
    fn test_overlap_rejection_leaves_transform_untouched() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(-2.0, 0.5, 0.0));
        let _blocker = item_at(&mut scene, Vec3::new(2.0, 0.5, 0.0));

        let before = scene.get(id).unwrap().transform;
        let outcome = apply_move(&mut scene, id, Vec3::new(2.0, 0.5, 0.0), &room());
        assert_eq!(outcome, MoveOutcome::RejectedOverlap);
        assert_eq!(scene.get(id).unwrap().transform, before);
    }

    #[test]
    fn test_oversized_object_rejected() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        scene.get_mut(id).unwrap().transform.scale = Vec3::splat(50.0);

        let before = scene.get(id).unwrap().transform;
        let outcome = apply_move(&mut scene, id, Vec3::new(1.0, 0.5, 0.0), &room());
        assert_eq!(outcome, MoveOutcome::RejectedTooBig);
        assert_eq!(scene.get(id).unwrap().transform, before);
    }

    #[test]
    fn test_threshold_separates_click_from_drag() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let selection = selection_for(&scene, id);
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 6.0, -10.0), Vec3::new(0.0, 0.5, 0.0));
        let room = room();
        let modes = OperationModes::new();
        let mut drag = DragHandler::new();

        let mut ctx = ToolContext {
            scene: &mut scene,
            camera: &camera,
            room: Some(&room),
            modes: &modes,
            selection: Some(selection),
        };

        drag.handle(
            &PointerEvent::Down { position: Vec2::new(160.0, 120.0), over_ui: false },
            &mut ctx,
        );
        drag.handle(&PointerEvent::Moved { position: Vec2::new(162.0, 120.0), over_ui: false }, &mut ctx);
        let p = ctx.scene.get(id).unwrap().transform.position;
        assert!((p - Vec3::new(0.0, 0.5, 0.0)).len() < 0.001, "2px stays a click");

        drag.handle(&PointerEvent::Moved { position: Vec2::new(190.0, 120.0), over_ui: false }, &mut ctx);
        let p = ctx.scene.get(id).unwrap().transform.position;
        assert!((p - Vec3::new(0.0, 0.5, 0.0)).len() > 0.01, "past threshold moves");
        assert!((p.y - 0.5).abs() < 0.001, "floor drag keeps the height");
    }

    #[test]
    fn test_xy_mode_changes_only_height() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 1.0, 0.0));
        let selection = selection_for(&scene, id);
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 1.0, -10.0), Vec3::new(0.0, 1.0, 0.0));
        let room = room();
        let mut modes = OperationModes::new();
        modes.set_mode(OperationMode::AxisDragXY);
        let mut drag = DragHandler::new();

        let mut ctx = ToolContext {
            scene: &mut scene,
            camera: &camera,
            room: Some(&room),
            modes: &modes,
            selection: Some(selection),
        };

        drag.handle(
            &PointerEvent::Down { position: Vec2::new(160.0, 120.0), over_ui: false },
            &mut ctx,
        );
        // Screen up means world up with this camera
        drag.handle(&PointerEvent::Moved { position: Vec2::new(160.0, 60.0), over_ui: false }, &mut ctx);

        let p = ctx.scene.get(id).unwrap().transform.position;
        assert!((p.x - 0.0).abs() < 0.001);
        assert!((p.z - 0.0).abs() < 0.001);
        assert!(p.y > 1.0, "y={}", p.y);
    }

    #[test]
    fn test_drag_pauses_while_pointer_is_over_ui() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let selection = selection_for(&scene, id);
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 6.0, -10.0), Vec3::new(0.0, 0.5, 0.0));
        let room = room();
        let modes = OperationModes::new();
        let mut drag = DragHandler::new();

        let mut ctx = ToolContext {
            scene: &mut scene,
            camera: &camera,
            room: Some(&room),
            modes: &modes,
            selection: Some(selection),
        };

        drag.handle(
            &PointerEvent::Down { position: Vec2::new(160.0, 120.0), over_ui: false },
            &mut ctx,
        );
        drag.handle(&PointerEvent::Moved { position: Vec2::new(190.0, 120.0), over_ui: false }, &mut ctx);
        let moved = ctx.scene.get(id).unwrap().transform.position;
        assert!(moved.x > 0.0);

        // Pointer crossed a panel: no movement while over UI
        drag.handle(&PointerEvent::Moved { position: Vec2::new(240.0, 120.0), over_ui: true }, &mut ctx);
        let paused = ctx.scene.get(id).unwrap().transform.position;
        assert!((paused - moved).len() < 0.001, "move over UI must not apply");

        // Coming back off the panel resumes the same gesture
        drag.handle(&PointerEvent::Moved { position: Vec2::new(210.0, 120.0), over_ui: false }, &mut ctx);
        let resumed = ctx.scene.get(id).unwrap().transform.position;
        assert!(resumed.x > moved.x);
    }

    #[test]
    fn test_press_over_ui_never_starts_a_drag() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, Vec3::new(0.0, 0.5, 0.0));
        let selection = selection_for(&scene, id);
        let camera = Camera::new(320.0, 240.0);
        let room = room();
        let modes = OperationModes::new();
        let mut drag = DragHandler::new();

        let mut ctx = ToolContext {
            scene: &mut scene,
            camera: &camera,
            room: Some(&room),
            modes: &modes,
            selection: Some(selection),
        };

        let consumed = drag.handle(
            &PointerEvent::Down { position: Vec2::new(160.0, 120.0), over_ui: true },
            &mut ctx,
        );
        assert!(!consumed);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_toggle_axis_mode_reports_and_notifies() {
        struct Recorder(Rc<Cell<Option<bool>>>);
        impl ButtonStateListener for Recorder {
            fn axis_button_state(&mut self, xy_active: bool) {
                self.0.set(Some(xy_active));
            }
        }

        let seen = Rc::new(Cell::new(None));
        let mut drag = DragHandler::new();
        drag.set_button_listener(Box::new(Recorder(seen.clone())));
        let mut modes = OperationModes::new();

        assert!(drag.toggle_axis_mode(&mut modes));
        assert!(modes.is_xy_mode());
        assert_eq!(seen.get(), Some(true));

        assert!(!drag.toggle_axis_mode(&mut modes));
        assert_eq!(modes.current_mode(), OperationMode::AxisDragXZ);
        assert_eq!(seen.get(), Some(false));
    }
}
