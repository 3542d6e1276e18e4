//! Ray-pick selection
//!
//! Casts a camera ray through the pointer and picks the nearest tagged
//! object. Selection owns the outline flags and the scale/rotation
//! snapshots the resize and rotate tools measure against.

use log::debug;

use crate::camera::Camera;
use crate::math::{Quat, Vec2, Vec3};
use crate::scene::{Body, Scene};

/// State captured when an object is selected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub id: u64,
    /// Scale at selection time; resize clamps relative to this
    pub scale_snapshot: Vec3,
    pub rotation_snapshot: Quat,
}

/// Outcome of one selection pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionChange {
    Selected { id: u64, previous: Option<u64> },
    Cleared { previous: u64 },
    Unchanged,
}

/// Collaborator notified when the selection changes (button visibility in
/// the host UI)
pub trait SelectionListener {
    fn selection_changed(&mut self, selected: Option<u64>);
}

/// Pointer-ray selection over tagged scene objects
#[derive(Default)]
pub struct Selector {
    current: Option<Selection>,
    listener: Option<Box<dyn SelectionListener>>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listener = Some(listener);
    }

    pub fn selection(&self) -> Option<Selection> {
        self.current
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.current.map(|s| s.id)
    }

    /// Pick at a screen position.
    ///
    /// The overall nearest hit decides: if it is an Item or Shelf it
    /// becomes the selection, anything else clears it. Untagged fixtures
    /// occlude, so nothing is picked through a wall. Every pass also
    /// sweeps all bodies to the uniform kinematic-but-collidable state,
    /// so overlap queries see a consistent world no matter how objects
    /// arrived.
    pub fn select_at(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        position: Vec2,
    ) -> SelectionChange {
        sweep_bodies(scene);

        let ray = camera.screen_to_ray(position);
        let mut best: Option<(u64, f32)> = None;
        for (id, obj) in scene.iter() {
            // Folder placeholders have no presence in the world
            if obj.folder {
                continue;
            }
            if let Some(t) = obj.world_bounds().intersect_ray(&ray) {
                if best.map(|(_, bt)| t < bt).unwrap_or(true) {
                    best = Some((id, t));
                }
            }
        }

        let selectable = best.and_then(|(id, _)| scene.get(id)).map_or(false, |obj| {
            obj.tag.map(|t| t.is_selectable()).unwrap_or(false)
        });
        match best {
            Some((id, _)) if selectable => self.select(scene, id),
            _ => self.clear(scene),
        }
    }

    /// Select a known object directly (import uses this)
    pub fn select(&mut self, scene: &mut Scene, id: u64) -> SelectionChange {
        let previous = self.selected_id();
        if previous == Some(id) {
            return SelectionChange::Unchanged;
        }

        if let Some(prev) = previous {
            if let Some(obj) = scene.get_mut(prev) {
                obj.outlined = false;
            }
        }

        let snapshot = match scene.get_mut(id) {
            Some(obj) => {
                obj.outlined = true;
                Selection {
                    id,
                    scale_snapshot: obj.transform.scale,
                    rotation_snapshot: obj.transform.rotation,
                }
            }
            None => return SelectionChange::Unchanged,
        };

        self.current = Some(snapshot);
        self.notify();
        SelectionChange::Selected { id, previous }
    }

    pub fn clear(&mut self, scene: &mut Scene) -> SelectionChange {
        match self.current.take() {
            Some(sel) => {
                if let Some(obj) = scene.get_mut(sel.id) {
                    obj.outlined = false;
                }
                self.notify();
                SelectionChange::Cleared { previous: sel.id }
            }
            None => SelectionChange::Unchanged,
        }
    }

    fn notify(&mut self) {
        let selected = self.selected_id();
        match self.listener.as_mut() {
            Some(listener) => listener.selection_changed(selected),
            None => debug!("selection changed with no listener attached"),
        }
    }
}

/// Force every tagged object to the kinematic-but-collidable state.
/// Physics never simulates; bodies only feed overlap queries.
fn sweep_bodies(scene: &mut Scene) {
    let ids: Vec<u64> = scene
        .iter()
        .filter(|(_, obj)| obj.tag.is_some())
        .map(|(id, _)| id)
        .collect();
    for id in ids {
        if let Some(obj) = scene.get_mut(id) {
            obj.body = Some(Body { kinematic: true, collidable: true });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;
    use crate::scene::{Category, SceneObject};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn camera_at_origin() -> Camera {
        let mut camera = Camera::new(320.0, 240.0);
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        camera
    }

    fn item_at(scene: &mut Scene, name: &str, position: Vec3) -> u64 {
        let mut obj = SceneObject::new(name);
        obj.tag = Some(Category::Item);
        obj.transform.position = position;
        scene.insert(obj)
    }

    #[test]
    fn test_pick_selects_and_outlines() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut selector = Selector::new();

        let change = selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        assert_eq!(change, SelectionChange::Selected { id, previous: None });
        assert!(scene.get(id).unwrap().outlined);
        assert_eq!(selector.selected_id(), Some(id));
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new();
        let far = item_at(&mut scene, "far", Vec3::new(0.0, 0.0, 5.0));
        let near = item_at(&mut scene, "near", Vec3::new(0.0, 0.0, -3.0));
        let _ = far;
        let mut selector = Selector::new();

        selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        assert_eq!(selector.selected_id(), Some(near));
    }

    #[test]
    fn test_miss_clears_selection() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut selector = Selector::new();
        let camera = camera_at_origin();

        selector.select_at(&mut scene, &camera, Vec2::new(160.0, 120.0));
        let change = selector.select_at(&mut scene, &camera, Vec2::new(0.0, 0.0));
        assert_eq!(change, SelectionChange::Cleared { previous: id });
        assert!(!scene.get(id).unwrap().outlined);
        assert!(selector.selection().is_none());
    }

    #[test]
    fn test_untagged_occluder_blocks_the_pick() {
        let mut scene = Scene::new();
        let chair = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut wall = SceneObject::new("wall");
        wall.transform.position = Vec3::new(0.0, 0.0, -3.0);
        scene.insert(wall);
        let mut selector = Selector::new();
        let camera = camera_at_origin();

        // The wall is the nearest hit, so nothing gets selected through it
        let change = selector.select_at(&mut scene, &camera, Vec2::new(160.0, 120.0));
        assert_eq!(change, SelectionChange::Unchanged);
        assert!(selector.selection().is_none());
        assert!(!scene.get(chair).unwrap().outlined);
    }

    #[test]
    fn test_occluder_clears_an_existing_selection() {
        let mut scene = Scene::new();
        let chair = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut wall = SceneObject::new("wall");
        wall.transform.position = Vec3::new(3.0, 0.0, -3.0);
        scene.insert(wall);
        let mut selector = Selector::new();
        let camera = camera_at_origin();

        selector.select_at(&mut scene, &camera, Vec2::new(160.0, 120.0));
        assert_eq!(selector.selected_id(), Some(chair));

        // Clicking the fixture behaves like clicking empty space
        let mut wall_screen = None;
        for x in 0..320 {
            let ray = camera.screen_to_ray(Vec2::new(x as f32, 120.0));
            let wall_bounds = Aabb::from_center_size(Vec3::new(3.0, 0.0, -3.0), Vec3::ONE);
            if wall_bounds.intersect_ray(&ray).is_some() {
                wall_screen = Some(Vec2::new(x as f32, 120.0));
                break;
            }
        }
        let change = selector.select_at(&mut scene, &camera, wall_screen.unwrap());
        assert_eq!(change, SelectionChange::Cleared { previous: chair });
        assert!(selector.selection().is_none());
    }

    #[test]
    fn test_folder_placeholders_do_not_occlude() {
        let mut scene = Scene::new();
        scene.insert(SceneObject::folder("Items"));
        let chair = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut selector = Selector::new();

        selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        assert_eq!(selector.selected_id(), Some(chair));
    }

    #[test]
    fn test_untagged_objects_are_not_selectable() {
        let mut scene = Scene::new();
        scene.insert(SceneObject::new("wall"));
        let mut selector = Selector::new();

        let change = selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        assert_eq!(change, SelectionChange::Unchanged);
        assert!(selector.selection().is_none());
    }

    #[test]
    fn test_snapshot_captures_selection_time_scale() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, "chair", Vec3::ZERO);
        scene.get_mut(id).unwrap().transform.scale = Vec3::splat(3.0);
        let mut selector = Selector::new();

        selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        let sel = selector.selection().unwrap();
        assert!((sel.scale_snapshot - Vec3::splat(3.0)).len() < 0.001);
    }

    #[test]
    fn test_selection_sweeps_bodies() {
        let mut scene = Scene::new();
        let id = item_at(&mut scene, "chair", Vec3::ZERO);
        scene.get_mut(id).unwrap().body = None;
        let mut selector = Selector::new();

        selector.select_at(&mut scene, &camera_at_origin(), Vec2::new(160.0, 120.0));
        let body = scene.get(id).unwrap().body.unwrap();
        assert!(body.kinematic);
        assert!(body.collidable);
    }

    #[test]
    fn test_listener_notified() {
        struct Recorder(Rc<RefCell<Vec<Option<u64>>>>);
        impl SelectionListener for Recorder {
            fn selection_changed(&mut self, selected: Option<u64>) {
                self.0.borrow_mut().push(selected);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let id = item_at(&mut scene, "chair", Vec3::ZERO);
        let mut selector = Selector::new();
        selector.set_listener(Box::new(Recorder(log.clone())));
        let camera = camera_at_origin();

        selector.select_at(&mut scene, &camera, Vec2::new(160.0, 120.0));
        selector.select_at(&mut scene, &camera, Vec2::new(0.0, 0.0));
        assert_eq!(*log.borrow(), vec![Some(id), None]);
    }
}
