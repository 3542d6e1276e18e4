//! Placed-object arena
//!
//! Holds every object staged in the room: transform, category tag, body
//! state and parent links. Objects get stable ids on insertion and keep
//! insertion order, which persistence relies on for deterministic output.

pub mod room;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::math::{Aabb, Quat, Vec3};

/// Category tag driving selection, persistence paths and import clearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Item,
    Shelf,
    /// Room fixture; collidable but never selectable or persisted
    SceneObject,
}

impl Category {
    /// Folder prefix used in persisted prefab paths
    pub fn prefab_folder(&self) -> Option<&'static str> {
        match self {
            Category::Item => Some("Items"),
            Category::Shelf => Some("Shelves"),
            Category::SceneObject => None,
        }
    }

    /// Recover the tag from a persisted path like `Items/chair`
    pub fn from_prefab_path(path: &str) -> Option<Category> {
        match path.split('/').next() {
            Some("Items") => Some(Category::Item),
            Some("Shelves") => Some(Category::Shelf),
            _ => None,
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, Category::Item | Category::Shelf)
    }
}

/// World transform of a placed object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Kinematic-body bookkeeping; physics never simulates, bodies exist so
/// overlap queries know what to test against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kinematic: bool,
    pub collidable: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self { kinematic: true, collidable: true }
    }
}

/// One staged object
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub tag: Option<Category>,
    pub transform: Transform,
    /// Bounds of the model in its own space, before the transform
    pub local_bounds: Aabb,
    pub body: Option<Body>,
    pub outlined: bool,
    pub texture: Option<PathBuf>,
    /// Grouping node: skipped by persistence, children recorded in its place
    pub folder: bool,
    pub parent: Option<u64>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            transform: Transform::default(),
            local_bounds: Aabb::UNIT,
            body: Some(Body::default()),
            outlined: false,
            texture: None,
            folder: false,
            parent: None,
        }
    }

    /// Grouping placeholder (the `Items` / `Shelves` containers)
    pub fn folder(name: impl Into<String>) -> Self {
        let mut obj = Self::new(name);
        obj.folder = true;
        obj.body = None;
        obj
    }

    /// Bounds in world space under the current transform
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transformed(
            self.transform.scale,
            self.transform.rotation,
            self.transform.position,
        )
    }

    pub fn is_collidable(&self) -> bool {
        self.body.map(|b| b.collidable).unwrap_or(false)
    }
}

/// Arena of staged objects with stable ids and insertion order
#[derive(Debug, Default)]
pub struct Scene {
    objects: HashMap<u64, SceneObject>,
    order: Vec<u64>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: SceneObject) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, object);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: u64) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.order.clear();
    }

    /// All ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &SceneObject)> {
        self.order.iter().filter_map(|id| self.objects.get(id).map(|o| (*id, o)))
    }

    /// Root ids (no parent) in insertion order
    pub fn roots(&self) -> Vec<u64> {
        self.ids()
            .filter(|id| self.objects[id].parent.is_none())
            .collect()
    }

    /// Child ids of `parent` in insertion order
    pub fn children_of(&self, parent: u64) -> Vec<u64> {
        self.ids()
            .filter(|id| self.objects[id].parent == Some(parent))
            .collect()
    }

    /// Depth-first order over roots, children before siblings
    pub fn dfs(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(self.order.len());
        for root in self.roots() {
            self.dfs_from(root, &mut out);
        }
        out
    }

    fn dfs_from(&self, id: u64, out: &mut Vec<u64>) {
        out.push(id);
        for child in self.children_of(id) {
            self.dfs_from(child, out);
        }
    }

    /// Ids of objects carrying the given tag, insertion order
    pub fn with_tag(&self, tag: Category) -> Vec<u64> {
        self.ids()
            .filter(|id| self.objects[id].tag == Some(tag))
            .collect()
    }

    /// Does `bounds` overlap any collidable object other than `exclude`?
    pub fn overlaps_any(&self, bounds: &Aabb, exclude: u64) -> bool {
        self.iter().any(|(id, obj)| {
            id != exclude && obj.is_collidable() && obj.world_bounds().intersects(bounds)
        })
    }

    /// Remove an object and every descendant. Returns how many went.
    pub fn remove_subtree(&mut self, id: u64) -> usize {
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(self.children_of(parent));
            i += 1;
        }
        let mut removed = 0;
        for id in doomed {
            if self.objects.remove(&id).is_some() {
                removed += 1;
            }
        }
        self.order.retain(|id| self.objects.contains_key(id));
        removed
    }
}
