//! Scene persistence
//!
//! Saves the staged objects to `scene_data.json` and loads them back by
//! re-resolving catalog entries. The format is a flat list; hierarchy is
//! encoded as `parentIndex` into the same list, -1 for roots, and every
//! parent index points at an earlier entry.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogEntry};
use crate::math::{Quat, Vec3};
use crate::scene::{Body, Category, Scene, SceneObject};

pub const SCENE_FILE: &str = "scene_data.json";

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "scene file IO error: {}", e),
            PersistError::Json(e) => write!(f, "scene data parse error: {}", e),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SceneData {
    objects: Vec<ObjectRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectRecord {
    prefab_path: String,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent_index: i32,
}

/// What a load pass managed to reconstruct
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records whose catalog entry is gone; indices stay aligned
    pub missing: usize,
    /// Records whose parent index was invalid or pointed at a failed load
    pub orphaned: usize,
}

/// Default save location under the platform data directory
pub fn default_scene_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("mainstage").join(SCENE_FILE))
}

/// Save the tagged objects to `path`.
///
/// Depth-first over roots in insertion order. Folder placeholders are
/// skipped with their children recorded against the folder's own parent;
/// untagged subtrees are dropped entirely.
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), PersistError> {
    let mut records = Vec::new();
    for root in scene.roots() {
        record_subtree(scene, root, -1, &mut records);
    }

    let json = serde_json::to_string_pretty(&SceneData { objects: records })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // Write-then-rename so a crash never truncates the previous save
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn record_subtree(scene: &Scene, id: u64, parent_index: i32, records: &mut Vec<ObjectRecord>) {
    let obj = match scene.get(id) {
        Some(obj) => obj,
        None => return,
    };

    if obj.folder {
        // Grouping node: children inherit this node's parent index
        for child in scene.children_of(id) {
            record_subtree(scene, child, parent_index, records);
        }
        return;
    }

    let folder = obj.tag.and_then(|tag| tag.prefab_folder());
    let prefab_path = match folder {
        Some(folder) => format!("{}/{}", folder, obj.name),
        None => {
            debug!("not saving untagged subtree rooted at '{}'", obj.name);
            return;
        }
    };

    records.push(ObjectRecord {
        prefab_path,
        position: obj.transform.position,
        rotation: obj.transform.rotation,
        scale: obj.transform.scale,
        parent_index,
    });
    let my_index = (records.len() - 1) as i32;
    for child in scene.children_of(id) {
        record_subtree(scene, child, my_index, records);
    }
}

/// Load `path` into the scene, replacing the placed objects.
///
/// Room fixtures (untagged or SceneObject-tagged) are left in place; only
/// Item and Shelf objects are cleared first. Category folders are
/// recreated and every loaded object starts parented under its folder,
/// so records with an unusable parent index still land somewhere sane.
/// Records whose catalog entry no longer exists keep a placeholder slot
/// so later parent indices still resolve.
pub fn load_scene(
    scene: &mut Scene,
    catalog: &Catalog,
    path: &Path,
) -> Result<LoadReport, PersistError> {
    let data: SceneData = serde_json::from_str(&fs::read_to_string(path)?)?;

    clear_placed(scene);

    let mut report = LoadReport::default();
    let mut loaded: Vec<Option<u64>> = Vec::with_capacity(data.objects.len());

    for record in &data.objects {
        match catalog.resolve(&record.prefab_path) {
            Some(entry) => {
                let mut obj = placed_object(entry);
                obj.transform.position = record.position;
                obj.transform.rotation = record.rotation;
                obj.transform.scale = record.scale;
                obj.parent = Some(ensure_folder(scene, entry.category));
                loaded.push(Some(scene.insert(obj)));
                report.loaded += 1;
            }
            None => {
                warn!("catalog entry missing for '{}', keeping placeholder", record.prefab_path);
                loaded.push(None);
                report.missing += 1;
            }
        }
    }

    // Second pass: re-parent by index now that every slot exists
    for (i, record) in data.objects.iter().enumerate() {
        let id = match loaded[i] {
            Some(id) => id,
            None => continue,
        };
        if record.parent_index < 0 {
            continue;
        }
        let parent_slot = record.parent_index as usize;
        if parent_slot >= loaded.len() || parent_slot >= i {
            warn!(
                "record {} has out-of-range parent index {}, keeping it under its folder",
                i, record.parent_index
            );
            report.orphaned += 1;
            continue;
        }
        match loaded[parent_slot] {
            Some(parent_id) => {
                if let Some(obj) = scene.get_mut(id) {
                    obj.parent = Some(parent_id);
                }
            }
            None => {
                warn!(
                    "record {} lost its parent to a missing entry, keeping it under its folder",
                    i
                );
                report.orphaned += 1;
            }
        }
    }

    // Loaded objects all get fresh default bodies, whatever was saved
    for id in loaded.iter().flatten() {
        if let Some(obj) = scene.get_mut(*id) {
            obj.body = Some(Body::default());
        }
    }

    Ok(report)
}

/// Build the scene object for a resolved catalog entry
pub(crate) fn placed_object(entry: &CatalogEntry) -> SceneObject {
    let mut obj = SceneObject::new(entry.model_name());
    obj.tag = Some(entry.category);
    obj.texture = entry.conventional_texture();
    obj.body = Some(Body::default());
    obj
}

/// Find or create the grouping node for a category
fn ensure_folder(scene: &mut Scene, category: Category) -> u64 {
    let name = category.prefab_folder().unwrap_or("Objects");
    let existing = scene
        .iter()
        .find(|(_, obj)| obj.folder && obj.name == name)
        .map(|(id, _)| id);
    match existing {
        Some(id) => id,
        None => scene.insert(SceneObject::folder(name)),
    }
}

fn clear_placed(scene: &mut Scene) {
    for category in [Category::Item, Category::Shelf] {
        for id in scene.with_tag(category) {
            if scene.get(id).is_some() {
                scene.remove_subtree(id);
            }
        }
    }
}
