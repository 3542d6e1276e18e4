//! Catalog-to-scene import
//!
//! Instantiates a catalog entry into the stage. Import is a demo action,
//! not additive placement: whatever was previously imported in the same
//! category goes away first. Two placement strategies cover the two ways
//! the stage is viewed, fit-to-room and fit-to-camera.

use std::fmt;

use log::info;

use crate::camera::Camera;
use crate::catalog::Catalog;
use crate::math::Vec3;
use crate::persist::placed_object;
use crate::scene::room::RoomEnvelope;
use crate::scene::{Category, Scene};

/// Fraction of the room height a room-fitted object may occupy
const ROOM_HEIGHT_SHARE: f32 = 0.5;
/// Minimum scale, as a share of room height over the largest dimension
const MIN_SCALE_SHARE: f32 = 0.05;
/// Share of the view height a camera-fitted object may occupy
const VIEW_HEIGHT_SHARE: f32 = 1.6;
/// Distance in front of the camera for camera-fitted placement
const CAMERA_PLACEMENT_DISTANCE: f32 = 5.0;

#[derive(Debug)]
pub enum ImportError {
    UnknownEntry(String),
    /// Room-fitted placement needs a resolved room envelope
    NoRoom,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnknownEntry(key) => write!(f, "unknown catalog entry: {}", key),
            ImportError::NoRoom => write!(f, "no room envelope for room-fitted import"),
        }
    }
}

impl std::error::Error for ImportError {}

/// How an imported object is scaled and positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Scale against the room, rest on the floor at the room center
    RoomFit,
    /// Scale against the view volume, hang in front of the camera
    CameraFit,
}

/// Import one catalog entry, replacing anything of the same category.
///
/// Returns the id of the new object.
pub fn import(
    scene: &mut Scene,
    catalog: &Catalog,
    key: &str,
    placement: Placement,
    room: Option<&RoomEnvelope>,
    camera: &Camera,
) -> Result<u64, ImportError> {
    let entry = catalog
        .get(key)
        .ok_or_else(|| ImportError::UnknownEntry(key.to_string()))?;

    // One demoed object per category
    for id in scene.with_tag(entry.category) {
        if scene.get(id).is_some() {
            scene.remove_subtree(id);
        }
    }

    let mut obj = placed_object(entry);
    let b = obj.local_bounds.size();

    match placement {
        Placement::RoomFit => {
            let room = room.ok_or(ImportError::NoRoom)?;
            let width = room.size().x;
            let depth = room.size().z;
            let height = room.height();

            let mut scale = (ROOM_HEIGHT_SHARE * height / b.y)
                .min(width / (2.0 * b.x))
                .min(depth / (2.0 * b.z));
            scale = scale.max(MIN_SCALE_SHARE * height / b.max_element());
            if entry.category == Category::Item {
                scale *= 0.5;
            }
            obj.transform.scale = Vec3::splat(scale);

            let bounds = obj.world_bounds();
            let center = room.center();
            let target = Vec3::new(
                center.x,
                room.floor_y + bounds.size().y / 2.0,
                center.z,
            );
            obj.transform.position = obj.transform.position + (target - bounds.center());
        }
        Placement::CameraFit => {
            let ortho = camera.ortho_size;
            let lateral = ortho * camera.aspect() / 3.0;
            let scale = (VIEW_HEIGHT_SHARE * ortho / b.y)
                .min(lateral / b.x)
                .min(lateral / b.z);
            obj.transform.scale = Vec3::splat(scale);

            let bounds = obj.world_bounds();
            let target = camera.position + camera.forward() * CAMERA_PLACEMENT_DISTANCE;
            obj.transform.position = obj.transform.position + (target - bounds.center());
        }
    }

    let name = obj.name.clone();
    let id = scene.insert(obj);
    info!("imported '{}' from {}", name, entry.prefab_path());
    Ok(id)
}
