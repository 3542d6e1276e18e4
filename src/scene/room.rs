//! Room envelope derived from wall markers
//!
//! The stage is a box bounded by six tagged markers (four walls, floor,
//! ceiling). Each marker contributes one face of the envelope, inset by
//! its own thickness so objects rest against the visible surface rather
//! than the marker's center.

use std::fmt;

use crate::math::{Aabb, Vec3};

/// Fraction of the room height the floor limit is lowered by, so drags
/// near the floor clamp below the resting plane and the snap-up owns the
/// final height
const FLOOR_MARGIN: f32 = 0.15;

/// Which face of the room a marker bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKind {
    Left,
    Right,
    Back,
    Front,
    Floor,
    Ceiling,
}

impl WallKind {
    pub const ALL: [WallKind; 6] = [
        WallKind::Left,
        WallKind::Right,
        WallKind::Back,
        WallKind::Front,
        WallKind::Floor,
        WallKind::Ceiling,
    ];
}

/// A tagged boundary marker with its rendered bounds and slab thickness
#[derive(Debug, Clone, Copy)]
pub struct WallMarker {
    pub kind: WallKind,
    pub bounds: Aabb,
    pub thickness: f32,
}

#[derive(Debug)]
pub enum RoomError {
    MissingMarker(WallKind),
    /// Envelope collapsed: an inset face crossed its opposite
    Degenerate,
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::MissingMarker(kind) => write!(f, "missing room marker: {:?}", kind),
            RoomError::Degenerate => write!(f, "room markers produce an empty envelope"),
        }
    }
}

impl std::error::Error for RoomError {}

/// The usable interior of the room
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomEnvelope {
    pub min: Vec3,
    pub max: Vec3,
    /// Resting height for object bounds; above `min.y` by the floor margin
    pub floor_y: f32,
}

impl RoomEnvelope {
    /// Derive the envelope from the six markers.
    ///
    /// Each face takes the inner surface of its marker (outer bound minus
    /// thickness). The floor limit then drops by 15% of the room height so
    /// clamping never fights the floor snap-up.
    pub fn from_markers(markers: &[WallMarker]) -> Result<RoomEnvelope, RoomError> {
        let find = |kind: WallKind| -> Result<&WallMarker, RoomError> {
            markers
                .iter()
                .find(|m| m.kind == kind)
                .ok_or(RoomError::MissingMarker(kind))
        };

        let left = find(WallKind::Left)?;
        let right = find(WallKind::Right)?;
        let back = find(WallKind::Back)?;
        let front = find(WallKind::Front)?;
        let floor = find(WallKind::Floor)?;
        let ceiling = find(WallKind::Ceiling)?;

        let min = Vec3::new(
            left.bounds.min.x + left.thickness,
            floor.bounds.min.y + floor.thickness,
            back.bounds.min.z + back.thickness,
        );
        let max = Vec3::new(
            right.bounds.max.x - right.thickness,
            ceiling.bounds.max.y - ceiling.thickness,
            front.bounds.max.z - front.thickness,
        );

        if min.x >= max.x || min.y >= max.y || min.z >= max.z {
            return Err(RoomError::Degenerate);
        }

        let floor_y = min.y;
        let height = max.y - min.y;
        let min = Vec3::new(min.x, min.y - height * FLOOR_MARGIN, min.z);

        Ok(RoomEnvelope { min, max, floor_y })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max).scale(0.5)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Height of the usable interior, floor to ceiling
    pub fn height(&self) -> f32 {
        self.max.y - self.floor_y
    }

    pub fn as_aabb(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }
}
