//! Math primitives shared by every placement tool
//!
//! Small hand-rolled types: the crate only needs vectors, quaternions,
//! AABBs and rays, and persisted scene data fixes their layouts.

mod bounds;
mod quat;
mod ray;
mod vec;

pub use bounds::Aabb;
pub use quat::Quat;
pub use ray::Ray;
pub use vec::{Vec2, Vec3};
