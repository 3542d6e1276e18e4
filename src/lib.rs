//! mainstage: interaction core for an interior staging tool
//!
//! Engine-independent logic for arranging catalog furniture in a bounded
//! room: an operation-mode state machine, ray-pick selection, constrained
//! drag with room clamping and overlap rejection, resize and rotate
//! tools, JSON scene persistence, catalog discovery and import, and a
//! model upload client. A host supplies rendering, real input devices and
//! UI; this crate supplies everything that decides where objects end up.

pub mod camera;
pub mod catalog;
pub mod importer;
pub mod input;
pub mod math;
pub mod mode;
pub mod persist;
pub mod scene;
pub mod session;
pub mod tools;
pub mod upload;

pub use camera::Camera;
pub use input::{PointerEvent, PointerSample, PointerTracker};
pub use mode::{OperationMode, OperationModes};
pub use scene::{Scene, SceneObject};
pub use session::StageSession;
