//! Geometry resources
//!
//! Plain CPU-side geometry used by the proxy pipeline:
//! - Face: triangle / quad index tuples
//! - BoundingBox: axis-aligned bounds
//! - primitives: the per-bone proxy solid

pub mod geometry;
pub mod primitives;

pub use geometry::{BoundingBox, Face, face_normal};
pub use primitives::{BoneShape, create_bone_shape};
