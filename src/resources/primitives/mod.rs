pub mod bone_shape;

pub use bone_shape::{BoneShape, create_bone_shape};
