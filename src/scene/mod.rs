//! Scene-side data
//!
//! - Bone: read-only bone record (name, length, rest transform)
//! - Armature: ordered bones plus world placement
//! - ProxyScene: in-memory host scene implementing [`MeshSink`](crate::sink::MeshSink)

pub mod armature;
pub mod bone;
pub mod proxy_scene;

pub use armature::Armature;
pub use bone::Bone;
pub use proxy_scene::{
    ArmatureDeform, MeshObject, ObjectData, ObjectKey, ProxyScene, SceneObject, WeightedGroup,
};
