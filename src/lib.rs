//! Procedural proxy meshes for skeletal armatures.
//!
//! For every bone a small tapered solid is generated along the bone axis,
//! placed in armature space by the bone's rest transform, and bound rigidly to
//! that bone through a vertex group. The combined mesh is handed to a host
//! through the [`MeshSink`] capability.
//!
//! ```rust,ignore
//! use armature_proxy::{Armature, Bone, ProxyMeshSettings, ProxyScene};
//! use glam::Vec3;
//!
//! let armature = Armature::new("Rig", vec![
//!     Bone::from_head_tail("root", Vec3::ZERO, Vec3::Y, 0.0),
//! ]);
//!
//! let mut scene = ProxyScene::new();
//! let rig = scene.add_armature(armature);
//! let proxy = scene.add_proxy_mesh(rig, &ProxyMeshSettings::default())?;
//! ```

pub mod assembly;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod sink;

pub use assembly::{MeshAssembly, SkinnedVertex, VertexGroup, assemble};
pub use errors::{ProxyError, Result};
pub use resources::{BoneShape, BoundingBox, Face, create_bone_shape};
pub use scene::{Armature, Bone, ObjectKey, ProxyScene};
pub use settings::{ProxyMeshSettings, RadiusSettings};
pub use sink::{ArmatureSource, MeshSink, ProxyMesh, build_proxy_mesh, generate_proxy_mesh};
