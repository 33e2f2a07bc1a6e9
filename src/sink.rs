//! Host Integration Interfaces
//!
//! The proxy pipeline reads bones from an [`ArmatureSource`] and materializes
//! its result through a [`MeshSink`]. Both are passed in explicitly; nothing
//! here reaches for an ambient "current scene".
//!
//! A run has two stages:
//!
//! 1. [`build_proxy_mesh`]: pure and deterministic. All precondition checks
//!    happen here, so a failure never touches the sink.
//! 2. [`ProxyMesh::commit`]: replays the result into the sink (create the
//!    object, place it, add rigid vertex groups, bind the armature deform,
//!    parent it to the armature).
//!
//! [`generate_proxy_mesh`] runs both.

use core::ops::Range;

use glam::Affine3A;

use crate::assembly::assembler::assemble_named;
use crate::assembly::MeshAssembly;
use crate::errors::Result;
use crate::resources::geometry::BoundingBox;
use crate::scene::bone::Bone;
use crate::settings::ProxyMeshSettings;

/// Read access to an armature's rest pose.
pub trait ArmatureSource {
    fn name(&self) -> &str;

    /// Bones in their defined order.
    fn bones(&self) -> &[Bone];

    /// Placement of the armature in the world, applied unchanged to the proxy.
    fn world_matrix(&self) -> Affine3A;
}

/// A host scene able to hold the generated proxy object.
pub trait MeshSink {
    /// Handle of a created mesh object.
    type Object: Copy;
    /// Handle of the armature object the proxy deforms with.
    type ArmatureRef: Copy;

    /// Creates a mesh object whose surface is the assembly's vertices and faces.
    fn create_mesh_object(&mut self, name: &str, assembly: &MeshAssembly) -> Result<Self::Object>;

    fn set_world_matrix(&mut self, object: Self::Object, matrix: Affine3A) -> Result<()>;

    /// Creates (or reuses) the vertex group `name` and assigns weight 1.0 to
    /// every vertex in `indices`, replacing any previous weight.
    fn assign_rigid_group(
        &mut self,
        object: Self::Object,
        name: &str,
        indices: Range<u32>,
    ) -> Result<()>;

    /// Deforms `object` with the bones of `armature`.
    fn add_armature_deform(
        &mut self,
        object: Self::Object,
        armature: Self::ArmatureRef,
        use_vertex_groups: bool,
    ) -> Result<()>;

    /// Makes `object` inherit the transform of `armature`.
    fn set_parent(&mut self, object: Self::Object, armature: Self::ArmatureRef) -> Result<()>;
}

/// A finished proxy, ready to hand to a [`MeshSink`].
#[derive(Debug, Clone)]
pub struct ProxyMesh {
    pub name: String,
    pub world_matrix: Affine3A,
    pub assembly: MeshAssembly,
    pub use_vertex_groups: bool,
}

impl ProxyMesh {
    /// Bounds of the proxy surface once placed at its world matrix.
    #[must_use]
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        Some(self.assembly.bounding_box()?.transform(&self.world_matrix))
    }

    /// Materializes the proxy in `sink`, bound and parented to `armature`.
    pub fn commit<S: MeshSink>(self, sink: &mut S, armature: S::ArmatureRef) -> Result<S::Object> {
        let object = sink.create_mesh_object(&self.name, &self.assembly)?;
        sink.set_world_matrix(object, self.world_matrix)?;

        for group in self.assembly.bindings() {
            sink.assign_rigid_group(object, &group.name, group.indices.clone())?;
        }

        sink.add_armature_deform(object, armature, self.use_vertex_groups)?;
        sink.set_parent(object, armature)?;

        log::info!(
            "Created proxy mesh '{}' ({} vertex groups)",
            self.name,
            self.assembly.bindings().len()
        );

        Ok(object)
    }
}

/// Builds the proxy for `source` without touching any host state.
pub fn build_proxy_mesh<A>(source: &A, settings: &ProxyMeshSettings) -> Result<ProxyMesh>
where
    A: ArmatureSource + ?Sized,
{
    settings.validate()?;

    let assembly = assemble_named(source.name(), source.bones(), settings)?;

    Ok(ProxyMesh {
        name: settings.proxy_name(source.name()),
        world_matrix: source.world_matrix(),
        assembly,
        use_vertex_groups: settings.use_vertex_groups,
    })
}

/// Builds the proxy for `source` and commits it to `sink`.
///
/// `armature` is the sink-side handle of the same armature that `source`
/// reads from.
pub fn generate_proxy_mesh<A, S>(
    source: &A,
    armature: S::ArmatureRef,
    sink: &mut S,
    settings: &ProxyMeshSettings,
) -> Result<S::Object>
where
    A: ArmatureSource + ?Sized,
    S: MeshSink,
{
    build_proxy_mesh(source, settings)?.commit(sink, armature)
}
