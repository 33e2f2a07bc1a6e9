use crate::assembly::mesh_assembly::MeshAssembly;
use crate::errors::{ProxyError, Result};
use crate::resources::primitives::create_bone_shape;
use crate::scene::bone::Bone;
use crate::settings::ProxyMeshSettings;

/// Builds the armature-space proxy mesh for `bones`, in order.
///
/// Each bone contributes one [`BoneShape`](crate::resources::BoneShape) sized
/// by `settings.radius`, placed by its rest transform, and bound rigidly to
/// the bone through a vertex group of the same name.
///
/// # Errors
///
/// - [`ProxyError::EmptyArmature`] if `bones` is empty.
/// - [`ProxyError::DuplicateBoneName`] if two bones share a name.
/// - [`ProxyError::VertexIndexOverflow`] if the mesh outgrows `u32` indices.
///
/// Degenerate bones (zero length) are not rejected; they produce a
/// flattened shape.
pub fn assemble(bones: &[Bone], settings: &ProxyMeshSettings) -> Result<MeshAssembly> {
    assemble_named("<unnamed>", bones, settings)
}

pub(crate) fn assemble_named(
    armature: &str,
    bones: &[Bone],
    settings: &ProxyMeshSettings,
) -> Result<MeshAssembly> {
    if bones.is_empty() {
        return Err(ProxyError::EmptyArmature {
            armature: armature.to_string(),
        });
    }

    let mut assembly = MeshAssembly::with_bone_capacity(bones.len());

    for bone in bones {
        let radius = settings.radius.radius_for(bone.length());
        let shape = create_bone_shape(radius, bone.length());
        assembly.append_bone_contribution(bone.name(), &shape, bone.rest_transform())?;
    }

    log::debug!(
        "Assembled proxy for '{armature}': {} bones, {} vertices, {} faces",
        bones.len(),
        assembly.vertex_count(),
        assembly.face_count()
    );

    Ok(assembly)
}
