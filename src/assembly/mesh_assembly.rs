use core::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;

use crate::errors::{ProxyError, Result};
use crate::resources::geometry::{BoundingBox, Face};
use crate::resources::primitives::BoneShape;

/// Rigid vertex group: every listed vertex is driven 100% by one bone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroup {
    pub name: String,
    /// Global vertex indices contributed by the bone. Each bone's vertices are
    /// appended in one block, so the set is always contiguous.
    pub indices: Range<u32>,
}

impl VertexGroup {
    #[inline]
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// GPU-ready skinned vertex with a single full-weight joint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinnedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub joints: [u16; 4],
    pub weights: [f32; 4],
}

/// Armature-space proxy mesh, built one bone at a time.
///
/// # Invariants
///
/// - Every face index is within `0..vertex_count()`.
/// - The vertex groups partition the vertex range: each vertex belongs to
///   exactly one group.
///
/// Both hold after every successful [`append_bone_contribution`]
/// (see [`check_integrity`]).
///
/// [`append_bone_contribution`]: Self::append_bone_contribution
/// [`check_integrity`]: Self::check_integrity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAssembly {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    bindings: Vec<VertexGroup>,
    lookup: FxHashMap<String, usize>,
}

impl MeshAssembly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffers for `bone_count` bone shapes.
    #[must_use]
    pub fn with_bone_capacity(bone_count: usize) -> Self {
        use crate::resources::primitives::bone_shape::{
            BONE_SHAPE_FACE_COUNT, BONE_SHAPE_VERTEX_COUNT,
        };

        Self {
            vertices: Vec::with_capacity(bone_count * BONE_SHAPE_VERTEX_COUNT),
            faces: Vec::with_capacity(bone_count * BONE_SHAPE_FACE_COUNT),
            bindings: Vec::with_capacity(bone_count),
            lookup: FxHashMap::default(),
        }
    }

    /// Appends one bone's shape, placed by `rest_transform`, and records its
    /// rigid vertex group.
    ///
    /// Returns the index offset of the bone's first vertex. Nothing is
    /// appended on error.
    pub fn append_bone_contribution(
        &mut self,
        bone_name: &str,
        shape: &BoneShape,
        rest_transform: &Affine3A,
    ) -> Result<u32> {
        if self.lookup.contains_key(bone_name) {
            return Err(ProxyError::DuplicateBoneName(bone_name.to_string()));
        }

        let end = self.vertices.len() + shape.vertices.len();
        let (Ok(offset), Ok(end)) = (u32::try_from(self.vertices.len()), u32::try_from(end))
        else {
            return Err(ProxyError::VertexIndexOverflow(end));
        };

        self.vertices.extend(
            shape
                .vertices
                .iter()
                .map(|&v| rest_transform.transform_point3(v)),
        );
        self.faces
            .extend(shape.faces.iter().map(|face| face.offset_by(offset)));

        self.lookup.insert(bone_name.to_string(), self.bindings.len());
        self.bindings.push(VertexGroup {
            name: bone_name.to_string(),
            indices: offset..end,
        });

        log::trace!("Appended bone '{bone_name}' at vertex offset {offset}");

        Ok(offset)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Vertex groups in bone traversal order.
    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[VertexGroup] {
        &self.bindings
    }

    #[must_use]
    pub fn binding(&self, bone_name: &str) -> Option<&VertexGroup> {
        self.lookup.get(bone_name).map(|&i| &self.bindings[i])
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Verifies face bounds and the vertex group partition.
    pub fn check_integrity(&self) -> std::result::Result<(), String> {
        let count = self.vertices.len();

        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.indices().iter().find(|&&i| i as usize >= count) {
                return Err(format!(
                    "face {face_index} references vertex {bad}, but only {count} exist"
                ));
            }
        }

        let mut owner: Vec<Option<usize>> = vec![None; count];
        for (group_index, group) in self.bindings.iter().enumerate() {
            for i in group.indices.clone() {
                let Some(slot) = owner.get_mut(i as usize) else {
                    return Err(format!("group '{}' lists missing vertex {i}", group.name));
                };
                if let Some(prev) = slot.replace(group_index) {
                    return Err(format!(
                        "vertex {i} is claimed by both '{}' and '{}'",
                        self.bindings[prev].name, group.name
                    ));
                }
            }
        }

        if let Some(orphan) = owner.iter().position(Option::is_none) {
            return Err(format!("vertex {orphan} belongs to no group"));
        }

        Ok(())
    }

    // ========================================================================
    // Render Export
    // ========================================================================

    /// Flat triangle list; quads are split along their 0-2 diagonal.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(Face::triangles)
            .flatten()
            .collect()
    }

    /// Area-weighted smooth vertex normals.
    #[must_use]
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for [i0, i1, i2] in self.faces.iter().flat_map(Face::triangles) {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let v0 = self.vertices[i0];
            let v1 = self.vertices[i1];
            let v2 = self.vertices[i2];

            // |cross| is twice the triangle area
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        normals
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Bounds of the vertices bound to bone `name`.
    #[must_use]
    pub fn bone_bounding_box(&self, name: &str) -> Option<BoundingBox> {
        let group = self.binding(name)?;
        let range = group.indices.start as usize..group.indices.end as usize;
        BoundingBox::from_points(self.vertices.get(range)?)
    }

    /// Interleaved skinned vertices, joint index = bone traversal index.
    ///
    /// Joint indices are `u16`; groups past `u16::MAX` saturate.
    #[must_use]
    pub fn skinned_vertices(&self) -> Vec<SkinnedVertex> {
        let normals = self.vertex_normals();
        let mut out = Vec::with_capacity(self.vertices.len());

        for (joint, group) in self.bindings.iter().enumerate() {
            let joint = u16::try_from(joint).unwrap_or(u16::MAX);
            for i in group.indices.clone() {
                let i = i as usize;
                out.push(SkinnedVertex {
                    position: self.vertices[i].to_array(),
                    normal: normals[i].to_array(),
                    joints: [joint, 0, 0, 0],
                    weights: [1.0, 0.0, 0.0, 0.0],
                });
            }
        }
        out
    }
}
