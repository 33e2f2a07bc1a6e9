use glam::Vec3;

use crate::resources::geometry::Face;

/// Number of vertices in every [`BoneShape`].
pub const BONE_SHAPE_VERTEX_COUNT: usize = 10;
/// Number of faces in every [`BoneShape`].
pub const BONE_SHAPE_FACE_COUNT: usize = 12;
/// Top cross-section half-width relative to the base.
pub const TOP_RADIUS_RATIO: f32 = 0.5;

/// Base corner indices (Y = 0).
pub const BASE_CORNERS: [u32; 4] = [0, 1, 2, 3];
/// Top corner indices (Y = length).
pub const TOP_CORNERS: [u32; 4] = [4, 5, 6, 7];
pub const BASE_APEX: u32 = 8;
pub const TOP_APEX: u32 = 9;

/// Local-space proxy solid for a single bone.
///
/// Y is the bone axis, running from the head at Y = 0 to the tail at
/// Y = `length`. The solid is a square prism tapering to half width at the
/// tail, closed by a pyramid on each end.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneShape {
    pub vertices: [Vec3; BONE_SHAPE_VERTEX_COUNT],
    pub faces: [Face; BONE_SHAPE_FACE_COUNT],
}

// Shared by every bone; only the vertex positions vary.
const FACES: [Face; BONE_SHAPE_FACE_COUNT] = [
    // Base cap
    Face::Triangle([8, 1, 0]),
    Face::Triangle([8, 2, 1]),
    Face::Triangle([8, 3, 2]),
    Face::Triangle([8, 0, 3]),
    // Top cap
    Face::Triangle([9, 4, 5]),
    Face::Triangle([9, 5, 6]),
    Face::Triangle([9, 6, 7]),
    Face::Triangle([9, 7, 4]),
    // Side walls
    Face::Quad([0, 1, 5, 4]),
    Face::Quad([1, 2, 6, 5]),
    Face::Quad([2, 3, 7, 6]),
    Face::Quad([3, 0, 4, 7]),
];

/// Builds the proxy solid for a bone of the given base `radius` and `length`.
///
/// Callers derive `radius` from the bone length (see
/// [`RadiusSettings::radius_for`](crate::settings::RadiusSettings::radius_for));
/// no validation happens here, and a zero `length` yields a flattened but
/// well-formed shape.
#[must_use]
pub fn create_bone_shape(radius: f32, length: f32) -> BoneShape {
    let r = radius;
    let t = TOP_RADIUS_RATIO * radius;

    let vertices = [
        // Base cross section
        Vec3::new(-r, 0.0, r),
        Vec3::new(r, 0.0, r),
        Vec3::new(r, 0.0, -r),
        Vec3::new(-r, 0.0, -r),
        // Top cross section
        Vec3::new(-t, length, t),
        Vec3::new(t, length, t),
        Vec3::new(t, length, -t),
        Vec3::new(-t, length, -t),
        // End points
        Vec3::new(0.0, -r, 0.0),
        Vec3::new(0.0, length + t, 0.0),
    ];

    BoneShape {
        vertices,
        faces: FACES,
    }
}
