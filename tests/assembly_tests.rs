//! Mesh Assembly Tests
//!
//! Tests for:
//! - Per-bone placement by rest transform
//! - Index offsetting across bones
//! - Vertex group partition of the vertex range
//! - Determinism
//! - Precondition failures (empty / duplicate names)
//! - Render export (triangles, normals, skinned vertices, bounds)

use glam::{Affine3A, Quat, Vec3};

use armature_proxy::assembly::{MeshAssembly, SkinnedVertex, assemble};
use armature_proxy::errors::ProxyError;
use armature_proxy::resources::primitives::create_bone_shape;
use armature_proxy::scene::{Armature, Bone};
use armature_proxy::settings::{ProxyMeshSettings, RadiusSettings};
use armature_proxy::sink::build_proxy_mesh;

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn default_radius(length: f32) -> f32 {
    0.10 * (0.10 + length)
}

fn chain(count: usize) -> Vec<Bone> {
    (0..count)
        .map(|i| {
            let y = i as f32;
            Bone::from_head_tail(
                format!("bone_{i}"),
                Vec3::new(0.0, y, 0.0),
                Vec3::new(0.3 * y, y + 1.0, 0.1),
                0.1 * y,
            )
        })
        .collect()
}

fn two_bone_scenario() -> Vec<Bone> {
    vec![
        Bone::new("bone_A", 1.0, Affine3A::IDENTITY),
        Bone::new("bone_B", 2.0, Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0))),
    ]
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_bone_scenario_layout() {
    let assembly = assemble(&two_bone_scenario(), &ProxyMeshSettings::default()).unwrap();

    assert_eq!(assembly.vertex_count(), 20);
    assert_eq!(assembly.face_count(), 24);
    assert_eq!(assembly.binding("bone_A").unwrap().indices, 0..10);
    assert_eq!(assembly.binding("bone_B").unwrap().indices, 10..20);

    let local_b = create_bone_shape(default_radius(2.0), 2.0);
    for (k, local) in local_b.vertices.iter().enumerate() {
        let global = assembly.vertices()[10 + k];
        assert!(vec3_approx(global, *local + Vec3::Y));
    }
}

#[test]
fn identity_bone_keeps_local_vertices() {
    let bones = [Bone::new("root", 2.0, Affine3A::IDENTITY)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();

    let local = create_bone_shape(default_radius(2.0), 2.0);
    assert_eq!(assembly.vertices(), local.vertices.as_slice());
    assert_eq!(assembly.faces(), local.faces.as_slice());
}

#[test]
fn rest_transform_is_applied_to_every_vertex() {
    let rest = Affine3A::from_scale_rotation_translation(
        Vec3::splat(1.5),
        Quat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 0.7),
        Vec3::new(4.0, -2.0, 0.5),
    );
    let bones = [Bone::new("arm", 0.8, rest)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();

    let local = create_bone_shape(default_radius(0.8), 0.8);
    for (global, local) in assembly.vertices().iter().zip(local.vertices) {
        assert!(vec3_approx(*global, rest.transform_point3(local)));
    }
}

#[test]
fn head_tail_bone_spans_head_to_tail() {
    let head = Vec3::new(1.0, 2.0, 3.0);
    let tail = Vec3::new(1.0, 2.0, 5.0);
    let bones = [Bone::from_head_tail("spine", head, tail, 0.0)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();

    let r = default_radius(2.0);
    // Apexes sit on the bone axis, just past head and tail
    assert!(vec3_approx(assembly.vertices()[8], head - Vec3::Z * r));
    assert!(vec3_approx(assembly.vertices()[9], tail + Vec3::Z * 0.5 * r));
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn faces_reference_valid_vertices() {
    for count in [1, 2, 7, 40] {
        let assembly = assemble(&chain(count), &ProxyMeshSettings::default()).unwrap();
        let total = assembly.vertex_count() as u32;
        for face in assembly.faces() {
            assert!(face.indices().iter().all(|&i| i < total));
        }
        assert_eq!(assembly.face_count(), count * 12);
    }
}

#[test]
fn face_offsets_follow_bone_order() {
    let assembly = assemble(&chain(3), &ProxyMeshSettings::default()).unwrap();
    for (bone, faces) in assembly.faces().chunks(12).enumerate() {
        let lo = bone as u32 * 10;
        for face in faces {
            assert!(face.indices().iter().all(|i| (lo..lo + 10).contains(i)));
        }
    }
}

#[test]
fn bindings_partition_vertex_range() {
    let assembly = assemble(&chain(9), &ProxyMeshSettings::default()).unwrap();
    let mut seen = vec![0u32; assembly.vertex_count()];

    for group in assembly.bindings() {
        assert_eq!(group.len(), 10);
        for i in group.indices.clone() {
            seen[i as usize] += 1;
        }
    }

    assert!(seen.iter().all(|&n| n == 1));
    assert!(assembly.check_integrity().is_ok());
}

#[test]
fn bindings_keep_bone_order_and_names() {
    let bones = chain(4);
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();
    let names: Vec<&str> = assembly.bindings().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["bone_0", "bone_1", "bone_2", "bone_3"]);
    assert!(assembly.binding("missing").is_none());
}

#[test]
fn assembly_is_deterministic() {
    let bones = chain(6);
    let settings = ProxyMeshSettings::default();
    let a = assemble(&bones, &settings).unwrap();
    let b = assemble(&bones, &settings).unwrap();

    let bits = |m: &MeshAssembly| -> Vec<[u32; 3]> {
        m.vertices()
            .iter()
            .map(|v| v.to_array().map(f32::to_bits))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.faces(), b.faces());
    assert_eq!(a.bindings(), b.bindings());
}

#[test]
fn accumulator_returns_offsets() {
    let shape = create_bone_shape(0.1, 1.0);
    let mut assembly = MeshAssembly::new();
    let offsets: Vec<u32> = ["a", "b", "c"]
        .iter()
        .map(|name| {
            assembly
                .append_bone_contribution(name, &shape, &Affine3A::IDENTITY)
                .unwrap()
        })
        .collect();
    assert_eq!(offsets, [0, 10, 20]);
}

// ============================================================================
// Settings & Degenerate Input
// ============================================================================

#[test]
fn radius_follows_settings() {
    let settings = ProxyMeshSettings {
        radius: RadiusSettings {
            scale: 0.5,
            padding: 0.0,
        },
        ..Default::default()
    };
    let bones = [Bone::new("b", 2.0, Affine3A::IDENTITY)];
    let assembly = assemble(&bones, &settings).unwrap();
    assert!(vec3_approx(assembly.vertices()[1], Vec3::new(1.0, 0.0, 1.0)));
}

#[test]
fn zero_length_bone_is_accepted() {
    let bones = [Bone::new("tip", 0.0, Affine3A::IDENTITY)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();
    assert_eq!(assembly.vertex_count(), 10);
    assert_eq!(assembly.face_count(), 12);
    assert!(assembly.vertices().iter().all(|v| v.is_finite()));
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn empty_bone_list_is_rejected() {
    let err = assemble(&[], &ProxyMeshSettings::default()).unwrap_err();
    assert!(matches!(err, ProxyError::EmptyArmature { .. }));
}

#[test]
fn duplicate_bone_names_are_rejected() {
    let bones = [
        Bone::new("hand", 1.0, Affine3A::IDENTITY),
        Bone::new("hand", 1.0, Affine3A::IDENTITY),
    ];
    let err = assemble(&bones, &ProxyMeshSettings::default()).unwrap_err();
    assert!(matches!(err, ProxyError::DuplicateBoneName(name) if name == "hand"));
}

// ============================================================================
// Render Export
// ============================================================================

#[test]
fn triangle_list_splits_quads() {
    let assembly = assemble(&chain(2), &ProxyMeshSettings::default()).unwrap();
    let indices = assembly.triangle_indices();

    // 8 cap triangles + 4 quads * 2 per bone
    assert_eq!(indices.len(), 2 * 16 * 3);
    // First wall quad [0, 1, 5, 4] -> (0, 1, 5), (0, 5, 4)
    assert_eq!(&indices[24..30], &[0, 1, 5, 0, 5, 4]);
}

#[test]
fn vertex_normals_are_unit_length() {
    let assembly = assemble(&chain(3), &ProxyMeshSettings::default()).unwrap();
    let normals = assembly.vertex_normals();
    assert_eq!(normals.len(), assembly.vertex_count());
    for n in normals {
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn apex_normals_point_along_bone() {
    let bones = [Bone::new("b", 1.0, Affine3A::IDENTITY)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();
    let normals = assembly.vertex_normals();
    assert!(vec3_approx(normals[8], Vec3::NEG_Y));
    assert!(vec3_approx(normals[9], Vec3::Y));
}

#[test]
fn skinned_vertices_bind_each_vertex_to_its_bone() {
    let assembly = assemble(&chain(3), &ProxyMeshSettings::default()).unwrap();
    let skinned = assembly.skinned_vertices();
    assert_eq!(skinned.len(), 30);

    for (i, v) in skinned.iter().enumerate() {
        assert_eq!(v.joints, [(i / 10) as u16, 0, 0, 0]);
        assert_eq!(v.weights, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(v.position, assembly.vertices()[i].to_array());
    }

    let bytes: &[u8] = bytemuck::cast_slice(&skinned);
    assert_eq!(bytes.len(), 30 * std::mem::size_of::<SkinnedVertex>());
    assert_eq!(std::mem::size_of::<SkinnedVertex>(), 48);
}

#[test]
fn bounding_box_covers_all_vertices() {
    let assembly = assemble(&two_bone_scenario(), &ProxyMeshSettings::default()).unwrap();
    let bb = assembly.bounding_box().unwrap();

    let r_a = default_radius(1.0);
    let r_b = default_radius(2.0);
    assert!((bb.min.y - -r_a).abs() < EPSILON);
    assert!((bb.max.y - (3.0 + 0.5 * r_b)).abs() < EPSILON);
    for v in assembly.vertices() {
        assert!(v.cmpge(bb.min).all() && v.cmple(bb.max).all());
    }
}

#[test]
fn single_bone_bounds_center_and_size() {
    let bones = [Bone::new("b", 2.0, Affine3A::IDENTITY)];
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();
    let bb = assembly.bounding_box().unwrap();

    // Base square spans [-r, r]; apexes reach -r and length + r/2 along Y
    let r = default_radius(2.0);
    assert!(vec3_approx(bb.size(), Vec3::new(2.0 * r, 2.0 + 1.5 * r, 2.0 * r)));
    assert!(vec3_approx(bb.center(), Vec3::new(0.0, 1.0 - 0.25 * r, 0.0)));
}

#[test]
fn per_bone_bounds_union_to_assembly_bounds() {
    let bones = chain(5);
    let assembly = assemble(&bones, &ProxyMeshSettings::default()).unwrap();

    let merged = bones
        .iter()
        .map(|bone| assembly.bone_bounding_box(bone.name()).unwrap())
        .reduce(|a, b| a.union(&b))
        .unwrap();
    let whole = assembly.bounding_box().unwrap();
    assert!(vec3_approx(merged.min, whole.min));
    assert!(vec3_approx(merged.max, whole.max));
    assert!(assembly.bone_bounding_box("missing").is_none());
}

#[test]
fn world_bounds_follow_armature_placement() {
    let world = Affine3A::from_rotation_translation(
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::new(10.0, 0.0, -3.0),
    );
    let armature = Armature::new("Rig", two_bone_scenario()).with_world_matrix(world);
    let proxy = build_proxy_mesh(&armature, &ProxyMeshSettings::default()).unwrap();

    let local = proxy.assembly.bounding_box().unwrap();
    let bounds = proxy.world_bounds().unwrap();

    // A quarter turn about Z swaps the X and Y extents
    let size = local.size();
    assert!(vec3_approx(bounds.size(), Vec3::new(size.y, size.x, size.z)));
    assert!(vec3_approx(bounds.center(), world.transform_point3(local.center())));
    for v in proxy.assembly.vertices() {
        let p = world.transform_point3(*v);
        assert!(p.cmpge(bounds.min - EPSILON).all() && p.cmple(bounds.max + EPSILON).all());
    }
}
