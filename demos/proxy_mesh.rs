//! Builds a small humanoid armature, generates its proxy mesh and prints a
//! summary.
//!
//! Run with: RUST_LOG=debug cargo run --example proxy_mesh [settings.json]

use glam::{Affine3A, Vec3};

use armature_proxy::sink::build_proxy_mesh;
use armature_proxy::{Armature, Bone, ProxyMeshSettings, ProxyScene};

fn humanoid() -> Armature {
    let bone = |name: &str, head: [f32; 3], tail: [f32; 3]| {
        Bone::from_head_tail(name, Vec3::from_array(head), Vec3::from_array(tail), 0.0)
    };

    Armature::new(
        "Humanoid",
        vec![
            bone("hips", [0.0, 0.9, 0.0], [0.0, 1.05, 0.0]),
            bone("spine", [0.0, 1.05, 0.0], [0.0, 1.35, 0.02]),
            bone("neck", [0.0, 1.35, 0.02], [0.0, 1.5, 0.0]),
            bone("head", [0.0, 1.5, 0.0], [0.0, 1.75, 0.0]),
            bone("upper_arm.L", [0.18, 1.32, 0.0], [0.45, 1.32, 0.0]),
            bone("forearm.L", [0.45, 1.32, 0.0], [0.7, 1.32, 0.0]),
            bone("upper_arm.R", [-0.18, 1.32, 0.0], [-0.45, 1.32, 0.0]),
            bone("forearm.R", [-0.45, 1.32, 0.0], [-0.7, 1.32, 0.0]),
            bone("thigh.L", [0.1, 0.9, 0.0], [0.1, 0.5, 0.02]),
            bone("shin.L", [0.1, 0.5, 0.02], [0.1, 0.08, 0.0]),
            bone("thigh.R", [-0.1, 0.9, 0.0], [-0.1, 0.5, 0.02]),
            bone("shin.R", [-0.1, 0.5, 0.02], [-0.1, 0.08, 0.0]),
        ],
    )
    .with_world_matrix(Affine3A::from_translation(Vec3::new(2.0, 0.0, 0.0)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ProxyMeshSettings::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ProxyMeshSettings::default(),
    };

    let mut scene = ProxyScene::new();
    let armature = scene.add_armature(humanoid());
    let proxy = scene.add_proxy_mesh(armature, &settings)?;

    let object = scene.object(proxy).ok_or(armature_proxy::ProxyError::ObjectNotFound)?;
    let mesh = scene.mesh(proxy).ok_or(armature_proxy::ProxyError::ObjectNotFound)?;

    println!("Proxy object: {}", object.name);
    println!("  vertices:      {}", mesh.positions.len());
    println!("  faces:         {}", mesh.faces.len());
    println!("  vertex groups: {}", mesh.vertex_groups.len());
    println!("  world origin:  {}", scene.world_matrix(proxy)?.translation);

    if let Some(bounds) = build_proxy_mesh(scene.armature(armature)?, &settings)?.world_bounds() {
        println!("  world center:  {}", bounds.center());
        println!("  world size:    {}", bounds.size());
    }

    for group in &mesh.vertex_groups {
        let mut vertices: Vec<u32> = group.weights.keys().copied().collect();
        vertices.sort_unstable();
        println!(
            "  {:<12} -> vertices {}..={}",
            group.name,
            vertices.first().copied().unwrap_or_default(),
            vertices.last().copied().unwrap_or_default()
        );
    }

    Ok(())
}
