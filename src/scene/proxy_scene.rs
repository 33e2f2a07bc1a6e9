use core::ops::Range;

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::assembly::MeshAssembly;
use crate::errors::{ProxyError, Result};
use crate::resources::geometry::Face;
use crate::scene::armature::Armature;
use crate::settings::ProxyMeshSettings;
use crate::sink::{MeshSink, build_proxy_mesh};

new_key_type! {
    pub struct ObjectKey;
}

/// Named per-vertex weights. Weights are replaced, never accumulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGroup {
    pub name: String,
    pub weights: FxHashMap<u32, f32>,
}

impl WeightedGroup {
    #[inline]
    #[must_use]
    pub fn weight(&self, vertex: u32) -> Option<f32> {
        self.weights.get(&vertex).copied()
    }
}

/// Skinning binding from a mesh object to an armature object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmatureDeform {
    pub armature: ObjectKey,
    /// Look up bone influence through vertex groups named after bones.
    pub use_vertex_groups: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MeshObject {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub vertex_groups: Vec<WeightedGroup>,
    pub deformers: Vec<ArmatureDeform>,
}

impl MeshObject {
    #[must_use]
    pub fn vertex_group(&self, name: &str) -> Option<&WeightedGroup> {
        self.vertex_groups.iter().find(|g| g.name == name)
    }
}

#[derive(Debug, Clone)]
pub enum ObjectData {
    Armature(Armature),
    Mesh(MeshObject),
}

/// An object in the scene hierarchy.
///
/// World matrix = parent world * `parent_inverse` * `local_matrix`.
/// `parent_inverse` is captured when parenting so the child does not jump.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
    pub(crate) parent: Option<ObjectKey>,
    pub(crate) children: Vec<ObjectKey>,
    pub(crate) local_matrix: Affine3A,
    pub(crate) parent_inverse: Affine3A,
}

impl SceneObject {
    fn new(name: &str, data: ObjectData, local_matrix: Affine3A) -> Self {
        Self {
            name: name.to_string(),
            data,
            parent: None,
            children: Vec::new(),
            local_matrix,
            parent_inverse: Affine3A::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }
}

/// Minimal in-memory host scene: armature objects in, proxy mesh objects out.
#[derive(Debug, Default)]
pub struct ProxyScene {
    objects: SlotMap<ObjectKey, SceneObject>,
}

impl ProxyScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an armature object placed at its own world matrix.
    pub fn add_armature(&mut self, armature: Armature) -> ObjectKey {
        let name = armature.name.clone();
        let world = armature.world_matrix;
        self.objects
            .insert(SceneObject::new(&name, ObjectData::Armature(armature), world))
    }

    /// Generates a proxy mesh for the armature object `armature` and links it
    /// into the scene as that armature's child.
    pub fn add_proxy_mesh(
        &mut self,
        armature: ObjectKey,
        settings: &ProxyMeshSettings,
    ) -> Result<ObjectKey> {
        let proxy = build_proxy_mesh(self.armature(armature)?, settings)?;
        proxy.commit(self, armature)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn armature(&self, key: ObjectKey) -> Result<&Armature> {
        let object = self.objects.get(key).ok_or(ProxyError::ObjectNotFound)?;
        match &object.data {
            ObjectData::Armature(armature) => Ok(armature),
            ObjectData::Mesh(_) => Err(ProxyError::NotAnArmature(object.name.clone())),
        }
    }

    #[must_use]
    pub fn mesh(&self, key: ObjectKey) -> Option<&MeshObject> {
        match &self.objects.get(key)?.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Armature(_) => None,
        }
    }

    /// First object called `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find_map(|(key, obj)| (obj.name == name).then_some(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolves the parent chain into a world matrix.
    pub fn world_matrix(&self, key: ObjectKey) -> Result<Affine3A> {
        let object = self.objects.get(key).ok_or(ProxyError::ObjectNotFound)?;
        let local = object.parent_inverse * object.local_matrix;
        match object.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * local),
            None => Ok(local),
        }
    }

    fn is_ancestor(&self, ancestor: ObjectKey, mut key: ObjectKey) -> bool {
        while let Some(parent) = self.objects.get(key).and_then(|o| o.parent) {
            if parent == ancestor {
                return true;
            }
            key = parent;
        }
        false
    }

    fn mesh_mut(&mut self, key: ObjectKey) -> Result<&mut MeshObject> {
        let object = self.objects.get_mut(key).ok_or(ProxyError::ObjectNotFound)?;
        match &mut object.data {
            ObjectData::Mesh(mesh) => Ok(mesh),
            ObjectData::Armature(_) => Err(ProxyError::ObjectNotFound),
        }
    }
}

impl MeshSink for ProxyScene {
    type Object = ObjectKey;
    type ArmatureRef = ObjectKey;

    fn create_mesh_object(&mut self, name: &str, assembly: &MeshAssembly) -> Result<ObjectKey> {
        let mesh = MeshObject {
            positions: assembly.vertices().to_vec(),
            faces: assembly.faces().to_vec(),
            ..Default::default()
        };
        Ok(self.objects.insert(SceneObject::new(
            name,
            ObjectData::Mesh(mesh),
            Affine3A::IDENTITY,
        )))
    }

    fn set_world_matrix(&mut self, object: ObjectKey, matrix: Affine3A) -> Result<()> {
        let parent_space = match self.objects.get(object).ok_or(ProxyError::ObjectNotFound)? {
            SceneObject {
                parent: Some(parent),
                parent_inverse,
                ..
            } => self.world_matrix(*parent)? * *parent_inverse,
            _ => Affine3A::IDENTITY,
        };

        let obj = self.objects.get_mut(object).ok_or(ProxyError::ObjectNotFound)?;
        obj.local_matrix = parent_space.inverse() * matrix;
        Ok(())
    }

    fn assign_rigid_group(
        &mut self,
        object: ObjectKey,
        name: &str,
        indices: Range<u32>,
    ) -> Result<()> {
        let mesh = self.mesh_mut(object)?;
        let count = mesh.positions.len();
        if let Some(index) = indices.clone().find(|&i| i as usize >= count) {
            return Err(ProxyError::VertexOutOfRange { index, count });
        }

        let group = match mesh.vertex_groups.iter().position(|g| g.name == name) {
            Some(i) => &mut mesh.vertex_groups[i],
            None => {
                mesh.vertex_groups.push(WeightedGroup {
                    name: name.to_string(),
                    weights: FxHashMap::default(),
                });
                let last = mesh.vertex_groups.len() - 1;
                &mut mesh.vertex_groups[last]
            }
        };

        for i in indices {
            group.weights.insert(i, 1.0);
        }
        Ok(())
    }

    fn add_armature_deform(
        &mut self,
        object: ObjectKey,
        armature: ObjectKey,
        use_vertex_groups: bool,
    ) -> Result<()> {
        self.armature(armature)?;
        self.mesh_mut(object)?.deformers.push(ArmatureDeform {
            armature,
            use_vertex_groups,
        });
        Ok(())
    }

    fn set_parent(&mut self, object: ObjectKey, armature: ObjectKey) -> Result<()> {
        let parent_name = self.armature(armature)?.name.clone();
        let child_name = &self.objects.get(object).ok_or(ProxyError::ObjectNotFound)?.name;
        if object == armature {
            log::warn!("Cannot parent '{child_name}' to itself");
            return Err(ProxyError::SelfParent(child_name.clone()));
        }
        if self.is_ancestor(object, armature) {
            log::warn!("Refusing to parent '{child_name}' to its descendant '{parent_name}'");
            return Err(ProxyError::ParentCycle {
                child: child_name.clone(),
                parent: parent_name,
            });
        }

        // Keep the current world placement across the reparent
        let world = self.world_matrix(object)?;
        let parent_world = self.world_matrix(armature)?;

        let old_parent = self.objects.get(object).and_then(|o| o.parent);
        if let Some(p) = old_parent
            && let Some(old) = self.objects.get_mut(p)
            && let Some(i) = old.children.iter().position(|&c| c == object)
        {
            old.children.remove(i);
        }

        let parent = self.objects.get_mut(armature).ok_or(ProxyError::ObjectNotFound)?;
        parent.children.push(object);

        let child = self.objects.get_mut(object).ok_or(ProxyError::ObjectNotFound)?;
        child.parent = Some(armature);
        child.local_matrix = world;
        child.parent_inverse = parent_world.inverse();
        Ok(())
    }
}
