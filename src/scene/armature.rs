use glam::Affine3A;

use crate::scene::bone::Bone;
use crate::sink::ArmatureSource;

/// An ordered set of bones plus the armature's own placement in the world.
///
/// Bone order is significant: it is the traversal order of proxy assembly and
/// the joint index order of exported skinning data.
#[derive(Debug, Clone)]
pub struct Armature {
    pub name: String,
    pub world_matrix: Affine3A,
    bones: Vec<Bone>,
}

impl Armature {
    #[must_use]
    pub fn new(name: &str, bones: Vec<Bone>) -> Self {
        Self {
            name: name.to_string(),
            world_matrix: Affine3A::IDENTITY,
            bones,
        }
    }

    #[must_use]
    pub fn with_world_matrix(mut self, world_matrix: Affine3A) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Index of the first bone called `name`.
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name() == name)
    }

    /// Inverse rest transforms in bone order.
    ///
    /// Transforms armature-space positions into each bone's local space, which
    /// is what a skinning deformer multiplies with the posed bone matrices.
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> Vec<Affine3A> {
        self.bones
            .iter()
            .map(|b| b.rest_transform().inverse())
            .collect()
    }
}

impl ArmatureSource for Armature {
    fn name(&self) -> &str {
        &self.name
    }

    fn bones(&self) -> &[Bone] {
        &self.bones
    }

    fn world_matrix(&self) -> Affine3A {
        self.world_matrix
    }
}
