use glam::{Affine3A, Quat, Vec3};

/// A read-only bone record as exposed by an armature.
///
/// # Coordinate Conventions
///
/// The bone's local +Y axis runs from its head (local origin) to its tail at
/// `(0, length, 0)`. `rest_transform` maps local bone space to armature space
/// in the rest (bind) pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    name: String,
    length: f32,
    rest_transform: Affine3A,
}

impl Bone {
    #[must_use]
    pub fn new(name: impl Into<String>, length: f32, rest_transform: Affine3A) -> Self {
        Self {
            name: name.into(),
            length,
            rest_transform,
        }
    }

    /// Builds a bone from armature-space head and tail positions.
    ///
    /// The local +Y axis is aimed from `head` to `tail`, then rotated by
    /// `roll` radians around itself. A zero-length bone keeps the identity
    /// orientation.
    #[must_use]
    pub fn from_head_tail(name: impl Into<String>, head: Vec3, tail: Vec3, roll: f32) -> Self {
        let axis = tail - head;
        let length = axis.length();

        let aim = if length > f32::EPSILON {
            Quat::from_rotation_arc(Vec3::Y, axis / length)
        } else {
            Quat::IDENTITY
        };
        let rotation = aim * Quat::from_rotation_y(roll);

        Self::new(name, length, Affine3A::from_rotation_translation(rotation, head))
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn rest_transform(&self) -> &Affine3A {
        &self.rest_transform
    }

    /// Armature-space head position.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Vec3 {
        self.rest_transform.translation.into()
    }

    /// Armature-space tail position.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Vec3 {
        self.rest_transform.transform_point3(Vec3::new(0.0, self.length, 0.0))
    }
}
