use glam::{Affine3A, Vec3};

/// A polygon of a proxy mesh, as indices into a vertex sequence.
///
/// Proxy meshes only ever contain triangles (the pointed end caps) and quads
/// (the side walls), so the arity is encoded in the type instead of a
/// variable-length list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Triangle(i) => i,
            Face::Quad(i) => i,
        }
    }

    /// Number of corners (3 or 4).
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.indices().len()
    }

    /// Shifts every index by `offset`, keeping the arity.
    #[inline]
    #[must_use]
    pub fn offset_by(self, offset: u32) -> Self {
        match self {
            Face::Triangle(i) => Face::Triangle(i.map(|v| v + offset)),
            Face::Quad(i) => Face::Quad(i.map(|v| v + offset)),
        }
    }

    /// Triangle fan of the face, preserving winding.
    ///
    /// Quads split along the 0-2 diagonal: (0, 1, 2), (0, 2, 3).
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let corners = self.indices();
        (1..corners.len() - 1).map(move |k| [corners[0], corners[k], corners[k + 1]])
    }
}

/// Unnormalized normal of a face, from the cross product of its first triangle.
///
/// Returns `None` if any index is out of range.
#[must_use]
pub fn face_normal(positions: &[Vec3], face: &Face) -> Option<Vec3> {
    let [a, b, c] = face.triangles().next()?;
    let v0 = *positions.get(a as usize)?;
    let v1 = *positions.get(b as usize)?;
    let v2 = *positions.get(c as usize)?;
    Some((v1 - v0).cross(v2 - v0))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Tight box around `points`, or `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |bb, &p| Self {
            min: bb.min.min(p),
            max: bb.max.max(p),
        }))
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.lerp(self.max, 0.5)
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box holding both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Axis-aligned box around the eight transformed corners.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = (0..8u8).map(|bits| {
            let pick = |axis: u8, lo: f32, hi: f32| if bits & (1 << axis) == 0 { lo } else { hi };
            matrix.transform_point3(Vec3::new(
                pick(0, self.min.x, self.max.x),
                pick(1, self.min.y, self.max.y),
                pick(2, self.min.z, self.max.z),
            ))
        });
        let first = matrix.transform_point3(self.min);
        corners.fold(Self { min: first, max: first }, |bb, p| Self {
            min: bb.min.min(p),
            max: bb.max.max(p),
        })
    }
}
