//! Axis-aligned bounding boxes.

use glam::{Mat4, Vec3};

/// Minimal axis-aligned box enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

/// Anything that can report its spatial extent.
///
/// Returns `None` when the object has no geometry at all.
pub trait Bounded {
    /// Minimal axis-aligned box enclosing the object.
    fn bounding_box(&self) -> Option<BoundingBox>;
}

impl BoundingBox {
    /// Box spanning the two corners (component-wise min/max).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box with the given center and full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tightest box around `points`, or `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(None, |acc: Option<Self>, p| {
            Some(acc.map_or(Self { min: p, max: p }, |b| b.expanded_to(p)))
        })
    }

    /// Grow the box to contain `point`.
    #[must_use]
    pub fn expanded_to(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Axis-aligned box around this box after an affine transform.
    #[must_use]
    pub fn transformed(&self, transform: Mat4) -> Self {
        let corners = self.corners().map(|c| transform.transform_point3(c));
        // Eight corners are never empty.
        Self::from_points(corners).unwrap_or(*self)
    }

    /// The eight corners, min corner first.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extents along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// Radius of the bounding sphere through the box corners.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.diagonal() * 0.5
    }

    /// `true` when the box has zero extent in every dimension.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.size() == Vec3::ZERO
    }
}

impl Bounded for BoundingBox {
    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(*self)
    }
}

impl Bounded for [Vec3] {
    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_is_tight() {
        let b = BoundingBox::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(b.center(), Vec3::new(0.0, 0.5, 2.0));
        assert_eq!(b.size(), Vec3::new(2.0, 5.0, 4.0));
    }

    #[test]
    fn empty_point_set_has_no_box() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
        let none: &[Vec3] = &[];
        assert!(none.bounding_box().is_none());
    }

    #[test]
    fn single_point_is_degenerate() {
        let b = BoundingBox::from_points([Vec3::ONE]).unwrap();
        assert!(b.is_point());
        assert_eq!(b.diagonal(), 0.0);
    }

    #[test]
    fn cube_diagonal() {
        let b = BoundingBox::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        assert!((b.diagonal() - 2.0 * 3.0_f32.sqrt()).abs() < 1e-6);
        assert!((b.radius() - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn transform_moves_and_rotates() {
        let b = BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let moved = b.transformed(Mat4::from_translation(Vec3::X * 10.0));
        assert_eq!(moved.min, Vec3::new(10.0, 0.0, 0.0));

        let rotated = b.transformed(Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        // x-extent of 2 becomes a y-extent of 2
        assert!((rotated.size().y - 2.0).abs() < 1e-5);
        assert!((rotated.size().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn union_spans_both_boxes() {
        let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(3.0));
        assert!(!u.is_point());
    }
}
