//! Geometry record: positions, triangle indices, and semantic tags
//!
//! A [`Geometry`] is owned by whichever component creates it and is
//! read-only downstream; merge/transform helpers return or mutate before
//! handoff, never after.

use bytemuck::cast_slice;
use serde::{Serialize, Deserialize};
use hyperviz_math::{Vec3, Quat};
use crate::ShapeId;

/// Named radii for the nested shells of a 4D-family shape
///
/// Invariant: strictly decreasing, outer > layer1 > layer2 > layer3 > inner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellRadii {
    pub outer: f32,
    pub layer1: f32,
    pub layer2: f32,
    pub layer3: f32,
    pub inner: f32,
}

impl ShellRadii {
    /// Build five shells from an outer radius and a per-layer gap fraction
    ///
    /// Each shell is `1 - gap` times the previous one, so any gap in (0, 1)
    /// satisfies the strictly-decreasing invariant.
    pub fn from_outer_gap(outer: f32, gap: f32) -> Self {
        let step = 1.0 - gap;
        Self {
            outer,
            layer1: outer * step,
            layer2: outer * step * step,
            layer3: outer * step * step * step,
            inner: outer * step * step * step * step,
        }
    }

    /// The radii ordered outermost to innermost
    pub fn as_array(&self) -> [f32; 5] {
        [self.outer, self.layer1, self.layer2, self.layer3, self.inner]
    }

    /// Check the strictly-decreasing invariant
    pub fn is_strictly_decreasing(&self) -> bool {
        let r = self.as_array();
        r.windows(2).all(|w| w[0] > w[1]) && self.inner > 0.0
    }
}

/// Semantic tags carried by a geometry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryTags {
    /// The shape this geometry was built for
    pub shape: ShapeId,
    /// Number of merged polytope copies
    pub compound_arity: u32,
    /// Nested shell radii, present for 4D families
    pub shells: Option<ShellRadii>,
}

/// Ordered vertex positions + triangle indices + tags
#[derive(Clone, Debug)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    tags: GeometryTags,
}

impl Geometry {
    /// Create a new geometry from raw buffers
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, tags: GeometryTags) -> Self {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < positions.len()),
            "triangle index out of range"
        );
        Self {
            positions,
            indices,
            tags,
        }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices (three per triangle)
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Semantic tags
    pub fn tags(&self) -> &GeometryTags {
        &self.tags
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position buffer as a flat f32 slice (x0,y0,z0,x1,...) for upload
    pub fn position_data(&self) -> &[f32] {
        cast_slice(&self.positions)
    }

    /// Append another geometry's buffers, offsetting its indices
    ///
    /// Tags keep the receiver's shape; arity accumulates.
    pub fn merge(&mut self, other: &Geometry) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
        self.tags.compound_arity += other.tags.compound_arity;
    }

    /// Translate all positions in place
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Rotate all positions around the origin in place
    pub fn rotate(&mut self, rotation: Quat) {
        for p in &mut self.positions {
            *p = rotation.rotate(*p);
        }
    }

    /// Uniformly scale all positions toward/away from the origin in place
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p *= factor;
        }
    }

    /// Centroid of the vertex positions
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vec3::ZERO, |acc, &p| acc + p);
        sum / self.positions.len() as f32
    }

    /// Largest vertex distance from the origin
    pub fn max_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_tags() -> GeometryTags {
        GeometryTags {
            shape: ShapeId::Tetrahedron,
            compound_arity: 1,
            shells: None,
        }
    }

    fn unit_triangle() -> Geometry {
        Geometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            triangle_tags(),
        )
    }

    #[test]
    fn test_shell_radii_from_outer_gap() {
        let shells = ShellRadii::from_outer_gap(2.0, 0.25);
        assert!(shells.is_strictly_decreasing());
        assert_eq!(shells.outer, 2.0);
        assert!((shells.layer1 - 1.5).abs() < 1e-6);
        assert!((shells.inner - 2.0 * 0.75f32.powi(4)).abs() < 1e-6);
    }

    #[test]
    fn test_shell_radii_invariant_detects_violation() {
        let mut shells = ShellRadii::from_outer_gap(1.0, 0.2);
        shells.layer2 = shells.layer1; // not strictly decreasing
        assert!(!shells.is_strictly_decreasing());
    }

    #[test]
    fn test_counts() {
        let g = unit_triangle();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.triangle_count(), 1);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = unit_triangle();
        let b = unit_triangle();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(a.tags().compound_arity, 2);
    }

    #[test]
    fn test_translate_scale() {
        let mut g = unit_triangle();
        g.translate(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(g.positions()[0], Vec3::X);
        g.scale(2.0);
        assert_eq!(g.positions()[1], Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate() {
        let mut g = unit_triangle();
        g.rotate(Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2));
        // X vertex rotates onto Y
        let p = g.positions()[1];
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_centroid_and_max_radius() {
        let g = unit_triangle();
        let c = g.centroid();
        assert!((c.x - 1.0 / 3.0).abs() < 1e-6);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(g.max_radius(), 1.0);
    }

    #[test]
    fn test_position_data_is_flat() {
        let g = unit_triangle();
        let data = g.position_data();
        assert_eq!(data.len(), 9);
        assert_eq!(data[3], 1.0); // second vertex x
    }
}
