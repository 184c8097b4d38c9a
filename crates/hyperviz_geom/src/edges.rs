//! Unique edge extraction and nearest-vertex lookup
//!
//! Edges are derived from a geometry's triangulated surface. Vertices are
//! first merged by quantized position hashing so duplicated seam/compound
//! vertices collapse to one index, then triangle edges are paired across
//! faces: an edge shared by two near-coplanar triangles is a triangulation
//! diagonal, not a surface edge, and is dropped. Boundary edges (one
//! triangle) are always kept.

use std::collections::HashMap;
use hyperviz_math::Vec3;
use crate::Geometry;

/// Quantization scale for vertex merging (fixed decimal, 1e-4)
const QUANTIZE: f32 = 1.0e4;

/// Default dihedral threshold in degrees: anything flatter is coplanar
pub const DEFAULT_EDGE_THRESHOLD_DEG: f32 = 1.0;

/// The unique undirected edge set of a surface
///
/// Pairs are stored with the smaller index first; no unordered pair appears
/// twice. Indices refer to the source geometry's vertex buffer (the first
/// occurrence of each merged position).
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
    pairs: Vec<(u32, u32)>,
}

impl EdgeSet {
    /// The edge index pairs
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Number of edges
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over edge endpoints as positions
    pub fn segments<'a>(
        &'a self,
        positions: &'a [Vec3],
    ) -> impl Iterator<Item = (Vec3, Vec3)> + 'a {
        self.pairs
            .iter()
            .map(move |&(a, b)| (positions[a as usize], positions[b as usize]))
    }
}

fn quantize_key(p: Vec3) -> (i64, i64, i64) {
    (
        (p.x * QUANTIZE).round() as i64,
        (p.y * QUANTIZE).round() as i64,
        (p.z * QUANTIZE).round() as i64,
    )
}

/// Extract the unique edge set of a geometry
///
/// `threshold_degrees` is the minimum dihedral angle between adjacent faces
/// for their shared edge to count as a surface edge.
pub fn extract_edges(geometry: &Geometry, threshold_degrees: f32) -> EdgeSet {
    let positions = geometry.positions();
    let threshold_dot = threshold_degrees.to_radians().cos();

    // Merge duplicate vertices: every index maps to the first index seen at
    // its quantized position
    let mut first_at: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut canonical: Vec<u32> = Vec::with_capacity(positions.len());
    for (i, &p) in positions.iter().enumerate() {
        let key = quantize_key(p);
        let index = *first_at.entry(key).or_insert(i as u32);
        canonical.push(index);
    }

    struct HalfEdge {
        normal: Vec3,
    }

    let mut open: HashMap<(u32, u32), HalfEdge> = HashMap::new();
    let mut pairs: Vec<(u32, u32)> = Vec::new();

    for tri in geometry.indices().chunks_exact(3) {
        let a = canonical[tri[0] as usize];
        let b = canonical[tri[1] as usize];
        let c = canonical[tri[2] as usize];
        // Degenerate after merging (pole fans, collapsed seams)
        if a == b || b == c || a == c {
            continue;
        }

        let pa = positions[a as usize];
        let normal = (positions[b as usize] - pa)
            .cross(positions[c as usize] - pa)
            .normalized();

        for &(v0, v1) in &[(a, b), (b, c), (c, a)] {
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            match open.remove(&key) {
                Some(other) => {
                    // Two faces meet here: keep only a real crease
                    if normal.dot(other.normal) <= threshold_dot {
                        pairs.push(key);
                    }
                }
                None => {
                    open.insert(key, HalfEdge { normal });
                }
            }
        }
    }

    // Unpaired edges are surface boundaries
    pairs.extend(open.into_keys());
    pairs.sort_unstable();
    pairs.dedup();

    EdgeSet { pairs }
}

/// Index of the vertex nearest to `point`
///
/// Linear scan; total on non-empty input (there is always a globally
/// closest candidate). Callers must not pass an empty slice; no geometry
/// produced by this crate is empty.
pub fn nearest_vertex_index(positions: &[Vec3], point: Vec3) -> usize {
    debug_assert!(!positions.is_empty(), "no vertices to search");
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &p) in positions.iter().enumerate() {
        let d = p.distance_squared(point);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_geometry, ShapeId, ShapeOverrides};

    fn edge_count(shape: ShapeId) -> usize {
        let g = build_geometry(shape, &ShapeOverrides::default());
        extract_edges(&g, DEFAULT_EDGE_THRESHOLD_DEG).len()
    }

    #[test]
    fn test_known_edge_counts() {
        assert_eq!(edge_count(ShapeId::Tetrahedron), 6);
        assert_eq!(edge_count(ShapeId::Cube), 12);
        assert_eq!(edge_count(ShapeId::Octahedron), 12);
        assert_eq!(edge_count(ShapeId::Icosahedron), 30);
        assert_eq!(edge_count(ShapeId::Dodecahedron), 30);
    }

    #[test]
    fn test_no_duplicate_unordered_pairs() {
        for shape in ShapeId::ALL {
            let g = build_geometry(shape, &ShapeOverrides::default());
            let edges = extract_edges(&g, DEFAULT_EDGE_THRESHOLD_DEG);
            let mut seen = std::collections::HashSet::new();
            for &(a, b) in edges.pairs() {
                assert!(a < b, "{}: pair not ordered", shape);
                assert!(seen.insert((a, b)), "{}: duplicate pair ({}, {})", shape, a, b);
            }
        }
    }

    #[test]
    fn test_merged_compound_has_no_degenerate_edges() {
        let g = build_geometry(ShapeId::Cell120Compound, &ShapeOverrides::default());
        let edges = extract_edges(&g, DEFAULT_EDGE_THRESHOLD_DEG);
        for (start, end) in edges.segments(g.positions()) {
            assert!(start.distance(end) > 1e-5);
        }
    }

    #[test]
    fn test_tesseract_edges_cover_both_cells() {
        // Outer cube + inner cell each contribute 12 edges
        let g = build_geometry(ShapeId::Tesseract, &ShapeOverrides::default());
        let edges = extract_edges(&g, DEFAULT_EDGE_THRESHOLD_DEG);
        assert_eq!(edges.len(), 24);
    }

    #[test]
    fn test_nearest_vertex_exact_hit() {
        let g = build_geometry(ShapeId::Icosahedron, &ShapeOverrides::default());
        for (i, &p) in g.positions().iter().enumerate() {
            assert_eq!(nearest_vertex_index(g.positions(), p), i);
        }
    }

    #[test]
    fn test_nearest_vertex_falls_back_to_closest() {
        let g = build_geometry(ShapeId::Cube, &ShapeOverrides::default());
        // A point far outside still resolves to some closest vertex
        let idx = nearest_vertex_index(g.positions(), Vec3::new(100.0, 101.0, 99.0));
        assert_eq!(g.positions()[idx], Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "no vertices to search")]
    fn test_nearest_vertex_rejects_empty_input() {
        nearest_vertex_index(&[], Vec3::ZERO);
    }

    #[test]
    fn test_sphere_seam_vertices_are_merged() {
        let g = build_geometry(ShapeId::Sphere, &ShapeOverrides::default());
        let edges = extract_edges(&g, DEFAULT_EDGE_THRESHOLD_DEG);
        // All edge endpoints must be canonical (first occurrence) indices
        let mut seen_positions = std::collections::HashSet::new();
        for &(a, b) in edges.pairs() {
            for idx in [a, b] {
                seen_positions.insert(quantize_key(g.positions()[idx as usize]));
            }
        }
        // Each quantized position appears under exactly one index, so the
        // number of distinct endpoint keys bounds the endpoint index count
        let mut endpoint_indices = std::collections::HashSet::new();
        for &(a, b) in edges.pairs() {
            endpoint_indices.insert(a);
            endpoint_indices.insert(b);
        }
        assert_eq!(seen_positions.len(), endpoint_indices.len());
    }
}
