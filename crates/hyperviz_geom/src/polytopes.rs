//! Canonical polytope vertex/index tables
//!
//! Fixed tables for the Platonic solids with consistent outward winding
//! (pentagons pre-triangulated), plus the unit-sphere-normalized vertex
//! sets the hyperframe shells are scaled from.

use hyperviz_math::Vec3;
use crate::ShapeFamily;

/// The golden ratio, used by the icosahedron/dodecahedron tables
pub const PHI: f32 = 1.618_034;

pub(crate) const TETRAHEDRON_VERTICES: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

pub(crate) const TETRAHEDRON_INDICES: [u32; 12] = [
    0, 2, 1, //
    0, 1, 3, //
    0, 3, 2, //
    1, 2, 3,
];

// Binary ordering: bit 0 -> x, bit 1 -> y, bit 2 -> z
pub(crate) const CUBE_VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

pub(crate) const CUBE_INDICES: [u32; 36] = [
    0, 2, 3, 0, 3, 1, // -z
    4, 5, 7, 4, 7, 6, // +z
    0, 1, 5, 0, 5, 4, // -y
    2, 6, 7, 2, 7, 3, // +y
    0, 4, 6, 0, 6, 2, // -x
    1, 3, 7, 1, 7, 5, // +x
];

pub(crate) const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

pub(crate) const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, //
    1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

pub(crate) const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

pub(crate) const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
    1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
    3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
    4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const INV_PHI: f32 = 1.0 / PHI;

pub(crate) const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI],
    [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI],
    [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0],
    [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0],
    [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI],
    [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI],
    [PHI, 0.0, INV_PHI],
];

// 12 pentagons, each fanned into 3 triangles
pub(crate) const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13, //
    7, 19, 17, 7, 17, 6, 7, 6, 15, //
    17, 4, 8, 17, 8, 10, 17, 10, 6, //
    8, 0, 16, 8, 16, 2, 8, 2, 10, //
    0, 12, 1, 0, 1, 18, 0, 18, 16, //
    6, 10, 2, 6, 2, 13, 6, 13, 15, //
    2, 16, 18, 2, 18, 3, 2, 3, 13, //
    18, 1, 9, 18, 9, 11, 18, 11, 3, //
    4, 14, 12, 4, 12, 0, 4, 0, 8, //
    11, 9, 5, 11, 5, 19, 11, 19, 7, //
    19, 5, 14, 19, 14, 4, 19, 4, 17, //
    1, 12, 14, 1, 14, 5, 1, 5, 9,
];

pub(crate) fn table_to_positions(table: &[[f32; 3]]) -> Vec<Vec3> {
    table.iter().map(|v| Vec3::new(v[0], v[1], v[2])).collect()
}

/// A unit-sphere-normalized polytope vertex set used for hyperframe shells
///
/// Each 4D family projects its shells from one fixed set: the 16-cell uses
/// the 8-vertex cube set, the 24-cell the 6-vertex octahedron set, the
/// 600-cell the 12-vertex icosahedron set, and the 120-cell the 20-vertex
/// dodecahedron set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalSet {
    Octahedron6,
    Cube8,
    Icosahedron12,
    Dodecahedron20,
}

impl CanonicalSet {
    /// Number of vertices in this set
    pub fn vertex_count(self) -> usize {
        match self {
            CanonicalSet::Octahedron6 => 6,
            CanonicalSet::Cube8 => 8,
            CanonicalSet::Icosahedron12 => 12,
            CanonicalSet::Dodecahedron20 => 20,
        }
    }

    /// The vertex positions, normalized onto the unit sphere
    pub fn unit_vertices(self) -> Vec<Vec3> {
        let table: &[[f32; 3]] = match self {
            CanonicalSet::Octahedron6 => &OCTAHEDRON_VERTICES,
            CanonicalSet::Cube8 => &CUBE_VERTICES,
            CanonicalSet::Icosahedron12 => &ICOSAHEDRON_VERTICES,
            CanonicalSet::Dodecahedron20 => &DODECAHEDRON_VERTICES,
        };
        table_to_positions(table)
            .into_iter()
            .map(|v| v.normalized())
            .collect()
    }

    /// The canonical set for a 4D shape family, if it has one
    ///
    /// Tesseract-family hyperframes are built from the merged render
    /// geometry instead of a fixed table, so they return `None`.
    pub fn for_family(family: ShapeFamily) -> Option<CanonicalSet> {
        match family {
            ShapeFamily::Cell16 => Some(CanonicalSet::Cube8),
            ShapeFamily::Cell24 => Some(CanonicalSet::Octahedron6),
            ShapeFamily::Cell120 => Some(CanonicalSet::Dodecahedron20),
            ShapeFamily::Cell600 => Some(CanonicalSet::Icosahedron12),
            _ => None,
        }
    }
}
