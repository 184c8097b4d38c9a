//! Nested-shell construction for the 4D cell families.
//!
//! A cell frame is five concentric copies of a canonical vertex set (the 3D
//! "shadow" cell of the 4D polytope), each traced with edge and diagonal
//! struts, plus connector struts running between consecutive and skip-level
//! shells. Vertex pairs are classified by their distance relative to the
//! cell's edge length; the classification is scale-invariant, so it is
//! computed once on the unit set and reused for every shell.

use hyperviz_geom::{nearest_vertex_index, CanonicalSet, ShellRadii};
use hyperviz_math::{Quat, Vec3};

use crate::strut::{Strut, StrutStyle};

/// Distance class of a vertex pair within one shell, measured as a multiple
/// of the cell's shortest edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    /// True edge of the cell.
    Edge,
    /// Diagonal across a face.
    FaceDiagonal,
    /// Diagonal through the cell interior.
    SpaceDiagonal,
    /// Outside every band; never rendered.
    None,
}

/// Distance bands (in edge-length multiples) separating edges from face and
/// space diagonals for one canonical cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalThresholds {
    pub edge_max: f32,
    pub face_min: f32,
    pub face_max: f32,
    pub space_min: f32,
}

impl DiagonalThresholds {
    /// Bands per cell, placed between the known distance ratios of each
    /// solid. The octahedron has no face diagonals, so its face band is
    /// empty. The dodecahedron has intermediate diagonals at roughly 2.29 and
    /// 2.62 edge lengths that are deliberately excluded; only the antipodal
    /// pairs at about 2.80 count as space diagonals.
    pub fn for_set(set: CanonicalSet) -> Self {
        match set {
            CanonicalSet::Octahedron6 => Self {
                edge_max: 1.1,
                face_min: 1.2,
                face_max: 1.3,
                space_min: 1.35,
            },
            CanonicalSet::Cube8 => Self {
                edge_max: 1.1,
                face_min: 1.3,
                face_max: 1.5,
                space_min: 1.6,
            },
            CanonicalSet::Icosahedron12 => Self {
                edge_max: 1.1,
                face_min: 1.5,
                face_max: 1.7,
                space_min: 1.8,
            },
            CanonicalSet::Dodecahedron20 => Self {
                edge_max: 1.1,
                face_min: 1.5,
                face_max: 1.7,
                space_min: 2.7,
            },
        }
    }
}

/// Shortest pairwise distance in a vertex set. This is the cell edge length
/// that all classification ratios are measured against.
pub fn base_edge_length(vertices: &[Vec3]) -> f32 {
    let mut shortest = f32::INFINITY;
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            let d = vertices[i].distance(vertices[j]);
            if d < shortest {
                shortest = d;
            }
        }
    }
    shortest
}

/// Classifies one pair distance against the thresholds, in edge multiples.
pub fn classify_pair(distance: f32, base_edge: f32, thresholds: &DiagonalThresholds) -> PairClass {
    let ratio = distance / base_edge;
    if ratio <= thresholds.edge_max {
        PairClass::Edge
    } else if ratio >= thresholds.face_min && ratio <= thresholds.face_max {
        PairClass::FaceDiagonal
    } else if ratio >= thresholds.space_min {
        PairClass::SpaceDiagonal
    } else {
        PairClass::None
    }
}

/// Pair selection for one canonical cell: every edge, every `face_stride`-th
/// face diagonal, and a greedy maximal set of space diagonals.
#[derive(Debug, Clone, Default)]
pub struct ShellPairs {
    pub edges: Vec<(usize, usize)>,
    pub face_diagonals: Vec<(usize, usize)>,
    pub space_diagonals: Vec<(usize, usize)>,
}

impl ShellPairs {
    /// Struts emitted per shell.
    pub fn per_shell_count(&self) -> usize {
        self.edges.len() + self.face_diagonals.len() + self.space_diagonals.len()
    }
}

/// Classifies every vertex pair of the unit cell and applies sampling.
///
/// Face diagonals are strided (`face_stride` >= 1) to keep dense cells
/// readable. Space diagonals are picked greedily from the longest down, each
/// vertex used at most once, so the selection favors true antipodal runs and
/// never doubles up on a vertex.
pub fn select_shell_pairs(set: CanonicalSet, face_stride: usize) -> ShellPairs {
    let vertices = set.unit_vertices();
    let thresholds = DiagonalThresholds::for_set(set);
    let base_edge = base_edge_length(&vertices);
    let stride = face_stride.max(1);

    let mut pairs = ShellPairs::default();
    let mut space_candidates: Vec<(f32, usize, usize)> = Vec::new();
    let mut face_seen = 0usize;
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            let distance = vertices[i].distance(vertices[j]);
            match classify_pair(distance, base_edge, &thresholds) {
                PairClass::Edge => pairs.edges.push((i, j)),
                PairClass::FaceDiagonal => {
                    if face_seen % stride == 0 {
                        pairs.face_diagonals.push((i, j));
                    }
                    face_seen += 1;
                }
                PairClass::SpaceDiagonal => space_candidates.push((distance, i, j)),
                PairClass::None => {}
            }
        }
    }

    space_candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    let mut used = vec![false; vertices.len()];
    for (_, i, j) in space_candidates {
        if !used[i] && !used[j] {
            used[i] = true;
            used[j] = true;
            pairs.space_diagonals.push((i, j));
        }
    }

    pairs
}

/// Shell layout and styling for one frame component.
#[derive(Debug, Clone, Copy)]
pub struct ShellFrameConfig {
    pub set: CanonicalSet,
    pub radii: ShellRadii,
    /// Keep every n-th face diagonal.
    pub face_stride: usize,
    /// Component orientation; identity for the primary, the compound
    /// rotation for a duplicate.
    pub rotation: Quat,
    pub shell_style: StrutStyle,
    pub connector_style: StrutStyle,
}

/// Skip-level connector endpoints: shell index pairs two levels apart.
const SKIP_LINKS: [(usize, usize); 3] = [(0, 2), (1, 3), (2, 4)];

/// Outer-shell vertices snap to a render vertex only when one sits within
/// this fraction of the outer radius. A canonical set that does not line up
/// with the render solid (the 16-cell's cube over an octahedral mesh) stays
/// where it is instead of collapsing onto foreign vertices.
const SNAP_TOLERANCE: f32 = 0.15;

/// Builds one component of a cell frame.
///
/// Shell struts land in `center_lines`; connectors between shells land in
/// `curved_lines`. The outermost shell's vertices snap to nearby vertices of
/// the render geometry (`render_positions`) so its struts trace the visible
/// solid exactly; inner shells stay on the canonical set.
/// Connectors always join two different shells: four between consecutive
/// levels and three between skip levels, per canonical vertex.
pub fn build_shell_frame(
    config: &ShellFrameConfig,
    render_positions: &[Vec3],
    center_lines: &mut Vec<Strut>,
    curved_lines: &mut Vec<Strut>,
) {
    let unit = config.set.unit_vertices();
    let pairs = select_shell_pairs(config.set, config.face_stride);
    let radii = config.radii.as_array();

    // Shell vertex positions, outermost first.
    let mut shells: Vec<Vec<Vec3>> = radii
        .iter()
        .map(|&radius| {
            unit.iter()
                .map(|&v| config.rotation.rotate(v * radius))
                .collect()
        })
        .collect();
    if !render_positions.is_empty() {
        let max_snap = SNAP_TOLERANCE * config.radii.outer;
        for vertex in shells[0].iter_mut() {
            let snapped = render_positions[nearest_vertex_index(render_positions, *vertex)];
            if snapped.distance(*vertex) <= max_snap {
                *vertex = snapped;
            }
        }
    }

    for shell in &shells {
        for &(i, j) in pairs
            .edges
            .iter()
            .chain(pairs.face_diagonals.iter())
            .chain(pairs.space_diagonals.iter())
        {
            center_lines.push(
                Strut::new(shell[i], shell[j], config.shell_style.radius)
                    .with_segments(config.shell_style.segments),
            );
        }
    }

    // Consecutive-shell connectors: one per vertex per adjacent level pair.
    for level in 0..shells.len() - 1 {
        for vertex in 0..unit.len() {
            curved_lines.push(
                Strut::new(
                    shells[level][vertex],
                    shells[level + 1][vertex],
                    config.connector_style.radius,
                )
                .with_segments(config.connector_style.segments),
            );
        }
    }

    // Skip-level connectors bridge two levels at once.
    for &(outer, inner) in SKIP_LINKS.iter() {
        for vertex in 0..unit.len() {
            curved_lines.push(
                Strut::new(
                    shells[outer][vertex],
                    shells[inner][vertex],
                    config.connector_style.radius,
                )
                .with_segments(config.connector_style.segments),
            );
        }
    }
}
