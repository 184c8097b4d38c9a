//! Wireframe assembly: one strut per extracted edge, one node sphere per
//! vertex that an edge touches.

use std::collections::BTreeSet;

use hyperviz_geom::{EdgeSet, Geometry};
use hyperviz_math::Vec3;

use crate::material::LineHandle;
use crate::strut::{Strut, StrutStyle};

/// Node spheres are slightly fatter than the struts they join so the joints
/// read as solid.
const NODE_RADIUS_SCALE: f32 = 1.8;

/// Sphere marker placed at a wireframe vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexNode {
    pub position: Vec3,
    pub radius: f32,
}

/// A complete edge wireframe for one solid: cylinder struts along every kept
/// edge plus node spheres at the vertices they meet.
#[derive(Debug, Clone)]
pub struct WireframeMesh {
    pub struts: Vec<Strut>,
    pub nodes: Vec<VertexNode>,
    pub edge_pairs: Vec<(u32, u32)>,
    pub material: LineHandle,
    /// Render-unit id stamped by the owning factory, used to route picking
    /// hits back to the unit.
    pub unit_id: Option<u64>,
}

impl WireframeMesh {
    pub fn strut_count(&self) -> usize {
        self.struts.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds the wireframe for `geometry` from an already-extracted edge set.
///
/// Strut sizing follows [`StrutStyle::for_shape`]. Every strut records the
/// vertex pair it traces so pick results can name the edge.
pub fn assemble_wireframe(geometry: &Geometry, edges: &EdgeSet, material: LineHandle) -> WireframeMesh {
    let style = StrutStyle::for_shape(geometry.tags().shape);
    let positions = geometry.positions();

    let mut struts = Vec::with_capacity(edges.len());
    let mut touched = BTreeSet::new();
    for &(a, b) in edges.pairs() {
        struts.push(
            Strut::new(positions[a as usize], positions[b as usize], style.radius)
                .with_segments(style.segments)
                .with_edge((a, b)),
        );
        touched.insert(a);
        touched.insert(b);
    }

    let nodes = touched
        .iter()
        .map(|&index| VertexNode {
            position: positions[index as usize],
            radius: style.radius * NODE_RADIUS_SCALE,
        })
        .collect();

    log::debug!(
        "assembled wireframe for {}: {} struts, {} nodes",
        geometry.tags().shape,
        struts.len(),
        edges.len()
    );

    WireframeMesh {
        struts,
        nodes,
        edge_pairs: edges.pairs().to_vec(),
        material,
        unit_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperviz_geom::{build_geometry, extract_edges, ShapeId, ShapeOverrides};
    use hyperviz_math::Color;

    use crate::material::LineMaterial;

    fn wireframe_for(shape: ShapeId) -> WireframeMesh {
        let geometry = build_geometry(shape, &ShapeOverrides::default());
        let edges = extract_edges(&geometry, 1.0);
        assemble_wireframe(&geometry, &edges, LineMaterial::handle(Color::WHITE, 0.3))
    }

    #[test]
    fn test_cube_wireframe_counts() {
        let mesh = wireframe_for(ShapeId::Cube);
        assert_eq!(mesh.strut_count(), 12);
        assert_eq!(mesh.node_count(), 8);
    }

    #[test]
    fn test_tetrahedron_wireframe_counts() {
        let mesh = wireframe_for(ShapeId::Tetrahedron);
        assert_eq!(mesh.strut_count(), 6);
        assert_eq!(mesh.node_count(), 4);
    }

    #[test]
    fn test_struts_record_source_edges() {
        let mesh = wireframe_for(ShapeId::Cube);
        for strut in &mesh.struts {
            assert!(strut.edge.is_some());
        }
        assert_eq!(mesh.edge_pairs.len(), mesh.strut_count());
    }

    #[test]
    fn test_nodes_outsize_struts() {
        let mesh = wireframe_for(ShapeId::Octahedron);
        let strut_radius = mesh.struts[0].radius;
        for node in &mesh.nodes {
            assert!(node.radius > strut_radius);
        }
    }

    #[test]
    fn test_unit_id_starts_unset() {
        let mesh = wireframe_for(ShapeId::Cube);
        assert!(mesh.unit_id.is_none());
    }
}
