//! Hyperframe construction for the tesseract family.
//!
//! The frame is an "inner shadow": a scaled-down copy of the render mesh's
//! edge graph sunk toward the center, with connector struts climbing from
//! each shadow vertex to a matching vertex of the render geometry. A shadow
//! vertex only connects if the render mesh actually has a vertex in roughly
//! the same direction at roughly the next sweep level inward; shadow vertices
//! derived from the innermost cell find no such match and stay unconnected.

use hyperviz_geom::{extract_edges, Geometry, ShapeOverrides};
use hyperviz_math::Vec3;

use crate::hyperframe::{FrameInstanceData, Hyperframe, LineGroup};
use crate::material::LineHandle;
use crate::strut::{Strut, StrutStyle};

/// Tuning for the inner-shadow frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TesseractFrameParams {
    /// Scale of the shadow copy relative to the render mesh.
    pub shadow_scale: f32,
    /// Sweep scale between consecutive cells, taken from the geometry
    /// overrides so the matcher targets where the next cell actually sits.
    pub inner_scale: f32,
    /// Minimum cosine between a shadow vertex's direction and a candidate
    /// render vertex's direction.
    pub cosine_min: f32,
    /// Relative tolerance on the candidate's radius around the expected
    /// next-cell radius.
    pub radius_tolerance: f32,
}

impl TesseractFrameParams {
    pub fn from_overrides(overrides: &ShapeOverrides) -> Self {
        Self {
            shadow_scale: 0.4,
            inner_scale: overrides.tesseract.inner_scale,
            cosine_min: 0.9,
            radius_tolerance: 0.25,
        }
    }
}

/// Builds the inner-shadow hyperframe for a tesseract-family geometry.
///
/// Center lines trace the shadow copy's edges. Connectors run from each
/// shadow vertex to the nearest render vertex that passes both gates: its
/// direction from the origin is within `cosine_min` of the shadow vertex's,
/// and its radius lies within `radius_tolerance` of the expected next-cell
/// radius (source radius times `inner_scale`). Unmatched shadow vertices are
/// skipped, never force-connected.
pub fn build_tesseract_frame(
    geometry: &Geometry,
    params: &TesseractFrameParams,
    shell_material: LineHandle,
    connector_material: LineHandle,
) -> Hyperframe {
    let positions = geometry.positions();
    let edges = extract_edges(geometry, 1.0);
    let style = StrutStyle::THIN;

    let mut center = LineGroup::new(shell_material);
    for &(a, b) in edges.pairs() {
        center.struts.push(
            Strut::new(
                positions[a as usize] * params.shadow_scale,
                positions[b as usize] * params.shadow_scale,
                style.radius,
            )
            .with_segments(style.segments),
        );
    }

    // Unique shadow vertices, one per render vertex the edge set touches.
    let mut touched: Vec<u32> = edges.pairs().iter().flat_map(|&(a, b)| [a, b]).collect();
    touched.sort_unstable();
    touched.dedup();

    let mut curved = LineGroup::new(connector_material);
    for &index in &touched {
        let source = positions[index as usize];
        let shadow = source * params.shadow_scale;
        let expected_radius = source.length() * params.inner_scale;
        if let Some(target) = match_render_vertex(positions, shadow, expected_radius, params) {
            curved
                .struts
                .push(Strut::new(shadow, target, style.radius).with_segments(style.segments));
        }
    }

    Hyperframe {
        center_lines: center,
        curved_lines: curved,
        instance: FrameInstanceData {
            shape: geometry.tags().shape,
            shells: geometry.tags().shells,
            component_count: geometry.tags().compound_arity,
        },
    }
}

/// Nearest render vertex passing the direction and radius gates, if any.
fn match_render_vertex(
    positions: &[Vec3],
    shadow: Vec3,
    expected_radius: f32,
    params: &TesseractFrameParams,
) -> Option<Vec3> {
    let direction = if shadow.length_squared() > f32::EPSILON {
        shadow.normalized()
    } else {
        return None;
    };
    let mut best: Option<(f32, Vec3)> = None;
    for &candidate in positions {
        let radius = candidate.length();
        if (radius - expected_radius).abs() > params.radius_tolerance * expected_radius {
            continue;
        }
        if radius <= f32::EPSILON {
            continue;
        }
        if candidate.normalized().dot(direction) < params.cosine_min {
            continue;
        }
        let distance = candidate.distance(shadow);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperviz_geom::{build_geometry, ShapeId};
    use hyperviz_math::Color;

    use crate::material::LineMaterial;

    fn frame_for(shape: ShapeId) -> Hyperframe {
        let overrides = ShapeOverrides::default();
        let geometry = build_geometry(shape, &overrides);
        build_tesseract_frame(
            &geometry,
            &TesseractFrameParams::from_overrides(&overrides),
            LineMaterial::handle(Color::CYAN, 0.4),
            LineMaterial::handle(Color::MAGENTA, 0.25),
        )
    }

    #[test]
    fn test_shadow_traces_every_render_edge() {
        let overrides = ShapeOverrides::default();
        let geometry = build_geometry(ShapeId::Tesseract, &overrides);
        let edges = extract_edges(&geometry, 1.0);
        let frame = frame_for(ShapeId::Tesseract);
        assert_eq!(frame.center_lines.strut_count(), edges.len());
    }

    #[test]
    fn test_shadow_is_scaled_copy() {
        let overrides = ShapeOverrides::default();
        let geometry = build_geometry(ShapeId::Tesseract, &overrides);
        let render_max = geometry.max_radius();
        let frame = frame_for(ShapeId::Tesseract);
        for strut in &frame.center_lines.struts {
            assert!(strut.start.length() <= render_max * 0.4 + 1e-4);
        }
    }

    #[test]
    fn test_outer_vertices_connect_inner_vertices_do_not() {
        // The plain tesseract has 8 outer-cube and 8 inner-cube vertices.
        // Outer shadows match the render inner cube; inner shadows expect a
        // third cell that does not exist and are skipped.
        let frame = frame_for(ShapeId::Tesseract);
        assert_eq!(frame.curved_lines.strut_count(), 8);
    }

    #[test]
    fn test_connectors_land_on_render_vertices() {
        let overrides = ShapeOverrides::default();
        let geometry = build_geometry(ShapeId::Tesseract, &overrides);
        let frame = frame_for(ShapeId::Tesseract);
        for strut in &frame.curved_lines.struts {
            let on_vertex = geometry
                .positions()
                .iter()
                .any(|&p| p.distance(strut.end) < 1e-4);
            assert!(on_vertex);
        }
    }

    #[test]
    fn test_mega_tesseract_connects_every_level_but_the_innermost() {
        // Four cells of 8 vertices each; the three outer levels match the
        // next level in, the innermost finds nothing.
        let frame = frame_for(ShapeId::MegaTesseract);
        assert_eq!(frame.curved_lines.strut_count(), 24);
    }

    #[test]
    fn test_compound_keeps_components_separate() {
        let frame = frame_for(ShapeId::TesseractCompound);
        // Each component's outer cube matches its own inner cube; the 45
        // degree duplicate never captures the primary's vertices because the
        // direction gate rejects them.
        assert_eq!(frame.curved_lines.strut_count(), 16);
        assert_eq!(frame.instance.component_count, 2);
    }
}
