//! Fallback hyperframe for 3D solids and curved surfaces.
//!
//! Shapes without a 4D interpretation still get an interior structure:
//! spiral chains winding from the centroid out to a sampling of edge
//! vertices form the center lines, and short struts bridging nearby edge
//! midpoints form the curved lines. Dense meshes (the torus knot tube) use
//! the reduced parameter set so the frame stays a hint, not a hairball.

use hyperviz_geom::{extract_edges, Geometry};
use hyperviz_math::Vec3;

use crate::hyperframe::{FrameInstanceData, Hyperframe, LineGroup};
use crate::material::LineHandle;
use crate::strut::{Strut, StrutStyle};

/// Tuning for the generic frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericFrameParams {
    /// Struts per spiral chain.
    pub spiral_segments: u32,
    /// Full turns each spiral makes on its way out.
    pub spiral_turns: f32,
    /// Spiral displacement as a fraction of the chain length.
    pub spiral_amplitude: f32,
    /// Keep every n-th edge when sampling spiral anchors and midpoints.
    pub edge_stride: usize,
    /// Midpoint pairs closer than this fraction of the mesh radius get a
    /// bridging strut.
    pub max_link_fraction: f32,
    /// Hard cap on bridging struts.
    pub max_links: usize,
}

impl Default for GenericFrameParams {
    fn default() -> Self {
        Self {
            spiral_segments: 8,
            spiral_turns: 1.5,
            spiral_amplitude: 0.12,
            edge_stride: 1,
            max_link_fraction: 0.45,
            max_links: 200,
        }
    }
}

impl GenericFrameParams {
    /// Sparser settings for meshes whose edge count would otherwise swamp
    /// the frame.
    pub fn reduced() -> Self {
        Self {
            spiral_segments: 6,
            spiral_turns: 1.0,
            edge_stride: 8,
            max_link_fraction: 0.3,
            max_links: 120,
            ..Self::default()
        }
    }
}

/// Builds the spiral-and-bridge hyperframe for a non-4D geometry.
pub fn build_generic_frame(
    geometry: &Geometry,
    params: &GenericFrameParams,
    shell_material: LineHandle,
    connector_material: LineHandle,
) -> Hyperframe {
    let positions = geometry.positions();
    let edges = extract_edges(geometry, 1.0);
    let centroid = geometry.centroid();
    let radius = geometry.max_radius().max(f32::EPSILON);
    let stride = params.edge_stride.max(1);
    let style = StrutStyle::THIN;

    let sampled: Vec<(u32, u32)> = edges
        .pairs()
        .iter()
        .step_by(stride)
        .copied()
        .collect();

    // Spiral anchors: each vertex a sampled edge touches, once.
    let mut anchors: Vec<u32> = sampled.iter().flat_map(|&(a, b)| [a, b]).collect();
    anchors.sort_unstable();
    anchors.dedup();

    let mut center = LineGroup::new(shell_material);
    for &anchor in &anchors {
        push_spiral_chain(
            &mut center.struts,
            centroid,
            positions[anchor as usize],
            params,
            &style,
        );
    }

    // Bridges between nearby edge midpoints.
    let midpoints: Vec<Vec3> = sampled
        .iter()
        .map(|&(a, b)| positions[a as usize].midpoint(positions[b as usize]))
        .collect();
    let max_distance = params.max_link_fraction * radius;
    let mut curved = LineGroup::new(connector_material);
    'outer: for i in 0..midpoints.len() {
        for j in (i + 1)..midpoints.len() {
            let distance = midpoints[i].distance(midpoints[j]);
            if distance > f32::EPSILON && distance <= max_distance {
                curved
                    .struts
                    .push(Strut::new(midpoints[i], midpoints[j], style.radius).with_segments(style.segments));
                if curved.struts.len() >= params.max_links {
                    break 'outer;
                }
            }
        }
    }

    Hyperframe {
        center_lines: center,
        curved_lines: curved,
        instance: FrameInstanceData {
            shape: geometry.tags().shape,
            shells: None,
            component_count: geometry.tags().compound_arity,
        },
    }
}

/// Appends one spiral chain from `from` to `to`: straight interpolation plus
/// a perpendicular offset that winds `spiral_turns` times and fades out at
/// both ends.
fn push_spiral_chain(
    struts: &mut Vec<Strut>,
    from: Vec3,
    to: Vec3,
    params: &GenericFrameParams,
    style: &StrutStyle,
) {
    let axis = to - from;
    if axis.length_squared() <= f32::EPSILON {
        return;
    }
    let direction = axis.normalized();
    let u = direction.any_perpendicular().normalized();
    let v = direction.cross(u);
    let amplitude = params.spiral_amplitude * axis.length();
    let segments = params.spiral_segments.max(1);

    let point_at = |step: u32| -> Vec3 {
        let t = step as f32 / segments as f32;
        let angle = params.spiral_turns * std::f32::consts::TAU * t;
        let fade = (std::f32::consts::PI * t).sin();
        from + axis * t + (u * angle.cos() + v * angle.sin()) * (amplitude * fade)
    };

    let mut previous = point_at(0);
    for step in 1..=segments {
        let next = point_at(step);
        struts.push(Strut::new(previous, next, style.radius).with_segments(style.segments));
        previous = next;
    }
}
