//! Hyperframe construction for the 4D cell families.
//!
//! Each family projects to a canonical 3D cell ([`CanonicalSet`]); the frame
//! stacks five concentric copies of that cell and threads connectors between
//! them. Compound variants run the shell builder twice, once per component,
//! with the duplicate rotated by the family's compound rotation and the
//! diagonal sampling halved so the doubled structure stays legible.

use hyperviz_geom::{compound_rotation, CanonicalSet, Geometry, ShapeOverrides, ShellRadii};
use hyperviz_math::Quat;

use crate::hyperframe::{FrameInstanceData, Hyperframe, LineGroup};
use crate::material::LineHandle;
use crate::shells::{build_shell_frame, ShellFrameConfig};
use crate::strut::{StrutStyle, Strut};

/// Every n-th face diagonal survives on a simple cell frame.
const FACE_STRIDE: usize = 2;

/// Builds the nested-shell hyperframe for a cell-family shape.
///
/// Shell radii come from the geometry's tags when the builder recorded them,
/// otherwise they are re-derived from the render extent and the configured
/// layer gap. The outer shell snaps onto the render geometry's vertices; for
/// compounds each component snaps independently, finding its own rotated copy
/// in the merged buffer.
pub fn build_cell_frame(
    geometry: &Geometry,
    set: CanonicalSet,
    overrides: &ShapeOverrides,
    shell_material: LineHandle,
    connector_material: LineHandle,
) -> Hyperframe {
    let shape = geometry.tags().shape;
    let arity = shape.compound_arity();
    let radii = geometry
        .tags()
        .shells
        .unwrap_or_else(|| ShellRadii::from_outer_gap(geometry.max_radius(), overrides.layer_gap));

    let shell_style = StrutStyle::for_shape(shape);
    let face_stride = FACE_STRIDE * arity as usize;

    let mut center_lines: Vec<Strut> = Vec::new();
    let mut curved_lines: Vec<Strut> = Vec::new();
    for component in 0..arity {
        let rotation = if component == 0 {
            Quat::IDENTITY
        } else {
            compound_rotation(shape.family())
        };
        let config = ShellFrameConfig {
            set,
            radii,
            face_stride,
            rotation,
            shell_style,
            connector_style: StrutStyle::THIN,
        };
        build_shell_frame(&config, geometry.positions(), &mut center_lines, &mut curved_lines);
    }

    let mut center = LineGroup::new(shell_material);
    center.struts = center_lines;
    let mut curved = LineGroup::new(connector_material);
    curved.struts = curved_lines;

    Hyperframe {
        center_lines: center,
        curved_lines: curved,
        instance: FrameInstanceData {
            shape,
            shells: Some(radii),
            component_count: arity,
        },
    }
}
