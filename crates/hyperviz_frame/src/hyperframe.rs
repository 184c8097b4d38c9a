//! The hyperframe: two line groups suggesting 4D structure.
//!
//! Every shape gets a hyperframe with the same two-part anatomy. The
//! `center_lines` group holds the structural skeleton (shell edges and
//! diagonals for the cell families, the inner shadow for tesseracts, spiral
//! chains for everything else) and the `curved_lines` group holds the struts
//! that weave between levels. Which builder fills them depends on the shape
//! family.

use hyperviz_geom::{CanonicalSet, Geometry, ShapeId, ShapeOverrides, ShellRadii};

use crate::cell_frames::build_cell_frame;
use crate::generic_frame::{build_generic_frame, GenericFrameParams};
use crate::material::LineHandle;
use crate::strut::Strut;
use crate::tesseract_frame::{build_tesseract_frame, TesseractFrameParams};

/// A set of struts sharing one line material.
#[derive(Debug, Clone)]
pub struct LineGroup {
    pub struts: Vec<Strut>,
    pub material: LineHandle,
    /// Render-unit id stamped by the owning factory.
    pub unit_id: Option<u64>,
}

impl LineGroup {
    pub fn new(material: LineHandle) -> Self {
        Self {
            struts: Vec::new(),
            material,
            unit_id: None,
        }
    }

    pub fn strut_count(&self) -> usize {
        self.struts.len()
    }
}

/// Structural facts about one built hyperframe, recorded at build time so
/// cached templates can be instantiated without re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInstanceData {
    pub shape: ShapeId,
    pub shells: Option<ShellRadii>,
    /// 1 for simple frames, 2 for compound duplicates.
    pub component_count: u32,
}

/// A complete hyperframe for one render unit.
#[derive(Debug, Clone)]
pub struct Hyperframe {
    pub center_lines: LineGroup,
    pub curved_lines: LineGroup,
    pub instance: FrameInstanceData,
}

impl Hyperframe {
    pub fn strut_count(&self) -> usize {
        self.center_lines.strut_count() + self.curved_lines.strut_count()
    }

    /// Deep-copies the strut lists for a new render unit while keeping the
    /// material handles shared with the template. Cached frames hand these
    /// out so a recolor hits every instance, but moving one instance never
    /// moves another.
    pub fn clone_instance(&self) -> Self {
        Self {
            center_lines: LineGroup {
                struts: self.center_lines.struts.clone(),
                material: self.center_lines.material.clone(),
                unit_id: None,
            },
            curved_lines: LineGroup {
                struts: self.curved_lines.struts.clone(),
                material: self.curved_lines.material.clone(),
                unit_id: None,
            },
            instance: self.instance,
        }
    }
}

/// Builds the hyperframe for `geometry`, routing by shape family.
///
/// The 4D cell families get nested canonical shells, tesseract variants get
/// the inner-shadow treatment, and every 3D solid falls through to the
/// generic spiral frame (with reduced density for the torus knot, whose
/// tube mesh is already dense).
pub fn build_hyperframe(
    geometry: &Geometry,
    overrides: &ShapeOverrides,
    shell_material: LineHandle,
    connector_material: LineHandle,
) -> Hyperframe {
    let shape = geometry.tags().shape;
    let frame = if let Some(set) = CanonicalSet::for_family(shape.family()) {
        build_cell_frame(geometry, set, overrides, shell_material, connector_material)
    } else {
        match shape {
            ShapeId::Tesseract | ShapeId::MegaTesseract | ShapeId::TesseractCompound => {
                build_tesseract_frame(
                    geometry,
                    &TesseractFrameParams::from_overrides(overrides),
                    shell_material,
                    connector_material,
                )
            }
            ShapeId::TorusKnot => build_generic_frame(
                geometry,
                &GenericFrameParams::reduced(),
                shell_material,
                connector_material,
            ),
            _ => build_generic_frame(
                geometry,
                &GenericFrameParams::default(),
                shell_material,
                connector_material,
            ),
        }
    };
    log::debug!(
        "built hyperframe for {}: {} center struts, {} curved struts",
        shape,
        frame.center_lines.strut_count(),
        frame.curved_lines.strut_count()
    );
    frame
}
