//! Line segments rendered as oriented cylinders.
//!
//! Every line in a wireframe or hyperframe is a [`Strut`]: a start point, an
//! end point, and a cylinder radius. The renderer places a unit cylinder whose
//! axis is +Y at the strut midpoint, so [`Strut::transform`] reports the
//! midpoint, length, and the explicit quaternion rotating +Y onto the strut
//! direction. Degenerate struts (coincident endpoints) keep the identity
//! orientation.

use hyperviz_geom::ShapeId;
use hyperviz_math::{Quat, Vec3};

/// Cylinder axis in instance space. Strut orientations rotate this onto the
/// start-to-end direction.
pub const STRUT_AXIS: Vec3 = Vec3::Y;

/// A single cylinder-rendered line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strut {
    /// World-space start point.
    pub start: Vec3,
    /// World-space end point.
    pub end: Vec3,
    /// Cylinder radius.
    pub radius: f32,
    /// Radial segment count for the cylinder mesh.
    pub segments: u32,
    /// Source edge indices into the originating geometry, when the strut
    /// traces a real mesh edge rather than a synthesized line.
    pub edge: Option<(u32, u32)>,
}

impl Strut {
    /// Creates a strut between two points with the given cylinder radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self {
            start,
            end,
            radius,
            segments: 6,
            edge: None,
        }
    }

    /// Sets the radial segment count.
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Records the geometry edge this strut traces.
    pub fn with_edge(mut self, edge: (u32, u32)) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Length of the strut.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Midpoint of the strut, where the cylinder instance is anchored.
    pub fn midpoint(&self) -> Vec3 {
        self.start.midpoint(self.end)
    }

    /// Quaternion rotating the canonical cylinder axis (+Y) onto the strut
    /// direction. Zero-length struts report the identity.
    pub fn orientation(&self) -> Quat {
        let delta = self.end - self.start;
        if delta.length_squared() <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(STRUT_AXIS, delta.normalized())
    }

    /// Full placement transform for the cylinder instance.
    pub fn transform(&self) -> StrutTransform {
        StrutTransform {
            position: self.midpoint(),
            rotation: self.orientation(),
            length: self.length(),
            radius: self.radius,
        }
    }
}

/// Decomposed placement for a strut cylinder: translate to `position`, rotate
/// by `rotation`, scale the unit cylinder to `length` along its axis and
/// `radius` across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrutTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub length: f32,
    pub radius: f32,
}

/// Cylinder sizing applied uniformly to the struts of one structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrutStyle {
    pub radius: f32,
    pub segments: u32,
}

impl StrutStyle {
    /// Thin style used for synthesized lines (spirals, connectors) and any
    /// shape without a dedicated entry.
    pub const THIN: Self = Self {
        radius: 0.012,
        segments: 4,
    };

    /// Wireframe strut sizing per shape. Curved surfaces get delicate struts,
    /// blocky solids get heavier ones, and compound duplicates thin out so the
    /// doubled edge count does not read as clutter.
    pub fn for_shape(shape: ShapeId) -> Self {
        match shape {
            ShapeId::Sphere => Self {
                radius: 0.02,
                segments: 6,
            },
            ShapeId::Cube | ShapeId::Tesseract | ShapeId::MegaTesseract => Self {
                radius: 0.035,
                segments: 8,
            },
            ShapeId::TesseractCompound => Self {
                radius: 0.025,
                segments: 6,
            },
            ShapeId::Octahedron
            | ShapeId::Cell16
            | ShapeId::Cell24
            | ShapeId::Cell24Compound => Self {
                radius: 0.03,
                segments: 8,
            },
            ShapeId::Tetrahedron
            | ShapeId::Icosahedron
            | ShapeId::Dodecahedron
            | ShapeId::Cell120
            | ShapeId::Cell120Compound
            | ShapeId::Cell600
            | ShapeId::Cell600Compound => Self {
                radius: 0.03,
                segments: 6,
            },
            ShapeId::TorusKnot | ShapeId::MobiusStrip => Self::THIN,
        }
    }
}
