//! The closed shape vocabulary
//!
//! Every shape the engine can build is a variant of [`ShapeId`]; there is no
//! string-keyed lookup and therefore no "unrecognized shape" failure path.
//! Assemblers match on [`ShapeFamily`] exhaustively, so adding a family is
//! compiler-checked at every dispatch site.

use serde::{Serialize, Deserialize};

/// A buildable shape: base family plus compound arity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeId {
    /// Regular tetrahedron
    Tetrahedron,
    /// Cube (hexahedron)
    Cube,
    /// Regular octahedron
    Octahedron,
    /// Regular icosahedron
    Icosahedron,
    /// Regular dodecahedron
    Dodecahedron,
    /// UV sphere (parametric)
    Sphere,
    /// Torus knot (parametric, p/q configurable)
    TorusKnot,
    /// Mobius strip (parametric)
    MobiusStrip,
    /// 4D hypercube, cell-first projection
    Tesseract,
    /// Tesseract with a deeper nesting sweep
    MegaTesseract,
    /// Two tesseracts at a relative rotation
    TesseractCompound,
    /// 16-cell (hyperoctahedron)
    Cell16,
    /// 24-cell
    Cell24,
    /// Two 24-cells at a relative rotation
    Cell24Compound,
    /// 120-cell (dodecahedral cells)
    Cell120,
    /// Two 120-cells at a relative rotation
    Cell120Compound,
    /// 600-cell (tetrahedral cells, icosahedral vertex figure)
    Cell600,
    /// Two 600-cells at a relative rotation
    Cell600Compound,
}

/// The geometry-processing family of a shape
///
/// Compound variants share their base family; arity is reported separately
/// by [`ShapeId::compound_arity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeFamily {
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
    Sphere,
    TorusKnot,
    MobiusStrip,
    Tesseract,
    Cell16,
    Cell24,
    Cell120,
    Cell600,
}

impl ShapeId {
    /// All recognized shapes, for exhaustive iteration in tests and UIs
    pub const ALL: [ShapeId; 18] = [
        ShapeId::Tetrahedron,
        ShapeId::Cube,
        ShapeId::Octahedron,
        ShapeId::Icosahedron,
        ShapeId::Dodecahedron,
        ShapeId::Sphere,
        ShapeId::TorusKnot,
        ShapeId::MobiusStrip,
        ShapeId::Tesseract,
        ShapeId::MegaTesseract,
        ShapeId::TesseractCompound,
        ShapeId::Cell16,
        ShapeId::Cell24,
        ShapeId::Cell24Compound,
        ShapeId::Cell120,
        ShapeId::Cell120Compound,
        ShapeId::Cell600,
        ShapeId::Cell600Compound,
    ];

    /// Get the geometry-processing family of this shape
    pub fn family(self) -> ShapeFamily {
        match self {
            ShapeId::Tetrahedron => ShapeFamily::Tetrahedron,
            ShapeId::Cube => ShapeFamily::Cube,
            ShapeId::Octahedron => ShapeFamily::Octahedron,
            ShapeId::Icosahedron => ShapeFamily::Icosahedron,
            ShapeId::Dodecahedron => ShapeFamily::Dodecahedron,
            ShapeId::Sphere => ShapeFamily::Sphere,
            ShapeId::TorusKnot => ShapeFamily::TorusKnot,
            ShapeId::MobiusStrip => ShapeFamily::MobiusStrip,
            ShapeId::Tesseract | ShapeId::MegaTesseract | ShapeId::TesseractCompound => {
                ShapeFamily::Tesseract
            }
            ShapeId::Cell16 => ShapeFamily::Cell16,
            ShapeId::Cell24 | ShapeId::Cell24Compound => ShapeFamily::Cell24,
            ShapeId::Cell120 | ShapeId::Cell120Compound => ShapeFamily::Cell120,
            ShapeId::Cell600 | ShapeId::Cell600Compound => ShapeFamily::Cell600,
        }
    }

    /// Number of polytope copies merged into this shape (1 or 2)
    pub fn compound_arity(self) -> u32 {
        match self {
            ShapeId::TesseractCompound
            | ShapeId::Cell24Compound
            | ShapeId::Cell120Compound
            | ShapeId::Cell600Compound => 2,
            _ => 1,
        }
    }

    /// Whether this shape represents a 4D polytope projected into 3D
    pub fn is_four_dimensional(self) -> bool {
        matches!(
            self.family(),
            ShapeFamily::Tesseract
                | ShapeFamily::Cell16
                | ShapeFamily::Cell24
                | ShapeFamily::Cell120
                | ShapeFamily::Cell600
        )
    }

    /// Stable display/cache label for this shape
    pub fn label(self) -> &'static str {
        match self {
            ShapeId::Tetrahedron => "tetrahedron",
            ShapeId::Cube => "cube",
            ShapeId::Octahedron => "octahedron",
            ShapeId::Icosahedron => "icosahedron",
            ShapeId::Dodecahedron => "dodecahedron",
            ShapeId::Sphere => "sphere",
            ShapeId::TorusKnot => "torus-knot",
            ShapeId::MobiusStrip => "mobius-strip",
            ShapeId::Tesseract => "tesseract",
            ShapeId::MegaTesseract => "mega-tesseract",
            ShapeId::TesseractCompound => "tesseract-compound",
            ShapeId::Cell16 => "16-cell",
            ShapeId::Cell24 => "24-cell",
            ShapeId::Cell24Compound => "24-cell-compound",
            ShapeId::Cell120 => "120-cell",
            ShapeId::Cell120Compound => "120-cell-compound",
            ShapeId::Cell600 => "600-cell",
            ShapeId::Cell600Compound => "600-cell-compound",
        }
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_variant() {
        // Labels are unique, so ALL holding 18 distinct labels means every
        // variant is present exactly once
        let mut labels: Vec<&str> = ShapeId::ALL.iter().map(|s| s.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 18);
    }

    #[test]
    fn test_compound_arity() {
        assert_eq!(ShapeId::Cube.compound_arity(), 1);
        assert_eq!(ShapeId::Cell24Compound.compound_arity(), 2);
        assert_eq!(ShapeId::TesseractCompound.compound_arity(), 2);
        assert_eq!(ShapeId::Cell600Compound.compound_arity(), 2);
    }

    #[test]
    fn test_compounds_share_base_family() {
        assert_eq!(ShapeId::Cell120Compound.family(), ShapeFamily::Cell120);
        assert_eq!(ShapeId::Cell600Compound.family(), ShapeFamily::Cell600);
        assert_eq!(ShapeId::MegaTesseract.family(), ShapeFamily::Tesseract);
        assert_eq!(ShapeId::TesseractCompound.family(), ShapeFamily::Tesseract);
    }

    #[test]
    fn test_four_dimensional() {
        assert!(ShapeId::Tesseract.is_four_dimensional());
        assert!(ShapeId::Cell16.is_four_dimensional());
        assert!(ShapeId::Cell120Compound.is_four_dimensional());
        assert!(!ShapeId::Cube.is_four_dimensional());
        assert!(!ShapeId::TorusKnot.is_four_dimensional());
    }

    #[test]
    fn test_serialization_round_trip() {
        for shape in ShapeId::ALL {
            let serialized = ron::to_string(&shape).unwrap();
            let deserialized: ShapeId = ron::from_str(&serialized).unwrap();
            assert_eq!(shape, deserialized);
        }
    }
}
