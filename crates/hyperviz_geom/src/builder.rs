//! Deterministic per-shape geometry construction
//!
//! [`build_geometry`] is the single entry point: identical input always
//! produces identical output, and every [`ShapeId`] variant is matched
//! exhaustively, so there is no failure path.

use hyperviz_math::{Quat, Vec3};
use crate::geometry::{Geometry, GeometryTags, ShellRadii};
use crate::polytopes::{
    self, CUBE_INDICES, CUBE_VERTICES, DODECAHEDRON_INDICES, DODECAHEDRON_VERTICES,
    ICOSAHEDRON_INDICES, ICOSAHEDRON_VERTICES, OCTAHEDRON_INDICES, OCTAHEDRON_VERTICES,
    TETRAHEDRON_INDICES, TETRAHEDRON_VERTICES,
};
use crate::{ShapeFamily, ShapeId};
use serde::{Serialize, Deserialize};
use std::f32::consts::{PI, TAU};

/// Numeric overrides for the torus-knot family
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TorusKnotParams {
    /// Winds around the torus axis of symmetry
    pub p: u32,
    /// Winds around the torus interior circle
    pub q: u32,
    /// Tube cross-section radius
    pub tube_radius: f32,
    /// Fraction of the tubular sweep left open (0 = closed knot)
    pub gap: f32,
    /// Segments along the knot
    pub tubular_segments: u32,
    /// Segments around the tube
    pub radial_segments: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            p: 2,
            q: 3,
            tube_radius: 0.18,
            gap: 0.0,
            tubular_segments: 96,
            radial_segments: 8,
        }
    }
}

/// Numeric overrides for the tesseract family sweep
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TesseractParams {
    /// Scale applied per sweep step (inner cell = outer * inner_scale)
    pub inner_scale: f32,
    /// Sweep depth for the mega variant (plain tesseract uses one step)
    pub mega_steps: u32,
    /// Rotation per sweep step, radians around Y
    pub step_rotation: f32,
    /// Translation per sweep step along Y
    pub translation_step: f32,
    /// Rotation of the compound duplicate, radians around Y
    pub duplicate_rotation: f32,
    /// Offset of the compound duplicate along Y
    pub duplicate_offset: f32,
}

impl Default for TesseractParams {
    fn default() -> Self {
        Self {
            inner_scale: 0.55,
            mega_steps: 3,
            step_rotation: 0.0,
            translation_step: 0.0,
            duplicate_rotation: PI / 4.0,
            duplicate_offset: 0.0,
        }
    }
}

/// Family-specific numeric overrides for geometry construction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeOverrides {
    /// Base scale: circumradius for polytopes, radius for parametrics
    pub size: f32,
    /// Per-layer shell gap fraction for 4D families, in (0, 1)
    pub layer_gap: f32,
    /// Sphere longitude segments
    pub sphere_width_segments: u32,
    /// Sphere latitude segments
    pub sphere_height_segments: u32,
    #[serde(default)]
    pub torus: TorusKnotParams,
    #[serde(default)]
    pub tesseract: TesseractParams,
}

impl Default for ShapeOverrides {
    fn default() -> Self {
        Self {
            size: 1.0,
            layer_gap: 0.22,
            sphere_width_segments: 16,
            sphere_height_segments: 12,
            torus: TorusKnotParams::default(),
            tesseract: TesseractParams::default(),
        }
    }
}

/// The fixed relative rotation applied to the second component of a
/// compound shape (also used for the inner cell of the 16-cell)
pub fn compound_rotation(family: ShapeFamily) -> Quat {
    match family {
        ShapeFamily::Tesseract | ShapeFamily::Cell16 | ShapeFamily::Cell24 => {
            Quat::from_axis_angle(Vec3::Y, PI / 4.0)
        }
        ShapeFamily::Cell120 => Quat::from_axis_angle(Vec3::Z, PI / 5.0),
        ShapeFamily::Cell600 => Quat::from_axis_angle(Vec3::Y, PI / 5.0),
        // Non-compound families never rotate a duplicate
        _ => Quat::IDENTITY,
    }
}

/// Build the canonical render geometry for a shape
pub fn build_geometry(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let geometry = match shape {
        ShapeId::Tetrahedron => {
            platonic(shape, &TETRAHEDRON_VERTICES, &TETRAHEDRON_INDICES, overrides.size)
        }
        ShapeId::Cube => platonic(shape, &CUBE_VERTICES, &CUBE_INDICES, overrides.size),
        ShapeId::Octahedron => {
            platonic(shape, &OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES, overrides.size)
        }
        ShapeId::Icosahedron => {
            platonic(shape, &ICOSAHEDRON_VERTICES, &ICOSAHEDRON_INDICES, overrides.size)
        }
        ShapeId::Dodecahedron => {
            platonic(shape, &DODECAHEDRON_VERTICES, &DODECAHEDRON_INDICES, overrides.size)
        }
        ShapeId::Sphere => sphere(shape, overrides),
        ShapeId::TorusKnot => torus_knot(shape, overrides),
        ShapeId::MobiusStrip => mobius_strip(shape, overrides),
        ShapeId::Tesseract | ShapeId::MegaTesseract | ShapeId::TesseractCompound => {
            tesseract_sweep(shape, overrides)
        }
        ShapeId::Cell16 => cell16(shape, overrides),
        ShapeId::Cell24
        | ShapeId::Cell24Compound
        | ShapeId::Cell120
        | ShapeId::Cell120Compound
        | ShapeId::Cell600
        | ShapeId::Cell600Compound => cell_polytope(shape, overrides),
    };

    log::debug!(
        "built {} geometry: {} vertices, {} triangles",
        shape,
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    geometry
}

fn tags(shape: ShapeId, shells: Option<ShellRadii>) -> GeometryTags {
    GeometryTags {
        shape,
        compound_arity: shape.compound_arity(),
        shells,
    }
}

fn platonic(shape: ShapeId, vertices: &[[f32; 3]], indices: &[u32], size: f32) -> Geometry {
    let positions = polytopes::table_to_positions(vertices)
        .into_iter()
        .map(|v| v * size)
        .collect();
    Geometry::new(positions, indices.to_vec(), tags(shape, None))
}

/// One Platonic solid scaled so its circumradius equals `radius`
fn unit_solid(
    shape: ShapeId,
    vertices: &[[f32; 3]],
    indices: &[u32],
    radius: f32,
) -> Geometry {
    let positions: Vec<Vec3> = polytopes::table_to_positions(vertices)
        .into_iter()
        .map(|v| v.normalized() * radius)
        .collect();
    Geometry::new(positions, indices.to_vec(), tags(shape, None))
}

/// Cell polytopes render as their outer cell solid, tagged with shell radii
///
/// 24-cell -> octahedron, 120-cell -> dodecahedron, 600-cell -> icosahedron;
/// compounds merge a second copy at the family's fixed rotation.
fn cell_polytope(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let shells = ShellRadii::from_outer_gap(overrides.size, overrides.layer_gap);
    let family = shape.family();
    let (vertices, indices): (&[[f32; 3]], &[u32]) = match family {
        ShapeFamily::Cell24 => (&OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES),
        ShapeFamily::Cell120 => (&DODECAHEDRON_VERTICES, &DODECAHEDRON_INDICES),
        ShapeFamily::Cell600 => (&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_INDICES),
        // cell16 has its own builder; anything else never reaches here
        _ => unreachable!("cell_polytope called for non-cell family"),
    };

    let mut geometry = unit_solid(shape, vertices, indices, shells.outer);
    if shape.compound_arity() == 2 {
        let mut duplicate = unit_solid(shape, vertices, indices, shells.outer);
        duplicate.rotate(compound_rotation(family));
        geometry.merge(&duplicate);
    }

    Geometry::new(
        geometry.positions().to_vec(),
        geometry.indices().to_vec(),
        GeometryTags {
            shells: Some(shells),
            ..tags(shape, None)
        },
    )
}

/// 16-cell: outer octahedron plus a rotated, scaled inner octahedron
fn cell16(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let shells = ShellRadii::from_outer_gap(overrides.size, overrides.layer_gap);
    let mut geometry = unit_solid(shape, &OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES, shells.outer);
    let mut inner = unit_solid(shape, &OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES, shells.layer2);
    inner.rotate(compound_rotation(ShapeFamily::Cell16));
    geometry.merge(&inner);

    Geometry::new(
        geometry.positions().to_vec(),
        geometry.indices().to_vec(),
        GeometryTags {
            shape,
            compound_arity: 1,
            shells: Some(shells),
        },
    )
}

/// Tesseract family: iterative translate/rotate/scale sweep of a cube cell
fn tesseract_sweep(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let params = &overrides.tesseract;
    let steps = match shape {
        ShapeId::MegaTesseract => params.mega_steps.max(1),
        _ => 1,
    };

    let mut merged = one_tesseract(shape, overrides.size, steps, params, Quat::IDENTITY, 0.0);
    if shape == ShapeId::TesseractCompound {
        let duplicate = one_tesseract(
            shape,
            overrides.size,
            steps,
            params,
            Quat::from_axis_angle(Vec3::Y, params.duplicate_rotation),
            params.duplicate_offset,
        );
        merged.merge(&duplicate);
    }

    let outer_radius = overrides.size * 3.0_f32.sqrt();
    Geometry::new(
        merged.positions().to_vec(),
        merged.indices().to_vec(),
        GeometryTags {
            shells: Some(ShellRadii::from_outer_gap(outer_radius, overrides.layer_gap)),
            ..tags(shape, None)
        },
    )
}

fn one_tesseract(
    shape: ShapeId,
    half_extent: f32,
    steps: u32,
    params: &TesseractParams,
    orientation: Quat,
    offset_y: f32,
) -> Geometry {
    let mut merged = platonic(shape, &CUBE_VERTICES, &CUBE_INDICES, half_extent);
    for step in 1..=steps {
        let mut cell = platonic(shape, &CUBE_VERTICES, &CUBE_INDICES, half_extent);
        cell.scale(params.inner_scale.powi(step as i32));
        if params.step_rotation != 0.0 {
            cell.rotate(Quat::from_axis_angle(Vec3::Y, params.step_rotation * step as f32));
        }
        if params.translation_step != 0.0 {
            cell.translate(Vec3::Y * (params.translation_step * step as f32));
        }
        merged.merge(&cell);
    }
    merged.rotate(orientation);
    if offset_y != 0.0 {
        merged.translate(Vec3::Y * offset_y);
    }
    merged
}

fn sphere(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let radius = overrides.size;
    let w = overrides.sphere_width_segments.max(3);
    let h = overrides.sphere_height_segments.max(2);

    let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            positions.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.cos(),
                radius * theta.sin() * phi.sin(),
            ));
        }
    }

    let mut indices = Vec::new();
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * (w + 1) + ix;
            let b = (iy + 1) * (w + 1) + ix;
            let c = b + 1;
            let d = a + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[d, b, c]);
            }
        }
    }

    Geometry::new(positions, indices, tags(shape, None))
}

fn knot_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

fn torus_knot(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let params = &overrides.torus;
    let p = params.p.max(1) as f32;
    let q = params.q.max(1) as f32;
    let radius = overrides.size;
    let tubular = params.tubular_segments.max(8);
    let radial = params.radial_segments.max(3);
    // The centerline closes after p full turns; the gap leaves part of the
    // sweep open
    let sweep = p * TAU * (1.0 - params.gap.clamp(0.0, 0.9));

    let mut positions = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * sweep;
        let p1 = knot_point(u, p, q, radius);
        let p2 = knot_point(u + 0.01, p, q, radius);

        // Frenet-style frame from neighboring samples
        let tangent = p2 - p1;
        let mut bitangent = tangent.cross(p2 + p1);
        let mut normal = bitangent.cross(tangent);
        bitangent = bitangent.normalized();
        normal = normal.normalized();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -params.tube_radius * v.cos();
            let cy = params.tube_radius * v.sin();
            positions.push(p1 + normal * cx + bitangent * cy);
        }
    }

    let mut indices = Vec::new();
    for i in 0..tubular {
        for j in 0..radial {
            let a = i * (radial + 1) + j;
            let b = (i + 1) * (radial + 1) + j;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    Geometry::new(positions, indices, tags(shape, None))
}

fn mobius_strip(shape: ShapeId, overrides: &ShapeOverrides) -> Geometry {
    let radius = overrides.size;
    let around = 64u32;
    let across = 8u32;

    let mut positions = Vec::with_capacity(((around + 1) * (across + 1)) as usize);
    for i in 0..=around {
        let u = i as f32 / around as f32 * TAU;
        for j in 0..=across {
            let v = j as f32 / across as f32 - 0.5; // -0.5 .. 0.5
            let r = 1.0 + v * (u * 0.5).cos();
            positions.push(
                Vec3::new(r * u.cos(), r * u.sin(), v * (u * 0.5).sin()) * radius,
            );
        }
    }

    let mut indices = Vec::new();
    for i in 0..around {
        for j in 0..across {
            let a = i * (across + 1) + j;
            let b = (i + 1) * (across + 1) + j;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    Geometry::new(positions, indices, tags(shape, None))
}
