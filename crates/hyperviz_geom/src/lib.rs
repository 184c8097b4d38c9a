//! Procedural geometry for the hyperviz engine
//!
//! This crate produces canonical vertex/index buffers for every recognized
//! shape and derives the unique edge set from a triangulated surface:
//!
//! - [`ShapeId`] / [`ShapeFamily`] - the closed shape vocabulary
//! - [`Geometry`] - positions + triangle indices + semantic tags
//! - [`ShellRadii`] - named nested-shell radii for 4D families
//! - [`build_geometry`] - deterministic per-shape construction
//! - [`EdgeSet`] / [`extract_edges`] - unique undirected edges
//! - [`CanonicalSet`] - unit-normalized polytope vertex sets for shells

mod shape;
mod geometry;
mod polytopes;
mod builder;
mod edges;

pub use shape::{ShapeId, ShapeFamily};
pub use geometry::{Geometry, GeometryTags, ShellRadii};
pub use polytopes::CanonicalSet;
pub use builder::{build_geometry, compound_rotation, ShapeOverrides, TorusKnotParams, TesseractParams};
pub use edges::{EdgeSet, extract_edges, nearest_vertex_index};
