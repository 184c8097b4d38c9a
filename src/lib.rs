//! hyperviz - procedural polytope scenes
//!
//! End-to-end assembly of renderable polytope scenes: a [`SceneConfig`]
//! describes what the user wants, and the [`ObjectFactory`] turns it into
//! placed [`RenderUnit`]s, each carrying a solid mesh, an edge wireframe,
//! and a hyperframe of nested shells or interior structure. The heavy
//! lifting lives in the member crates:
//!
//! - `hyperviz_math` - vectors, quaternions, colors
//! - `hyperviz_geom` - shape vocabulary, geometry construction, edge
//!   extraction
//! - `hyperviz_frame` - struts, wireframes, hyperframes, and the material
//!   and template caches
//!
//! This crate adds the configuration layer, the rebuild-vs-recolor delta
//! logic, the factory with its unit registry, and the decorative-extras
//! seam.

pub mod config;
pub mod extras;
pub mod factory;

pub use config::{RebuildFlags, SceneConfig};
pub use extras::{DecorExtras, ExtrasError};
pub use factory::{
    unit_id_of, DecorSeed, ObjectFactory, RenderUnit, SolidMesh, UnitKey, UnitRecord, RING_RADIUS,
};

pub use hyperviz_frame as frame;
pub use hyperviz_geom as geom;
pub use hyperviz_math as math;
