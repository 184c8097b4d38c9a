//! 3D math primitives for the hyperviz engine
//!
//! This crate provides the vector, rotation, and color types used by the
//! geometry and assembly crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for 3D orientation
//! - [`Color`] - Linear RGB color

mod vec3;
mod quat;
mod color;

pub use vec3::Vec3;
pub use quat::Quat;
pub use color::Color;
