//! Shared-mutable render materials.
//!
//! Solids and line structures reference their materials through `Rc<RefCell>`
//! handles. The cache in [`crate::MaterialCache`] hands the same handle to
//! every structure built with the same key, so updating a material in place
//! recolors all of them at once. The scene runs on one thread, which is what
//! makes the `Rc<RefCell>` sharing sound.

use std::cell::RefCell;
use std::rc::Rc;

use hyperviz_math::Color;
use serde::{Deserialize, Serialize};

/// Shared handle to a solid-surface material.
pub type SolidHandle = Rc<RefCell<SolidMaterial>>;

/// Shared handle to a line material.
pub type LineHandle = Rc<RefCell<LineMaterial>>;

/// User-facing material parameters.
///
/// `wireframe_intensity` is a 0..=100 slider that trades solid opacity for
/// wire opacity: at 0 the solid is fully opaque and the wires invisible, at
/// 100 the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub base_color: Color,
    pub metalness: f32,
    pub emissive_intensity: f32,
    pub wireframe_intensity: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            base_color: Color::new(0.72, 0.78, 0.95),
            metalness: 0.5,
            emissive_intensity: 0.4,
            wireframe_intensity: 30.0,
        }
    }
}

impl MaterialConfig {
    /// Returns a copy with every field clamped to its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            base_color: self.base_color,
            metalness: self.metalness.clamp(0.0, 1.0),
            emissive_intensity: self.emissive_intensity.clamp(0.0, 2.0),
            wireframe_intensity: self.wireframe_intensity.clamp(0.0, 100.0),
        }
    }

    /// Solid opacity implied by the wireframe intensity slider.
    pub fn solid_opacity(&self) -> f32 {
        1.0 - self.wireframe_intensity.clamp(0.0, 100.0) / 100.0
    }

    /// Wire opacity implied by the wireframe intensity slider.
    pub fn wire_opacity(&self) -> f32 {
        self.wireframe_intensity.clamp(0.0, 100.0) / 100.0
    }
}

/// Physically-shaded material for solid surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidMaterial {
    pub color: Color,
    pub metalness: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl SolidMaterial {
    /// Fraction of the base color re-emitted as glow.
    const EMISSIVE_TINT: f32 = 0.25;

    pub fn from_config(config: &MaterialConfig) -> Self {
        let mut material = Self {
            color: Color::BLACK,
            metalness: 0.0,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
        };
        material.apply(config);
        material
    }

    /// Rewrites this material in place from `config`. Existing handles keep
    /// pointing at the same allocation, so every structure sharing the
    /// material picks up the change.
    pub fn apply(&mut self, config: &MaterialConfig) {
        let config = config.clamped();
        self.color = config.base_color;
        self.metalness = config.metalness;
        self.emissive = config.base_color.scaled(Self::EMISSIVE_TINT);
        self.emissive_intensity = config.emissive_intensity;
        self.opacity = config.solid_opacity();
        self.transparent = self.opacity < 1.0;
    }

    pub fn handle(config: &MaterialConfig) -> SolidHandle {
        Rc::new(RefCell::new(Self::from_config(config)))
    }
}

/// Flat-shaded material for struts and line groups.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
}

impl LineMaterial {
    pub fn new(color: Color, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            color,
            opacity,
            transparent: opacity < 1.0,
        }
    }

    /// Wire counterpart of a solid material config: base color at the wire
    /// opacity implied by the intensity slider.
    pub fn from_config(config: &MaterialConfig) -> Self {
        let config = config.clamped();
        Self::new(config.base_color, config.wire_opacity())
    }

    pub fn apply(&mut self, config: &MaterialConfig) {
        *self = Self::from_config(config);
    }

    /// Recolors the line material in place, preserving sharing.
    pub fn set(&mut self, color: Color, opacity: f32) {
        *self = Self::new(color, opacity);
    }

    pub fn handle(color: Color, opacity: f32) -> LineHandle {
        Rc::new(RefCell::new(Self::new(color, opacity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_opacity_split_from_intensity() {
        let config = MaterialConfig {
            wireframe_intensity: 30.0,
            ..MaterialConfig::default()
        };
        assert!(approx_eq(config.solid_opacity(), 0.7));
        assert!(approx_eq(config.wire_opacity(), 0.3));
    }

    #[test]
    fn test_config_clamping() {
        let config = MaterialConfig {
            metalness: 1.5,
            emissive_intensity: -0.5,
            wireframe_intensity: 140.0,
            ..MaterialConfig::default()
        }
        .clamped();
        assert!(approx_eq(config.metalness, 1.0));
        assert!(approx_eq(config.emissive_intensity, 0.0));
        assert!(approx_eq(config.wireframe_intensity, 100.0));
    }

    #[test]
    fn test_solid_material_from_config() {
        let config = MaterialConfig {
            base_color: Color::new(1.0, 0.5, 0.0),
            wireframe_intensity: 0.0,
            ..MaterialConfig::default()
        };
        let material = SolidMaterial::from_config(&config);
        assert!(approx_eq(material.opacity, 1.0));
        assert!(!material.transparent);
        assert!(approx_eq(material.emissive.r, 0.25));
    }

    #[test]
    fn test_apply_propagates_through_shared_handle() {
        let handle = SolidMaterial::handle(&MaterialConfig::default());
        let alias = Rc::clone(&handle);
        handle.borrow_mut().apply(&MaterialConfig {
            base_color: Color::new(0.0, 1.0, 0.0),
            ..MaterialConfig::default()
        });
        assert!(approx_eq(alias.borrow().color.g, 1.0));
        assert!(Rc::ptr_eq(&handle, &alias));
    }

    #[test]
    fn test_line_material_transparency_flag() {
        let opaque = LineMaterial::new(Color::WHITE, 1.0);
        let faint = LineMaterial::new(Color::WHITE, 0.3);
        assert!(!opaque.transparent);
        assert!(faint.transparent);
    }
}
