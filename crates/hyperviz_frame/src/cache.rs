//! Material and hyperframe template caches.
//!
//! Both caches key on strings the caller derives from structural parameters.
//! Materials are shared by handle, so a cache hit means the existing
//! allocation is updated in place and every structure holding the handle
//! recolors at once. Hyperframes are cached as templates; a hit hands back a
//! [`Hyperframe::clone_instance`] deep copy so instances can be placed
//! independently while still sharing the template's materials.

use std::collections::HashMap;
use std::rc::Rc;

use hyperviz_geom::{ShapeId, ShapeOverrides};
use hyperviz_math::Color;

use crate::hyperframe::Hyperframe;
use crate::material::{LineHandle, LineMaterial, MaterialConfig, SolidHandle, SolidMaterial};

/// Cache of shared material handles.
///
/// A `None` key always builds a fresh, unshared material. A `Some` key is
/// looked up: hits update the cached material in place and return the same
/// handle, misses insert a new one.
#[derive(Debug, Default)]
pub struct MaterialCache {
    solids: HashMap<String, SolidHandle>,
    lines: HashMap<String, LineHandle>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches or builds a solid material for `config`.
    pub fn solid(&mut self, key: Option<&str>, config: &MaterialConfig) -> SolidHandle {
        match key {
            None => SolidMaterial::handle(config),
            Some(key) => {
                if let Some(handle) = self.solids.get(key) {
                    handle.borrow_mut().apply(config);
                    return Rc::clone(handle);
                }
                log::debug!("caching solid material '{key}'");
                let handle = SolidMaterial::handle(config);
                self.solids.insert(key.to_owned(), Rc::clone(&handle));
                handle
            }
        }
    }

    /// Fetches or builds a line material at an explicit color and opacity.
    pub fn line(&mut self, key: Option<&str>, color: Color, opacity: f32) -> LineHandle {
        match key {
            None => LineMaterial::handle(color, opacity),
            Some(key) => {
                if let Some(handle) = self.lines.get(key) {
                    handle.borrow_mut().set(color, opacity);
                    return Rc::clone(handle);
                }
                log::debug!("caching line material '{key}'");
                let handle = LineMaterial::handle(color, opacity);
                self.lines.insert(key.to_owned(), Rc::clone(&handle));
                handle
            }
        }
    }

    /// Wire counterpart of a solid config, cached under its own key.
    pub fn wire(&mut self, key: Option<&str>, config: &MaterialConfig) -> LineHandle {
        let config = config.clamped();
        self.line(key, config.base_color, config.wire_opacity())
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.solids.clear();
        self.lines.clear();
    }
}

/// Cache of built hyperframe templates.
#[derive(Debug, Default)]
pub struct HyperframeCache {
    templates: HashMap<String, Hyperframe>,
    builds: usize,
}

impl HyperframeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an instance for `key`, building the template with `build` on
    /// the first request. `None` keys bypass the cache entirely (shapes whose
    /// frames are cheap enough to rebuild per unit).
    pub fn get_or_build(
        &mut self,
        key: Option<&str>,
        build: impl FnOnce() -> Hyperframe,
    ) -> Hyperframe {
        match key {
            None => build(),
            Some(key) => {
                if let Some(template) = self.templates.get(key) {
                    return template.clone_instance();
                }
                log::debug!("building hyperframe template '{key}'");
                self.builds += 1;
                let template = build();
                let instance = template.clone_instance();
                self.templates.insert(key.to_owned(), template);
                instance
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Number of template builds, i.e. cache misses, since creation.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }
}

/// Structural signature of a hyperframe build.
///
/// Two configurations share a template exactly when their signatures match.
/// Numeric parameters are rendered at fixed precision, so floating-point
/// noise below three decimals never splits the cache, and the line colors
/// are included because templates bake their material handles.
pub fn frame_signature(
    shape: ShapeId,
    overrides: &ShapeOverrides,
    shell_color: Color,
    connector_color: Color,
) -> String {
    let t = &overrides.tesseract;
    format!(
        "{}|n{}|s{:.3}|g{:.3}|is{:.3}|ms{}|sr{:.3}|ts{:.3}|dr{:.3}|do{:.3}|p{}q{}|tg{:.3}|c{:06x}|k{:06x}",
        shape.label(),
        shape.compound_arity(),
        overrides.size,
        overrides.layer_gap,
        t.inner_scale,
        t.mega_steps,
        t.step_rotation,
        t.translation_step,
        t.duplicate_rotation,
        t.duplicate_offset,
        overrides.torus.p,
        overrides.torus.q,
        overrides.torus.gap,
        shell_color.to_u32(),
        connector_color.to_u32(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperviz_geom::build_geometry;

    use crate::hyperframe::build_hyperframe;

    fn build_frame() -> Hyperframe {
        let overrides = ShapeOverrides::default();
        let geometry = build_geometry(ShapeId::Cell24, &overrides);
        build_hyperframe(
            &geometry,
            &overrides,
            LineMaterial::handle(Color::CYAN, 0.4),
            LineMaterial::handle(Color::MAGENTA, 0.25),
        )
    }

    #[test]
    fn test_solid_cache_shares_handles() {
        let mut cache = MaterialCache::new();
        let config = MaterialConfig::default();
        let first = cache.solid(Some("unit"), &config);
        let second = cache.solid(Some("unit"), &config);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.solid_count(), 1);
    }

    #[test]
    fn test_solid_cache_hit_applies_new_config() {
        let mut cache = MaterialCache::new();
        let first = cache.solid(Some("unit"), &MaterialConfig::default());
        cache.solid(
            Some("unit"),
            &MaterialConfig {
                base_color: Color::RED,
                ..MaterialConfig::default()
            },
        );
        assert!((first.borrow().color.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uncached_materials_are_independent() {
        let mut cache = MaterialCache::new();
        let config = MaterialConfig::default();
        let first = cache.solid(None, &config);
        let second = cache.solid(None, &config);
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(cache.solid_count(), 0);
    }

    #[test]
    fn test_line_cache_keys_are_separate_from_solid_keys() {
        let mut cache = MaterialCache::new();
        cache.solid(Some("unit"), &MaterialConfig::default());
        cache.line(Some("unit"), Color::WHITE, 0.3);
        assert_eq!(cache.solid_count(), 1);
        assert_eq!(cache.line_count(), 1);
    }

    #[test]
    fn test_frame_cache_builds_once() {
        let mut cache = HyperframeCache::new();
        let first = cache.get_or_build(Some("cell-24"), build_frame);
        let second = cache.get_or_build(Some("cell-24"), || unreachable!());
        assert_eq!(cache.build_count(), 1);
        assert_eq!(first.strut_count(), second.strut_count());
    }

    #[test]
    fn test_cached_instances_share_materials_but_not_struts() {
        let mut cache = HyperframeCache::new();
        let first = cache.get_or_build(Some("cell-24"), build_frame);
        let mut second = cache.get_or_build(Some("cell-24"), || unreachable!());
        assert!(Rc::ptr_eq(
            &first.center_lines.material,
            &second.center_lines.material
        ));
        let count = second.center_lines.strut_count();
        second.center_lines.struts.clear();
        assert!(count > 0);
        assert_eq!(first.center_lines.strut_count(), count);
    }

    #[test]
    fn test_unkeyed_frames_bypass_cache() {
        let mut cache = HyperframeCache::new();
        cache.get_or_build(None, build_frame);
        assert!(cache.is_empty());
        assert_eq!(cache.build_count(), 0);
    }

    #[test]
    fn test_signature_is_stable_and_structural() {
        let overrides = ShapeOverrides::default();
        let a = frame_signature(ShapeId::Cell120, &overrides, Color::CYAN, Color::MAGENTA);
        let b = frame_signature(ShapeId::Cell120, &overrides, Color::CYAN, Color::MAGENTA);
        assert_eq!(a, b);

        let recolored = frame_signature(ShapeId::Cell120, &overrides, Color::RED, Color::MAGENTA);
        assert_ne!(a, recolored);

        let regapped = frame_signature(
            ShapeId::Cell120,
            &ShapeOverrides {
                layer_gap: 0.3,
                ..ShapeOverrides::default()
            },
            Color::CYAN,
            Color::MAGENTA,
        );
        assert_ne!(a, regapped);
    }

    #[test]
    fn test_signature_covers_sweep_depth() {
        let mut deeper = ShapeOverrides::default();
        deeper.tesseract.mega_steps += 1;
        let a = frame_signature(
            ShapeId::MegaTesseract,
            &ShapeOverrides::default(),
            Color::CYAN,
            Color::MAGENTA,
        );
        let b = frame_signature(ShapeId::MegaTesseract, &deeper, Color::CYAN, Color::MAGENTA);
        assert_ne!(a, b);
    }

    #[test]
    fn test_signature_ignores_subthreshold_noise() {
        let a = frame_signature(
            ShapeId::Cell600,
            &ShapeOverrides {
                layer_gap: 0.2200001,
                ..ShapeOverrides::default()
            },
            Color::CYAN,
            Color::MAGENTA,
        );
        let b = frame_signature(
            ShapeId::Cell600,
            &ShapeOverrides::default(),
            Color::CYAN,
            Color::MAGENTA,
        );
        assert_eq!(a, b);
    }
}
