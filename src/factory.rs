//! The object factory: config in, placed render units out.
//!
//! The factory owns the caches and the unit registry. [`ObjectFactory::create_set`]
//! turns a [`SceneConfig`] into `instance_count` complete render units spaced
//! around a fixed ring, each carrying its solid mesh, wireframe, and
//! hyperframe with materials routed through the shared cache.
//! [`ObjectFactory::apply`] classifies a config edit and either rebuilds the
//! set or recolors the shared materials in place without touching structure.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::{Key, SlotMap};

use hyperviz_frame::{
    assemble_wireframe, build_hyperframe, frame_signature, Hyperframe, HyperframeCache,
    MaterialCache, SolidHandle, WireframeMesh,
};
use hyperviz_geom::{build_geometry, compound_rotation, extract_edges, Geometry, ShapeId};
use hyperviz_math::Vec3;

use crate::config::{RebuildFlags, SceneConfig};
use crate::extras::DecorExtras;

slotmap::new_key_type! {
    /// Stable registry key for one render unit.
    pub struct UnitKey;
}

/// Ring radius the units are spaced on.
pub const RING_RADIUS: f32 = 6.0;
/// Placement jitter along the ring normal (Y), per unit.
const JITTER_RANGE: f32 = 0.5;
/// Scale applied to the compound duplicate overlay so coincident faces do
/// not z-fight.
const DUPLICATE_SCALE: f32 = 1.02;
/// Fixed opacities of the two hyperframe line groups.
const SHELL_OPACITY: f32 = 0.45;
const CONNECTOR_OPACITY: f32 = 0.25;

/// Per-unit random seed handed to decorative extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorSeed(pub u64);

/// A triangle mesh plus its shared material.
#[derive(Debug, Clone)]
pub struct SolidMesh {
    pub geometry: Geometry,
    pub material: SolidHandle,
    /// Render-unit id for hit-testing, stamped at creation.
    pub unit_id: Option<u64>,
}

/// Everything the host needs to draw and pick one placed instance.
#[derive(Debug, Clone)]
pub struct RenderUnit {
    pub key: UnitKey,
    /// World-space anchor; all child geometry is in local space around it.
    pub position: Vec3,
    /// Canonical geometry, also the picking mesh.
    pub geometry: Geometry,
    pub solid: SolidMesh,
    /// Compound-tesseract overlay: the duplicate cell as its own mesh,
    /// rotated and slightly inflated. `None` for every other shape.
    pub duplicate_solid: Option<SolidMesh>,
    pub wireframe: WireframeMesh,
    pub hyperframe: Hyperframe,
    pub seed: DecorSeed,
}

/// Registry entry kept per live unit for external lookups.
#[derive(Debug, Clone, Copy)]
pub struct UnitRecord {
    pub shape: ShapeId,
    pub position: Vec3,
}

/// Builds and rebuilds the scene's render units.
pub struct ObjectFactory {
    materials: MaterialCache,
    frames: HyperframeCache,
    units: SlotMap<UnitKey, UnitRecord>,
    rng: StdRng,
}

impl ObjectFactory {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// A factory with a fixed placement seed, for reproducible layouts.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            materials: MaterialCache::new(),
            frames: HyperframeCache::new(),
            units: SlotMap::with_key(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds a fresh unit set for `config`.
    ///
    /// The registry is cleared first; callers are expected to have detached
    /// the previous set. Unit `i` of `N` sits at ring angle `2πi/N`, jittered
    /// only along Y so the ring stays a ring. Geometry, wireframe, and
    /// hyperframe are built once per set and cloned per unit; materials come
    /// from the cache, so the whole set shares them.
    pub fn create_set(&mut self, config: &SceneConfig) -> Vec<RenderUnit> {
        self.units.clear();
        let count = config.unit_count();
        let shape = config.shape;
        log::info!("creating {count} render unit(s) of {shape}");

        let solid_material = self.materials.solid(Some("scene-solid"), &config.material);
        let wire_material = self.materials.wire(Some("scene-wire"), &config.material);
        let shell_material =
            self.materials
                .line(Some("frame-shell"), config.shell_color, SHELL_OPACITY);
        let connector_material = self.materials.line(
            Some("frame-connector"),
            config.connector_color,
            CONNECTOR_OPACITY,
        );

        let geometry = build_geometry(shape, &config.overrides);
        let edges = extract_edges(&geometry, 1.0);
        let wireframe = assemble_wireframe(&geometry, &edges, wire_material);
        let solid_geometry = primary_solid_geometry(shape, config);
        let duplicate_geometry = duplicate_solid_geometry(shape, config);

        // 4D families have expensive frames and get cached templates;
        // everything else rebuilds per set.
        let signature = frame_signature(
            shape,
            &config.overrides,
            config.shell_color,
            config.connector_color,
        );
        let frame_key = shape.is_four_dimensional().then_some(signature.as_str());

        let mut set = Vec::with_capacity(count as usize);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let position = Vec3::new(
                RING_RADIUS * angle.cos(),
                self.rng.gen_range(-JITTER_RANGE..=JITTER_RANGE),
                RING_RADIUS * angle.sin(),
            );
            let key = self.units.insert(UnitRecord { shape, position });
            let unit_id = key.data().as_ffi();

            let mut wireframe = wireframe.clone();
            wireframe.unit_id = Some(unit_id);
            let mut hyperframe = self.frames.get_or_build(frame_key, || {
                build_hyperframe(
                    &geometry,
                    &config.overrides,
                    shell_material.clone(),
                    connector_material.clone(),
                )
            });
            hyperframe.center_lines.unit_id = Some(unit_id);
            hyperframe.curved_lines.unit_id = Some(unit_id);

            let solid = SolidMesh {
                geometry: solid_geometry.clone(),
                material: solid_material.clone(),
                unit_id: Some(unit_id),
            };
            let duplicate_solid = duplicate_geometry.clone().map(|geometry| SolidMesh {
                geometry,
                material: solid_material.clone(),
                unit_id: Some(unit_id),
            });

            set.push(RenderUnit {
                key,
                position,
                geometry: geometry.clone(),
                solid,
                duplicate_solid,
                wireframe,
                hyperframe,
                seed: DecorSeed(self.rng.gen()),
            });
        }
        set
    }

    /// Moves a live scene from `old` to `new` the cheapest correct way.
    ///
    /// A structural delta rebuilds and returns the fresh set. A material-only
    /// delta updates the shared handles in place and returns `None`; nothing
    /// the host is already drawing needs replacing. No delta, no work.
    pub fn apply(&mut self, old: &SceneConfig, new: &SceneConfig) -> Option<Vec<RenderUnit>> {
        let delta = old.delta(new);
        if delta.contains(RebuildFlags::STRUCTURE) {
            return Some(self.create_set(new));
        }
        if delta.contains(RebuildFlags::MATERIAL) {
            self.update_materials(new);
        }
        None
    }

    /// Rewrites every cached scene material in place from `config`. All
    /// structures holding the shared handles recolor immediately.
    pub fn update_materials(&mut self, config: &SceneConfig) {
        self.materials.solid(Some("scene-solid"), &config.material);
        self.materials.wire(Some("scene-wire"), &config.material);
        self.materials
            .line(Some("frame-shell"), config.shell_color, SHELL_OPACITY);
        self.materials.line(
            Some("frame-connector"),
            config.connector_color,
            CONNECTOR_OPACITY,
        );
    }

    /// Hands `unit` to a decorator. Failure is logged and swallowed; the
    /// unit is always usable afterward.
    pub fn attach_extras(&self, unit: &RenderUnit, extras: &mut dyn DecorExtras) {
        if let Err(err) = extras.attach(unit) {
            log::warn!("extras attach failed for unit {:?}: {err}", unit.key);
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn unit(&self, key: UnitKey) -> Option<&UnitRecord> {
        self.units.get(key)
    }

    /// Hyperframe template builds since creation, i.e. frame cache misses.
    pub fn frame_build_count(&self) -> usize {
        self.frames.build_count()
    }
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Solid-mesh geometry for the primary component. The compound tesseract
/// draws its components as two separate meshes, so its primary is the plain
/// tesseract; everything else draws the canonical geometry directly.
fn primary_solid_geometry(shape: ShapeId, config: &SceneConfig) -> Geometry {
    if shape == ShapeId::TesseractCompound {
        build_geometry(ShapeId::Tesseract, &config.overrides)
    } else {
        build_geometry(shape, &config.overrides)
    }
}

/// Overlay geometry for the compound tesseract's duplicate component:
/// the plain tesseract rotated by the duplicate rotation, offset along Y,
/// and slightly inflated.
fn duplicate_solid_geometry(shape: ShapeId, config: &SceneConfig) -> Option<Geometry> {
    if shape != ShapeId::TesseractCompound {
        return None;
    }
    let mut geometry = build_geometry(ShapeId::Tesseract, &config.overrides);
    geometry.rotate(compound_rotation(shape.family()));
    geometry.translate(Vec3::Y * config.overrides.tesseract.duplicate_offset);
    geometry.scale(DUPLICATE_SCALE);
    Some(geometry)
}

/// Convenience for hosts resolving a picking hit back to a unit key.
pub fn unit_id_of(key: UnitKey) -> u64 {
    key.data().as_ffi()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn config_for(shape: ShapeId, count: u32) -> SceneConfig {
        SceneConfig {
            shape,
            instance_count: count,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_three_units_on_the_ring() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Tetrahedron, 3));
        assert_eq!(set.len(), 3);
        for (i, unit) in set.iter().enumerate() {
            let angle = TAU * i as f32 / 3.0;
            assert!((unit.position.x - RING_RADIUS * angle.cos()).abs() < 1e-4);
            assert!((unit.position.z - RING_RADIUS * angle.sin()).abs() < 1e-4);
            assert!(unit.position.y.abs() <= JITTER_RANGE + 1e-6);
        }
    }

    #[test]
    fn test_units_get_distinct_keys() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Tetrahedron, 3));
        assert_ne!(set[0].key, set[1].key);
        assert_ne!(set[1].key, set[2].key);
        assert_eq!(factory.unit_count(), 3);
    }

    #[test]
    fn test_children_are_stamped_with_the_unit_id() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Cube, 2));
        for unit in &set {
            let id = unit_id_of(unit.key);
            assert_eq!(unit.solid.unit_id, Some(id));
            assert_eq!(unit.wireframe.unit_id, Some(id));
            assert_eq!(unit.hyperframe.center_lines.unit_id, Some(id));
            assert_eq!(unit.hyperframe.curved_lines.unit_id, Some(id));
        }
        assert_ne!(set[0].wireframe.unit_id, set[1].wireframe.unit_id);
    }

    #[test]
    fn test_set_shares_materials_across_units() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Icosahedron, 3));
        assert!(Rc::ptr_eq(&set[0].solid.material, &set[1].solid.material));
        assert!(Rc::ptr_eq(
            &set[0].wireframe.material,
            &set[2].wireframe.material
        ));
        assert!(Rc::ptr_eq(
            &set[0].hyperframe.center_lines.material,
            &set[2].hyperframe.center_lines.material
        ));
    }

    #[test]
    fn test_structural_apply_rebuilds_with_new_count() {
        let mut factory = ObjectFactory::with_seed(7);
        let old = config_for(ShapeId::Tetrahedron, 3);
        factory.create_set(&old);
        let new = config_for(ShapeId::Tetrahedron, 4);
        let rebuilt = factory.apply(&old, &new);
        let rebuilt = rebuilt.unwrap();
        assert_eq!(rebuilt.len(), 4);
        assert_eq!(factory.unit_count(), 4);
    }

    #[test]
    fn test_material_apply_updates_in_place_without_rebuild() {
        let mut factory = ObjectFactory::with_seed(7);
        let old = config_for(ShapeId::Cube, 2);
        let set = factory.create_set(&old);
        let handle = Rc::clone(&set[0].solid.material);

        let mut new = old.clone();
        new.material.base_color = hyperviz_math::Color::RED;
        assert!(factory.apply(&old, &new).is_none());
        assert!((handle.borrow().color.r - 1.0).abs() < 1e-6);
        assert!(Rc::ptr_eq(&handle, &set[0].solid.material));
        assert_eq!(factory.unit_count(), 2);
    }

    #[test]
    fn test_material_update_is_idempotent() {
        let mut factory = ObjectFactory::with_seed(7);
        let config = config_for(ShapeId::Cube, 1);
        let set = factory.create_set(&config);
        let before = set[0].solid.material.borrow().clone();
        factory.update_materials(&config);
        factory.update_materials(&config);
        assert_eq!(*set[0].solid.material.borrow(), before);
    }

    #[test]
    fn test_unchanged_config_applies_as_noop() {
        let mut factory = ObjectFactory::with_seed(7);
        let config = config_for(ShapeId::Sphere, 2);
        factory.create_set(&config);
        assert!(factory.apply(&config, &config.clone()).is_none());
    }

    #[test]
    fn test_four_dimensional_frames_are_cached_across_units() {
        let mut factory = ObjectFactory::with_seed(7);
        factory.create_set(&config_for(ShapeId::Cell120, 4));
        assert_eq!(factory.frame_build_count(), 1);
    }

    #[test]
    fn test_sweep_depth_edit_builds_a_fresh_frame_template() {
        let mut factory = ObjectFactory::with_seed(7);
        let mut shallow = config_for(ShapeId::MegaTesseract, 1);
        shallow.overrides.tesseract.mega_steps = 2;
        factory.create_set(&shallow);

        let mut deep = shallow.clone();
        deep.overrides.tesseract.mega_steps = 5;
        let rebuilt = factory.apply(&shallow, &deep).unwrap();

        // The deeper sweep must not be served the shallow template.
        let fresh = ObjectFactory::with_seed(7).create_set(&deep);
        assert_eq!(factory.frame_build_count(), 2);
        assert_eq!(
            rebuilt[0].hyperframe.center_lines.strut_count(),
            fresh[0].hyperframe.center_lines.strut_count()
        );
        assert_eq!(
            rebuilt[0].hyperframe.curved_lines.strut_count(),
            fresh[0].hyperframe.curved_lines.strut_count()
        );
    }

    #[test]
    fn test_three_dimensional_frames_bypass_the_cache() {
        let mut factory = ObjectFactory::with_seed(7);
        factory.create_set(&config_for(ShapeId::Icosahedron, 3));
        assert_eq!(factory.frame_build_count(), 0);
    }

    #[test]
    fn test_compound_tesseract_carries_a_duplicate_overlay() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::TesseractCompound, 1));
        let unit = &set[0];
        let duplicate = unit.duplicate_solid.as_ref().unwrap();
        assert!(Rc::ptr_eq(&duplicate.material, &unit.solid.material));
        // Inflated past the primary to keep coincident faces apart.
        assert!(duplicate.geometry.max_radius() > unit.solid.geometry.max_radius());
        // The picking geometry still carries both components.
        assert_eq!(
            unit.geometry.vertex_count(),
            2 * unit.solid.geometry.vertex_count()
        );
    }

    #[test]
    fn test_solid_geometry_is_built_once_and_cloned_per_unit() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::TesseractCompound, 3));
        let first = &set[0];
        for unit in &set[1..] {
            assert_eq!(unit.solid.geometry.positions(), first.solid.geometry.positions());
            assert_eq!(
                unit.duplicate_solid.as_ref().unwrap().geometry.positions(),
                first.duplicate_solid.as_ref().unwrap().geometry.positions()
            );
        }
    }

    #[test]
    fn test_simple_shapes_have_no_duplicate_overlay() {
        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Tesseract, 1));
        assert!(set[0].duplicate_solid.is_none());
    }

    #[test]
    fn test_extras_failure_is_swallowed() {
        use crate::extras::{DecorExtras, ExtrasError};

        struct FailingExtras;
        impl DecorExtras for FailingExtras {
            fn attach(&mut self, _unit: &RenderUnit) -> Result<(), ExtrasError> {
                Err(ExtrasError::Attach("decoration exploded".to_string()))
            }
        }

        let mut factory = ObjectFactory::with_seed(7);
        let set = factory.create_set(&config_for(ShapeId::Cube, 1));
        factory.attach_extras(&set[0], &mut FailingExtras);
        assert_eq!(factory.unit_count(), 1);
    }

    #[test]
    fn test_fixed_seed_reproduces_layout() {
        let config = config_for(ShapeId::Octahedron, 3);
        let a = ObjectFactory::with_seed(42).create_set(&config);
        let b = ObjectFactory::with_seed(42).create_set(&config);
        for (left, right) in a.iter().zip(b.iter()) {
            assert_eq!(left.position, right.position);
            assert_eq!(left.seed, right.seed);
        }
    }
}
