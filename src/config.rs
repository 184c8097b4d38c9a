//! Scene configuration and change classification.
//!
//! A [`SceneConfig`] is the full user-editable description of one scene:
//! which shape, how many instances, the material sliders, and the two
//! hyperframe palette colors. Comparing two configs with
//! [`SceneConfig::delta`] tells the factory the cheapest way to honor an
//! edit: recolor materials in place, or tear down and rebuild structure.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use hyperviz_frame::MaterialConfig;
use hyperviz_geom::{ShapeId, ShapeOverrides};
use hyperviz_math::Color;

bitflags! {
    /// What has to happen to move a live scene from one config to another.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RebuildFlags: u32 {
        /// Geometry, wireframe, or hyperframe structure changed; the unit
        /// set must be rebuilt.
        const STRUCTURE = 1 << 0;
        /// Only material parameters changed; shared handles can be updated
        /// in place.
        const MATERIAL = 1 << 1;
    }
}

/// Complete description of one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub shape: ShapeId,
    /// Number of render units placed on the ring. At least 1.
    pub instance_count: u32,
    pub material: MaterialConfig,
    /// Color of the hyperframe's structural (center) lines.
    pub shell_color: Color,
    /// Color of the hyperframe's connector (curved) lines.
    pub connector_color: Color,
    #[serde(default)]
    pub overrides: ShapeOverrides,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeId::Tesseract,
            instance_count: 1,
            material: MaterialConfig::default(),
            shell_color: Color::from_u32(0x66ccff),
            connector_color: Color::from_u32(0xff66cc),
            overrides: ShapeOverrides::default(),
        }
    }
}

impl SceneConfig {
    /// Instance count clamped to the minimum of one unit.
    pub fn unit_count(&self) -> u32 {
        self.instance_count.max(1)
    }

    /// Classifies the changes needed to go from `self` to `next`.
    ///
    /// Shape, count, and structural override changes demand a rebuild.
    /// Material slider and palette changes only touch shared material
    /// handles. An unchanged config reports empty flags.
    pub fn delta(&self, next: &Self) -> RebuildFlags {
        let mut flags = RebuildFlags::empty();
        if self.shape != next.shape
            || self.unit_count() != next.unit_count()
            || self.overrides != next.overrides
        {
            flags |= RebuildFlags::STRUCTURE;
        }
        if self.material != next.material
            || self.shell_color != next.shell_color
            || self.connector_color != next.connector_color
        {
            flags |= RebuildFlags::MATERIAL;
        }
        flags
    }
}
