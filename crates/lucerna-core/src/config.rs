use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FAR, DEFAULT_FOV_Y_DEG, DEFAULT_NEAR, DEFAULT_VIEWPORT};
use crate::error::LucernaError;

/// Layered-noise parameters for terrain heightmap synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    pub octaves: u32,
    pub frequency_x: f32,
    pub frequency_z: f32,
    pub persistence: f32,
    pub offset_x: i32,
    pub offset_z: i32,
}

/// Which procedural scene a config builds its volume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeKind {
    /// Heightmap terrain from layered noise.
    Terrain,
    /// Hollow glass shell with an emissive core voxel.
    GlassCube,
    /// Emissive box shell around a central glass voxel.
    RefractionBox,
}

/// Built-in scene presets. These replace the original build-time scene
/// switches with runtime data; custom configs load from RON instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    /// 128³ terrain at full viewport resolution.
    Terrain,
    /// 32³ terrain traced at a fixed 400×400 offscreen resolution.
    HighPerformance,
    GlassCube,
    Refraction,
}

/// Everything needed to set up a scene: volume synthesis parameters,
/// offscreen target dimensions, atlas geometry, starting camera pose and
/// the day-cycle period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub volume_kind: VolumeKind,
    pub volume_size: u32,
    pub noise: NoiseParams,
    /// Window dimensions the presets assume.
    pub viewport: (u32, u32),
    /// When set, trace/filter targets stay at this fixed size instead of
    /// tracking the viewport (the original's high-performance mode).
    pub fixed_target_size: Option<(u32, u32)>,
    /// Atlas edge length in pixels.
    pub atlas_size: u32,
    /// Per-tile edge length in pixels.
    pub atlas_tile_size: u32,
    pub camera_position: [f32; 3],
    /// (yaw, pitch) in degrees.
    pub camera_rotation: [f32; 2],
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Full day length in seconds.
    pub day_length: f32,
}

impl SceneConfig {
    pub fn preset(preset: ScenePreset) -> Self {
        let base = Self {
            name: "terrain".into(),
            volume_kind: VolumeKind::Terrain,
            volume_size: 128,
            noise: NoiseParams {
                octaves: 5,
                frequency_x: 10.0,
                frequency_z: 10.0,
                persistence: 0.125,
                offset_x: 0,
                offset_z: 0,
            },
            viewport: DEFAULT_VIEWPORT,
            fixed_target_size: None,
            atlas_size: 256,
            atlas_tile_size: 128,
            camera_position: [-3.45, 2.17, 3.53],
            camera_rotation: [-48.0, -33.0],
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            day_length: 50.0,
        };
        match preset {
            ScenePreset::Terrain => base,
            ScenePreset::HighPerformance => Self {
                name: "high-performance".into(),
                volume_size: 32,
                noise: NoiseParams {
                    persistence: 0.5,
                    ..base.noise
                },
                fixed_target_size: Some((400, 400)),
                atlas_size: 32,
                atlas_tile_size: 16,
                ..base
            },
            ScenePreset::GlassCube => Self {
                name: "glass-cube".into(),
                volume_kind: VolumeKind::GlassCube,
                volume_size: 32,
                ..base
            },
            ScenePreset::Refraction => Self {
                name: "refraction".into(),
                volume_kind: VolumeKind::RefractionBox,
                volume_size: 32,
                ..base
            },
        }
    }

    /// Look up a built-in preset by its config name.
    pub fn preset_by_name(name: &str) -> Option<Self> {
        let preset = match name {
            "terrain" => ScenePreset::Terrain,
            "high-performance" => ScenePreset::HighPerformance,
            "glass-cube" => ScenePreset::GlassCube,
            "refraction" => ScenePreset::Refraction,
            _ => return None,
        };
        Some(Self::preset(preset))
    }

    /// Parse a scene config from RON text.
    pub fn from_ron(text: &str) -> Result<Self, LucernaError> {
        let options = ron::Options::default();
        options
            .from_str(text)
            .map_err(|e| LucernaError::ConfigParseFailed(e.to_string()))
    }

    /// Dimensions of the offscreen trace/filter targets for a given
    /// viewport size.
    pub fn target_size(&self, viewport_w: u32, viewport_h: u32) -> (u32, u32) {
        self.fixed_target_size.unwrap_or((viewport_w, viewport_h))
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup_by_name() {
        for name in ["terrain", "high-performance", "glass-cube", "refraction"] {
            let config = SceneConfig::preset_by_name(name).expect(name);
            assert_eq!(config.name, name);
        }
        assert!(SceneConfig::preset_by_name("nope").is_none());
    }

    #[test]
    fn test_high_performance_pins_target_size() {
        let config = SceneConfig::preset(ScenePreset::HighPerformance);
        assert_eq!(config.target_size(1920, 1080), (400, 400));

        let config = SceneConfig::preset(ScenePreset::Terrain);
        assert_eq!(config.target_size(1920, 1080), (1920, 1080));
    }

    #[test]
    fn test_preset_round_trips_through_ron() {
        let config = SceneConfig::preset(ScenePreset::Terrain);
        let text = ron::to_string(&config).unwrap();
        let parsed = SceneConfig::from_ron(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_bad_ron_is_a_config_error() {
        let err = SceneConfig::from_ron("(name: oops").unwrap_err();
        assert!(matches!(err, LucernaError::ConfigParseFailed(_)));
    }
}
