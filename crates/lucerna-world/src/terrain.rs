use lucerna_core::config::{SceneConfig, VolumeKind};
use lucerna_core::constants::{MAT_EMISSIVE, MAT_GLASS, MAT_STONE};

use crate::noise::{LayeredNoise, NoiseField2d};
use crate::volume::VoxelVolume;

/// Heightmap terrain generator.
///
/// Each (x, z) column is filled with stone up to `noise * size` and
/// capped with a single emissive surface voxel. Edge columns optionally
/// get deterministic seam decoration: glass walls on two sides of small
/// volumes and an emissive back wall, hiding the hard cut where the
/// heightmap stops.
pub struct TerrainGenerator {
    /// Seam decoration is a visual tunable, not part of the terrain
    /// contract; flat test terrains can switch it off.
    pub decorate_seams: bool,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self {
            decorate_seams: true,
        }
    }
}

impl TerrainGenerator {
    pub fn generate(&self, size: u32, noise: &dyn NoiseField2d) -> VoxelVolume {
        let mut volume = VoxelVolume::new(size);

        for z in 0..size {
            for x in 0..size {
                let surface = surface_row(noise, x, z, size);
                for y in 0..surface {
                    volume.set(x, y, z, MAT_STONE);
                }
                volume.set(x, surface, z, MAT_EMISSIVE);
            }
        }

        if self.decorate_seams && size >= 8 {
            self.decorate(&mut volume, size, noise);
        }

        volume
    }

    fn decorate(&self, volume: &mut VoxelVolume, size: u32, noise: &dyn NoiseField2d) {
        // Glass side walls only on small volumes, where the open edges
        // would otherwise dominate the frame.
        if size <= 64 {
            for z in 2..size - 2 {
                let from = surface_row(noise, 0, z, size) + 1;
                for y in from..size {
                    volume.set(0, y, z, MAT_GLASS);
                }
            }
            for x in 2..size - 1 {
                let from = surface_row(noise, x, size - 4, size) + 1;
                for y in from..size.saturating_sub(4) {
                    volume.set(x, y, size - 4, MAT_GLASS);
                }
            }
        }

        // Emissive back wall on every size.
        for z in 2..size - 2 {
            let from = surface_row(noise, size - 1, z, size) + 1;
            for y in from..size.saturating_sub(4) {
                volume.set(size - 1, y, z, MAT_EMISSIVE);
            }
        }
    }
}

/// Row index of the surface voxel for a column, clamped into the grid.
fn surface_row(noise: &dyn NoiseField2d, x: u32, z: u32, size: u32) -> u32 {
    let h = (noise.sample(x as f32, z as f32) * size as f32) as u32;
    h.min(size - 1)
}

/// Build the volume a scene config describes. Terrain scenes synthesize
/// their heightmap from the config's noise parameters and the given seed;
/// the fixed scenes ignore both.
pub fn build_scene_volume(config: &SceneConfig, seed: u64) -> VoxelVolume {
    log::info!(
        "Building {:?} volume, size {}",
        config.volume_kind,
        config.volume_size
    );
    match config.volume_kind {
        VolumeKind::Terrain => {
            let noise = LayeredNoise::new(config.noise, seed);
            TerrainGenerator::default().generate(config.volume_size, &noise)
        }
        VolumeKind::GlassCube => VoxelVolume::glass_cube(config.volume_size),
        VolumeKind::RefractionBox => VoxelVolume::refraction_box(config.volume_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::UniformField;
    use lucerna_core::config::ScenePreset;
    use lucerna_core::constants::MAT_AIR;

    #[test]
    fn test_flat_half_noise_fills_half_of_every_column() {
        let generator = TerrainGenerator {
            decorate_seams: false,
        };
        let volume = generator.generate(8, &UniformField(0.5));

        for z in 0..8 {
            for x in 0..8 {
                for y in 0..4 {
                    assert_eq!(volume.get(x, y, z), MAT_STONE, "({x},{y},{z})");
                }
                assert_eq!(volume.get(x, 4, z), MAT_EMISSIVE, "surface ({x},{z})");
                for y in 5..8 {
                    assert_eq!(volume.get(x, y, z), MAT_AIR, "({x},{y},{z})");
                }
            }
        }
    }

    #[test]
    fn test_generation_is_bit_identical() {
        let params = SceneConfig::preset_by_name("high-performance")
            .unwrap()
            .noise;
        let generator = TerrainGenerator::default();
        let a = generator.generate(32, &LayeredNoise::new(params, 1));
        let b = generator.generate(32, &LayeredNoise::new(params, 1));
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn test_full_height_noise_stays_in_bounds() {
        // noise == 1.0 would index one past the column without clamping.
        let generator = TerrainGenerator {
            decorate_seams: false,
        };
        let volume = generator.generate(8, &UniformField(1.0));
        for z in 0..8 {
            for x in 0..8 {
                assert_eq!(volume.get(x, 7, z), MAT_EMISSIVE);
            }
        }
    }

    #[test]
    fn test_seam_decoration_adds_glass_on_small_volumes() {
        let generator = TerrainGenerator::default();
        let volume = generator.generate(32, &UniformField(0.25));
        // The x=0 wall above the terrain surface is glass.
        assert_eq!(volume.get(0, 20, 10), MAT_GLASS);
        // The far wall is emissive below the cap line.
        assert_eq!(volume.get(31, 20, 10), MAT_EMISSIVE);
    }

    #[test]
    fn test_build_scene_volume_matches_kind() {
        let config = SceneConfig::preset(ScenePreset::GlassCube);
        let volume = build_scene_volume(&config, 0);
        assert_eq!(volume.size(), config.volume_size);
        let mid = config.volume_size / 2;
        assert_eq!(volume.get(mid, mid, mid), MAT_EMISSIVE);
    }
}
