pub mod noise;
pub mod terrain;
pub mod volume;

pub use noise::{LayeredNoise, NoiseField2d, UniformField};
pub use terrain::TerrainGenerator;
pub use volume::VoxelVolume;
