use lucerna_core::constants::{MAT_AIR, MAT_EMISSIVE, MAT_GLASS};

/// Cubic grid of 8-bit material codes, laid out `x + y*size + z*size²`
/// to match the 3D texture upload order.
///
/// Dimensions are immutable after construction; a different size means a
/// new volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelVolume {
    size: u32,
    data: Vec<u8>,
}

impl VoxelVolume {
    /// An all-air volume of side length `size`.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            data: vec![MAT_AIR; (size * size * size) as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw material codes in upload order.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32, z: u32) -> u8 {
        self.data[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: u32, y: u32, z: u32, material: u8) {
        let idx = self.index(x, y, z);
        self.data[idx] = material;
    }

    fn index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.size && y < self.size && z < self.size);
        (x + y * self.size + z * self.size * self.size) as usize
    }

    /// Hollow glass shell over all six faces with a single emissive voxel
    /// at the center.
    pub fn glass_cube(size: u32) -> Self {
        let mut volume = Self::new(size);
        let last = size - 1;
        for a in 0..size {
            for b in 0..size {
                volume.set(0, a, b, MAT_GLASS);
                volume.set(last, a, b, MAT_GLASS);
                volume.set(a, 0, b, MAT_GLASS);
                volume.set(a, last, b, MAT_GLASS);
                volume.set(a, b, 0, MAT_GLASS);
                volume.set(a, b, last, MAT_GLASS);
            }
        }
        let mid = size / 2;
        volume.set(mid, mid, mid, MAT_EMISSIVE);
        volume
    }

    /// Emissive patches on all six faces (covering the middle half of each
    /// face) around a single glass voxel at the center, so refracted light
    /// has bright surroundings to bend.
    pub fn refraction_box(size: u32) -> Self {
        let mut volume = Self::new(size);
        let last = size - 1;
        let lo = size / 4;
        let hi = 3 * size / 4;
        for a in lo..hi {
            for b in lo..hi {
                volume.set(0, a, b, MAT_EMISSIVE);
                volume.set(last, a, b, MAT_EMISSIVE);
                volume.set(a, 0, b, MAT_EMISSIVE);
                volume.set(a, last, b, MAT_EMISSIVE);
                volume.set(a, b, 0, MAT_EMISSIVE);
                volume.set(a, b, last, MAT_EMISSIVE);
            }
        }
        let mid = size / 2;
        volume.set(mid, mid, mid, MAT_GLASS);
        volume
    }
}
