use lucerna_core::config::NoiseParams;

/// 2D scalar field sampled over the heightmap grid. Output is in [0, 1].
///
/// Terrain generation only depends on this seam, so tests can substitute
/// an analytic field for the production noise.
pub trait NoiseField2d {
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// Constant field. Useful for flat test terrains.
#[derive(Debug, Clone, Copy)]
pub struct UniformField(pub f32);

impl NoiseField2d for UniformField {
    fn sample(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

/// Multi-octave coherent value noise.
///
/// Octave 0 samples the lattice at `frequency_*` cells per feature;
/// each successive octave doubles the frequency and scales amplitude by
/// `persistence`. The sum is normalized by total amplitude so the output
/// stays in [0, 1] for any parameter set. Output is bit-identical across
/// runs for identical parameters and seed.
pub struct LayeredNoise {
    params: NoiseParams,
    /// Permutation table for lattice hashing (doubled for wrapping).
    perm: [u8; 512],
}

impl LayeredNoise {
    pub fn new(params: NoiseParams, seed: u64) -> Self {
        Self {
            params,
            perm: build_permutation(seed),
        }
    }

    /// Lattice value in [0, 1] for integer coordinates, folded with the
    /// octave index so octaves decorrelate.
    fn lattice(&self, ix: i32, iz: i32, octave: u32) -> f32 {
        let a = self.perm[(ix & 255) as usize] as usize;
        let b = self.perm[((iz & 255) as usize + a) & 511] as usize;
        let v = self.perm[(b + octave as usize) & 511];
        v as f32 / 255.0
    }

    /// Bilinear lattice interpolation with smoothstep fade.
    fn smooth(&self, x: f32, z: f32, octave: u32) -> f32 {
        let ix = x.floor() as i32;
        let iz = z.floor() as i32;
        let fx = fade(x - ix as f32);
        let fz = fade(z - iz as f32);

        let v00 = self.lattice(ix, iz, octave);
        let v10 = self.lattice(ix + 1, iz, octave);
        let v01 = self.lattice(ix, iz + 1, octave);
        let v11 = self.lattice(ix + 1, iz + 1, octave);

        let top = v00 + (v10 - v00) * fx;
        let bottom = v01 + (v11 - v01) * fx;
        top + (bottom - top) * fz
    }
}

impl NoiseField2d for LayeredNoise {
    fn sample(&self, x: f32, z: f32) -> f32 {
        let p = &self.params;
        let mut value = 0.0;
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut feature_x = p.frequency_x.max(f32::EPSILON);
        let mut feature_z = p.frequency_z.max(f32::EPSILON);

        for octave in 0..p.octaves.max(1) {
            let sx = (x + p.offset_x as f32) / feature_x;
            let sz = (z + p.offset_z as f32) / feature_z;
            value += amplitude * self.smooth(sx, sz, octave);
            total += amplitude;
            amplitude *= p.persistence;
            // Doubling the frequency halves the feature size.
            feature_x *= 0.5;
            feature_z *= 0.5;
        }

        value / total
    }
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn build_permutation(seed: u64) -> [u8; 512] {
    let mut p: [u8; 256] = [0; 256];
    for (i, val) in p.iter_mut().enumerate() {
        *val = i as u8;
    }

    // Fisher-Yates shuffle with seed
    let mut rng = seed;
    for i in (1..256).rev() {
        rng = rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (rng >> 33) as usize % (i + 1);
        p.swap(i, j);
    }

    let mut perm = [0u8; 512];
    for (i, val) in perm.iter_mut().enumerate() {
        *val = p[i & 255];
    }
    perm
}
