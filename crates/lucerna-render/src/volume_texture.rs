use lucerna_world::VoxelVolume;

/// The voxel grid uploaded as a single-channel 3D texture. Material codes
/// are read in the trace shader with `textureLoad`, so there is no
/// sampler and no filtering to configure — integer textures are fetched
/// at exact cells, which is precisely what voxel marching wants.
pub struct VolumeTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: u32,
}

impl VolumeTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Uint;

    /// Allocate the N³ texture and upload the volume's bytes.
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, volume: &VoxelVolume) -> Self {
        let size = volume.size();
        let extent = wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: size,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("voxel-volume"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            volume.bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size),
                rows_per_image: Some(size),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}
