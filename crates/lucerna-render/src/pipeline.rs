use glam::Vec3;
use lucerna_core::camera::Camera;
use lucerna_core::config::SceneConfig;
use lucerna_core::constants::{MAT_AIR, MAT_EMISSIVE, MAT_GLASS};
use lucerna_world::VoxelVolume;

use crate::atlas::MaterialAtlas;
use crate::gpu::GraphicsContext;
use crate::target::{RenderTarget, COLOR_FORMAT, DEPTH_FORMAT};
use crate::temporal::TemporalState;
use crate::timing::PassTimer;
use crate::volume_texture::VolumeTexture;

/// World-space extent of the voxel volume along each axis.
const VOLUME_WORLD_MIN: f32 = -2.0;
const VOLUME_WORLD_MAX: f32 = 2.0;

/// GPU-uploadable trace uniforms. Must match TraceUniforms in
/// voxel_trace.wgsl.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct TraceUniforms {
    inv_proj_view: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    sun_dir: [f32; 4],
    jitter: [f32; 4],
    volume_size: i32,
    atlas_grid_size: i32,
    atlas_tile_size: i32,
    _pad: i32,
}

/// GPU-uploadable filter uniforms. Must match FilterUniforms in
/// temporal_blend.wgsl.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FilterUniforms {
    blend_strength: f32,
    sample_count: u32,
    _pad: [u32; 2],
}

/// Per-ray jitter amplitudes fed to the trace shader. All default to
/// zero; the temporal filter averages whatever noise they introduce.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RayJitter {
    pub primary: f32,
    pub reflection: f32,
    pub refraction: f32,
}

/// The three-pass frame pipeline: trace into `raw`, temporally blend
/// into `current`, present `current`, then rotate roles.
///
/// Owns the camera, all three offscreen targets, the temporal state and
/// its own diagnostics — there is no shared mutable state outside this
/// struct.
pub struct RenderPipeline {
    config: SceneConfig,
    camera: Camera,
    pub jitter: RayJitter,
    pub blend_strength: f32,

    targets: [RenderTarget; 3],
    temporal: TemporalState,
    timer: Option<PassTimer>,
    volume: VolumeTexture,
    atlas_grid_size: u32,
    atlas_tile_size: u32,
    frame_index: u64,

    trace_pipeline: wgpu::RenderPipeline,
    filter_pipeline: wgpu::RenderPipeline,
    present_pipeline: wgpu::RenderPipeline,

    trace_uniform_buffer: wgpu::Buffer,
    filter_uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,

    trace_bind_group: wgpu::BindGroup,
    filter_bgl: wgpu::BindGroupLayout,
    present_bgl: wgpu::BindGroupLayout,
    /// Filter inputs for every ordered (raw, last) slot pair, prebuilt so
    /// role swaps cost nothing per frame.
    filter_bind_groups: [[Option<wgpu::BindGroup>; 3]; 3],
    /// Present input per slot.
    present_bind_groups: [Option<wgpu::BindGroup>; 3],
}

impl RenderPipeline {
    /// Build all GPU resources up front. `output_format` is the format of
    /// the view later passed to `render` (typically the surface format).
    pub fn new(
        gpu: &GraphicsContext,
        config: SceneConfig,
        atlas: &dyn MaterialAtlas,
        volume: &VoxelVolume,
        output_format: wgpu::TextureFormat,
    ) -> Self {
        let device = &gpu.device;
        let (width, height) = config.target_size(config.viewport.0, config.viewport.1);

        let mut camera = Camera::new(config.aspect(), config.fov_y_deg, config.near, config.far);
        camera.set_position(Vec3::from(config.camera_position));
        camera.set_rotation(config.camera_rotation[0], config.camera_rotation[1]);

        let volume = VolumeTexture::upload(device, &gpu.queue, volume);

        // Missing tiles degrade to untextured shading; a cosmetic failure
        // is not worth crashing over.
        for name in ["stone", "dirt", "glass", "grass"] {
            if atlas.lookup(name).is_none() {
                log::error!("atlas tile '{name}' missing; material renders untextured");
            }
        }

        // -- Shader modules, with shared constants injected --
        let preamble = format!(
            "const MAT_AIR: u32 = {MAT_AIR}u;\n\
             const MAT_GLASS: u32 = {MAT_GLASS}u;\n\
             const MAT_EMISSIVE: u32 = {MAT_EMISSIVE}u;\n\
             const VOLUME_WORLD_MIN: f32 = {VOLUME_WORLD_MIN:?};\n\
             const VOLUME_WORLD_MAX: f32 = {VOLUME_WORLD_MAX:?};\n"
        );
        let trace_wgsl = include_str!("../../../shaders/render/voxel_trace.wgsl");
        let trace_source = format!("{preamble}\n{trace_wgsl}");

        let trace_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("voxel-trace-shader"),
            source: wgpu::ShaderSource::Wgsl(trace_source.into()),
        });
        let filter_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("temporal-blend-shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../shaders/render/temporal_blend.wgsl").into(),
            ),
        });
        let present_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("present-shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../shaders/render/present.wgsl").into(),
            ),
        });

        // -- Uniform buffers --
        let trace_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace-uniforms"),
            size: std::mem::size_of::<TraceUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let filter_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("filter-uniforms"),
            size: std::mem::size_of::<FilterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pass-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // -- Bind group layouts --
        let trace_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trace-bgl"),
            entries: &[
                uniform_entry(0),
                texture_entry(1, wgpu::TextureSampleType::Float { filterable: true }),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Uint,
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let filter_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("filter-bgl"),
            entries: &[
                uniform_entry(0),
                texture_entry(1, wgpu::TextureSampleType::Float { filterable: true }),
                texture_entry(2, wgpu::TextureSampleType::Float { filterable: true }),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let present_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("present-bgl"),
            entries: &[
                texture_entry(0, wgpu::TextureSampleType::Float { filterable: true }),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let trace_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trace-bg"),
            layout: &trace_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: trace_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas.texture_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(volume.view()),
                },
            ],
        });

        // -- Pipelines --
        let trace_pipeline = fullscreen_pipeline(
            device,
            "trace-pipeline",
            &trace_module,
            &trace_bgl,
            COLOR_FORMAT,
            true,
        );
        let filter_pipeline = fullscreen_pipeline(
            device,
            "filter-pipeline",
            &filter_module,
            &filter_bgl,
            COLOR_FORMAT,
            false,
        );
        let present_pipeline = fullscreen_pipeline(
            device,
            "present-pipeline",
            &present_module,
            &present_bgl,
            output_format,
            false,
        );

        let targets = [
            RenderTarget::new(device, width, height),
            RenderTarget::new(device, width, height),
            RenderTarget::new(device, width, height),
        ];

        let timer = gpu.timestamps_supported.then(|| PassTimer::new(device));

        let mut pipeline = Self {
            config,
            camera,
            jitter: RayJitter::default(),
            blend_strength: 1.0,
            targets,
            temporal: TemporalState::new(),
            timer,
            volume,
            atlas_grid_size: atlas.grid_size(),
            atlas_tile_size: atlas.tile_size(),
            frame_index: 0,
            trace_pipeline,
            filter_pipeline,
            present_pipeline,
            trace_uniform_buffer,
            filter_uniform_buffer,
            sampler,
            trace_bind_group,
            filter_bgl,
            present_bgl,
            filter_bind_groups: Default::default(),
            present_bind_groups: Default::default(),
        };
        pipeline.rebuild_target_bind_groups(device);
        pipeline
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn sample_count(&self) -> u32 {
        self.temporal.sample_count()
    }

    pub fn temporal(&self) -> &TemporalState {
        &self.temporal
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Approximate FPS from the last measured trace pass, if the adapter
    /// supports timing.
    pub fn fps(&self) -> Option<f32> {
        self.timer.as_ref().and_then(PassTimer::fps)
    }

    pub fn trace_ms(&self) -> Option<f32> {
        self.timer.as_ref().and_then(PassTimer::last_ms)
    }

    /// Dimensions of the offscreen targets.
    pub fn target_size(&self) -> (u32, u32) {
        (self.targets[0].width(), self.targets[0].height())
    }

    /// Discard accumulated history. The old history slot is handed to the
    /// tracer for overwrite; nothing is cleared.
    pub fn reset_accumulation(&mut self) {
        log::info!("accumulation reset");
        self.temporal.invalidate();
    }

    /// Teleport the camera back to the scene's starting pose. A camera
    /// cut invalidates the history with it.
    pub fn reset_camera(&mut self) {
        self.camera
            .set_position(Vec3::from(self.config.camera_position));
        self.camera.set_rotation(
            self.config.camera_rotation[0],
            self.config.camera_rotation[1],
        );
        self.reset_accumulation();
    }

    /// Handle a viewport resize: every target is resized, the camera
    /// aspect follows, and the (now differently-sized) history is
    /// invalidated. Takes `&mut self`, so it cannot interleave with an
    /// in-flight `render`.
    pub fn resize(&mut self, gpu: &GraphicsContext, width: u32, height: u32) {
        let (tw, th) = self.config.target_size(width, height);
        for target in &mut self.targets {
            target.resize(&gpu.device, tw, th);
        }
        self.rebuild_target_bind_groups(&gpu.device);
        self.camera.set_projection(
            width as f32 / height as f32,
            self.config.fov_y_deg,
            self.config.near,
            self.config.far,
        );
        self.temporal.invalidate();
        log::debug!("pipeline resized to {width}x{height} (targets {tw}x{th})");
    }

    /// Render one frame into `output_view` and rotate the temporal roles.
    pub fn render(
        &mut self,
        gpu: &GraphicsContext,
        output_view: &wgpu::TextureView,
        sun_direction: Vec3,
    ) {
        let queue = &gpu.queue;

        let trace_uniforms = TraceUniforms {
            inv_proj_view: self.camera.inverse_projection_view().to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
            sun_dir: sun_direction.normalize_or_zero().extend(0.0).to_array(),
            jitter: [
                self.jitter.primary,
                self.jitter.reflection,
                self.jitter.refraction,
                self.frame_index as f32,
            ],
            volume_size: self.volume.size() as i32,
            atlas_grid_size: self.atlas_grid_size as i32,
            atlas_tile_size: self.atlas_tile_size as i32,
            _pad: 0,
        };
        queue.write_buffer(
            &self.trace_uniform_buffer,
            0,
            bytemuck::bytes_of(&trace_uniforms),
        );

        let filter_uniforms = FilterUniforms {
            blend_strength: self.blend_strength,
            sample_count: self.temporal.sample_count(),
            _pad: [0; 2],
        };
        queue.write_buffer(
            &self.filter_uniform_buffer,
            0,
            bytemuck::bytes_of(&filter_uniforms),
        );

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        // 1. Trace into the raw target, timestamped.
        {
            let raw = &self.targets[self.temporal.raw()];
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trace-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: raw.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: raw.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: self.timer.as_ref().map(PassTimer::timestamp_writes),
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.trace_pipeline);
            pass.set_bind_group(0, &self.trace_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        if let Some(timer) = &self.timer {
            timer.resolve(&mut encoder);
        }

        // 2. Blend raw with history into the current target.
        {
            let current = &self.targets[self.temporal.current()];
            let bind_group = self.filter_bind_groups[self.temporal.raw()][self.temporal.last()]
                .as_ref()
                .expect("filter bind group for role pair");
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("filter-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: current.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.filter_pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        // 3. Present the filtered frame.
        {
            let bind_group = self.present_bind_groups[self.temporal.current()]
                .as_ref()
                .expect("present bind group for current slot");
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.present_pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));

        if let Some(timer) = &mut self.timer {
            timer.read(&gpu.device, queue);
        }

        // 4. This frame's filtered output becomes next frame's history.
        self.temporal.advance();
        self.frame_index += 1;
    }

    /// Rebuild every bind group that references a target's color texture.
    /// Needed at creation and after resize, when the views are replaced.
    fn rebuild_target_bind_groups(&mut self, device: &wgpu::Device) {
        for raw in 0..3 {
            for last in 0..3 {
                if raw == last {
                    self.filter_bind_groups[raw][last] = None;
                    continue;
                }
                self.filter_bind_groups[raw][last] =
                    Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("filter-bg"),
                        layout: &self.filter_bgl,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: self.filter_uniform_buffer.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::TextureView(
                                    self.targets[raw].color_view(),
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 2,
                                resource: wgpu::BindingResource::TextureView(
                                    self.targets[last].color_view(),
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 3,
                                resource: wgpu::BindingResource::Sampler(&self.sampler),
                            },
                        ],
                    }));
            }
        }
        for slot in 0..3 {
            self.present_bind_groups[slot] =
                Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("present-bg"),
                    layout: &self.present_bgl,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                self.targets[slot].color_view(),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                }));
        }
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32, sample_type: wgpu::TextureSampleType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type,
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    module: &wgpu::ShaderModule,
    bgl: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    with_depth: bool,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: with_depth.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AtlasTile, MaterialAtlas};
    use lucerna_core::config::ScenePreset;
    use lucerna_world::terrain::build_scene_volume;

    fn context() -> Option<GraphicsContext> {
        let _ = env_logger::builder().is_test(true).try_init();
        match GraphicsContext::new() {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                eprintln!("skipping GPU test: {e}");
                None
            }
        }
    }

    /// Solid-white 2×2-tile atlas standing in for the application layer's
    /// packed texture.
    struct TestAtlas {
        view: wgpu::TextureView,
    }

    impl TestAtlas {
        fn new(gpu: &GraphicsContext) -> Self {
            let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("test-atlas"),
                size: wgpu::Extent3d {
                    width: 32,
                    height: 32,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            gpu.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &[255u8; 32 * 32 * 4],
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(32 * 4),
                    rows_per_image: Some(32),
                },
                wgpu::Extent3d {
                    width: 32,
                    height: 32,
                    depth_or_array_layers: 1,
                },
            );
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            Self { view }
        }
    }

    impl MaterialAtlas for TestAtlas {
        fn texture_view(&self) -> &wgpu::TextureView {
            &self.view
        }
        fn grid_size(&self) -> u32 {
            32
        }
        fn tile_size(&self) -> u32 {
            16
        }
        fn lookup(&self, name: &str) -> Option<AtlasTile> {
            match name {
                "stone" => Some(AtlasTile { col: 0, row: 0 }),
                "dirt" => Some(AtlasTile { col: 1, row: 0 }),
                "glass" => Some(AtlasTile { col: 0, row: 1 }),
                "grass" => Some(AtlasTile { col: 1, row: 1 }),
                _ => None,
            }
        }
    }

    fn output_view(gpu: &GraphicsContext, width: u32, height: u32) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test-output"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn glass_cube_pipeline(gpu: &GraphicsContext) -> RenderPipeline {
        let config = SceneConfig::preset(ScenePreset::GlassCube);
        let volume = build_scene_volume(&config, 1);
        let atlas = TestAtlas::new(gpu);
        RenderPipeline::new(gpu, config, &atlas, &volume, COLOR_FORMAT)
    }

    #[test]
    fn test_frames_advance_sample_count() {
        let Some(gpu) = context() else { return };
        let mut pipeline = glass_cube_pipeline(&gpu);
        let output = output_view(&gpu, 1440, 810);
        let sun = Vec3::new(0.3, 0.8, 0.2);

        assert_eq!(pipeline.sample_count(), 1);
        for expected in 1..=3u32 {
            assert_eq!(pipeline.sample_count(), expected);
            pipeline.render(&gpu, &output, sun);
        }
        assert_eq!(pipeline.sample_count(), 4);
        assert_eq!(pipeline.frame_index(), 3);
    }

    #[test]
    fn test_reset_accumulation_restarts_counting() {
        let Some(gpu) = context() else { return };
        let mut pipeline = glass_cube_pipeline(&gpu);
        let output = output_view(&gpu, 1440, 810);
        let sun = Vec3::Y;

        for _ in 0..5 {
            pipeline.render(&gpu, &output, sun);
        }
        pipeline.reset_accumulation();
        assert_eq!(pipeline.sample_count(), 1);
        // The next frame must render cleanly with the swapped roles.
        pipeline.render(&gpu, &output, sun);
        assert_eq!(pipeline.sample_count(), 2);
    }

    #[test]
    fn test_resize_retargets_and_invalidates() {
        let Some(gpu) = context() else { return };
        let mut pipeline = glass_cube_pipeline(&gpu);
        let output = output_view(&gpu, 1440, 810);
        pipeline.render(&gpu, &output, Vec3::Y);
        pipeline.render(&gpu, &output, Vec3::Y);

        pipeline.resize(&gpu, 800, 600);
        assert_eq!(pipeline.target_size(), (800, 600));
        assert_eq!(pipeline.sample_count(), 1);
        let aspect = pipeline.camera().aspect();
        assert!((aspect - 800.0 / 600.0).abs() < 1e-6);

        let small_output = output_view(&gpu, 800, 600);
        pipeline.render(&gpu, &small_output, Vec3::Y);
    }

    #[test]
    fn test_reset_camera_restores_start_pose() {
        let Some(gpu) = context() else { return };
        let mut pipeline = glass_cube_pipeline(&gpu);
        pipeline.camera_mut().set_position(Vec3::splat(9.0));
        pipeline.camera_mut().set_rotation(10.0, 20.0);
        pipeline.reset_camera();
        assert_eq!(
            pipeline.camera().position(),
            Vec3::new(-3.45, 2.17, 3.53)
        );
        assert_eq!(pipeline.camera().yaw(), -48.0);
        assert_eq!(pipeline.sample_count(), 1);
    }
}
