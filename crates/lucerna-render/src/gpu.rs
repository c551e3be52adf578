use lucerna_core::error::LucernaError;
use wgpu::{
    Adapter, Device, DeviceDescriptor, Instance, InstanceDescriptor, PowerPreference, Queue,
    RequestAdapterOptions,
};

/// Holds the GPU resources every render component binds against. wgpu has
/// no implicit global context, so passing this explicitly is the whole
/// bind-state discipline: a render pass borrows what it needs and nothing
/// outlives the pass.
pub struct GraphicsContext {
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
    /// False when the adapter cannot time passes; the pipeline then
    /// reports no FPS figure instead of failing.
    pub timestamps_supported: bool,
}

impl GraphicsContext {
    /// Initialize a headless native context. Blocks on the async adapter
    /// and device requests.
    pub fn new() -> Result<Self, LucernaError> {
        let instance = Instance::new(&InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| LucernaError::AdapterNotFound("no suitable GPU adapter".into()))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Adapter: {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let timestamps_supported = adapter
            .features()
            .contains(wgpu::Features::TIMESTAMP_QUERY);
        if !timestamps_supported {
            log::warn!("adapter lacks TIMESTAMP_QUERY; pass timing disabled");
        }
        let required_features = if timestamps_supported {
            wgpu::Features::TIMESTAMP_QUERY
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(
            &DeviceDescriptor {
                label: Some("lucerna-device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| LucernaError::DeviceRequestFailed(format!("{e}")))?;

        // Resource allocation failure has no recovery path: surface it
        // loudly and abort instead of limping on with a broken context.
        device.on_uncaptured_error(Box::new(|error| {
            panic!("fatal GPU error: {error}");
        }));

        Ok(Self {
            adapter,
            device,
            queue,
            timestamps_supported,
        })
    }
}
