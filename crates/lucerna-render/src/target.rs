use std::sync::atomic::{AtomicU64, Ordering};

/// Color attachment format for all offscreen targets.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth attachment format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a render target, stable across resizes. Plays the role a
/// framebuffer object name plays in GL: attachments come and go, the
/// target stays the same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

/// Offscreen render target: one color texture and one depth texture,
/// matched in size by construction.
///
/// `resize` replaces both attachments and discards their contents; the
/// target identity and the struct itself survive. Allocation failure is
/// fatal and surfaces through the device's uncaptured-error handler.
pub struct RenderTarget {
    id: TargetId,
    width: u32,
    height: u32,
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl RenderTarget {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (color, color_view) = create_color(device, width, height);
        let (depth, depth_view) = create_depth(device, width, height);
        Self {
            id: TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed)),
            width,
            height,
            color,
            color_view,
            depth,
            depth_view,
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Size of the color attachment as reported by the GPU resource, not
    /// the cached fields. Used by tests to verify resize really replaced
    /// the attachments.
    pub fn attachment_extent(&self) -> (u32, u32) {
        let size = self.color.size();
        (size.width, size.height)
    }

    pub fn depth_extent(&self) -> (u32, u32) {
        let size = self.depth.size();
        (size.width, size.height)
    }

    /// Replace both attachments with freshly allocated ones of the new
    /// size. Previously rendered content is gone after this returns.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (color, color_view) = create_color(device, width, height);
        let (depth, depth_view) = create_depth(device, width, height);
        self.color = color;
        self.color_view = color_view;
        self.depth = depth;
        self.depth_view = depth_view;
        self.width = width;
        self.height = height;
    }
}

fn create_color(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("target-color"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_depth(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("target-depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
