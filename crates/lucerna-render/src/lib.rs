pub mod atlas;
pub mod gpu;
pub mod pipeline;
pub mod target;
pub mod temporal;
pub mod timing;
pub mod volume_texture;

pub use atlas::{AtlasTile, MaterialAtlas};
pub use gpu::GraphicsContext;
pub use pipeline::{RayJitter, RenderPipeline};
pub use target::{RenderTarget, TargetId};
pub use temporal::TemporalState;
pub use volume_texture::VolumeTexture;
