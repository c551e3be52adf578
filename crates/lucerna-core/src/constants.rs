//! Single source of truth for shared constants.
//! Material codes are used by both Rust and the WGSL ray-march shader;
//! the render crate injects them into the shader preamble.

/// Empty/air voxel. Rays pass straight through.
pub const MAT_AIR: u8 = 0;

/// Solid voxel, textured from the "stone" atlas tile.
pub const MAT_STONE: u8 = 1;

/// Translucent voxel; the ray marcher refracts through it.
pub const MAT_GLASS: u8 = 2;

/// Emissive surface voxel ("grass" in terrain scenes, marker elsewhere).
pub const MAT_EMISSIVE: u8 = 3;

/// Vertical field of view for the free-fly camera, in degrees.
pub const DEFAULT_FOV_Y_DEG: f32 = 90.0;

/// Near clip plane distance.
pub const DEFAULT_NEAR: f32 = 0.01;

/// Far clip plane distance.
pub const DEFAULT_FAR: f32 = 100.0;

/// Default viewport dimensions used by the presets.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1440, 810);

/// A trace pass measuring longer than this indicates a driver stall or
/// query misuse, not a slow frame. The pipeline aborts when it is hit.
pub const TRACE_PASS_FATAL_MS: f32 = 1000.0;
