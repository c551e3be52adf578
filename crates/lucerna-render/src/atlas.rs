/// Grid position of a named tile inside the material atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasTile {
    pub col: u32,
    pub row: u32,
}

/// Seam to the application's texture-atlas layer. The trace shader only
/// needs the packed texture plus enough geometry to address tiles; how
/// tiles got packed and loaded is not this crate's business.
pub trait MaterialAtlas {
    /// View over the packed 2D atlas texture (bound at unit 0 of the
    /// trace pass's texture group).
    fn texture_view(&self) -> &wgpu::TextureView;

    /// Atlas edge length in pixels.
    fn grid_size(&self) -> u32;

    /// Per-tile edge length in pixels.
    fn tile_size(&self) -> u32;

    /// Look up a tile by material name ("stone", "glass", ...).
    fn lookup(&self, name: &str) -> Option<AtlasTile>;
}
