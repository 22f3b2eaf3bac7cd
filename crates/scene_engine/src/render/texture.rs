//! Texture handles and sampler state

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Nearest texel
    Nearest,
    /// Bilinear filtering
    #[default]
    Linear,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Tile the texture
    #[default]
    Repeat,
    /// Clamp to the edge texel
    ClampToEdge,
}

/// Sampler state used when a texture is bound to a material slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSampler {
    /// Minification and magnification filter
    pub filter: FilterMode,
    /// Wrap mode on both axes
    pub wrap: WrapMode,
}

impl TextureSampler {
    /// Create a sampler
    pub fn new(filter: FilterMode, wrap: WrapMode) -> Self {
        Self { filter, wrap }
    }
}

/// A 2D texture referenced by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture2D {
    path: String,
}

impl Texture2D {
    /// Reference the texture at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Source path
    pub fn path(&self) -> &str {
        &self.path
    }
}
