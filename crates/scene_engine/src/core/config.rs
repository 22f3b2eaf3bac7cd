//! # Unified Configuration System
//!
//! Configuration for engine behavior, asset loading and the lighting pipeline.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging, debug features, fixed update step
//! - **Asset Config**: Asset root directory and mesh caching
//! - **Lighting Config**: Post-process shaders, default textures, frame buffer size
//! - **Application Config**: The top-level bundle applications load from disk

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Shader Configuration
///
/// A vertex/fragment shader pair by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader
    pub vertex_shader_path: String,
    /// Path to the fragment shader
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Validate that neither path is empty
    pub fn validate(&self) -> Result<(), String> {
        if self.vertex_shader_path.is_empty() {
            return Err("Vertex shader path cannot be empty".to_string());
        }
        if self.fragment_shader_path.is_empty() {
            return Err("Fragment shader path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// # Lighting Configuration
///
/// Shaders and resources used to build each scene's light list: the lighting
/// post pass, the shadow pass, and the default albedo texture bound when a
/// material is generated from the scene's lights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Lighting post pass shaders
    pub lighting_shader: ShaderConfig,
    /// Shadow pass shaders (shares the post vertex shader by default)
    pub shadow_shader: ShaderConfig,
    /// Texture bound to every albedo slot of generated materials
    pub default_albedo_texture: String,
    /// Width of the lighting and shadow frame buffers
    pub framebuffer_width: u32,
    /// Height of the lighting and shadow frame buffers
    pub framebuffer_height: u32,
    /// Whether new light lists start with the shadow pass enabled
    pub shadows_enabled: bool,
}

impl LightingConfig {
    /// Create a lighting configuration with the stock shader set
    pub fn new() -> Self {
        Self {
            lighting_shader: ShaderConfig::new("res/shaders/post.vs", "res/shaders/lighting.fs"),
            shadow_shader: ShaderConfig::new("res/shaders/post.vs", "res/shaders/shadows.fs"),
            default_albedo_texture: "res/images/default.png".to_string(),
            framebuffer_width: 1280,
            framebuffer_height: 720,
            shadows_enabled: false,
        }
    }

    /// Set the frame buffer size
    pub fn with_framebuffer_size(mut self, width: u32, height: u32) -> Self {
        self.framebuffer_width = width;
        self.framebuffer_height = height;
        self
    }

    /// Set the default albedo texture
    pub fn with_default_albedo(mut self, path: impl Into<String>) -> Self {
        self.default_albedo_texture = path.into();
        self
    }

    /// Start new light lists with shadows on or off
    pub fn with_shadows(mut self, enabled: bool) -> Self {
        self.shadows_enabled = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.lighting_shader.validate()?;
        self.shadow_shader.validate()?;
        if self.framebuffer_width == 0 || self.framebuffer_height == 0 {
            return Err("Frame buffer dimensions must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Core engine behavior configuration including logging and debug features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// Fixed update step in seconds
    pub fixed_timestep: f32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Set the fixed update step
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Configuration for asset loading and caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory that asset paths are resolved against
    pub assets_dir: String,
    /// Whether loaded meshes are cached and shared by path
    pub enable_caching: bool,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: ".".to_string(),
            enable_caching: true,
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Configure caching
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.enable_caching = enabled;
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name, used in log output
    pub application_name: String,
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
    /// Lighting pipeline configuration
    pub lighting: LightingConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            engine: EngineConfig::default(),
            assets: AssetConfig::default(),
            lighting: LightingConfig::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.application_name.is_empty() {
            return Err("Application name cannot be empty".to_string());
        }
        if self.engine.fixed_timestep <= 0.0 {
            return Err("Fixed timestep must be positive".to_string());
        }
        self.lighting.validate()
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new("Scene Engine Application")
    }
}

impl Config for ApplicationConfig {}
