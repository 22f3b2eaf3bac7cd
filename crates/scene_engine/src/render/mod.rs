//! Headless render collaborators
//!
//! Geometry, materials, shaders, textures and post-process layers. Nothing in
//! here talks to a GPU: uniform writes are recorded so lighting and animation
//! results can be inspected directly.

pub mod mesh;
pub mod material;
pub mod shader;
pub mod texture;
pub mod post;

pub use mesh::{Mesh, Vertex};
pub use material::{Material, UniformTarget, UniformValue};
pub use shader::{Shader, SharedShader};
pub use texture::{Texture2D, TextureSampler, FilterMode, WrapMode};
pub use post::{FrameBuffer, PostLayer, PostPass};
