//! Post-processing layers
//!
//! A layer is an ordered list of full-screen passes. Each pass renders into
//! its own frame buffer with its own shader.

use std::rc::Rc;

use super::shader::SharedShader;

/// Off-screen render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FrameBuffer {
    /// Create a frame buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One full-screen pass
#[derive(Debug, Clone)]
pub struct PostPass {
    /// Program run by the pass
    pub shader: SharedShader,
    /// Target the pass renders into
    pub framebuffer: FrameBuffer,
}

impl PostPass {
    /// Create a pass
    pub fn new(shader: SharedShader, framebuffer: FrameBuffer) -> Self {
        Self { shader, framebuffer }
    }
}

/// Ordered stack of post passes
#[derive(Debug, Clone, Default)]
pub struct PostLayer {
    passes: Vec<PostPass>,
}

impl PostLayer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer with a single pass
    pub fn with_pass(pass: PostPass) -> Self {
        Self { passes: vec![pass] }
    }

    /// Append a pass
    pub fn add_pass(&mut self, pass: PostPass) {
        self.passes.push(pass);
    }

    /// Remove every pass running `shader`; returns whether anything was removed
    pub fn remove_pass(&mut self, shader: &SharedShader) -> bool {
        let before = self.passes.len();
        self.passes.retain(|pass| !Rc::ptr_eq(&pass.shader, shader));
        self.passes.len() != before
    }

    /// Whether a pass runs `shader`
    pub fn has_pass(&self, shader: &SharedShader) -> bool {
        self.passes.iter().any(|pass| Rc::ptr_eq(&pass.shader, shader))
    }

    /// Passes in order
    pub fn passes(&self) -> &[PostPass] {
        &self.passes
    }

    /// Number of passes
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }
}
