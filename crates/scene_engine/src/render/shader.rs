//! Shader programs
//!
//! Post layers and materials hold the same program, so shaders are shared as
//! [`SharedShader`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::config::ShaderConfig;
use super::material::{UniformTarget, UniformValue};

/// A shader shared between post layers and materials
pub type SharedShader = Rc<RefCell<Shader>>;

/// A vertex/fragment program with recorded uniform state
#[derive(Debug, Clone)]
pub struct Shader {
    vertex_path: String,
    fragment_path: String,
    uniforms: HashMap<String, UniformValue>,
}

impl Shader {
    /// Create a shader from its source paths
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_path: vertex_path.into(),
            fragment_path: fragment_path.into(),
            uniforms: HashMap::new(),
        }
    }

    /// Create a shader from configuration
    pub fn from_config(config: &ShaderConfig) -> Self {
        Self::new(&config.vertex_shader_path, &config.fragment_shader_path)
    }

    /// Wrap into a [`SharedShader`]
    pub fn shared(self) -> SharedShader {
        Rc::new(RefCell::new(self))
    }

    /// Vertex shader path
    pub fn vertex_path(&self) -> &str {
        &self.vertex_path
    }

    /// Fragment shader path
    pub fn fragment_path(&self) -> &str {
        &self.fragment_path
    }

    /// Set a uniform on the program
    pub fn set_uniform(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        self.uniforms.insert(name.into(), value.into());
    }

    /// Current value of a uniform
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }
}

impl UniformTarget for Shader {
    fn write_uniform(&mut self, name: String, value: UniformValue) {
        self.uniforms.insert(name, value);
    }
}
