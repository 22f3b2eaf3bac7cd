//! Material system for rendering
//!
//! A material is a bag of named uniform values plus the shader that consumes
//! them. Lights and animation write into it by uniform name.

use std::collections::HashMap;

use crate::foundation::math::{Vec3, Vec4};
use super::shader::SharedShader;
use super::texture::{Texture2D, TextureSampler};

/// A value that can be bound to a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// Signed integer
    Int(i32),
    /// Scalar float
    Float(f32),
    /// Three-component vector
    Vec3(Vec3),
    /// Four-component vector
    Vec4(Vec4),
    /// Texture with optional sampler override
    Texture(Texture2D, Option<TextureSampler>),
}

impl UniformValue {
    /// The integer payload, if this is an `Int`
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The vector payload, if this is a `Vec3`
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

/// Anything uniforms can be written into
pub trait UniformTarget {
    /// Write one uniform
    fn write_uniform(&mut self, name: String, value: UniformValue);
}

/// Material properties for 3D rendering
#[derive(Debug, Clone, Default)]
pub struct Material {
    shader: Option<SharedShader>,
    uniforms: HashMap<String, UniformValue>,
}

impl Material {
    /// Create an empty material with no shader
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a material bound to `shader`
    pub fn with_shader(shader: SharedShader) -> Self {
        Self {
            shader: Some(shader),
            uniforms: HashMap::new(),
        }
    }

    /// The bound shader, if any
    pub fn shader(&self) -> Option<&SharedShader> {
        self.shader.as_ref()
    }

    /// Set a uniform, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        self.uniforms.insert(name.into(), value.into());
    }

    /// Bind a texture to a sampler slot
    pub fn set_texture(&mut self, name: impl Into<String>, texture: Texture2D, sampler: Option<TextureSampler>) {
        self.uniforms.insert(name.into(), UniformValue::Texture(texture, sampler));
    }

    /// Read back a uniform
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Number of uniforms set on this material
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }

    /// Drop every uniform value
    pub fn clear(&mut self) {
        self.uniforms.clear();
    }
}

impl UniformTarget for Material {
    fn write_uniform(&mut self, name: String, value: UniformValue) {
        self.uniforms.insert(name, value);
    }
}
