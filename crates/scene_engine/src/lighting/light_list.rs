//! The lights of one scene and the post passes they drive

use crate::core::config::LightingConfig;
use crate::render::{
    FrameBuffer, Material, PostLayer, PostPass, Shader, SharedShader, Texture2D, TextureSampler,
    UniformTarget, UniformValue,
};
use crate::scene::ObjectList;
use super::light::Light;
use super::MAX_LIGHTS;

/// Number of albedo texture slots bound on generated materials
const ALBEDO_SLOTS: usize = 3;

/// Write the enabled-count header followed by each light
fn write_lights(target: &mut impl UniformTarget, lights: &[Light]) {
    let enabled = i32::try_from(lights.len()).unwrap_or(i32::MAX);
    target.write_uniform("a_EnabledLights".to_string(), UniformValue::Int(enabled));
    for (index, light) in lights.iter().enumerate() {
        light.write_uniforms(index, target);
    }
}

/// Lights of one scene plus its lighting and shadow post layers
#[derive(Debug)]
pub struct LightList {
    scene_name: String,
    lights: Vec<Light>,
    shader: SharedShader,
    layer: PostLayer,
    shadow_shader: SharedShader,
    shadow_buffer: FrameBuffer,
    shadow_layer: PostLayer,
    shadows: bool,
    ignore_background: bool,
    default_albedo: Texture2D,
}

impl LightList {
    /// Build the list and its post layers for `scene_name`
    pub fn new(scene_name: impl Into<String>, config: &LightingConfig) -> Self {
        let framebuffer = FrameBuffer::new(config.framebuffer_width, config.framebuffer_height);
        let shader = Shader::from_config(&config.lighting_shader).shared();
        let shadow_shader = Shader::from_config(&config.shadow_shader).shared();
        let mut list = Self {
            scene_name: scene_name.into(),
            lights: Vec::new(),
            layer: PostLayer::with_pass(PostPass::new(shader.clone(), framebuffer)),
            shader,
            shadow_layer: PostLayer::with_pass(PostPass::new(shadow_shader.clone(), framebuffer)),
            shadow_shader,
            shadow_buffer: framebuffer,
            shadows: false,
            ignore_background: false,
            default_albedo: Texture2D::new(&config.default_albedo_texture),
        };
        list.set_shadows_enabled(config.shadows_enabled);
        list
    }

    /// Owning scene
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    /// Append a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Lights in insertion order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Light by index
    pub fn get_light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    /// Mutable light by index
    pub fn get_light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Remove and return the light at `index`
    pub fn remove_light_by_index(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    /// Remove and return the first light equal to `light`
    pub fn remove_light(&mut self, light: &Light) -> Option<Light> {
        let index = self.lights.iter().position(|l| l == light)?;
        Some(self.lights.remove(index))
    }

    /// Drop the light at `index`
    pub fn delete_light_by_index(&mut self, index: usize) -> bool {
        self.remove_light_by_index(index).is_some()
    }

    /// Drop the first light equal to `light`
    pub fn delete_light(&mut self, light: &Light) -> bool {
        self.remove_light(light).is_some()
    }

    /// Drop every light
    pub fn delete_all_lights(&mut self) {
        self.lights.clear();
    }

    /// Field-wise mean of every light; `None` with no lights
    pub fn lights_merged(&self) -> Option<Light> {
        Light::mean(&self.lights)
    }

    /// Write up to `|count|` lights into `material`, capped at [`MAX_LIGHTS`]
    pub fn apply_lights(&self, material: &mut Material, count: i32) {
        let requested = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
        let enabled = requested.min(MAX_LIGHTS).min(self.lights.len());
        write_lights(material, &self.lights[..enabled]);
    }

    /// Write every light into `material`, capped at [`MAX_LIGHTS`]
    pub fn apply_all_lights(&self, material: &mut Material) {
        let count = i32::try_from(self.lights.len()).unwrap_or(i32::MAX);
        self.apply_lights(material, count);
    }

    /// New material for the given shader carrying this scene's lights
    ///
    /// Returns `None` when the scene has no lights.
    pub fn generate_material(
        &self,
        vertex_path: &str,
        fragment_path: &str,
        sampler: Option<TextureSampler>,
    ) -> Option<Material> {
        if self.lights.is_empty() {
            return None;
        }
        let mut material = Material::with_shader(Shader::new(vertex_path, fragment_path).shared());
        self.apply_all_lights(&mut material);
        for slot in 0..ALBEDO_SLOTS {
            material.set_texture(format!("s_Albedos[{slot}]"), self.default_albedo.clone(), sampler);
        }
        Some(material)
    }

    /// Push the lights into the material of every object in `objects`
    pub fn update_materials(&self, objects: &mut ObjectList) {
        for (_, entity) in objects.iter_mut() {
            self.apply_all_lights(entity.object_mut().material_mut());
        }
    }

    /// Push the lights and background flag into the lighting and shadow shaders
    pub fn update_post_layer(&self) {
        let enabled = &self.lights[..self.lights.len().min(MAX_LIGHTS)];
        for shader in [&self.shader, &self.shadow_shader] {
            let mut shader = shader.borrow_mut();
            write_lights(&mut *shader, enabled);
            shader.set_uniform("a_IgnoreBackground", i32::from(self.ignore_background));
        }
    }

    /// Per-frame refresh of materials and post shaders
    pub fn update(&self, _delta_time: f32, objects: Option<&mut ObjectList>) {
        if let Some(objects) = objects {
            self.update_materials(objects);
        }
        self.update_post_layer();
    }

    /// Whether the shadow pass is part of the lighting layer
    pub fn shadows_enabled(&self) -> bool {
        self.shadows
    }

    /// Add or remove the shadow pass; repeated calls with the same value do nothing
    pub fn set_shadows_enabled(&mut self, enable: bool) {
        if enable && !self.layer.has_pass(&self.shadow_shader) {
            self.layer.add_pass(PostPass::new(self.shadow_shader.clone(), self.shadow_buffer));
        } else if !enable {
            self.layer.remove_pass(&self.shadow_shader);
        }
        self.shadows = enable;
    }

    /// Whether lighting skips background pixels
    pub fn is_ignoring_background(&self) -> bool {
        self.ignore_background
    }

    /// Set whether lighting skips background pixels and push it to both shaders
    pub fn set_ignore_background(&mut self, ignore: bool) {
        self.ignore_background = ignore;
        for shader in [&self.shader, &self.shadow_shader] {
            shader.borrow_mut().set_uniform("a_IgnoreBackground", i32::from(ignore));
        }
    }

    /// Lighting post layer
    pub fn post_layer(&self) -> &PostLayer {
        &self.layer
    }

    /// Shadow post layer
    pub fn shadow_layer(&self) -> &PostLayer {
        &self.shadow_layer
    }

    /// Lighting shader
    pub fn shader(&self) -> &SharedShader {
        &self.shader
    }

    /// Shadow shader
    pub fn shadow_shader(&self) -> &SharedShader {
        &self.shadow_shader
    }
}
