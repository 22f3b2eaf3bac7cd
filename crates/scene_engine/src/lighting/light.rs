//! Point lights

use crate::foundation::math::Vec3;
use crate::render::{UniformTarget, UniformValue};

/// A point light owned by a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Name of the owning scene
    pub scene: String,
    /// World position
    pub position: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Ambient color
    pub ambient_color: Vec3,
    /// Ambient contribution
    pub ambient_power: f32,
    /// Specular contribution
    pub specular_power: f32,
    /// Specular exponent scale
    pub shininess: f32,
    /// Distance falloff factor
    pub attenuation: f32,
}

impl Light {
    /// Create a light with every parameter given
    pub fn new(
        scene: impl Into<String>,
        position: Vec3,
        color: Vec3,
        ambient_color: Vec3,
        ambient_power: f32,
        specular_power: f32,
        shininess: f32,
        attenuation: f32,
    ) -> Self {
        Self {
            scene: scene.into(),
            position,
            color,
            ambient_color,
            ambient_power,
            specular_power,
            shininess,
            attenuation,
        }
    }

    /// White light at `position` with the default shading parameters
    pub fn point(scene: impl Into<String>, position: Vec3) -> Self {
        Self {
            position,
            ..Self::default_for(scene)
        }
    }

    fn default_for(scene: impl Into<String>) -> Self {
        Self::new(
            scene,
            Vec3::zeros(),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            0.1,
            0.5,
            0.5,
            0.01,
        )
    }

    /// Field-wise mean of `lights`; `None` when empty
    ///
    /// The result belongs to the first light's scene.
    pub fn mean(lights: &[Self]) -> Option<Self> {
        let first = lights.first()?;
        #[allow(clippy::cast_precision_loss)]
        let n = lights.len() as f32;
        let mut sum = Self::new(first.scene.clone(), Vec3::zeros(), Vec3::zeros(), Vec3::zeros(), 0.0, 0.0, 0.0, 0.0);
        for light in lights {
            sum.position += light.position;
            sum.color += light.color;
            sum.ambient_color += light.ambient_color;
            sum.ambient_power += light.ambient_power;
            sum.specular_power += light.specular_power;
            sum.shininess += light.shininess;
            sum.attenuation += light.attenuation;
        }
        sum.position /= n;
        sum.color /= n;
        sum.ambient_color /= n;
        sum.ambient_power /= n;
        sum.specular_power /= n;
        sum.shininess /= n;
        sum.attenuation /= n;
        Some(sum)
    }

    /// Write this light into slot `index` of the shader light array
    pub fn write_uniforms(&self, index: usize, target: &mut impl UniformTarget) {
        let field = |name: &str| format!("a_Lights[{index}].{name}");
        target.write_uniform(field("ambientColor"), UniformValue::Vec3(self.ambient_color));
        target.write_uniform(field("ambientPower"), UniformValue::Float(self.ambient_power));
        target.write_uniform(field("specularPower"), UniformValue::Float(self.specular_power));
        target.write_uniform(field("position"), UniformValue::Vec3(self.position));
        target.write_uniform(field("color"), UniformValue::Vec3(self.color));
        target.write_uniform(field("shininess"), UniformValue::Float(self.shininess));
        target.write_uniform(field("attenuation"), UniformValue::Float(self.attenuation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Material;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_of_two_lights() {
        let a = Light::new("s", Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::zeros(), 0.2, 1.0, 0.0, 0.1);
        let b = Light::new("s", Vec3::new(2.0, 4.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::zeros(), 0.4, 0.0, 1.0, 0.3);
        let merged = Light::mean(&[a, b]).unwrap();
        assert_relative_eq!(merged.position, Vec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(merged.color, Vec3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(merged.ambient_power, 0.3);
        assert_relative_eq!(merged.specular_power, 0.5);
        assert_relative_eq!(merged.shininess, 0.5);
        assert_relative_eq!(merged.attenuation, 0.2);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert!(Light::mean(&[]).is_none());
    }

    #[test]
    fn test_writes_seven_fields() {
        let mut material = Material::new();
        Light::point("s", Vec3::new(1.0, 2.0, 3.0)).write_uniforms(4, &mut material);
        assert_eq!(material.uniform_count(), 7);
        assert_eq!(
            material.get("a_Lights[4].position").and_then(UniformValue::as_vec3),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }
}
