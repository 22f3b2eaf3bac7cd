//! Placeable prop kinds
//!
//! One descriptor per legend name; generation is driven entirely by this
//! table.

use scene_engine::foundation::math::{utils::unflip, Vec3};
use scene_engine::lighting::Light;
use scene_engine::scene::Object;

/// Where a prop's physics body size comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySize {
    /// Mesh bounds with Y and Z swapped
    MeshUnflipped,
    /// Mesh bounds as loaded
    MeshRaw,
    /// The obstacle's default size hint
    Default,
}

/// How a prop kind is placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropDescriptor {
    /// Legend name
    pub name: &'static str,
    /// Mesh asset path
    pub mesh_path: &'static str,
    /// Physics body size source
    pub body_size: BodySize,
    /// Physics body local Z
    pub body_z: f32,
    /// Body X rotation in degrees, applied only when the cell rotates the prop
    pub spin_body_rotation_x: f32,
    /// Whether a lamp light is placed with the prop
    pub emits_light: bool,
}

impl PropDescriptor {
    const fn solid(name: &'static str, mesh_path: &'static str, body_z: f32) -> Self {
        Self {
            name,
            mesh_path,
            body_size: BodySize::MeshUnflipped,
            body_z,
            spin_body_rotation_x: 90.0,
            emits_light: false,
        }
    }

    const fn lamp(name: &'static str, mesh_path: &'static str, body_size: BodySize) -> Self {
        Self {
            name,
            mesh_path,
            body_size,
            body_z: 3.0,
            spin_body_rotation_x: 0.0,
            emits_light: true,
        }
    }

    /// Physics body size for `object`, falling back to `default_size`
    pub fn body_size_for(&self, object: &Object, default_size: Vec3) -> Vec3 {
        match self.body_size {
            BodySize::MeshUnflipped => unflip(object.mesh_extents()),
            BodySize::MeshRaw => object.mesh_extents(),
            BodySize::Default => default_size,
        }
    }
}

/// Every prop the generator understands
pub const PROPS: &[PropDescriptor] = &[
    PropDescriptor::solid("Wall", "res/objects/props/GDW_1_Y2 - Wall Tile.obj", 2.0),
    PropDescriptor::solid("Dumpster", "res/objects/props/Dumpster.obj", 1.0),
    PropDescriptor::lamp("Lamp post", "res/objects/props/Lamp_Side.obj", BodySize::Default),
    PropDescriptor::lamp("Lamp post corner", "res/objects/props/Lamp_Corner.obj", BodySize::MeshUnflipped),
    PropDescriptor::lamp("Lamp post middle", "res/objects/props/Lamp_Center.obj", BodySize::MeshUnflipped),
    PropDescriptor::solid("Barrel", "res/objects/props/drum.obj", 1.0),
    PropDescriptor::solid("Katana", "res/objects/weapons/katana.obj", 1.0),
    PropDescriptor::solid("Pillar", "res/objects/props/GDW_1_Y2 - Pillar.obj", 2.0),
    PropDescriptor::solid("Manhole cover", "res/objects/props/manhole.obj", 0.25),
    PropDescriptor {
        body_size: BodySize::MeshRaw,
        ..PropDescriptor::solid("Road", "res/objects/props/Road.obj", -1.0)
    },
    PropDescriptor::solid("Sidewalk", "res/objects/props/sidewalk.obj", 0.125),
    PropDescriptor::solid("Building", "res/objects/props/building.obj", 0.125),
    PropDescriptor::solid("Concrete", "res/objects/props/floor.obj", 0.125),
    PropDescriptor::solid("Metal Box", "res/objects/props/metalbox.obj", 0.125),
    PropDescriptor::solid("Wooden Box", "res/objects/props/woodenbox.obj", 0.125),
    PropDescriptor::solid("Flood light", "res/objects/props/lamp.obj", 0.125),
    PropDescriptor::solid("Concrete pillar", "res/objects/props/pillar.obj", 0.125),
    PropDescriptor::solid("Shelves", "res/objects/props/shelves.obj", 0.125),
    PropDescriptor::solid("Edge ground", "res/objects/props/edge.obj", 0.125),
    PropDescriptor::solid("Bench", "res/objects/props/bench.obj", 0.125),
    PropDescriptor::solid("Tent", "res/objects/props/tent.obj", 0.125),
];

/// Descriptor for a legend name
pub fn find_prop(name: &str) -> Option<&'static PropDescriptor> {
    PROPS.iter().find(|p| p.name == name)
}

/// The light placed with lamp props
pub fn lamp_light(scene: &str, position: Vec3) -> Light {
    Light::new(
        scene,
        position,
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.5, 0.5, 0.5),
        0.1,
        0.7,
        0.6,
        0.01,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use scene_engine::render::Mesh;

    #[test]
    fn test_names_are_unique() {
        for (i, prop) in PROPS.iter().enumerate() {
            assert!(PROPS[i + 1..].iter().all(|p| p.name != prop.name), "{}", prop.name);
        }
    }

    #[test]
    fn test_lookup() {
        let road = find_prop("Road").unwrap();
        assert_eq!(road.body_size, BodySize::MeshRaw);
        assert!((road.body_z + 1.0).abs() < f32::EPSILON);
        assert!(find_prop("Lamp post middle").unwrap().emits_light);
        assert!(!find_prop("Wall").unwrap().emits_light);
        assert!(find_prop("Origin").is_none());
    }

    #[test]
    fn test_body_size_sources() {
        let object = Object::with_mesh("wall", "level", "wall.obj", Arc::new(Mesh::cuboid(Vec3::new(1.0, 2.0, 3.0))));
        let default = Vec3::new(4.0, 4.0, 4.0);
        assert_eq!(find_prop("Wall").unwrap().body_size_for(&object, default), Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(find_prop("Road").unwrap().body_size_for(&object, default), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(find_prop("Lamp post").unwrap().body_size_for(&object, default), default);
    }
}
