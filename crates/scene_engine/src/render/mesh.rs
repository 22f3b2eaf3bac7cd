//! Mesh representation for 3D models
//!
//! Pure geometry: vertex attributes, triangle indices and the axis-aligned
//! bounds computed at construction. Bounds drive physics body sizing when
//! objects are placed from level data.

use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Vertex data with position, color, normal and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: Vec3,

    /// Vertex color (RGBA)
    pub color: Vec4,

    /// Normal vector
    pub normal: Vec3,

    /// Texture coordinates
    pub uv: Vec2,
}

impl Vertex {
    /// Create a new vertex with white color
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            normal,
            uv,
        }
    }

    /// Create a vertex with an explicit color
    pub fn with_color(position: Vec3, color: Vec4, normal: Vec3, uv: Vec2) -> Self {
        Self { position, color, normal, uv }
    }

    /// Vertex at `position` with default normal, color and UV
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::z(), Vec2::zeros())
    }
}

/// Triangle mesh with cached bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    min: Vec3,
    max: Vec3,
}

impl Mesh {
    /// Create a mesh and compute its bounds
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let (min, max) = Self::compute_bounds(&vertices);
        Self { vertices, indices, min, max }
    }

    /// Axis-aligned box of `size` centered on the origin
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let corners = [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let vertices = corners
            .iter()
            .map(|p| Vertex::new(*p, p.normalize(), Vec2::zeros()))
            .collect();
        let indices = vec![
            0, 1, 2, 2, 3, 0, // back
            4, 6, 5, 6, 4, 7, // front
            0, 4, 5, 5, 1, 0, // bottom
            3, 2, 6, 6, 7, 3, // top
            0, 3, 7, 7, 4, 0, // left
            1, 5, 6, 6, 2, 1, // right
        ];
        Self::new(vertices, indices)
    }

    fn compute_bounds(vertices: &[Vertex]) -> (Vec3, Vec3) {
        let Some(first) = vertices.first() else {
            return (Vec3::zeros(), Vec3::zeros());
        };
        vertices.iter().skip(1).fold((first.position, first.position), |(min, max), v| {
            (min.inf(&v.position), max.sup(&v.position))
        })
    }

    /// Vertex data
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Minimum corner of the bounds
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner of the bounds
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Size of the bounds (`max - min`)
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}
