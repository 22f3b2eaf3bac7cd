//! Axis-aligned box bodies attached to objects

use crate::foundation::math::Vec3;

/// A box-shaped physics body
///
/// `center` and `size` describe the box in the owning object's space before
/// the body's local offset and rotation are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    center: Vec3,
    size: Vec3,
    local_position: Vec3,
    local_rotation: Vec3,
    visible: bool,
}

impl PhysicsBody {
    /// Box body from center and full size
    pub fn new_box(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            size,
            local_position: Vec3::zeros(),
            local_rotation: Vec3::zeros(),
            visible: true,
        }
    }

    /// Box center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Full box size
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Half extents of the box
    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    /// Offset from the owning object's origin
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    /// Set the offset from the owning object's origin
    pub fn set_local_position(&mut self, position: Vec3) {
        self.local_position = position;
    }

    /// Euler rotation in degrees relative to the owning object
    pub fn local_rotation(&self) -> Vec3 {
        self.local_rotation
    }

    /// Set the Euler rotation in degrees relative to the owning object
    pub fn set_local_rotation(&mut self, degrees: Vec3) {
        self.local_rotation = degrees;
    }

    /// Whether debug drawing shows this body
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the body in debug drawing
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether `point` (in the same space as the box) lies inside it, ignoring rotation
    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = point - (self.center + self.local_position);
        let h = self.half_extents();
        d.x.abs() <= h.x && d.y.abs() <= h.y && d.z.abs() <= h.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_contains_point_with_offset() {
        let mut body = PhysicsBody::new_box(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        body.set_local_position(Vec3::new(0.0, 0.0, 3.0));
        assert!(body.contains_point(Vec3::new(0.5, 0.5, 3.5)));
        assert!(!body.contains_point(Vec3::zeros()));
    }

    #[test]
    fn test_new_body_visible() {
        let mut body = PhysicsBody::new_box(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(body.is_visible());
        body.set_visible(false);
        assert!(!body.is_visible());
    }
}
