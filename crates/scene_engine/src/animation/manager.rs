//! Per-object animation ownership

use super::{Animation, AnimationError};

/// Owns an object's animations and tracks which one is current
///
/// Cloning the manager deep-copies every animation, so two objects never
/// share playback state.
#[derive(Debug, Clone, Default)]
pub struct AnimationManager {
    animations: Vec<Box<dyn Animation>>,
    current: Option<usize>,
    vertex_count: Option<usize>,
}

impl AnimationManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animation and return its index
    ///
    /// The first animation added becomes current. With `make_current` the
    /// previous current animation is stopped and the new one takes its place.
    pub fn add_animation(
        &mut self,
        mut animation: Box<dyn Animation>,
        make_current: bool,
    ) -> Result<usize, AnimationError> {
        if let Some(count) = self.vertex_count {
            animation.bind_vertex_count(count)?;
        }
        self.animations.push(animation);
        let index = self.animations.len() - 1;

        if self.current.is_none() {
            self.current = Some(index);
        } else if make_current {
            self.set_current_animation(index);
        }
        Ok(index)
    }

    /// Remove the animation at `index`
    pub fn remove_animation(&mut self, index: usize) -> Option<Box<dyn Animation>> {
        if index >= self.animations.len() {
            return None;
        }
        let removed = self.animations.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(removed)
    }

    /// Drop every animation
    pub fn clear_animations(&mut self) {
        self.animations.clear();
        self.current = None;
    }

    /// Number of animations
    pub fn animations_total(&self) -> usize {
        self.animations.len()
    }

    /// Animation by index
    pub fn get_animation(&self, index: usize) -> Option<&dyn Animation> {
        self.animations.get(index).map(|a| &**a)
    }

    /// Mutable animation by index
    pub fn get_animation_mut(&mut self, index: usize) -> Option<&mut (dyn Animation + 'static)> {
        self.animations.get_mut(index).map(|a| &mut **a)
    }

    /// Downcast the animation at `index`
    pub fn get_animation_as<T: Animation>(&self, index: usize) -> Option<&T> {
        self.get_animation(index)?.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast the animation at `index`
    pub fn get_animation_as_mut<T: Animation>(&mut self, index: usize) -> Option<&mut T> {
        self.get_animation_mut(index)?.as_any_mut().downcast_mut::<T>()
    }

    /// Index of the current animation
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current animation
    pub fn current_animation(&self) -> Option<&dyn Animation> {
        self.current.and_then(|i| self.get_animation(i))
    }

    /// The current animation, mutably
    pub fn current_animation_mut(&mut self) -> Option<&mut (dyn Animation + 'static)> {
        let index = self.current?;
        self.get_animation_mut(index)
    }

    /// Make the animation at `index` current, stopping the previous one
    pub fn set_current_animation(&mut self, index: usize) -> bool {
        if index >= self.animations.len() {
            return false;
        }
        if let Some(previous) = self.current.filter(|&c| c != index) {
            self.animations[previous].stop();
        }
        self.current = Some(index);
        true
    }

    /// Bind every animation to an object with `count` vertices
    pub fn set_vertex_count(&mut self, count: usize) -> Result<(), AnimationError> {
        for animation in &mut self.animations {
            animation.bind_vertex_count(count)?;
        }
        self.vertex_count = Some(count);
        Ok(())
    }

    /// Vertex count the animations are bound to
    pub fn vertex_count(&self) -> Option<usize> {
        self.vertex_count
    }

    /// Replace every animation with deep copies of `other`'s
    pub fn replace_animations(&mut self, other: &Self) {
        self.animations = other.animations.clone();
        self.current = other.current;
        self.vertex_count = other.vertex_count;
    }

    /// Advance the current animation
    pub fn update(&mut self, delta_time: f32) {
        if let Some(animation) = self.current_animation_mut() {
            animation.update(delta_time);
        }
    }
}
