//! Animation system
//!
//! Every object owns an [`AnimationManager`] holding its animations; the
//! concrete animation kind in this crate is [`MorphAnimation`], which blends
//! between whole-mesh vertex poses.

pub mod manager;
pub mod morph;

use std::any::Any;
use std::fmt::Debug;

pub use manager::AnimationManager;
pub use morph::{MorphAnimation, MorphAnimationFrame, MorphVertex, Pose};

/// Animation errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A frame index outside the animation
    #[error("Frame {index} not found ({count} frames)")]
    FrameNotFound {
        /// Requested frame
        index: usize,
        /// Frames available
        count: usize,
    },

    /// Frame vertex count differs from the bound object
    #[error("Vertex count mismatch: expected {expected}, found {found}")]
    VertexCountMismatch {
        /// Vertex count bound to the animation
        expected: usize,
        /// Vertex count of the offending frame
        found: usize,
    },

    /// Per-vertex attribute arrays of different lengths
    #[error("Attribute arrays differ in length (positions {positions}, colors {colors}, normals {normals}, uvs {uvs})")]
    AttributeLengthMismatch {
        /// Position count
        positions: usize,
        /// Color count
        colors: usize,
        /// Normal count
        normals: usize,
        /// UV count
        uvs: usize,
    },
}

/// How playback continues past the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play through once and stop on the last frame
    #[default]
    Once,
    /// Wrap back to the start this many extra times
    Count(u32),
    /// Wrap forever
    Infinite,
}

/// Shared playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    playing: bool,
    loop_mode: LoopMode,
    loops_done: u32,
}

impl Playback {
    /// Stopped playback with the given loop mode
    pub fn new(loop_mode: LoopMode) -> Self {
        Self {
            playing: false,
            loop_mode,
            loops_done: 0,
        }
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Change the loop mode and reset the loop counter
    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        self.loops_done = 0;
    }

    /// Start or resume
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause without resetting the loop counter
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and reset the loop counter
    pub fn stop(&mut self) {
        self.playing = false;
        self.loops_done = 0;
    }

    /// Consume one wrap if the loop mode allows it
    pub fn should_wrap(&mut self) -> bool {
        match self.loop_mode {
            LoopMode::Once => false,
            LoopMode::Count(n) if self.loops_done < n => {
                self.loops_done += 1;
                true
            }
            LoopMode::Count(_) => false,
            LoopMode::Infinite => true,
        }
    }
}

/// Base contract for anything an [`AnimationManager`] can drive
pub trait Animation: Debug + Any {
    /// Display name
    fn name(&self) -> &str;

    /// Playback state
    fn playback(&self) -> &Playback;

    /// Mutable playback state
    fn playback_mut(&mut self) -> &mut Playback;

    /// Advance by `delta_time` seconds
    fn update(&mut self, delta_time: f32);

    /// Bind the animation to an object with `count` vertices
    fn bind_vertex_count(&mut self, count: usize) -> Result<(), AnimationError>;

    /// Deep copy behind a fresh box
    fn clone_boxed(&self) -> Box<dyn Animation>;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Start or resume playback
    fn play(&mut self) {
        self.playback_mut().play();
    }

    /// Pause playback
    fn pause(&mut self) {
        self.playback_mut().pause();
    }

    /// Stop playback
    fn stop(&mut self) {
        self.playback_mut().stop();
    }

    /// Whether playback is running
    fn is_playing(&self) -> bool {
        self.playback().is_playing()
    }
}

impl Clone for Box<dyn Animation> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_loop_wraps_n_times() {
        let mut playback = Playback::new(LoopMode::Count(2));
        assert!(playback.should_wrap());
        assert!(playback.should_wrap());
        assert!(!playback.should_wrap());
        playback.stop();
        assert!(playback.should_wrap());
    }

    #[test]
    fn test_once_never_wraps() {
        let mut playback = Playback::new(LoopMode::Once);
        assert!(!playback.should_wrap());
    }
}
