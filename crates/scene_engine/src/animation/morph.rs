//! Morph-target animation
//!
//! A morph animation is a sequence of whole-mesh vertex poses. Playback blends
//! from one frame to the next; the blend buffer for each ordered frame pair
//! (a [`Pose`]) is built the first time it is needed and reused afterwards.

use std::any::Any;

use crate::foundation::math::{utils, Vec2, Vec3, Vec4};
use crate::render::{Mesh, Vertex};
use super::{Animation, AnimationError, LoopMode, Playback};

/// One vertex carrying both blend endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphVertex {
    /// Attributes at `t = 0`
    pub start: Vertex,
    /// Attributes at `t = 1`
    pub end: Vertex,
}

impl MorphVertex {
    /// Pair two vertices
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    /// Blend every attribute at `t`
    pub fn interpolate(&self, t: f32) -> Vertex {
        Vertex {
            position: utils::lerp_vec3(&self.start.position, &self.end.position, t),
            color: utils::lerp_vec4(&self.start.color, &self.end.color, t),
            normal: utils::lerp_vec3(&self.start.normal, &self.end.normal, t),
            uv: utils::lerp_vec2(&self.start.uv, &self.end.uv, t),
        }
    }
}

/// Cached blend buffer for the ordered frame pair `(from, to)`
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    from: usize,
    to: usize,
    vertices: Vec<MorphVertex>,
}

impl Pose {
    /// Source frame index
    pub fn from(&self) -> usize {
        self.from
    }

    /// Target frame index
    pub fn to(&self) -> usize {
        self.to
    }

    /// Blend vertices
    pub fn vertices(&self) -> &[MorphVertex] {
        &self.vertices
    }

    /// Evaluate the pose at `t`
    pub fn sample(&self, t: f32) -> Vec<Vertex> {
        self.vertices.iter().map(|v| v.interpolate(t)).collect()
    }
}

/// A target pose plus the time, in seconds, spent blending into it
#[derive(Debug, Clone, PartialEq)]
pub struct MorphAnimationFrame {
    pose: Vec<Vertex>,
    units: f32,
}

impl MorphAnimationFrame {
    /// Frame from finished vertices
    pub fn new(pose: Vec<Vertex>, units: f32) -> Self {
        Self { pose, units }
    }

    /// Frame from parallel attribute arrays
    pub fn from_attributes(
        positions: &[Vec3],
        colors: &[Vec4],
        normals: &[Vec3],
        uvs: &[Vec2],
        units: f32,
    ) -> Result<Self, AnimationError> {
        let n = positions.len();
        if colors.len() != n || normals.len() != n || uvs.len() != n {
            return Err(AnimationError::AttributeLengthMismatch {
                positions: n,
                colors: colors.len(),
                normals: normals.len(),
                uvs: uvs.len(),
            });
        }
        let pose = (0..n)
            .map(|i| Vertex::with_color(positions[i], colors[i], normals[i], uvs[i]))
            .collect();
        Ok(Self::new(pose, units))
    }

    /// Frame taking the mesh's vertices as the pose
    pub fn from_mesh(mesh: &Mesh, units: f32) -> Self {
        Self::new(mesh.vertices().to_vec(), units)
    }

    /// Target vertices
    pub fn pose(&self) -> &[Vertex] {
        &self.pose
    }

    /// Number of vertices in the pose
    pub fn vertex_count(&self) -> usize {
        self.pose.len()
    }

    /// Blend duration into this frame
    pub fn units(&self) -> f32 {
        self.units
    }
}

/// Keyframe vertex animation with a memoized pose cache
#[derive(Debug, Clone)]
pub struct MorphAnimation {
    name: String,
    frames: Vec<MorphAnimationFrame>,
    vertex_count: Option<usize>,
    poses: Vec<Pose>,
    poses_generated: usize,
    current_frame: Option<usize>,
    t: f32,
    finished: bool,
    playback: Playback,
}

impl MorphAnimation {
    /// Empty animation that plays once
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            vertex_count: None,
            poses: Vec::new(),
            poses_generated: 0,
            current_frame: None,
            t: 0.0,
            finished: false,
            playback: Playback::new(LoopMode::Once),
        }
    }

    /// Set the loop mode
    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.playback.set_loop_mode(mode);
        self
    }

    /// Append a frame and return its index
    ///
    /// The first frame binds the vertex count when nothing bound it yet; later
    /// frames must match it.
    pub fn add_frame(&mut self, frame: MorphAnimationFrame) -> Result<usize, AnimationError> {
        match self.vertex_count {
            Some(expected) if expected != frame.vertex_count() => {
                return Err(AnimationError::VertexCountMismatch {
                    expected,
                    found: frame.vertex_count(),
                });
            }
            Some(_) => {}
            None => self.vertex_count = Some(frame.vertex_count()),
        }
        self.frames.push(frame);
        Ok(self.frames.len() - 1)
    }

    /// Frame by index
    pub fn frame(&self, index: usize) -> Option<&MorphAnimationFrame> {
        self.frames.get(index)
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Vertex count every frame must have
    pub fn vertex_count(&self) -> Option<usize> {
        self.vertex_count
    }

    /// Frame playback is blending from; `None` before the first update
    pub fn current_frame(&self) -> Option<usize> {
        self.current_frame
    }

    /// Blend progress toward the next frame, in `[0, 1)`
    pub fn progress(&self) -> f32 {
        self.t
    }

    /// Number of poses built so far
    pub fn generated_pose_count(&self) -> usize {
        self.poses_generated
    }

    /// Number of poses in the cache
    pub fn cached_pose_count(&self) -> usize {
        self.poses.len()
    }

    /// Return to the first frame without changing playback state
    pub fn rewind(&mut self) {
        self.current_frame = None;
        self.t = 0.0;
        self.finished = false;
    }

    /// Whether playback ran to the last frame and stopped there
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Blend buffer for `(f0, f1)`, built on first use
    pub fn get_pose(&mut self, f0: usize, f1: usize) -> Result<&Pose, AnimationError> {
        if let Some(index) = self.poses.iter().position(|p| p.from == f0 && p.to == f1) {
            return Ok(&self.poses[index]);
        }
        let pose = self.generate_pose(f0, f1)?;
        self.poses.push(pose);
        self.poses_generated += 1;
        log::trace!("Morph '{}' built pose {f0}->{f1}", self.name);
        Ok(&self.poses[self.poses.len() - 1])
    }

    fn generate_pose(&self, f0: usize, f1: usize) -> Result<Pose, AnimationError> {
        let count = self.frames.len();
        let start = self.frames.get(f0).ok_or(AnimationError::FrameNotFound { index: f0, count })?;
        let end = self.frames.get(f1).ok_or(AnimationError::FrameNotFound { index: f1, count })?;
        let vertices = start
            .pose()
            .iter()
            .zip(end.pose())
            .map(|(a, b)| MorphVertex::new(*a, *b))
            .collect();
        Ok(Pose { from: f0, to: f1, vertices })
    }

    /// Target of the pair starting at `from`
    fn next_frame(&self, from: usize) -> usize {
        (from + 1) % self.frames.len()
    }

    /// Vertices of the current blend at the current progress
    pub fn current_vertices(&mut self) -> Option<Vec<Vertex>> {
        if self.frames.is_empty() {
            return None;
        }
        let from = self.current_frame.unwrap_or(0);
        let to = self.next_frame(from);
        let t = self.t;
        self.get_pose(from, to).ok().map(|pose| pose.sample(t))
    }
}

impl Animation for MorphAnimation {
    fn name(&self) -> &str {
        &self.name
    }

    fn playback(&self) -> &Playback {
        &self.playback
    }

    fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    fn update(&mut self, delta_time: f32) {
        if !self.playback.is_playing() || self.frames.len() < 2 {
            return;
        }
        let from = *self.current_frame.get_or_insert(0);
        let to = self.next_frame(from);
        let units = self.frames[to].units();
        if units > 0.0 {
            self.t += delta_time / units;
        } else {
            self.t = 1.0;
        }
        if self.t < 1.0 {
            return;
        }

        self.t = 0.0;
        self.current_frame = Some(to);
        if to == self.frames.len() - 1 && !self.playback.should_wrap() {
            log::debug!("Morph '{}' finished on frame {to}", self.name);
            self.finished = true;
            self.playback.stop();
        }
    }

    fn play(&mut self) {
        if self.finished {
            self.rewind();
        }
        self.playback.play();
    }

    fn bind_vertex_count(&mut self, count: usize) -> Result<(), AnimationError> {
        if let Some(frame) = self.frames.iter().find(|f| f.vertex_count() != count) {
            return Err(AnimationError::VertexCountMismatch {
                expected: count,
                found: frame.vertex_count(),
            });
        }
        self.vertex_count = Some(count);
        Ok(())
    }

    fn clone_boxed(&self) -> Box<dyn Animation> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame_at(x: f32, units: f32) -> MorphAnimationFrame {
        MorphAnimationFrame::new(
            vec![Vertex::at(Vec3::new(x, 0.0, 0.0)), Vertex::at(Vec3::new(x, 1.0, 0.0))],
            units,
        )
    }

    fn three_frames(mode: LoopMode) -> MorphAnimation {
        let mut anim = MorphAnimation::new("walk").with_loop_mode(mode);
        anim.add_frame(frame_at(0.0, 1.0)).unwrap();
        anim.add_frame(frame_at(2.0, 1.0)).unwrap();
        anim.add_frame(frame_at(4.0, 0.5)).unwrap();
        anim
    }

    #[test]
    fn test_pose_cache_reused() {
        let mut anim = three_frames(LoopMode::Once);
        let first = anim.get_pose(0, 1).unwrap().clone();
        let second = anim.get_pose(0, 1).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(anim.generated_pose_count(), 1);

        anim.get_pose(1, 0).unwrap();
        assert_eq!(anim.generated_pose_count(), 2);
        assert_eq!(anim.cached_pose_count(), 2);
    }

    #[test]
    fn test_missing_frame_is_error() {
        let mut anim = three_frames(LoopMode::Once);
        assert_eq!(
            anim.get_pose(0, 7).unwrap_err(),
            AnimationError::FrameNotFound { index: 7, count: 3 }
        );
        assert_eq!(anim.generated_pose_count(), 0);
    }

    #[test]
    fn test_frame_vertex_count_enforced() {
        let mut anim = three_frames(LoopMode::Once);
        let bad = MorphAnimationFrame::new(vec![Vertex::at(Vec3::zeros())], 1.0);
        assert_eq!(
            anim.add_frame(bad).unwrap_err(),
            AnimationError::VertexCountMismatch { expected: 2, found: 1 }
        );
        assert!(anim.bind_vertex_count(3).is_err());
        assert!(anim.bind_vertex_count(2).is_ok());
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let result = MorphAnimationFrame::from_attributes(
            &[Vec3::zeros(), Vec3::x()],
            &[Vec4::zeros()],
            &[Vec3::z(), Vec3::z()],
            &[Vec2::zeros(), Vec2::zeros()],
            1.0,
        );
        assert!(matches!(result, Err(AnimationError::AttributeLengthMismatch { colors: 1, .. })));
    }

    #[test]
    fn test_update_interpolates_between_frames() {
        let mut anim = three_frames(LoopMode::Once);
        anim.play();
        anim.update(0.25);
        let vertices = anim.current_vertices().unwrap();
        assert_relative_eq!(vertices[0].position.x, 0.5);
        assert_relative_eq!(vertices[1].position.y, 1.0);
    }

    #[test]
    fn test_plays_once_and_stops_on_last_frame() {
        let mut anim = three_frames(LoopMode::Once);
        anim.play();
        anim.update(1.0);
        assert_eq!(anim.current_frame(), Some(1));
        anim.update(0.5);
        assert_eq!(anim.current_frame(), Some(2));
        assert!(!anim.is_playing());

        let vertices = anim.current_vertices().unwrap();
        assert_relative_eq!(vertices[0].position.x, 4.0);
    }

    #[test]
    fn test_infinite_loop_wraps_to_first_frame() {
        let mut anim = three_frames(LoopMode::Infinite);
        anim.play();
        anim.update(1.0);
        anim.update(0.5);
        assert_eq!(anim.current_frame(), Some(2));
        assert!(anim.is_playing());
        anim.update(1.0);
        assert_eq!(anim.current_frame(), Some(0));
    }

    #[test]
    fn test_zero_units_completes_immediately() {
        let mut anim = MorphAnimation::new("snap");
        anim.add_frame(frame_at(0.0, 0.0)).unwrap();
        anim.add_frame(frame_at(1.0, 0.0)).unwrap();
        anim.play();
        anim.update(0.0);
        assert_eq!(anim.current_frame(), Some(1));
    }

    #[test]
    fn test_replay_after_finish_starts_from_first_frame() {
        let mut anim = three_frames(LoopMode::Once);
        anim.play();
        anim.update(1.0);
        anim.update(0.5);
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), Some(2));

        anim.play();
        assert!(!anim.is_finished());
        assert_eq!(anim.current_frame(), None);
        anim.update(0.25);
        assert_eq!(anim.current_frame(), Some(0));
        let vertices = anim.current_vertices().unwrap();
        assert_relative_eq!(vertices[0].position.x, 0.5);
    }

    #[test]
    fn test_resume_after_pause_keeps_position() {
        let mut anim = three_frames(LoopMode::Once);
        anim.play();
        anim.update(1.0);
        anim.pause();
        anim.play();
        assert_eq!(anim.current_frame(), Some(1));
    }

    #[test]
    fn test_paused_animation_does_not_advance() {
        let mut anim = three_frames(LoopMode::Once);
        anim.update(5.0);
        assert_eq!(anim.current_frame(), None);
        assert_relative_eq!(anim.progress(), 0.0);
    }
}
