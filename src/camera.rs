use glam::{Mat4, Vec2, Vec3};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::core::{Action, InputState};
use crate::math::{self, WORLD_UP};
use crate::traits::CursorMode;

/// How pointer motion turns into a new look direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Pitch about the local right axis composed with yaw about world up, as one quaternion
    #[default]
    Composed,
    /// Heading/elevation only, elevation clamped short of the poles
    Constrained,
}

/// Behavioural switches of the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOptions {
    pub rotation: RotationMode,
    pub fov_mutable: bool,
    pub ray_cache: bool,
    /// World units per second
    pub move_speed: f32,
    /// Degrees per zoom press
    pub fov_step: f32,
    pub fov_min: f32,
    pub fov_max: f32,
    /// Elevation limit for [`RotationMode::Constrained`], degrees
    pub max_pitch_deg: f32,
}

impl From<&CameraConfig> for CameraOptions {
    fn from(config: &CameraConfig) -> Self {
        Self {
            rotation: config.rotation,
            fov_mutable: config.fov_mutable,
            ray_cache: config.ray_cache,
            move_speed: config.move_speed,
            fov_step: config.fov_step,
            fov_min: config.fov_min,
            fov_max: config.fov_max,
            max_pitch_deg: config.max_pitch_deg,
        }
    }
}

/// Position, look direction and field of view at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub fov_deg: f32,
}

/// Result of one [`Camera::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraUpdate {
    /// Pose changed this frame; accumulated samples are stale
    pub moved: bool,
    /// Pointer mode the window should apply
    pub cursor: CursorMode,
}

/// One world-space ray direction per pixel, row-major, origin at the camera.
///
/// Recomputed into a scratch buffer and swapped in only once every pixel is
/// written; both buffers keep their capacity across resizes.
#[derive(Debug, Clone, Default)]
pub struct RayDirections {
    width: u32,
    height: u32,
    directions: Vec<Vec3>,
    scratch: Vec<Vec3>,
}

impl RayDirections {
    fn recompute(&mut self, width: u32, height: u32, inverse_projection: Mat4, inverse_view: Mat4) {
        let len = width as usize * height as usize;
        self.scratch.clear();
        self.scratch.resize(len, Vec3::ZERO);

        self.scratch
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, dir) in row.iter_mut().enumerate() {
                    let ndc = math::pixel_to_ndc(x as u32, y as u32, width, height);
                    *dir = math::unproject_direction(&inverse_projection, &inverse_view, ndc);
                }
            });

        std::mem::swap(&mut self.directions, &mut self.scratch);
        self.width = width;
        self.height = height;
        trace!("Ray directions recomputed for {}x{}", width, height);
    }

    fn clear(&mut self) {
        self.directions.clear();
        self.scratch.clear();
        self.width = 0;
        self.height = 0;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Direction for pixel `(x, y)`
    pub fn get(&self, x: u32, y: u32) -> Option<Vec3> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.directions
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.directions
    }
}

/// Which derived values are out of date
#[derive(Debug, Clone, Copy, Default)]
struct Dirty {
    view: bool,
    projection: bool,
    rays: bool,
}

impl Dirty {
    fn all() -> Self {
        Self {
            view: true,
            projection: true,
            rays: true,
        }
    }
}

/// Free-fly perspective camera.
///
/// Every mutation marks the affected derived values dirty and ends with
/// [`Camera::refresh`], so matrices and the ray cache are never observed stale.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    fov_deg: f32,
    near_clip: f32,
    far_clip: f32,
    rotation_speed: f32,
    viewport_width: u32,
    viewport_height: u32,
    options: CameraOptions,

    view: Mat4,
    inverse_view: Mat4,
    projection: Mat4,
    inverse_projection: Mat4,
    rays: RayDirections,
    dirty: Dirty,
}

impl Camera {
    /// Camera from configuration with an initial viewport.
    ///
    /// Zero dimensions are raised to 1 so the projection is always defined.
    pub fn new(config: &CameraConfig, viewport_width: u32, viewport_height: u32) -> Self {
        let options = CameraOptions::from(config);
        let forward = Vec3::from_array(config.forward)
            .try_normalize()
            .filter(|f| math::right_of(*f).is_some())
            .unwrap_or(Vec3::NEG_Z);

        let mut camera = Self {
            position: Vec3::from_array(config.position),
            forward,
            fov_deg: config.fov_deg.clamp(options.fov_min, options.fov_max),
            near_clip: config.near_clip,
            far_clip: config.far_clip,
            rotation_speed: config.rotation_speed,
            viewport_width: viewport_width.max(1),
            viewport_height: viewport_height.max(1),
            options,
            view: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
            rays: RayDirections::default(),
            dirty: Dirty::all(),
        };
        camera.refresh();
        camera
    }

    /// Advance one frame of navigation.
    ///
    /// Movement keys translate along forward/right/up at `move_speed`; within each
    /// axis the first-listed action wins. Zoom reacts to presses only. Rotation
    /// needs the look action held and a nonzero pointer delta.
    ///
    /// # Panics
    ///
    /// If `delta_time` is not strictly positive.
    pub fn update(&mut self, delta_time: f32, input: &InputState) -> CameraUpdate {
        assert!(delta_time > 0.0, "delta_time must be positive, got {delta_time}");

        let step = self.options.move_speed * delta_time;
        let mut moved = false;

        if input.held(Action::MoveForward) {
            self.position += self.forward * step;
            moved = true;
        } else if input.held(Action::MoveBack) {
            self.position -= self.forward * step;
            moved = true;
        }

        if let Some(right) = math::right_of(self.forward) {
            if input.held(Action::MoveLeft) {
                self.position -= right * step;
                moved = true;
            } else if input.held(Action::MoveRight) {
                self.position += right * step;
                moved = true;
            }
        }

        if input.held(Action::MoveDown) {
            self.position -= WORLD_UP * step;
            moved = true;
        } else if input.held(Action::MoveUp) {
            self.position += WORLD_UP * step;
            moved = true;
        }

        if self.options.fov_mutable {
            let fov_delta = if input.pressed(Action::FovDecrease) {
                -self.options.fov_step
            } else if input.pressed(Action::FovIncrease) {
                self.options.fov_step
            } else {
                0.0
            };
            if fov_delta != 0.0 && self.apply_fov(self.fov_deg + fov_delta) {
                moved = true;
            }
        }

        let cursor = if input.held(Action::Look) {
            CursorMode::Captured
        } else {
            CursorMode::Free
        };

        if cursor == CursorMode::Captured && self.rotate(input.pointer_delta()) {
            moved = true;
        }

        if moved {
            self.dirty.view = true;
            self.refresh();
        }

        CameraUpdate { moved, cursor }
    }

    /// Track a new render target size.
    ///
    /// Unchanged or empty sizes are ignored. Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.viewport_width && height == self.viewport_height {
            return false;
        }
        if width == 0 || height == 0 {
            debug!("Ignoring degenerate viewport {}x{}", width, height);
            return false;
        }

        self.viewport_width = width;
        self.viewport_height = height;
        self.dirty.projection = true;
        self.refresh();
        true
    }

    /// Set the vertical field of view, clamped to the configured range.
    /// Returns whether the value changed.
    pub fn set_fov(&mut self, fov_deg: f32) -> bool {
        let changed = self.apply_fov(fov_deg);
        self.refresh();
        changed
    }

    pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
        self.rotation_speed = rotation_speed;
    }

    /// Switch the per-pixel ray cache on or off
    pub fn set_ray_cache(&mut self, enabled: bool) {
        if self.options.ray_cache == enabled {
            return;
        }
        self.options.ray_cache = enabled;
        if enabled {
            self.dirty.rays = true;
            self.refresh();
        } else {
            self.rays.clear();
        }
    }

    /// Recompute whatever is dirty: projection, then view, then rays
    fn refresh(&mut self) {
        if self.dirty.projection {
            match math::perspective(
                self.fov_deg,
                self.viewport_width,
                self.viewport_height,
                self.near_clip,
                self.far_clip,
            ) {
                Some(projection) => {
                    self.projection = projection;
                    self.inverse_projection = projection.inverse();
                }
                None => debug!("Projection undefined, keeping previous matrices"),
            }
            self.dirty.projection = false;
            self.dirty.rays = true;
        }

        if self.dirty.view {
            self.view = Mat4::look_at_rh(self.position, self.position + self.forward, WORLD_UP);
            self.inverse_view = self.view.inverse();
            self.dirty.view = false;
            self.dirty.rays = true;
        }

        if self.dirty.rays {
            if self.options.ray_cache {
                self.rays.recompute(
                    self.viewport_width,
                    self.viewport_height,
                    self.inverse_projection,
                    self.inverse_view,
                );
            }
            self.dirty.rays = false;
        }
    }

    fn apply_fov(&mut self, fov_deg: f32) -> bool {
        let fov_deg = fov_deg.clamp(self.options.fov_min, self.options.fov_max);
        if fov_deg == self.fov_deg {
            return false;
        }
        self.fov_deg = fov_deg;
        self.dirty.projection = true;
        true
    }

    fn rotate(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }

        let pitch_delta = -delta.y * self.rotation_speed;
        let yaw_delta = -delta.x * self.rotation_speed;

        let candidate = match self.options.rotation {
            RotationMode::Composed => {
                let Some(right) = math::right_of(self.forward) else {
                    debug!("Forward parallel to world up, rotation skipped");
                    return false;
                };
                math::rotate(math::compose_pitch_yaw(right, pitch_delta, yaw_delta), self.forward)
            }
            RotationMode::Constrained => math::constrained_pitch_yaw(
                self.forward,
                pitch_delta,
                yaw_delta,
                self.options.max_pitch_deg,
            ),
        };

        if !candidate.is_finite() || math::right_of(candidate).is_none() {
            debug!("Rotation would align forward with world up, skipped");
            return false;
        }

        self.forward = candidate;
        true
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit right vector, `None` only in the degenerate vertical case
    pub fn right(&self) -> Option<Vec3> {
        math::right_of(self.forward)
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            forward: self.forward,
            fov_deg: self.fov_deg,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.inverse_view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn inverse_projection_matrix(&self) -> Mat4 {
        self.inverse_projection
    }

    /// Cached per-pixel directions; empty when the cache is disabled
    pub fn ray_directions(&self) -> &RayDirections {
        &self.rays
    }

    /// Cached direction for one pixel
    pub fn ray_direction(&self, x: u32, y: u32) -> Option<Vec3> {
        self.rays.get(x, y)
    }
}
