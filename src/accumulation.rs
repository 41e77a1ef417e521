use std::fmt;

use glam::{Vec2, Vec3};
use log::debug;

use crate::camera::CameraPose;
use crate::config::AccumulationConfig;
use crate::core::{Action, InputState};

/// Bounce budget never drops below this
pub const MIN_BOUNCES: i32 = 1;

/// Everything the shader needs for one frame, frozen after the controller update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Elapsed animation time, seconds
    pub time: f32,
    pub bounces: i32,
    /// Samples to trace this frame: 1 while moving, the target otherwise
    pub samples: i32,
    pub ray_origin: Vec3,
    pub forward_dir: Vec3,
    pub fov_deg: f32,
    /// Raw pointer position in window pixels
    pub mouse: Option<Vec2>,
}

impl fmt::Display for ParameterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Samples: {}, Bounces: {}", self.samples, self.bounces)
    }
}

/// Temporal rendering state: time, sample and bounce budgets, and the
/// invalidation of accumulated samples on camera motion.
#[derive(Debug, Clone)]
pub struct AccumulationController {
    elapsed_time: f32,
    bounce_budget: i32,
    sample_target: i32,
    min_samples: i32,
    frame_counter: i32,
    effective_samples: i32,
}

impl AccumulationController {
    pub fn new(config: &AccumulationConfig) -> Self {
        let min_samples = config.min_samples.clamp(0, 1);
        let sample_target = config.samples.max(min_samples);
        Self {
            elapsed_time: 0.0,
            bounce_budget: config.bounces.max(MIN_BOUNCES),
            sample_target,
            min_samples,
            frame_counter: 0,
            effective_samples: sample_target,
        }
    }

    /// Advance one frame and produce the parameter snapshot.
    ///
    /// Must run after the camera update of the same frame, whose `moved` flag it
    /// consumes. Bounce and sample adjustments fire when their key is released.
    ///
    /// # Panics
    ///
    /// If `delta_time` is not strictly positive.
    pub fn update(
        &mut self,
        delta_time: f32,
        moved: bool,
        input: &InputState,
        pose: CameraPose,
    ) -> ParameterSnapshot {
        assert!(delta_time > 0.0, "delta_time must be positive, got {delta_time}");

        if !input.held(Action::FreezeTime) {
            self.elapsed_time += delta_time;
        }

        let bounce_budget = Self::adjust(
            self.bounce_budget,
            input,
            Action::BouncesDecrease,
            Action::BouncesIncrease,
        )
        .max(MIN_BOUNCES);
        let sample_target = Self::adjust(
            self.sample_target,
            input,
            Action::SamplesDecrease,
            Action::SamplesIncrease,
        )
        .max(self.min_samples);

        if bounce_budget != self.bounce_budget || sample_target != self.sample_target {
            debug!(
                "Bounces {} -> {}, samples {} -> {}",
                self.bounce_budget, bounce_budget, self.sample_target, sample_target
            );
        }
        self.bounce_budget = bounce_budget;
        self.sample_target = sample_target;

        if moved {
            self.frame_counter = 0;
        } else {
            self.frame_counter = self.frame_counter.saturating_add(1);
        }
        self.effective_samples = if moved { 1 } else { self.sample_target };

        ParameterSnapshot {
            time: self.elapsed_time,
            bounces: self.bounce_budget,
            samples: self.effective_samples,
            ray_origin: pose.position,
            forward_dir: pose.forward,
            fov_deg: pose.fov_deg,
            mouse: input.pointer_position(),
        }
    }

    /// Drop accumulated frames without a camera move, e.g. after a resize
    pub fn invalidate(&mut self) {
        self.frame_counter = 0;
    }

    fn adjust(value: i32, input: &InputState, decrease: Action, increase: Action) -> i32 {
        if input.released(decrease) {
            value.saturating_sub(1)
        } else if input.released(increase) {
            value.saturating_add(1)
        } else {
            value
        }
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn bounce_budget(&self) -> i32 {
        self.bounce_budget
    }

    pub fn sample_target(&self) -> i32 {
        self.sample_target
    }

    /// Frames accumulated since the last invalidation
    pub fn frame_counter(&self) -> i32 {
        self.frame_counter
    }

    pub fn effective_samples(&self) -> i32 {
        self.effective_samples
    }
}

impl Default for AccumulationController {
    fn default() -> Self {
        Self::new(&AccumulationConfig::default())
    }
}
