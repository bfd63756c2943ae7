use serde::{Deserialize, Serialize};

use crate::animation::AnimationStatus;
use crate::core::AnimationId;

/// Tuning for [`TransitionPlayback`]; units are pixels and milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackTuning {
    /// Speed cap in units per millisecond.
    pub max_velocity: f64,
    /// Speed gained or lost per millisecond.
    pub acceleration: f64,
    /// Remaining distances at or below this snap onto the target.
    pub snap_distance: f64,
}

impl Default for PlaybackTuning {
    fn default() -> Self {
        Self {
            max_velocity: 2.0,
            acceleration: 0.02,
            snap_distance: 0.5,
        }
    }
}

/// Velocity/acceleration pursuit of a target that may keep moving.
///
/// Speeds up while far away, brakes once the remaining distance fits in the
/// braking distance and never overshoots. Retargeting against the current
/// direction of motion drops the velocity so the follower turns around without
/// drifting past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlayback {
    id: AnimationId,
    position: f64,
    target: f64,
    velocity: f64,
    tuning: PlaybackTuning,
    status: AnimationStatus,
}

impl TransitionPlayback {
    #[must_use]
    pub fn new(id: AnimationId, position: f64, tuning: PlaybackTuning) -> Self {
        Self {
            id,
            position,
            target: position,
            velocity: 0.0,
            tuning,
            status: AnimationStatus::Finished,
        }
    }

    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == AnimationStatus::Running
    }

    /// Moves the goal; motion continues from the current state.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (target - self.position) * self.velocity < 0.0 {
            self.velocity = 0.0;
        }
        self.target = target;
        self.status = AnimationStatus::Running;
    }

    /// Places the follower on `position` at rest.
    pub fn jump_to(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.status = AnimationStatus::Finished;
    }

    pub fn cancel(&mut self) -> AnimationStatus {
        if self.status == AnimationStatus::Running {
            self.velocity = 0.0;
            self.status = AnimationStatus::Cancelled;
        }
        self.status
    }

    /// Advances by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f64) -> AnimationStatus {
        if self.status != AnimationStatus::Running {
            return self.status;
        }
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };

        let remaining = self.target - self.position;
        let distance = remaining.abs();
        if distance <= self.tuning.snap_distance {
            return self.arrive();
        }

        let direction = remaining.signum();
        let mut speed = if self.velocity * direction > 0.0 {
            self.velocity.abs()
        } else {
            0.0
        };
        let acceleration = self.tuning.acceleration.max(f64::EPSILON);
        let braking_distance = speed * speed / (2.0 * acceleration);
        if distance <= braking_distance {
            speed = (speed - acceleration * delta_ms).max(acceleration * delta_ms);
        } else {
            speed = (speed + acceleration * delta_ms).min(self.tuning.max_velocity);
        }

        let travel = speed * delta_ms;
        if travel >= distance {
            return self.arrive();
        }
        self.position += direction * travel;
        self.velocity = direction * speed;
        AnimationStatus::Running
    }

    fn arrive(&mut self) -> AnimationStatus {
        self.position = self.target;
        self.velocity = 0.0;
        self.status = AnimationStatus::Finished;
        self.status
    }
}
