//! Stuck detection and escalating recovery
//!
//! Each body carries a tracker that samples its position on a fixed
//! real-time interval. Displacement below a threshold accumulates
//! stuck time; enough of it triggers a gentle lateral nudge, and
//! prolonged stalls get a forced shove plus a vertical lift.
//!
//! Sampling runs on the *unscaled* frame delta, so slow motion does
//! not stretch the timings. While slow motion is active the tracker
//! is suppressed entirely: dramatic finishes are never interrupted by
//! an anti-stall impulse.

use plummet_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Vertical lift applied with a forced nudge
const FORCED_LIFT: f32 = 0.5;

/// Tunables for the stuck-recovery state machine
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StuckConfig {
    /// Real seconds between position samples
    pub check_interval: f32,
    /// Displacement below this between samples counts as stuck
    pub threshold_dist: f32,
    /// Accumulated stuck seconds before a gentle nudge
    pub gentle_time: f32,
    /// Accumulated stuck seconds before a forced nudge
    pub force_time: f32,
}

impl Default for StuckConfig {
    fn default() -> Self {
        Self {
            check_interval: 0.25,
            threshold_dist: 0.3,
            gentle_time: 1.0,
            force_time: 2.0,
        }
    }
}

/// Escalation level returned by the tracker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StuckAction {
    /// Small lateral jitter and a light downward impulse
    Gentle,
    /// Strong jitter, heavy downward impulse, and a vertical lift
    Forced,
}

/// Per-body stuck state: last sampled position, sample timer, and
/// accumulated stuck duration
#[derive(Clone, Copy, Debug)]
pub struct StuckTracker {
    last_position: Vec3,
    sample_timer: f32,
    stuck_duration: f32,
}

impl StuckTracker {
    pub fn new(position: Vec3) -> Self {
        Self {
            last_position: position,
            sample_timer: 0.0,
            stuck_duration: 0.0,
        }
    }

    /// Accumulated stuck seconds
    pub fn stuck_duration(&self) -> f32 {
        self.stuck_duration
    }

    /// Feed one frame of real (unscaled) time and the body's current
    /// position; returns the escalation due this frame, if any
    ///
    /// A forced nudge resets the accumulator; a gentle nudge does not,
    /// so gentle nudges repeat every sample until the body moves or
    /// escalation reaches the forced stage.
    pub fn observe(
        &mut self,
        position: Vec3,
        raw_dt: f32,
        slow_motion: bool,
        config: &StuckConfig,
    ) -> Option<StuckAction> {
        if slow_motion {
            self.sample_timer = 0.0;
            self.stuck_duration = 0.0;
            self.last_position = position;
            return None;
        }

        self.sample_timer += raw_dt;
        if self.sample_timer < config.check_interval {
            return None;
        }

        let window = self.sample_timer;
        self.sample_timer = 0.0;

        let moved = position.distance(self.last_position);
        self.last_position = position;

        if moved < config.threshold_dist {
            self.stuck_duration += window;
        } else {
            self.stuck_duration = 0.0;
            return None;
        }

        if self.stuck_duration >= config.force_time {
            self.stuck_duration = 0.0;
            Some(StuckAction::Forced)
        } else if self.stuck_duration >= config.gentle_time {
            Some(StuckAction::Gentle)
        } else {
            None
        }
    }
}

/// Apply the impulse for an escalation level to a body
pub fn apply_nudge(body: &mut Body, action: StuckAction, rng: &mut impl Rng) {
    match action {
        StuckAction::Gentle => {
            body.velocity.x += rng.gen_range(-2.0..2.0);
            body.velocity.y -= rng.gen_range(0.5..1.5);
        }
        StuckAction::Forced => {
            body.velocity.x += rng.gen_range(-4.0..4.0);
            body.velocity.y -= rng.gen_range(2.0..4.0);
            body.position.y += FORCED_LIFT;
        }
    }
}
