//! Racing bodies ("characters") falling through the course

use plummet_math::Vec3;

/// A falling body in the race
///
/// Bodies are created at race start and live for the whole race; a
/// body that crosses the finish line is flagged `finished` and is
/// excluded from all further simulation (it neither moves nor is
/// struck), but its state is retained for the results display.
#[derive(Clone, Debug)]
pub struct Body {
    /// Position in course space (Y is vertical, gravity pulls -Y)
    pub position: Vec3,
    /// Velocity (units per second)
    pub velocity: Vec3,
    /// Collision radius (constant for the duration of a race)
    pub radius: f32,
    /// Set once when the body crosses the finish threshold
    pub finished: bool,
    /// 1-based finish order, assigned by the finish callback
    pub finish_rank: Option<u32>,
    /// Simulation time at which the body finished
    pub finish_time: Option<f32>,
}

impl Body {
    /// Create a body at the given position with the given radius
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            finished: false,
            finish_rank: None,
            finish_time: None,
        }
    }

    /// Set the initial velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Mark this body finished at the given simulation time
    ///
    /// The finish rank is assigned separately by the race session's
    /// finish callback, in call order.
    pub fn mark_finished(&mut self, time: f32) {
        self.finished = true;
        self.finish_time = Some(time);
    }
}
