//! Course obstacles
//!
//! Obstacles are lightweight data descriptions produced once at
//! course-build time. They are immutable during a race except for
//! animation state owned by the engine: spinner rotation and
//! moving-platform offset are functions of accumulated elapsed time,
//! and a launcher's last-fired timestamp is stamped on trigger.
//!
//! The course plane is XY (X lateral, Y vertical); Z is shallow depth.

use plummet_math::Vec3;
use serde::{Deserialize, Serialize};

/// Static circular obstacle causing a randomized elastic bounce
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Peg {
    pub position: Vec3,
    pub radius: f32,
}

impl Peg {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Rotating arm obstacle imparting tangential velocity on contact
///
/// The arm is a capsule of `half_length` by `half_thickness` spinning
/// in the course plane about its center.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Spinner {
    pub position: Vec3,
    pub half_length: f32,
    pub half_thickness: f32,
    /// Angular velocity in radians per second (sign is spin direction)
    pub spin_speed: f32,
    /// Initial angular phase in radians
    pub phase: f32,
}

impl Spinner {
    pub fn new(position: Vec3, half_length: f32, half_thickness: f32, spin_speed: f32) -> Self {
        Self {
            position,
            half_length,
            half_thickness,
            spin_speed,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Current rotation angle at the given elapsed simulation time
    pub fn angle(&self, elapsed: f32) -> f32 {
        elapsed * self.spin_speed + self.phase
    }
}

/// Horizontal barrier with a passable gap
///
/// The gap bounds are X offsets relative to the platform center; a
/// body whose relative X falls inside `[gap_start, gap_end]` passes
/// straight through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Platform {
    pub position: Vec3,
    pub half_width: f32,
    pub half_height: f32,
    pub half_depth: f32,
    pub gap_start: f32,
    pub gap_end: f32,
}

impl Platform {
    pub fn new(position: Vec3, half_width: f32, half_height: f32, half_depth: f32) -> Self {
        Self {
            position,
            half_width,
            half_height,
            half_depth,
            gap_start: 0.0,
            gap_end: 0.0,
        }
    }

    pub fn with_gap(mut self, gap_start: f32, gap_end: f32) -> Self {
        self.gap_start = gap_start;
        self.gap_end = gap_end;
        self
    }

    /// Center of the gap, relative to the platform center
    pub fn gap_center(&self) -> f32 {
        (self.gap_start + self.gap_end) * 0.5
    }
}

/// A [`Platform`] whose center oscillates laterally over time
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub platform: Platform,
    /// Oscillation rate in radians per second
    pub move_speed: f32,
    /// Lateral amplitude of the oscillation
    pub move_range: f32,
    /// Phase offset in radians
    pub move_phase: f32,
}

impl MovingPlatform {
    pub fn new(platform: Platform, move_speed: f32, move_range: f32, move_phase: f32) -> Self {
        Self {
            platform,
            move_speed,
            move_range,
            move_phase,
        }
    }

    /// Lateral center offset at the given elapsed simulation time
    pub fn offset_x(&self, elapsed: f32) -> f32 {
        (elapsed * self.move_speed + self.move_phase).sin() * self.move_range
    }
}

/// Circular obstacle that overwrites velocity with a strong outward launch
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Bumper {
    pub position: Vec3,
    pub radius: f32,
    pub bounce_force: f32,
}

impl Bumper {
    pub fn new(position: Vec3, radius: f32, bounce_force: f32) -> Self {
        Self {
            position,
            radius,
            bounce_force,
        }
    }
}

/// Angled directional wall reflecting only the normal velocity component
///
/// The wall surface runs along `(cos(angle), sin(angle))` in the
/// course plane for `half_width` either side of its position; the unit
/// normal is precomputed at construction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FunnelWall {
    pub position: Vec3,
    pub half_width: f32,
    pub angle: f32,
    pub normal: Vec3,
}

impl FunnelWall {
    pub fn new(position: Vec3, half_width: f32, angle: f32) -> Self {
        Self {
            position,
            half_width,
            angle,
            normal: Vec3::new(-angle.sin(), angle.cos(), 0.0),
        }
    }

    /// Unit direction along the wall surface
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.angle.cos(), self.angle.sin(), 0.0)
    }
}

/// Cooldown-gated trigger that overwrites velocity with a launch vector
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Launcher {
    pub position: Vec3,
    pub radius: f32,
    pub launch_force: f32,
    /// Launch direction in radians (0 = +X, pi/2 = straight up)
    pub launch_angle: f32,
    /// Seconds between triggers
    pub cooldown: f32,
    /// Simulation time of the last trigger; engine-owned
    #[serde(default)]
    pub last_fired: Option<f32>,
}

impl Launcher {
    pub fn new(position: Vec3, radius: f32, launch_force: f32, launch_angle: f32, cooldown: f32) -> Self {
        Self {
            position,
            radius,
            launch_force,
            launch_angle,
            cooldown,
            last_fired: None,
        }
    }

    /// Whether the launcher may fire at the given elapsed time
    pub fn ready(&self, elapsed: f32) -> bool {
        match self.last_fired {
            Some(t) => elapsed - t >= self.cooldown,
            None => true,
        }
    }
}

/// A course obstacle, tagged by variant
///
/// The narrow-phase dispatcher selects the collision routine with a
/// single exhaustive match over this enum.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Obstacle {
    Peg(Peg),
    Spinner(Spinner),
    Platform(Platform),
    MovingPlatform(MovingPlatform),
    Bumper(Bumper),
    FunnelWall(FunnelWall),
    Launcher(Launcher),
}

impl Obstacle {
    /// Course-space position of the obstacle's center
    pub fn position(&self) -> Vec3 {
        match self {
            Obstacle::Peg(p) => p.position,
            Obstacle::Spinner(s) => s.position,
            Obstacle::Platform(p) => p.position,
            Obstacle::MovingPlatform(mp) => mp.platform.position,
            Obstacle::Bumper(b) => b.position,
            Obstacle::FunnelWall(w) => w.position,
            Obstacle::Launcher(l) => l.position,
        }
    }
}
