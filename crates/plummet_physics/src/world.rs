//! Race world and per-tick simulation

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::Body;
use crate::collision;
use crate::obstacle::Obstacle;
use crate::stuck::{self, StuckConfig, StuckTracker};

/// Tunables for the race simulation
#[derive(Clone, Debug)]
pub struct RaceConfig {
    /// Gravity acceleration magnitude (pulls -Y)
    pub gravity: f32,
    /// Bounce energy retention for reflected velocity
    pub restitution: f32,
    /// Horizontal damping applied on platform landings
    pub friction: f32,
    /// Hard cap on speed magnitude
    pub max_velocity: f32,
    /// Pull toward a platform's gap center after a landing
    pub gap_seek_force: f32,
    /// Lateral half-extent of the play volume
    pub half_width: f32,
    /// Depth half-extent of the play volume
    pub half_depth: f32,
    /// Bodies below this Y are finished
    pub finish_y: f32,
    /// Upper bound on a single integration step
    pub max_dt: f32,
    /// Stuck-recovery tunables
    pub stuck: StuckConfig,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            restitution: 0.5,
            friction: 0.8,
            max_velocity: 15.0,
            gap_seek_force: 2.0,
            half_width: 6.0,
            half_depth: 2.0,
            finish_y: 0.0,
            max_dt: 0.05,
            stuck: StuckConfig::default(),
        }
    }
}

/// The race world: obstacle catalog, body roster, and per-body stuck
/// trackers in a parallel array
///
/// Bodies are indexed by their roster position, which is stable for
/// the lifetime of a race: bodies are never removed, only flagged
/// finished.
pub struct RaceWorld {
    /// Simulation configuration
    pub config: RaceConfig,
    obstacles: Vec<Obstacle>,
    bodies: Vec<Body>,
    trackers: Vec<StuckTracker>,
    elapsed: f32,
    rng: StdRng,
}

impl RaceWorld {
    /// Create a world seeded from OS entropy
    pub fn new(config: RaceConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create a world with a fixed seed, for reproducible runs
    pub fn with_seed(config: RaceConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: RaceConfig, rng: StdRng) -> Self {
        Self {
            config,
            obstacles: Vec::new(),
            bodies: Vec::new(),
            trackers: Vec::new(),
            elapsed: 0.0,
            rng,
        }
    }

    /// Append an obstacle to the catalog
    ///
    /// Catalog order is collision order: within a tick, a later
    /// obstacle's correction can overwrite an earlier one's.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Immutable view of the obstacle catalog
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Add a body to the roster and return its index
    pub fn add_body(&mut self, body: Body) -> usize {
        self.trackers.push(StuckTracker::new(body.position));
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Get a body by roster index
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Get a mutable body by roster index
    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Immutable view of the roster
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of bodies in the roster
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether every body has finished
    pub fn all_finished(&self) -> bool {
        self.bodies.iter().all(|b| b.finished)
    }

    /// Accumulated simulation time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulated stuck seconds for a body, for debug display
    pub fn stuck_duration(&self, index: usize) -> Option<f32> {
        self.trackers.get(index).map(|t| t.stuck_duration())
    }

    /// Advance the simulation by one tick
    ///
    /// `dt` is the (possibly slow-motion-scaled) simulation delta and
    /// drives integration and collision response; `raw_dt` is the
    /// unscaled frame delta and drives only the stuck trackers.
    ///
    /// For every body that crosses the finish threshold during this
    /// call, `on_finish` is invoked exactly once, synchronously, in
    /// roster order, after all other processing for that body; the
    /// callback is expected to assign the finish rank.
    ///
    /// Per active body: gravity, Euler integration, obstacle
    /// collisions in catalog order, then (across the roster) body-body
    /// collisions, then boundary clamp, velocity cap, stuck check and
    /// finish check. Finished bodies are skipped everywhere.
    pub fn step<F>(&mut self, dt: f32, raw_dt: f32, slow_motion: bool, mut on_finish: F)
    where
        F: FnMut(usize, &mut Body),
    {
        // A single Euler sub-step tunnels through thin geometry at
        // large deltas, so the step is clamped rather than subdivided
        let dt = dt.min(self.config.max_dt);
        self.elapsed += dt;

        let count = self.bodies.len();

        // Phase 1: gravity, integration, obstacle collisions
        for body in &mut self.bodies {
            if body.finished {
                continue;
            }

            body.velocity.y -= self.config.gravity * dt;
            body.position += body.velocity * dt;

            for obstacle in &mut self.obstacles {
                collision::resolve_obstacle(body, obstacle, self.elapsed, &self.config, &mut self.rng);
            }
        }

        // Phase 2: body-body collisions, all pairs in roster order
        for i in 0..count {
            if self.bodies[i].finished {
                continue;
            }
            for j in (i + 1)..count {
                if self.bodies[j].finished {
                    continue;
                }
                let (head, tail) = self.bodies.split_at_mut(j);
                collision::resolve_body_pair(&mut head[i], &mut tail[0], self.config.restitution);
            }
        }

        // Phase 3: containment, governor, stuck recovery, finish
        for i in 0..count {
            let body = &mut self.bodies[i];
            if body.finished {
                continue;
            }

            collision::contain_in_bounds(body, &self.config);
            collision::govern_velocity(body, &self.config);

            if let Some(action) = self.trackers[i].observe(body.position, raw_dt, slow_motion, &self.config.stuck) {
                log::debug!("body {i} stalled, applying {action:?} nudge");
                stuck::apply_nudge(body, action, &mut self.rng);
            }

            if body.position.y < self.config.finish_y {
                body.mark_finished(self.elapsed);
                log::info!("body {i} finished at {:.2}s", self.elapsed);
                on_finish(i, body);
            }
        }
    }
}
