//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PLM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use plummet_physics::{RaceConfig, StuckConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics engine configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Stuck-recovery configuration
    #[serde(default)]
    pub stuck: StuckRecoveryConfig,
    /// Race session configuration
    #[serde(default)]
    pub race: RaceSessionConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PLM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PLM_PHYSICS__GRAVITY=12.0 -> physics.gravity = 12.0
        figment = figment.merge(Env::prefixed("PLM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Map the `[physics]` and `[stuck]` tables onto the engine config
    pub fn to_race_config(&self) -> RaceConfig {
        RaceConfig {
            gravity: self.physics.gravity,
            restitution: self.physics.restitution,
            friction: self.physics.friction,
            max_velocity: self.physics.max_velocity,
            gap_seek_force: self.physics.gap_seek_force,
            half_width: self.physics.half_width,
            half_depth: self.physics.half_depth,
            finish_y: self.physics.finish_y,
            max_dt: self.physics.max_dt,
            stuck: StuckConfig {
                check_interval: self.stuck.check_interval,
                threshold_dist: self.stuck.threshold_dist,
                gentle_time: self.stuck.gentle_time,
                force_time: self.stuck.force_time,
            },
        }
    }
}

/// Physics engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration magnitude
    pub gravity: f32,
    /// Bounce energy retention
    pub restitution: f32,
    /// Horizontal damping on platform landings
    pub friction: f32,
    /// Speed cap
    pub max_velocity: f32,
    /// Pull toward platform gap centers after a landing
    pub gap_seek_force: f32,
    /// Lateral half-extent of the play volume
    pub half_width: f32,
    /// Depth half-extent of the play volume
    pub half_depth: f32,
    /// Finish line Y coordinate
    pub finish_y: f32,
    /// Upper bound on a single integration step
    pub max_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let engine = RaceConfig::default();
        Self {
            gravity: engine.gravity,
            restitution: engine.restitution,
            friction: engine.friction,
            max_velocity: engine.max_velocity,
            gap_seek_force: engine.gap_seek_force,
            half_width: engine.half_width,
            half_depth: engine.half_depth,
            finish_y: engine.finish_y,
            max_dt: engine.max_dt,
        }
    }
}

/// Stuck-recovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StuckRecoveryConfig {
    /// Real seconds between position samples
    pub check_interval: f32,
    /// Displacement below this between samples counts as stuck
    pub threshold_dist: f32,
    /// Accumulated stuck seconds before a gentle nudge
    pub gentle_time: f32,
    /// Accumulated stuck seconds before a forced nudge
    pub force_time: f32,
}

impl Default for StuckRecoveryConfig {
    fn default() -> Self {
        let engine = StuckConfig::default();
        Self {
            check_interval: engine.check_interval,
            threshold_dist: engine.threshold_dist,
            gentle_time: engine.gentle_time,
            force_time: engine.force_time,
        }
    }
}

/// Race session configuration for the headless runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSessionConfig {
    /// Number of racing bodies
    pub bodies: u32,
    /// Body collision radius
    pub body_radius: f32,
    /// Spawn height above the finish line
    pub spawn_height: f32,
    /// Simulation ticks per second
    pub tick_rate: f32,
    /// Time-scale multiplier applied to dt while slow motion is active
    pub slow_motion_scale: f32,
    /// Slow motion activates when the leader is within this distance
    /// of the finish line
    pub slow_motion_window: f32,
    /// Give up on a race after this many simulated seconds
    pub timeout: f32,
    /// Fixed RNG seed; omit for a fresh race every run
    pub seed: Option<u64>,
}

impl Default for RaceSessionConfig {
    fn default() -> Self {
        Self {
            bodies: 6,
            body_radius: 0.5,
            spawn_height: 40.0,
            tick_rate: 60.0,
            slow_motion_scale: 0.25,
            slow_motion_window: 3.0,
            timeout: 180.0,
            seed: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
