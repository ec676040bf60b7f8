//! Demo course builder for the headless runner
//!
//! Course generation for real races lives with the game layout tools;
//! this builder just lays out a fixed course dense enough to exercise
//! every obstacle variant the engine supports.

use plummet_math::Vec3;
use plummet_physics::{
    Bumper, FunnelWall, Launcher, MovingPlatform, Obstacle, Peg, Platform, RaceConfig, Spinner,
};

/// Build the demo catalog between `top_y` and the configured finish line
pub fn build_course(config: &RaceConfig, top_y: f32) -> Vec<Obstacle> {
    let w = config.half_width;
    let bottom = config.finish_y;
    let span = top_y - bottom;
    let level = |fraction: f32| bottom + span * fraction;

    let mut obstacles = Vec::new();

    // Funnel mouth just under the spawn area, narrowing toward center
    obstacles.push(Obstacle::FunnelWall(FunnelWall::new(
        Vec3::new(-w * 0.6, level(0.88), 0.0),
        w * 0.45,
        -0.5,
    )));
    obstacles.push(Obstacle::FunnelWall(FunnelWall::new(
        Vec3::new(w * 0.6, level(0.88), 0.0),
        w * 0.45,
        0.5,
    )));

    // Staggered peg field
    for row in 0..5 {
        let y = level(0.78 - row as f32 * 0.06);
        let offset = if row % 2 == 0 { 0.0 } else { w * 0.2 };
        let mut x = -w * 0.8 + offset;
        while x <= w * 0.8 {
            obstacles.push(Obstacle::Peg(Peg::new(Vec3::new(x, y, 0.0), 0.3)));
            x += w * 0.4;
        }
    }

    // A pair of counter-rotating spinners
    obstacles.push(Obstacle::Spinner(Spinner::new(
        Vec3::new(-w * 0.4, level(0.42), 0.0),
        w * 0.3,
        0.2,
        3.0,
    )));
    obstacles.push(Obstacle::Spinner(
        Spinner::new(Vec3::new(w * 0.4, level(0.42), 0.0), w * 0.3, 0.2, -3.0)
            .with_phase(std::f32::consts::FRAC_PI_2),
    ));

    // Bumpers guarding the midsection
    obstacles.push(Obstacle::Bumper(Bumper::new(
        Vec3::new(-w * 0.55, level(0.32), 0.0),
        0.8,
        18.0,
    )));
    obstacles.push(Obstacle::Bumper(Bumper::new(
        Vec3::new(w * 0.55, level(0.32), 0.0),
        0.8,
        18.0,
    )));

    // Oscillating gapped platform
    let moving = Platform::new(Vec3::new(0.0, level(0.24), 0.0), w * 0.5, 0.25, config.half_depth)
        .with_gap(-1.0, 1.0);
    obstacles.push(Obstacle::MovingPlatform(MovingPlatform::new(
        moving,
        0.8,
        w * 0.3,
        0.0,
    )));

    // Launcher that periodically flings a straggler back up
    obstacles.push(Obstacle::Launcher(Launcher::new(
        Vec3::new(0.0, level(0.16), 0.0),
        0.9,
        16.0,
        std::f32::consts::FRAC_PI_2 * 1.1,
        4.0,
    )));

    // Full-width gapped platform as the final gate
    obstacles.push(Obstacle::Platform(
        Platform::new(Vec3::new(0.0, level(0.08), 0.0), w * 0.9, 0.25, config.half_depth)
            .with_gap(-0.8, 0.8),
    ));

    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_covers_every_variant() {
        let config = RaceConfig::default();
        let obstacles = build_course(&config, 40.0);

        let has = |pred: fn(&Obstacle) -> bool| obstacles.iter().any(pred);
        assert!(has(|o| matches!(o, Obstacle::Peg(_))));
        assert!(has(|o| matches!(o, Obstacle::Spinner(_))));
        assert!(has(|o| matches!(o, Obstacle::Platform(_))));
        assert!(has(|o| matches!(o, Obstacle::MovingPlatform(_))));
        assert!(has(|o| matches!(o, Obstacle::Bumper(_))));
        assert!(has(|o| matches!(o, Obstacle::FunnelWall(_))));
        assert!(has(|o| matches!(o, Obstacle::Launcher(_))));
    }

    #[test]
    fn test_course_fits_play_volume() {
        let config = RaceConfig::default();
        let top_y = 40.0;
        for obstacle in build_course(&config, top_y) {
            let pos = obstacle.position();
            assert!(pos.x.abs() <= config.half_width);
            assert!(pos.y > config.finish_y && pos.y < top_y);
        }
    }
}
