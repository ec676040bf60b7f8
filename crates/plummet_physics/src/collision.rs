//! Narrow-phase collision detection and response
//!
//! One routine per obstacle variant, selected by [`resolve_obstacle`].
//! Routines both detect and respond: they push the body out of the
//! obstacle and adjust its velocity in place. Responses are tuned for
//! gameplay feel rather than physical accuracy, with small randomized
//! jitter so repeated races diverge.
//!
//! Every circle-based test carries the same epsilon guard: a body
//! whose center (nearly) coincides with the obstacle center is left
//! alone for the tick, since no contact normal exists there.

use plummet_math::Vec3;
use rand::Rng;

use crate::body::Body;
use crate::obstacle::{Bumper, FunnelWall, Launcher, Obstacle, Peg, Platform, Spinner};
use crate::world::RaceConfig;

/// Below this separation no contact normal is computable; skip the tick
pub const MIN_SEPARATION: f32 = 0.001;

/// Spinner push-out is slightly overscaled so the arm sheds bodies
const SPINNER_PUSH_SCALE: f32 = 1.1;

/// Scales spin speed into tangential contact velocity
const SPINNER_TANGENT_FACTOR: f32 = 1.5;

/// Per-tick damping of depth velocity, keeping the race near the course plane
const Z_DAMPING: f32 = 0.95;

/// Route a body/obstacle pair to the variant's collision routine
pub fn resolve_obstacle(
    body: &mut Body,
    obstacle: &mut Obstacle,
    elapsed: f32,
    config: &RaceConfig,
    rng: &mut impl Rng,
) {
    match obstacle {
        Obstacle::Peg(peg) => collide_peg(body, peg, config, rng),
        Obstacle::Spinner(spinner) => collide_spinner(body, spinner, elapsed, config, rng),
        Obstacle::Platform(platform) => collide_platform(body, platform, 0.0, config, rng),
        Obstacle::MovingPlatform(moving) => {
            let offset = moving.offset_x(elapsed);
            collide_platform(body, &moving.platform, offset, config, rng);
        }
        Obstacle::Bumper(bumper) => collide_bumper(body, bumper, rng),
        Obstacle::FunnelWall(wall) => collide_funnel_wall(body, wall, config),
        Obstacle::Launcher(launcher) => collide_launcher(body, launcher, elapsed, rng),
    }
}

/// Circle vs circle in the course plane with a randomized bounce
pub fn collide_peg(body: &mut Body, peg: &Peg, config: &RaceConfig, rng: &mut impl Rng) {
    let dx = body.position.x - peg.position.x;
    let dy = body.position.y - peg.position.y;
    let dist = (dx * dx + dy * dy).sqrt();
    let r = peg.radius + body.radius;
    if dist <= MIN_SEPARATION || dist >= r {
        return;
    }

    let nx = dx / dist;
    let ny = dy / dist;

    // Push out to exact contact distance
    body.position.x = peg.position.x + nx * r;
    body.position.y = peg.position.y + ny * r;

    let closing = body.velocity.x * nx + body.velocity.y * ny;
    if closing < 0.0 {
        let scale = config.restitution * rng.gen_range(0.85..1.15);
        body.velocity.x -= 2.0 * closing * nx;
        body.velocity.y -= 2.0 * closing * ny;
        body.velocity.x *= scale;
        body.velocity.y *= scale;
        body.velocity.x += rng.gen_range(-0.5..0.5);
    }
}

/// Rotating capsule arm: push out and impart tangential velocity
pub fn collide_spinner(
    body: &mut Body,
    spinner: &Spinner,
    elapsed: f32,
    config: &RaceConfig,
    rng: &mut impl Rng,
) {
    let rel = body.position - spinner.position;
    let (sin, cos) = spinner.angle(elapsed).sin_cos();

    // Into the arm's rotated frame
    let local_x = rel.x * cos + rel.y * sin;
    let local_y = -rel.x * sin + rel.y * cos;

    // Nearest point on the arm segment
    let arm_x = local_x.clamp(-spinner.half_length, spinner.half_length);
    let arm_y = local_y.clamp(-spinner.half_thickness, spinner.half_thickness);

    let dx = local_x - arm_x;
    let dy = local_y - arm_y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= MIN_SEPARATION || dist >= body.radius {
        return;
    }

    // Contact normal back in world space
    let local_nx = dx / dist;
    let local_ny = dy / dist;
    let nx = local_nx * cos - local_ny * sin;
    let ny = local_nx * sin + local_ny * cos;

    let push = (body.radius - dist) * SPINNER_PUSH_SCALE;
    body.position.x += nx * push;
    body.position.y += ny * push;

    let closing = body.velocity.x * nx + body.velocity.y * ny;
    if closing < 0.0 {
        body.velocity.x -= 2.0 * closing * nx;
        body.velocity.y -= 2.0 * closing * ny;
        body.velocity.x *= config.restitution;
        body.velocity.y *= config.restitution;

        // Kick along the arm's direction of travel at the contact
        let tangent = Vec3::new(-rel.y, rel.x, 0.0).normalized();
        let kick = spinner.spin_speed * SPINNER_TANGENT_FACTOR * rng.gen_range(0.5..1.0);
        body.velocity.x += tangent.x * kick;
        body.velocity.y += tangent.y * kick;
    }
}

/// Gapped platform: pass-through inside the gap, minimum-axis
/// resolution elsewhere, with gap-seeking landings
///
/// `offset_x` shifts the platform center laterally; moving platforms
/// pass their oscillation offset, static platforms pass zero.
pub fn collide_platform(
    body: &mut Body,
    platform: &Platform,
    offset_x: f32,
    config: &RaceConfig,
    rng: &mut impl Rng,
) {
    let center_x = platform.position.x + offset_x;
    let rel_x = body.position.x - center_x;
    let rel_y = body.position.y - platform.position.y;
    let rel_z = body.position.z - platform.position.z;

    // Inside the gap the platform does not exist, whatever the depth
    // of the vertical overlap
    if rel_x >= platform.gap_start && rel_x <= platform.gap_end {
        return;
    }
    if rel_z.abs() >= platform.half_depth + body.radius {
        return;
    }

    let overlap_x = platform.half_width + body.radius - rel_x.abs();
    let overlap_y = platform.half_height + body.radius - rel_y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return;
    }

    // Correct along the axis of minimum overlap
    if overlap_y < overlap_x {
        if rel_y > 0.0 {
            body.position.y = platform.position.y + platform.half_height + body.radius;
            if body.velocity.y < 0.0 {
                // Landing on the top face: bounce, rub, and drift
                // toward the gap so nobody camps on an edge forever
                body.velocity.y *= -(config.restitution * rng.gen_range(0.7..1.0));
                body.velocity.x *= config.friction;

                let gap_center_x = center_x + platform.gap_center();
                body.velocity.x += config.gap_seek_force * (gap_center_x - body.position.x)
                    + rng.gen_range(-0.3..0.3);
            }
        } else {
            body.position.y = platform.position.y - platform.half_height - body.radius;
            if body.velocity.y > 0.0 {
                body.velocity.y = -body.velocity.y * config.restitution;
            }
        }
    } else if rel_x > 0.0 {
        body.position.x = center_x + platform.half_width + body.radius;
        if body.velocity.x < 0.0 {
            body.velocity.x = -body.velocity.x * config.restitution;
        }
    } else {
        body.position.x = center_x - platform.half_width - body.radius;
        if body.velocity.x > 0.0 {
            body.velocity.x = -body.velocity.x * config.restitution;
        }
    }
}

/// High-energy circle: always launches outward, ignoring incoming velocity
pub fn collide_bumper(body: &mut Body, bumper: &Bumper, rng: &mut impl Rng) {
    let dx = body.position.x - bumper.position.x;
    let dy = body.position.y - bumper.position.y;
    let dist = (dx * dx + dy * dy).sqrt();
    let r = bumper.radius + body.radius;
    if dist <= MIN_SEPARATION || dist >= r {
        return;
    }

    let mut nx = dx / dist;
    let mut ny = dy / dist;
    body.position.x = bumper.position.x + nx * r;
    body.position.y = bumper.position.y + ny * r;

    // Lateral jitter goes into the launch direction, not on top of it,
    // so the launch speed stays inside the force band
    nx += rng.gen_range(-0.2..0.2);
    let inv_len = 1.0 / (nx * nx + ny * ny).sqrt();
    nx *= inv_len;
    ny *= inv_len;

    let speed = bumper.bounce_force * rng.gen_range(0.8..1.2);
    body.velocity = Vec3::new(nx * speed, ny * speed, 0.0);
}

/// Oriented thin wall: reflect only the normal velocity component
pub fn collide_funnel_wall(body: &mut Body, wall: &FunnelWall, config: &RaceConfig) {
    let rel = body.position - wall.position;
    let along = rel.dot(wall.direction());
    let out = rel.dot(wall.normal);
    if along.abs() > wall.half_width || out.abs() >= body.radius {
        return;
    }

    // Normal signed by which side the body is on
    let side = if out >= 0.0 { 1.0 } else { -1.0 };
    let normal = wall.normal * side;

    body.position += normal * (body.radius - out.abs());

    let vn = body.velocity.dot(normal);
    if vn < 0.0 {
        body.velocity -= normal * (vn * (1.0 + config.restitution * 0.5));
    }
}

/// Cooldown-gated trigger: overwrite velocity with the launch vector,
/// or behave as a plain circle while cooling down
pub fn collide_launcher(body: &mut Body, launcher: &mut Launcher, elapsed: f32, rng: &mut impl Rng) {
    let dx = body.position.x - launcher.position.x;
    let dy = body.position.y - launcher.position.y;
    let dist = (dx * dx + dy * dy).sqrt();
    let r = launcher.radius + body.radius;
    if dist <= MIN_SEPARATION || dist >= r {
        return;
    }

    let nx = dx / dist;
    let ny = dy / dist;
    body.position.x = launcher.position.x + nx * r;
    body.position.y = launcher.position.y + ny * r;

    if launcher.ready(elapsed) {
        let (sin, cos) = launcher.launch_angle.sin_cos();
        body.velocity = Vec3::new(
            cos * launcher.launch_force + rng.gen_range(-0.5..0.5),
            sin * launcher.launch_force,
            0.0,
        );
        launcher.last_fired = Some(elapsed);
    }
}

/// Pairwise circle test in 3D with symmetric separation and impulse
///
/// All bodies are treated as equal mass; the positional correction is
/// split 50/50 and the impulse is equal and opposite.
pub fn resolve_body_pair(a: &mut Body, b: &mut Body, restitution: f32) {
    let delta = a.position - b.position;
    let dist = delta.length();
    let r = a.radius + b.radius;
    if dist <= MIN_SEPARATION || dist >= r {
        return;
    }

    let normal = delta / dist;
    let correction = normal * ((r - dist) * 0.5);
    a.position += correction;
    b.position -= correction;

    let rel_vel = a.velocity - b.velocity;
    let closing = rel_vel.dot(normal);
    if closing < 0.0 {
        let impulse = normal * (closing * restitution);
        a.velocity -= impulse;
        b.velocity += impulse;
    }
}

/// Hard-clamp the body into the lateral play volume
///
/// Y is left alone: falling out the bottom is how races end.
pub fn contain_in_bounds(body: &mut Body, config: &RaceConfig) {
    let limit_x = config.half_width - body.radius;
    if body.position.x < -limit_x {
        body.position.x = -limit_x;
        body.velocity.x = -body.velocity.x * config.restitution;
    } else if body.position.x > limit_x {
        body.position.x = limit_x;
        body.velocity.x = -body.velocity.x * config.restitution;
    }

    let limit_z = config.half_depth - body.radius;
    if body.position.z < -limit_z {
        body.position.z = -limit_z;
        body.velocity.z = -body.velocity.z * config.restitution;
    } else if body.position.z > limit_z {
        body.position.z = limit_z;
        body.velocity.z = -body.velocity.z * config.restitution;
    }
}

/// Cap speed magnitude and damp depth velocity toward the course plane
pub fn govern_velocity(body: &mut Body, config: &RaceConfig) {
    let speed = body.velocity.length();
    if speed > config.max_velocity {
        body.velocity *= config.max_velocity / speed;
    }
    body.velocity.z *= Z_DAMPING;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn config() -> RaceConfig {
        RaceConfig::default()
    }

    #[test]
    fn test_peg_pushes_to_exact_contact_distance() {
        let peg = Peg::new(Vec3::ZERO, 0.5);
        let mut body = Body::new(Vec3::new(0.9, 0.0, 0.0), 0.5);

        collide_peg(&mut body, &peg, &config(), &mut rng());

        // r = 0.5 + 0.5; overlap resolved along the normal
        assert!((body.position.distance(Vec3::ZERO) - 1.0).abs() < 0.0001);
        assert_eq!(body.position.y, 0.0);
    }

    #[test]
    fn test_peg_epsilon_guard_skips_coincident_centers() {
        let peg = Peg::new(Vec3::ZERO, 0.5);
        let mut body = Body::new(Vec3::new(0.0005, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -5.0, 0.0));

        collide_peg(&mut body, &peg, &config(), &mut rng());

        assert_eq!(body.position, Vec3::new(0.0005, 0.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn test_peg_reflects_closing_velocity() {
        let peg = Peg::new(Vec3::ZERO, 0.5);
        let mut body = Body::new(Vec3::new(0.0, 0.9, 0.0), 0.5).with_velocity(Vec3::new(0.0, -8.0, 0.0));

        collide_peg(&mut body, &peg, &config(), &mut rng());

        // Downward approach from above bounces upward, scaled by
        // restitution (0.5) and the [0.85, 1.15] jitter band
        assert!(body.velocity.y > 0.0);
        assert!(body.velocity.y >= 8.0 * 0.5 * 0.85 - 0.0001);
        assert!(body.velocity.y <= 8.0 * 0.5 * 1.15 + 0.0001);
    }

    #[test]
    fn test_peg_separating_velocity_untouched() {
        let peg = Peg::new(Vec3::ZERO, 0.5);
        let mut body = Body::new(Vec3::new(0.0, 0.9, 0.0), 0.5).with_velocity(Vec3::new(0.0, 3.0, 0.0));

        collide_peg(&mut body, &peg, &config(), &mut rng());

        // Pushed out, but already separating: velocity untouched
        assert_eq!(body.velocity, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_spinner_contact_bounces_and_kicks() {
        // Arm lies along X at elapsed 0
        let spinner = Spinner::new(Vec3::ZERO, 2.0, 0.2, 2.0);
        let mut body = Body::new(Vec3::new(1.0, 0.25, 0.0), 0.5).with_velocity(Vec3::new(0.0, -3.0, 0.0));

        collide_spinner(&mut body, &spinner, 0.0, &config(), &mut rng());

        // Pushed off the arm and bounced upward
        assert!(body.position.y > 0.25);
        assert!(body.velocity.y > 0.0);
        // Counterclockwise spin at +X contact sweeps upward; the
        // tangential kick shows up as a velocity change in the plane
        assert!(body.velocity.x.abs() > 0.0);
    }

    #[test]
    fn test_spinner_misses_outside_arm() {
        let spinner = Spinner::new(Vec3::ZERO, 2.0, 0.2, 2.0);
        let mut body = Body::new(Vec3::new(3.5, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -3.0, 0.0));

        collide_spinner(&mut body, &spinner, 0.0, &config(), &mut rng());

        assert_eq!(body.position, Vec3::new(3.5, 0.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.0, -3.0, 0.0));
    }

    #[test]
    fn test_platform_gap_pass_through() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 0.25, 1.0).with_gap(-0.5, 0.5);
        // Dead center of the platform, deepest possible overlap
        let mut body = Body::new(Vec3::new(0.0, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -5.0, 0.0));

        collide_platform(&mut body, &platform, 0.0, &config(), &mut rng());

        assert_eq!(body.position, Vec3::ZERO);
        assert_eq!(body.velocity, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn test_platform_top_landing_seeks_gap() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 0.25, 1.0).with_gap(-0.5, 0.5);
        // Landing right of the gap, moving down
        let mut body = Body::new(Vec3::new(2.0, 0.6, 0.0), 0.5).with_velocity(Vec3::new(1.0, -5.0, 0.0));

        collide_platform(&mut body, &platform, 0.0, &config(), &mut rng());

        // Sits on the top face
        assert!((body.position.y - 0.75).abs() < 0.0001);
        // Bounce is upward
        assert!(body.velocity.y > 0.0);
        // Gap-seek pulls it toward the gap center at x = 0
        assert!(body.velocity.x < 0.0);
    }

    #[test]
    fn test_platform_side_hit_reflects() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 0.25, 1.0).with_gap(-0.5, 0.5);
        let mut body = Body::new(Vec3::new(3.3, 0.0, 0.0), 0.5).with_velocity(Vec3::new(-4.0, 0.0, 0.0));

        collide_platform(&mut body, &platform, 0.0, &config(), &mut rng());

        assert!((body.position.x - 3.5).abs() < 0.0001);
        assert!((body.velocity.x - 4.0 * 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_platform_depth_miss() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 0.25, 1.0);
        let mut body = Body::new(Vec3::new(2.0, 0.0, 2.0), 0.5).with_velocity(Vec3::new(0.0, -5.0, 0.0));

        collide_platform(&mut body, &platform, 0.0, &config(), &mut rng());

        assert_eq!(body.position, Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_moving_platform_gap_follows_center() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 0.25, 1.0).with_gap(-0.5, 0.5);
        let moving = crate::obstacle::MovingPlatform::new(platform, 1.0, 2.0, 0.0);
        // At a quarter period the center sits at x = 2, so x = 2 is
        // now inside the gap
        let elapsed = std::f32::consts::FRAC_PI_2;
        let offset = moving.offset_x(elapsed);
        let mut body = Body::new(Vec3::new(2.0, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -5.0, 0.0));

        collide_platform(&mut body, &moving.platform, offset, &config(), &mut rng());

        assert_eq!(body.position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn test_bumper_overwrites_velocity_within_force_band() {
        let bumper = Bumper::new(Vec3::ZERO, 1.0, 20.0);
        // Falling fast INTO the bumper; the launch ignores that
        let mut body = Body::new(Vec3::new(1.2, 0.0, 0.0), 0.5).with_velocity(Vec3::new(-30.0, -30.0, 0.0));

        collide_bumper(&mut body, &bumper, &mut rng());

        let speed = body.velocity.length();
        assert!(speed >= 16.0 && speed <= 24.0, "speed {speed} outside band");
        // Launch points away from the bumper center
        assert!(body.velocity.x > 0.0);
    }

    #[test]
    fn test_bumper_epsilon_guard() {
        let bumper = Bumper::new(Vec3::ZERO, 1.0, 20.0);
        let mut body = Body::new(Vec3::new(0.0005, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -1.0, 0.0));

        collide_bumper(&mut body, &bumper, &mut rng());

        assert_eq!(body.velocity, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_funnel_wall_reflects_normal_component_only() {
        // Horizontal wall: direction +X, normal +Y
        let wall = FunnelWall::new(Vec3::ZERO, 2.0, 0.0);
        let mut body = Body::new(Vec3::new(0.5, 0.3, 0.0), 0.5).with_velocity(Vec3::new(2.0, -1.0, 0.0));

        collide_funnel_wall(&mut body, &wall, &config());

        // Pushed to radius above the surface
        assert!((body.position.y - 0.5).abs() < 0.0001);
        // Tangential velocity untouched, normal component reflected
        // at restitution * 0.5
        assert!((body.velocity.x - 2.0).abs() < 0.0001);
        assert!((body.velocity.y - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_funnel_wall_signed_by_side() {
        let wall = FunnelWall::new(Vec3::ZERO, 2.0, 0.0);
        // Approaching the underside
        let mut body = Body::new(Vec3::new(0.5, -0.3, 0.0), 0.5).with_velocity(Vec3::new(0.0, 2.0, 0.0));

        collide_funnel_wall(&mut body, &wall, &config());

        assert!((body.position.y + 0.5).abs() < 0.0001);
        assert!(body.velocity.y < 0.0);
    }

    #[test]
    fn test_funnel_wall_ignores_separating_body() {
        let wall = FunnelWall::new(Vec3::ZERO, 2.0, 0.0);
        let mut body = Body::new(Vec3::new(0.5, 0.3, 0.0), 0.5).with_velocity(Vec3::new(0.0, 3.0, 0.0));

        collide_funnel_wall(&mut body, &wall, &config());

        // Still pushed out, but moving away: velocity untouched
        assert_eq!(body.velocity, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_launcher_fires_and_stamps_cooldown() {
        let mut launcher = Launcher::new(Vec3::ZERO, 1.0, 18.0, std::f32::consts::FRAC_PI_2, 3.0);
        let mut body = Body::new(Vec3::new(0.8, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -6.0, 0.0));

        collide_launcher(&mut body, &mut launcher, 5.0, &mut rng());

        // Straight-up launch with lateral jitter only
        assert!((body.velocity.y - 18.0).abs() < 0.001);
        assert!(body.velocity.x.abs() <= 0.5);
        assert_eq!(launcher.last_fired, Some(5.0));
        // Pushed just outside the trigger
        assert!(body.position.distance(Vec3::ZERO) >= 1.5 - 0.0001);
    }

    #[test]
    fn test_launcher_in_cooldown_pushes_without_launching() {
        let mut launcher = Launcher::new(Vec3::ZERO, 1.0, 18.0, std::f32::consts::FRAC_PI_2, 3.0);
        launcher.last_fired = Some(4.0);
        let mut body = Body::new(Vec3::new(0.8, 0.0, 0.0), 0.5).with_velocity(Vec3::new(0.0, -6.0, 0.0));

        collide_launcher(&mut body, &mut launcher, 5.0, &mut rng());

        assert_eq!(body.velocity, Vec3::new(0.0, -6.0, 0.0));
        assert_eq!(launcher.last_fired, Some(4.0));
        assert!(body.position.distance(Vec3::ZERO) >= 1.5 - 0.0001);
    }

    #[test]
    fn test_body_pair_head_on_exchange() {
        let mut a = Body::new(Vec3::new(-0.4, 0.0, 0.0), 0.5).with_velocity(Vec3::new(5.0, 0.0, 0.0));
        let mut b = Body::new(Vec3::new(0.4, 0.0, 0.0), 0.5).with_velocity(Vec3::new(-5.0, 0.0, 0.0));

        resolve_body_pair(&mut a, &mut b, 0.5);

        // Zero residual overlap
        assert!((a.position.distance(b.position) - 1.0).abs() < 0.0001);
        // Relative speed 10 at restitution 0.5: the exchange cancels
        // both velocities exactly
        assert!(a.velocity.x.abs() < 0.0001);
        assert!(b.velocity.x.abs() < 0.0001);
    }

    #[test]
    fn test_body_pair_full_restitution_swaps() {
        let mut a = Body::new(Vec3::new(-0.45, 0.0, 0.0), 0.5).with_velocity(Vec3::new(3.0, 0.0, 0.0));
        let mut b = Body::new(Vec3::new(0.45, 0.0, 0.0), 0.5).with_velocity(Vec3::ZERO);

        resolve_body_pair(&mut a, &mut b, 1.0);

        assert!((a.velocity.x - 0.0).abs() < 0.0001);
        assert!((b.velocity.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_body_pair_epsilon_guard() {
        let mut a = Body::new(Vec3::ZERO, 0.5).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let mut b = Body::new(Vec3::new(0.0005, 0.0, 0.0), 0.5);

        resolve_body_pair(&mut a, &mut b, 0.5);

        // Coincident centers: skipped this tick
        assert_eq!(a.position, Vec3::ZERO);
        assert_eq!(a.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_contain_in_bounds_clamps_and_reflects() {
        let config = config();
        let limit = config.half_width - 0.5;
        let mut body = Body::new(Vec3::new(config.half_width + 1.0, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(4.0, 0.0, -2.0));
        body.position.z = -(config.half_depth + 1.0);

        contain_in_bounds(&mut body, &config);

        assert_eq!(body.position.x, limit);
        assert_eq!(body.position.z, -(config.half_depth - 0.5));
        assert!((body.velocity.x + 4.0 * config.restitution).abs() < 0.0001);
        assert!((body.velocity.z - 2.0 * config.restitution).abs() < 0.0001);
    }

    #[test]
    fn test_govern_velocity_caps_speed() {
        let config = config();
        let mut body = Body::new(Vec3::ZERO, 0.5).with_velocity(Vec3::new(30.0, -40.0, 0.0));

        govern_velocity(&mut body, &config);

        assert!((body.velocity.length() - config.max_velocity).abs() < 0.001);
        // Direction preserved by the uniform rescale
        assert!(body.velocity.x > 0.0 && body.velocity.y < 0.0);
    }

    #[test]
    fn test_govern_velocity_damps_depth() {
        let config = config();
        let mut body = Body::new(Vec3::ZERO, 0.5).with_velocity(Vec3::new(0.0, 0.0, 1.0));

        govern_velocity(&mut body, &config);
        assert!((body.velocity.z - 0.95).abs() < 0.0001);

        govern_velocity(&mut body, &config);
        assert!((body.velocity.z - 0.9025).abs() < 0.0001);
    }
}
