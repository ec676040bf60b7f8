//! Plummet - headless drop-race runner
//!
//! Loads the layered configuration, builds the demo course, drops a
//! roster of bodies through it, and prints the finish standings.

use plummet::config::AppConfig;
use plummet::course;
use plummet_math::Vec3;
use plummet_physics::{Body, RaceWorld};

fn main() {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {e}. Using defaults.");
    }

    run_race(&config);
}

fn run_race(config: &AppConfig) {
    let race_config = config.to_race_config();
    let session = &config.race;
    let spawn_y = race_config.finish_y + session.spawn_height;

    let mut world = match session.seed {
        Some(seed) => RaceWorld::with_seed(race_config, seed),
        None => RaceWorld::new(race_config),
    };

    for obstacle in course::build_course(&world.config, spawn_y) {
        world.add_obstacle(obstacle);
    }

    // Spread the roster across the mouth of the course
    let count = session.bodies.max(1);
    for i in 0..count {
        let t = if count == 1 {
            0.5
        } else {
            i as f32 / (count - 1) as f32
        };
        let x = (t - 0.5) * world.config.half_width;
        world.add_body(Body::new(Vec3::new(x, spawn_y, 0.0), session.body_radius));
    }

    log::info!(
        "race start: {} bodies through {} obstacles, finish at y = {}",
        world.body_count(),
        world.obstacles().len(),
        world.config.finish_y
    );

    let raw_dt = 1.0 / session.tick_rate;
    let mut next_rank = 1u32;
    while !world.all_finished() && world.elapsed() < session.timeout {
        let slow_motion = leader_near_finish(&world, session.slow_motion_window);
        let dt = if slow_motion {
            raw_dt * session.slow_motion_scale
        } else {
            raw_dt
        };
        world.step(dt, raw_dt, slow_motion, |_, body| {
            body.finish_rank = Some(next_rank);
            next_rank += 1;
        });
    }

    print_standings(&world);
}

/// Slow motion kicks in once the leading active body is close to the line
fn leader_near_finish(world: &RaceWorld, window: f32) -> bool {
    world
        .bodies()
        .iter()
        .filter(|b| !b.finished)
        .map(|b| b.position.y - world.config.finish_y)
        .fold(f32::INFINITY, f32::min)
        < window
}

fn print_standings(world: &RaceWorld) {
    let mut order: Vec<usize> = (0..world.body_count()).collect();
    order.sort_by_key(|&i| world.body(i).unwrap().finish_rank.unwrap_or(u32::MAX));

    println!("--- standings ---");
    for i in order {
        let body = world.body(i).unwrap();
        match (body.finish_rank, body.finish_time) {
            (Some(rank), Some(time)) => println!("{rank:>3}. body {i:<2} {time:>7.2}s"),
            _ => println!("DNF  body {i:<2}"),
        }
    }
}
