//! drift: headless demo for the rust_live behavior scheduler.
//!
//! Spawns a seeded swarm of scouts and haulers in a square arena.  Every
//! member waits a random delay, then glides to a random waypoint; scouts at
//! constant speed, haulers accelerating and yielding while a scout touches
//! them.  A short wobble spins each body for its first seconds.  Midway
//! through the run a "storm" pause tag freezes the wobble and the scouts'
//! movement for a window of ticks.
//!
//! Usage: `drift [config.json]`.  The optional file is a `SceneConfig` in
//! JSON; missing fields take their defaults.  `RUST_LOG` sets verbosity.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use live_behavior::{Action, BehaviorContext, Registration, from_fn, suspend, timed};
use live_core::{AngleUnit, EntityId, Rate, SceneConfig, Space, TimeSource};
use live_entity::{BasicTransform, Body, MoveOptions, move_to, uncollide};
use live_scene::{Scene, SceneObserver, TracingObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 7;
const SCOUT_COUNT:     usize = 16;
const HAULER_COUNT:    usize = 8;
const ARENA_HALF:      f32 = 20.0;
const CONTACT_RADIUS:  f32 = 1.0;
const RUN_SECONDS:     f32 = 12.0;
const MAX_DELAY_SECS:  f64 = 2.0;
const WOBBLE_SECS:     f64 = 3.0;
const LOG_INTERVAL:    u64 = 120;

const SCOUTS:  &str = "scouts";
const HAULERS: &str = "haulers";
const STORM:   &str = "storm";

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let mut config: SceneConfig = match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SceneConfig { time_source: TimeSource::Simulated, ..SceneConfig::default() },
    };
    if config.total_ticks == 0 {
        config.total_ticks = (RUN_SECONDS * config.tick_rate).round() as u64;
    }
    Ok(config)
}

// ── Swarm ─────────────────────────────────────────────────────────────────────

fn random_point(rng: &mut SmallRng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-ARENA_HALF..ARENA_HALF),
        0.0,
        rng.gen_range(-ARENA_HALF..ARENA_HALF),
    )
}

/// Spin about Y at a random rate for `WOBBLE_SECS`, frozen during a storm.
fn add_wobble(scene: &mut Scene<BasicTransform>, id: EntityId, rng: &mut SmallRng) -> Result<()> {
    let degrees_per_sec = rng.gen_range(-180.0..180.0_f32);
    let spin = from_fn(move |ctx: &mut BehaviorContext<'_, Body>| {
        ctx.owner.apply_rotation(
            Vec3::new(0.0, degrees_per_sec, 0.0),
            Rate::PerSecond,
            AngleUnit::Degrees,
            Space::Local,
        );
        Ok(Action::Continue)
    });
    let wobble = timed(spin, WOBBLE_SECS, scene.time());
    scene
        .entity_mut(id)?
        .add_with(wobble, Registration::new().id("wobble").pause_when(STORM));
    Ok(())
}

fn spawn_scouts(scene: &mut Scene<BasicTransform>, rng: &mut SmallRng) -> Result<Vec<EntityId>> {
    let mut ids = Vec::with_capacity(SCOUT_COUNT);
    for _ in 0..SCOUT_COUNT {
        let id = scene.spawn(BasicTransform::from_position(random_point(rng)));
        scene.classify(id, SCOUTS)?;

        let delay = rng.gen_range(0.0..MAX_DELAY_SECS);
        let speed = rng.gen_range(2.0..6.0_f32);
        let target = random_point(rng);

        let mover = move_to(scene.entity(id)?.body(), target, MoveOptions::speed(speed))?;
        let trip = suspend::<Body, ()>(delay, scene.time()).then(mover);
        scene
            .entity_mut(id)?
            .add_with(trip, Registration::new().pause_when(STORM));

        add_wobble(scene, id, rng)?;
        ids.push(id);
    }
    Ok(ids)
}

fn spawn_haulers(
    scene: &mut Scene<BasicTransform>,
    rng: &mut SmallRng,
    scouts: &[EntityId],
) -> Result<Vec<EntityId>> {
    let mut ids = Vec::with_capacity(HAULER_COUNT);
    for _ in 0..HAULER_COUNT {
        let id = scene.spawn_tracking_contacts(BasicTransform::from_position(random_point(rng)));
        scene.classify(id, HAULERS)?;

        let delay = rng.gen_range(0.0..MAX_DELAY_SECS);
        let target = random_point(rng);
        let options = MoveOptions::accel(rng.gen_range(1.0..3.0))
            .start_speed(0.5)
            .max_speed(rng.gen_range(3.0..5.0));

        let mover = move_to(scene.entity(id)?.body(), target, options)?;
        let trip = suspend::<Body, ()>(delay, scene.time())
            .then(uncollide(scouts.iter().copied(), mover));
        scene.entity_mut(id)?.add(trip);

        scene.entity_mut(id)?.add_contact(from_fn(
            move |ctx: &mut BehaviorContext<'_, Body, EntityId>| {
                debug!(hauler = %ctx.owner.id(), other = %ctx.args, "contact");
                Ok(Action::Continue)
            },
        ))?;

        add_wobble(scene, id, rng)?;
        ids.push(id);
    }
    Ok(ids)
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// Every pair of bodies closer than `CONTACT_RADIUS`.
fn overlapping_pairs(scene: &Scene<BasicTransform>) -> Vec<(EntityId, EntityId)> {
    let bodies: Vec<(EntityId, Vec3)> = scene
        .entities()
        .map(|e| (e.id(), e.body().world_position()))
        .collect();

    let mut pairs = Vec::new();
    for (i, &(a, pa)) in bodies.iter().enumerate() {
        for &(b, pb) in &bodies[i + 1..] {
            if pa.distance(pb) < CONTACT_RADIUS {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    let total = config.total_ticks;
    let storm = (total / 3, total / 2);

    let mut scene = Scene::<BasicTransform>::new(config)?;
    let mut rng = SmallRng::seed_from_u64(SEED);

    let scouts = spawn_scouts(&mut scene, &mut rng)?;
    let haulers = spawn_haulers(&mut scene, &mut rng, &scouts)?;
    info!(
        scouts = scouts.len(),
        haulers = haulers.len(),
        ticks = total,
        rate = %scene.tick_rate(),
        "swarm ready"
    );

    let mut observer = TracingObserver::new(LOG_INTERVAL);
    let mut collisions = 0usize;

    while scene.current_tick().0 < total {
        let tick = scene.current_tick().0;
        if tick == storm.0 && scene.pause(STORM) {
            info!(tick, "storm begins");
        }
        if tick == storm.1 && scene.resume(STORM) {
            info!(tick, "storm clears");
        }

        for (a, b) in overlapping_pairs(&scene) {
            scene.report_collision(a, b)?;
            collisions += 1;
        }
        scene.step(&mut observer)?;
    }
    observer.on_run_end(scene.current_tick());

    let settled = scene
        .entities()
        .filter(|e| e.behaviors().is_empty())
        .count();
    info!(collisions, settled, of = scene.len(), "drift finished");

    for group in [SCOUTS, HAULERS] {
        for id in scene.group(group) {
            let p = scene.entity(id)?.body().world_position();
            debug!(%group, entity = %id, x = p.x, z = p.z, "final position");
        }
    }
    Ok(())
}
