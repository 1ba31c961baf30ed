//! Wave Ripples headless driver
//!
//! Runs the water simulation on a synthetic clock and prints a JSON
//! summary. Usage: `wave-ripples [settings.json] [ticks]`

use serde::Serialize;

use wave_ripples::surface::build_surface;
use wave_ripples::{TickInput, WaterSettings, WaterSurface, tick};

/// Ticks to run when none are given
const DEFAULT_TICKS: u64 = 500;
/// Spawn a ripple every this many ticks when random spawning is off
const SPAWN_EVERY: u64 = 40;

#[derive(Debug, Serialize)]
struct RunSummary {
    ticks: u64,
    spawned: u64,
    fronts: usize,
    particles: usize,
    min_height: f32,
    max_height: f32,
    triangles: usize,
}

fn main() {
    env_logger::init();
    log::info!("Wave Ripples (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => WaterSettings::load(path),
        None => WaterSettings::default(),
    };
    let ticks = args
        .next()
        .and_then(|s| match s.parse::<u64>() {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("Invalid tick count {:?}: {}", s, e);
                None
            }
        })
        .unwrap_or(DEFAULT_TICKS);

    let manual_spawns = settings.spawn_chance == 0.0;
    // Step just past the rate so every frame is accepted
    let frame_dt = settings.tick_rate * 1.5 + 1e-6;
    let mut surface = WaterSurface::new(settings);

    let mut now = 0.0;
    let mut accepted = 0;
    while accepted < ticks {
        now += frame_dt;
        let input = TickInput {
            spawn: manual_spawns && accepted % SPAWN_EVERY == 0,
        };
        if tick(&mut surface, &input, now) {
            accepted += 1;
        }
    }

    let stats = surface.stats();
    let (min_height, max_height) = surface.height_field().range();
    let mesh = build_surface(surface.height_field(), surface.settings().width);
    log::info!(
        "Done: {} ticks, {} fronts, {} particles",
        stats.ticks,
        stats.fronts,
        stats.particles
    );

    let summary = RunSummary {
        ticks: stats.ticks,
        spawned: stats.spawned,
        fronts: stats.fronts,
        particles: stats.particles,
        min_height,
        max_height,
        triangles: mesh.triangle_count(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
