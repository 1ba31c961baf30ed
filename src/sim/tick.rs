//! Gated simulation tick
//!
//! Called once per frame. The clock decides whether the water actually
//! advances; spawning is an external event carried in the input.

use super::state::WaterSurface;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn a ripple at a random point (key press, timer, ...)
    pub spawn: bool,
}

/// Advance the water if the clock allows it.
///
/// On an accepted tick: pending spawn, then random spawn roll, then
/// advance (with bin rebuild), subdivide and height field rebuild.
/// Returns true if the height field changed.
pub fn tick(surface: &mut WaterSurface, input: &TickInput, now: f64) -> bool {
    if !surface.clock.should_tick(now) {
        return false;
    }

    if input.spawn {
        let origin = surface.spawn();
        log::info!("Ripple at ({:.1}, {:.1})", origin.x, origin.y);
    }
    if surface.roll_spawn() {
        surface.spawn();
    }

    surface.step();

    let stats = surface.stats();
    log::debug!(
        "tick {}: {} fronts, {} particles",
        stats.ticks,
        stats.fronts,
        stats.particles
    );
    true
}
