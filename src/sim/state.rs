//! Water simulation state
//!
//! Everything one water surface needs lives in a single owned value; the
//! caller creates it with the scene and drops it with the scene.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bins::SpatialBins;
use super::clock::SimulationClock;
use super::fronts::{WaveFront, WaveFrontManager};
use super::height_field::{HeightField, HeightFieldSampler};
use super::particle::WaveParticle;
use crate::settings::WaterSettings;

/// Per-tick counters for logging and HUDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Accepted simulation ticks so far
    pub ticks: u64,
    /// Wavefronts spawned so far
    pub spawned: u64,
    /// Live wavefronts
    pub fronts: usize,
    /// Live particles
    pub particles: usize,
}

/// A complete water surface: particles, bins, height field and clock
#[derive(Debug, Clone)]
pub struct WaterSurface {
    settings: WaterSettings,
    pub(crate) fronts: WaveFrontManager,
    pub(crate) bins: SpatialBins,
    pub(crate) sampler: HeightFieldSampler,
    pub(crate) height_field: HeightField,
    pub(crate) clock: SimulationClock,
    /// Drives random spawning, separate from spawn positions
    pub(crate) spawn_rng: Pcg32,
    pub(crate) stats: SurfaceStats,
}

impl Default for WaterSurface {
    fn default() -> Self {
        Self::new(WaterSettings::default())
    }
}

impl WaterSurface {
    pub fn new(settings: WaterSettings) -> Self {
        let settings = settings.sanitized();
        let sampler = HeightFieldSampler {
            neighbor_radius: settings.neighbor_radius,
            base_height: settings.base_height,
        };
        log::info!(
            "Water surface: {}x{} cells over ±{}, seed {}",
            settings.resolution,
            settings.resolution,
            settings.width,
            settings.seed
        );

        Self {
            fronts: WaveFrontManager::new(&settings),
            bins: SpatialBins::new(settings.resolution, settings.width, settings.threshold),
            height_field: HeightField::new(settings.resolution, settings.base_height),
            clock: SimulationClock::with_rate(settings.tick_rate),
            spawn_rng: Pcg32::seed_from_u64(settings.seed.wrapping_add(1)),
            stats: SurfaceStats::default(),
            sampler,
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &WaterSettings {
        &self.settings
    }

    /// Latest reconstructed surface
    #[inline]
    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    #[inline]
    pub fn bins(&self) -> &SpatialBins {
        &self.bins
    }

    #[inline]
    pub fn fronts(&self) -> &[WaveFront] {
        self.fronts.fronts()
    }

    /// Every live particle (e.g. for drawing debug markers)
    pub fn particles(&self) -> impl Iterator<Item = &WaveParticle> + '_ {
        self.fronts.particles()
    }

    #[inline]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> SurfaceStats {
        SurfaceStats {
            fronts: self.fronts.front_count(),
            particles: self.fronts.particle_count(),
            ..self.stats
        }
    }

    /// Start a ripple at a random point
    pub fn spawn(&mut self) -> Vec2 {
        self.stats.spawned += 1;
        self.fronts.spawn()
    }

    /// Start a ripple at `origin`
    pub fn spawn_at(&mut self, origin: Vec2) {
        self.stats.spawned += 1;
        self.fronts.spawn_at(origin);
    }

    /// Roll the per-tick random spawn
    pub(crate) fn roll_spawn(&mut self) -> bool {
        let chance = self.settings.spawn_chance;
        chance > 0.0 && self.spawn_rng.random_bool(chance)
    }

    /// Move particles, prune them and rebuild the bins
    pub fn advance(&mut self) {
        self.fronts.advance(&mut self.bins);
    }

    /// Resample stretched wavefronts
    pub fn subdivide(&mut self) {
        self.fronts.subdivide();
    }

    /// Re-index the current particles without moving them
    pub fn rebin(&mut self) {
        self.bins.rebuild(self.fronts.fronts());
    }

    /// Reconstruct the height field from the bins
    pub fn rebuild_height_field(&mut self) {
        self.sampler.rebuild_into(&self.bins, &mut self.height_field);
    }

    /// One full simulation step, ungated
    pub fn step(&mut self) {
        self.advance();
        self.subdivide();
        self.rebuild_height_field();
        self.stats.ticks += 1;
    }

    /// Remove all ripples and flatten the surface
    pub fn clear(&mut self) {
        self.fronts.clear();
        self.bins.clear();
        self.height_field = HeightField::new(self.settings.resolution, self.settings.base_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_flat() {
        let surface = WaterSurface::default();
        assert_eq!(surface.height_field().resolution(), 100);
        assert_eq!(surface.height_field().range(), (0.0, 0.0));
        assert_eq!(surface.stats(), SurfaceStats::default());
    }

    #[test]
    fn test_step_updates_stats() {
        let mut surface = WaterSurface::default();
        surface.spawn_at(Vec2::ZERO);
        surface.step();
        let stats = surface.stats();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.spawned, 1);
        assert_eq!(stats.fronts, 1);
        assert_eq!(stats.particles, 4);
        assert!(surface.height_field().range().1 > 0.0);
    }

    #[test]
    fn test_bins_agree_with_fronts_after_advance() {
        let mut surface = WaterSurface::default();
        surface.spawn();
        surface.spawn();
        for _ in 0..20 {
            surface.advance();
            for p in surface.particles() {
                let cell = surface.bins().cell_of(p.position);
                assert!(surface.bins().query(cell, 0).contains(p));
            }
            assert_eq!(surface.bins().len(), surface.stats().particles);
            surface.subdivide();
        }
    }

    #[test]
    fn test_clear() {
        let mut surface = WaterSurface::default();
        surface.spawn_at(Vec2::new(3.0, 3.0));
        surface.step();
        surface.clear();
        assert_eq!(surface.stats().particles, 0);
        assert!(surface.bins().is_empty());
        assert_eq!(surface.height_field().range(), (0.0, 0.0));
    }
}
