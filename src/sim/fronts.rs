//! Wavefront lifecycle: spawn, advance, prune and subdivide
//!
//! A wavefront is the ordered group of particles born from one spawn event.
//! Order matters: subdivision inserts new particles next to the pair that
//! triggered the split.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bins::SpatialBins;
use super::particle::WaveParticle;
use crate::lerp;
use crate::settings::WaterSettings;

/// An ordered group of particles spawned together
pub type WaveFront = Vec<WaveParticle>;

/// Headings and phase angles of the four particles in a fresh wavefront
const SPAWN_PATTERN: [(Vec2, f32); 4] = [
    (Vec2::Y, 0.0),
    (Vec2::X, 180.0),
    (Vec2::NEG_Y, 90.0),
    (Vec2::NEG_X, 270.0),
];

/// Owns every wavefront in the simulation
#[derive(Debug, Clone)]
pub struct WaveFrontManager {
    fronts: Vec<WaveFront>,
    width: f32,
    threshold: f32,
    spawn_amplitude: f32,
    kernel_radius: f32,
    /// Split when neighbors are farther apart than `radius * split_factor`
    split_factor: f32,
    /// Amplitude divisor applied on each split
    split_decay: f32,
    rng: Pcg32,
}

impl WaveFrontManager {
    pub fn new(settings: &WaterSettings) -> Self {
        Self {
            fronts: Vec::new(),
            width: settings.width,
            threshold: settings.threshold,
            spawn_amplitude: settings.spawn_amplitude,
            kernel_radius: settings.kernel_radius,
            split_factor: settings.split_factor,
            split_decay: settings.split_decay,
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    /// All live wavefronts
    #[inline]
    pub fn fronts(&self) -> &[WaveFront] {
        &self.fronts
    }

    #[inline]
    pub fn front_count(&self) -> usize {
        self.fronts.len()
    }

    /// Total particles across all fronts
    pub fn particle_count(&self) -> usize {
        self.fronts.iter().map(Vec::len).sum()
    }

    /// Every particle, front by front
    pub fn particles(&self) -> impl Iterator<Item = &WaveParticle> + '_ {
        self.fronts.iter().flatten()
    }

    /// Remove every wavefront
    pub fn clear(&mut self) {
        self.fronts.clear();
    }

    /// Add a wavefront built elsewhere. Empty fronts are ignored.
    pub fn push_front(&mut self, front: WaveFront) {
        if !front.is_empty() {
            self.fronts.push(front);
        }
    }

    /// Spawn a wavefront at a uniformly random point in the domain
    pub fn spawn(&mut self) -> Vec2 {
        let offset = Vec2::new(
            self.rng.random::<f32>() * 2.0 * self.width,
            self.rng.random::<f32>() * 2.0 * self.width,
        );
        let origin = Vec2::splat(-self.width) + offset;
        self.spawn_at(origin);
        origin
    }

    /// Spawn four particles at `origin`, heading in the cardinal directions
    pub fn spawn_at(&mut self, origin: Vec2) {
        let front: WaveFront = SPAWN_PATTERN
            .iter()
            .map(|&(direction, angle)| {
                WaveParticle::new(origin, direction, self.spawn_amplitude, self.kernel_radius)
                    .with_disp_angle(angle)
            })
            .collect();
        log::debug!("Spawned wavefront at ({:.2}, {:.2})", origin.x, origin.y);
        self.fronts.push(front);
    }

    /// Move every particle one step, prune dead ones and rebuild `bins`
    /// from the survivors in the same pass. The manager's pruning rule is
    /// the only filter; every survivor is binned.
    pub fn advance(&mut self, bins: &mut SpatialBins) {
        let (width, threshold) = (self.width, self.threshold);
        for front in &mut self.fronts {
            for particle in front.iter_mut() {
                particle.step();
            }
            front.retain(|p| p.is_alive(width, threshold));
        }
        self.fronts.retain(|front| !front.is_empty());
        bins.rebuild_survivors(&self.fronts);
    }

    /// Insert interpolated particles wherever neighbors drifted too far apart
    pub fn subdivide(&mut self) {
        for front in &mut self.fronts {
            *front = subdivide_front(front, self.split_factor, self.split_decay);
        }
    }
}

/// Resample one wavefront.
///
/// The new front starts with a copy of the last particle, then walks the
/// remaining particles in order. Each gap wider than `radius * split_factor`
/// between the last pushed particle and the next one gets a mid particle,
/// and both ends lose amplitude by `decay`.
pub fn subdivide_front(front: &[WaveParticle], split_factor: f32, decay: f32) -> WaveFront {
    let Some((&last, rest)) = front.split_last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(front.len() * 2);
    out.push(last);
    for &p2 in rest {
        let mut p2 = p2;
        // Always non-empty: seeded with `last`
        let Some(p1) = out.last_mut() else { break };

        if p1.position.distance(p2.position) > p1.radius * split_factor {
            p1.amplitude /= decay;
            p2.amplitude /= decay;

            let direction = ((p1.direction + p2.direction) / 2.0)
                .try_normalize()
                .unwrap_or(p2.direction);
            let mid = WaveParticle {
                origin: p2.origin,
                position: p2.origin + direction * p2.travelled(),
                direction,
                amplitude: p2.amplitude,
                radius: p2.radius,
                disp_angle: lerp(p1.disp_angle, p2.disp_angle, 0.5),
                speed: p2.speed,
            };
            out.push(mid);
        }
        out.push(p2);
    }
    out
}
