//! Height field reconstruction
//!
//! Each grid sample is the sum of displacements of the particles binned
//! near it. No smoothing beyond the kernel's own falloff.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use super::bins::{GridCoord, SpatialBins};

/// `n x n` grid of surface heights, row-major by x cell then y cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    resolution: usize,
    heights: Vec<f32>,
}

impl HeightField {
    /// Flat field of `resolution x resolution` samples
    pub fn new(resolution: usize, base_height: f32) -> Self {
        Self {
            resolution,
            heights: vec![base_height; resolution * resolution],
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Height at cell `(i, j)`, or `None` outside the grid
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.resolution && j < self.resolution {
            Some(self.heights[i * self.resolution + j])
        } else {
            None
        }
    }

    /// Height at `(i, j)` with both indices clamped to the grid
    #[inline]
    pub fn get_clamped(&self, i: usize, j: usize) -> f32 {
        let last = self.resolution.saturating_sub(1);
        self.get(i.min(last), j.min(last)).unwrap_or(0.0)
    }

    /// Raw samples
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Lowest and highest sample
    pub fn range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// Rebuilds a height field from the spatial bins.
///
/// Grid size and sample positions come from the bins being read, so the
/// field always lines up with the cells it sums over.
#[derive(Debug, Clone, Copy)]
pub struct HeightFieldSampler {
    /// Neighbor search radius in cells
    pub neighbor_radius: u32,
    /// Global water level added to every sample
    pub base_height: f32,
}

impl HeightFieldSampler {
    /// Surface elevation above the base height at one cell
    pub fn eta(&self, bins: &SpatialBins, cell: GridCoord) -> f32 {
        let x = bins.sample_point(cell);
        bins.neighbors(cell, self.neighbor_radius)
            .map(|p| p.displacement(x))
            .sum()
    }

    /// Build a fresh height field
    pub fn rebuild(&self, bins: &SpatialBins) -> HeightField {
        let mut field = HeightField::new(bins.resolution(), self.base_height);
        self.rebuild_into(bins, &mut field);
        field
    }

    /// Overwrite `field` in place, resizing it if the resolution changed
    pub fn rebuild_into(&self, bins: &SpatialBins, field: &mut HeightField) {
        let n = bins.resolution();
        field.resolution = n;
        field.heights.resize(n * n, self.base_height);
        for i in 0..n {
            for j in 0..n {
                let cell = UVec2::new(i as u32, j as u32);
                field.heights[i * n + j] = self.base_height + self.eta(bins, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fronts::WaveFrontManager;
    use glam::Vec2;
    use crate::settings::WaterSettings;

    fn sampler() -> HeightFieldSampler {
        HeightFieldSampler {
            neighbor_radius: 4,
            base_height: 0.0,
        }
    }

    #[test]
    fn test_empty_bins_give_flat_field() {
        let bins = SpatialBins::new(100, 60.0, 0.01);
        let mut s = sampler();
        s.base_height = 1.5;
        let field = s.rebuild(&bins);
        assert_eq!(field.resolution(), 100);
        assert_eq!(field.range(), (1.5, 1.5));
    }

    #[test]
    fn test_field_follows_bins_resolution() {
        let s = sampler();
        let bins = SpatialBins::new(25, 60.0, 0.01);
        let field = s.rebuild(&bins);
        assert_eq!(field.resolution(), 25);
        assert_eq!(field.as_slice().len(), 625);
    }

    #[test]
    fn test_eta_samples_at_bins_grid_points() {
        // Coarse bins: cell (5, 5) of 10 over +-60 sits at the origin
        let settings = WaterSettings::default();
        let mut fronts = WaveFrontManager::new(&settings);
        let mut bins = SpatialBins::new(10, 60.0, 0.01);
        fronts.spawn_at(Vec2::ZERO);
        bins.rebuild(fronts.fronts());
        let eta = sampler().eta(&bins, UVec2::new(5, 5));
        assert!((eta - 80.0).abs() < 1e-2, "eta was {eta}");
    }

    #[test]
    fn test_spawn_at_origin_peaks_at_eighty() {
        let settings = WaterSettings::default();
        let mut fronts = WaveFrontManager::new(&settings);
        let mut bins = SpatialBins::new(100, 60.0, 0.01);
        fronts.spawn_at(Vec2::ZERO);
        bins.rebuild(fronts.fronts());

        let field = sampler().rebuild(&bins);
        let peak = field.get(50, 50).unwrap_or_default();
        // Four co-located particles, each 20 / 2 * 2 * 1
        assert!((peak - 80.0).abs() < 1e-2, "peak was {peak}");
        assert!((field.range().1 - peak).abs() < 1e-6);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let settings = WaterSettings::default();
        let mut fronts = WaveFrontManager::new(&settings);
        let mut bins = SpatialBins::new(100, 60.0, 0.01);
        fronts.spawn();
        fronts.spawn();
        for _ in 0..10 {
            fronts.advance(&mut bins);
            fronts.subdivide();
        }
        let s = sampler();
        let a = s.rebuild(&bins);
        let mut b = HeightField::new(3, 0.0);
        s.rebuild_into(&bins, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_out_of_range() {
        let field = HeightField::new(4, 0.25);
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.get_clamped(9, 9), 0.25);
    }
}
