//! Uniform spatial bins over the square simulation domain
//!
//! Particles are bucketed by cell with a counting sort into one flat array,
//! so each cell is a contiguous slice. The grid is rebuilt wholesale every
//! tick; nothing is updated incrementally.

use glam::{UVec2, Vec2};

use super::particle::WaveParticle;

/// Grid cell coordinate `(i, j)`: `i` along x, `j` along y
pub type GridCoord = UVec2;

/// `n x n` grid of particle buckets over `[-width, width]^2`
#[derive(Debug, Clone)]
pub struct SpatialBins {
    /// Cells per axis
    resolution: usize,
    /// Domain half-width
    width: f32,
    /// Amplitude at or below which particles are not binned
    threshold: f32,
    /// Binned particles, grouped by cell
    particles: Vec<WaveParticle>,
    /// `cell_start[k]..cell_start[k + 1]` is the range of cell `k` in `particles`
    cell_start: Vec<usize>,
    /// Scratch: cell index per candidate particle during rebuild
    scratch: Vec<(usize, WaveParticle)>,
}

impl SpatialBins {
    pub fn new(resolution: usize, width: f32, threshold: f32) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            width,
            threshold,
            particles: Vec::new(),
            cell_start: vec![0; resolution * resolution + 1],
            scratch: Vec::new(),
        }
    }

    /// Cells per axis
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Domain half-width
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Total number of binned particles
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Cell containing `position`, clamped to the grid
    pub fn cell_of(&self, position: Vec2) -> GridCoord {
        let n = self.resolution as f32;
        let max = (self.resolution - 1) as f32;
        let cell = ((position + Vec2::splat(self.width)) / (2.0 * self.width)) * n;
        // Float-to-int casts saturate, so negative or NaN land at 0
        UVec2::new(
            cell.x.floor().clamp(0.0, max) as u32,
            cell.y.floor().clamp(0.0, max) as u32,
        )
    }

    /// Distance between neighbouring grid points
    #[inline]
    pub fn step(&self) -> f32 {
        2.0 * self.width / self.resolution as f32
    }

    /// World position of grid point `(i, j)`, the lower corner of the cell
    #[inline]
    pub fn sample_point(&self, cell: GridCoord) -> Vec2 {
        Vec2::splat(-self.width) + cell.as_vec2() * self.step()
    }

    /// Flat index of a cell
    #[inline]
    fn index(&self, coord: GridCoord) -> usize {
        coord.x as usize * self.resolution + coord.y as usize
    }

    /// Particles binned into a single cell (empty for out-of-range coordinates)
    pub fn cell(&self, coord: GridCoord) -> &[WaveParticle] {
        if coord.x as usize >= self.resolution || coord.y as usize >= self.resolution {
            return &[];
        }
        let k = self.index(coord);
        &self.particles[self.cell_start[k]..self.cell_start[k + 1]]
    }

    /// Rebuild all cells from the given wavefronts.
    ///
    /// Out-of-domain and decayed particles are skipped, matching the
    /// pruning rule applied by the wavefront manager.
    pub fn rebuild<'a, I>(&mut self, fronts: I)
    where
        I: IntoIterator<Item = &'a Vec<WaveParticle>>,
    {
        let (width, threshold) = (self.width, self.threshold);
        self.rebuild_filtered(fronts, |p| p.is_alive(width, threshold));
    }

    /// Rebuild all cells from particles that were already pruned.
    ///
    /// Every particle given is binned; positions outside the grid clamp
    /// to the nearest edge cell.
    pub fn rebuild_survivors<'a, I>(&mut self, fronts: I)
    where
        I: IntoIterator<Item = &'a Vec<WaveParticle>>,
    {
        self.rebuild_filtered(fronts, |_| true);
    }

    fn rebuild_filtered<'a, I, F>(&mut self, fronts: I, keep: F)
    where
        I: IntoIterator<Item = &'a Vec<WaveParticle>>,
        F: Fn(&WaveParticle) -> bool,
    {
        let cells = self.resolution * self.resolution;
        self.scratch.clear();
        for front in fronts {
            for particle in front {
                if keep(particle) {
                    let k = self.index(self.cell_of(particle.position));
                    self.scratch.push((k, *particle));
                }
            }
        }

        // Count per cell
        self.cell_start.clear();
        self.cell_start.resize(cells + 1, 0);
        for &(k, _) in &self.scratch {
            self.cell_start[k + 1] += 1;
        }

        // Prefix sum
        for k in 0..cells {
            self.cell_start[k + 1] += self.cell_start[k];
        }

        // Scatter, keeping insertion order within a cell
        let mut cursor = self.cell_start.clone();
        self.particles.clear();
        self.particles.resize(self.scratch.len(), WaveParticle::default());
        for &(k, particle) in &self.scratch {
            self.particles[cursor[k]] = particle;
            cursor[k] += 1;
        }
    }

    /// Iterate the particles in the square neighborhood
    /// `[center - radius, center + radius]`, clamped to the grid.
    pub fn neighbors(
        &self,
        center: GridCoord,
        radius: u32,
    ) -> impl Iterator<Item = &WaveParticle> + '_ {
        let last = (self.resolution - 1) as u32;
        let lo = center.saturating_sub(UVec2::splat(radius));
        let hi = center.saturating_add(UVec2::splat(radius)).min(UVec2::splat(last));
        // A window entirely past the far edge covers no cells
        let (x_range, y_range) = if lo.x > last || lo.y > last {
            (1..=0, 1..=0)
        } else {
            (lo.x..=hi.x, lo.y..=hi.y)
        };
        x_range
            .flat_map(move |i| y_range.clone().map(move |j| UVec2::new(i, j)))
            .flat_map(move |coord| self.cell(coord).iter())
    }

    /// Collect the neighborhood into a vector. No ordering guarantee.
    pub fn query(&self, center: GridCoord, radius: u32) -> Vec<WaveParticle> {
        self.neighbors(center, radius).copied().collect()
    }

    /// Drop every binned particle
    pub fn clear(&mut self) {
        self.particles.clear();
        self.cell_start.iter_mut().for_each(|s| *s = 0);
    }
}
