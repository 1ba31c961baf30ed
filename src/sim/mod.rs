//! Wave-particle water simulation
//!
//! Pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (wavefront order, then particle order)
//! - No rendering or platform dependencies

pub mod bins;
pub mod clock;
pub mod fronts;
pub mod height_field;
pub mod particle;
pub mod state;
pub mod tick;

pub use bins::{GridCoord, SpatialBins};
pub use clock::SimulationClock;
pub use fronts::{WaveFront, WaveFrontManager, subdivide_front};
pub use height_field::{HeightField, HeightFieldSampler};
pub use particle::{KERNEL_CUTOFF, WaveParticle, rf};
pub use state::{SurfaceStats, WaterSurface};
pub use tick::{TickInput, tick};
