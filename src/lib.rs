//! Wave Ripples - a wave-particle water surface
//!
//! Core modules:
//! - `sim`: Wave particles, spatial bins, wavefronts and height field reconstruction
//! - `surface`: Height field triangulation for the renderer
//! - `settings`: Tunable parameters

pub mod settings;
pub mod sim;
pub mod surface;

pub use settings::WaterSettings;
pub use sim::{HeightField, TickInput, WaterSurface, tick};

/// Simulation defaults
pub mod consts {
    /// Half-width of the square water domain
    pub const DEFAULT_WIDTH: f32 = 60.0;
    /// Grid cells per axis
    pub const DEFAULT_RESOLUTION: usize = 100;
    /// Largest accepted grid resolution
    pub const MAX_RESOLUTION: usize = 2048;
    /// Minimum seconds between simulation ticks
    pub const DEFAULT_TICK_RATE: f64 = 0.01;

    /// Particles at or below this amplitude are removed
    pub const DEFAULT_THRESHOLD: f32 = 0.01;
    /// Amplitude of a freshly spawned particle
    pub const DEFAULT_SPAWN_AMPLITUDE: f32 = 20.0;
    /// Kernel falloff radius
    pub const DEFAULT_KERNEL_RADIUS: f32 = 11.0;

    /// Split when neighbors are more than half a kernel radius apart
    pub const DEFAULT_SPLIT_FACTOR: f32 = 0.5;
    /// Amplitude divisor per split
    pub const DEFAULT_SPLIT_DECAY: f32 = 1.6;

    /// Neighbor search radius in cells for height reconstruction
    pub const DEFAULT_NEIGHBOR_RADIUS: u32 = 4;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
