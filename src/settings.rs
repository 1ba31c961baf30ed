//! Simulation settings
//!
//! Every tunable of the water model. Loaded from JSON; missing fields fall
//! back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable parameters injected into the water simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    // === Domain ===
    /// Half-width of the square domain
    pub width: f32,
    /// Grid cells per axis (bins and height field)
    pub resolution: usize,

    // === Timing ===
    /// Minimum time between simulation ticks
    pub tick_rate: f64,

    // === Particles ===
    /// Particles at or below this amplitude are removed
    pub threshold: f32,
    /// Amplitude of freshly spawned particles
    pub spawn_amplitude: f32,
    /// Kernel falloff radius
    pub kernel_radius: f32,

    // === Subdivision ===
    /// Neighbors split when farther apart than `kernel_radius * split_factor`
    pub split_factor: f32,
    /// Amplitude divisor applied to both neighbors on a split
    pub split_decay: f32,

    // === Reconstruction ===
    /// Neighbor search radius in cells
    pub neighbor_radius: u32,
    /// Global water level
    pub base_height: f32,

    // === Spawning ===
    /// Chance of a random spawn on each accepted tick (0 disables)
    pub spawn_chance: f64,
    /// RNG seed for spawn positions
    pub seed: u64,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            resolution: DEFAULT_RESOLUTION,

            tick_rate: DEFAULT_TICK_RATE,

            threshold: DEFAULT_THRESHOLD,
            spawn_amplitude: DEFAULT_SPAWN_AMPLITUDE,
            kernel_radius: DEFAULT_KERNEL_RADIUS,

            split_factor: DEFAULT_SPLIT_FACTOR,
            split_decay: DEFAULT_SPLIT_DECAY,

            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            base_height: 0.0,

            spawn_chance: 0.0,
            seed: 0,
        }
    }
}

impl WaterSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Clamp degenerate values into a range the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.resolution == 0 {
            log::warn!("resolution must be at least 1, using {}", defaults.resolution);
            self.resolution = defaults.resolution;
        }
        if self.resolution > MAX_RESOLUTION {
            log::warn!(
                "resolution {} is too large, capping at {}",
                self.resolution,
                MAX_RESOLUTION
            );
            self.resolution = MAX_RESOLUTION;
        }
        if !(self.width > 0.0) {
            log::warn!("width must be positive, using {}", defaults.width);
            self.width = defaults.width;
        }
        if !(self.kernel_radius > 0.0) {
            log::warn!("kernel_radius must be positive, using {}", defaults.kernel_radius);
            self.kernel_radius = defaults.kernel_radius;
        }
        if !(self.tick_rate >= 0.0) {
            log::warn!("tick_rate must not be negative, using {}", defaults.tick_rate);
            self.tick_rate = defaults.tick_rate;
        }
        if !(self.split_decay >= 1.0) {
            // A divisor below 1 would grow amplitudes on every split
            log::warn!("split_decay must be >= 1, using {}", defaults.split_decay);
            self.split_decay = defaults.split_decay;
        }
        if !(self.split_factor > 0.0) {
            log::warn!("split_factor must be positive, using {}", defaults.split_factor);
            self.split_factor = defaults.split_factor;
        }
        self.spawn_chance = if self.spawn_chance.is_nan() {
            0.0
        } else {
            self.spawn_chance.clamp(0.0, 1.0)
        };

        self
    }

}
