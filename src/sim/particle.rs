//! Wave particles and their radial displacement kernel
//!
//! A wave particle is a point-like pulse travelling in a fixed direction.
//! Its contribution to the surface is a half-cosine bump windowed by a
//! stepped falloff, so the kernel is compactly supported within
//! `2 * radius * 0.8` of the particle.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::consts::{DEFAULT_KERNEL_RADIUS, DEFAULT_SPAWN_AMPLITUDE};

/// Normalized distance beyond which the window is zero
pub const KERNEL_CUTOFF: f32 = 0.8;

/// A propagating radial pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParticle {
    /// Spawn location, fixed for the particle's lifetime
    pub origin: Vec2,
    /// Current location
    pub position: Vec2,
    /// Heading (unit length at creation)
    pub direction: Vec2,
    /// Pulse strength, never increases
    pub amplitude: f32,
    /// Falloff radius of the kernel
    pub radius: f32,
    /// Phase angle in degrees, reserved for visual use
    #[serde(default)]
    pub disp_angle: f32,
    /// Per-particle speed multiplier, reserved
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

impl Default for WaveParticle {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            position: Vec2::ZERO,
            direction: Vec2::Y,
            amplitude: DEFAULT_SPAWN_AMPLITUDE,
            radius: DEFAULT_KERNEL_RADIUS,
            disp_angle: 0.0,
            speed: default_speed(),
        }
    }
}

impl WaveParticle {
    /// Create a particle sitting at its origin
    pub fn new(origin: Vec2, direction: Vec2, amplitude: f32, radius: f32) -> Self {
        Self {
            origin,
            position: origin,
            direction,
            amplitude,
            radius,
            ..Default::default()
        }
    }

    /// Builder-style phase angle
    pub fn with_disp_angle(mut self, disp_angle: f32) -> Self {
        self.disp_angle = disp_angle;
        self
    }

    /// Height contribution of this particle at `x`
    #[inline]
    pub fn displacement(&self, x: Vec2) -> f32 {
        let d = x.distance(self.position);
        let carrier = (PI * d / self.radius).cos() + 1.0;
        let window = rf(d / (2.0 * self.radius));
        (self.amplitude / 2.0) * carrier * window
    }

    /// Distance beyond which `displacement` is always zero
    #[inline]
    pub fn support(&self) -> f32 {
        2.0 * self.radius * KERNEL_CUTOFF
    }

    /// Distance travelled from the spawn point
    #[inline]
    pub fn travelled(&self) -> f32 {
        self.origin.distance(self.position)
    }

    /// Move one step along the heading
    #[inline]
    pub fn step(&mut self) {
        self.position += self.direction;
    }

    /// True if the particle lies strictly inside `(-width, width)` on both axes
    #[inline]
    pub fn in_bounds(&self, width: f32) -> bool {
        self.position.x > -width
            && self.position.x < width
            && self.position.y > -width
            && self.position.y < width
    }

    /// True if the particle should stay in the simulation
    #[inline]
    pub fn is_alive(&self, width: f32, threshold: f32) -> bool {
        self.in_bounds(width) && self.amplitude > threshold
    }
}

/// Stepped window on normalized distance
#[inline]
pub fn rf(t: f32) -> f32 {
    let t = t.abs();
    if t < 0.5 {
        1.0
    } else if t < 0.6 {
        0.5
    } else if t < KERNEL_CUTOFF {
        0.2
    } else {
        0.0
    }
}
