//! Effect settings
//!
//! Production values are the fixed constants in [`crate::consts`]; nothing is
//! loaded at runtime. Tests build narrower variants.

use std::time::Duration;

use crate::consts::*;
use crate::particles::ParticleRanges;
use crate::timer::timeout_ms;

/// Selectors, classes and timings used by [`crate::mount`]
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSettings {
    // === Word rotation ===
    /// Selector matching every rotating word
    pub word_selector: &'static str,
    /// Class toggled on the highlighted word
    pub active_class: &'static str,
    /// Time between two rotations
    pub rotation_interval: Duration,

    // === Particle field ===
    /// Selector of the host section
    pub host_selector: &'static str,
    /// Class of the wrapper appended to the host
    pub container_class: &'static str,
    /// Class of each particle
    pub particle_class: &'static str,
    /// Number of particles to generate
    pub particle_count: usize,
    /// Sampling ranges for each particle attribute
    pub ranges: ParticleRanges,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            word_selector: WORD_SELECTOR,
            active_class: ACTIVE_CLASS,
            rotation_interval: Duration::from_millis(ROTATION_INTERVAL_MS as u64),

            host_selector: HOST_SELECTOR,
            container_class: CONTAINER_CLASS,
            particle_class: PARTICLE_CLASS,
            particle_count: PARTICLE_COUNT,
            ranges: ParticleRanges::default(),
        }
    }
}

impl HeroSettings {
    /// Same settings with a different particle count
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Same settings with a different rotation period
    pub fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = interval;
        self
    }

    /// Rotation period in whole milliseconds, as browser timers expect
    pub fn rotation_interval_ms(&self) -> i32 {
        timeout_ms(self.rotation_interval)
    }
}
