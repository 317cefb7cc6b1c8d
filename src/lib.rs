//! Hero Motion - landing page hero effects
//!
//! Core modules:
//! - `rotator`: Cycles the `active` highlight through the rotating words
//! - `particles`: Randomized floating particle field behind the hero
//! - `timer`: Periodic scheduling (browser interval or virtual clock)
//! - `dom`: Element/page abstraction (web-sys or in-memory tree)
//! - `hero`: Page-ready wiring of the two effects
//! - `settings`: Fixed selectors, classes, timings and ranges

pub mod dom;
pub mod hero;
pub mod particles;
pub mod rotator;
pub mod settings;
pub mod timer;

pub use hero::{Mounted, mount};
pub use particles::{Particle, ParticleField, ParticleLayer, ParticleRanges, spawn_particles};
pub use rotator::{WordRotator, rotate_words};
pub use settings::HeroSettings;

/// Effect configuration constants
pub mod consts {
    /// Selector for the words cycled by the rotator
    pub const WORD_SELECTOR: &str = ".rotating-word";
    /// Class marking the highlighted word
    pub const ACTIVE_CLASS: &str = "active";
    /// Selector for the section particles are mounted into
    pub const HOST_SELECTOR: &str = ".hero-section";
    /// Class of the generated particle wrapper
    pub const CONTAINER_CLASS: &str = "particles-container";
    /// Class of each generated particle
    pub const PARTICLE_CLASS: &str = "particle";

    /// Word rotation period
    pub const ROTATION_INTERVAL_MS: u32 = 1500;
    /// Particles generated per page load
    pub const PARTICLE_COUNT: usize = 50;

    /// Particle size in px, [min, max)
    pub const PARTICLE_SIZE: (f32, f32) = (1.0, 5.0);
    /// Horizontal/vertical position in percent, [min, max)
    pub const PARTICLE_POSITION: (f32, f32) = (0.0, 100.0);
    /// Animation delay in seconds, [min, max)
    pub const PARTICLE_DELAY: (f32, f32) = (0.0, 4.0);
    /// Animation duration in seconds, [min, max)
    pub const PARTICLE_DURATION: (f32, f32) = (2.0, 5.0);
}
