//! Floating particle field
//!
//! A one-shot batch of decorative `div.particle` elements. Each particle gets
//! five attributes drawn independently and uniformly from half-open ranges;
//! the page's CSS animation does the rest. Nothing here touches the
//! particles again after they are mounted.

use std::ops::Range;

use rand::Rng;

use crate::consts::*;
use crate::dom::Element;
use crate::settings::HeroSettings;

/// Sampling ranges, each half-open `[start, end)`
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRanges {
    /// Width and height in px
    pub size: Range<f32>,
    /// Left offset in percent of the host
    pub x: Range<f32>,
    /// Top offset in percent of the host
    pub y: Range<f32>,
    /// Animation delay in seconds
    pub delay: Range<f32>,
    /// Animation duration in seconds
    pub duration: Range<f32>,
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            size: PARTICLE_SIZE.0..PARTICLE_SIZE.1,
            x: PARTICLE_POSITION.0..PARTICLE_POSITION.1,
            y: PARTICLE_POSITION.0..PARTICLE_POSITION.1,
            delay: PARTICLE_DELAY.0..PARTICLE_DELAY.1,
            duration: PARTICLE_DURATION.0..PARTICLE_DURATION.1,
        }
    }
}

impl ParticleRanges {
    /// Whether every attribute of `p` lies in its range
    pub fn contains(&self, p: &Particle) -> bool {
        self.size.contains(&p.size)
            && self.x.contains(&p.x)
            && self.y.contains(&p.y)
            && self.delay.contains(&p.delay)
            && self.duration.contains(&p.duration)
    }
}

/// Uniform draw from `[start, end)`. Float rounding can land a draw exactly on
/// `end`; such draws are pulled back to the largest value below it.
fn sample_half_open<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    rng.random_range(range.clone()).min(float_below(range.end))
}

/// Largest `f32` strictly less than a finite `x`
fn float_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// One decorative particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub delay: f32,
    pub duration: f32,
}

impl Particle {
    /// Draw each attribute independently from `ranges`
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, ranges: &ParticleRanges) -> Self {
        Self {
            size: sample_half_open(rng, &ranges.size),
            x: sample_half_open(rng, &ranges.x),
            y: sample_half_open(rng, &ranges.y),
            delay: sample_half_open(rng, &ranges.delay),
            duration: sample_half_open(rng, &ranges.duration),
        }
    }

    /// Inline style properties, in the order they are applied
    pub fn style_properties(&self) -> [(&'static str, String); 6] {
        let size = format!("{}px", self.size);
        [
            ("width", size.clone()),
            ("height", size),
            ("left", format!("{}%", self.x)),
            ("top", format!("{}%", self.y)),
            ("animation-delay", format!("{}s", self.delay)),
            ("animation-duration", format!("{}s", self.duration)),
        ]
    }
}

/// A generated batch of particles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, ranges: &ParticleRanges) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::sample(rng, ranges)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Create the container under `host` and one styled child per particle
    pub fn mount<E: Element>(
        &self,
        host: &E,
        container_class: &str,
        particle_class: &str,
    ) -> Result<E, E::Error> {
        let container = host.append_new("div", container_class)?;
        for particle in &self.particles {
            let el = container.append_new("div", particle_class)?;
            for (property, value) in particle.style_properties() {
                el.set_style(property, &value)?;
            }
        }
        Ok(container)
    }
}

/// A mounted particle field
#[derive(Debug, Clone)]
pub struct ParticleLayer<E> {
    /// The `particles-container` element appended to the host
    pub container: E,
    pub field: ParticleField,
}

/// Fill `host` with a fresh particle field. No host, no particles.
pub fn spawn_particles<E: Element, R: Rng + ?Sized>(
    host: Option<&E>,
    rng: &mut R,
    settings: &HeroSettings,
) -> Result<Option<ParticleLayer<E>>, E::Error> {
    let Some(host) = host else {
        return Ok(None);
    };

    let field = ParticleField::generate(rng, settings.particle_count, &settings.ranges);
    let container = field.mount(host, settings.container_class, settings.particle_class)?;
    Ok(Some(ParticleLayer { container, field }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryElement, MemoryPage, Page};
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Every draw returns the same bit pattern
    struct ConstRng(u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    fn parse(value: &str, suffix: &str) -> f32 {
        value.strip_suffix(suffix).unwrap().parse().unwrap()
    }

    #[test]
    fn test_zero_rng_hits_lower_bounds() {
        let p = Particle::sample(&mut ConstRng(0), &ParticleRanges::default());
        assert_eq!(
            p,
            Particle {
                size: 1.0,
                x: 0.0,
                y: 0.0,
                delay: 0.0,
                duration: 2.0,
            }
        );
    }

    #[test]
    fn test_max_rng_stays_below_upper_bounds() {
        let ranges = ParticleRanges::default();
        let p = Particle::sample(&mut ConstRng(u64::MAX), &ranges);
        assert!(ranges.contains(&p), "{:?}", p);
        assert!(p.size > 4.99 && p.size < 5.0);
        assert!(p.x > 99.99 && p.x < 100.0);
        assert!(p.duration > 4.99 && p.duration < 5.0);
    }

    #[test]
    fn test_float_below() {
        assert!(float_below(5.0) < 5.0);
        assert_eq!(float_below(5.0), f32::from_bits(5.0f32.to_bits() - 1));
        assert!(float_below(0.0) < 0.0);
        assert!(float_below(-1.0) < -1.0);
        assert!(float_below(-1.0) > -1.0001);
    }

    #[test]
    fn test_style_properties() {
        let p = Particle {
            size: 2.5,
            x: 10.0,
            y: 42.25,
            delay: 0.5,
            duration: 3.0,
        };
        let props = p.style_properties();
        assert_eq!(props[0], ("width", "2.5px".to_string()));
        assert_eq!(props[1], ("height", "2.5px".to_string()));
        assert_eq!(props[2], ("left", "10%".to_string()));
        assert_eq!(props[3], ("top", "42.25%".to_string()));
        assert_eq!(props[4], ("animation-delay", "0.5s".to_string()));
        assert_eq!(props[5], ("animation-duration", "3s".to_string()));
    }

    #[test]
    fn test_spawn_without_host() {
        let mut rng = Pcg32::seed_from_u64(7);
        let settings = HeroSettings::default();
        let layer = spawn_particles::<MemoryElement, _>(None, &mut rng, &settings).unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_spawn_builds_container_with_fifty_particles() {
        let page = MemoryPage::landing(&["A"], true);
        let host = page.select(".hero-section");
        let mut rng = Pcg32::seed_from_u64(12345);

        let layer = spawn_particles(host.as_ref(), &mut rng, &HeroSettings::default())
            .unwrap()
            .unwrap();

        assert_eq!(page.select_all(".particles-container").len(), 1);
        assert_eq!(layer.field.len(), 50);

        let children = layer.container.children();
        assert_eq!(children.len(), 50);
        let ranges = ParticleRanges::default();
        for (el, particle) in children.iter().zip(&layer.field.particles) {
            assert_eq!(el.tag(), "div");
            assert!(el.has_class("particle"));
            assert!(ranges.contains(particle));

            let size = parse(&el.style("width").unwrap(), "px");
            assert_eq!(size, particle.size);
            assert_eq!(el.style("height"), el.style("width"));
            assert_eq!(parse(&el.style("left").unwrap(), "%"), particle.x);
            assert_eq!(parse(&el.style("top").unwrap(), "%"), particle.y);
            assert_eq!(parse(&el.style("animation-delay").unwrap(), "s"), particle.delay);
            assert_eq!(parse(&el.style("animation-duration").unwrap(), "s"), particle.duration);
        }
    }

    #[test]
    fn test_container_is_last_child_of_host() {
        let page = MemoryPage::landing(&["A"], true);
        let host = page.select(".hero-section").unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let layer = spawn_particles(Some(&host), &mut rng, &HeroSettings::default())
            .unwrap()
            .unwrap();
        let last = host.children().pop().unwrap();
        assert!(last.ptr_eq(&layer.container));
        assert!(last.has_class("particles-container"));
    }

    #[test]
    fn test_same_seed_same_field() {
        let ranges = ParticleRanges::default();
        let a = ParticleField::generate(&mut Pcg32::seed_from_u64(99), 50, &ranges);
        let b = ParticleField::generate(&mut Pcg32::seed_from_u64(99), 50, &ranges);
        let c = ParticleField::generate(&mut Pcg32::seed_from_u64(100), 50, &ranges);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_attributes_are_not_linked() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = ParticleField::generate(&mut rng, 50, &ParticleRanges::default());
        // Independent draws: x and y differ somewhere in the batch
        assert!(field.particles.iter().any(|p| p.x != p.y));
        let first = field.particles[0];
        assert!(field.particles.iter().skip(1).any(|p| *p != first));
    }

    #[test]
    fn test_position_mean_is_centered() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let field = ParticleField::generate(&mut rng, 5000, &ParticleRanges::default());
        let mean_x: f32 = field.particles.iter().map(|p| p.x).sum::<f32>() / 5000.0;
        let mean_delay: f32 = field.particles.iter().map(|p| p.delay).sum::<f32>() / 5000.0;
        assert!((mean_x - 50.0).abs() < 3.0, "mean x {}", mean_x);
        assert!((mean_delay - 2.0).abs() < 0.15, "mean delay {}", mean_delay);
    }

    #[test]
    fn test_custom_count() {
        let page = MemoryPage::landing(&[], true);
        let host = page.select(".hero-section");
        let settings = HeroSettings::default().with_particle_count(0);
        let layer = spawn_particles(host.as_ref(), &mut Pcg32::seed_from_u64(5), &settings)
            .unwrap()
            .unwrap();
        // Container is still created, just empty
        assert!(layer.container.children().is_empty());
        assert!(layer.field.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_particle_in_range(seed in any::<u64>()) {
            let ranges = ParticleRanges::default();
            let field = ParticleField::generate(&mut Pcg32::seed_from_u64(seed), 50, &ranges);
            prop_assert_eq!(field.len(), 50);
            for p in &field.particles {
                prop_assert!(ranges.contains(p), "{:?}", p);
            }
        }
    }
}
