//! Page-ready wiring
//!
//! Queries the page once, then hands the elements to the rotator and the
//! particle generator. The two effects share nothing but the page.

use rand::Rng;

use crate::dom::{Element, Page};
use crate::particles::{ParticleLayer, spawn_particles};
use crate::rotator::rotate_words;
use crate::settings::HeroSettings;
use crate::timer::{IntervalHandle, Scheduler};

/// What [`mount`] set up
pub struct Mounted<E, H> {
    /// Number of rotating words found
    pub words: usize,
    /// Rotation timer, if there was anything to rotate
    pub rotation: Option<H>,
    /// Particle field, if the page had a host section
    pub particles: Option<ParticleLayer<E>>,
}

/// Start both effects on `page`
pub fn mount<P, S, R>(
    page: &P,
    scheduler: &S,
    rng: &mut R,
    settings: &HeroSettings,
) -> Result<Mounted<P::Element, S::Handle>, S::Error>
where
    P: Page,
    P::Element: 'static,
    S: Scheduler,
    S::Error: From<<P::Element as Element>::Error>,
    R: Rng + ?Sized,
{
    let words = page.select_all(settings.word_selector);
    let word_count = words.len();
    let rotation = rotate_words(
        words,
        settings.active_class,
        scheduler,
        settings.rotation_interval,
    )?;
    if rotation.is_some() {
        log::info!(
            "Rotating {} words every {}ms",
            word_count,
            settings.rotation_interval_ms()
        );
    }

    let host = page.select(settings.host_selector);
    let particles = match spawn_particles(host.as_ref(), rng, settings) {
        Ok(particles) => particles,
        Err(err) => {
            // The rotation does not depend on the particle field
            if let Some(rotation) = rotation {
                rotation.detach();
            }
            return Err(err.into());
        }
    };
    if let Some(layer) = &particles {
        log::info!("Spawned {} particles", layer.field.len());
    }

    Ok(Mounted {
        words: word_count,
        rotation,
        particles,
    })
}
