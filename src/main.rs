//! Hero Motion entry point
//!
//! On the web: mounts the effects once the document is ready.
//! Natively: runs them against an in-memory landing page on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_hero {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    use hero_motion::timer::IntervalHandle;
    use hero_motion::timer::web::BrowserScheduler;
    use hero_motion::{HeroSettings, mount};

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if document.ready_state() != "loading" {
            return on_ready(&window, &document);
        }

        let ready_document = document.clone();
        let closure = Closure::once(move |_event: web_sys::Event| {
            if let Err(err) = on_ready(&window, &ready_document) {
                log::error!("Hero effects failed to start: {:?}", err);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
        Ok(())
    }

    fn on_ready(window: &Window, document: &Document) -> Result<(), JsValue> {
        let scheduler = BrowserScheduler::new(window.clone());
        // A missing entropy source must not keep the words from rotating
        let mut rng = Pcg32::try_from_os_rng().unwrap_or_else(|err| {
            log::warn!("OS entropy unavailable ({}), seeding particles from the clock", err);
            Pcg32::seed_from_u64(js_sys::Date::now().to_bits())
        });

        let mounted = mount(document, &scheduler, &mut rng, &HeroSettings::default())?;
        // Rotation runs until the page unloads
        if let Some(rotation) = mounted.rotation {
            rotation.detach();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_hero::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hero_motion::dom::{Element, MemoryPage, Page};
    use hero_motion::timer::VirtualClock;
    use hero_motion::{HeroSettings, mount};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Hero Motion (native) starting...");
    log::info!("Native mode runs on an in-memory page - use `trunk serve` for the web version");

    let settings = HeroSettings::default();
    let page = MemoryPage::landing(&["Faster", "Safer", "Smarter"], true);
    let clock = VirtualClock::new();
    let mut rng = Pcg32::seed_from_u64(0x5eed);

    let Ok(mounted) = mount(&page, &clock, &mut rng, &settings);
    if let Some(layer) = &mounted.particles {
        if let Some(p) = layer.field.particles.first() {
            println!(
                "First particle: {}px at ({}%, {}%), delay {}s, duration {}s",
                p.size, p.x, p.y, p.delay, p.duration
            );
        }
    }

    let words = page.select_all(settings.word_selector);
    for _ in 0..=mounted.words {
        let active = words
            .iter()
            .find(|w| w.has_class(settings.active_class))
            .and_then(|w| w.id())
            .unwrap_or_default();
        println!("t={:>5}ms  active: {}", clock.now_ms(), active);
        clock.advance_by(settings.rotation_interval);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
