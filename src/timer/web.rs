//! `setInterval` backend

use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{IntervalHandle, Scheduler, TickFn, timeout_ms};

/// Schedules through `window.setInterval`
#[derive(Clone)]
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserInterval;
    type Error = JsValue;

    fn set_interval(
        &self,
        period: Duration,
        callback: TickFn,
    ) -> Result<BrowserInterval, JsValue> {
        let mut callback = callback;
        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let timeout = timeout_ms(period);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            )?;
        Ok(BrowserInterval {
            window: self.window.clone(),
            id,
            closure: Some(closure),
        })
    }
}

/// A live `setInterval` registration. Owns the JS closure; dropping the
/// handle without [`IntervalHandle::detach`] clears the interval so the
/// browser never calls a freed callback.
pub struct BrowserInterval {
    window: Window,
    id: i32,
    closure: Option<Closure<dyn FnMut()>>,
}

impl IntervalHandle for BrowserInterval {
    fn cancel(self) {
        // Drop clears the interval
    }

    fn detach(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for BrowserInterval {
    fn drop(&mut self) {
        if self.closure.is_some() {
            self.window.clear_interval_with_handle(self.id);
        }
    }
}
