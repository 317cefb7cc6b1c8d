//! Element backend that rejects chosen operations, for exercising error paths

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::{Element, MemoryElement, MemoryPage, Page};
use crate::timer::{Scheduler, TickFn, VirtualClock, VirtualInterval};

/// Error reported by the faulty backend
#[derive(Debug, Clone, PartialEq)]
pub struct DomFault(pub &'static str);

/// Which operations fail
#[derive(Debug, Default)]
pub struct Faults {
    /// Class removals still to reject
    pub fail_removals: Cell<u32>,
    /// Reject every `append_new`
    pub fail_appends: Cell<bool>,
}

/// A [`MemoryElement`] whose operations consult shared [`Faults`]
#[derive(Debug, Clone)]
pub struct FaultyElement {
    pub inner: MemoryElement,
    faults: Rc<Faults>,
}

impl FaultyElement {
    pub fn wrap(inner: MemoryElement, faults: &Rc<Faults>) -> Self {
        Self {
            inner,
            faults: faults.clone(),
        }
    }
}

impl Element for FaultyElement {
    type Error = DomFault;

    fn set_class(&self, class: &str, on: bool) -> Result<(), DomFault> {
        let pending = self.faults.fail_removals.get();
        if !on && pending > 0 {
            self.faults.fail_removals.set(pending - 1);
            return Err(DomFault("class removal rejected"));
        }
        let Ok(()) = self.inner.set_class(class, on);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.has_class(class)
    }

    fn append_new(&self, tag: &str, class: &str) -> Result<Self, DomFault> {
        if self.faults.fail_appends.get() {
            return Err(DomFault("append rejected"));
        }
        let Ok(child) = self.inner.append_new(tag, class);
        Ok(Self::wrap(child, &self.faults))
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), DomFault> {
        let Ok(()) = self.inner.set_style(property, value);
        Ok(())
    }
}

/// A [`MemoryPage`] handing out [`FaultyElement`]s
pub struct FaultyPage {
    pub inner: MemoryPage,
    pub faults: Rc<Faults>,
}

impl FaultyPage {
    pub fn new(inner: MemoryPage) -> Self {
        Self {
            inner,
            faults: Rc::new(Faults::default()),
        }
    }
}

impl Page for FaultyPage {
    type Element = FaultyElement;

    fn select_all(&self, selector: &str) -> Vec<FaultyElement> {
        self.inner
            .select_all(selector)
            .into_iter()
            .map(|el| FaultyElement::wrap(el, &self.faults))
            .collect()
    }

    fn select(&self, selector: &str) -> Option<FaultyElement> {
        self.inner
            .select(selector)
            .map(|el| FaultyElement::wrap(el, &self.faults))
    }
}

/// [`VirtualClock`] reporting [`DomFault`] errors, so `mount` can surface them
#[derive(Clone, Default)]
pub struct FaultyClock(pub VirtualClock);

impl Scheduler for FaultyClock {
    type Handle = VirtualInterval;
    type Error = DomFault;

    fn set_interval(
        &self,
        period: Duration,
        callback: TickFn,
    ) -> Result<VirtualInterval, DomFault> {
        let Ok(handle) = self.0.set_interval(period, callback);
        Ok(handle)
    }
}
