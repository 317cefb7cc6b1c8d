//! Rotating highlight word
//!
//! Exactly one word carries the active class. Each tick moves it to the next
//! word, wrapping after the last.

use std::time::Duration;

use crate::dom::Element;
use crate::timer::Scheduler;

/// Cyclic cursor over the rotating words
#[derive(Debug, Clone)]
pub struct WordRotator<E: Element> {
    words: Vec<E>,
    current: usize,
    active_class: String,
}

impl<E: Element> WordRotator<E> {
    /// Take ownership of the word set and highlight the first word.
    /// Returns `Ok(None)` for an empty set: there is nothing to rotate.
    pub fn new(words: Vec<E>, active_class: &str) -> Result<Option<Self>, E::Error> {
        if words.is_empty() {
            return Ok(None);
        }

        // Markup may pre-mark some other word; only index 0 starts active
        let rotator = Self {
            words,
            current: 0,
            active_class: active_class.to_string(),
        };
        rotator.sync()?;
        Ok(Some(rotator))
    }

    /// Index of the highlighted word
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true for a constructed rotator
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[E] {
        &self.words
    }

    /// Move the highlight to the next word. Returns the new index.
    ///
    /// If the backend rejects a class change the index still advances; the
    /// next tick rewrites every word, so a stale highlight does not survive it.
    pub fn advance(&mut self) -> Result<usize, E::Error> {
        self.current = (self.current + 1) % self.words.len();
        self.sync()?;
        Ok(self.current)
    }

    /// Set the active class on `current` and clear it from every other word.
    /// All words are visited even after a failure; the first error is returned.
    fn sync(&self) -> Result<(), E::Error> {
        let mut first_err = None;
        for (i, word) in self.words.iter().enumerate() {
            if let Err(err) = word.set_class(&self.active_class, i == self.current) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Hand the rotator to `scheduler`, advancing once per `period`
    pub fn start<S: Scheduler>(
        self,
        scheduler: &S,
        period: Duration,
    ) -> Result<S::Handle, S::Error>
    where
        E: 'static,
    {
        let mut rotator = self;
        scheduler.set_interval(
            period,
            Box::new(move || {
                if let Err(err) = rotator.advance() {
                    log::warn!("Word rotation failed: {:?}", err);
                }
            }),
        )
    }
}

/// Start rotating `words`, or do nothing (no timer) if there are none
pub fn rotate_words<E, S>(
    words: Vec<E>,
    active_class: &str,
    scheduler: &S,
    period: Duration,
) -> Result<Option<S::Handle>, S::Error>
where
    E: Element + 'static,
    S: Scheduler,
    S::Error: From<E::Error>,
{
    match WordRotator::new(words, active_class)? {
        Some(rotator) => rotator.start(scheduler, period).map(Some),
        None => Ok(None),
    }
}
