//! Next-tick deferral
//!
//! Some work must wait until the host has finished the current update, e.g.
//! measuring an element that was only just inserted into the document.
//! [`NextTick`] holds that work until the host's next scheduling tick.
//!
//! Items deferred while a tick is being processed land in the queue after
//! [`NextTick::take`] has already emptied it, so they run on the following
//! tick rather than re-entering the current one.

use smallvec::SmallVec;
use std::collections::VecDeque;

/// FIFO of work deferred to the next tick
#[derive(Debug)]
pub struct NextTick<T> {
    queue: VecDeque<T>,
}

impl<T> NextTick<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Defer an item to the next tick
    pub fn defer(&mut self, item: T) {
        self.queue.push_back(item);
    }

    /// Take everything deferred so far, in insertion order
    pub fn take(&mut self) -> SmallVec<[T; 4]> {
        let items: SmallVec<[T; 4]> = self.queue.drain(..).collect();
        if !items.is_empty() {
            tracing::trace!(count = items.len(), "running next-tick continuations");
        }
        items
    }

    /// Drop deferred items matching `predicate`
    ///
    /// Returns how many were removed.
    pub fn cancel_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.queue.len();
        self.queue.retain(|item| !predicate(item));
        before - self.queue.len()
    }

    /// Whether any deferred item matches `predicate`
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.queue.iter().any(predicate)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for NextTick<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_preserves_order() {
        let mut tick = NextTick::new();
        tick.defer(1);
        tick.defer(2);
        tick.defer(3);

        assert_eq!(tick.take().as_slice(), &[1, 2, 3]);
        assert!(tick.is_empty());
    }

    #[test]
    fn test_deferred_during_tick_runs_next_time() {
        let mut tick = NextTick::new();
        tick.defer("mount");

        let batch = tick.take();
        for _ in batch {
            tick.defer("update");
        }

        assert_eq!(tick.len(), 1);
        assert_eq!(tick.take().as_slice(), &["update"]);
    }

    #[test]
    fn test_cancel_where() {
        let mut tick = NextTick::new();
        tick.defer(1);
        tick.defer(2);
        tick.defer(1);

        assert!(tick.any(|n| *n == 2));
        assert_eq!(tick.cancel_where(|n| *n == 1), 2);
        assert_eq!(tick.take().as_slice(), &[2]);
    }
}
