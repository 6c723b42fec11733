//! Infinite-scroll trigger engine
//!
//! Watches a target element inside its scroll container and calls the
//! caller's "load more" callback when more content is needed.
//!
//! # Modes
//!
//! ```text
//!   mount ──tick──▶ Fill ──content overflows──▶ Steady
//!                    │                            │
//!           mutation │ (throttled 50ms)   scroll  │ (throttled 200ms)
//!                    ▼                            ▼
//!         fits? ─yes─▶ load more        near bottom & moving down?
//!                                               ─yes─▶ load more
//! ```
//!
//! - **Fill**: right after mount, and after every observed change to the
//!   target's subtree, the engine loads more while the content still fits in
//!   the container. Scroll events do not trigger in this mode.
//! - **Steady**: once the content overflows, the observer is discarded for
//!   good and only downward scrolling close enough to the bottom loads more.
//!
//! # Driving the engine
//!
//! The engine owns no timers. The host forwards [`DomEvent`]s through
//! [`InfiniteScroll::dispatch`] and calls [`InfiniteScroll::tick`] once per
//! frame (or when [`InfiniteScroll::next_deadline`] says so) to run deferred
//! mounts and trailing throttle invocations.
//!
//! ```rust
//! use quill_core::ManualClock;
//! use quill_dom::prelude::*;
//! use quill_scroll::{InfiniteScroll, InfiniteScrollConfig};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let dom = MemoryDom::new(800.0, 600.0);
//! let list = dom
//!     .create_element(ElementStyle::new().h(400.0).overflow_y(Overflow::Auto))
//!     .unwrap();
//! dom.append_child(dom.document_element(), list).unwrap();
//!
//! let clock = ManualClock::new();
//! let mut engine =
//!     InfiniteScroll::with_clock(dom.clone(), InfiniteScrollConfig::default(), clock.clone());
//!
//! let loads = Rc::new(Cell::new(0));
//! let counter = loads.clone();
//! engine.mount(list, move || counter.set(counter.get() + 1));
//!
//! // Nothing happens until the next tick
//! assert_eq!(loads.get(), 0);
//! engine.tick();
//!
//! // The empty list does not fill its container, so more was requested
//! assert_eq!(loads.get(), 1);
//! assert!(engine.is_filling(list));
//! ```

use std::time::Instant;

use quill_core::{Clock, NextTick, SystemClock};
use quill_dom::{
    get_scroll_container, offset_top_distance, Dom, DomEvent, EventTarget, MutationObserver,
    MutationRecord, NodeId, ObserveOptions, ObserverId,
};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::binding::{Binding, BindingId, LoadMore};
use crate::config::InfiniteScrollConfig;
use crate::error::InfiniteScrollError;

/// Work waiting for the next tick
enum Deferred {
    Mount { target: NodeId, callback: LoadMore },
    Update(NodeId),
}

impl Deferred {
    fn target(&self) -> NodeId {
        match self {
            Deferred::Mount { target, .. } => *target,
            Deferred::Update(target) => *target,
        }
    }
}

/// The infinite-scroll engine
///
/// One engine serves any number of targets; each mounted target gets its own
/// binding, keyed by element identity.
pub struct InfiniteScroll<D: Dom, C: Clock = SystemClock> {
    dom: D,
    clock: C,
    config: InfiniteScrollConfig,
    bindings: SlotMap<BindingId, Binding<D::Observer>>,
    by_target: FxHashMap<NodeId, BindingId>,
    by_observer: FxHashMap<ObserverId, BindingId>,
    pending: NextTick<Deferred>,
}

impl<D: Dom> InfiniteScroll<D, SystemClock> {
    /// Create an engine using wall-clock time
    pub fn new(dom: D, config: InfiniteScrollConfig) -> Self {
        Self::with_clock(dom, config, SystemClock)
    }
}

impl<D: Dom, C: Clock> InfiniteScroll<D, C> {
    /// Create an engine with an explicit time source
    pub fn with_clock(dom: D, config: InfiniteScrollConfig, clock: C) -> Self {
        Self {
            dom,
            clock,
            config,
            bindings: SlotMap::with_key(),
            by_target: FxHashMap::default(),
            by_observer: FxHashMap::default(),
            pending: NextTick::new(),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &InfiniteScrollConfig {
        &self.config
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Attach `callback` to `target`
    ///
    /// The binding is created on the next [`tick`](Self::tick), once the
    /// target is in the document. Mounting an already bound target replaces
    /// the previous binding.
    pub fn mount<F>(&mut self, target: NodeId, callback: F)
    where
        F: FnMut() + 'static,
    {
        if self.by_target.contains_key(&target) || self.is_pending(target) {
            debug!(node = ?target, "remounting infinite scroll target");
            self.unmount(target);
        }
        self.pending.defer(Deferred::Mount {
            target,
            callback: Box::new(callback),
        });
    }

    /// Re-check a mounted target after its owner re-rendered
    ///
    /// While still in fill mode and with a laid-out container, this runs
    /// another fill-check. Before the mount has completed the check is
    /// deferred to the next tick.
    pub fn update(&mut self, target: NodeId) {
        if let Some(&id) = self.by_target.get(&target) {
            self.run_update(id);
            return;
        }

        if self.is_pending(target) {
            trace!(error = %InfiniteScrollError::PrematureUpdate(target), "deferring update");
            self.pending.defer(Deferred::Update(target));
        } else {
            trace!(node = ?target, "update for unbound target ignored");
        }
    }

    /// Detach `target`, releasing its listener and observer
    ///
    /// Safe to call repeatedly, and before the mount has completed.
    pub fn unmount(&mut self, target: NodeId) {
        let cancelled = self.pending.cancel_where(|d| d.target() == target);
        if cancelled > 0 {
            trace!(node = ?target, cancelled, "cancelled deferred work");
        }

        let Some(id) = self.by_target.remove(&target) else {
            return;
        };
        let Some(mut binding) = self.bindings.remove(id) else {
            return;
        };

        self.dom.remove_scroll_listener(binding.listener);
        if let Some(mut observer) = binding.observer.take() {
            self.by_observer.remove(&observer.id());
            observer.disconnect();
        }
        debug!(node = ?target, "infinite scroll unmounted");
    }

    /// Suspend or resume loading for a mounted target
    ///
    /// Re-enabling runs the same re-check as [`update`](Self::update).
    /// Returns `false` if the target is not mounted.
    pub fn set_disabled(&mut self, target: NodeId, disabled: bool) -> bool {
        let Some(&id) = self.by_target.get(&target) else {
            return false;
        };
        let was_disabled = match self.bindings.get_mut(id) {
            Some(binding) => std::mem::replace(&mut binding.disabled, disabled),
            None => return false,
        };
        if was_disabled && !disabled {
            self.run_update(id);
        }
        true
    }

    /// Run a fill-check now
    ///
    /// Only has an effect while the target is in fill mode.
    pub fn check_full(&mut self, target: NodeId) {
        if let Some(&id) = self.by_target.get(&target) {
            self.run_check_full(id);
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Route a host event
    pub fn dispatch(&mut self, event: DomEvent) {
        match event {
            DomEvent::Scroll(target) => self.handle_scroll(target),
            DomEvent::Mutations { observer, records } => self.handle_mutations(observer, &records),
        }
    }

    /// Route a batch of host events in order
    pub fn dispatch_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = DomEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    /// A scroll happened on `target`
    pub fn handle_scroll(&mut self, target: EventTarget) {
        let now = self.clock.now();
        let ids: SmallVec<[BindingId; 4]> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.container.event_target() == target)
            .map(|(id, _)| id)
            .collect();

        for id in ids {
            let run = self
                .bindings
                .get_mut(id)
                .map(|b| b.scroll_gate.call(now))
                .unwrap_or(false);
            if run {
                self.run_scroll(id);
            }
        }
    }

    /// An observer delivered mutation records
    pub fn handle_mutations(&mut self, observer: ObserverId, records: &[MutationRecord]) {
        let Some(&id) = self.by_observer.get(&observer) else {
            trace!(?observer, "mutations for retired observer ignored");
            return;
        };
        let now = self.clock.now();
        let run = self
            .bindings
            .get_mut(id)
            .map(|b| b.check_gate.call(now))
            .unwrap_or(false);
        trace!(records = records.len(), run, "target subtree changed");
        if run {
            self.run_check_full(id);
        }
    }

    /// Run deferred work and any trailing throttle invocations that are due
    pub fn tick(&mut self) {
        for deferred in self.pending.take() {
            match deferred {
                Deferred::Mount { target, callback } => self.complete_mount(target, callback),
                Deferred::Update(target) => match self.by_target.get(&target) {
                    Some(&id) => self.run_update(id),
                    None => trace!(node = ?target, "deferred update found no binding"),
                },
            }
        }

        let now = self.clock.now();
        let ids: SmallVec<[BindingId; 8]> = self.bindings.keys().collect();
        for id in ids {
            let Some(binding) = self.bindings.get_mut(id) else {
                continue;
            };
            let check_due = binding.is_filling() && binding.check_gate.poll(now);
            let scroll_due = binding.scroll_gate.poll(now);

            if check_due {
                self.run_check_full(id);
            }
            if scroll_due {
                self.run_scroll(id);
            }
        }
    }

    /// When [`tick`](Self::tick) next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.pending.is_empty() {
            return Some(self.clock.now());
        }
        self.bindings
            .values()
            .flat_map(|b| {
                let check = if b.is_filling() {
                    b.check_gate.deadline()
                } else {
                    None
                };
                [b.scroll_gate.deadline(), check]
            })
            .flatten()
            .min()
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// Whether `target` has a live binding
    pub fn is_mounted(&self, target: NodeId) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Whether `target` is still in fill mode
    pub fn is_filling(&self, target: NodeId) -> bool {
        self.binding(target).is_some_and(|b| b.is_filling())
    }

    /// Whether `target` is disabled
    pub fn is_disabled(&self, target: NodeId) -> bool {
        self.binding(target).is_some_and(|b| b.disabled)
    }

    /// Whether a mount or update for `target` is waiting for the next tick
    pub fn is_pending(&self, target: NodeId) -> bool {
        self.pending.any(|d| d.target() == target)
    }

    /// Number of live bindings
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    fn binding(&self, target: NodeId) -> Option<&Binding<D::Observer>> {
        self.by_target
            .get(&target)
            .and_then(|id| self.bindings.get(*id))
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Second half of [`mount`](Self::mount), run on the tick after it
    fn complete_mount(&mut self, target: NodeId, callback: LoadMore) {
        let Some(container) = get_scroll_container(&self.dom, target, self.config.axis) else {
            debug!(
                error = %InfiniteScrollError::MissingContainer(target),
                "infinite scroll disabled"
            );
            return;
        };
        let container_el = container.element(&self.dom);
        let scroll_top = self.dom.metrics(container_el).scroll_top;
        let listener = self.dom.add_scroll_listener(container.event_target());

        let mut binding = Binding::new(
            target,
            container,
            container_el,
            callback,
            scroll_top,
            listener,
            &self.config,
        );

        let observer = if self.config.immediate {
            let mut observer = self.dom.create_mutation_observer();
            observer.observe(target, ObserveOptions::subtree_children());
            Some(observer)
        } else {
            None
        };
        let observer_id = observer.as_ref().map(|o| o.id());
        binding.observer = observer;

        let id = self.bindings.insert(binding);
        self.by_target.insert(target, id);
        if let Some(observer_id) = observer_id {
            self.by_observer.insert(observer_id, id);
        }
        debug!(
            node = ?target,
            ?container,
            filling = observer_id.is_some(),
            "infinite scroll mounted"
        );

        if observer_id.is_some() {
            self.run_check_full(id);
        }
    }

    fn run_update(&mut self, id: BindingId) {
        let Some(binding) = self.bindings.get(id) else {
            return;
        };
        if !binding.is_filling() {
            return;
        }
        if self.dom.metrics(binding.container_el).client_height != 0.0 {
            self.run_check_full(id);
        }
    }

    /// Fill-check: load more while the content still fits
    fn run_check_full(&mut self, id: BindingId) {
        let Some(binding) = self.bindings.get_mut(id) else {
            return;
        };
        if binding.disabled || !binding.is_filling() {
            return;
        }

        let metrics = self.dom.metrics(binding.container_el);
        if metrics.client_height == 0.0 {
            trace!(node = ?binding.target, "container not laid out; fill check deferred");
            return;
        }

        if metrics.scroll_height <= metrics.client_height {
            trace!(
                node = ?binding.target,
                scroll_height = metrics.scroll_height,
                client_height = metrics.client_height,
                "content does not fill container; loading more"
            );
            binding.load_more();
        } else if let Some(mut observer) = binding.observer.take() {
            self.by_observer.remove(&observer.id());
            observer.disconnect();
            binding.check_gate.cancel();
            debug!(node = ?binding.target, "content overflows container; fill mode finished");
        }
    }

    /// Scroll-trigger decision
    fn run_scroll(&mut self, id: BindingId) {
        let Some(binding) = self.bindings.get_mut(id) else {
            return;
        };

        let metrics = self.dom.metrics(binding.container_el);
        let delta = binding.advance_scroll_top(metrics.scroll_top);

        if binding.is_filling() || binding.disabled || delta < 0.0 {
            return;
        }

        let distance = self.config.distance;
        let should_trigger = if binding.scrolls_itself() {
            metrics.distance_to_bottom() <= distance
        } else {
            // The target may overflow its own box, so measure its scroll height
            let target = self.dom.metrics(binding.target);
            let offset = offset_top_distance(&self.dom, binding.target, binding.container_el);
            metrics.scroll_top + metrics.client_height
                >= offset + target.client_top + target.scroll_height - distance
        };

        if should_trigger {
            trace!(
                node = ?binding.target,
                scroll_top = metrics.scroll_top,
                "scrolled near bottom; loading more"
            );
            binding.load_more();
        }
    }
}
