//! Per-target engine state

use quill_core::Throttle;
use quill_dom::{ListenerId, MutationObserver, NodeId, ScrollContainer};
use slotmap::new_key_type;

use crate::config::InfiniteScrollConfig;

new_key_type! {
    /// Identity of a live binding inside an engine
    pub struct BindingId;
}

/// Caller-supplied "load more" callback
///
/// Any context the callback needs travels in its captures.
pub type LoadMore = Box<dyn FnMut()>;

/// Everything the engine tracks for one mounted target
pub(crate) struct Binding<O: MutationObserver> {
    pub target: NodeId,
    pub container: ScrollContainer,
    /// Element measured for the container (the document element for the window)
    pub container_el: NodeId,
    pub callback: LoadMore,
    pub last_scroll_top: f32,
    /// Present only in fill mode
    pub observer: Option<O>,
    pub listener: ListenerId,
    pub disabled: bool,
    pub scroll_gate: Throttle,
    pub check_gate: Throttle,
}

impl<O: MutationObserver> Binding<O> {
    pub fn new(
        target: NodeId,
        container: ScrollContainer,
        container_el: NodeId,
        callback: LoadMore,
        last_scroll_top: f32,
        listener: ListenerId,
        config: &InfiniteScrollConfig,
    ) -> Self {
        Self {
            target,
            container,
            container_el,
            callback,
            last_scroll_top,
            observer: None,
            listener,
            disabled: false,
            scroll_gate: Throttle::new(config.delay()),
            check_gate: Throttle::new(config.check_interval()),
        }
    }

    /// Still proactively loading until the content overflows
    pub fn is_filling(&self) -> bool {
        self.observer.is_some()
    }

    /// Whether the target is its own scroll container
    pub fn scrolls_itself(&self) -> bool {
        self.container == ScrollContainer::Element(self.target)
    }

    /// Record the new scroll offset and return how far it moved
    pub fn advance_scroll_top(&mut self, scroll_top: f32) -> f32 {
        let delta = scroll_top - self.last_scroll_top;
        self.last_scroll_top = scroll_top;
        delta
    }

    pub fn load_more(&mut self) {
        (self.callback)();
    }
}
