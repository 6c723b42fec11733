//! Scroll-container and offset queries
//!
//! Generic over any [`Dom`], so the same lookup runs against a browser host
//! and against [`MemoryDom`](crate::MemoryDom) in tests.

use crate::dom::{Dom, EventTarget, NodeId};
use crate::style::ScrollAxis;

/// The element whose scrolling moves a given node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollContainer {
    /// The viewport; measured through the document element
    Window,
    Element(NodeId),
}

impl ScrollContainer {
    /// Element to read scroll geometry from
    pub fn element<D: Dom + ?Sized>(&self, dom: &D) -> NodeId {
        match self {
            ScrollContainer::Window => dom.document_element(),
            ScrollContainer::Element(node) => *node,
        }
    }

    /// Where scroll events for this container arrive
    pub fn event_target(&self) -> EventTarget {
        match self {
            ScrollContainer::Window => EventTarget::Window,
            ScrollContainer::Element(node) => EventTarget::Element(*node),
        }
    }
}

/// Whether `node` scrolls along `axis`
pub fn is_scroll<D: Dom + ?Sized>(dom: &D, node: NodeId, axis: ScrollAxis) -> bool {
    dom.overflow(node).is_scrollable(axis)
}

/// Find the nearest scroll container of `node`, starting with `node` itself
///
/// Reaching the document element means the window scrolls. Running off the
/// top of the tree without reaching it (a detached node) yields `None`.
pub fn get_scroll_container<D: Dom + ?Sized>(
    dom: &D,
    node: NodeId,
    axis: ScrollAxis,
) -> Option<ScrollContainer> {
    let root = dom.document_element();
    let mut current = Some(node);

    while let Some(el) = current {
        if el == root {
            return Some(ScrollContainer::Window);
        }
        if is_scroll(dom, el, axis) {
            return Some(ScrollContainer::Element(el));
        }
        current = dom.parent(el);
    }

    None
}

/// Cumulative `offset_top` along the offset-parent chain
pub fn offset_top<D: Dom + ?Sized>(dom: &D, node: NodeId) -> f32 {
    let mut offset = 0.0;
    let mut current = Some(node);

    while let Some(el) = current {
        offset += dom.offset_top(el);
        current = dom.offset_parent(el);
    }

    offset
}

/// Vertical distance between the tops of two elements
pub fn offset_top_distance<D: Dom + ?Sized>(dom: &D, node: NodeId, container: NodeId) -> f32 {
    (offset_top(dom, node) - offset_top(dom, container)).abs()
}
