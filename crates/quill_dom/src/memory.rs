//! In-memory document
//!
//! [`MemoryDom`] is a small single-threaded document used by tests and the
//! simulator. Elements are laid out by Taffy as a vertical flex column, which
//! gives block-flow stacking: each child sits below its previous sibling, a
//! fixed height turns an element into a box its content can overflow, and an
//! auto height grows with the content.
//!
//! Like a browser, the document queues work instead of calling back:
//! structural changes become [`MutationRecord`]s for matching observers and
//! scroll position changes become scroll events for registered listeners.
//! The host drains both with [`MemoryDom::take_events`] and hands them to the
//! engine.
//!
//! ```rust
//! use quill_dom::{Dom, ElementStyle, MemoryDom, Overflow};
//!
//! let dom = MemoryDom::new(800.0, 600.0);
//! let list = dom.create_element(ElementStyle::new().h(300.0).overflow_y(Overflow::Auto)).unwrap();
//! dom.append_child(dom.document_element(), list).unwrap();
//! for _ in 0..10 {
//!     let item = dom.create_element(ElementStyle::new().h(50.0)).unwrap();
//!     dom.append_child(list, item).unwrap();
//! }
//!
//! let metrics = dom.metrics(list);
//! assert_eq!(metrics.client_height, 300.0);
//! assert_eq!(metrics.scroll_height, 500.0);
//! ```

use std::cell::{RefCell, RefMut};
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

use slotmap::SlotMap;
use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, Size, Style, TaffyTree,
};

use crate::dom::{
    Dom, DomEvent, EventTarget, ListenerId, MutationKind, MutationObserver, MutationRecord,
    NodeId, ObserveOptions, ObserverId, ScrollMetrics,
};
use crate::error::{DomError, Result};
use crate::style::{Overflow, OverflowStyle};

/// Style of an element in a [`MemoryDom`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementStyle {
    /// Fixed height; `None` sizes to content
    pub height: Option<f32>,
    pub overflow: OverflowStyle,
    /// Top and bottom border width
    pub border: f32,
    /// `display: none`
    pub hidden: bool,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed height in pixels
    pub fn h(mut self, px: f32) -> Self {
        self.height = Some(px);
        self
    }

    /// Size to content
    pub fn h_auto(mut self) -> Self {
        self.height = None;
        self
    }

    pub fn overflow(mut self, overflow: OverflowStyle) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn overflow_y(mut self, value: Overflow) -> Self {
        self.overflow.y = value;
        self
    }

    pub fn border(mut self, px: f32) -> Self {
        self.border = px;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn to_layout_style(self) -> Style {
        let mut style = Style {
            display: if self.hidden {
                Display::None
            } else {
                Display::Flex
            },
            flex_direction: FlexDirection::Column,
            flex_shrink: 0.0,
            ..Default::default()
        };
        style.size.width = Dimension::Percent(1.0);
        style.size.height = match self.height {
            Some(px) => Dimension::Length(px),
            None => Dimension::Auto,
        };
        style.border.top = LengthPercentage::Length(self.border);
        style.border.bottom = LengthPercentage::Length(self.border);
        style.overflow.x = layout_overflow(self.overflow.x);
        style.overflow.y = layout_overflow(self.overflow.y);
        style
    }
}

fn layout_overflow(value: Overflow) -> taffy::Overflow {
    match value {
        Overflow::Visible => taffy::Overflow::Visible,
        Overflow::Hidden => taffy::Overflow::Hidden,
        Overflow::Clip => taffy::Overflow::Clip,
        Overflow::Scroll | Overflow::Auto | Overflow::Overlay => taffy::Overflow::Scroll,
    }
}

struct ElementNode {
    layout: taffy::NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: ElementStyle,
    scroll_top: f32,
}

struct ObserverEntry {
    observing: Option<(NodeId, ObserveOptions)>,
    records: Vec<MutationRecord>,
}

struct DomState {
    taffy: TaffyTree<()>,
    nodes: SlotMap<NodeId, ElementNode>,
    document: NodeId,
    viewport: (f32, f32),
    layout_dirty: bool,
    listeners: SlotMap<ListenerId, EventTarget>,
    observers: SlotMap<ObserverId, ObserverEntry>,
    scroll_events: VecDeque<EventTarget>,
}

impl DomState {
    fn new(width: f32, height: f32) -> Result<Self> {
        let mut taffy = TaffyTree::new();
        let mut nodes = SlotMap::with_key();

        let style = ElementStyle::new().h(height).overflow_y(Overflow::Auto);
        let layout = taffy.new_leaf(Self::document_layout_style(width, height))?;
        let document = nodes.insert(ElementNode {
            layout,
            parent: None,
            children: Vec::new(),
            style,
            scroll_top: 0.0,
        });

        Ok(Self {
            taffy,
            nodes,
            document,
            viewport: (width, height),
            layout_dirty: true,
            listeners: SlotMap::with_key(),
            observers: SlotMap::with_key(),
            scroll_events: VecDeque::new(),
        })
    }

    fn document_layout_style(width: f32, height: f32) -> Style {
        let mut style = ElementStyle::new()
            .h(height)
            .overflow_y(Overflow::Auto)
            .to_layout_style();
        style.size.width = Dimension::Length(width);
        style
    }

    fn node(&self, id: NodeId) -> Result<&ElementNode> {
        self.nodes.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    fn is_connected(&self, node: NodeId) -> bool {
        node == self.document || self.is_ancestor(self.document, node)
    }

    fn ensure_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }
        let (width, height) = self.viewport;
        let Some(root) = self.nodes.get(self.document).map(|n| n.layout) else {
            return;
        };
        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        match self.taffy.compute_layout(root, available) {
            Ok(()) => self.layout_dirty = false,
            Err(err) => tracing::warn!("MemoryDom layout failed: {}", err),
        }
    }

    fn layout_of(&self, node: &ElementNode) -> Option<&taffy::Layout> {
        self.taffy.layout(node.layout).ok()
    }

    fn metrics(&mut self, id: NodeId) -> ScrollMetrics {
        self.ensure_layout();
        if !self.is_connected(id) {
            return ScrollMetrics::default();
        }
        let Some(node) = self.nodes.get(id) else {
            return ScrollMetrics::default();
        };
        let Some(layout) = self.layout_of(node) else {
            return ScrollMetrics::default();
        };
        if node.style.hidden {
            return ScrollMetrics::default();
        }

        let border = node.style.border;
        let client_height = if id == self.document {
            self.viewport.1
        } else {
            (layout.size.height - 2.0 * border).max(0.0)
        };
        let content_bottom = node
            .children
            .iter()
            .filter_map(|child| self.nodes.get(*child))
            .filter_map(|child| self.layout_of(child))
            .map(|l| l.location.y + l.size.height - border)
            .fold(0.0_f32, f32::max);
        let scroll_height = client_height.max(content_bottom);
        let max_scroll = (scroll_height - client_height).max(0.0);

        ScrollMetrics {
            client_height,
            scroll_height,
            scroll_top: node.scroll_top.min(max_scroll),
            client_top: border,
        }
    }

    fn offset_top(&mut self, id: NodeId) -> f32 {
        self.ensure_layout();
        if id == self.document || !self.is_connected(id) {
            return 0.0;
        }
        let Some(node) = self.nodes.get(id) else {
            return 0.0;
        };
        let parent_border = node
            .parent
            .and_then(|p| self.nodes.get(p))
            .map(|p| p.style.border)
            .unwrap_or(0.0);
        self.layout_of(node)
            .map(|l| l.location.y - parent_border)
            .unwrap_or(0.0)
    }

    fn record(&mut self, record: MutationRecord) {
        let mut matched = Vec::new();
        for (id, entry) in &self.observers {
            let Some((observed, options)) = entry.observing else {
                continue;
            };
            let wanted = match record.kind {
                MutationKind::ChildList => options.child_list,
                MutationKind::Attributes => options.attributes,
            };
            let in_scope = record.target == observed
                || (options.subtree && self.is_ancestor(observed, record.target));
            if wanted && in_scope {
                matched.push(id);
            }
        }
        for id in matched {
            if let Some(entry) = self.observers.get_mut(id) {
                entry.records.push(record.clone());
            }
        }
    }
}

/// Observers dropped while the document was borrowed, awaiting removal
type Retired = Rc<RefCell<Vec<ObserverId>>>;

/// Shared handle to an in-memory document
///
/// Clones refer to the same document.
#[derive(Clone)]
pub struct MemoryDom {
    state: Rc<RefCell<DomState>>,
    retired: Retired,
}

impl MemoryDom {
    /// Create a document with a viewport of the given size
    ///
    /// # Panics
    ///
    /// Panics if the layout tree cannot allocate the document node, which a
    /// fresh `TaffyTree` never refuses. Use [`MemoryDom::try_new`] to handle
    /// the error instead.
    pub fn new(width: f32, height: f32) -> Self {
        match Self::try_new(width, height) {
            Ok(dom) => dom,
            Err(err) => panic!("creating MemoryDom: {}", err),
        }
    }

    /// Create a document, reporting layout allocation failures
    pub fn try_new(width: f32, height: f32) -> Result<Self> {
        Ok(Self {
            state: Rc::new(RefCell::new(DomState::new(width, height)?)),
            retired: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Borrow the document mutably, first removing retired observers
    fn state_mut(&self) -> RefMut<'_, DomState> {
        let mut state = self.state.borrow_mut();
        if let Ok(mut retired) = self.retired.try_borrow_mut() {
            for id in retired.drain(..) {
                state.observers.remove(id);
            }
        }
        state
    }

    /// Resize the viewport
    pub fn set_viewport(&self, width: f32, height: f32) -> Result<()> {
        let mut state = self.state_mut();
        let document = state.document;
        let layout = state.node(document)?.layout;
        state
            .taffy
            .set_style(layout, DomState::document_layout_style(width, height))?;
        state.viewport = (width, height);
        if let Some(node) = state.nodes.get_mut(document) {
            node.style.height = Some(height);
        }
        state.layout_dirty = true;
        Ok(())
    }

    /// Create a detached element
    pub fn create_element(&self, style: ElementStyle) -> Result<NodeId> {
        let mut state = self.state_mut();
        let layout = state.taffy.new_leaf(style.to_layout_style())?;
        Ok(state.nodes.insert(ElementNode {
            layout,
            parent: None,
            children: Vec::new(),
            style,
            scroll_top: 0.0,
        }))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut state = self.state_mut();
        let parent_layout = state.node(parent)?.layout;
        let child_node = state.node(child)?;
        let child_layout = child_node.layout;

        if child == parent || state.is_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        if child_node.parent.is_some() || child == state.document {
            return Err(DomError::AlreadyAttached(child));
        }

        state.taffy.add_child(parent_layout, child_layout)?;
        if let Some(node) = state.nodes.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = state.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        state.layout_dirty = true;
        state.record(MutationRecord::child_added(parent, child));
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut state = self.state_mut();
        let parent_layout = state.node(parent)?.layout;
        let child_node = state.node(child)?;
        if child_node.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        let child_layout = child_node.layout;

        state.taffy.remove_child(parent_layout, child_layout)?;
        if let Some(node) = state.nodes.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = state.nodes.get_mut(child) {
            node.parent = None;
        }
        state.layout_dirty = true;
        state.record(MutationRecord::child_removed(parent, child));
        Ok(())
    }

    /// Replace an element's style
    pub fn set_style(&self, node: NodeId, style: ElementStyle) -> Result<()> {
        let mut state = self.state_mut();
        let layout = state.node(node)?.layout;
        state.taffy.set_style(layout, style.to_layout_style())?;
        if let Some(el) = state.nodes.get_mut(node) {
            el.style = style;
        }
        state.layout_dirty = true;
        state.record(MutationRecord::attributes(node));
        Ok(())
    }

    /// Toggle `display: none`
    pub fn set_hidden(&self, node: NodeId, hidden: bool) -> Result<()> {
        let style = self.style(node)?.hidden(hidden);
        self.set_style(node, style)
    }

    /// Current style of an element
    pub fn style(&self, node: NodeId) -> Result<ElementStyle> {
        Ok(self.state.borrow().node(node)?.style)
    }

    /// Children in document order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.state
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Scroll an element to `top`, clamped to its scroll range
    ///
    /// Returns the resulting offset. A scroll event is queued when the
    /// offset changed and a listener is registered for the element (or for
    /// the window, when scrolling the document element).
    pub fn scroll_to(&self, node: NodeId, top: f32) -> Result<f32> {
        let mut state = self.state_mut();
        state.node(node)?;
        let metrics = state.metrics(node);
        let max_scroll = (metrics.scroll_height - metrics.client_height).max(0.0);
        let clamped = top.clamp(0.0, max_scroll);

        let previous = metrics.scroll_top;
        if let Some(el) = state.nodes.get_mut(node) {
            el.scroll_top = clamped;
        }

        if clamped != previous {
            let target = if node == state.document {
                EventTarget::Window
            } else {
                EventTarget::Element(node)
            };
            if state.listeners.values().any(|t| *t == target) {
                state.scroll_events.push_back(target);
            }
        }
        Ok(clamped)
    }

    /// Scroll relative to the current offset
    pub fn scroll_by(&self, node: NodeId, delta: f32) -> Result<f32> {
        let current = self.metrics(node).scroll_top;
        self.scroll_to(node, current + delta)
    }

    /// Drain queued events
    ///
    /// Mutation batches come first, one per observer with pending records,
    /// followed by scroll events in the order they happened.
    pub fn take_events(&self) -> Vec<DomEvent> {
        let mut state = self.state_mut();
        let mut events = Vec::new();

        for (observer, entry) in state.observers.iter_mut() {
            if !entry.records.is_empty() {
                events.push(DomEvent::Mutations {
                    observer,
                    records: mem::take(&mut entry.records),
                });
            }
        }
        events.extend(state.scroll_events.drain(..).map(DomEvent::Scroll));
        events
    }

    /// Number of registered scroll listeners
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Number of observers currently observing a node
    pub fn active_observer_count(&self) -> usize {
        self.state_mut()
            .observers
            .values()
            .filter(|e| e.observing.is_some())
            .count()
    }
}

impl Dom for MemoryDom {
    type Observer = MemoryObserver;

    fn document_element(&self) -> NodeId {
        self.state.borrow().document
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.state.borrow().nodes.get(node).and_then(|n| n.parent)
    }

    fn overflow(&self, node: NodeId) -> OverflowStyle {
        self.state
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.style.overflow)
            .unwrap_or_default()
    }

    fn metrics(&self, node: NodeId) -> ScrollMetrics {
        self.state_mut().metrics(node)
    }

    fn offset_top(&self, node: NodeId) -> f32 {
        self.state_mut().offset_top(node)
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        let state = self.state.borrow();
        if !state.is_connected(node) {
            return None;
        }
        state.nodes.get(node).and_then(|n| n.parent)
    }

    fn add_scroll_listener(&self, target: EventTarget) -> ListenerId {
        self.state_mut().listeners.insert(target)
    }

    fn remove_scroll_listener(&self, listener: ListenerId) {
        self.state_mut().listeners.remove(listener);
    }

    fn create_mutation_observer(&self) -> MemoryObserver {
        let id = self.state_mut().observers.insert(ObserverEntry {
            observing: None,
            records: Vec::new(),
        });
        MemoryObserver {
            id,
            state: Rc::clone(&self.state),
            retired: Rc::clone(&self.retired),
        }
    }
}

/// Mutation observer backed by a [`MemoryDom`]
///
/// Dropping the observer unregisters it.
pub struct MemoryObserver {
    id: ObserverId,
    state: Rc<RefCell<DomState>>,
    retired: Retired,
}

impl MutationObserver for MemoryObserver {
    fn id(&self) -> ObserverId {
        self.id
    }

    fn observe(&mut self, node: NodeId, options: ObserveOptions) {
        if let Some(entry) = self.state.borrow_mut().observers.get_mut(self.id) {
            entry.observing = Some((node, options));
        }
    }

    fn disconnect(&mut self) {
        if let Some(entry) = self.state.borrow_mut().observers.get_mut(self.id) {
            entry.observing = None;
            entry.records.clear();
        }
    }
}

impl Drop for MemoryObserver {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.observers.remove(self.id);
            return;
        }
        // Removed on the next mutable access to the document
        match self.retired.try_borrow_mut() {
            Ok(mut retired) => retired.push(self.id),
            Err(_) => tracing::warn!(
                observer = ?self.id,
                "MemoryObserver dropped during borrow; entry leaked"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(dom: &MemoryDom, parent: NodeId, count: usize, height: f32) {
        for _ in 0..count {
            let item = dom.create_element(ElementStyle::new().h(height)).unwrap();
            dom.append_child(parent, item).unwrap();
        }
    }

    #[test]
    fn test_auto_height_grows_with_content() {
        let dom = MemoryDom::new(800.0, 600.0);
        let list = dom.create_element(ElementStyle::new()).unwrap();
        dom.append_child(dom.document_element(), list).unwrap();
        feed(&dom, list, 3, 40.0);

        let metrics = dom.metrics(list);
        assert_eq!(metrics.client_height, 120.0);
        assert_eq!(metrics.scroll_height, 120.0);
    }

    #[test]
    fn test_document_measures_viewport() {
        let dom = MemoryDom::new(800.0, 500.0);
        let root = dom.document_element();
        feed(&dom, root, 30, 40.0);

        let metrics = dom.metrics(root);
        assert_eq!(metrics.client_height, 500.0);
        assert_eq!(metrics.scroll_height, 1200.0);
    }

    #[test]
    fn test_scroll_clamps_to_range() {
        let dom = MemoryDom::new(800.0, 600.0);
        let list = dom
            .create_element(ElementStyle::new().h(500.0).overflow_y(Overflow::Auto))
            .unwrap();
        dom.append_child(dom.document_element(), list).unwrap();
        feed(&dom, list, 12, 100.0);

        assert_eq!(dom.scroll_to(list, 650.0).unwrap(), 650.0);
        assert_eq!(dom.scroll_to(list, 5000.0).unwrap(), 700.0);
        assert_eq!(dom.scroll_to(list, -10.0).unwrap(), 0.0);
        assert_eq!(dom.scroll_by(list, 120.0).unwrap(), 120.0);
    }

    #[test]
    fn test_border_reported_as_client_top() {
        let dom = MemoryDom::new(800.0, 600.0);
        let list = dom.create_element(ElementStyle::new().h(204.0).border(2.0)).unwrap();
        dom.append_child(dom.document_element(), list).unwrap();
        let item = dom.create_element(ElementStyle::new().h(50.0)).unwrap();
        dom.append_child(list, item).unwrap();

        let metrics = dom.metrics(list);
        assert_eq!(metrics.client_top, 2.0);
        assert_eq!(metrics.client_height, 200.0);
        assert_eq!(dom.offset_top(item), 0.0);
    }

    #[test]
    fn test_hidden_element_has_no_height() {
        let dom = MemoryDom::new(800.0, 600.0);
        let list = dom.create_element(ElementStyle::new().h(300.0).hidden(true)).unwrap();
        dom.append_child(dom.document_element(), list).unwrap();
        assert_eq!(dom.metrics(list).client_height, 0.0);

        dom.set_hidden(list, false).unwrap();
        assert_eq!(dom.metrics(list).client_height, 300.0);
    }

    #[test]
    fn test_structure_errors() {
        let dom = MemoryDom::new(800.0, 600.0);
        let a = dom.create_element(ElementStyle::new()).unwrap();
        let b = dom.create_element(ElementStyle::new()).unwrap();
        dom.append_child(a, b).unwrap();

        assert_eq!(
            dom.append_child(b, a),
            Err(DomError::Cycle {
                parent: b,
                child: a
            })
        );
        assert_eq!(
            dom.append_child(dom.document_element(), b),
            Err(DomError::AlreadyAttached(b))
        );
        assert_eq!(
            dom.remove_child(b, a),
            Err(DomError::NotAChild {
                parent: b,
                child: a
            })
        );
    }

    #[test]
    fn test_observer_sees_subtree_child_list() {
        let dom = MemoryDom::new(800.0, 600.0);
        let list = dom.create_element(ElementStyle::new()).unwrap();
        let group = dom.create_element(ElementStyle::new()).unwrap();
        dom.append_child(dom.document_element(), list).unwrap();
        dom.append_child(list, group).unwrap();

        let mut observer = dom.create_mutation_observer();
        observer.observe(list, ObserveOptions::subtree_children());
        assert_eq!(dom.active_observer_count(), 1);

        let item = dom.create_element(ElementStyle::new().h(10.0)).unwrap();
        dom.append_child(group, item).unwrap();
        // Style changes are not child-list changes
        dom.set_hidden(group, false).unwrap();

        let events = dom.take_events();
        assert_eq!(
            events,
            vec![DomEvent::Mutations {
                observer: observer.id(),
                records: vec![MutationRecord::child_added(group, item)],
            }]
        );

        observer.disconnect();
        assert_eq!(dom.active_observer_count(), 0);
        feed(&dom, list, 1, 10.0);
        assert!(dom.take_events().is_empty());
    }

    #[test]
    fn test_scroll_events_need_a_listener() {
        let dom = MemoryDom::new(800.0, 500.0);
        let root = dom.document_element();
        feed(&dom, root, 30, 40.0);

        dom.scroll_to(root, 100.0).unwrap();
        assert!(dom.take_events().is_empty());

        let listener = dom.add_scroll_listener(EventTarget::Window);
        dom.scroll_to(root, 200.0).unwrap();
        // No change, no event
        dom.scroll_to(root, 200.0).unwrap();
        assert_eq!(dom.take_events(), vec![DomEvent::Scroll(EventTarget::Window)]);

        dom.remove_scroll_listener(listener);
        assert_eq!(dom.listener_count(), 0);
        dom.scroll_to(root, 300.0).unwrap();
        assert!(dom.take_events().is_empty());
    }

    #[test]
    fn test_set_viewport_resizes_document() {
        let dom = MemoryDom::try_new(800.0, 500.0).unwrap();
        let root = dom.document_element();
        feed(&dom, root, 30, 40.0);
        assert_eq!(dom.metrics(root).client_height, 500.0);

        dom.set_viewport(800.0, 900.0).unwrap();
        let metrics = dom.metrics(root);
        assert_eq!(metrics.client_height, 900.0);
        assert_eq!(metrics.scroll_height, 1200.0);
        assert_eq!(dom.style(root).unwrap().height, Some(900.0));
    }

    #[test]
    fn test_observer_dropped_during_borrow_is_removed_later() {
        let dom = MemoryDom::new(800.0, 600.0);
        let mut observer = dom.create_mutation_observer();
        observer.observe(dom.document_element(), ObserveOptions::subtree_children());

        {
            let _held = dom.state.borrow();
            drop(observer);
        }
        assert_eq!(dom.retired.borrow().len(), 1);

        assert_eq!(dom.active_observer_count(), 0);
        assert!(dom.state.borrow().observers.is_empty());
        assert!(dom.retired.borrow().is_empty());
    }

    #[test]
    fn test_dropping_observer_unregisters() {
        let dom = MemoryDom::new(800.0, 600.0);
        {
            let mut observer = dom.create_mutation_observer();
            observer.observe(dom.document_element(), ObserveOptions::subtree_children());
            assert_eq!(dom.active_observer_count(), 1);
        }
        assert_eq!(dom.active_observer_count(), 0);
    }
}
