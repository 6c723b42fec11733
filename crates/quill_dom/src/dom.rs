//! Host DOM abstraction
//!
//! The scroll engine never touches a concrete document. It reads geometry
//! and registers listeners through [`Dom`], and watches subtrees through
//! [`MutationObserver`]. A browser host backs these with the platform APIs;
//! [`MemoryDom`](crate::MemoryDom) backs them with an in-memory tree.
//!
//! All queries are synchronous and infallible. Querying a node the host no
//! longer knows about yields zeroed geometry rather than an error.

use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::style::OverflowStyle;

new_key_type! {
    /// Identity of an element in the host document
    pub struct NodeId;
    /// Handle for a registered scroll listener
    pub struct ListenerId;
    /// Identity of a mutation observer
    pub struct ObserverId;
}

/// Where scroll events are delivered
///
/// Scrolling the document element is reported on the window, as browsers do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Element(NodeId),
}

/// Vertical scroll geometry of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Visible height, excluding borders
    pub client_height: f32,
    /// Full content height, at least `client_height`
    pub scroll_height: f32,
    /// Current scroll offset
    pub scroll_top: f32,
    /// Top border width
    pub client_top: f32,
}

impl ScrollMetrics {
    /// Remaining distance to the bottom of the scrollable area
    pub fn distance_to_bottom(&self) -> f32 {
        self.scroll_height - (self.client_height + self.scroll_top)
    }

    /// Whether the content is taller than the visible area
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }
}

/// What a mutation observer reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Report child insertions and removals
    pub child_list: bool,
    /// Extend observation to all descendants
    pub subtree: bool,
    /// Report style/attribute changes
    pub attributes: bool,
}

impl ObserveOptions {
    /// Child-list changes anywhere in the subtree
    pub const fn subtree_children() -> Self {
        Self {
            child_list: true,
            subtree: true,
            attributes: false,
        }
    }
}

/// Kind of change carried by a [`MutationRecord`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
}

/// A single observed change
#[derive(Clone, Debug, PartialEq)]
pub struct MutationRecord {
    /// Node whose children or attributes changed
    pub target: NodeId,
    pub kind: MutationKind,
    pub added: SmallVec<[NodeId; 4]>,
    pub removed: SmallVec<[NodeId; 4]>,
}

impl MutationRecord {
    pub fn child_added(target: NodeId, child: NodeId) -> Self {
        let mut added = SmallVec::new();
        added.push(child);
        Self {
            target,
            kind: MutationKind::ChildList,
            added,
            removed: SmallVec::new(),
        }
    }

    pub fn child_removed(target: NodeId, child: NodeId) -> Self {
        let mut removed = SmallVec::new();
        removed.push(child);
        Self {
            target,
            kind: MutationKind::ChildList,
            added: SmallVec::new(),
            removed,
        }
    }

    pub fn attributes(target: NodeId) -> Self {
        Self {
            target,
            kind: MutationKind::Attributes,
            added: SmallVec::new(),
            removed: SmallVec::new(),
        }
    }
}

/// An event the host hands to the engine
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent {
    /// A scroll happened on a target with at least one listener
    Scroll(EventTarget),
    /// A batch of records for one observer
    Mutations {
        observer: ObserverId,
        records: Vec<MutationRecord>,
    },
}

/// Change-notification subscription over a subtree
pub trait MutationObserver {
    /// Identity used to route record batches back to the owner
    fn id(&self) -> ObserverId;

    /// Start observing `node`
    fn observe(&mut self, node: NodeId, options: ObserveOptions);

    /// Stop observing and drop undelivered records
    fn disconnect(&mut self);
}

/// The document as seen by the scroll engine
pub trait Dom {
    type Observer: MutationObserver;

    /// The root element, which stands in for the window when measuring
    fn document_element(&self) -> NodeId;

    /// Parent element, `None` at the root or for detached nodes
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Computed overflow style
    fn overflow(&self, node: NodeId) -> OverflowStyle;

    /// Vertical scroll geometry
    fn metrics(&self, node: NodeId) -> ScrollMetrics;

    /// Offset from the top of the offset parent
    fn offset_top(&self, node: NodeId) -> f32;

    /// Nearest positioned ancestor used for `offset_top`
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;

    /// Register interest in scroll events on `target`
    fn add_scroll_listener(&self, target: EventTarget) -> ListenerId;

    /// Undo [`Dom::add_scroll_listener`]; unknown ids are ignored
    fn remove_scroll_listener(&self, listener: ListenerId);

    /// Create an observer that is not yet observing anything
    fn create_mutation_observer(&self) -> Self::Observer;
}
