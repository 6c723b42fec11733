//! Quill DOM
//!
//! The document model the infinite-scroll engine runs against.
//!
//! - [`Dom`] and [`MutationObserver`]: what a host must provide
//! - [`query`]: scroll-container lookup and offset arithmetic over any [`Dom`]
//! - [`MemoryDom`]: an in-memory document laid out with Taffy
//!
//! # Example
//!
//! ```rust
//! use quill_dom::prelude::*;
//!
//! let dom = MemoryDom::new(800.0, 600.0);
//! let list = dom.create_element(ElementStyle::new()).unwrap();
//! dom.append_child(dom.document_element(), list).unwrap();
//!
//! assert_eq!(
//!     get_scroll_container(&dom, list, ScrollAxis::Both),
//!     Some(ScrollContainer::Window)
//! );
//! ```

pub mod dom;
pub mod error;
pub mod memory;
pub mod query;
pub mod style;

pub use dom::{
    Dom, DomEvent, EventTarget, ListenerId, MutationKind, MutationObserver, MutationRecord,
    NodeId, ObserveOptions, ObserverId, ScrollMetrics,
};
pub use error::{DomError, Result};
pub use memory::{ElementStyle, MemoryDom, MemoryObserver};
pub use query::{get_scroll_container, is_scroll, offset_top, offset_top_distance, ScrollContainer};
pub use style::{Overflow, OverflowStyle, ScrollAxis};

/// Prelude for hosts and tests
pub mod prelude {
    pub use crate::dom::{Dom, DomEvent, EventTarget, MutationObserver, NodeId, ScrollMetrics};
    pub use crate::memory::{ElementStyle, MemoryDom};
    pub use crate::query::{get_scroll_container, ScrollContainer};
    pub use crate::style::{Overflow, OverflowStyle, ScrollAxis};
}
