//! Quill Infinite Scroll
//!
//! Decides when a scrollable list needs more content:
//!
//! - **Fill mode**: after mount, keep asking for more until the content
//!   overflows its scroll container
//! - **Scroll triggers**: afterwards, ask for more when the user scrolls down
//!   to within `distance` pixels of the end
//! - **Throttling**: scroll handling and fill checks each collapse bursts of
//!   events into at most one evaluation per window
//!
//! The engine is generic over the host document ([`quill_dom::Dom`]) and the
//! time source ([`quill_core::Clock`]).
//!
//! # Example
//!
//! ```rust
//! use quill_dom::prelude::*;
//! use quill_scroll::{InfiniteScroll, InfiniteScrollConfig};
//!
//! let dom = MemoryDom::new(800.0, 600.0);
//! let feed = dom.create_element(ElementStyle::new()).unwrap();
//! dom.append_child(dom.document_element(), feed).unwrap();
//!
//! let mut engine = InfiniteScroll::new(dom.clone(), InfiniteScrollConfig::default());
//! let page = dom.clone();
//! engine.mount(feed, move || {
//!     for _ in 0..10 {
//!         let item = page.create_element(ElementStyle::new().h(80.0)).unwrap();
//!         page.append_child(feed, item).unwrap();
//!     }
//! });
//!
//! // The empty feed fits the viewport, so the first page is requested
//! engine.tick();
//! assert_eq!(dom.children(feed).len(), 10);
//!
//! // 800px of content overflows the 600px viewport: fill mode ends
//! engine.dispatch_all(dom.take_events());
//! assert!(!engine.is_filling(feed));
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod infinite_scroll;

pub use binding::{BindingId, LoadMore};
pub use config::InfiniteScrollConfig;
pub use error::{InfiniteScrollError, Result};
pub use infinite_scroll::InfiniteScroll;
