//! Feed simulation
//!
//! Builds a feed in a [`MemoryDom`], mounts the engine on it, and scrolls
//! down frame by frame, delivering document events and ticking the engine
//! the way a host's frame loop would.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use quill_core::{throttle, Clock, ManualClock};
use quill_dom::prelude::*;
use quill_scroll::{InfiniteScroll, InfiniteScrollConfig};
use tracing::{debug, info};

/// Status lines are logged at most this often (simulated time)
const STATUS_INTERVAL: Duration = Duration::from_millis(500);

/// Shape of the generated feed
#[derive(Clone, Debug)]
pub struct Feed {
    pub viewport: f32,
    pub item_height: f32,
    pub page_size: usize,
    /// Height of the scrolling container, or `None` to scroll the window
    pub nested: Option<f32>,
    pub max_items: Option<usize>,
}

/// Outcome of a simulation run
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub loads: usize,
    pub items: usize,
    pub scroll_top: f32,
    pub scroll_range: f32,
    pub filling: bool,
}

pub struct Simulation {
    dom: MemoryDom,
    clock: ManualClock,
    engine: InfiniteScroll<MemoryDom, ManualClock>,
    list: NodeId,
    scroller: NodeId,
    loads: Rc<Cell<usize>>,
}

impl Simulation {
    /// Build the document and mount the engine on the feed
    pub fn new(config: InfiniteScrollConfig, feed: Feed) -> Result<Self> {
        let dom = MemoryDom::new(800.0, feed.viewport);
        let root = dom.document_element();

        let scroller = match feed.nested {
            Some(height) => {
                let container = dom
                    .create_element(ElementStyle::new().h(height).overflow_y(Overflow::Auto))
                    .context("Failed to create container")?;
                dom.append_child(root, container)
                    .context("Failed to attach container")?;
                container
            }
            None => root,
        };

        let list = dom
            .create_element(ElementStyle::new())
            .context("Failed to create feed")?;
        dom.append_child(scroller, list)
            .context("Failed to attach feed")?;

        let clock = ManualClock::new();
        let mut engine = InfiniteScroll::with_clock(dom.clone(), config, clock.clone());
        let loads = Rc::new(Cell::new(0));

        let page = dom.clone();
        let counter = loads.clone();
        engine.mount(list, move || {
            counter.set(counter.get() + 1);
            let have = page.children(list).len();
            let want = match feed.max_items {
                Some(max) => (have + feed.page_size).min(max),
                None => have + feed.page_size,
            };
            if want == have {
                debug!(items = have, "feed exhausted");
                return;
            }
            for _ in have..want {
                let item = page.create_element(ElementStyle::new().h(feed.item_height));
                let attached = item.and_then(|item| page.append_child(list, item));
                if let Err(err) = attached {
                    tracing::warn!("Failed to append item: {}", err);
                    return;
                }
            }
            info!(load = counter.get(), items = want, "loaded more items");
        });

        Ok(Self {
            dom,
            clock,
            engine,
            list,
            scroller,
            loads,
        })
    }

    /// Run `frames` frames, scrolling `step` pixels per frame
    pub fn run(&mut self, frames: u32, step: f32, frame_ms: u64) -> Result<Report> {
        let dom = self.dom.clone();
        let scroller = self.scroller;
        let list = self.list;
        let loads = self.loads.clone();
        let mut status = throttle(
            move || {
                let metrics = dom.metrics(scroller);
                info!(
                    scroll_top = metrics.scroll_top,
                    scroll_height = metrics.scroll_height,
                    items = dom.children(list).len(),
                    loads = loads.get(),
                    "status"
                );
            },
            STATUS_INTERVAL,
        );

        for frame in 0..frames {
            self.clock.advance_ms(frame_ms);
            self.engine.tick();
            self.pump();

            self.dom
                .scroll_by(self.scroller, step)
                .with_context(|| format!("Failed to scroll on frame {}", frame))?;
            self.pump();

            status.call(self.clock.now());
        }

        // Let trailing invocations land
        while let Some(deadline) = self.engine.next_deadline() {
            let now = self.clock.now();
            if deadline > now {
                self.clock.advance(deadline - now);
            }
            self.engine.tick();
            self.pump();
        }
        status.cancel();

        Ok(self.report())
    }

    /// Deliver queued document events until none are left
    fn pump(&mut self) {
        loop {
            let events = self.dom.take_events();
            if events.is_empty() {
                break;
            }
            self.engine.dispatch_all(events);
        }
    }

    pub fn report(&self) -> Report {
        let metrics = self.dom.metrics(self.scroller);
        Report {
            loads: self.loads.get(),
            items: self.dom.children(self.list).len(),
            scroll_top: metrics.scroll_top,
            scroll_range: (metrics.scroll_height - metrics.client_height).max(0.0),
            filling: self.engine.is_filling(self.list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(nested: Option<f32>, max_items: Option<usize>) -> Feed {
        Feed {
            viewport: 500.0,
            item_height: 50.0,
            page_size: 5,
            nested,
            max_items,
        }
    }

    #[test]
    fn test_window_feed_fills_then_grows_with_scrolling() {
        let mut sim = Simulation::new(InfiniteScrollConfig::default(), feed(None, None)).unwrap();

        let report = sim.run(1, 0.0, 16).unwrap();
        // Two pages exactly fill the viewport, so a third is loaded
        assert_eq!(report.items, 15);
        assert!(!report.filling);

        let report = sim.run(200, 40.0, 16).unwrap();
        assert!(report.items > 15);
        assert!(report.loads > 3);
    }

    #[test]
    fn test_nested_feed_respects_max_items() {
        let mut sim =
            Simulation::new(InfiniteScrollConfig::default(), feed(Some(300.0), Some(20))).unwrap();

        let report = sim.run(300, 60.0, 16).unwrap();
        assert_eq!(report.items, 20);
        assert_eq!(report.scroll_top, report.scroll_range);
        assert!(!report.filling);
    }

    #[test]
    fn test_lazy_feed_loads_nothing_without_content() {
        let mut sim = Simulation::new(InfiniteScrollConfig::lazy(), feed(None, None)).unwrap();

        let report = sim.run(10, 40.0, 16).unwrap();
        assert_eq!(report.loads, 0);
        assert_eq!(report.items, 0);
    }
}
