//! Infinite-scroll configuration

use std::time::Duration;

use quill_dom::ScrollAxis;
use serde::{Deserialize, Serialize};

use crate::error::{InfiniteScrollError, Result};

/// Configuration for an [`InfiniteScroll`](crate::InfiniteScroll) engine
///
/// Loadable from TOML; missing keys take their defaults.
///
/// ```rust
/// use quill_scroll::InfiniteScrollConfig;
///
/// let config = InfiniteScrollConfig::from_toml("distance = 120.0\nimmediate = false").unwrap();
/// assert_eq!(config.distance, 120.0);
/// assert_eq!(config.delay_ms, 200);
/// assert!(!config.immediate);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteScrollConfig {
    /// Scroll handling throttle window (ms)
    pub delay_ms: u64,
    /// Fill-check throttle window for observed mutations (ms)
    pub check_interval_ms: u64,
    /// Remaining scroll distance (px) at which loading triggers
    pub distance: f32,
    /// Keep loading after mount until the content overflows the container
    pub immediate: bool,
    /// Overflow property used to find the scroll container
    pub axis: ScrollAxis,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl InfiniteScrollConfig {
    /// 200 ms scroll throttle, 50 ms fill checks, trigger exactly at the bottom
    pub fn standard() -> Self {
        Self {
            delay_ms: 200,
            check_interval_ms: 50,
            distance: 0.0,
            immediate: true,
            axis: ScrollAxis::Both,
        }
    }

    /// Only load in response to scrolling; never fill on mount
    pub fn lazy() -> Self {
        Self {
            immediate: false,
            ..Self::standard()
        }
    }

    /// Parse from TOML and validate
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot use
    pub fn validate(&self) -> Result<()> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(InfiniteScrollError::Config(format!(
                "distance must be a non-negative number of pixels, got {}",
                self.distance
            )));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_check_interval_ms(mut self, check_interval_ms: u64) -> Self {
        self.check_interval_ms = check_interval_ms;
        self
    }

    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }
}
