//! Overflow styles
//!
//! Mirrors the CSS `overflow`, `overflow-x` and `overflow-y` properties.
//! Only the distinction between scrolling and non-scrolling values matters to
//! the scroll engine, but the full keyword set is kept so hosts can pass
//! computed styles through unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomError;

/// A single overflow keyword
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
    /// Legacy WebKit value, treated like `auto`
    Overlay,
}

impl Overflow {
    /// Whether this value produces a scroll container
    pub fn is_scrollable(self) -> bool {
        matches!(self, Overflow::Scroll | Overflow::Auto | Overflow::Overlay)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Overflow::Visible => "visible",
            Overflow::Hidden => "hidden",
            Overflow::Clip => "clip",
            Overflow::Scroll => "scroll",
            Overflow::Auto => "auto",
            Overflow::Overlay => "overlay",
        }
    }
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Overflow {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Ok(Overflow::Visible),
            "hidden" => Ok(Overflow::Hidden),
            "clip" => Ok(Overflow::Clip),
            "scroll" => Ok(Overflow::Scroll),
            "auto" => Ok(Overflow::Auto),
            "overlay" => Ok(Overflow::Overlay),
            other => Err(DomError::InvalidOverflow(other.to_string())),
        }
    }
}

/// Which overflow property decides whether an element scrolls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAxis {
    /// The `overflow` shorthand: either axis scrolling counts
    #[default]
    Both,
    /// `overflow-y`
    Vertical,
    /// `overflow-x`
    Horizontal,
}

/// Per-axis overflow of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverflowStyle {
    pub x: Overflow,
    pub y: Overflow,
}

impl OverflowStyle {
    pub fn new(x: Overflow, y: Overflow) -> Self {
        Self { x, y }
    }

    /// Same value on both axes
    pub fn both(value: Overflow) -> Self {
        Self { x: value, y: value }
    }

    /// `overflow-y` only, `visible` horizontally
    pub fn vertical(value: Overflow) -> Self {
        Self {
            x: Overflow::Visible,
            y: value,
        }
    }

    /// Whether the property selected by `axis` scrolls
    pub fn is_scrollable(&self, axis: ScrollAxis) -> bool {
        match axis {
            ScrollAxis::Both => self.x.is_scrollable() || self.y.is_scrollable(),
            ScrollAxis::Vertical => self.y.is_scrollable(),
            ScrollAxis::Horizontal => self.x.is_scrollable(),
        }
    }
}

impl fmt::Display for OverflowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x == self.y {
            write!(f, "{}", self.x)
        } else {
            write!(f, "{} {}", self.x, self.y)
        }
    }
}

/// Parses the shorthand: one value for both axes, or `x y`
impl FromStr for OverflowStyle {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let first = parts
            .next()
            .ok_or_else(|| DomError::InvalidOverflow(s.to_string()))?;
        let x: Overflow = first.parse()?;
        let y = match parts.next() {
            Some(second) => second.parse()?,
            None => x,
        };
        if parts.next().is_some() {
            return Err(DomError::InvalidOverflow(s.to_string()));
        }
        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollable_keywords() {
        assert!(Overflow::Scroll.is_scrollable());
        assert!(Overflow::Auto.is_scrollable());
        assert!(Overflow::Overlay.is_scrollable());
        assert!(!Overflow::Hidden.is_scrollable());
        assert!(!Overflow::Visible.is_scrollable());
        assert!(!Overflow::Clip.is_scrollable());
    }

    #[test]
    fn test_parse_shorthand() {
        let style: OverflowStyle = "hidden auto".parse().unwrap();
        assert_eq!(style, OverflowStyle::new(Overflow::Hidden, Overflow::Auto));

        let style: OverflowStyle = " Scroll ".parse().unwrap();
        assert_eq!(style, OverflowStyle::both(Overflow::Scroll));
        assert_eq!(style.to_string(), "scroll");

        assert!("".parse::<OverflowStyle>().is_err());
        assert!("auto auto auto".parse::<OverflowStyle>().is_err());
        assert!("sideways".parse::<OverflowStyle>().is_err());
    }

    #[test]
    fn test_axis_selection() {
        let style = OverflowStyle::new(Overflow::Auto, Overflow::Hidden);
        assert!(style.is_scrollable(ScrollAxis::Both));
        assert!(style.is_scrollable(ScrollAxis::Horizontal));
        assert!(!style.is_scrollable(ScrollAxis::Vertical));
    }
}
