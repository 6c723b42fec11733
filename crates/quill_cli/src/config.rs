//! Engine configuration loading
//!
//! The configuration file is an `InfiniteScrollConfig` in TOML. Every key is
//! optional:
//!
//! ```toml
//! delay_ms = 200
//! check_interval_ms = 50
//! distance = 0.0
//! immediate = true
//! axis = "both"
//! ```

use anyhow::{Context, Result};
use quill_scroll::InfiniteScrollConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the configuration file if given, then apply command-line overrides
pub fn load(path: Option<&Path>, distance: Option<f32>) -> Result<InfiniteScrollConfig> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = InfiniteScrollConfig::from_toml(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            debug!("Loaded configuration from {}", path.display());
            config
        }
        None => InfiniteScrollConfig::default(),
    };

    if let Some(distance) = distance {
        config = config.with_distance(distance);
        config
            .validate()
            .context("Invalid --distance override")?;
    }

    Ok(config)
}

/// Render a configuration as TOML
pub fn to_toml(config: &InfiniteScrollConfig) -> Result<String> {
    toml::to_string(config).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_dom::ScrollAxis;

    #[test]
    fn test_load_defaults_without_file() {
        let config = load(None, None).unwrap();
        assert_eq!(config, InfiniteScrollConfig::default());
    }

    #[test]
    fn test_distance_override_is_validated() {
        assert_eq!(load(None, Some(80.0)).unwrap().distance, 80.0);
        assert!(load(None, Some(-1.0)).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/quill.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = InfiniteScrollConfig::lazy()
            .with_distance(25.0)
            .with_axis(ScrollAxis::Vertical);
        let text = to_toml(&config).unwrap();
        assert!(text.contains("axis = \"vertical\""));
        assert_eq!(InfiniteScrollConfig::from_toml(&text).unwrap(), config);
    }
}
