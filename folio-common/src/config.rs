use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Reveal threshold must be in (0, 1], got {0}")]
    RevealThreshold(f64),
    #[error("Swipe threshold must be a non-negative distance, got {0}")]
    SwipeThreshold(f64),
}

/// Tunables for one gallery.
///
/// The site's gallery sections only differ in these values, so each section
/// picks a preset and optionally overrides individual fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Minimum horizontal finger travel (px) that counts as a swipe
    pub swipe_threshold_px: f64,
    /// Fraction of a tile that must be visible before it is revealed
    pub reveal_threshold: f64,
    /// Per-index delay applied to reveals (0 = reveal immediately)
    pub reveal_stagger_ms: u64,
    /// Delay after mount before the background preload sweep
    pub preload_delay_ms: u64,
    /// Sweep delay used when the browser has no idle scheduling
    pub idle_fallback_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::masonry()
    }
}

impl GalleryConfig {
    /// Main portfolio gallery
    pub fn masonry() -> Self {
        Self {
            swipe_threshold_px: 50.0,
            reveal_threshold: 0.15,
            reveal_stagger_ms: 0,
            preload_delay_ms: 1000,
            idle_fallback_ms: 2000,
        }
    }

    /// Convention table grid: tiles reveal one by one
    pub fn convention_tiles() -> Self {
        Self {
            reveal_threshold: 0.2,
            reveal_stagger_ms: 100,
            ..Self::masonry()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(ConfigError::RevealThreshold(self.reveal_threshold));
        }
        if !(self.swipe_threshold_px >= 0.0 && self.swipe_threshold_px.is_finite()) {
            return Err(ConfigError::SwipeThreshold(self.swipe_threshold_px));
        }
        Ok(())
    }

    /// Reveal delay for the tile at `index`
    pub fn reveal_delay_ms(&self, index: usize) -> u64 {
        self.reveal_stagger_ms.saturating_mul(index as u64)
    }
}

/// Partial config as written in the manifest; unset fields keep the preset value
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub swipe_threshold_px: Option<f64>,
    pub reveal_threshold: Option<f64>,
    pub reveal_stagger_ms: Option<u64>,
    pub preload_delay_ms: Option<u64>,
    pub idle_fallback_ms: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, base: GalleryConfig) -> Result<GalleryConfig, ConfigError> {
        let config = GalleryConfig {
            swipe_threshold_px: self.swipe_threshold_px.unwrap_or(base.swipe_threshold_px),
            reveal_threshold: self.reveal_threshold.unwrap_or(base.reveal_threshold),
            reveal_stagger_ms: self.reveal_stagger_ms.unwrap_or(base.reveal_stagger_ms),
            preload_delay_ms: self.preload_delay_ms.unwrap_or(base.preload_delay_ms),
            idle_fallback_ms: self.idle_fallback_ms.unwrap_or(base.idle_fallback_ms),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(GalleryConfig::masonry().validate(), Ok(()));
        assert_eq!(GalleryConfig::convention_tiles().validate(), Ok(()));
    }

    #[test]
    fn test_convention_tiles_stagger() {
        let config = GalleryConfig::convention_tiles();
        assert_eq!(config.reveal_delay_ms(0), 0);
        assert_eq!(config.reveal_delay_ms(3), 300);
        assert_eq!(GalleryConfig::masonry().reveal_delay_ms(3), 0);
    }

    #[test]
    fn test_overrides_only_touch_named_fields() {
        let overrides: ConfigOverrides = serde_json::from_str(r#"{"swipeThresholdPx": 80}"#).unwrap();
        let config = overrides.apply(GalleryConfig::convention_tiles()).unwrap();
        assert_eq!(config.swipe_threshold_px, 80.0);
        assert_eq!(config.reveal_threshold, 0.2);
        assert_eq!(config.reveal_stagger_ms, 100);
    }

    #[test]
    fn test_overrides_rejected_when_out_of_range() {
        let overrides = ConfigOverrides {
            reveal_threshold: Some(1.5),
            ..Default::default()
        };
        assert_eq!(
            overrides.apply(GalleryConfig::masonry()),
            Err(ConfigError::RevealThreshold(1.5))
        );

        let overrides = ConfigOverrides {
            swipe_threshold_px: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            overrides.apply(GalleryConfig::masonry()),
            Err(ConfigError::SwipeThreshold(-1.0))
        );
    }
}
