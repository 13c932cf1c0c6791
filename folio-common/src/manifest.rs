//! Gallery manifest served by the image listing.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ConfigOverrides, GalleryConfig};
use crate::image::ImageCollection;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid gallery config: {0}")]
    Config(#[from] ConfigError),
    #[error("Duplicate section id: {0}")]
    DuplicateSection(String),
}

/// Which preset a section starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
    Masonry,
    Tiles,
}

impl SectionVariant {
    pub fn preset(&self) -> GalleryConfig {
        match self {
            SectionVariant::Masonry => GalleryConfig::masonry(),
            SectionVariant::Tiles => GalleryConfig::convention_tiles(),
        }
    }

    /// Base CSS class of the grid container
    pub fn grid_class(&self) -> &'static str {
        match self {
            SectionVariant::Masonry => "masonry-gallery",
            SectionVariant::Tiles => "convention-puzzle-grid",
        }
    }
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    config: ConfigOverrides,
    sections: Vec<RawSection>,
}

#[derive(Deserialize)]
struct RawSection {
    id: String,
    #[serde(default)]
    title: String,
    variant: SectionVariant,
    #[serde(default)]
    config: ConfigOverrides,
    images: ImageCollection,
}

/// One gallery on the page with its resolved config
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySection {
    pub id: String,
    pub title: String,
    pub variant: SectionVariant,
    pub config: GalleryConfig,
    pub images: ImageCollection,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    pub sections: Vec<GallerySection>,
}

impl Manifest {
    /// Parse and resolve configs: variant preset, then the manifest-wide
    /// overrides, then the section's own overrides.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(raw.sections.len());
        for section in raw.sections {
            if !seen.insert(section.id.clone()) {
                return Err(ManifestError::DuplicateSection(section.id));
            }
            let base = raw.config.apply(section.variant.preset())?;
            let config = section.config.apply(base)?;
            sections.push(GallerySection {
                id: section.id,
                title: section.title,
                variant: section.variant,
                config,
                images: section.images,
            });
        }

        info!(
            "Loaded manifest with {} sections, {} images",
            sections.len(),
            sections.iter().map(|s| s.images.len()).sum::<usize>()
        );
        Ok(Self { sections })
    }

    pub fn section(&self, id: &str) -> Option<&GallerySection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "config": { "swipeThresholdPx": 60 },
        "sections": [
            {
                "id": "gallery",
                "title": "Gallery",
                "variant": "masonry",
                "images": [
                    { "src": "/gallery/Moonrise.jpg", "alt": "Moonrise", "width": 1200, "height": 1800 },
                    { "src": "/gallery/Harbor.jpg", "alt": "Harbor", "width": 1800, "height": 1200, "isLandscape": true }
                ]
            },
            {
                "id": "tables",
                "variant": "tiles",
                "config": { "revealStaggerMs": 50 },
                "images": [ { "src": "/tables/AnimeExpo2024.jpg" } ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sections_and_resolve_config() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.sections.len(), 2);

        let gallery = manifest.section("gallery").unwrap();
        assert_eq!(gallery.images.len(), 2);
        assert_eq!(gallery.config.swipe_threshold_px, 60.0);
        assert_eq!(gallery.config.reveal_threshold, 0.15);

        let tables = manifest.section("tables").unwrap();
        assert_eq!(tables.variant, SectionVariant::Tiles);
        assert_eq!(tables.config.swipe_threshold_px, 60.0);
        assert_eq!(tables.config.reveal_threshold, 0.2);
        assert_eq!(tables.config.reveal_stagger_ms, 50);
        assert_eq!(tables.title, "");
    }

    #[test]
    fn test_bad_dimensions_keep_the_section() {
        let json = r#"{"sections": [{"id": "gallery", "variant": "masonry", "images": [
            {"src": "/g/Dawn.jpg", "alt": "Dawn", "width": 1200, "height": 1800},
            {"src": "/g/Dusk.jpg", "alt": "Dusk", "width": "unknown", "height": 1200}
        ]}]}"#;
        let manifest = Manifest::from_json(json).unwrap();
        let images = &manifest.section("gallery").unwrap().images;
        assert_eq!(images.len(), 2);
        assert_eq!(images.get(0).unwrap().width, Some(1200));
        assert_eq!(images.get(1).unwrap().width, None);
        assert_eq!(images.get(1).unwrap().height, Some(1200));
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let json = r#"{"sections": [{"id": "a", "variant": "carousel3d", "images": []}]}"#;
        assert!(matches!(Manifest::from_json(json), Err(ManifestError::Json(_))));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let json = r#"{"sections": [
            {"id": "a", "variant": "masonry", "images": []},
            {"id": "a", "variant": "tiles", "images": []}
        ]}"#;
        assert!(matches!(
            Manifest::from_json(json),
            Err(ManifestError::DuplicateSection(id)) if id == "a"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let json = r#"{"config": {"revealThreshold": 0}, "sections": []}"#;
        assert!(Manifest::from_json(json).is_ok());

        let json = r#"{"config": {"revealThreshold": 0}, "sections": [
            {"id": "a", "variant": "masonry", "images": []}
        ]}"#;
        assert!(matches!(
            Manifest::from_json(json),
            Err(ManifestError::Config(ConfigError::RevealThreshold(_)))
        ));
    }
}
