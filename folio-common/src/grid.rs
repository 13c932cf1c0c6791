use crate::image::{ImageCollection, Orientation};
use crate::reveal::RevealSet;

/// Render data for one grid tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub index: usize,
    pub url: String,
    pub alt_text: String,
    pub title: String,
    pub orientation: Orientation,
    pub aspect_ratio: f64,
    /// Drives the entrance animation only
    pub revealed: bool,
}

impl TileView {
    pub fn class(&self, base: &str) -> String {
        let mut class = format!("{base} {}", self.orientation.as_class());
        if self.revealed {
            class.push_str(" in-view");
        }
        class
    }

    pub fn style(&self) -> String {
        format!(
            "aspect-ratio: {:.4}; --tile-span: {};",
            self.aspect_ratio,
            self.orientation.column_span()
        )
    }
}

/// One tile per image, in collection order
pub fn layout_tiles(images: &ImageCollection, revealed: &RevealSet) -> Vec<TileView> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| TileView {
            index,
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
            title: image.title(),
            orientation: image.orientation(),
            aspect_ratio: image.aspect_ratio(),
            revealed: revealed.is_revealed(index),
        })
        .collect()
}
