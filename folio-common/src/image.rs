use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Tile ratio used for landscape images whose dimensions are unknown
pub const DEFAULT_LANDSCAPE_RATIO: f64 = 3.0 / 2.0;
/// Tile ratio used for portrait images whose dimensions are unknown
pub const DEFAULT_PORTRAIT_RATIO: f64 = 2.0 / 3.0;

/// Columns in the desktop grid; portrait tiles take a third, landscape tiles half
pub const GRID_COLUMNS: u32 = 6;

/// Tile orientation, used for layout spans and fallback ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_class(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    /// Columns this tile spans in the desktop grid
    pub fn column_span(&self) -> u32 {
        match self {
            Orientation::Portrait => GRID_COLUMNS / 3,
            Orientation::Landscape => GRID_COLUMNS / 2,
        }
    }
}

/// Image entry as served by the image listing
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImage {
    src: String,
    #[serde(default)]
    alt: String,
    #[serde(default, deserialize_with = "lenient_dimension")]
    width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    is_landscape: Option<bool>,
}

/// Numbers and numeric strings; anything else counts as unknown
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// One image of a gallery.
///
/// Dimensions are optional: listings that could not read an image's size
/// still produce a descriptor, and layout falls back to a default ratio.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawImage")]
pub struct ImageDescriptor {
    pub url: String,
    pub alt_text: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub is_wide: bool,
}

impl From<RawImage> for ImageDescriptor {
    fn from(raw: RawImage) -> Self {
        let width = positive_dimension(raw.width);
        let height = positive_dimension(raw.height);
        let derived = matches!((width, height), (Some(w), Some(h)) if w > h);
        Self {
            url: raw.src,
            alt_text: raw.alt,
            width,
            height,
            is_wide: raw.is_landscape.unwrap_or(derived),
        }
    }
}

fn positive_dimension(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.min(u32::MAX as f64) as u32)
}

impl ImageDescriptor {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>, width: u32, height: u32) -> Self {
        let width = (width > 0).then_some(width);
        let height = (height > 0).then_some(height);
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            width,
            height,
            is_wide: matches!((width, height), (Some(w), Some(h)) if w > h),
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_wide {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Width over height, or the orientation's default tile ratio when either
    /// dimension is missing
    pub fn aspect_ratio(&self) -> f64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) => w as f64 / h as f64,
            _ => match self.orientation() {
                Orientation::Landscape => DEFAULT_LANDSCAPE_RATIO,
                Orientation::Portrait => DEFAULT_PORTRAIT_RATIO,
            },
        }
    }

    /// Human-readable title derived from the file name
    pub fn title(&self) -> String {
        format_title(&self.url)
    }
}

/// Turn `/tables/AnimeExpo2024.jpg` into `Anime Expo 2024`.
///
/// Strips directories and the extension, then puts a space before every
/// capital letter and every run of digits.
pub fn format_title(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    };

    let mut title = String::with_capacity(stem.len() + 8);
    let mut prev_digit = false;
    for c in stem.chars() {
        let is_digit = c.is_ascii_digit();
        if c.is_ascii_uppercase() || (is_digit && !prev_digit) {
            title.push(' ');
        }
        title.push(c);
        prev_digit = is_digit;
    }
    title.trim().to_string()
}

/// Ordered, read-only set of gallery images; order is navigation order
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ImageCollection {
    images: Vec<ImageDescriptor>,
}

impl ImageCollection {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.images.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageDescriptor> {
        self.images.iter()
    }

    /// Full-resolution URLs in display order
    pub fn urls(&self) -> Vec<String> {
        self.images.iter().map(|i| i.url.clone()).collect()
    }
}

impl From<Vec<ImageDescriptor>> for ImageCollection {
    fn from(images: Vec<ImageDescriptor>) -> Self {
        Self::new(images)
    }
}

impl<'a> IntoIterator for &'a ImageCollection {
    type Item = &'a ImageDescriptor;
    type IntoIter = std::slice::Iter<'a, ImageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wide_derived_from_dimensions() {
        assert!(ImageDescriptor::new("a.jpg", "a", 1800, 1200).is_wide);
        assert!(!ImageDescriptor::new("b.jpg", "b", 1200, 1800).is_wide);
        assert!(!ImageDescriptor::new("c.jpg", "c", 1000, 1000).is_wide);
    }

    #[test]
    fn test_aspect_ratio_falls_back_when_dimensions_missing() {
        let img = ImageDescriptor::new("a.jpg", "a", 0, 900);
        assert_eq!(img.width, None);
        assert_eq!(img.orientation(), Orientation::Portrait);
        assert_eq!(img.aspect_ratio(), DEFAULT_PORTRAIT_RATIO);
    }

    #[test]
    fn test_deserialize_listing_entry() {
        let json = r#"{"src": "/gallery/Harbor.jpg", "alt": "Harbor", "width": 1800, "height": 1200}"#;
        let img: ImageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(img.url, "/gallery/Harbor.jpg");
        assert_eq!(img.alt_text, "Harbor");
        assert!(img.is_wide);
        assert_eq!(img.aspect_ratio(), 1.5);
    }

    #[test]
    fn test_deserialize_explicit_landscape_flag_wins() {
        let json = r#"{"src": "x.jpg", "alt": "", "width": 100, "height": 200, "isLandscape": true}"#;
        let img: ImageDescriptor = serde_json::from_str(json).unwrap();
        assert!(img.is_wide);
        assert_eq!(img.orientation().column_span(), 3);
    }

    #[test]
    fn test_deserialize_malformed_dimensions() {
        let json = r#"{"src": "x.jpg", "width": -4, "isLandscape": true}"#;
        let img: ImageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(img.width, None);
        assert_eq!(img.height, None);
        assert_eq!(img.aspect_ratio(), DEFAULT_LANDSCAPE_RATIO);
    }

    #[test]
    fn test_deserialize_wrongly_typed_dimensions() {
        let json = r#"{"src": "x.jpg", "width": "wide", "height": [1], "isLandscape": "yes"}"#;
        let img: ImageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(img.width, None);
        assert_eq!(img.height, None);
        assert!(!img.is_wide);
        assert_eq!(img.aspect_ratio(), DEFAULT_PORTRAIT_RATIO);

        let json = r#"{"src": "y.jpg", "width": "1800", "height": 1200, "isLandscape": null}"#;
        let img: ImageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(img.width, Some(1800));
        assert!(img.is_wide);
    }

    #[test]
    fn test_format_title() {
        assert_eq!(format_title("/tables/AnimeExpo2024.jpg"), "Anime Expo 2024");
        assert_eq!(format_title("FanExpo.webp"), "Fan Expo");
        assert_eq!(format_title("/a/b/lowercase"), "lowercase");
        assert_eq!(format_title("Table12B.png"), "Table 12 B");
    }

    #[test]
    fn test_column_spans_fill_grid() {
        assert_eq!(Orientation::Portrait.column_span() * 3, GRID_COLUMNS);
        assert_eq!(Orientation::Landscape.column_span() * 2, GRID_COLUMNS);
    }
}
