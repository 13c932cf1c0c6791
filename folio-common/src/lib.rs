//! folio-common - DOM-free core of the portfolio galleries
//!
//! Image model, gallery config and manifest parsing, and the state machines
//! behind the grid and lightbox. Browser access goes through the traits in
//! [`ports`].

pub mod config;
pub mod grid;
pub mod image;
pub mod lightbox;
pub mod manifest;
pub mod ports;
pub mod preload;
pub mod reveal;
pub mod scroll_lock;
pub mod swipe;

pub use config::{ConfigError, ConfigOverrides, GalleryConfig};
pub use grid::{layout_tiles, TileView};
pub use image::{format_title, ImageCollection, ImageDescriptor, Orientation};
pub use lightbox::{ImageEntrance, LightboxCommand, LightboxController, LightboxPorts, LightboxState};
pub use manifest::{GallerySection, Manifest, ManifestError, SectionVariant};
pub use ports::{ImageLoader, KeyBindings, ScrollStylePort, Spawner, VisibilityTracker};
pub use preload::{neighbours, PreloadError, PreloadScheduler};
pub use reveal::{visibility_channel, RevealSet, VisibilityEvent, VisibilityReceiver, VisibilitySender};
pub use scroll_lock::ScrollLock;
pub use swipe::{classify_swipe, SwipeOutcome, SwipeTracker};
