//! Gallery components

pub mod gallery;
pub mod icons;
pub mod lightbox;

pub use gallery::{use_reveal, Gallery, RevealHandle};
pub use icons::{ChevronLeftIcon, ChevronRightIcon, XIcon};
pub use lightbox::{use_lightbox, LightboxHandle, LightboxOverlay};
