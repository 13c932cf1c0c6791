//! Capabilities the gallery needs from its host environment.
//!
//! The browser implementations live in `folio-ui`; tests drive the state
//! machines through recording fakes.

use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::preload::PreloadError;

/// Read/write access to the page's scroll-suppressing style (body `overflow`)
pub trait ScrollStylePort {
    /// Current value, empty string when unset
    fn overflow(&self) -> String;
    fn set_overflow(&mut self, value: &str);
}

/// Document-level keyboard listener owned by an open lightbox
pub trait KeyBindings {
    fn attach(&mut self);
    fn detach(&mut self);
}

/// Fetches a full-resolution image ahead of display
pub trait ImageLoader {
    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<(), PreloadError>>;
}

/// Viewport-intersection tracking for grid tiles.
///
/// Implementations report `(index, became_visible)` events on the sender they
/// were created with.
pub trait VisibilityTracker {
    /// Host element type (a DOM element in the browser)
    type Target;

    /// Start tracking `target` as the tile at `index`
    fn observe(&mut self, index: usize, target: &Self::Target);

    /// Stop tracking every tile
    fn disconnect(&mut self);
}

/// Runs fire-and-forget futures on the host executor
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;
