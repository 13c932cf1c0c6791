//! Lightbox state machine.
//!
//! `Closed` ⇄ `Open(index)`. Opening locks page scroll, attaches the keyboard
//! bindings, tells the page chrome a modal is up and preloads the image with
//! its neighbours. Closing undoes all of it. Navigation wraps at both ends.

use tracing::debug;

use crate::ports::{KeyBindings, ScrollStylePort};
use crate::preload::PreloadScheduler;
use crate::scroll_lock::ScrollLock;
use crate::swipe::SwipeOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    Open(usize),
}

/// Navigation requested by an input binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxCommand {
    Next,
    Previous,
    Close,
}

impl LightboxCommand {
    /// Keyboard map; `key` is a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "Escape" => Some(Self::Close),
            _ => None,
        }
    }
}

/// How the lightbox image should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEntrance {
    /// Just opened, still loading: keep it scaled down and transparent
    Pending,
    /// Just opened and loaded: zoom in
    ZoomIn,
    /// Reached by navigation: swap without animation
    Immediate,
}

/// Host capabilities the controller drives
pub struct LightboxPorts {
    pub scroll: Box<dyn ScrollStylePort>,
    pub keys: Box<dyn KeyBindings>,
    pub on_modal_change: Box<dyn FnMut(bool)>,
}

pub struct LightboxController {
    state: LightboxState,
    /// Set on open, cleared by navigation
    initial_load: bool,
    image_loaded: bool,
    scroll_lock: ScrollLock,
    keys: Box<dyn KeyBindings>,
    on_modal_change: Box<dyn FnMut(bool)>,
    preloader: PreloadScheduler,
}

impl LightboxController {
    pub fn new(preloader: PreloadScheduler, ports: LightboxPorts) -> Self {
        Self {
            state: LightboxState::Closed,
            initial_load: false,
            image_loaded: false,
            scroll_lock: ScrollLock::new(ports.scroll),
            keys: ports.keys,
            on_modal_change: ports.on_modal_change,
            preloader,
        }
    }

    pub fn len(&self) -> usize {
        self.preloader.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preloader.is_empty()
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn open_index(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open(index) => Some(index),
            LightboxState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open_index().is_some()
    }

    /// Show image `index`. Out-of-range indices are ignored.
    ///
    /// Opening while already open jumps without another modal notification.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        match self.state {
            LightboxState::Open(current) if current == index => false,
            LightboxState::Open(_) => {
                self.show(index);
                true
            }
            LightboxState::Closed => {
                debug!("Lightbox opened at {index}");
                self.state = LightboxState::Open(index);
                self.initial_load = true;
                self.image_loaded = false;
                self.scroll_lock.engage();
                self.keys.attach();
                (self.on_modal_change)(true);
                self.preloader.focus(index);
                true
            }
        }
    }

    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!("Lightbox closed");
        self.state = LightboxState::Closed;
        self.initial_load = false;
        self.image_loaded = false;
        self.keys.detach();
        self.scroll_lock.disengage();
        (self.on_modal_change)(false);
        true
    }

    pub fn next(&mut self) -> bool {
        let Some(index) = self.open_index() else {
            return false;
        };
        self.show((index + 1) % self.len());
        true
    }

    pub fn previous(&mut self) -> bool {
        let Some(index) = self.open_index() else {
            return false;
        };
        let len = self.len();
        self.show((index + len - 1) % len);
        true
    }

    pub fn apply(&mut self, command: LightboxCommand) -> bool {
        match command {
            LightboxCommand::Next => self.next(),
            LightboxCommand::Previous => self.previous(),
            LightboxCommand::Close => self.close(),
        }
    }

    /// Navigate for a finished swipe; taps are left to the click handlers
    pub fn apply_swipe(&mut self, outcome: SwipeOutcome) -> bool {
        match outcome {
            SwipeOutcome::Next => self.next(),
            SwipeOutcome::Previous => self.previous(),
            SwipeOutcome::Tap => false,
        }
    }

    fn show(&mut self, index: usize) {
        self.state = LightboxState::Open(index);
        self.initial_load = false;
        self.image_loaded = false;
        self.preloader.focus(index);
    }

    /// Record the load event of the displayed image. Late events from an
    /// image that is no longer shown are ignored.
    pub fn mark_image_loaded(&mut self, index: usize) {
        if self.open_index() == Some(index) {
            self.image_loaded = true;
        }
    }

    pub fn image_entrance(&self) -> ImageEntrance {
        match (self.initial_load, self.image_loaded) {
            (true, false) => ImageEntrance::Pending,
            (true, true) => ImageEntrance::ZoomIn,
            (false, _) => ImageEntrance::Immediate,
        }
    }

    /// "3 / 5" style position label while open
    pub fn counter_label(&self) -> Option<String> {
        self.open_index()
            .map(|index| format!("{} / {}", index + 1, self.len()))
    }

    /// Background preload of every image not yet requested
    pub fn preload_all(&mut self) -> usize {
        self.preloader.sweep()
    }

    pub fn preloader(&self) -> &PreloadScheduler {
        &self.preloader
    }
}

impl Drop for LightboxController {
    fn drop(&mut self) {
        self.close();
    }
}
