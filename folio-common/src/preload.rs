//! Full-resolution image preloading.
//!
//! Preloads are an optimisation only: failures are logged and dropped, and
//! the lightbox falls back to loading the image on display.

use std::collections::BTreeSet;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

use crate::ports::{ImageLoader, Spawner};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreloadError {
    #[error("Failed to preload {url}: {reason}")]
    Load { url: String, reason: String },
}

/// Previous, current and next index, wrapping at both ends
pub fn neighbours(index: usize, len: usize) -> [usize; 3] {
    let prev = (index + len - 1) % len;
    let next = (index + 1) % len;
    [prev, index, next]
}

/// Issues at most one load per image over the scheduler's lifetime
pub struct PreloadScheduler {
    urls: Vec<String>,
    preloaded: BTreeSet<usize>,
    loader: Rc<dyn ImageLoader>,
    spawner: Spawner,
}

impl PreloadScheduler {
    pub fn new(urls: Vec<String>, loader: Rc<dyn ImageLoader>, spawner: Spawner) -> Self {
        Self {
            urls,
            preloaded: BTreeSet::new(),
            loader,
            spawner,
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Request one image. Returns false if already requested or out of range.
    pub fn request(&mut self, index: usize) -> bool {
        let Some(url) = self.urls.get(index) else {
            return false;
        };
        if !self.preloaded.insert(index) {
            return false;
        }

        let load = self.loader.load(url);
        (self.spawner)(Box::pin(async move {
            if let Err(e) = load.await {
                debug!("{e}");
            }
        }));
        true
    }

    /// Request `index` and both of its neighbours. Returns how many loads
    /// were issued.
    pub fn focus(&mut self, index: usize) -> usize {
        if index >= self.urls.len() {
            return 0;
        }
        neighbours(index, self.urls.len())
            .into_iter()
            .filter(|&i| self.request(i))
            .count()
    }

    /// Request every image not requested yet
    pub fn sweep(&mut self) -> usize {
        let issued = (0..self.urls.len()).filter(|&i| self.request(i)).count();
        if issued > 0 {
            debug!("Background preload issued {issued} image loads");
        }
        issued
    }

    pub fn is_preloaded(&self, index: usize) -> bool {
        self.preloaded.contains(&index)
    }

    pub fn preloaded(&self) -> &BTreeSet<usize> {
        &self.preloaded
    }
}
