//! Image grid with scroll-triggered reveal and a lightbox.

use std::collections::BTreeMap;
use std::time::Duration;

use dioxus::prelude::*;
use folio_common::{
    layout_tiles, visibility_channel, GalleryConfig, ImageCollection, RevealSet,
    VisibilityReceiver, VisibilityTracker,
};
use futures::StreamExt;

use crate::browser::IntersectionTracker;
use crate::components::lightbox::{use_lightbox, LightboxOverlay};
use crate::wasm_utils;

/// Reveal state of a grid's tiles.
///
/// Created by [`use_reveal`]. Wire `onmounted(index)` onto each tile element;
/// the element must also carry `data-index`.
#[derive(Clone, Copy, PartialEq)]
pub struct RevealHandle {
    revealed: Signal<RevealSet>,
    tiles: Signal<BTreeMap<usize, web_sys_x::Element>>,
    tracker: Signal<Option<IntersectionTracker>>,
}

impl RevealHandle {
    /// Callback for tile `index`'s `onmounted`
    pub fn onmounted(&self, index: usize) -> impl FnMut(MountedEvent) {
        let mut tiles = self.tiles;
        let mut tracker = self.tracker;
        move |evt: MountedEvent| {
            let Some(element) = evt.data().downcast::<web_sys_x::Element>().cloned() else {
                return;
            };
            // Tiles mounted before the observer exists are picked up when it is created
            if let Some(tracker) = tracker.write().as_mut() {
                tracker.observe(index, &element);
            }
            tiles.write().insert(index, element);
        }
    }

    pub fn revealed(&self) -> Signal<RevealSet> {
        self.revealed
    }
}

/// Hook observing tile visibility for one grid.
///
/// Without `IntersectionObserver` every tile is revealed at once.
pub fn use_reveal(config: &GalleryConfig) -> RevealHandle {
    let mut revealed = use_signal(RevealSet::new);
    let tiles = use_signal(BTreeMap::<usize, web_sys_x::Element>::new);
    let mut tracker = use_signal(|| None::<IntersectionTracker>);
    let threshold = config.reveal_threshold;

    let events = use_hook(|| {
        let (tx, rx) = visibility_channel();
        spawn(reveal_from(rx, revealed, config.clone()));
        tx
    });

    // WORKAROUND: use_effect instead of use_hook so the observer is created
    // after the first render. Creating it during render panics under wry-bindgen.
    use_effect(move || {
        let mut observer = IntersectionTracker::new(threshold, events.clone());
        if !observer.is_supported() {
            revealed.write().reveal_all();
            return;
        }
        for (index, element) in tiles.peek().iter() {
            observer.observe(*index, element);
        }
        tracker.set(Some(observer));
    });

    use_drop(move || {
        // Disconnect outside scope teardown, like other JS handles
        if let Ok(mut guard) = tracker.try_write() {
            if let Some(observer) = guard.take() {
                spawn(async move {
                    drop(observer);
                });
            }
        }
    });

    RevealHandle {
        revealed,
        tiles,
        tracker,
    }
}

/// Feed visibility events into `revealed`, staggered by tile index
async fn reveal_from(
    mut events: VisibilityReceiver,
    mut revealed: Signal<RevealSet>,
    config: GalleryConfig,
) {
    while let Some(event) = events.next().await {
        let Some(delay) = revealed.peek().reveal_delay(event, &config) else {
            continue;
        };
        if delay == 0 {
            revealed.write().apply(event);
        } else {
            spawn(async move {
                wasm_utils::sleep(Duration::from_millis(delay)).await;
                revealed.write().apply(event);
            });
        }
    }
}

/// A portfolio gallery: tiles in `grid_class` layout, each opening the
/// lightbox at its position.
///
/// `on_modal_change` reports lightbox open/close so the page can hide its
/// own chrome. Keyed remounts are required when `images` changes.
#[component]
pub fn Gallery(
    images: ImageCollection,
    #[props(default)] config: GalleryConfig,
    #[props(default = "masonry-gallery".to_string())] grid_class: String,
    #[props(default)] on_modal_change: EventHandler<bool>,
) -> Element {
    let lightbox = use_lightbox(&images, &config, on_modal_change);
    let reveal = use_reveal(&config);

    let tiles = layout_tiles(&images, &reveal.revealed().read());
    let open = lightbox.open_index();
    let current = open.and_then(|index| images.get(index).cloned().map(|image| (index, image)));

    rsx! {
        div { class: "{grid_class}",
            for tile in tiles {
                div {
                    key: "{tile.index}",
                    class: tile.class("gallery-item"),
                    style: tile.style(),
                    "data-index": "{tile.index}",
                    onmounted: reveal.onmounted(tile.index),
                    onclick: move |_| lightbox.open(tile.index),
                    img {
                        src: "{tile.url}",
                        alt: "{tile.alt_text}",
                        loading: "lazy",
                        decoding: "async",
                    }
                    div { class: "gallery-item-overlay",
                        h3 { class: "gallery-item-title", "{tile.title}" }
                    }
                }
            }
        }
        if let Some((index, image)) = current {
            LightboxOverlay {
                lightbox,
                index,
                image,
                swipe_threshold_px: config.swipe_threshold_px,
            }
        }
    }
}
