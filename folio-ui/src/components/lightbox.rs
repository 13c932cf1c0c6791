//! Full-screen image viewer for a gallery.
//!
//! [`use_lightbox`] owns the [`LightboxController`] for one gallery and wires
//! it to the browser; [`LightboxOverlay`] renders the open state.

use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use folio_common::{
    GalleryConfig, ImageCollection, ImageDescriptor, ImageEntrance, LightboxCommand,
    LightboxController, LightboxPorts, PreloadScheduler, Spawner, SwipeOutcome, SwipeTracker,
};
use futures::channel::mpsc::UnboundedReceiver;
use futures::future::LocalBoxFuture;
use futures::StreamExt;
use tracing::debug;

use crate::browser::{wait_for_idle, BodyOverflow, BrowserImageLoader, DocumentKeyBindings};
use crate::components::icons::{ChevronLeftIcon, ChevronRightIcon, XIcon};
use crate::wasm_utils;

/// Handle to a gallery's lightbox.
///
/// Created by [`use_lightbox`]. The controller is taken out on unmount, so
/// every method is a no-op afterwards.
#[derive(Clone, Copy, PartialEq)]
pub struct LightboxHandle {
    controller: Signal<Option<LightboxController>>,
}

impl LightboxHandle {
    fn with<R>(&self, f: impl FnOnce(&mut LightboxController) -> R) -> Option<R> {
        let mut controller = self.controller;
        let mut guard = controller.try_write().ok()?;
        (*guard).as_mut().map(f)
    }

    pub fn open(&self, index: usize) {
        self.with(|c| c.open(index));
    }

    pub fn apply(&self, command: LightboxCommand) {
        self.with(|c| c.apply(command));
    }

    pub fn apply_swipe(&self, outcome: SwipeOutcome) {
        self.with(|c| c.apply_swipe(outcome));
    }

    pub fn mark_image_loaded(&self, index: usize) {
        self.with(|c| c.mark_image_loaded(index));
    }

    /// Subscribes the caller
    pub fn open_index(&self) -> Option<usize> {
        self.controller.read().as_ref().and_then(|c| c.open_index())
    }

    /// Entrance and counter label of the open image. Subscribes the caller.
    pub fn presentation(&self) -> Option<(ImageEntrance, String)> {
        let guard = self.controller.read();
        let controller = guard.as_ref()?;
        Some((controller.image_entrance(), controller.counter_label()?))
    }

    fn preload_all(&self) -> usize {
        self.with(|c| c.preload_all()).unwrap_or(0)
    }

    /// Take the controller out and close it in a spawned task.
    fn teardown(&self) {
        let mut controller = self.controller;
        let Ok(mut guard) = controller.try_write() else {
            return;
        };
        if let Some(mut controller) = (*guard).take() {
            // WORKAROUND: closing touches body style and removes the keydown
            // listener; doing that inside scope teardown panics under wry-bindgen.
            spawn_forever(async move {
                controller.close();
            });
        }
    }
}

/// Hook creating the lightbox for `images`.
///
/// The collection is captured on first render; a gallery whose images change
/// must be remounted (key it by section id).
///
/// Besides the controller this starts two tasks tied to the calling scope:
/// one applies keyboard commands, the other runs the background preload
/// sweep `preload_delay_ms` after mount, once the browser is idle.
pub fn use_lightbox(
    images: &ImageCollection,
    config: &GalleryConfig,
    on_modal_change: EventHandler<bool>,
) -> LightboxHandle {
    let handle = use_hook(|| {
        let (commands, command_rx) = futures::channel::mpsc::unbounded();
        // Preloads outlive the overlay (and the gallery) that requested them
        let spawner: Spawner = Rc::new(|fut: LocalBoxFuture<'static, ()>| {
            spawn_forever(fut);
        });
        let preloader =
            PreloadScheduler::new(images.urls(), Rc::new(BrowserImageLoader), spawner);
        let ports = LightboxPorts {
            scroll: Box::new(BodyOverflow),
            keys: Box::new(DocumentKeyBindings::new(commands)),
            on_modal_change: Box::new(move |open| on_modal_change.call(open)),
        };
        let handle = LightboxHandle {
            controller: Signal::new(Some(LightboxController::new(preloader, ports))),
        };

        spawn(apply_commands(handle, command_rx));

        let delay = Duration::from_millis(config.preload_delay_ms);
        let fallback = Duration::from_millis(config.idle_fallback_ms);
        spawn(async move {
            wasm_utils::sleep(delay).await;
            wait_for_idle(fallback).await;
            let queued = handle.preload_all();
            debug!("Background preload queued {queued} images");
        });

        handle
    });

    // Unmounting while open must hand the page back: scroll, key listener
    // and the modal flag of the surrounding chrome.
    use_drop(move || handle.teardown());

    handle
}

async fn apply_commands(
    lightbox: LightboxHandle,
    mut commands: UnboundedReceiver<LightboxCommand>,
) {
    while let Some(command) = commands.next().await {
        lightbox.apply(command);
    }
}

fn touch_x(evt: &TouchEvent) -> Option<f64> {
    evt.data()
        .target_touches()
        .first()
        .map(|touch| touch.client_coordinates().x)
}

fn entrance_class(entrance: ImageEntrance) -> &'static str {
    match entrance {
        ImageEntrance::Pending => "lightbox-image pending",
        ImageEntrance::ZoomIn => "lightbox-image zoom-in",
        ImageEntrance::Immediate => "lightbox-image",
    }
}

/// The open lightbox. Mount only while the lightbox is open at `index`.
///
/// Clicking the backdrop closes; clicks on the image and the controls do not
/// reach it. Horizontal swipes navigate.
#[component]
pub fn LightboxOverlay(
    lightbox: LightboxHandle,
    index: usize,
    image: ImageDescriptor,
    swipe_threshold_px: f64,
) -> Element {
    let mut swipe = use_signal(|| SwipeTracker::new(swipe_threshold_px));

    let Some((entrance, counter)) = lightbox.presentation() else {
        return rsx! {};
    };
    let image_class = entrance_class(entrance);
    let url = image.url.clone();
    let alt = image.alt_text.clone();

    rsx! {
        div {
            class: "lightbox-overlay",
            role: "dialog",
            "aria-modal": "true",
            onclick: move |_| lightbox.apply(LightboxCommand::Close),
            ontouchstart: move |evt| {
                if let Some(x) = touch_x(&evt) {
                    swipe.write().touch_start(x);
                }
            },
            ontouchmove: move |evt| {
                if let Some(x) = touch_x(&evt) {
                    swipe.write().touch_move(x);
                }
            },
            ontouchend: move |_| {
                let outcome = swipe.write().touch_end();
                lightbox.apply_swipe(outcome);
            },

            button {
                class: "lightbox-close",
                "aria-label": "Close",
                onclick: move |e| {
                    e.stop_propagation();
                    lightbox.apply(LightboxCommand::Close);
                },
                XIcon {}
            }

            button {
                class: "lightbox-nav lightbox-prev",
                "aria-label": "Previous image",
                onclick: move |e| {
                    e.stop_propagation();
                    lightbox.apply(LightboxCommand::Previous);
                },
                ChevronLeftIcon { stroke_width: "1.5" }
            }

            div {
                class: "lightbox-content",
                onclick: move |e| e.stop_propagation(),
                img {
                    src: "{url}",
                    alt: "{alt}",
                    class: "{image_class}",
                    onload: move |_| lightbox.mark_image_loaded(index),
                }
                div { class: "lightbox-counter", "{counter}" }
            }

            button {
                class: "lightbox-nav lightbox-next",
                "aria-label": "Next image",
                onclick: move |e| {
                    e.stop_propagation();
                    lightbox.apply(LightboxCommand::Next);
                },
                ChevronRightIcon { stroke_width: "1.5" }
            }
        }
    }
}
