//! Browser implementations of the gallery ports.
//!
//! Each adapter degrades quietly when the DOM API it needs is missing: the
//! gallery must keep working (unanimated, unpreloaded) rather than fail.

use std::time::Duration;

use folio_common::{
    ImageLoader, KeyBindings, LightboxCommand, PreloadError, ScrollStylePort, VisibilityEvent,
    VisibilitySender, VisibilityTracker,
};
use futures::channel::mpsc::UnboundedSender;
use futures::future::LocalBoxFuture;
use tracing::{debug, warn};
use wasm_bindgen_futures_x::JsFuture;
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::{self, DocumentEventListener};

/// `document.body.style.overflow`
#[derive(Default)]
pub struct BodyOverflow;

impl ScrollStylePort for BodyOverflow {
    fn overflow(&self) -> String {
        wasm_utils::body()
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_overflow(&mut self, value: &str) {
        let Some(body) = wasm_utils::body() else {
            warn!("No document body, cannot set overflow");
            return;
        };
        let style = body.style();
        let result = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
        if let Err(e) = result {
            warn!("Failed to set body overflow to {value:?}: {e:?}");
        }
    }
}

/// Document `keydown` listener that forwards lightbox keys as commands
pub struct DocumentKeyBindings {
    commands: UnboundedSender<LightboxCommand>,
    listener: Option<DocumentEventListener>,
}

impl DocumentKeyBindings {
    pub fn new(commands: UnboundedSender<LightboxCommand>) -> Self {
        Self {
            commands,
            listener: None,
        }
    }
}

impl KeyBindings for DocumentKeyBindings {
    fn attach(&mut self) {
        if self.listener.is_some() {
            return;
        }
        let commands = self.commands.clone();
        self.listener = DocumentEventListener::attach("keydown", move |e: JsValue| {
            let Some(event) = e.dyn_ref::<web_sys_x::KeyboardEvent>() else {
                return;
            };
            if let Some(command) = LightboxCommand::from_key(&event.key()) {
                // Arrow keys would otherwise scroll the page under the overlay
                event.prevent_default();
                let _ = commands.unbounded_send(command);
            }
        });
        if self.listener.is_none() {
            warn!("Keyboard navigation unavailable");
        }
    }

    fn detach(&mut self) {
        self.listener = None;
    }
}

/// Preloads by decoding into a detached `<img>`, which fills the HTTP cache
#[derive(Default)]
pub struct BrowserImageLoader;

impl ImageLoader for BrowserImageLoader {
    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<(), PreloadError>> {
        let url = url.to_string();
        Box::pin(async move {
            let image = web_sys_x::HtmlImageElement::new().map_err(|e| load_error(&url, e))?;
            image.set_src(&url);
            JsFuture::from(image.decode())
                .await
                .map_err(|e| load_error(&url, e))?;
            debug!("Preloaded {url}");
            Ok(())
        })
    }
}

fn load_error(url: &str, err: JsValue) -> PreloadError {
    PreloadError::Load {
        url: url.to_string(),
        reason: format!("{err:?}"),
    }
}

/// `IntersectionObserver` over grid tiles.
///
/// Tiles carry their index in a `data-index` attribute. When the observer
/// cannot be created `is_supported()` is false and callers reveal everything.
pub struct IntersectionTracker {
    observer: Option<web_sys_x::IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(js_sys_x::Array)>>,
}

impl IntersectionTracker {
    pub fn new(threshold: f64, events: VisibilitySender) -> Self {
        let callback: Closure<dyn FnMut(js_sys_x::Array)> =
            Closure::wrap(Box::new(move |entries: js_sys_x::Array| {
                for entry in entries.iter() {
                    let Some(entry) = entry.dyn_ref::<web_sys_x::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let Some(index) = entry
                        .target()
                        .get_attribute("data-index")
                        .and_then(|v| v.parse::<usize>().ok())
                    else {
                        continue;
                    };
                    let _ = events.unbounded_send(VisibilityEvent {
                        index,
                        became_visible: entry.is_intersecting(),
                    });
                }
            }) as Box<dyn FnMut(js_sys_x::Array)>);

        let options = web_sys_x::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        match web_sys_x::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => Self {
                observer: Some(observer),
                _callback: Some(callback),
            },
            Err(e) => {
                warn!("IntersectionObserver unavailable, revealing all tiles: {e:?}");
                Self {
                    observer: None,
                    _callback: None,
                }
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        self.observer.is_some()
    }
}

impl VisibilityTracker for IntersectionTracker {
    type Target = web_sys_x::Element;

    fn observe(&mut self, _index: usize, target: &web_sys_x::Element) {
        if let Some(observer) = &self.observer {
            observer.observe(target);
        }
    }

    fn disconnect(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

impl Drop for IntersectionTracker {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Resolve inside browser idle time, or after `fallback` where
/// `requestIdleCallback` does not exist.
pub async fn wait_for_idle(fallback: Duration) {
    let Some(window) = web_sys_x::window() else {
        wasm_utils::sleep(fallback).await;
        return;
    };

    let request_idle = js_sys_x::Reflect::get(&window, &"requestIdleCallback".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys_x::Function>().ok());
    let Some(request_idle) = request_idle else {
        wasm_utils::sleep(fallback).await;
        return;
    };

    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    // Frees itself once the browser calls it, even if this future was dropped
    let callback = Closure::once_into_js(move || {
        let _ = tx.send(());
    });
    if request_idle.call1(&window, &callback).is_err() {
        wasm_utils::sleep(fallback).await;
        return;
    }
    let _ = rx.await;
}
