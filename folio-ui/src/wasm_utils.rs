//! Browser helpers shared by the gallery adapters.
//!
//! The lightbox listens for keys on the whole document, but only while it is
//! open. [`DocumentEventListener`] ties that registration to a value: the
//! keyboard port stores it in an `Option` on open and clears it on close, and
//! the drop removes the listener again.

use std::time::Duration;

use tracing::warn;
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

/// Listener registered on `document` for as long as this value lives.
pub struct DocumentEventListener {
    document: web_sys_x::Document,
    event_name: &'static str,
    handler: Closure<dyn FnMut(JsValue)>,
}

impl DocumentEventListener {
    /// `None` when there is no document or the registration is refused.
    pub fn attach(
        event_name: &'static str,
        handler: impl FnMut(JsValue) + 'static,
    ) -> Option<Self> {
        let document = web_sys_x::window()?.document()?;
        let handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        if let Err(e) = document
            .add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())
        {
            warn!("Could not listen for {event_name}: {e:?}");
            return None;
        }
        Some(Self {
            document,
            event_name,
            handler,
        })
    }
}

impl Drop for DocumentEventListener {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            self.event_name,
            self.handler.as_ref().unchecked_ref(),
        );
    }
}

/// The page's `<body>`, if there is a document
pub fn body() -> Option<web_sys_x::HtmlElement> {
    web_sys_x::window()?.document()?.body()
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
