pub mod api;

use dioxus::prelude::*;
use folio_common::GallerySection;
use folio_ui::Gallery;
use tracing::warn;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let manifest = use_resource(api::fetch_manifest);
    let mut modal_open = use_signal(|| false);

    let read = manifest.read();
    let content = match &*read {
        Some(Ok(manifest)) => Ok(manifest.sections.clone()),
        Some(Err(e)) => Err(e.clone()),
        None => {
            return rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                div { class: "site-background status-message",
                    "Loading..."
                }
            }
        }
    };
    drop(read);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "site-background",
            // The lightbox covers the page; the header would sit on top of it
            if !modal_open() {
                SiteHeader {}
            }
            main { class: "site-main",
                match content {
                    Ok(sections) => rsx! {
                        for gallery in sections {
                            GallerySectionView {
                                key: "{gallery.id}",
                                gallery,
                                on_modal_change: move |open| modal_open.set(open),
                            }
                        }
                    },
                    Err(e) => {
                        warn!("Failed to load gallery manifest: {e}");
                        rsx! {
                            div { class: "status-message", "Gallery unavailable" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SiteHeader() -> Element {
    rsx! {
        header { class: "site-header",
            a { href: "/", class: "site-title",
                "Portfolio"
            }
        }
    }
}

/// One manifest section: heading plus its gallery.
#[component]
fn GallerySectionView(gallery: GallerySection, on_modal_change: EventHandler<bool>) -> Element {
    let grid_class = gallery.variant.grid_class().to_string();

    rsx! {
        section { id: "{gallery.id}", class: "gallery-section",
            if !gallery.title.is_empty() {
                div { class: "section-heading",
                    h2 { class: "section-title",
                        "{gallery.title}"
                    }
                }
            }
            Gallery {
                images: gallery.images.clone(),
                config: gallery.config.clone(),
                grid_class,
                on_modal_change,
            }
        }
    }
}
