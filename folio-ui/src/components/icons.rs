//! Lightbox glyphs from the Lucide set (https://lucide.dev)
//!
//! Strokes use `currentColor`, so size and colour come from the `class` prop.

use dioxus::prelude::*;

/// 24x24 stroked outline shared by every icon below
#[component]
fn LucideSvg(class: &'static str, stroke_width: &'static str, children: Element) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "{stroke_width}",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            "aria-hidden": "true",
            {children}
        }
    }
}

/// Previous image
#[component]
pub fn ChevronLeftIcon(
    #[props(default = "lightbox-icon")] class: &'static str,
    #[props(default = "2")] stroke_width: &'static str,
) -> Element {
    rsx! {
        LucideSvg { class, stroke_width, path { d: "m15 18-6-6 6-6" } }
    }
}

/// Next image
#[component]
pub fn ChevronRightIcon(
    #[props(default = "lightbox-icon")] class: &'static str,
    #[props(default = "2")] stroke_width: &'static str,
) -> Element {
    rsx! {
        LucideSvg { class, stroke_width, path { d: "m9 18 6-6-6-6" } }
    }
}

#[component]
pub fn XIcon(#[props(default = "lightbox-icon")] class: &'static str) -> Element {
    rsx! {
        LucideSvg { class, stroke_width: "2",
            path { d: "M18 6 6 18" }
            path { d: "m6 6 12 12" }
        }
    }
}
