//! Portfolio site: every gallery section listed in the manifest.

fn main() {
    dioxus::launch(folio_web::App);
}
