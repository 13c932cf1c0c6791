//! folio-ui - Gallery components for the portfolio site
//!
//! Dioxus views over the state machines in `folio-common`, plus the browser
//! adapters that implement its ports.

pub mod browser;
pub mod components;
pub mod wasm_utils;

pub use components::*;
