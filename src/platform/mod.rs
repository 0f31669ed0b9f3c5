//! Platform abstraction layer
//!
//! Browser-only pieces: LocalStorage-backed best score. Native builds use
//! `persistence::FileStore` instead.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;
