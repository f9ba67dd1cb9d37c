//! Browser layer for the quire editor.
//!
//! This crate provides the browser side of the session's side effects.
//! It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `storage`: `localStorage`-backed `ContentStore`
//! - `platform`: alerts and Blob downloads (`SessionPlatform`)
//! - `widget`: Quill binding, change events into the session
//! - `dom_format`: block format records applied to DOM elements
//!
//! # Re-exports
//!
//! This crate re-exports `quire-editor-core` for convenience, so consumers
//! only need to depend on `quire-editor-browser`.

// Re-export core crate
pub use quire_editor_core;
pub use quire_editor_core::*;

pub mod dom_format;
pub mod platform;
pub mod storage;
pub mod widget;

pub use dom_format::{annotate_blocks, apply_block_format, read_block_format};
pub use platform::BrowserPlatform;
pub use storage::LocalStore;
pub use widget::QuillWidget;
