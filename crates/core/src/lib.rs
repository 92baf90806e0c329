//! porter-core: Migration engine
//!
//! Resolves paths against a source project root, copies single files or
//! directory trees into a staging area, and renders content previews.

pub mod config;
pub mod migrate;
pub mod preview;
pub mod walk;

pub use config::PorterConfig;
pub use migrate::Migrator;
pub use preview::render_preview;
pub use walk::{WalkFilter, WalkReport};
