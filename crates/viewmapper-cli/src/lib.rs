//! viewmapper CLI library.
//!
//! Exposes internal modules for testing; the entry point is the
//! `viewmapper` binary in `main.rs`.

pub mod cli;
pub mod datasets;
pub mod dispatch;
pub mod input;
pub mod output;
pub mod source;
#[cfg(feature = "warehouse")]
pub mod warehouse;

pub use cli::Cli;
