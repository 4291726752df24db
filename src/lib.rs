/* src/lib.rs */

//!
//! A thread-safe settings store with debounced, crash-safe persistence.
//!
//! This crate integrates four components:
//!
//! - **holder**: In-memory key/value store with copy-on-read, typed accessors and sub-stores.
//! - **signal**: Weakly-held change notification and the debounced save loop.
//! - **loader**: File formats and the atomic-replace file writer.
//! - **controller**: Unified interface integrating the above (`DurableStore`).
//!
//! ## Feature Flags
//!
//! - `yaml`: Enables YAML as a file format (JSON is always available).
//! - `full`: Enables all features.
//!
//! ## Basic Usage
//!
//! See `demos/basic.rs` for a complete example.

pub mod controller;
pub mod holder;
pub mod loader;
pub mod signal;

pub use controller::{DurableStore, PersistError};
pub use holder::{HoldError, Map, Store, Value};
