/* src/holder/mod.rs */

//!
//! In-memory settings storage.
//!
//! - [`Store`] - thread-safe key/value container with copy-on-read accessors
//! - [`Value`] - the dynamically-typed tree stored under each key
//! - [`cast`] - the conversions behind the typed accessors

pub mod cast;
mod error;
mod event;
mod store;
mod value;

pub use cast::Target;
pub use error::HoldError;
pub use event::StoreEvent;
pub use store::Store;
pub use value::{Map, Value};
