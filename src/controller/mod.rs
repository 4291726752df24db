/* src/controller/mod.rs */

//!
//! Durable settings store.
//!
//! - [`DurableStore`] - a [`Store`](crate::holder::Store) whose changes are saved to one file
//! - [`DurableStoreBuilder`] - explicit construction of the above

mod builder;
mod durable;
mod error;
mod maintenance;

pub use builder::DurableStoreBuilder;
pub use durable::DurableStore;
pub use error::PersistError;
