/* src/signal/mod.rs */

//!
//! Change notification and save scheduling.
//!
//! - [`Notifier`] - weakly-held publish/subscribe
//! - [`Debouncer`] - background loop that rate-limits a [`Persistable`] flush

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod debounce;
mod notifier;
mod worker;

pub use debounce::{Debouncer, Persistable};
pub use notifier::{Notifier, Subscription, SubscriptionId};

/// Configuration for the debounce behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Minimum quiet time between the last change and the flush.
	pub interval: Duration,

	/// Upper bound on how long the worker sleeps before re-checking.
	pub poll: Duration,
}

impl Config {
	/// Default poll tick with the given save interval.
	pub fn with_interval(interval: Duration) -> Self {
		Self {
			interval,
			..Self::default()
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			interval: Duration::from_secs(5),
			poll: Duration::from_secs(1),
		}
	}
}
