/* src/holder/event.rs */

/// Events emitted by a [`Store`](super::Store) when its contents change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
	/// A key was added or its value changed.
	Changed { key: String },
	/// A key was removed.
	Removed { key: String },
}

impl StoreEvent {
	/// The key this event is about.
	pub fn key(&self) -> &str {
		match self {
			StoreEvent::Changed { key } | StoreEvent::Removed { key } => key,
		}
	}
}
