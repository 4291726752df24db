/* src/signal/notifier.rs */

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;

/// Handle identifying one connection on a [`Notifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<A> = Arc<dyn Fn(&A) + Send + Sync>;
// Returns false once the weakly held receiver is gone.
type WeakCallback<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

enum SlotKind<A> {
	Function(Callback<A>),
	Method(WeakCallback<A>),
	Forward(Weak<Inner<A>>),
}

impl<A> Clone for SlotKind<A> {
	fn clone(&self) -> Self {
		match self {
			SlotKind::Function(f) => SlotKind::Function(Arc::clone(f)),
			SlotKind::Method(f) => SlotKind::Method(Arc::clone(f)),
			SlotKind::Forward(target) => SlotKind::Forward(Weak::clone(target)),
		}
	}
}

struct Slot<A> {
	id: SubscriptionId,
	kind: SlotKind<A>,
}

impl<A> Clone for Slot<A> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			kind: self.kind.clone(),
		}
	}
}

struct Inner<A> {
	slots: ArcSwap<Vec<Slot<A>>>,
	next_id: AtomicU64,
}

impl<A> Inner<A> {
	fn emit(&self, args: &A) {
		// Handlers run against a snapshot, so they may connect or disconnect freely.
		let slots = self.slots.load_full();
		let mut dead = Vec::new();

		for slot in slots.iter() {
			let alive = match &slot.kind {
				SlotKind::Function(f) => {
					f(args);
					true
				}
				SlotKind::Method(f) => f(args),
				SlotKind::Forward(target) => match target.upgrade() {
					Some(target) => {
						target.emit(args);
						true
					}
					None => false,
				},
			};
			if !alive {
				dead.push(slot.id);
			}
		}

		if !dead.is_empty() {
			self.retain(|slot| !dead.contains(&slot.id));
		}
	}

	fn retain(&self, keep: impl Fn(&Slot<A>) -> bool) {
		self.slots
			.rcu(|slots| slots.iter().filter(|slot| keep(*slot)).cloned().collect::<Vec<_>>());
	}
}

/// Minimal publish/subscribe primitive.
///
/// Plain callbacks are held strongly. Receivers connected with
/// [`connect_weak`](Notifier::connect_weak) and forwarded notifiers are held
/// weakly: once they are dropped the connection disappears on the next emit.
///
/// Cloning a `Notifier` yields another handle to the same subscriber table.
pub struct Notifier<A> {
	inner: Arc<Inner<A>>,
}

impl<A: 'static> Notifier<A> {
	pub fn new() -> Self {
		Self {
			inner: Arc::new(Inner {
				slots: ArcSwap::from_pointee(Vec::new()),
				next_id: AtomicU64::new(0),
			}),
		}
	}

	/// Connects a callback, held strongly until disconnected.
	pub fn connect<F>(&self, callback: F) -> SubscriptionId
	where
		F: Fn(&A) + Send + Sync + 'static,
	{
		self.insert(SlotKind::Function(Arc::new(callback)))
	}

	/// Connects `callback` as a method of `receiver`, which is held weakly.
	pub fn connect_weak<T, F>(&self, receiver: &Arc<T>, callback: F) -> SubscriptionId
	where
		T: Send + Sync + 'static,
		F: Fn(&T, &A) + Send + Sync + 'static,
	{
		let receiver = Arc::downgrade(receiver);
		self.insert(SlotKind::Method(Arc::new(move |args: &A| match receiver.upgrade() {
			Some(receiver) => {
				callback(&receiver, args);
				true
			}
			None => false,
		})))
	}

	/// Forwards every emit to `other`, held weakly.
	///
	/// Returns `None` when asked to connect a notifier to itself.
	pub fn connect_notifier(&self, other: &Notifier<A>) -> Option<SubscriptionId> {
		if Arc::ptr_eq(&self.inner, &other.inner) {
			return None;
		}
		Some(self.insert(SlotKind::Forward(Arc::downgrade(&other.inner))))
	}

	/// Connects a callback for as long as the returned guard lives.
	#[must_use = "the subscription ends when the guard is dropped"]
	pub fn connect_scoped<F>(&self, callback: F) -> Subscription<A>
	where
		F: Fn(&A) + Send + Sync + 'static,
	{
		let id = self.connect(callback);
		self.scope(id)
	}

	/// Ties an existing connection to the lifetime of a guard.
	#[must_use = "the subscription ends when the guard is dropped"]
	pub fn scope(&self, id: SubscriptionId) -> Subscription<A> {
		Subscription {
			id,
			notifier: Arc::downgrade(&self.inner),
		}
	}

	/// Invokes every live connection once.
	pub fn emit(&self, args: &A) {
		self.inner.emit(args);
	}

	/// Removes a connection. Returns false if it was already gone.
	pub fn disconnect(&self, id: SubscriptionId) -> bool {
		let present = self.inner.slots.load().iter().any(|slot| slot.id == id);
		if present {
			self.inner.retain(|slot| slot.id != id);
		}
		present
	}

	/// Stops forwarding to `other`. Returns false if it was not connected.
	pub fn disconnect_notifier(&self, other: &Notifier<A>) -> bool {
		let target = Arc::downgrade(&other.inner);
		let forwards_to = |slot: &Slot<A>| matches!(&slot.kind, SlotKind::Forward(t) if Weak::ptr_eq(t, &target));
		let present = self.inner.slots.load().iter().any(forwards_to);
		if present {
			self.inner.retain(|slot| !forwards_to(slot));
		}
		present
	}

	/// Removes every connection.
	pub fn disconnect_all(&self) {
		self.inner.slots.store(Arc::new(Vec::new()));
	}

	/// Number of connections, including weak ones not yet pruned.
	pub fn subscriber_count(&self) -> usize {
		self.inner.slots.load().len()
	}

	fn insert(&self, kind: SlotKind<A>) -> SubscriptionId {
		let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
		let slot = Slot { id, kind };
		self.inner.slots.rcu(|slots| {
			let mut next = Vec::with_capacity(slots.len() + 1);
			next.extend(slots.iter().cloned());
			next.push(slot.clone());
			next
		});
		id
	}
}

impl<A: 'static> Default for Notifier<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A> Clone for Notifier<A> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<A> fmt::Debug for Notifier<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Notifier")
			.field("subscribers", &self.inner.slots.load().len())
			.finish()
	}
}

/// A connection that is removed when this guard is dropped.
///
/// The guard does not keep the notifier alive.
pub struct Subscription<A> {
	id: SubscriptionId,
	notifier: Weak<Inner<A>>,
}

impl<A> Subscription<A> {
	pub fn id(&self) -> SubscriptionId {
		self.id
	}
}

impl<A> Drop for Subscription<A> {
	fn drop(&mut self) {
		if let Some(inner) = self.notifier.upgrade() {
			inner.retain(|slot| slot.id != self.id);
		}
	}
}
