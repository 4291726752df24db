/* src/signal/debounce.rs */

use std::io;
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use super::worker;
use super::{Config, Notifier, Subscription};

/// An owner whose state the [`Debouncer`] periodically flushes.
pub trait Persistable: Send + Sync {
	/// Writes the current state out. Returns false if that failed.
	///
	/// Failures are the implementor's to report. A failed flush stays pending
	/// and is retried.
	fn flush(&self) -> bool;

	/// Short identifier, used to name the worker thread.
	fn identify(&self) -> String;
}

pub(crate) struct TimerState {
	/// Set while a flush is due at `armed_at + interval`.
	pub(crate) armed_at: Option<Instant>,
	pub(crate) running: bool,
	/// Bumped on every start so a stale worker never outlives its successor's start.
	pub(crate) generation: u64,
}

pub(crate) struct TimerShared {
	pub(crate) state: Mutex<TimerState>,
	pub(crate) wake: Condvar,
}

impl TimerShared {
	fn arm(&self) {
		let mut state = self.state.lock();
		state.armed_at = Some(Instant::now());
		self.wake.notify_all();
	}
}

/// Rate-limits a flush to at most once per interval after the last change.
///
/// Each [`arm`](Debouncer::arm) moves the due time to `now + interval`. A
/// background thread calls [`Persistable::flush`] once the due time passes and
/// then disarms. A failed flush re-arms, so the change is retried one interval
/// later and by [`finish`](Debouncer::finish). [`stop`](Debouncer::stop) blocks until that thread has exited,
/// so no flush can happen after it returns.
pub struct Debouncer {
	shared: Arc<TimerShared>,
	config: Config,
	worker: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
	pub fn new(config: Config) -> Self {
		Self {
			shared: Arc::new(TimerShared {
				state: Mutex::new(TimerState {
					armed_at: None,
					running: false,
					generation: 0,
				}),
				wake: Condvar::new(),
			}),
			config,
			worker: Mutex::new(None),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Schedules a flush `interval` from now, replacing any earlier due time.
	pub fn arm(&self) {
		self.shared.arm();
	}

	/// Cancels the pending flush. Returns true if one was pending.
	pub fn disarm(&self) -> bool {
		self.shared.state.lock().armed_at.take().is_some()
	}

	/// When the pending flush was last armed, if one is pending.
	pub fn armed_at(&self) -> Option<Instant> {
		self.shared.state.lock().armed_at
	}

	pub fn is_armed(&self) -> bool {
		self.armed_at().is_some()
	}

	pub fn is_running(&self) -> bool {
		self.shared.state.lock().running
	}

	/// Arms this debouncer on every emit of `notifier`.
	///
	/// The connection holds the debouncer weakly and ends when the guard drops.
	#[must_use = "the debouncer stops listening when the guard is dropped"]
	pub fn watch<A: 'static>(&self, notifier: &Notifier<A>) -> Subscription<A> {
		let id = notifier.connect_weak(&self.shared, |shared, _| shared.arm());
		notifier.scope(id)
	}

	/// Disarms and starts a fresh worker flushing `target`.
	///
	/// May be called again after [`stop`](Debouncer::stop). Does nothing while a
	/// worker is already running. The worker holds `target` weakly and exits
	/// once it is dropped.
	pub fn start<P>(&self, target: &Arc<P>) -> io::Result<()>
	where
		P: Persistable + 'static,
	{
		let mut worker = self.worker.lock();
		let generation = {
			let mut state = self.shared.state.lock();
			if state.running {
				return Ok(());
			}
			state.running = true;
			state.armed_at = None;
			state.generation += 1;
			state.generation
		};

		let name = target.identify();
		let weak: Weak<dyn Persistable> = Arc::downgrade(target) as Weak<dyn Persistable>;
		let shared = Arc::clone(&self.shared);
		let config = self.config;

		log::info!("Setting up thread: {}", name);
		let spawned = thread::Builder::new()
			.name(name)
			.spawn(move || worker::run(shared, weak, config, generation));

		match spawned {
			Ok(handle) => {
				*worker = Some(handle);
				Ok(())
			}
			Err(e) => {
				self.shared.state.lock().running = false;
				Err(e)
			}
		}
	}

	/// Stops the worker and waits for it to exit.
	///
	/// After this returns no further flush happens until the next
	/// [`start`](Debouncer::start). An in-flight flush is allowed to finish.
	pub fn stop(&self) {
		let mut worker = self.worker.lock();
		{
			let mut state = self.shared.state.lock();
			state.running = false;
			self.shared.wake.notify_all();
		}

		let Some(handle) = worker.take() else {
			return;
		};
		// A flush that stops its own worker cannot wait for itself.
		if handle.thread().id() == thread::current().id() {
			return;
		}
		if handle.join().is_err() {
			log::error!("Debounce worker panicked before stopping");
		}
	}

	/// Stops the worker, then flushes `target` once if a change is still pending.
	///
	/// A change whose earlier flush failed is still pending. If this flush fails
	/// too the change stays pending; otherwise a second call does nothing.
	pub fn finish(&self, target: &dyn Persistable) {
		self.stop();
		if self.disarm() && !target.flush() {
			self.arm();
		}
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		self.stop();
	}
}
