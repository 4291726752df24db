/* src/signal/worker.rs */

use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::MutexGuard;

use super::Config;
use super::debounce::{Persistable, TimerShared};

pub(crate) fn run(shared: Arc<TimerShared>, target: Weak<dyn Persistable>, config: Config, generation: u64) {
	let mut state = shared.state.lock();

	while state.running && state.generation == generation {
		let Some(armed_at) = state.armed_at else {
			shared.wake.wait_for(&mut state, config.poll);
			continue;
		};

		let due = armed_at + config.interval;
		let now = Instant::now();
		if now < due {
			shared.wake.wait_for(&mut state, (due - now).min(config.poll));
			continue;
		}

		// Disarm before flushing: a change landing mid-flush re-arms and is not lost.
		state.armed_at = None;
		let flushed = MutexGuard::unlocked(&mut state, || target.upgrade().map(|target| target.flush()));
		match flushed {
			None => break,
			Some(true) => {}
			// Keep the change pending; a newer arm already covers it.
			Some(false) => {
				state.armed_at.get_or_insert_with(Instant::now);
			}
		}
	}

	if state.generation == generation {
		state.running = false;
	}
}
