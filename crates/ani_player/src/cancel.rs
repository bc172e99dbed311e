//! Cooperative cancellation for decode sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Instant;

/// Cancellation token checked at block and frame granularity.
///
/// `stop()` latches the flag and wakes any pacing wait immediately, so the
/// worst-case cancellation latency is one block's decode cost, never a full
/// frame interval spent sleeping.
pub struct CancelToken {
	flag: AtomicBool,
	lock: Mutex<()>,
	wake: Condvar,
}

impl CancelToken {
	/// Creates a fresh, uncancelled token.
	pub fn new() -> Self {
		Self {
			flag: AtomicBool::new(false),
			lock: Mutex::new(()),
			wake: Condvar::new(),
		}
	}

	/// Latches cancellation and wakes every pending wait.
	pub fn cancel(&self) {
		self.flag.store(true, Ordering::SeqCst);
		let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
		self.wake.notify_all();
	}

	/// Returns whether cancellation has been requested.
	pub fn is_cancelled(&self) -> bool {
		self.flag.load(Ordering::SeqCst)
	}

	/// Sleeps until `deadline` or cancellation, whichever comes first.
	///
	/// Returns `true` if the token was cancelled.
	pub fn wait_until(&self, deadline: Instant) -> bool {
		let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
		loop {
			if self.is_cancelled() {
				return true;
			}
			let now = Instant::now();
			if now >= deadline {
				return false;
			}
			let (next, _timeout) = self
				.wake
				.wait_timeout(guard, deadline - now)
				.unwrap_or_else(PoisonError::into_inner);
			guard = next;
		}
	}
}

impl Default for CancelToken {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::time::Duration;

	#[test]
	fn test_wait_runs_to_deadline_when_not_cancelled() {
		let token = CancelToken::new();
		let start = Instant::now();
		let cancelled = token.wait_until(start + Duration::from_millis(30));
		assert!(!cancelled);
		assert!(start.elapsed() >= Duration::from_millis(30));
	}

	#[test]
	fn test_cancel_wakes_waiter_early() {
		let token = Arc::new(CancelToken::new());
		let waiter = Arc::clone(&token);

		let handle = std::thread::spawn(move || {
			let start = Instant::now();
			let cancelled = waiter.wait_until(start + Duration::from_secs(10));
			(cancelled, start.elapsed())
		});

		std::thread::sleep(Duration::from_millis(20));
		token.cancel();

		let (cancelled, elapsed) = handle.join().unwrap();
		assert!(cancelled);
		assert!(elapsed < Duration::from_secs(1));
	}

	#[test]
	fn test_cancelled_token_returns_immediately() {
		let token = CancelToken::new();
		token.cancel();
		let start = Instant::now();
		assert!(token.wait_until(start + Duration::from_secs(10)));
		assert!(start.elapsed() < Duration::from_secs(1));
	}
}
