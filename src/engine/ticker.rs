//! Recurring timers behind playback.

use std::time::Duration;

/// A recurring timer the playback controller can start and stop.
///
/// Implementations deliver ticks by calling back into whoever owns the
/// controller; the controller itself only decides when the timer runs.
pub trait Ticker {
	/// Start ticking every `interval`, replacing any running timer.
	fn start(&mut self, interval: Duration);
	/// Stop ticking. Idempotent.
	fn stop(&mut self);
	/// Whether a timer is running.
	fn is_active(&self) -> bool;
	/// Interval of the running timer.
	fn interval(&self) -> Option<Duration>;
}

/// Ticker driven by explicit virtual time instead of a wall clock.
#[derive(Clone, Debug, Default)]
pub struct VirtualTicker {
	interval: Option<Duration>,
	pending: Duration,
	starts: u32,
}

impl VirtualTicker {
	/// Stopped ticker at virtual time zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Let `elapsed` pass and return how many ticks fell due.
	pub fn elapse(&mut self, elapsed: Duration) -> u32 {
		let Some(interval) = self.interval else {
			return 0;
		};
		if interval.is_zero() {
			return 0;
		}
		self.pending += elapsed;
		let mut due = 0;
		while self.pending >= interval {
			self.pending -= interval;
			due += 1;
		}
		due
	}

	/// How many times the timer has been (re)started.
	pub fn starts(&self) -> u32 {
		self.starts
	}
}

impl Ticker for VirtualTicker {
	fn start(&mut self, interval: Duration) {
		self.stop();
		self.interval = Some(interval);
		self.starts += 1;
	}

	fn stop(&mut self) {
		self.interval = None;
		self.pending = Duration::ZERO;
	}

	fn is_active(&self) -> bool {
		self.interval.is_some()
	}

	fn interval(&self) -> Option<Duration> {
		self.interval
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ticks_accumulate_across_calls() {
		let mut ticker = VirtualTicker::new();
		assert_eq!(ticker.elapse(Duration::from_secs(5)), 0);

		ticker.start(Duration::from_millis(300));
		assert_eq!(ticker.elapse(Duration::from_millis(200)), 0);
		assert_eq!(ticker.elapse(Duration::from_millis(500)), 2);
		assert_eq!(ticker.elapse(Duration::from_millis(200)), 1);

		ticker.stop();
		assert!(!ticker.is_active());
		assert_eq!(ticker.elapse(Duration::from_secs(1)), 0);
	}

	#[test]
	fn restart_discards_partial_interval() {
		let mut ticker = VirtualTicker::new();
		ticker.start(Duration::from_millis(100));
		ticker.elapse(Duration::from_millis(90));
		ticker.start(Duration::from_millis(100));
		assert_eq!(ticker.elapse(Duration::from_millis(20)), 0);
		assert_eq!(ticker.starts(), 2);
	}
}
