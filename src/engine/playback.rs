//! Playback controller: a cursor over an already computed step list.
//!
//! The controller never mutates a structure. It only decides which step is
//! current and what overlay that step projects to.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::highlight::{Projector, StepProjector};
use super::step::Steps;
use super::ticker::{Ticker, VirtualTicker};

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
	/// Nothing loaded.
	Idle,
	/// Steps loaded, timer stopped.
	Paused,
	/// Timer running.
	Playing,
}

/// Named playback speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Speed {
	/// Longest interval.
	Slow,
	/// The default.
	#[default]
	Normal,
	/// Shortest interval.
	Fast,
}

impl Speed {
	/// Slowest first.
	pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

	/// Name shown in the speed selector.
	pub fn label(self) -> &'static str {
		match self {
			Speed::Slow => "Slow",
			Speed::Normal => "Normal",
			Speed::Fast => "Fast",
		}
	}

	/// Inverse of [`Speed::label`], case-insensitive.
	pub fn from_label(label: &str) -> Option<Speed> {
		Speed::ALL
			.into_iter()
			.find(|s| s.label().eq_ignore_ascii_case(label))
	}
}

/// Tick interval per speed, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedProfile {
	/// Interval at [`Speed::Slow`].
	pub slow_ms: u64,
	/// Interval at [`Speed::Normal`].
	pub normal_ms: u64,
	/// Interval at [`Speed::Fast`].
	pub fast_ms: u64,
}

impl SpeedProfile {
	/// Profile from the three intervals.
	pub const fn new(slow_ms: u64, normal_ms: u64, fast_ms: u64) -> Self {
		Self {
			slow_ms,
			normal_ms,
			fast_ms,
		}
	}

	/// Tick interval for `speed`.
	pub fn interval(&self, speed: Speed) -> Duration {
		Duration::from_millis(match speed {
			Speed::Slow => self.slow_ms,
			Speed::Normal => self.normal_ms,
			Speed::Fast => self.fast_ms,
		})
	}
}

impl Default for SpeedProfile {
	fn default() -> Self {
		Self::new(1500, 1000, 500)
	}
}

/// Generic play/pause/step/seek state machine.
pub struct PlaybackController<T: Ticker, P: Projector = StepProjector> {
	projector: P,
	ticker: T,
	steps: Arc<[P::Step]>,
	cursor: Option<usize>,
	state: PlaybackState,
	highlight: P::Highlight,
	profile: SpeedProfile,
	speed: Speed,
}

impl<T: Ticker> PlaybackController<T, StepProjector> {
	/// Controller over [`Step`](super::step::Step)s, starting `Idle`.
	pub fn new(ticker: T, profile: SpeedProfile) -> Self {
		Self::with_projector(StepProjector, ticker, profile)
	}

	/// Replace the step list. Any state goes to `Paused` at cursor -1.
	pub fn load(&mut self, steps: Steps) {
		self.load_slice(steps.into_shared());
	}
}

impl<T: Ticker, P: Projector> PlaybackController<T, P> {
	/// Controller with a custom projection.
	pub fn with_projector(projector: P, ticker: T, profile: SpeedProfile) -> Self {
		Self {
			projector,
			ticker,
			steps: Arc::from(Vec::new()),
			cursor: None,
			state: PlaybackState::Idle,
			highlight: P::Highlight::default(),
			profile,
			speed: Speed::default(),
		}
	}

	/// Replace the step list with an arbitrary shared slice of steps.
	pub fn load_slice(&mut self, steps: Arc<[P::Step]>) {
		self.ticker.stop();
		self.steps = steps;
		self.cursor = None;
		self.highlight = P::Highlight::default();
		self.state = PlaybackState::Paused;
		debug!("playback loaded {} steps", self.steps.len());
	}

	/// Start auto-advance. Returns whether playback actually started.
	pub fn play(&mut self) -> bool {
		if self.state == PlaybackState::Playing || !self.can_step_forward() {
			return false;
		}
		self.ticker.start(self.profile.interval(self.speed));
		self.state = PlaybackState::Playing;
		debug!("playback started at {:?}", self.speed);
		true
	}

	/// Stop the timer, keeping cursor and overlay.
	pub fn pause(&mut self) {
		if self.state == PlaybackState::Playing {
			self.halt();
			debug!("playback paused at {}", self.cursor());
		}
	}

	/// One timer tick. Ignored unless playing.
	pub fn tick(&mut self) {
		if self.state != PlaybackState::Playing {
			return;
		}
		if self.can_step_forward() {
			self.move_to(Some(self.next_position()));
		}
		if !self.can_step_forward() {
			self.halt();
			debug!("playback reached the last step");
		}
	}

	/// Advance one step by hand. Pauses a running playback first.
	pub fn step_forward(&mut self) -> bool {
		if !self.can_step_forward() {
			return false;
		}
		self.pause();
		self.move_to(Some(self.next_position()));
		true
	}

	/// Go back one step by hand; at the first step this clears the overlay.
	pub fn step_backward(&mut self) -> bool {
		let Some(position) = self.cursor else {
			return false;
		};
		self.pause();
		self.move_to(position.checked_sub(1));
		true
	}

	/// Jump to `position` (`None` is "before the first step"). Out of range
	/// positions are ignored.
	pub fn seek(&mut self, position: Option<usize>) -> bool {
		if self.state == PlaybackState::Idle {
			return false;
		}
		if matches!(position, Some(p) if p >= self.steps.len()) {
			return false;
		}
		self.pause();
		self.move_to(position);
		true
	}

	/// Back to `Idle`: no steps, no cursor, no overlay, no timer.
	pub fn reset(&mut self) {
		self.ticker.stop();
		self.steps = Arc::from(Vec::new());
		self.cursor = None;
		self.highlight = P::Highlight::default();
		self.state = PlaybackState::Idle;
	}

	/// Change speed; a running timer restarts at the new interval.
	pub fn set_speed(&mut self, speed: Speed) {
		self.speed = speed;
		if self.state == PlaybackState::Playing {
			self.ticker.start(self.profile.interval(speed));
		}
	}

	/// Current speed.
	pub fn speed(&self) -> Speed {
		self.speed
	}

	/// Intervals per speed.
	pub fn profile(&self) -> SpeedProfile {
		self.profile
	}

	/// Current state.
	pub fn state(&self) -> PlaybackState {
		self.state
	}

	/// Cursor in the `[-1, len-1]` convention.
	pub fn cursor(&self) -> isize {
		self.cursor.map_or(-1, |c| c as isize)
	}

	/// Cursor as an index, `None` before the first step.
	pub fn position(&self) -> Option<usize> {
		self.cursor
	}

	/// Number of loaded steps.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Whether no steps are loaded.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Loaded steps.
	pub fn steps(&self) -> &[P::Step] {
		&self.steps
	}

	/// Step under the cursor.
	pub fn current(&self) -> Option<&P::Step> {
		self.cursor.and_then(|c| self.steps.get(c))
	}

	/// Overlay of the current step.
	pub fn highlight(&self) -> &P::Highlight {
		&self.highlight
	}

	/// Whether a later step exists.
	pub fn can_step_forward(&self) -> bool {
		self.next_position() < self.steps.len()
	}

	/// Whether the cursor is on a step.
	pub fn can_step_backward(&self) -> bool {
		self.cursor.is_some()
	}

	/// The timer.
	pub fn ticker(&self) -> &T {
		&self.ticker
	}

	/// The timer, mutably.
	pub fn ticker_mut(&mut self) -> &mut T {
		&mut self.ticker
	}

	fn next_position(&self) -> usize {
		self.cursor.map_or(0, |c| c + 1)
	}

	fn halt(&mut self) {
		self.ticker.stop();
		self.state = PlaybackState::Paused;
	}

	fn move_to(&mut self, position: Option<usize>) {
		self.cursor = position;
		let highlight = self
			.current()
			.map(|step| self.projector.project(step))
			.unwrap_or_default();
		self.highlight = highlight;
	}
}

impl<P: Projector> PlaybackController<VirtualTicker, P> {
	/// Let virtual time pass and run every tick that fell due.
	pub fn advance(&mut self, elapsed: Duration) {
		let due = self.ticker.elapse(elapsed);
		for _ in 0..due {
			if self.state != PlaybackState::Playing {
				break;
			}
			self.tick();
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::ids::ElementId;
	use crate::engine::step::{StepKind, StepRecorder};

	fn three_steps() -> Steps {
		let mut rec = StepRecorder::new();
		rec.focus(StepKind::Visit, ElementId::from_raw(1), "first");
		rec.note(StepKind::Info, "second");
		rec.focus(StepKind::Found, ElementId::from_raw(2), "third");
		rec.finish("unused")
	}

	fn controller() -> PlaybackController<VirtualTicker> {
		PlaybackController::new(VirtualTicker::new(), SpeedProfile::new(300, 200, 100))
	}

	#[test]
	fn starts_idle_and_load_pauses_before_first_step() {
		let mut pc = controller();
		assert_eq!(pc.state(), PlaybackState::Idle);
		assert_eq!(pc.cursor(), -1);

		pc.load(three_steps());
		assert_eq!(pc.state(), PlaybackState::Paused);
		assert_eq!(pc.cursor(), -1);
		assert!(pc.highlight().is_clear());
	}

	#[test]
	fn play_runs_to_the_end_then_pauses() {
		let mut pc = controller();
		pc.load(three_steps());
		assert!(pc.play());
		assert!(pc.ticker().is_active());
		assert_eq!(pc.ticker().interval(), Some(Duration::from_millis(200)));

		pc.advance(Duration::from_millis(200));
		assert_eq!(pc.cursor(), 0);
		assert_eq!(pc.highlight().focus, Some(ElementId::from_raw(1)));

		pc.advance(Duration::from_secs(10));
		assert_eq!(pc.cursor(), 2);
		assert_eq!(pc.state(), PlaybackState::Paused);
		assert!(!pc.ticker().is_active());
		assert!(!pc.play());
	}

	#[test]
	fn pause_keeps_cursor_and_overlay() {
		let mut pc = controller();
		pc.load(three_steps());
		pc.play();
		pc.advance(Duration::from_millis(200));
		let before = pc.highlight().clone();

		pc.pause();
		assert_eq!(pc.state(), PlaybackState::Paused);
		pc.advance(Duration::from_secs(1));
		assert_eq!(pc.cursor(), 0);
		assert_eq!(pc.highlight(), &before);
	}

	#[test]
	fn stepping_respects_bounds() {
		let mut pc = controller();
		pc.load(three_steps());
		assert!(!pc.step_backward());
		assert_eq!(pc.cursor(), -1);

		for _ in 0..3 {
			assert!(pc.step_forward());
		}
		assert_eq!(pc.cursor(), 2);
		assert!(!pc.step_forward());
		assert_eq!(pc.cursor(), 2);

		pc.step_backward();
		assert_eq!(pc.highlight().focus, None);
		assert_eq!(pc.highlight().description.as_deref(), Some("second"));
		pc.step_backward();
		pc.step_backward();
		assert_eq!(pc.cursor(), -1);
		assert!(pc.highlight().is_clear());
	}

	#[test]
	fn manual_step_pauses_playback() {
		let mut pc = controller();
		pc.load(three_steps());
		pc.play();
		pc.step_forward();
		assert_eq!(pc.state(), PlaybackState::Paused);
		assert!(!pc.ticker().is_active());
	}

	#[test]
	fn load_resets_cursor_from_any_state() {
		let mut pc = controller();
		pc.load(three_steps());
		pc.play();
		pc.advance(Duration::from_millis(400));
		assert_eq!(pc.cursor(), 1);

		pc.load(three_steps());
		assert_eq!(pc.cursor(), -1);
		assert_eq!(pc.state(), PlaybackState::Paused);
		assert!(!pc.ticker().is_active());
	}

	#[test]
	fn speed_change_restarts_running_timer() {
		let mut pc = controller();
		pc.load(three_steps());
		pc.play();
		pc.set_speed(Speed::Fast);
		assert_eq!(pc.ticker().interval(), Some(Duration::from_millis(100)));
		assert_eq!(pc.ticker().starts(), 2);

		pc.pause();
		pc.set_speed(Speed::Slow);
		assert!(!pc.ticker().is_active());
	}

	#[test]
	fn seek_and_reset() {
		let mut pc = controller();
		assert!(!pc.seek(Some(0)));

		pc.load(three_steps());
		assert!(pc.seek(Some(2)));
		assert_eq!(pc.highlight().focus, Some(ElementId::from_raw(2)));
		assert!(!pc.seek(Some(3)));
		assert!(pc.seek(None));
		assert!(pc.highlight().is_clear());

		pc.play();
		pc.reset();
		assert_eq!(pc.state(), PlaybackState::Idle);
		assert_eq!(pc.len(), 0);
		assert!(!pc.ticker().is_active());
	}

	#[test]
	fn speed_labels_round_trip() {
		assert_eq!(Speed::from_label("fast"), Some(Speed::Fast));
		assert_eq!(Speed::from_label("warp"), None);
	}
}
