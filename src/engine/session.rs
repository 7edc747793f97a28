//! One visualization instance: live snapshot, playback and transcript.

use log::info;

use super::console::{ConsoleLevel, ConsoleLog};
use super::highlight::HighlightState;
use super::ids::{CounterIds, IdSource};
use super::mutator::Mutator;
use super::playback::{PlaybackController, SpeedProfile};
use super::step::{StepKind, Steps};
use super::ticker::Ticker;

/// Owns everything one visualization needs between user actions.
///
/// Operations run to completion and commit their snapshot immediately;
/// playback only replays the narration on top of the committed state.
pub struct Session<M: Mutator, T: Ticker> {
	mutator: M,
	snapshot: M::Snapshot,
	ids: Box<dyn IdSource>,
	playback: PlaybackController<T>,
	console: ConsoleLog,
	steps: Steps,
	revision: u64,
}

impl<M: Mutator, T: Ticker> Session<M, T> {
	/// Empty session with a fresh id counter.
	pub fn new(mutator: M, ticker: T, profile: SpeedProfile) -> Self {
		Self::with_ids(mutator, ticker, profile, CounterIds::new())
	}

	/// Like [`Session::new`] with an explicit identity source.
	pub fn with_ids(
		mutator: M,
		ticker: T,
		profile: SpeedProfile,
		ids: impl IdSource + 'static,
	) -> Self {
		Self {
			snapshot: mutator.empty(),
			mutator,
			ids: Box::new(ids),
			playback: PlaybackController::new(ticker, profile),
			console: ConsoleLog::new(),
			steps: Steps::none(),
			revision: 0,
		}
	}

	/// Run one operation, commit its snapshot and load its steps.
	pub fn run(&mut self, op: M::Op) -> StepKind {
		let mutation = self.mutator.apply(&self.snapshot, &op, self.ids.as_mut());
		self.snapshot = mutation.snapshot;
		self.playback.load(mutation.steps.clone());

		let (kind, summary) = match mutation.steps.last() {
			Some(step) => (step.kind, step.description.clone()),
			None => (StepKind::Info, String::from("no effect")),
		};
		self.console.push(level_for(kind), format!("{op}: {summary}"));
		self.steps = mutation.steps;
		self.revision += 1;
		kind
	}

	/// Run `op` if it parsed. A rejected input is handed back untouched and
	/// leaves the session exactly as it was.
	pub fn try_run<E>(&mut self, op: Result<M::Op, E>) -> Result<StepKind, E> {
		op.map(|op| self.run(op))
	}

	/// Drop all elements and playback state.
	pub fn clear(&mut self) {
		self.snapshot = self.mutator.empty();
		self.playback.reset();
		self.steps = Steps::none();
		self.console.push(ConsoleLevel::Info, "Structure cleared");
		self.revision += 1;
	}

	/// Replace the structure with the fixed sample dataset.
	pub fn populate_sample(&mut self) {
		self.clear();
		let ops = self.mutator.sample();
		info!("populating sample with {} operations", ops.len());
		for op in ops {
			self.run(op);
		}
		self.console
			.push(ConsoleLevel::Success, "Sample data loaded");
	}

	/// Swap the configuration. The old snapshot may not satisfy the new
	/// configuration's invariants, so the structure starts over empty.
	pub fn reconfigure(&mut self, mutator: M) {
		self.mutator = mutator;
		self.clear();
	}

	/// Empty the transcript. The structure is untouched.
	pub fn clear_console(&mut self) {
		self.console.clear();
		self.revision += 1;
	}

	/// Forward a timer tick to playback.
	pub fn tick(&mut self) {
		self.playback.tick();
		self.revision += 1;
	}

	/// Current configuration.
	pub fn mutator(&self) -> &M {
		&self.mutator
	}

	/// Committed structure state.
	pub fn snapshot(&self) -> &M::Snapshot {
		&self.snapshot
	}

	/// Steps of the most recent operation.
	pub fn steps(&self) -> &Steps {
		&self.steps
	}

	/// Overlay of the current step.
	pub fn highlight(&self) -> &HighlightState {
		self.playback.highlight()
	}

	/// The playback controller.
	pub fn playback(&self) -> &PlaybackController<T> {
		&self.playback
	}

	/// Mutable controller access; counts as a change.
	pub fn playback_mut(&mut self) -> &mut PlaybackController<T> {
		self.revision += 1;
		&mut self.playback
	}

	/// The transcript.
	pub fn console(&self) -> &ConsoleLog {
		&self.console
	}

	/// Counter bumped by every state change, for cheap change detection.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}

fn level_for(kind: StepKind) -> ConsoleLevel {
	match kind {
		k if k.is_negative() => ConsoleLevel::Warning,
		StepKind::Info => ConsoleLevel::Info,
		_ => ConsoleLevel::Success,
	}
}
