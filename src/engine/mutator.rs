//! The seam between the engine and each data structure.

use std::fmt::Display;

use super::ids::{ElementId, IdSource};
use super::step::Steps;

/// Result of one mutator call: the snapshot to commit and its narration.
#[derive(Clone, Debug)]
pub struct Mutation<S> {
	/// Snapshot to commit.
	pub snapshot: S,
	/// Narration of how it was reached.
	pub steps: Steps,
}

impl<S> Mutation<S> {
	/// Pair a snapshot with its steps.
	pub fn new(snapshot: S, steps: Steps) -> Self {
		Self { snapshot, steps }
	}
}

/// Snapshot storage addressed by element id.
pub trait Arena {
	/// Whether `id` names a live element of this snapshot.
	fn resolves(&self, id: ElementId) -> bool;
}

/// Pure operation -> (snapshot, steps) transformation for one structure kind.
///
/// `self` carries the structure's configuration (heap polarity, bucket
/// count, directedness...). Implementations must be deterministic for a
/// given snapshot, operation and id sequence, and must return at least one
/// step. No-op operations return a clone of the input snapshot.
pub trait Mutator {
	/// Owned structure state.
	type Snapshot: Clone + Default + Arena;
	/// One user operation, printable for the transcript.
	type Op: Clone + Display;

	/// Run `op` against `snapshot` without touching it.
	fn apply(
		&self,
		snapshot: &Self::Snapshot,
		op: &Self::Op,
		ids: &mut dyn IdSource,
	) -> Mutation<Self::Snapshot>;

	/// The empty structure for this configuration.
	fn empty(&self) -> Self::Snapshot {
		Self::Snapshot::default()
	}

	/// Fixed operations that populate the sample dataset.
	fn sample(&self) -> Vec<Self::Op>;
}
