//! Element identities.

use std::fmt;

/// Stable identity of one element inside a structure snapshot.
///
/// Identity is independent of the element's value: two hash-set entries or
/// graph nodes may share a value but never an id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
	/// Wrap a raw id. Mostly useful in tests that predict counter output.
	pub const fn from_raw(raw: u64) -> Self {
		Self(raw)
	}

	/// The raw counter value.
	pub const fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "e{}", self.0)
	}
}

/// Source of fresh element identities.
pub trait IdSource {
	/// Hand out an id never returned before by this source.
	fn next_id(&mut self) -> ElementId;
}

/// Monotonic counter. The first id is `e1`.
#[derive(Clone, Debug, Default)]
pub struct CounterIds {
	issued: u64,
}

impl CounterIds {
	/// Counter that starts at `e1`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Continue counting after `last`, e.g. when resuming from a known state.
	pub fn starting_after(last: ElementId) -> Self {
		Self { issued: last.0 }
	}
}

impl IdSource for CounterIds {
	fn next_id(&mut self) -> ElementId {
		self.issued += 1;
		ElementId(self.issued)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counter_is_monotonic_from_one() {
		let mut ids = CounterIds::new();
		assert_eq!(ids.next_id(), ElementId::from_raw(1));
		assert_eq!(ids.next_id(), ElementId::from_raw(2));

		let mut resumed = CounterIds::starting_after(ElementId::from_raw(41));
		assert_eq!(resumed.next_id().to_string(), "e42");
	}
}
