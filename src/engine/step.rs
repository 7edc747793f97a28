//! Step records and the recorder that builds one operation's narration.

use std::ops::Deref;
use std::sync::Arc;

use super::ids::ElementId;

/// What a step narrates. Drives colouring and console severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
	/// Neutral narration.
	Info,
	/// Two values compared.
	Compare,
	/// An element reached by a walk.
	Visit,
	/// An element added.
	Insert,
	/// An element removed.
	Remove,
	/// Two elements exchanged.
	Swap,
	/// A pointer or edge rewired.
	Link,
	/// The searched element exists.
	Found,
	/// The searched element is absent.
	NotFound,
	/// Rejected because the element already exists.
	Duplicate,
	/// Nothing to operate on.
	Empty,
	/// A bucket already held entries.
	Collision,
	/// A hash was computed.
	Hash,
	/// Pushed onto a stack.
	Push,
	/// Popped off a stack.
	Pop,
	/// Added at the rear of a queue.
	Enqueue,
	/// Taken from the front of a queue.
	Dequeue,
	/// A shorter distance was found.
	Relax,
	/// An edge joined the spanning tree.
	SelectEdge,
	/// Two components merged.
	Merge,
	/// Rejected because the structure is full.
	Overflow,
	/// Final summary.
	Done,
}

impl StepKind {
	/// Outcomes where the operation ended without the requested effect.
	pub fn is_negative(self) -> bool {
		matches!(
			self,
			StepKind::NotFound | StepKind::Duplicate | StepKind::Empty | StepKind::Overflow
		)
	}
}

/// Transient state shown next to the structure while a step is current.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuxView {
	/// Stack contents, bottom first.
	Stack(Vec<String>),
	/// Queue contents, front first.
	Queue(Vec<String>),
	/// Distance table in node order; `None` is unreachable so far.
	Distances(Vec<(String, Option<u64>)>),
	/// Edges picked so far by a spanning-tree algorithm.
	EdgeSet(Vec<ElementId>),
	/// Dense all-pairs distance matrix.
	Matrix {
		/// Row and column labels.
		labels: Vec<String>,
		/// `cells[i][j]` is the best known distance from `i` to `j`.
		cells: Vec<Vec<Option<u64>>>,
	},
	/// Connected components by member labels.
	Components(Vec<Vec<String>>),
}

/// One narrated sub-decision of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
	/// What happened.
	pub kind: StepKind,
	/// Narration shown while the step is current.
	pub description: String,
	/// Element under attention.
	pub focus: Option<ElementId>,
	/// Elements compared, swapped or joined.
	pub pair: Option<(ElementId, ElementId)>,
	/// Visit order so far.
	pub visited: Vec<ElementId>,
	/// Side panel contents.
	pub aux: Option<AuxView>,
}

impl Step {
	/// Step with no element references.
	pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
		Self {
			kind,
			description: description.into(),
			focus: None,
			pair: None,
			visited: Vec::new(),
			aux: None,
		}
	}

	/// Set the focus.
	pub fn with_focus(mut self, id: ElementId) -> Self {
		self.focus = Some(id);
		self
	}

	/// Set the pair.
	pub fn with_pair(mut self, a: ElementId, b: ElementId) -> Self {
		self.pair = Some((a, b));
		self
	}

	/// Set the visit order.
	pub fn with_visited(mut self, visited: &[ElementId]) -> Self {
		self.visited = visited.to_vec();
		self
	}

	/// Attach a side panel.
	pub fn with_aux(mut self, aux: AuxView) -> Self {
		self.aux = Some(aux);
		self
	}

	/// Every element id this step points at.
	pub fn referenced_ids(&self) -> Vec<ElementId> {
		let mut ids: Vec<ElementId> = self.focus.into_iter().collect();
		if let Some((a, b)) = self.pair {
			ids.extend([a, b]);
		}
		ids.extend(self.visited.iter().copied());
		if let Some(AuxView::EdgeSet(edges)) = &self.aux {
			ids.extend(edges.iter().copied());
		}
		ids
	}
}

/// Append-only builder for one operation's steps.
#[derive(Debug, Default)]
pub struct StepRecorder {
	steps: Vec<Step>,
}

impl StepRecorder {
	/// Empty recorder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `step`.
	pub fn push(&mut self, step: Step) {
		self.steps.push(step);
	}

	/// Record a step with no element references.
	pub fn note(&mut self, kind: StepKind, description: impl Into<String>) {
		self.push(Step::new(kind, description));
	}

	/// Record a step highlighting a single element.
	pub fn focus(&mut self, kind: StepKind, id: ElementId, description: impl Into<String>) {
		self.push(Step::new(kind, description).with_focus(id));
	}

	/// Record a comparison or swap between two elements.
	pub fn pair(
		&mut self,
		kind: StepKind,
		a: ElementId,
		b: ElementId,
		description: impl Into<String>,
	) {
		self.push(Step::new(kind, description).with_pair(a, b));
	}

	/// Steps recorded so far.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Whether nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Seal the list. `fallback` is recorded if nothing else was, so every
	/// operation narrates at least one step.
	pub fn finish(mut self, fallback: impl Into<String>) -> Steps {
		if self.steps.is_empty() {
			self.steps.push(Step::new(StepKind::Info, fallback));
		}
		Steps(self.steps.into())
	}
}

/// Immutable, cheaply cloned step list produced by one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Steps(Arc<[Step]>);

impl Steps {
	/// The empty list, only used before any operation has run.
	pub fn none() -> Self {
		Steps(Arc::from(Vec::new()))
	}

	/// Final step, whose kind summarises the operation.
	pub fn last(&self) -> Option<&Step> {
		self.0.last()
	}

	/// The underlying shared slice.
	pub fn into_shared(self) -> Arc<[Step]> {
		self.0
	}
}

impl Default for Steps {
	fn default() -> Self {
		Self::none()
	}
}

impl Deref for Steps {
	type Target = [Step];

	fn deref(&self) -> &[Step] {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn finish_guarantees_one_step() {
		let steps = StepRecorder::new().finish("nothing to do");
		assert_eq!(steps.len(), 1);
		assert_eq!(steps[0].kind, StepKind::Info);
		assert_eq!(steps[0].description, "nothing to do");
	}

	#[test]
	fn recorder_keeps_execution_order() {
		let (a, b) = (ElementId::from_raw(1), ElementId::from_raw(2));
		let mut rec = StepRecorder::new();
		rec.focus(StepKind::Visit, a, "visit a");
		rec.pair(StepKind::Compare, a, b, "compare a b");
		let steps = rec.finish("unused");

		assert_eq!(steps.len(), 2);
		assert_eq!(steps[0].focus, Some(a));
		assert_eq!(steps[1].pair, Some((a, b)));
		assert_eq!(steps[1].referenced_ids(), vec![a, b]);
	}
}
