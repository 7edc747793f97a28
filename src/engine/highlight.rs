//! Projection of steps onto a drawable highlight.

use super::ids::ElementId;
use super::step::{AuxView, Step, StepKind};

/// Overlay drawn on top of the committed snapshot for the current step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	/// Kind of the projected step.
	pub kind: Option<StepKind>,
	/// Narration of the projected step.
	pub description: Option<String>,
	/// Element drawn as the current focus.
	pub focus: Option<ElementId>,
	/// Two elements being compared or joined.
	pub pair: Option<(ElementId, ElementId)>,
	/// Elements already visited, in visiting order.
	pub visited: Vec<ElementId>,
	/// Side panel contents.
	pub aux: Option<AuxView>,
}

impl HighlightState {
	/// Whether `id` is the focus.
	pub fn is_focus(&self, id: ElementId) -> bool {
		self.focus == Some(id)
	}

	/// Whether `id` is either end of the pair.
	pub fn is_paired(&self, id: ElementId) -> bool {
		self.pair.is_some_and(|(a, b)| a == id || b == id)
	}

	/// Whether `id` has been visited.
	pub fn is_visited(&self, id: ElementId) -> bool {
		self.visited.contains(&id)
	}

	/// Member of the edge set carried by the current step.
	pub fn is_selected_edge(&self, id: ElementId) -> bool {
		matches!(&self.aux, Some(AuxView::EdgeSet(edges)) if edges.contains(&id))
	}

	/// Nothing highlighted.
	pub fn is_clear(&self) -> bool {
		*self == Self::default()
	}
}

/// Maps one step to the highlight it produces.
///
/// The projection replaces the previous highlight wholesale; it never sees
/// the previous value.
pub trait Projector {
	/// Step record consumed.
	type Step;
	/// Highlight produced; `Default` means nothing highlighted.
	type Highlight: Default;

	/// Highlight for `step` alone.
	fn project(&self, step: &Self::Step) -> Self::Highlight;
}

/// Projection for [`Step`]: copies exactly the fields the step carries and
/// leaves the rest cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepProjector;

impl Projector for StepProjector {
	type Step = Step;
	type Highlight = HighlightState;

	fn project(&self, step: &Step) -> HighlightState {
		HighlightState {
			kind: Some(step.kind),
			description: Some(step.description.clone()),
			focus: step.focus,
			pair: step.pair,
			visited: step.visited.clone(),
			aux: step.aux.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_fields_are_cleared() {
		let a = ElementId::from_raw(1);
		let first = StepProjector.project(
			&Step::new(StepKind::Visit, "visit")
				.with_focus(a)
				.with_aux(AuxView::Queue(vec!["A".into()])),
		);
		assert!(first.is_focus(a));

		let second = StepProjector.project(&Step::new(StepKind::Done, "done"));
		assert_eq!(second.focus, None);
		assert_eq!(second.aux, None);
		assert_eq!(second.description.as_deref(), Some("done"));
	}
}
