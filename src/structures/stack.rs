//! Bounded LIFO stack.

use std::fmt;

use crate::engine::{Arena, AuxView, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

/// One occupied slot of a stack or queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
	/// Identity.
	pub id: ElementId,
	/// Payload.
	pub value: i64,
}

pub(crate) fn contents(slots: &[Slot]) -> Vec<String> {
	slots.iter().map(|s| s.value.to_string()).collect()
}

/// Items bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
	slots: Vec<Slot>,
}

impl Stack {
	/// Items bottom first.
	pub fn slots(&self) -> &[Slot] {
		&self.slots
	}

	/// Next item to leave.
	pub fn top(&self) -> Option<Slot> {
		self.slots.last().copied()
	}

	/// Number of items.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl Arena for Stack {
	fn resolves(&self, id: ElementId) -> bool {
		self.slots.iter().any(|s| s.id == id)
	}
}

/// Stack operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackOp {
	/// Add on top.
	Push(i64),
	/// Remove the top.
	Pop,
	/// Show the top.
	Peek,
}

impl fmt::Display for StackOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StackOp::Push(v) => write!(f, "Push {v}"),
			StackOp::Pop => f.write_str("Pop"),
			StackOp::Peek => f.write_str("Peek"),
		}
	}
}

/// Mutator for [`Stack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackConfig {
	/// Maximum number of items.
	pub capacity: usize,
}

impl Default for StackConfig {
	fn default() -> Self {
		Self { capacity: 8 }
	}
}

impl Mutator for StackConfig {
	type Snapshot = Stack;
	type Op = StackOp;

	fn apply(&self, stack: &Stack, op: &StackOp, ids: &mut dyn IdSource) -> Mutation<Stack> {
		let mut rec = StepRecorder::new();
		let aux = |s: &Stack| AuxView::Stack(contents(&s.slots));
		let next = match *op {
			StackOp::Push(_) if stack.len() >= self.capacity => {
				rec.push(
					Step::new(
						StepKind::Overflow,
						format!("Stack overflow: capacity {} reached", self.capacity),
					)
					.with_aux(aux(stack)),
				);
				None
			}
			StackOp::Push(value) => {
				let mut next = stack.clone();
				let slot = Slot {
					id: ids.next_id(),
					value,
				};
				next.slots.push(slot);
				rec.push(
					Step::new(StepKind::Push, format!("Push {value} onto the top"))
						.with_focus(slot.id)
						.with_aux(aux(&next)),
				);
				Some(next)
			}
			StackOp::Pop | StackOp::Peek if stack.is_empty() => {
				rec.note(StepKind::Empty, "Stack is empty (underflow)");
				None
			}
			StackOp::Pop => {
				let mut next = stack.clone();
				next.slots.pop().map(|top| {
					rec.push(
						Step::new(StepKind::Pop, format!("Top is {}", top.value))
							.with_focus(top.id)
							.with_aux(aux(stack)),
					);
					rec.push(
						Step::new(StepKind::Remove, format!("Popped {}", top.value))
							.with_aux(aux(&next)),
					);
					next
				})
			}
			StackOp::Peek => {
				if let Some(top) = stack.top() {
					rec.push(
						Step::new(StepKind::Found, format!("Top is {}", top.value))
							.with_focus(top.id)
							.with_aux(aux(stack)),
					);
				}
				None
			}
		};
		Mutation::new(next.unwrap_or_else(|| stack.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<StackOp> {
		[5, 12, 7].into_iter().map(StackOp::Push).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::CounterIds;

	#[test]
	fn lifo_order() {
		let mut ids = CounterIds::new();
		let cfg = StackConfig::default();
		let mut stack = Stack::default();
		for op in cfg.sample() {
			stack = cfg.apply(&stack, &op, &mut ids).snapshot;
		}
		let out = cfg.apply(&stack, &StackOp::Pop, &mut ids);
		assert_eq!(out.steps[0].description, "Top is 7");
		assert_eq!(out.snapshot.top().map(|s| s.value), Some(12));
		assert_eq!(
			out.steps.last().unwrap().aux,
			Some(AuxView::Stack(vec!["5".into(), "12".into()]))
		);
	}

	#[test]
	fn overflow_and_underflow() {
		let mut ids = CounterIds::new();
		let cfg = StackConfig { capacity: 1 };
		let empty = Stack::default();
		let out = cfg.apply(&empty, &StackOp::Peek, &mut ids);
		assert_eq!(out.steps.last().unwrap().kind, StepKind::Empty);

		let one = cfg.apply(&empty, &StackOp::Push(1), &mut ids).snapshot;
		let out = cfg.apply(&one, &StackOp::Push(2), &mut ids);
		assert_eq!(out.snapshot, one);
		assert_eq!(out.steps.last().unwrap().kind, StepKind::Overflow);
	}
}
