//! Bounded FIFO queue.

use std::collections::VecDeque;
use std::fmt;

use super::stack::Slot;
use crate::engine::{Arena, AuxView, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

/// FIFO queue, front first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Queue {
	slots: VecDeque<Slot>,
}

impl Queue {
	/// Items front first.
	pub fn slots(&self) -> impl Iterator<Item = &Slot> {
		self.slots.iter()
	}

	/// Next item to leave.
	pub fn front(&self) -> Option<Slot> {
		self.slots.front().copied()
	}

	/// Values front first.
	pub fn values(&self) -> Vec<i64> {
		self.slots.iter().map(|s| s.value).collect()
	}

	/// Number of items.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the queue is empty.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	fn aux(&self) -> AuxView {
		AuxView::Queue(self.slots.iter().map(|s| s.value.to_string()).collect())
	}
}

impl Arena for Queue {
	fn resolves(&self, id: ElementId) -> bool {
		self.slots.iter().any(|s| s.id == id)
	}
}

/// Queue operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueOp {
	/// Add at the rear.
	Enqueue(i64),
	/// Remove from the front.
	Dequeue,
	/// Show the front.
	Front,
}

impl fmt::Display for QueueOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			QueueOp::Enqueue(v) => write!(f, "Enqueue {v}"),
			QueueOp::Dequeue => f.write_str("Dequeue"),
			QueueOp::Front => f.write_str("Front"),
		}
	}
}

/// Mutator for [`Queue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
	/// Maximum number of items.
	pub capacity: usize,
}

impl Default for QueueConfig {
	fn default() -> Self {
		Self { capacity: 8 }
	}
}

impl Mutator for QueueConfig {
	type Snapshot = Queue;
	type Op = QueueOp;

	fn apply(&self, queue: &Queue, op: &QueueOp, ids: &mut dyn IdSource) -> Mutation<Queue> {
		let mut rec = StepRecorder::new();
		let next = match *op {
			QueueOp::Enqueue(_) if queue.len() >= self.capacity => {
				rec.push(
					Step::new(
						StepKind::Overflow,
						format!("Queue is full: capacity {} reached", self.capacity),
					)
					.with_aux(queue.aux()),
				);
				None
			}
			QueueOp::Enqueue(value) => {
				let mut next = queue.clone();
				let slot = Slot {
					id: ids.next_id(),
					value,
				};
				next.slots.push_back(slot);
				rec.push(
					Step::new(StepKind::Enqueue, format!("Enqueue {value} at the rear"))
						.with_focus(slot.id)
						.with_aux(next.aux()),
				);
				Some(next)
			}
			QueueOp::Dequeue | QueueOp::Front if queue.is_empty() => {
				rec.note(StepKind::Empty, "Queue is empty");
				None
			}
			QueueOp::Dequeue => {
				let mut next = queue.clone();
				next.slots.pop_front().map(|front| {
					rec.push(
						Step::new(StepKind::Dequeue, format!("Front is {}", front.value))
							.with_focus(front.id)
							.with_aux(queue.aux()),
					);
					rec.push(
						Step::new(StepKind::Remove, format!("Dequeued {}", front.value))
							.with_aux(next.aux()),
					);
					next
				})
			}
			QueueOp::Front => {
				if let Some(front) = queue.front() {
					rec.push(
						Step::new(StepKind::Found, format!("Front is {}", front.value))
							.with_focus(front.id)
							.with_aux(queue.aux()),
					);
				}
				None
			}
		};
		Mutation::new(next.unwrap_or_else(|| queue.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<QueueOp> {
		[3, 9, 14].into_iter().map(QueueOp::Enqueue).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::CounterIds;

	#[test]
	fn fifo_order() {
		let mut ids = CounterIds::new();
		let cfg = QueueConfig::default();
		let mut queue = Queue::default();
		for op in cfg.sample() {
			queue = cfg.apply(&queue, &op, &mut ids).snapshot;
		}
		let out = cfg.apply(&queue, &QueueOp::Dequeue, &mut ids);
		assert_eq!(out.steps[0].description, "Front is 3");
		assert_eq!(out.snapshot.values(), vec![9, 14]);
	}

	#[test]
	fn empty_and_full() {
		let mut ids = CounterIds::new();
		let cfg = QueueConfig { capacity: 1 };
		let out = cfg.apply(&Queue::default(), &QueueOp::Dequeue, &mut ids);
		assert_eq!(out.steps.last().unwrap().kind, StepKind::Empty);

		let one = cfg.apply(&Queue::default(), &QueueOp::Enqueue(4), &mut ids).snapshot;
		let out = cfg.apply(&one, &QueueOp::Enqueue(5), &mut ids);
		assert_eq!(out.snapshot.values(), vec![4]);
		assert_eq!(out.steps.last().unwrap().kind, StepKind::Overflow);
	}
}
