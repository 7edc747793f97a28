//! Binary heap in array form; parent of slot `i` is `(i - 1) / 2`.

use std::fmt;

use super::stack::Slot;
use crate::engine::{Arena, ElementId, IdSource, Mutation, Mutator, StepKind, StepRecorder};

/// Which end of the order sits at the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeapKind {
	/// Smallest at the root.
	#[default]
	Min,
	/// Largest at the root.
	Max,
}

impl HeapKind {
	/// Name used in narration.
	pub fn label(self) -> &'static str {
		match self {
			HeapKind::Min => "min-heap",
			HeapKind::Max => "max-heap",
		}
	}

	/// Whether `parent` sitting above `child` violates the heap property.
	/// Equal values never do.
	pub fn should_swap(self, parent: i64, child: i64) -> bool {
		match self {
			HeapKind::Min => parent > child,
			HeapKind::Max => parent < child,
		}
	}

	/// Whether `a` belongs closer to the root than `b`.
	fn prefers(self, a: i64, b: i64) -> bool {
		self.should_swap(b, a)
	}
}

/// Heap snapshot in array order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Heap {
	slots: Vec<Slot>,
}

impl Heap {
	/// Slots in array order.
	pub fn slots(&self) -> &[Slot] {
		&self.slots
	}

	/// Values in array order.
	pub fn values(&self) -> Vec<i64> {
		self.slots.iter().map(|s| s.value).collect()
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the heap is empty.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Parent slot of `index`; the root has none.
	pub fn parent(index: usize) -> Option<usize> {
		(index > 0).then(|| (index - 1) / 2)
	}

	/// Check the heap property for every non-root slot.
	pub fn satisfies(&self, kind: HeapKind) -> bool {
		(1..self.slots.len()).all(|i| {
			let p = (i - 1) / 2;
			!kind.should_swap(self.slots[p].value, self.slots[i].value)
		})
	}
}

impl Arena for Heap {
	fn resolves(&self, id: ElementId) -> bool {
		self.slots.iter().any(|s| s.id == id)
	}
}

/// Heap operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapOp {
	/// Append and sift up.
	Insert(i64),
	/// Remove the root and sift down.
	Extract,
	/// Show the root.
	Peek,
}

impl fmt::Display for HeapOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HeapOp::Insert(v) => write!(f, "Insert {v}"),
			HeapOp::Extract => f.write_str("Extract root"),
			HeapOp::Peek => f.write_str("Peek"),
		}
	}
}

/// Mutator for [`Heap`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapMutator {
	/// Min or max ordering.
	pub kind: HeapKind,
}

impl HeapMutator {
	/// Mutator for one ordering.
	pub fn new(kind: HeapKind) -> Self {
		Self { kind }
	}

	fn sift_up(&self, heap: &mut Heap, mut index: usize, rec: &mut StepRecorder) {
		while let Some(parent) = Heap::parent(index) {
			let (p, c) = (heap.slots[parent], heap.slots[index]);
			if !self.kind.should_swap(p.value, c.value) {
				rec.pair(
					StepKind::Compare,
					p.id,
					c.id,
					format!("Parent {} and child {}: heap property holds", p.value, c.value),
				);
				return;
			}
			rec.pair(
				StepKind::Compare,
				p.id,
				c.id,
				format!("Parent {} and child {}: out of order", p.value, c.value),
			);
			heap.slots.swap(parent, index);
			rec.pair(
				StepKind::Swap,
				p.id,
				c.id,
				format!("Swap {} up above {}", c.value, p.value),
			);
			index = parent;
		}
		rec.focus(
			StepKind::Done,
			heap.slots[index].id,
			format!("{} reached the root", heap.slots[index].value),
		);
	}

	fn sift_down(&self, heap: &mut Heap, mut index: usize, rec: &mut StepRecorder) {
		let len = heap.slots.len();
		loop {
			let (left, right) = (2 * index + 1, 2 * index + 2);
			if left >= len {
				rec.focus(
					StepKind::Done,
					heap.slots[index].id,
					format!("{} is a leaf: heap restored", heap.slots[index].value),
				);
				return;
			}
			let child = if right < len && self.kind.prefers(heap.slots[right].value, heap.slots[left].value) {
				right
			} else {
				left
			};
			let (cur, ch) = (heap.slots[index], heap.slots[child]);
			if !self.kind.should_swap(cur.value, ch.value) {
				rec.pair(
					StepKind::Compare,
					cur.id,
					ch.id,
					format!("{} and child {}: heap property holds", cur.value, ch.value),
				);
				return;
			}
			rec.pair(
				StepKind::Compare,
				cur.id,
				ch.id,
				format!("{} and child {}: out of order", cur.value, ch.value),
			);
			heap.slots.swap(index, child);
			rec.pair(
				StepKind::Swap,
				cur.id,
				ch.id,
				format!("Swap {} down below {}", cur.value, ch.value),
			);
			index = child;
		}
	}
}

impl Mutator for HeapMutator {
	type Snapshot = Heap;
	type Op = HeapOp;

	fn apply(&self, heap: &Heap, op: &HeapOp, ids: &mut dyn IdSource) -> Mutation<Heap> {
		let mut rec = StepRecorder::new();
		let next = match *op {
			HeapOp::Insert(value) => {
				let mut next = heap.clone();
				let slot = Slot {
					id: ids.next_id(),
					value,
				};
				next.slots.push(slot);
				let index = next.slots.len() - 1;
				rec.focus(
					StepKind::Insert,
					slot.id,
					format!("Append {value} at index {index}"),
				);
				self.sift_up(&mut next, index, &mut rec);
				Some(next)
			}
			HeapOp::Extract | HeapOp::Peek if heap.is_empty() => {
				rec.note(StepKind::Empty, "Heap is empty");
				None
			}
			HeapOp::Extract => {
				let mut next = heap.clone();
				let root = next.slots.swap_remove(0);
				rec.focus(
					StepKind::Remove,
					root.id,
					format!("Extract root {} of the {}", root.value, self.kind.label()),
				);
				if let Some(moved) = next.slots.first().copied() {
					rec.focus(
						StepKind::Link,
						moved.id,
						format!("Move last element {} to the root", moved.value),
					);
					self.sift_down(&mut next, 0, &mut rec);
				}
				rec.note(StepKind::Done, format!("Extracted {}", root.value));
				Some(next)
			}
			HeapOp::Peek => {
				if let Some(root) = heap.slots.first() {
					rec.focus(StepKind::Found, root.id, format!("Root is {}", root.value));
				}
				None
			}
		};
		Mutation::new(next.unwrap_or_else(|| heap.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<HeapOp> {
		[40, 10, 30, 5, 20].into_iter().map(HeapOp::Insert).collect()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	fn build(kind: HeapKind, values: &[i64]) -> (Heap, CounterIds) {
		let mut ids = CounterIds::new();
		let m = HeapMutator::new(kind);
		let mut heap = Heap::default();
		for v in values {
			heap = m.apply(&heap, &HeapOp::Insert(*v), &mut ids).snapshot;
		}
		(heap, ids)
	}

	#[test]
	fn min_heap_insert_sifts_up() {
		let (heap, _) = build(HeapKind::Min, &[40, 10, 30, 5, 20]);
		assert_eq!(heap.values(), vec![5, 10, 30, 40, 20]);
		assert!(heap.satisfies(HeapKind::Min));
	}

	#[test]
	fn max_heap_extract_sifts_down() {
		let (heap, mut ids) = build(HeapKind::Max, &[40, 10, 30, 5, 20]);
		assert_eq!(heap.slots()[0].value, 40);
		let out = HeapMutator::new(HeapKind::Max).apply(&heap, &HeapOp::Extract, &mut ids);
		assert_eq!(out.snapshot.slots()[0].value, 30);
		assert!(out.snapshot.satisfies(HeapKind::Max));
		assert_eq!(out.snapshot.len(), 4);
	}

	#[test]
	fn equal_values_never_swap() {
		let (heap, mut ids) = build(HeapKind::Min, &[3]);
		let out = HeapMutator::default().apply(&heap, &HeapOp::Insert(3), &mut ids);
		assert!(out.steps.iter().all(|s| s.kind != StepKind::Swap));
	}

	#[test]
	fn extract_on_empty_heap_reports_without_swaps() {
		let mut ids = CounterIds::new();
		let empty = Heap::default();
		let out = HeapMutator::default().apply(&empty, &HeapOp::Extract, &mut ids);
		assert_eq!(out.snapshot, empty);
		assert_eq!(out.steps.len(), 1);
		assert_eq!(out.steps[0].kind, StepKind::Empty);
	}

	#[test]
	fn extract_single_element() {
		let (heap, mut ids) = build(HeapKind::Min, &[9]);
		let out = HeapMutator::default().apply(&heap, &HeapOp::Extract, &mut ids);
		assert!(out.snapshot.is_empty());
		assert_eq!(out.steps.last().unwrap().description, "Extracted 9");
	}
}
