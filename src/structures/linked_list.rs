//! Singly linked list with `next` links expressed as element ids.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{Arena, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

/// One list node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListNode {
	/// Payload.
	pub value: i64,
	/// Successor, `None` at the tail.
	pub next: Option<ElementId>,
}

/// Singly linked list snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkedList {
	nodes: BTreeMap<ElementId, ListNode>,
	head: Option<ElementId>,
}

impl LinkedList {
	/// First node.
	pub fn head(&self) -> Option<ElementId> {
		self.head
	}

	/// Node by id.
	pub fn node(&self, id: ElementId) -> Option<&ListNode> {
		self.nodes.get(&id)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Ids from head to tail.
	pub fn ids(&self) -> Vec<ElementId> {
		let mut out = Vec::with_capacity(self.len());
		let mut cursor = self.head;
		while let Some(id) = cursor {
			// Guard against a malformed cycle rather than spinning forever.
			if out.len() > self.nodes.len() {
				break;
			}
			out.push(id);
			cursor = self.node(id).and_then(|n| n.next);
		}
		out
	}

	/// Values from head to tail.
	pub fn values(&self) -> Vec<i64> {
		self.ids()
			.into_iter()
			.filter_map(|id| self.node(id).map(|n| n.value))
			.collect()
	}

	fn tail(&self) -> Option<ElementId> {
		self.ids().last().copied()
	}

	fn set_next(&mut self, id: ElementId, next: Option<ElementId>) {
		if let Some(node) = self.nodes.get_mut(&id) {
			node.next = next;
		}
	}
}

impl Arena for LinkedList {
	fn resolves(&self, id: ElementId) -> bool {
		self.nodes.contains_key(&id)
	}
}

/// Linked list operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListOp {
	/// Insert before the head.
	InsertHead(i64),
	/// Append after the tail.
	InsertTail(i64),
	/// Insert so the new node ends up at `index`.
	InsertAt {
		/// Zero-based position, at most the length.
		index: usize,
		/// Payload.
		value: i64,
	},
	/// Remove the first node holding a value.
	Delete(i64),
	/// Find the first node holding a value.
	Search(i64),
	/// Visit every node.
	Traverse,
	/// Reverse every link in place.
	Reverse,
}

impl fmt::Display for ListOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ListOp::InsertHead(v) => write!(f, "Insert {v} at head"),
			ListOp::InsertTail(v) => write!(f, "Insert {v} at tail"),
			ListOp::InsertAt { index, value } => write!(f, "Insert {value} at position {index}"),
			ListOp::Delete(v) => write!(f, "Delete {v}"),
			ListOp::Search(v) => write!(f, "Search {v}"),
			ListOp::Traverse => f.write_str("Traverse"),
			ListOp::Reverse => f.write_str("Reverse"),
		}
	}
}

/// Mutator for [`LinkedList`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ListMutator;

impl Mutator for ListMutator {
	type Snapshot = LinkedList;
	type Op = ListOp;

	fn apply(&self, list: &LinkedList, op: &ListOp, ids: &mut dyn IdSource) -> Mutation<LinkedList> {
		let mut rec = StepRecorder::new();
		let next = match *op {
			ListOp::InsertHead(value) => Some(insert_at(list, 0, value, ids, &mut rec)),
			ListOp::InsertTail(value) => Some(insert_at(list, list.len(), value, ids, &mut rec)),
			ListOp::InsertAt { index, value } => {
				if index > list.len() {
					rec.note(
						StepKind::NotFound,
						format!("Position {index} is out of range (length {})", list.len()),
					);
					None
				} else {
					Some(insert_at(list, index, value, ids, &mut rec))
				}
			}
			ListOp::Delete(value) => delete(list, value, &mut rec),
			ListOp::Search(value) => {
				search(list, value, &mut rec);
				None
			}
			ListOp::Traverse => {
				traverse(list, &mut rec);
				None
			}
			ListOp::Reverse => reverse(list, &mut rec),
		};
		Mutation::new(next.unwrap_or_else(|| list.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<ListOp> {
		[10, 20, 30, 40].into_iter().map(ListOp::InsertTail).collect()
	}
}

/// Insert before the node currently at `index` (`index == len` appends).
fn insert_at(
	list: &LinkedList,
	index: usize,
	value: i64,
	ids: &mut dyn IdSource,
	rec: &mut StepRecorder,
) -> LinkedList {
	let order = list.ids();
	let mut next = list.clone();
	let id = ids.next_id();

	if index == 0 {
		next.nodes.insert(id, ListNode { value, next: list.head });
		next.head = Some(id);
		let text = match list.head.and_then(|h| list.node(h)) {
			Some(old) => format!("New node {value} points at old head {}; head moves to it", old.value),
			None => format!("List is empty: {value} becomes the head"),
		};
		rec.focus(StepKind::Insert, id, text);
		return next;
	}

	let mut visited = Vec::new();
	for (pos, node_id) in order.iter().take(index).enumerate() {
		visited.push(*node_id);
		let label = list.node(*node_id).map_or(0, |n| n.value);
		rec.push(
			Step::new(StepKind::Visit, format!("Position {pos}: {label}"))
				.with_focus(*node_id)
				.with_visited(&visited),
		);
	}
	let prev = order[index - 1];
	let after = list.node(prev).and_then(|n| n.next);
	next.nodes.insert(id, ListNode { value, next: after });
	next.set_next(prev, Some(id));
	let prev_value = list.node(prev).map_or(0, |n| n.value);
	rec.pair(
		StepKind::Link,
		prev,
		id,
		match after.and_then(|a| list.node(a)) {
			Some(a) => format!("Link {prev_value} -> {value} -> {}", a.value),
			None => format!("Link tail {prev_value} -> {value}"),
		},
	);
	rec.focus(StepKind::Insert, id, format!("Inserted {value} at position {index}"));
	next
}

/// Walk the list until `value`, recording each visit. Returns the index.
fn find(list: &LinkedList, value: i64, rec: &mut StepRecorder) -> Option<usize> {
	let order = list.ids();
	let mut visited = Vec::new();
	for (pos, id) in order.iter().enumerate() {
		let Some(node) = list.node(*id) else {
			continue;
		};
		visited.push(*id);
		if node.value == value {
			return Some(pos);
		}
		rec.push(
			Step::new(StepKind::Compare, format!("{} != {value}, move to next", node.value))
				.with_focus(*id)
				.with_visited(&visited),
		);
	}
	None
}

fn search(list: &LinkedList, value: i64, rec: &mut StepRecorder) {
	if list.is_empty() {
		rec.note(StepKind::Empty, "List is empty");
		return;
	}
	match find(list, value, rec) {
		Some(pos) => rec.focus(
			StepKind::Found,
			list.ids()[pos],
			format!("Found {value} at position {pos}"),
		),
		None => rec.note(StepKind::NotFound, format!("{value} not found")),
	}
}

fn delete(list: &LinkedList, value: i64, rec: &mut StepRecorder) -> Option<LinkedList> {
	if list.is_empty() {
		rec.note(StepKind::Empty, "List is empty");
		return None;
	}
	let Some(pos) = find(list, value, rec) else {
		rec.note(StepKind::NotFound, format!("{value} not found, nothing deleted"));
		return None;
	};
	let order = list.ids();
	let target = order[pos];
	let after = list.node(target).and_then(|n| n.next);
	let mut next = list.clone();
	rec.focus(StepKind::Found, target, format!("Found {value} at position {pos}"));

	if pos == 0 {
		next.head = after;
		rec.focus(StepKind::Remove, target, "Head moves to the next node");
	} else {
		let prev = order[pos - 1];
		next.set_next(prev, after);
		rec.pair(
			StepKind::Link,
			prev,
			target,
			"Previous node skips over the deleted node",
		);
		rec.focus(StepKind::Remove, target, format!("Removed {value}"));
	}
	next.nodes.remove(&target);
	Some(next)
}

fn traverse(list: &LinkedList, rec: &mut StepRecorder) {
	if list.is_empty() {
		rec.note(StepKind::Empty, "List is empty");
		return;
	}
	let mut visited = Vec::new();
	for id in list.ids() {
		visited.push(id);
		let value = list.node(id).map_or(0, |n| n.value);
		rec.push(
			Step::new(StepKind::Visit, format!("Visit {value}"))
				.with_focus(id)
				.with_visited(&visited),
		);
	}
	let values: Vec<String> = list.values().iter().map(i64::to_string).collect();
	rec.push(
		Step::new(StepKind::Done, format!("{} -> null", values.join(" -> "))).with_visited(&visited),
	);
}

fn reverse(list: &LinkedList, rec: &mut StepRecorder) -> Option<LinkedList> {
	if list.len() < 2 {
		rec.note(StepKind::Info, "Nothing to reverse");
		return None;
	}
	let mut next = list.clone();
	let mut prev: Option<ElementId> = None;
	for id in list.ids() {
		next.set_next(id, prev);
		let value = list.node(id).map_or(0, |n| n.value);
		let text = match prev.and_then(|p| list.node(p)) {
			Some(p) => format!("{value}.next now points back at {}", p.value),
			None => format!("{value} becomes the new tail"),
		};
		rec.focus(StepKind::Link, id, text);
		prev = Some(id);
	}
	next.head = prev;
	if let Some(head) = prev {
		rec.focus(StepKind::Done, head, "Head moves to the old tail");
	}
	Some(next)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	fn run(list: &LinkedList, op: ListOp, ids: &mut CounterIds) -> Mutation<LinkedList> {
		ListMutator.apply(list, &op, ids)
	}

	#[test]
	fn inserts_at_head_tail_and_position() {
		let mut ids = CounterIds::new();
		let mut list = LinkedList::default();
		list = run(&list, ListOp::InsertTail(2), &mut ids).snapshot;
		list = run(&list, ListOp::InsertHead(1), &mut ids).snapshot;
		list = run(&list, ListOp::InsertTail(4), &mut ids).snapshot;
		list = run(&list, ListOp::InsertAt { index: 2, value: 3 }, &mut ids).snapshot;
		assert_eq!(list.values(), vec![1, 2, 3, 4]);
	}

	#[test]
	fn out_of_range_position_is_reported() {
		let mut ids = CounterIds::new();
		let list = run(&LinkedList::default(), ListOp::InsertTail(1), &mut ids).snapshot;
		let out = run(&list, ListOp::InsertAt { index: 5, value: 9 }, &mut ids);
		assert_eq!(out.snapshot, list);
		assert_eq!(
			out.steps.last().unwrap().description,
			"Position 5 is out of range (length 1)"
		);
	}

	#[test]
	fn delete_absent_value_signals_not_found() {
		let mut ids = CounterIds::new();
		let list = run(&LinkedList::default(), ListOp::InsertTail(1), &mut ids).snapshot;
		let out = run(&list, ListOp::Delete(7), &mut ids);
		assert_eq!(out.snapshot, list);
		assert_eq!(out.steps.last().unwrap().kind, StepKind::NotFound);
	}

	#[test]
	fn delete_head_and_middle() {
		let mut ids = CounterIds::new();
		let mut list = LinkedList::default();
		for v in [1, 2, 3] {
			list = run(&list, ListOp::InsertTail(v), &mut ids).snapshot;
		}
		let without_head = run(&list, ListOp::Delete(1), &mut ids).snapshot;
		assert_eq!(without_head.values(), vec![2, 3]);
		let without_middle = run(&list, ListOp::Delete(2), &mut ids).snapshot;
		assert_eq!(without_middle.values(), vec![1, 3]);
		assert_eq!(without_middle.len(), 2);
	}

	#[test]
	fn reverse_relinks_every_node() {
		let mut ids = CounterIds::new();
		let mut list = LinkedList::default();
		for v in [1, 2, 3] {
			list = run(&list, ListOp::InsertTail(v), &mut ids).snapshot;
		}
		let reversed = run(&list, ListOp::Reverse, &mut ids);
		assert_eq!(reversed.snapshot.values(), vec![3, 2, 1]);
		assert_eq!(reversed.snapshot.tail(), list.head());
	}

	#[test]
	fn search_reports_position() {
		let mut ids = CounterIds::new();
		let mut list = LinkedList::default();
		for v in [5, 6] {
			list = run(&list, ListOp::InsertTail(v), &mut ids).snapshot;
		}
		let out = run(&list, ListOp::Search(6), &mut ids);
		assert_eq!(out.steps.last().unwrap().description, "Found 6 at position 1");
		assert_eq!(out.steps.len(), 2);
	}
}
