//! Binary search tree over `i64` values, stored as an id-indexed arena.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::engine::{Arena, AuxView, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

/// One tree node. Children are ids into the same arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
	/// Key.
	pub value: i64,
	/// Subtree of smaller keys.
	pub left: Option<ElementId>,
	/// Subtree of larger keys.
	pub right: Option<ElementId>,
}

impl TreeNode {
	fn leaf(value: i64) -> Self {
		Self {
			value,
			left: None,
			right: None,
		}
	}
}

/// Binary search tree snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
	nodes: BTreeMap<ElementId, TreeNode>,
	root: Option<ElementId>,
}

/// Walk order for [`TreeOp::Traverse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
	/// Left, node, right: ascending keys.
	InOrder,
	/// Node, left, right.
	PreOrder,
	/// Left, right, node.
	PostOrder,
	/// Breadth first, top to bottom.
	LevelOrder,
}

impl TraversalOrder {
	/// Name used in narration.
	pub fn label(self) -> &'static str {
		match self {
			TraversalOrder::InOrder => "In-order",
			TraversalOrder::PreOrder => "Pre-order",
			TraversalOrder::PostOrder => "Post-order",
			TraversalOrder::LevelOrder => "Level-order",
		}
	}
}

impl Tree {
	/// Root node, `None` when empty.
	pub fn root(&self) -> Option<ElementId> {
		self.root
	}

	/// Node by id.
	pub fn node(&self, id: ElementId) -> Option<&TreeNode> {
		self.nodes.get(&id)
	}

	/// All nodes in id order.
	pub fn nodes(&self) -> impl Iterator<Item = (ElementId, &TreeNode)> {
		self.nodes.iter().map(|(id, node)| (*id, node))
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the tree has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether some node holds `value`.
	pub fn contains(&self, value: i64) -> bool {
		self.nodes.values().any(|n| n.value == value)
	}

	/// Key of node `id`.
	pub fn value(&self, id: ElementId) -> Option<i64> {
		self.node(id).map(|n| n.value)
	}

	/// Element ids in the given traversal order.
	pub fn traversal(&self, order: TraversalOrder) -> Vec<ElementId> {
		let mut out = Vec::with_capacity(self.len());
		match order {
			TraversalOrder::LevelOrder => {
				let mut queue: VecDeque<ElementId> = self.root.into_iter().collect();
				while let Some(id) = queue.pop_front() {
					out.push(id);
					if let Some(node) = self.node(id) {
						queue.extend(node.left);
						queue.extend(node.right);
					}
				}
			}
			_ => self.depth_first(order, &mut out),
		}
		out
	}

	/// Values in ascending order.
	pub fn sorted_values(&self) -> Vec<i64> {
		self.traversal(TraversalOrder::InOrder)
			.into_iter()
			.filter_map(|id| self.value(id))
			.collect()
	}

	/// Number of levels; an empty tree has height 0.
	pub fn height(&self) -> usize {
		let mut height = 0;
		let mut queue: VecDeque<(ElementId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
		while let Some((id, depth)) = queue.pop_front() {
			height = height.max(depth);
			if let Some(node) = self.node(id) {
				queue.extend(node.left.map(|l| (l, depth + 1)));
				queue.extend(node.right.map(|r| (r, depth + 1)));
			}
		}
		height
	}

	/// Pre-, in- or post-order walk with an explicit stack. Each frame is
	/// a node and whether its children have already been scheduled.
	fn depth_first(&self, order: TraversalOrder, out: &mut Vec<ElementId>) {
		let mut stack: Vec<(ElementId, bool)> = self.root.map(|id| (id, false)).into_iter().collect();
		while let Some((id, expanded)) = stack.pop() {
			let Some(node) = self.node(id) else {
				continue;
			};
			if expanded {
				out.push(id);
				continue;
			}
			let left = node.left.map(|l| (l, false));
			let right = node.right.map(|r| (r, false));
			// Pushed in reverse of the visiting order.
			let frames = match order {
				TraversalOrder::PreOrder => [right, left, Some((id, true))],
				TraversalOrder::InOrder => [right, Some((id, true)), left],
				_ => [Some((id, true)), right, left],
			};
			stack.extend(frames.into_iter().flatten());
		}
	}

	fn node_mut(&mut self, id: ElementId) -> Option<&mut TreeNode> {
		self.nodes.get_mut(&id)
	}

	/// Point whatever referenced `old` (a parent link or the root) at `new`.
	fn relink(&mut self, parent: Option<ElementId>, old: ElementId, new: Option<ElementId>) {
		let Some(parent) = parent else {
			self.root = new;
			return;
		};
		if let Some(p) = self.node_mut(parent) {
			if p.left == Some(old) {
				p.left = new;
			} else {
				p.right = new;
			}
		}
	}
}

impl Arena for Tree {
	fn resolves(&self, id: ElementId) -> bool {
		self.nodes.contains_key(&id)
	}
}

/// Binary search tree operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeOp {
	/// Add a key; duplicates are rejected.
	Insert(i64),
	/// Remove a key.
	Delete(i64),
	/// Look a key up.
	Search(i64),
	/// Walk every node.
	Traverse(TraversalOrder),
	/// Follow left links to the smallest key.
	Min,
	/// Follow right links to the largest key.
	Max,
}

impl fmt::Display for TreeOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TreeOp::Insert(v) => write!(f, "Insert {v}"),
			TreeOp::Delete(v) => write!(f, "Delete {v}"),
			TreeOp::Search(v) => write!(f, "Search {v}"),
			TreeOp::Traverse(order) => write!(f, "{} traversal", order.label()),
			TreeOp::Min => f.write_str("Find minimum"),
			TreeOp::Max => f.write_str("Find maximum"),
		}
	}
}

/// Mutator for [`Tree`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BstMutator;

impl Mutator for BstMutator {
	type Snapshot = Tree;
	type Op = TreeOp;

	fn apply(&self, tree: &Tree, op: &TreeOp, ids: &mut dyn IdSource) -> Mutation<Tree> {
		let mut rec = StepRecorder::new();
		let snapshot = match *op {
			TreeOp::Insert(value) => insert(tree, value, ids, &mut rec),
			TreeOp::Delete(value) => delete(tree, value, &mut rec),
			TreeOp::Search(value) => {
				search(tree, value, &mut rec);
				None
			}
			TreeOp::Traverse(order) => {
				traverse(tree, order, &mut rec);
				None
			}
			TreeOp::Min => {
				extreme(tree, true, &mut rec);
				None
			}
			TreeOp::Max => {
				extreme(tree, false, &mut rec);
				None
			}
		};
		Mutation::new(
			snapshot.unwrap_or_else(|| tree.clone()),
			rec.finish("Nothing to do"),
		)
	}

	fn sample(&self) -> Vec<TreeOp> {
		[50, 30, 70, 20, 40, 60, 80]
			.into_iter()
			.map(TreeOp::Insert)
			.collect()
	}
}

/// Walk from the root comparing against `value`, recording each decision.
/// Returns `(found, last node visited)`.
fn descend(
	tree: &Tree,
	value: i64,
	rec: &mut StepRecorder,
) -> (Option<ElementId>, Option<ElementId>) {
	let mut parent = None;
	let mut cursor = tree.root;
	while let Some(id) = cursor {
		let Some(node) = tree.node(id) else {
			break;
		};
		if value == node.value {
			return (Some(id), parent);
		}
		let (next, side, sign) = if value < node.value {
			(node.left, "left", '<')
		} else {
			(node.right, "right", '>')
		};
		rec.focus(
			StepKind::Compare,
			id,
			format!("{value} {sign} {}: go {side}", node.value),
		);
		parent = Some(id);
		cursor = next;
	}
	(None, parent)
}

fn insert(tree: &Tree, value: i64, ids: &mut dyn IdSource, rec: &mut StepRecorder) -> Option<Tree> {
	let (found, parent) = descend(tree, value, rec);
	if let Some(existing) = found {
		rec.focus(
			StepKind::Duplicate,
			existing,
			format!("{value} already exists in the tree"),
		);
		return None;
	}

	let mut next = tree.clone();
	let id = ids.next_id();
	next.nodes.insert(id, TreeNode::leaf(value));
	match parent {
		Some(parent) => {
			let p = next.node_mut(parent)?;
			let parent_value = p.value;
			let side = if value < parent_value {
				p.left = Some(id);
				"left"
			} else {
				p.right = Some(id);
				"right"
			};
			rec.focus(
				StepKind::Insert,
				id,
				format!("Insert {value} as the {side} child of {parent_value}"),
			);
		}
		None => {
			next.root = Some(id);
			rec.focus(
				StepKind::Insert,
				id,
				format!("Tree is empty: {value} becomes the root"),
			);
		}
	}
	Some(next)
}

fn search(tree: &Tree, value: i64, rec: &mut StepRecorder) {
	if tree.is_empty() {
		rec.note(StepKind::Empty, "Tree is empty");
		return;
	}
	match descend(tree, value, rec) {
		(Some(id), _) => rec.focus(StepKind::Found, id, format!("Found {value}")),
		(None, _) => rec.note(StepKind::NotFound, format!("{value} is not in the tree")),
	}
}

fn delete(tree: &Tree, value: i64, rec: &mut StepRecorder) -> Option<Tree> {
	if tree.is_empty() {
		rec.note(StepKind::Empty, "Tree is empty");
		return None;
	}
	let (found, parent) = descend(tree, value, rec);
	let Some(target) = found else {
		rec.note(StepKind::NotFound, format!("{value} is not in the tree"));
		return None;
	};
	let node = tree.node(target)?.clone();
	rec.focus(StepKind::Found, target, format!("Found {value}"));

	let mut next = tree.clone();
	match (node.left, node.right) {
		(Some(_), Some(right)) => {
			// In-order successor: leftmost node of the right subtree.
			let mut successor_parent = target;
			let mut successor = right;
			rec.focus(
				StepKind::Visit,
				right,
				"Two children: look for the in-order successor in the right subtree",
			);
			while let Some(left) = next.node(successor).and_then(|n| n.left) {
				successor_parent = successor;
				successor = left;
				rec.focus(StepKind::Visit, successor, "Keep going left");
			}
			let succ = next.node(successor)?.clone();
			rec.pair(
				StepKind::Swap,
				target,
				successor,
				format!("Replace {value} with its successor {}", succ.value),
			);
			if let Some(t) = next.node_mut(target) {
				t.value = succ.value;
			}
			if successor_parent == target {
				if let Some(t) = next.node_mut(target) {
					t.right = succ.right;
				}
			} else if let Some(p) = next.node_mut(successor_parent) {
				p.left = succ.right;
			}
			next.nodes.remove(&successor);
			rec.focus(
				StepKind::Remove,
				successor,
				format!("Remove the successor's old node ({})", succ.value),
			);
		}
		(child @ Some(_), None) | (None, child @ Some(_)) => {
			next.relink(parent, target, child);
			next.nodes.remove(&target);
			rec.focus(
				StepKind::Remove,
				target,
				format!("{value} has one child: splice it out"),
			);
		}
		(None, None) => {
			next.relink(parent, target, None);
			next.nodes.remove(&target);
			rec.focus(StepKind::Remove, target, format!("{value} is a leaf: remove it"));
		}
	}
	Some(next)
}

fn traverse(tree: &Tree, order: TraversalOrder, rec: &mut StepRecorder) {
	if tree.is_empty() {
		rec.note(StepKind::Empty, "Tree is empty");
		return;
	}
	let ids = tree.traversal(order);
	let mut visited = Vec::with_capacity(ids.len());
	for id in &ids {
		visited.push(*id);
		let value = tree.value(*id).unwrap_or_default();
		let mut step = Step::new(StepKind::Visit, format!("Visit {value}"))
			.with_focus(*id)
			.with_visited(&visited);
		if order == TraversalOrder::LevelOrder {
			// Level order visits ids in BFS order, so the rest is the queue.
			let waiting = ids[visited.len()..]
				.iter()
				.filter_map(|id| tree.value(*id))
				.map(|v| v.to_string())
				.collect();
			step = step.with_aux(AuxView::Queue(waiting));
		}
		rec.push(step);
	}
	let values: Vec<String> = ids
		.iter()
		.filter_map(|id| tree.value(*id))
		.map(|v| v.to_string())
		.collect();
	rec.push(
		Step::new(
			StepKind::Done,
			format!("{}: {}", order.label(), values.join(", ")),
		)
		.with_visited(&visited),
	);
}

fn extreme(tree: &Tree, minimum: bool, rec: &mut StepRecorder) {
	let Some(mut id) = tree.root else {
		rec.note(StepKind::Empty, "Tree is empty");
		return;
	};
	let side = if minimum { "left" } else { "right" };
	loop {
		let Some(node) = tree.node(id) else {
			return;
		};
		let next = if minimum { node.left } else { node.right };
		match next {
			Some(child) => {
				rec.focus(StepKind::Visit, id, format!("{}: keep going {side}", node.value));
				id = child;
			}
			None => {
				let which = if minimum { "Minimum" } else { "Maximum" };
				rec.focus(StepKind::Found, id, format!("{which} is {}", node.value));
				return;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	fn build(values: &[i64]) -> (Tree, CounterIds) {
		let mut ids = CounterIds::new();
		let mut tree = Tree::default();
		for v in values {
			tree = BstMutator.apply(&tree, &TreeOp::Insert(*v), &mut ids).snapshot;
		}
		(tree, ids)
	}

	fn values_in(tree: &Tree, order: TraversalOrder) -> Vec<i64> {
		tree.traversal(order)
			.into_iter()
			.filter_map(|id| tree.value(id))
			.collect()
	}

	#[test]
	fn insert_keeps_search_order_property() {
		let (tree, _) = build(&[50, 30, 70, 20, 40, 60, 80]);
		assert_eq!(tree.len(), 7);
		assert_eq!(tree.sorted_values(), vec![20, 30, 40, 50, 60, 70, 80]);
		assert_eq!(
			values_in(&tree, TraversalOrder::PreOrder),
			vec![50, 30, 20, 40, 70, 60, 80]
		);
		assert_eq!(
			values_in(&tree, TraversalOrder::PostOrder),
			vec![20, 40, 30, 60, 80, 70, 50]
		);
		assert_eq!(
			values_in(&tree, TraversalOrder::LevelOrder),
			vec![50, 30, 70, 20, 40, 60, 80]
		);
		assert_eq!(tree.height(), 3);
	}

	#[test]
	fn degenerate_chain_walks_without_recursion() {
		// A right spine built directly; inserting sorted values would narrate
		// every comparison.
		let n = 200_000u64;
		let mut tree = Tree::default();
		for i in 1..=n {
			let mut node = TreeNode::leaf(i as i64);
			node.right = (i < n).then(|| ElementId::from_raw(i + 1));
			tree.nodes.insert(ElementId::from_raw(i), node);
		}
		tree.root = Some(ElementId::from_raw(1));

		assert_eq!(tree.height(), n as usize);
		let in_order = tree.traversal(TraversalOrder::InOrder);
		assert_eq!(in_order.len(), n as usize);
		assert_eq!(in_order.first(), Some(&ElementId::from_raw(1)));
		let post = tree.traversal(TraversalOrder::PostOrder);
		assert_eq!(post.first(), Some(&ElementId::from_raw(n)));
	}

	#[test]
	fn insert_narrates_comparisons() {
		let (tree, mut ids) = build(&[50, 30]);
		let out = BstMutator.apply(&tree, &TreeOp::Insert(40), &mut ids);
		let kinds: Vec<_> = out.steps.iter().map(|s| s.kind).collect();
		assert_eq!(kinds, vec![StepKind::Compare, StepKind::Compare, StepKind::Insert]);
		assert_eq!(out.steps[0].description, "40 < 50: go left");
		assert_eq!(out.steps[1].description, "40 > 30: go right");
	}

	#[test]
	fn duplicate_insert_is_a_noop_step() {
		let (tree, mut ids) = build(&[50, 30]);
		let out = BstMutator.apply(&tree, &TreeOp::Insert(30), &mut ids);
		assert_eq!(out.snapshot, tree);
		assert_eq!(out.steps.last().map(|s| s.kind), Some(StepKind::Duplicate));
	}

	#[test]
	fn delete_leaf_and_single_child() {
		let (tree, mut ids) = build(&[50, 30, 20, 70]);
		let out = BstMutator.apply(&tree, &TreeOp::Delete(20), &mut ids);
		assert_eq!(out.snapshot.sorted_values(), vec![30, 50, 70]);

		let out = BstMutator.apply(&tree, &TreeOp::Delete(30), &mut ids);
		assert_eq!(out.snapshot.sorted_values(), vec![20, 50, 70]);
		let root = out.snapshot.root().and_then(|r| out.snapshot.node(r)).cloned();
		assert_eq!(
			root.and_then(|r| r.left).and_then(|l| out.snapshot.value(l)),
			Some(20)
		);
	}

	#[test]
	fn delete_with_two_children_keeps_identity() {
		let (tree, mut ids) = build(&[50, 30, 70, 60, 80, 65]);
		let root = tree.root().unwrap();
		let out = BstMutator.apply(&tree, &TreeOp::Delete(50), &mut ids);
		let next = out.snapshot;
		assert_eq!(next.root(), Some(root));
		assert_eq!(next.value(root), Some(60));
		assert_eq!(next.sorted_values(), vec![30, 60, 65, 70, 80]);
		assert!(out.steps.iter().any(|s| s.kind == StepKind::Swap));

		// The removed successor node only exists in the pre-op snapshot.
		let removed = out
			.steps
			.iter()
			.find(|s| s.kind == StepKind::Remove)
			.and_then(|s| s.focus)
			.unwrap();
		assert!(tree.node(removed).is_some());
		assert!(next.node(removed).is_none());
	}

	#[test]
	fn delete_root_with_right_child_successor() {
		let (tree, mut ids) = build(&[50, 30, 70, 80]);
		let out = BstMutator.apply(&tree, &TreeOp::Delete(50), &mut ids);
		assert_eq!(out.snapshot.sorted_values(), vec![30, 70, 80]);
		assert_eq!(out.snapshot.len(), 3);
	}

	#[test]
	fn missing_and_empty_cases_never_mutate() {
		let mut ids = CounterIds::new();
		let empty = Tree::default();
		for op in [TreeOp::Delete(1), TreeOp::Search(1), TreeOp::Min, TreeOp::Traverse(TraversalOrder::InOrder)] {
			let out = BstMutator.apply(&empty, &op, &mut ids);
			assert_eq!(out.snapshot, empty);
			assert_eq!(out.steps.last().map(|s| s.kind), Some(StepKind::Empty));
		}

		let (tree, mut ids) = build(&[5, 3]);
		let out = BstMutator.apply(&tree, &TreeOp::Delete(9), &mut ids);
		assert_eq!(out.snapshot, tree);
		assert_eq!(out.steps.last().map(|s| s.kind), Some(StepKind::NotFound));
	}

	#[test]
	fn traversal_steps_accumulate_visited() {
		let (tree, mut ids) = build(&[2, 1, 3]);
		let out = BstMutator.apply(&tree, &TreeOp::Traverse(TraversalOrder::InOrder), &mut ids);
		assert_eq!(out.steps.len(), 4);
		assert_eq!(out.steps[1].visited.len(), 2);
		assert_eq!(out.steps[3].description, "In-order: 1, 2, 3");
	}

	#[test]
	fn min_and_max() {
		let (tree, mut ids) = build(&[50, 30, 70, 20, 80]);
		let min = BstMutator.apply(&tree, &TreeOp::Min, &mut ids);
		assert_eq!(min.steps.last().unwrap().description, "Minimum is 20");
		let max = BstMutator.apply(&tree, &TreeOp::Max, &mut ids);
		assert_eq!(max.steps.last().unwrap().description, "Maximum is 80");
	}
}
