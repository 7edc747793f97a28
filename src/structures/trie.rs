//! Prefix tree over lowercase words.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{Arena, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

/// One trie node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieNode {
	/// Edge label from the parent; `None` only for the root.
	pub ch: Option<char>,
	/// Child per next letter.
	pub children: BTreeMap<char, ElementId>,
	/// End-of-word marker, independent of whether children exist.
	pub terminal: bool,
}

/// Trie snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trie {
	nodes: BTreeMap<ElementId, TrieNode>,
	root: Option<ElementId>,
}

impl Trie {
	/// Root node, `None` before the first insert.
	pub fn root(&self) -> Option<ElementId> {
		self.root
	}

	/// Node by id.
	pub fn node(&self, id: ElementId) -> Option<&TrieNode> {
		self.nodes.get(&id)
	}

	/// Node count including the root.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether no word is stored.
	pub fn is_empty(&self) -> bool {
		self.words().is_empty()
	}

	/// Every stored word in lexical order.
	pub fn words(&self) -> Vec<String> {
		fn collect(trie: &Trie, id: ElementId, prefix: &mut String, out: &mut Vec<String>) {
			let Some(node) = trie.node(id) else {
				return;
			};
			if node.terminal {
				out.push(prefix.clone());
			}
			for (ch, child) in &node.children {
				prefix.push(*ch);
				collect(trie, *child, prefix, out);
				prefix.pop();
			}
		}
		let mut out = Vec::new();
		if let Some(root) = self.root {
			collect(self, root, &mut String::new(), &mut out);
		}
		out
	}

	/// Follow `word` from the root. Returns the ids of the path, root
	/// first, stopping at the first missing character.
	pub fn path(&self, word: &str) -> Vec<ElementId> {
		let mut out = Vec::new();
		let Some(mut id) = self.root else {
			return out;
		};
		out.push(id);
		for ch in word.chars() {
			match self.node(id).and_then(|n| n.children.get(&ch)) {
				Some(next) => {
					id = *next;
					out.push(id);
				}
				None => break,
			}
		}
		out
	}
}

impl Arena for Trie {
	fn resolves(&self, id: ElementId) -> bool {
		self.nodes.contains_key(&id)
	}
}

/// Trie operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieOp {
	/// Add a word.
	Insert(String),
	/// Look a whole word up.
	Search(String),
	/// Check whether any word has this prefix.
	StartsWith(String),
	/// Remove a word and prune dead branches.
	Delete(String),
}

impl fmt::Display for TrieOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TrieOp::Insert(w) => write!(f, "Insert \"{w}\""),
			TrieOp::Search(w) => write!(f, "Search \"{w}\""),
			TrieOp::StartsWith(w) => write!(f, "Prefix \"{w}\""),
			TrieOp::Delete(w) => write!(f, "Delete \"{w}\""),
		}
	}
}

/// Mutator for [`Trie`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TrieMutator;

impl Mutator for TrieMutator {
	type Snapshot = Trie;
	type Op = TrieOp;

	fn apply(&self, trie: &Trie, op: &TrieOp, ids: &mut dyn IdSource) -> Mutation<Trie> {
		let mut rec = StepRecorder::new();
		let next = match op {
			TrieOp::Insert(word) => insert(trie, word, ids, &mut rec),
			TrieOp::Search(word) => {
				lookup(trie, word, true, &mut rec);
				None
			}
			TrieOp::StartsWith(prefix) => {
				lookup(trie, prefix, false, &mut rec);
				None
			}
			TrieOp::Delete(word) => delete(trie, word, &mut rec),
		};
		Mutation::new(next.unwrap_or_else(|| trie.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<TrieOp> {
		["cat", "car", "cart", "dog", "do"]
			.into_iter()
			.map(|w| TrieOp::Insert(w.to_string()))
			.collect()
	}
}

fn insert(trie: &Trie, word: &str, ids: &mut dyn IdSource, rec: &mut StepRecorder) -> Option<Trie> {
	if word.is_empty() {
		rec.note(StepKind::Empty, "Cannot insert an empty word");
		return None;
	}
	let mut next = trie.clone();
	let root = match next.root {
		Some(root) => root,
		None => {
			let root = ids.next_id();
			next.nodes.insert(root, TrieNode::default());
			next.root = Some(root);
			rec.focus(StepKind::Insert, root, "Create the root node");
			root
		}
	};

	let mut id = root;
	let mut visited = vec![root];
	let mut prefix = String::new();
	for ch in word.chars() {
		prefix.push(ch);
		let existing = next.node(id).and_then(|n| n.children.get(&ch)).copied();
		let child = match existing {
			Some(child) => {
				visited.push(child);
				rec.push(
					Step::new(StepKind::Visit, format!("'{ch}' exists, follow it ({prefix})"))
						.with_focus(child)
						.with_visited(&visited),
				);
				child
			}
			None => {
				let child = ids.next_id();
				next.nodes.insert(
					child,
					TrieNode {
						ch: Some(ch),
						..TrieNode::default()
					},
				);
				if let Some(parent) = next.nodes.get_mut(&id) {
					parent.children.insert(ch, child);
				}
				visited.push(child);
				rec.push(
					Step::new(StepKind::Insert, format!("Create node '{ch}' ({prefix})"))
						.with_focus(child)
						.with_visited(&visited),
				);
				child
			}
		};
		id = child;
	}

	let end = next.nodes.get_mut(&id)?;
	if end.terminal {
		rec.focus(StepKind::Duplicate, id, format!("\"{word}\" is already in the trie"));
		return None;
	}
	end.terminal = true;
	rec.push(
		Step::new(StepKind::Done, format!("Mark '{}' as end of \"{word}\"", word.chars().last().unwrap_or(' ')))
			.with_focus(id)
			.with_visited(&visited),
	);
	Some(next)
}

/// Walk `word`; `whole` requires an end-of-word marker at the last node.
fn lookup(trie: &Trie, word: &str, whole: bool, rec: &mut StepRecorder) {
	let Some(root) = trie.root else {
		rec.note(StepKind::Empty, "Trie is empty");
		return;
	};
	let mut id = root;
	let mut visited = vec![root];
	for (i, ch) in word.chars().enumerate() {
		match trie.node(id).and_then(|n| n.children.get(&ch)) {
			Some(child) => {
				id = *child;
				visited.push(id);
				rec.push(
					Step::new(StepKind::Visit, format!("Found '{ch}' at depth {}", i + 1))
						.with_focus(id)
						.with_visited(&visited),
				);
			}
			None => {
				rec.push(
					Step::new(StepKind::NotFound, format!("No child '{ch}': \"{word}\" not found"))
						.with_focus(id)
						.with_visited(&visited),
				);
				return;
			}
		}
	}
	let terminal = trie.node(id).is_some_and(|n| n.terminal);
	let step = match (whole, terminal) {
		(true, true) => Step::new(StepKind::Found, format!("\"{word}\" is a stored word")),
		(true, false) => Step::new(
			StepKind::NotFound,
			format!("\"{word}\" is only a prefix, not a stored word"),
		),
		(false, _) => Step::new(StepKind::Found, format!("Some word starts with \"{word}\"")),
	};
	rec.push(step.with_focus(id).with_visited(&visited));
}

fn delete(trie: &Trie, word: &str, rec: &mut StepRecorder) -> Option<Trie> {
	if trie.root.is_none() {
		rec.note(StepKind::Empty, "Trie is empty");
		return None;
	}
	let path = trie.path(word);
	let complete = path.len() == word.chars().count() + 1;
	let last = *path.last()?;
	if !complete || !trie.node(last).is_some_and(|n| n.terminal) {
		rec.push(
			Step::new(StepKind::NotFound, format!("\"{word}\" is not in the trie"))
				.with_focus(last)
				.with_visited(&path),
		);
		return None;
	}
	rec.push(
		Step::new(StepKind::Found, format!("Found \"{word}\""))
			.with_focus(last)
			.with_visited(&path),
	);

	let mut next = trie.clone();
	if let Some(end) = next.nodes.get_mut(&last) {
		end.terminal = false;
	}
	rec.focus(StepKind::Info, last, "Clear the end-of-word marker");

	// Prune from the bottom while a node has no children and ends no word.
	for pair in path.windows(2).rev() {
		let (parent, child) = (pair[0], pair[1]);
		let prunable = next
			.node(child)
			.is_some_and(|n| n.children.is_empty() && !n.terminal);
		if !prunable {
			break;
		}
		let ch = next.node(child).and_then(|n| n.ch);
		rec.focus(
			StepKind::Remove,
			child,
			format!("Remove unused node '{}'", ch.unwrap_or('?')),
		);
		next.nodes.remove(&child);
		if let (Some(p), Some(ch)) = (next.nodes.get_mut(&parent), ch) {
			p.children.remove(&ch);
		}
	}
	Some(next)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	fn sample_trie() -> (Trie, CounterIds) {
		let mut ids = CounterIds::new();
		let mut trie = Trie::default();
		for op in TrieMutator.sample() {
			trie = TrieMutator.apply(&trie, &op, &mut ids).snapshot;
		}
		(trie, ids)
	}

	fn last_kind(out: &Mutation<Trie>) -> StepKind {
		out.steps.last().map(|s| s.kind).unwrap()
	}

	#[test]
	fn insert_shares_prefixes() {
		let (trie, _) = sample_trie();
		assert_eq!(trie.words(), vec!["car", "cart", "cat", "do", "dog"]);
		// root + c a t r t + d o g
		assert_eq!(trie.len(), 9);
	}

	#[test]
	fn prefix_versus_word() {
		let (trie, mut ids) = sample_trie();
		let ca = TrieMutator.apply(&trie, &TrieOp::Search("ca".into()), &mut ids);
		assert_eq!(last_kind(&ca), StepKind::NotFound);
		let prefix = TrieMutator.apply(&trie, &TrieOp::StartsWith("ca".into()), &mut ids);
		assert_eq!(last_kind(&prefix), StepKind::Found);
		// "car" has a child but is still a word.
		let car = TrieMutator.apply(&trie, &TrieOp::Search("car".into()), &mut ids);
		assert_eq!(last_kind(&car), StepKind::Found);
		let cow = TrieMutator.apply(&trie, &TrieOp::StartsWith("cow".into()), &mut ids);
		assert_eq!(last_kind(&cow), StepKind::NotFound);
	}

	#[test]
	fn duplicate_insert_is_reported() {
		let (trie, mut ids) = sample_trie();
		let out = TrieMutator.apply(&trie, &TrieOp::Insert("dog".into()), &mut ids);
		assert_eq!(out.snapshot, trie);
		assert_eq!(last_kind(&out), StepKind::Duplicate);
	}

	#[test]
	fn delete_prunes_only_unused_nodes() {
		let (trie, mut ids) = sample_trie();
		let out = TrieMutator.apply(&trie, &TrieOp::Delete("cart".into()), &mut ids);
		assert_eq!(out.snapshot.words(), vec!["car", "cat", "do", "dog"]);
		assert_eq!(out.snapshot.len(), trie.len() - 1);

		let out = TrieMutator.apply(&trie, &TrieOp::Delete("car".into()), &mut ids);
		assert_eq!(out.snapshot.words(), vec!["cart", "cat", "do", "dog"]);
		assert_eq!(out.snapshot.len(), trie.len());

		let out = TrieMutator.apply(&trie, &TrieOp::Delete("ca".into()), &mut ids);
		assert_eq!(last_kind(&out), StepKind::NotFound);
	}

	#[test]
	fn operations_on_empty_trie() {
		let mut ids = CounterIds::new();
		let empty = Trie::default();
		let out = TrieMutator.apply(&empty, &TrieOp::Search("a".into()), &mut ids);
		assert_eq!(last_kind(&out), StepKind::Empty);
		let out = TrieMutator.apply(&empty, &TrieOp::Delete("a".into()), &mut ids);
		assert_eq!(last_kind(&out), StepKind::Empty);
	}
}
