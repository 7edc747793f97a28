use std::collections::BTreeMap;

use super::{CELL_HEIGHT, CELL_WIDTH, MARGIN, NODE_RADIUS, Scene, Shape};
use crate::engine::ElementId;
use crate::structures::{Heap, TraversalOrder, Tree, Trie};

const COLUMN: f64 = 48.0;
const LEVEL: f64 = 72.0;

fn at(column: f64, depth: usize) -> (f64, f64) {
	(
		MARGIN + NODE_RADIUS + column * COLUMN,
		MARGIN + NODE_RADIUS + depth as f64 * LEVEL,
	)
}

fn link(scene: &mut Scene, parent: (ElementId, (f64, f64)), child: (ElementId, (f64, f64))) {
	scene.push(Shape::Edge {
		id: None,
		ends: Some((parent.0, child.0)),
		from: parent.1,
		to: child.1,
		label: None,
		arrow: false,
	});
}

/// Binary search tree: x from the in-order rank, y from the depth, so
/// no two nodes share a column.
pub fn tree(tree: &Tree) -> Scene {
	let mut scene = Scene::new(480.0, 240.0);
	let rank: BTreeMap<ElementId, usize> = tree
		.traversal(TraversalOrder::InOrder)
		.into_iter()
		.enumerate()
		.map(|(i, id)| (id, i))
		.collect();

	let mut positions = BTreeMap::new();
	let mut stack: Vec<(ElementId, usize)> = tree.root().into_iter().map(|r| (r, 0)).collect();
	while let Some((id, depth)) = stack.pop() {
		let Some(node) = tree.node(id) else {
			continue;
		};
		let column = rank.get(&id).copied().unwrap_or_default();
		positions.insert(id, at(column as f64, depth));
		stack.extend(node.right.map(|c| (c, depth + 1)));
		stack.extend(node.left.map(|c| (c, depth + 1)));
	}

	for (id, node) in tree.nodes() {
		let Some(&from) = positions.get(&id) else {
			continue;
		};
		for child in [node.left, node.right].into_iter().flatten() {
			if let Some(&to) = positions.get(&child) {
				link(&mut scene, (id, from), (child, to));
			}
		}
	}
	for (id, (x, y)) in &positions {
		scene.push(Shape::Node {
			id: *id,
			x: *x,
			y: *y,
			label: tree.value(*id).map(|v| v.to_string()).unwrap_or_default(),
			marked: false,
		});
	}
	scene.fit();
	scene
}

/// Heap as the implicit complete tree over its array, with the array
/// itself drawn underneath.
pub fn heap(heap: &Heap) -> Scene {
	let mut scene = Scene::new(480.0, 240.0);
	let slots = heap.slots();
	let depth_of = |i: usize| (usize::BITS - (i + 1).leading_zeros() - 1) as usize;
	let levels = slots.len().checked_sub(1).map_or(0, |last| depth_of(last) + 1);
	let width = 1usize << levels.saturating_sub(1);

	let position = |i: usize| {
		let depth = depth_of(i);
		let first = (1usize << depth) - 1;
		let span = width as f64 / (1usize << depth) as f64;
		at((i - first) as f64 * span + span / 2.0 - 0.5, depth)
	};

	for i in 1..slots.len() {
		if let Some(p) = Heap::parent(i) {
			link(&mut scene, (slots[p].id, position(p)), (slots[i].id, position(i)));
		}
	}
	for (i, slot) in slots.iter().enumerate() {
		let (x, y) = position(i);
		scene.push(Shape::Node {
			id: slot.id,
			x,
			y,
			label: slot.value.to_string(),
			marked: i == 0,
		});
	}

	let row = MARGIN + levels as f64 * LEVEL + 16.0;
	for (i, slot) in slots.iter().enumerate() {
		scene.push(Shape::Cell {
			id: Some(slot.id),
			x: MARGIN + i as f64 * CELL_WIDTH,
			y: row,
			w: CELL_WIDTH,
			h: CELL_HEIGHT,
			label: slot.value.to_string(),
		});
		scene.push(Shape::Text {
			x: MARGIN + i as f64 * CELL_WIDTH + CELL_WIDTH / 2.0 - 4.0,
			y: row + CELL_HEIGHT + 14.0,
			text: i.to_string(),
		});
	}
	scene.fit();
	scene
}

/// Trie with leaves spread left to right in key order and every inner
/// node centred over its children. End-of-word nodes are marked.
pub fn trie(trie: &Trie) -> Scene {
	fn place(
		trie: &Trie,
		id: ElementId,
		depth: usize,
		next_leaf: &mut usize,
		out: &mut BTreeMap<ElementId, (f64, usize)>,
	) -> f64 {
		let Some(node) = trie.node(id) else {
			return 0.0;
		};
		let column = if node.children.is_empty() {
			let c = *next_leaf as f64;
			*next_leaf += 1;
			c
		} else {
			let columns: Vec<f64> = node
				.children
				.values()
				.map(|child| place(trie, *child, depth + 1, next_leaf, out))
				.collect();
			let (first, last) = (columns[0], columns[columns.len() - 1]);
			(first + last) / 2.0
		};
		out.insert(id, (column, depth));
		column
	}

	let mut scene = Scene::new(480.0, 240.0);
	let Some(root) = trie.root() else {
		scene.fit();
		return scene;
	};
	let mut placed = BTreeMap::new();
	place(trie, root, 0, &mut 0, &mut placed);

	for (id, &(column, depth)) in &placed {
		let Some(node) = trie.node(*id) else {
			continue;
		};
		for child in node.children.values() {
			if let Some(&(c, d)) = placed.get(child) {
				link(&mut scene, (*id, at(column, depth)), (*child, at(c, d)));
			}
		}
	}
	for (id, &(column, depth)) in &placed {
		let Some(node) = trie.node(*id) else {
			continue;
		};
		let (x, y) = at(column, depth);
		scene.push(Shape::Node {
			id: *id,
			x,
			y,
			label: node.ch.map(String::from).unwrap_or_else(|| "*".into()),
			marked: node.terminal,
		});
	}
	scene.fit();
	scene
}
