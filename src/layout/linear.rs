use super::{CELL_HEIGHT, CELL_WIDTH, MARGIN, NODE_RADIUS, Scene, Shape};
use crate::engine::ElementId;
use crate::structures::{HashTable, LinkedList, Queue, Stack};

const GAP: f64 = 40.0;

/// Nodes left to right from the head, each pointing at its successor.
pub fn linked_list(list: &LinkedList) -> Scene {
	let mut scene = Scene::new(480.0, 160.0);
	let y = MARGIN + 48.0;
	let step = 2.0 * NODE_RADIUS + GAP + 16.0;
	let ids = list.ids();

	scene.push(Shape::Text {
		x: MARGIN,
		y: MARGIN,
		text: "head".into(),
	});
	let mut prev: Option<(ElementId, f64)> = None;
	for (i, id) in ids.iter().enumerate() {
		let x = MARGIN + NODE_RADIUS + i as f64 * step;
		let label = list.node(*id).map(|n| n.value.to_string()).unwrap_or_default();
		if let Some((p, px)) = prev {
			scene.push(Shape::Edge {
				id: None,
				ends: Some((p, *id)),
				from: (px + NODE_RADIUS, y),
				to: (x - NODE_RADIUS, y),
				label: None,
				arrow: true,
			});
		}
		scene.push(Shape::Node {
			id: *id,
			x,
			y,
			label,
			marked: false,
		});
		prev = Some((*id, x));
	}
	let end_x = MARGIN + ids.len() as f64 * step;
	scene.push(Shape::Text {
		x: end_x,
		y: y + 4.0,
		text: "null".into(),
	});
	scene.fit();
	scene
}

/// Slots stacked upwards from the bottom, `capacity` cells tall.
pub fn stack(stack: &Stack, capacity: usize) -> Scene {
	let mut scene = Scene::new(240.0, 120.0);
	let rows = capacity.max(stack.len());
	let x = MARGIN + 48.0;
	let bottom = MARGIN + rows as f64 * CELL_HEIGHT;
	for row in 0..rows {
		let slot = stack.slots().get(row);
		scene.push(Shape::Cell {
			id: slot.map(|s| s.id),
			x,
			y: bottom - (row + 1) as f64 * CELL_HEIGHT,
			w: CELL_WIDTH * 1.5,
			h: CELL_HEIGHT,
			label: slot.map(|s| s.value.to_string()).unwrap_or_default(),
		});
	}
	if !stack.is_empty() {
		scene.push(Shape::Text {
			x: MARGIN,
			y: bottom - stack.len() as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0 + 4.0,
			text: "top".into(),
		});
	}
	scene.fit();
	scene
}

/// Slots left to right from the front, `capacity` cells wide.
pub fn queue(queue: &Queue, capacity: usize) -> Scene {
	let mut scene = Scene::new(320.0, 140.0);
	let columns = capacity.max(queue.len());
	let y = MARGIN + 24.0;
	let slots: Vec<_> = queue.slots().collect();
	for column in 0..columns {
		let slot = slots.get(column);
		scene.push(Shape::Cell {
			id: slot.map(|s| s.id),
			x: MARGIN + column as f64 * CELL_WIDTH,
			y,
			w: CELL_WIDTH,
			h: CELL_HEIGHT,
			label: slot.map(|s| s.value.to_string()).unwrap_or_default(),
		});
	}
	if !slots.is_empty() {
		let below = y + CELL_HEIGHT + 20.0;
		scene.push(Shape::Text {
			x: MARGIN + 8.0,
			y: below,
			text: "front".into(),
		});
		scene.push(Shape::Text {
			x: MARGIN + (slots.len() - 1) as f64 * CELL_WIDTH + 8.0,
			y: below + 16.0,
			text: "rear".into(),
		});
	}
	scene.fit();
	scene
}

/// One row per bucket: the index cell, then the chain in insertion order.
pub fn hash_table(table: &HashTable) -> Scene {
	let mut scene = Scene::new(480.0, 200.0);
	let rows = table.bucket_count();
	let row_height = CELL_HEIGHT + 8.0;
	for bucket in 0..rows {
		let y = MARGIN + bucket as f64 * row_height;
		scene.push(Shape::Cell {
			id: None,
			x: MARGIN,
			y,
			w: CELL_WIDTH * 0.75,
			h: CELL_HEIGHT,
			label: bucket.to_string(),
		});
		let mut prev_x = MARGIN + CELL_WIDTH * 0.75;
		for (i, id) in table.chain(bucket).iter().enumerate() {
			let x = MARGIN + CELL_WIDTH * 0.75 + GAP + i as f64 * (CELL_WIDTH + GAP);
			scene.push(Shape::Edge {
				id: None,
				ends: None,
				from: (prev_x, y + CELL_HEIGHT / 2.0),
				to: (x, y + CELL_HEIGHT / 2.0),
				label: None,
				arrow: true,
			});
			scene.push(Shape::Cell {
				id: Some(*id),
				x,
				y,
				w: CELL_WIDTH,
				h: CELL_HEIGHT,
				label: table.value(*id).map(|v| v.to_string()).unwrap_or_default(),
			});
			prev_x = x + CELL_WIDTH;
		}
	}
	scene.fit();
	scene
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::{CounterIds, Mutator};
	use crate::structures::{HashSetConfig, ListMutator, QueueConfig, StackConfig};

	fn build<M: Mutator>(m: &M) -> M::Snapshot {
		let mut ids = CounterIds::new();
		let mut snapshot = m.empty();
		for op in m.sample() {
			snapshot = m.apply(&snapshot, &op, &mut ids).snapshot;
		}
		snapshot
	}

	#[test]
	fn list_draws_one_arrow_between_neighbours() {
		let list = build(&ListMutator);
		let scene = linked_list(&list);
		assert_eq!(scene.nodes(), 4);
		assert_eq!(scene.edges(), 3);
		let ids = list.ids();
		let (x0, _) = scene.position(ids[0]).unwrap();
		let (x1, _) = scene.position(ids[1]).unwrap();
		assert!(x0 < x1);
	}

	#[test]
	fn stack_and_queue_reserve_capacity() {
		let s = build(&StackConfig::default());
		let scene = stack(&s, 8);
		let cells = scene
			.shapes
			.iter()
			.filter(|s| matches!(s, Shape::Cell { .. }))
			.count();
		assert_eq!(cells, 8);

		let q = build(&QueueConfig::default());
		let scene = queue(&q, 4);
		let bound = scene.shapes.iter().filter(|s| s.id().is_some()).count();
		assert_eq!(bound, 3);
	}

	#[test]
	fn hash_rows_follow_bucket_count() {
		let cfg = HashSetConfig::default();
		let scene = hash_table(&cfg.empty());
		assert_eq!(scene.shapes.len(), 10);

		let table = build(&cfg);
		let scene = hash_table(&table);
		// 10 index cells plus 5 entries, each with its arrow.
		assert_eq!(scene.shapes.len(), 10 + 5 * 2);
	}
}
