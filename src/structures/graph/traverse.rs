use std::collections::{BTreeSet, VecDeque};

use super::Graph;
use crate::engine::{AuxView, ElementId, Step, StepKind, StepRecorder};

/// Breadth-first search. Nodes are marked when queued, so a node that is
/// already visited or waiting in the queue is never queued twice.
/// Returns the visiting order.
pub fn bfs(graph: &Graph, start: ElementId, directed: bool, rec: &mut StepRecorder) -> Vec<ElementId> {
	let mut queue = VecDeque::from([start]);
	let mut discovered = BTreeSet::from([start]);
	let mut order = Vec::new();
	let view = |q: &VecDeque<ElementId>| AuxView::Queue(q.iter().map(|id| graph.label(*id).to_string()).collect());

	rec.push(
		Step::new(StepKind::Enqueue, format!("Enqueue start node {}", graph.label(start)))
			.with_focus(start)
			.with_aux(view(&queue)),
	);
	while let Some(node) = queue.pop_front() {
		order.push(node);
		rec.push(
			Step::new(StepKind::Visit, format!("Dequeue and visit {}", graph.label(node)))
				.with_focus(node)
				.with_visited(&order)
				.with_aux(view(&queue)),
		);
		for (next, _, _) in graph.neighbors(node, directed) {
			if !discovered.insert(next) {
				rec.push(
					Step::new(
						StepKind::Compare,
						format!("{} already visited or queued, skip", graph.label(next)),
					)
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(view(&queue)),
				);
				continue;
			}
			queue.push_back(next);
			rec.push(
				Step::new(StepKind::Enqueue, format!("Enqueue neighbour {}", graph.label(next)))
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(view(&queue)),
			);
		}
	}
	rec.push(
		Step::new(
			StepKind::Done,
			format!("BFS order: {}", graph.labels(&order).join(", ")),
		)
		.with_visited(&order),
	);
	order
}

/// Depth-first search with an explicit stack. Neighbours are pushed in
/// reverse so they pop in edge order; nodes already visited or already on
/// the stack are not pushed again. Returns the visiting order.
pub fn dfs(graph: &Graph, start: ElementId, directed: bool, rec: &mut StepRecorder) -> Vec<ElementId> {
	let mut stack = vec![start];
	let mut visited = BTreeSet::new();
	let mut order = Vec::new();
	let view = |s: &[ElementId]| AuxView::Stack(s.iter().map(|id| graph.label(*id).to_string()).collect());

	rec.push(
		Step::new(StepKind::Push, format!("Push start node {}", graph.label(start)))
			.with_focus(start)
			.with_aux(view(&stack)),
	);
	while let Some(node) = stack.pop() {
		if !visited.insert(node) {
			rec.push(
				Step::new(StepKind::Pop, format!("{} already visited, skip", graph.label(node)))
					.with_focus(node)
					.with_visited(&order)
					.with_aux(view(&stack)),
			);
			continue;
		}
		order.push(node);
		rec.push(
			Step::new(StepKind::Visit, format!("Pop and visit {}", graph.label(node)))
				.with_focus(node)
				.with_visited(&order)
				.with_aux(view(&stack)),
		);
		for (next, _, _) in graph.neighbors(node, directed).into_iter().rev() {
			if visited.contains(&next) || stack.contains(&next) {
				rec.push(
					Step::new(
						StepKind::Compare,
						format!("{} already visited or stacked, skip", graph.label(next)),
					)
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(view(&stack)),
				);
				continue;
			}
			stack.push(next);
			rec.push(
				Step::new(StepKind::Push, format!("Push neighbour {}", graph.label(next)))
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(view(&stack)),
			);
		}
	}
	rec.push(
		Step::new(
			StepKind::Done,
			format!("DFS order: {}", graph.labels(&order).join(", ")),
		)
		.with_visited(&order),
	);
	order
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::structures::graph::tests::sample_graph;

	#[test]
	fn bfs_visits_level_by_level() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let order = bfs(&graph, graph.find("A").unwrap(), false, &mut rec);
		assert_eq!(graph.labels(&order), vec!["A", "B", "D", "C", "E", "F"]);
		let steps = rec.finish("unused");
		assert_eq!(steps.last().unwrap().description, "BFS order: A, B, D, C, E, F");
	}

	#[test]
	fn dfs_follows_edge_order() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let order = dfs(&graph, graph.find("A").unwrap(), false, &mut rec);
		assert_eq!(graph.labels(&order), vec!["A", "B", "C", "F", "E", "D"]);
	}

	#[test]
	fn directed_traversal_only_follows_outgoing_edges() {
		let graph = sample_graph(true);
		let mut rec = StepRecorder::new();
		let order = bfs(&graph, graph.find("D").unwrap(), true, &mut rec);
		assert_eq!(graph.labels(&order), vec!["D", "E", "F"]);
	}
}
