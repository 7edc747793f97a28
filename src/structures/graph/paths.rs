use std::collections::{BTreeMap, BTreeSet};

use super::Graph;
use crate::engine::{AuxView, ElementId, Step, StepKind, StepRecorder};

/// Shortest distances from `start`, `None` for unreachable nodes, in node
/// order.
pub fn dijkstra(
	graph: &Graph,
	start: ElementId,
	directed: bool,
	rec: &mut StepRecorder,
) -> Vec<(String, Option<u64>)> {
	let nodes = graph.node_ids();
	let mut dist: BTreeMap<ElementId, Option<u64>> = nodes.iter().map(|id| (*id, None)).collect();
	dist.insert(start, Some(0));
	let mut done = BTreeSet::new();
	let mut order = Vec::new();
	let table = |dist: &BTreeMap<ElementId, Option<u64>>| {
		AuxView::Distances(
			nodes
				.iter()
				.map(|id| (graph.label(*id).to_string(), dist.get(id).copied().flatten()))
				.collect(),
		)
	};

	rec.push(
		Step::new(
			StepKind::Info,
			format!("Distance to {} is 0, every other node starts at infinity", graph.label(start)),
		)
		.with_focus(start)
		.with_aux(table(&dist)),
	);

	loop {
		// Linear scan: first unvisited node with the smallest finite distance.
		let mut best: Option<(ElementId, u64)> = None;
		for id in &nodes {
			if done.contains(id) {
				continue;
			}
			if let Some(d) = dist.get(id).copied().flatten() {
				if best.is_none_or(|(_, b)| d < b) {
					best = Some((*id, d));
				}
			}
		}
		let Some((node, d)) = best else {
			break;
		};
		done.insert(node);
		order.push(node);
		rec.push(
			Step::new(
				StepKind::Visit,
				format!("Closest unvisited node is {} at distance {d}", graph.label(node)),
			)
			.with_focus(node)
			.with_visited(&order)
			.with_aux(table(&dist)),
		);

		for (next, _, weight) in graph.neighbors(node, directed) {
			if done.contains(&next) {
				continue;
			}
			let Some(candidate) = d.checked_add(weight) else {
				rec.push(
					Step::new(
						StepKind::Compare,
						format!(
							"{}-{}: path length out of range, skipped",
							graph.label(node),
							graph.label(next)
						),
					)
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(table(&dist)),
				);
				continue;
			};
			let current = dist.get(&next).copied().flatten();
			if current.is_none_or(|c| candidate < c) {
				dist.insert(next, Some(candidate));
				rec.push(
					Step::new(
						StepKind::Relax,
						format!(
							"Relax {}-{}: {} improves {} to {candidate}",
							graph.label(node),
							graph.label(next),
							graph.label(next),
							current.map_or("infinity".to_string(), |c| c.to_string()),
						),
					)
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(table(&dist)),
				);
			} else {
				rec.push(
					Step::new(
						StepKind::Compare,
						format!(
							"{}-{}: {candidate} is no better than {}",
							graph.label(node),
							graph.label(next),
							current.unwrap_or_default()
						),
					)
					.with_pair(node, next)
					.with_visited(&order)
					.with_aux(table(&dist)),
				);
			}
		}
	}

	let result = match table(&dist) {
		AuxView::Distances(rows) => rows,
		_ => Vec::new(),
	};
	let summary: Vec<String> = result
		.iter()
		.map(|(label, d)| match d {
			Some(d) => format!("{label}:{d}"),
			None => format!("{label}:inf"),
		})
		.collect();
	rec.push(
		Step::new(StepKind::Done, format!("Shortest distances {}", summary.join(", ")))
			.with_visited(&order)
			.with_aux(table(&dist)),
	);
	result
}

/// All-pairs shortest distances. Row/column order is node order.
pub fn floyd_warshall(graph: &Graph, directed: bool, rec: &mut StepRecorder) -> Vec<Vec<Option<u64>>> {
	let nodes = graph.node_ids();
	let labels = graph.labels(&nodes);
	let index: BTreeMap<ElementId, usize> = nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
	let n = nodes.len();
	let mut dist = vec![vec![None; n]; n];
	for (i, row) in dist.iter_mut().enumerate() {
		row[i] = Some(0);
	}
	for (_, edge) in graph.edges() {
		let (Some(&i), Some(&j)) = (index.get(&edge.from), index.get(&edge.to)) else {
			continue;
		};
		let mut seed = |a: usize, b: usize| {
			if dist[a][b].is_none_or(|d: u64| edge.weight < d) {
				dist[a][b] = Some(edge.weight);
			}
		};
		seed(i, j);
		if !directed {
			seed(j, i);
		}
	}
	let matrix = |dist: &Vec<Vec<Option<u64>>>| AuxView::Matrix {
		labels: labels.clone(),
		cells: dist.clone(),
	};
	rec.push(Step::new(StepKind::Info, "Seed the matrix with direct edge weights").with_aux(matrix(&dist)));

	for k in 0..n {
		rec.push(
			Step::new(StepKind::Visit, format!("Allow paths through {}", labels[k]))
				.with_focus(nodes[k])
				.with_aux(matrix(&dist)),
		);
		for i in 0..n {
			let Some(ik) = dist[i][k] else {
				continue;
			};
			for j in 0..n {
				let Some(kj) = dist[k][j] else {
					continue;
				};
				let Some(through) = ik.checked_add(kj) else {
					continue;
				};
				if dist[i][j].is_none_or(|d| through < d) {
					dist[i][j] = Some(through);
					rec.push(
						Step::new(
							StepKind::Relax,
							format!(
								"{} -> {} via {}: {through}",
								labels[i], labels[j], labels[k]
							),
						)
						.with_focus(nodes[k])
						.with_pair(nodes[i], nodes[j])
						.with_aux(matrix(&dist)),
					);
				}
			}
		}
	}
	rec.push(Step::new(StepKind::Done, "All-pairs shortest distances computed").with_aux(matrix(&dist)));
	dist
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::{CounterIds, Mutator};
	use crate::structures::graph::tests::sample_graph;
	use crate::structures::graph::{GraphConfig, GraphOp};

	#[test]
	fn dijkstra_on_sample_graph() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let dist = dijkstra(&graph, graph.find("A").unwrap(), false, &mut rec);
		let expected: Vec<(String, Option<u64>)> = [("A", 0), ("B", 4), ("C", 7), ("D", 2), ("E", 5), ("F", 7)]
			.into_iter()
			.map(|(l, d)| (l.to_string(), Some(d)))
			.collect();
		assert_eq!(dist, expected);

		let steps = rec.finish("unused");
		assert_eq!(
			steps.last().unwrap().description,
			"Shortest distances A:0, B:4, C:7, D:2, E:5, F:7"
		);
		// E first gets 9 via D, then improves to 5 via B: two relaxations.
		let e = graph.find("E").unwrap();
		let relax_e = steps
			.iter()
			.filter(|s| s.kind == StepKind::Relax && s.pair.is_some_and(|(_, b)| b == e))
			.count();
		assert_eq!(relax_e, 2);
	}

	#[test]
	fn dijkstra_marks_unreachable_nodes() {
		let graph = sample_graph(true);
		let mut rec = StepRecorder::new();
		let dist = dijkstra(&graph, graph.find("F").unwrap(), true, &mut rec);
		assert!(dist.iter().filter(|(l, _)| l != "F").all(|(_, d)| d.is_none()));
	}

	#[test]
	fn floyd_warshall_matches_dijkstra() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let matrix = floyd_warshall(&graph, false, &mut rec);
		assert_eq!(
			matrix[0],
			vec![Some(0), Some(4), Some(7), Some(2), Some(5), Some(7)]
		);
		for i in 0..matrix.len() {
			for j in 0..matrix.len() {
				assert_eq!(matrix[i][j], matrix[j][i]);
			}
		}
	}

	#[test]
	fn floyd_warshall_directed_keeps_asymmetry() {
		let graph = sample_graph(true);
		let mut rec = StepRecorder::new();
		let matrix = floyd_warshall(&graph, true, &mut rec);
		// A reaches F (A-B-E-F = 7) but F reaches nothing.
		assert_eq!(matrix[0][5], Some(7));
		assert_eq!(matrix[5][0], None);
	}

	#[test]
	fn huge_weights_do_not_overflow() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::new();
		let mut graph = Graph::default();
		for op in [
			GraphOp::AddNode("A".into()),
			GraphOp::AddNode("B".into()),
			GraphOp::AddNode("C".into()),
			GraphOp::AddEdge {
				from: "A".into(),
				to: "B".into(),
				weight: u64::MAX,
			},
			GraphOp::AddEdge {
				from: "B".into(),
				to: "C".into(),
				weight: u64::MAX,
			},
		] {
			graph = cfg.apply(&graph, &op, &mut ids).snapshot;
		}

		let mut rec = StepRecorder::new();
		let dist = dijkstra(&graph, graph.find("A").unwrap(), false, &mut rec);
		assert_eq!(dist[1], ("B".to_string(), Some(u64::MAX)));
		assert_eq!(dist[2], ("C".to_string(), None));

		let mut rec = StepRecorder::new();
		let matrix = floyd_warshall(&graph, false, &mut rec);
		assert_eq!(matrix[0][1], Some(u64::MAX));
		assert_eq!(matrix[0][2], None);
	}
}
