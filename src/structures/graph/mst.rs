//! Minimum spanning trees. Edges are treated as undirected here whatever
//! the graph configuration says.

use std::collections::{BTreeMap, BTreeSet};

use super::Graph;
use crate::engine::{AuxView, ElementId, Step, StepKind, StepRecorder};

/// Prim's algorithm grown from `start`. Returns the chosen edge ids.
pub fn prim(graph: &Graph, start: ElementId, rec: &mut StepRecorder) -> Vec<ElementId> {
	let mut visited = BTreeSet::from([start]);
	let mut order = vec![start];
	let mut tree: Vec<ElementId> = Vec::new();

	rec.push(
		Step::new(StepKind::Visit, format!("Start the tree at {}", graph.label(start)))
			.with_focus(start)
			.with_visited(&order)
			.with_aux(AuxView::EdgeSet(Vec::new())),
	);

	while visited.len() < graph.node_count() {
		// Cheapest edge with exactly one endpoint inside the tree; the
		// first one in edge order wins ties.
		let crossing = graph
			.edges()
			.iter()
			.enumerate()
			.filter(|(_, (_, e))| visited.contains(&e.from) != visited.contains(&e.to))
			.min_by_key(|(pos, (_, e))| (e.weight, *pos))
			.map(|(_, entry)| entry);
		let Some((edge_id, edge)) = crossing else {
			rec.push(
				Step::new(
					StepKind::Info,
					"No edge crosses the cut: the graph is disconnected",
				)
				.with_visited(&order)
				.with_aux(AuxView::EdgeSet(tree.clone())),
			);
			break;
		};
		let inside = if visited.contains(&edge.from) { edge.from } else { edge.to };
		let added = edge.other(inside);
		tree.push(*edge_id);
		visited.insert(added);
		order.push(added);
		rec.push(
			Step::new(
				StepKind::SelectEdge,
				format!(
					"Cheapest crossing edge {}-{} ({}): add {}",
					graph.label(inside),
					graph.label(added),
					edge.weight,
					graph.label(added)
				),
			)
			.with_focus(*edge_id)
			.with_pair(inside, added)
			.with_visited(&order)
			.with_aux(AuxView::EdgeSet(tree.clone())),
		);
	}

	rec.push(
		Step::new(
			StepKind::Done,
			format!(
				"Prim's MST: {} edges, total weight {}",
				tree.len(),
				graph.total_weight(&tree)
			),
		)
		.with_visited(&order)
		.with_aux(AuxView::EdgeSet(tree.clone())),
	);
	tree
}

/// Union-find over node positions.
struct Components {
	parent: Vec<usize>,
}

impl Components {
	fn new(n: usize) -> Self {
		Self {
			parent: (0..n).collect(),
		}
	}

	fn find(&mut self, mut x: usize) -> usize {
		while self.parent[x] != x {
			self.parent[x] = self.parent[self.parent[x]];
			x = self.parent[x];
		}
		x
	}

	/// Merge the sets of `a` and `b`; false if they were already one set.
	fn union(&mut self, a: usize, b: usize) -> bool {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra == rb {
			return false;
		}
		let (keep, drop) = if ra < rb { (ra, rb) } else { (rb, ra) };
		self.parent[drop] = keep;
		true
	}

	fn count(&mut self) -> usize {
		(0..self.parent.len()).filter(|&x| self.find(x) == x).count()
	}

	fn groups(&mut self, graph: &Graph, nodes: &[ElementId]) -> Vec<Vec<String>> {
		let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
		for (i, id) in nodes.iter().enumerate() {
			let root = self.find(i);
			groups.entry(root).or_default().push(graph.label(*id).to_string());
		}
		groups.into_values().collect()
	}
}

/// Boruvka's algorithm. Returns the chosen edge ids; on a disconnected
/// graph this is a spanning forest.
pub fn boruvka(graph: &Graph, rec: &mut StepRecorder) -> Vec<ElementId> {
	let nodes = graph.node_ids();
	let index: BTreeMap<ElementId, usize> = nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
	let mut sets = Components::new(nodes.len());
	let mut tree: Vec<ElementId> = Vec::new();
	let mut round = 0;

	rec.push(
		Step::new(StepKind::Info, "Every node starts as its own component")
			.with_aux(AuxView::Components(sets.groups(graph, &nodes))),
	);

	while sets.count() > 1 {
		round += 1;
		// Cheapest crossing edge per component root, first in edge order on ties.
		let mut cheapest: BTreeMap<usize, usize> = BTreeMap::new();
		for (pos, (_, edge)) in graph.edges().iter().enumerate() {
			let (Some(&u), Some(&v)) = (index.get(&edge.from), index.get(&edge.to)) else {
				continue;
			};
			let (cu, cv) = (sets.find(u), sets.find(v));
			if cu == cv {
				continue;
			}
			for c in [cu, cv] {
				let better = cheapest
					.get(&c)
					.is_none_or(|&best| edge.weight < graph.edges()[best].1.weight);
				if better {
					cheapest.insert(c, pos);
				}
			}
		}

		let mut picks: Vec<usize> = cheapest.into_values().collect();
		picks.sort_unstable();
		picks.dedup();
		rec.push(Step::new(
			StepKind::Info,
			format!(
				"Round {round}: {} components pick {} cheapest edges",
				sets.count(),
				picks.len()
			),
		)
		.with_aux(AuxView::Components(sets.groups(graph, &nodes))));

		let mut merged = false;
		for pos in picks {
			let (edge_id, edge) = graph.edges()[pos];
			let (u, v) = (index[&edge.from], index[&edge.to]);
			if !sets.union(u, v) {
				continue;
			}
			merged = true;
			tree.push(edge_id);
			rec.push(
				Step::new(
					StepKind::Merge,
					format!(
						"Add {}-{} ({}) and merge their components",
						graph.label(edge.from),
						graph.label(edge.to),
						edge.weight
					),
				)
				.with_focus(edge_id)
				.with_pair(edge.from, edge.to)
				.with_aux(AuxView::EdgeSet(tree.clone())),
			);
		}
		if !merged {
			rec.push(
				Step::new(StepKind::Info, "No edge joins two components: the graph is disconnected")
					.with_aux(AuxView::Components(sets.groups(graph, &nodes))),
			);
			break;
		}
	}

	rec.push(
		Step::new(
			StepKind::Done,
			format!(
				"Boruvka's MST: {} edges, total weight {}",
				tree.len(),
				graph.total_weight(&tree)
			),
		)
		.with_aux(AuxView::EdgeSet(tree.clone())),
	);
	tree
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::{CounterIds, Mutator};
	use crate::structures::graph::tests::sample_graph;
	use crate::structures::graph::{GraphConfig, GraphOp};

	fn edge_names(graph: &Graph, edges: &[ElementId]) -> Vec<String> {
		let mut names: Vec<String> = edges
			.iter()
			.filter_map(|id| graph.edge(*id))
			.map(|e| format!("{}{}", graph.label(e.from), graph.label(e.to)))
			.collect();
		names.sort();
		names
	}

	#[test]
	fn prim_on_sample_graph() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let tree = prim(&graph, graph.find("A").unwrap(), &mut rec);
		assert_eq!(edge_names(&graph, &tree), vec!["AB", "AD", "BC", "BE", "EF"]);
		assert_eq!(graph.total_weight(&tree), 12);
	}

	#[test]
	fn boruvka_agrees_with_prim() {
		let graph = sample_graph(false);
		let mut rec = StepRecorder::new();
		let tree = boruvka(&graph, &mut rec);
		assert_eq!(edge_names(&graph, &tree), vec!["AB", "AD", "BC", "BE", "EF"]);
		let rounds = rec
			.finish("unused")
			.iter()
			.filter(|s| s.description.starts_with("Round"))
			.count();
		assert_eq!(rounds, 2);
	}

	#[test]
	fn disconnected_graph_yields_forest() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::starting_after(ElementId::from_raw(100));
		let mut graph = sample_graph(false);
		for op in [
			GraphOp::AddNode("X".into()),
			GraphOp::AddNode("Y".into()),
			GraphOp::AddEdge {
				from: "X".into(),
				to: "Y".into(),
				weight: 3,
			},
		] {
			graph = cfg.apply(&graph, &op, &mut ids).snapshot;
		}
		assert_eq!(graph.node_count(), 8);
		let mut rec = StepRecorder::new();
		assert_eq!(boruvka(&graph, &mut rec).len(), 6);

		let mut rec = StepRecorder::new();
		let tree = prim(&graph, graph.find("X").unwrap(), &mut rec);
		assert_eq!(tree.len(), 1);
		let steps = rec.finish("unused");
		assert!(steps.iter().any(|s| s.description.contains("disconnected")));
	}

	#[test]
	fn total_weight_saturates() {
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
		let tree = prim(&graph, graph.find("A").unwrap(), &mut rec);
		assert_eq!(tree.len(), 2);
		assert_eq!(graph.total_weight(&tree), u64::MAX);
		let steps = rec.finish("unused");
		assert_eq!(
			steps.last().unwrap().description,
			format!("Prim's MST: 2 edges, total weight {}", u64::MAX)
		);
	}
}
