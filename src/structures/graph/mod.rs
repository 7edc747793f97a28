//! Weighted graph plus the traversal, shortest-path and spanning-tree
//! algorithms that narrate over it.

mod mst;
mod paths;
mod traverse;

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{Arena, ElementId, IdSource, Mutation, Mutator, Step, StepKind, StepRecorder};

pub use mst::{boruvka, prim};
pub use paths::{dijkstra, floyd_warshall};
pub use traverse::{bfs, dfs};

/// A labelled vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique name.
	pub label: String,
}

/// A weighted edge between two node ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Source, or either end when undirected.
	pub from: ElementId,
	/// Target, or the other end when undirected.
	pub to: ElementId,
	/// Non-negative cost.
	pub weight: u64,
}

impl GraphEdge {
	/// The endpoint opposite `node`.
	pub fn other(&self, node: ElementId) -> ElementId {
		if self.from == node { self.to } else { self.from }
	}
}

/// Nodes by id in creation order; edges in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
	nodes: BTreeMap<ElementId, GraphNode>,
	edges: Vec<(ElementId, GraphEdge)>,
}

impl Graph {
	/// Node by id.
	pub fn node(&self, id: ElementId) -> Option<&GraphNode> {
		self.nodes.get(&id)
	}

	/// Node ids in creation order.
	pub fn node_ids(&self) -> Vec<ElementId> {
		self.nodes.keys().copied().collect()
	}

	/// Nodes in creation order.
	pub fn nodes(&self) -> impl Iterator<Item = (ElementId, &GraphNode)> {
		self.nodes.iter().map(|(id, n)| (*id, n))
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[(ElementId, GraphEdge)] {
		&self.edges
	}

	/// Edge by id.
	pub fn edge(&self, id: ElementId) -> Option<&GraphEdge> {
		self.edges.iter().find(|(e, _)| *e == id).map(|(_, edge)| edge)
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node id for `label`.
	pub fn find(&self, label: &str) -> Option<ElementId> {
		self.nodes
			.iter()
			.find(|(_, n)| n.label == label)
			.map(|(id, _)| *id)
	}

	/// Label of `id`, or `?` for an unknown id.
	pub fn label(&self, id: ElementId) -> &str {
		self.node(id).map_or("?", |n| n.label.as_str())
	}

	/// Labels of `ids`, in the same order.
	pub fn labels(&self, ids: &[ElementId]) -> Vec<String> {
		ids.iter().map(|id| self.label(*id).to_string()).collect()
	}

	/// `(neighbour, edge id, weight)` in edge insertion order.
	pub fn neighbors(&self, node: ElementId, directed: bool) -> Vec<(ElementId, ElementId, u64)> {
		self.edges
			.iter()
			.filter_map(|(id, e)| {
				if e.from == node {
					Some((e.to, *id, e.weight))
				} else if !directed && e.to == node {
					Some((e.from, *id, e.weight))
				} else {
					None
				}
			})
			.collect()
	}

	/// Edge joining `from` and `to`; either direction when undirected.
	pub fn find_edge(&self, from: ElementId, to: ElementId, directed: bool) -> Option<ElementId> {
		self.edges
			.iter()
			.find(|(_, e)| {
				(e.from == from && e.to == to) || (!directed && e.from == to && e.to == from)
			})
			.map(|(id, _)| *id)
	}

	/// Sum of the weights of `edges`, saturating at `u64::MAX`.
	pub fn total_weight(&self, edges: &[ElementId]) -> u64 {
		edges
			.iter()
			.filter_map(|id| self.edge(*id))
			.fold(0u64, |total, e| total.saturating_add(e.weight))
	}
}

impl Arena for Graph {
	fn resolves(&self, id: ElementId) -> bool {
		self.nodes.contains_key(&id) || self.edges.iter().any(|(e, _)| *e == id)
	}
}

/// Graph edits and algorithms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphOp {
	/// Add a node with a new label.
	AddNode(String),
	/// Add an edge, or reweight an existing one.
	AddEdge {
		/// Label of the first end.
		from: String,
		/// Label of the second end.
		to: String,
		/// Edge cost.
		weight: u64,
	},
	/// Remove a node and every edge touching it.
	RemoveNode(String),
	/// Remove one edge.
	RemoveEdge {
		/// Label of the first end.
		from: String,
		/// Label of the second end.
		to: String,
	},
	/// Breadth-first search from a label.
	Bfs(String),
	/// Depth-first search from a label.
	Dfs(String),
	/// Single-source shortest paths from a label.
	Dijkstra(String),
	/// Prim's spanning tree grown from a label.
	Prim(String),
	/// Boruvka's spanning tree.
	Boruvka,
	/// All-pairs shortest paths.
	FloydWarshall,
}

impl fmt::Display for GraphOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GraphOp::AddNode(l) => write!(f, "Add node {l}"),
			GraphOp::AddEdge { from, to, weight } => write!(f, "Add edge {from}-{to} ({weight})"),
			GraphOp::RemoveNode(l) => write!(f, "Remove node {l}"),
			GraphOp::RemoveEdge { from, to } => write!(f, "Remove edge {from}-{to}"),
			GraphOp::Bfs(s) => write!(f, "BFS from {s}"),
			GraphOp::Dfs(s) => write!(f, "DFS from {s}"),
			GraphOp::Dijkstra(s) => write!(f, "Dijkstra from {s}"),
			GraphOp::Prim(s) => write!(f, "Prim's MST from {s}"),
			GraphOp::Boruvka => f.write_str("Boruvka's MST"),
			GraphOp::FloydWarshall => f.write_str("Floyd-Warshall"),
		}
	}
}

/// Mutator for [`Graph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphConfig {
	/// Whether edges only run from `from` to `to`.
	pub directed: bool,
}

impl GraphConfig {
	/// Resolve a start label, recording why the algorithm cannot run.
	fn start(&self, graph: &Graph, label: &str, rec: &mut StepRecorder) -> Option<ElementId> {
		if graph.is_empty() {
			rec.note(StepKind::Empty, "Graph is empty");
			return None;
		}
		let found = graph.find(label);
		if found.is_none() {
			rec.note(StepKind::NotFound, format!("No node named {label}"));
		}
		found
	}
}

impl Mutator for GraphConfig {
	type Snapshot = Graph;
	type Op = GraphOp;

	fn apply(&self, graph: &Graph, op: &GraphOp, ids: &mut dyn IdSource) -> Mutation<Graph> {
		let mut rec = StepRecorder::new();
		let directed = self.directed;
		let next = match op {
			GraphOp::AddNode(label) => add_node(graph, label, ids, &mut rec),
			GraphOp::AddEdge { from, to, weight } => {
				add_edge(graph, from, to, *weight, directed, ids, &mut rec)
			}
			GraphOp::RemoveNode(label) => remove_node(graph, label, &mut rec),
			GraphOp::RemoveEdge { from, to } => remove_edge(graph, from, to, directed, &mut rec),
			GraphOp::Bfs(start) => {
				if let Some(s) = self.start(graph, start, &mut rec) {
					bfs(graph, s, directed, &mut rec);
				}
				None
			}
			GraphOp::Dfs(start) => {
				if let Some(s) = self.start(graph, start, &mut rec) {
					dfs(graph, s, directed, &mut rec);
				}
				None
			}
			GraphOp::Dijkstra(start) => {
				if let Some(s) = self.start(graph, start, &mut rec) {
					dijkstra(graph, s, directed, &mut rec);
				}
				None
			}
			GraphOp::Prim(start) => {
				if let Some(s) = self.start(graph, start, &mut rec) {
					prim(graph, s, &mut rec);
				}
				None
			}
			GraphOp::Boruvka => {
				if graph.is_empty() {
					rec.note(StepKind::Empty, "Graph is empty");
				} else {
					boruvka(graph, &mut rec);
				}
				None
			}
			GraphOp::FloydWarshall => {
				if graph.is_empty() {
					rec.note(StepKind::Empty, "Graph is empty");
				} else {
					floyd_warshall(graph, directed, &mut rec);
				}
				None
			}
		};
		Mutation::new(next.unwrap_or_else(|| graph.clone()), rec.finish("Nothing to do"))
	}

	fn sample(&self) -> Vec<GraphOp> {
		let mut ops: Vec<GraphOp> = ["A", "B", "C", "D", "E", "F"]
			.into_iter()
			.map(|l| GraphOp::AddNode(l.to_string()))
			.collect();
		for (from, to, weight) in [
			("A", "B", 4),
			("A", "D", 2),
			("B", "C", 3),
			("B", "E", 1),
			("C", "F", 5),
			("D", "E", 7),
			("E", "F", 2),
		] {
			ops.push(GraphOp::AddEdge {
				from: from.to_string(),
				to: to.to_string(),
				weight,
			});
		}
		ops
	}
}

fn add_node(graph: &Graph, label: &str, ids: &mut dyn IdSource, rec: &mut StepRecorder) -> Option<Graph> {
	if let Some(existing) = graph.find(label) {
		rec.focus(StepKind::Duplicate, existing, format!("Node {label} already exists"));
		return None;
	}
	let mut next = graph.clone();
	let id = ids.next_id();
	next.nodes.insert(
		id,
		GraphNode {
			label: label.to_string(),
		},
	);
	rec.focus(StepKind::Insert, id, format!("Added node {label}"));
	Some(next)
}

fn add_edge(
	graph: &Graph,
	from: &str,
	to: &str,
	weight: u64,
	directed: bool,
	ids: &mut dyn IdSource,
	rec: &mut StepRecorder,
) -> Option<Graph> {
	let (Some(a), Some(b)) = (graph.find(from), graph.find(to)) else {
		let missing = if graph.find(from).is_none() { from } else { to };
		rec.note(StepKind::NotFound, format!("No node named {missing}"));
		return None;
	};
	if a == b {
		rec.focus(StepKind::Info, a, "Self-loops are not supported");
		return None;
	}
	let mut next = graph.clone();
	match graph.find_edge(a, b, directed) {
		Some(edge_id) => {
			if let Some((_, edge)) = next.edges.iter_mut().find(|(e, _)| *e == edge_id) {
				edge.weight = weight;
			}
			rec.push(
				Step::new(
					StepKind::Link,
					format!("Edge {from}-{to} exists: weight set to {weight}"),
				)
				.with_focus(edge_id)
				.with_pair(a, b),
			);
		}
		None => {
			let edge_id = ids.next_id();
			next.edges.push((edge_id, GraphEdge { from: a, to: b, weight }));
			rec.push(
				Step::new(
					StepKind::Link,
					format!("Added edge {from}-{to} with weight {weight}"),
				)
				.with_focus(edge_id)
				.with_pair(a, b),
			);
		}
	}
	Some(next)
}

fn remove_node(graph: &Graph, label: &str, rec: &mut StepRecorder) -> Option<Graph> {
	let Some(id) = graph.find(label) else {
		rec.note(StepKind::NotFound, format!("No node named {label}"));
		return None;
	};
	let mut next = graph.clone();
	for (edge_id, edge) in graph.edges.iter().filter(|(_, e)| e.from == id || e.to == id) {
		rec.push(
			Step::new(
				StepKind::Remove,
				format!("Drop edge {}-{}", graph.label(edge.from), graph.label(edge.to)),
			)
			.with_focus(*edge_id)
			.with_pair(edge.from, edge.to),
		);
	}
	next.edges.retain(|(_, e)| e.from != id && e.to != id);
	next.nodes.remove(&id);
	rec.focus(StepKind::Remove, id, format!("Removed node {label}"));
	Some(next)
}

fn remove_edge(graph: &Graph, from: &str, to: &str, directed: bool, rec: &mut StepRecorder) -> Option<Graph> {
	let edge = graph
		.find(from)
		.zip(graph.find(to))
		.and_then(|(a, b)| graph.find_edge(a, b, directed));
	let Some(edge_id) = edge else {
		rec.note(StepKind::NotFound, format!("No edge {from}-{to}"));
		return None;
	};
	let mut next = graph.clone();
	next.edges.retain(|(e, _)| *e != edge_id);
	rec.focus(StepKind::Remove, edge_id, format!("Removed edge {from}-{to}"));
	Some(next)
}

#[cfg(test)]
pub(crate) mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::CounterIds;

	pub(crate) fn sample_graph(directed: bool) -> Graph {
		let cfg = GraphConfig { directed };
		let mut ids = CounterIds::new();
		let mut graph = Graph::default();
		for op in cfg.sample() {
			graph = cfg.apply(&graph, &op, &mut ids).snapshot;
		}
		graph
	}

	#[test]
	fn sample_has_six_nodes_and_seven_edges() {
		let graph = sample_graph(false);
		assert_eq!(graph.node_count(), 6);
		assert_eq!(graph.edges().len(), 7);
		let a = graph.find("A").unwrap();
		let neighbours: Vec<String> = graph
			.neighbors(a, false)
			.into_iter()
			.map(|(n, _, _)| graph.label(n).to_string())
			.collect();
		assert_eq!(neighbours, vec!["B", "D"]);
	}

	#[test]
	fn directed_neighbours_are_outgoing_only() {
		let graph = sample_graph(true);
		let e = graph.find("E").unwrap();
		let out: Vec<&str> = graph
			.neighbors(e, true)
			.into_iter()
			.map(|(n, _, _)| graph.label(n))
			.collect();
		assert_eq!(out, vec!["F"]);
	}

	#[test]
	fn edge_updates_and_duplicates() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::starting_after(ElementId::from_raw(100));
		let graph = sample_graph(false);

		let dup = cfg.apply(&graph, &GraphOp::AddNode("A".into()), &mut ids);
		assert_eq!(dup.snapshot, graph);
		assert_eq!(dup.steps.last().unwrap().kind, StepKind::Duplicate);

		let reweighted = cfg.apply(
			&graph,
			&GraphOp::AddEdge {
				from: "B".into(),
				to: "A".into(),
				weight: 9,
			},
			&mut ids,
		);
		assert_eq!(reweighted.snapshot.edges().len(), 7);
		assert_eq!(reweighted.snapshot.edges()[0].1.weight, 9);

		let missing = cfg.apply(
			&graph,
			&GraphOp::AddEdge {
				from: "A".into(),
				to: "Z".into(),
				weight: 1,
			},
			&mut ids,
		);
		assert_eq!(missing.steps.last().unwrap().description, "No node named Z");
	}

	#[test]
	fn removing_a_node_drops_incident_edges() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::starting_after(ElementId::from_raw(100));
		let graph = sample_graph(false);
		let out = cfg.apply(&graph, &GraphOp::RemoveNode("E".into()), &mut ids);
		assert_eq!(out.snapshot.node_count(), 5);
		assert_eq!(out.snapshot.edges().len(), 4);

		let out = cfg.apply(
			&graph,
			&GraphOp::RemoveEdge {
				from: "F".into(),
				to: "C".into(),
			},
			&mut ids,
		);
		assert_eq!(out.snapshot.edges().len(), 6);
	}

	#[test]
	fn algorithms_on_empty_graph_report_empty() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::new();
		for op in [GraphOp::Bfs("A".into()), GraphOp::Boruvka, GraphOp::FloydWarshall] {
			let out = cfg.apply(&Graph::default(), &op, &mut ids);
			assert_eq!(out.steps.last().unwrap().kind, StepKind::Empty);
		}
	}
}
