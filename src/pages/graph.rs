use leptos::prelude::*;

use crate::components::visualizer::{Action, Binding, Field, input, visualizer};
use crate::engine::SpeedProfile;
use crate::layout::{self, LayoutParams, Scene};
use crate::structures::{Graph, GraphConfig, GraphOp};
use crate::validation::{ValidationError, parse_label, parse_weight};

struct GraphBinding;

fn start(values: &[String]) -> Result<String, ValidationError> {
	parse_label(input(values, 4), "start node")
}

impl Binding for GraphBinding {
	type Mutator = GraphConfig;

	const TITLE: &'static str = "Weighted Graph";
	const SUMMARY: &'static str = "Traversals, shortest paths and minimum spanning trees on a small weighted graph.";
	const SPEEDS: SpeedProfile = SpeedProfile::new(1400, 900, 450);
	const FIELDS: &'static [Field] = &[
		Field {
			label: "Node",
			placeholder: "label, e.g. G",
		},
		Field {
			label: "From",
			placeholder: "e.g. A",
		},
		Field {
			label: "To",
			placeholder: "e.g. F",
		},
		Field {
			label: "Weight",
			placeholder: "defaults to 1",
		},
		Field {
			label: "Start",
			placeholder: "e.g. A",
		},
	];
	const VARIANTS: &'static [&'static str] = &["Undirected", "Directed"];

	fn actions() -> Vec<Action<GraphOp>> {
		vec![
			Action {
				label: "Add node",
				build: |v| parse_label(input(v, 0), "node").map(GraphOp::AddNode),
			},
			Action {
				label: "Remove node",
				build: |v| parse_label(input(v, 0), "node").map(GraphOp::RemoveNode),
			},
			Action {
				label: "Add edge",
				build: |v| {
					Ok(GraphOp::AddEdge {
						from: parse_label(input(v, 1), "from")?,
						to: parse_label(input(v, 2), "to")?,
						weight: parse_weight(input(v, 3))?,
					})
				},
			},
			Action {
				label: "Remove edge",
				build: |v| {
					Ok(GraphOp::RemoveEdge {
						from: parse_label(input(v, 1), "from")?,
						to: parse_label(input(v, 2), "to")?,
					})
				},
			},
			Action {
				label: "BFS",
				build: |v| start(v).map(GraphOp::Bfs),
			},
			Action {
				label: "DFS",
				build: |v| start(v).map(GraphOp::Dfs),
			},
			Action {
				label: "Dijkstra",
				build: |v| start(v).map(GraphOp::Dijkstra),
			},
			Action {
				label: "Prim",
				build: |v| start(v).map(GraphOp::Prim),
			},
			Action {
				label: "Boruvka",
				build: |_| Ok(GraphOp::Boruvka),
			},
			Action {
				label: "Floyd-Warshall",
				build: |_| Ok(GraphOp::FloydWarshall),
			},
		]
	}

	fn configure(variant: &str) -> GraphConfig {
		GraphConfig {
			directed: variant == "Directed",
		}
	}

	fn scene(config: &GraphConfig, graph: &Graph) -> Scene {
		layout::graph(graph, config.directed, &LayoutParams::default())
	}
}

/// Graph algorithms visualizer.
#[component]
pub fn GraphPage() -> impl IntoView {
	visualizer::<GraphBinding>()
}
