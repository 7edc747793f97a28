use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::{MARGIN, NODE_RADIUS, Scene, Shape};
use crate::engine::ElementId;
use crate::structures::Graph;

/// Force simulation settings for the graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Canvas width to fit into.
	pub width: f64,
	/// Canvas height to fit into.
	pub height: f64,
	/// Simulation steps before the layout is read.
	pub iterations: usize,
	/// Time step per iteration.
	pub dt: f32,
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Pull along edges.
	pub force_spring: f32,
	/// Cap on the force applied to one node.
	pub force_max: f32,
	/// Cap on node velocity.
	pub node_speed: f32,
	/// Velocity kept per step.
	pub damping_factor: f32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			width: 640.0,
			height: 420.0,
			iterations: 300,
			dt: 0.016,
			force_charge: 1500.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl LayoutParams {
	fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Seed the nodes on a circle in id order, run a fixed number of
/// simulation steps, then scale the result into the canvas. The same
/// graph always lands in the same place.
pub fn graph(graph: &Graph, directed: bool, params: &LayoutParams) -> Scene {
	let mut scene = Scene::new(params.width, params.height);
	let ids = graph.node_ids();
	if ids.is_empty() {
		return scene;
	}

	let mut sim: ForceGraph<ElementId, ()> = ForceGraph::new(params.simulation());
	let mut index = HashMap::new();
	let (cx, cy) = (params.width / 2.0, params.height / 2.0);
	let radius = params.width.min(params.height) / 3.0;
	for (i, id) in ids.iter().enumerate() {
		let angle = (i as f64) * 2.0 * PI / ids.len() as f64;
		let idx = sim.add_node(NodeData {
			x: (cx + radius * angle.cos()) as f32,
			y: (cy + radius * angle.sin()) as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: *id,
		});
		index.insert(*id, idx);
	}
	for (_, edge) in graph.edges() {
		if let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) {
			sim.add_edge(a, b, EdgeData::default());
		}
	}
	for _ in 0..params.iterations {
		sim.update(params.dt);
	}

	let mut raw: HashMap<ElementId, (f64, f64)> = HashMap::new();
	sim.visit_nodes(|node| {
		raw.insert(node.data.user_data, (node.x() as f64, node.y() as f64));
	});
	let positions = fit_into(&raw, params);

	for (edge_id, edge) in graph.edges() {
		let (Some(&from), Some(&to)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
			continue;
		};
		scene.push(Shape::Edge {
			id: Some(*edge_id),
			ends: Some((edge.from, edge.to)),
			from,
			to,
			label: Some(edge.weight.to_string()),
			arrow: directed,
		});
	}
	for id in &ids {
		if let Some(&(x, y)) = positions.get(id) {
			scene.push(Shape::Node {
				id: *id,
				x,
				y,
				label: graph.label(*id).to_string(),
				marked: false,
			});
		}
	}
	scene
}

/// Uniformly scale and translate `raw` into the canvas minus margins.
fn fit_into(raw: &HashMap<ElementId, (f64, f64)>, params: &LayoutParams) -> HashMap<ElementId, (f64, f64)> {
	let pad = MARGIN + NODE_RADIUS;
	let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
	let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
	for &(x, y) in raw.values() {
		let (x, y) = (finite(x), finite(y));
		min_x = min_x.min(x);
		min_y = min_y.min(y);
		max_x = max_x.max(x);
		max_y = max_y.max(y);
	}
	let (span_x, span_y) = (max_x - min_x, max_y - min_y);
	let avail = (params.width - 2.0 * pad, params.height - 2.0 * pad);
	let scale = match (span_x > f64::EPSILON, span_y > f64::EPSILON) {
		(true, true) => (avail.0 / span_x).min(avail.1 / span_y),
		(true, false) => avail.0 / span_x,
		(false, true) => avail.1 / span_y,
		(false, false) => 0.0,
	};
	let offset_x = pad + (avail.0 - span_x * scale) / 2.0;
	let offset_y = pad + (avail.1 - span_y * scale) / 2.0;
	raw.iter()
		.map(|(id, &(x, y))| {
			let (x, y) = (finite(x), finite(y));
			(*id, (offset_x + (x - min_x) * scale, offset_y + (y - min_y) * scale))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::{CounterIds, Mutator};
	use crate::structures::{GraphConfig, GraphOp};

	fn sample() -> Graph {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::new();
		let mut g = Graph::default();
		for op in cfg.sample() {
			g = cfg.apply(&g, &op, &mut ids).snapshot;
		}
		g
	}

	#[test]
	fn layout_is_deterministic_and_inside_canvas() {
		let params = LayoutParams::default();
		let g = sample();
		let first = graph(&g, false, &params);
		let second = graph(&g, false, &params);
		assert_eq!(first, second);
		assert_eq!(first.nodes(), 6);
		assert_eq!(first.edges(), 7);
		for id in g.node_ids() {
			let (x, y) = first.position(id).unwrap();
			assert!(x >= MARGIN && x <= params.width - MARGIN, "x = {x}");
			assert!(y >= MARGIN && y <= params.height - MARGIN, "y = {y}");
		}
	}

	#[test]
	fn single_node_is_centred() {
		let cfg = GraphConfig::default();
		let mut ids = CounterIds::new();
		let g = cfg.apply(&Graph::default(), &GraphOp::AddNode("A".into()), &mut ids).snapshot;
		let params = LayoutParams::default();
		let scene = graph(&g, false, &params);
		let (x, y) = scene.position(g.find("A").unwrap()).unwrap();
		assert_eq!((x, y), (params.width / 2.0, params.height / 2.0));
	}

	#[test]
	fn directed_edges_get_arrows() {
		let scene = graph(&sample(), true, &LayoutParams::default());
		assert!(scene
			.shapes
			.iter()
			.all(|s| !matches!(s, Shape::Edge { arrow: false, .. })));
	}
}
