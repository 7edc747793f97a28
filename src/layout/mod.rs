//! Snapshot to scene conversion. A [`Scene`] is a flat list of positioned
//! shapes keyed by element id; the canvas renderer only has to paint it.

mod graph;
mod linear;
mod tree;

pub use graph::{LayoutParams, graph};
pub use linear::{hash_table, linked_list, queue, stack};
pub use tree::{heap, trie, tree};

use crate::engine::{ElementId, HighlightState};

/// Radius of a node circle.
pub const NODE_RADIUS: f64 = 18.0;
/// Width of an array or bucket cell.
pub const CELL_WIDTH: f64 = 56.0;
/// Height of an array or bucket cell.
pub const CELL_HEIGHT: f64 = 36.0;
/// Blank border around every scene.
pub const MARGIN: f64 = 32.0;

/// One positioned drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	/// Circle with a centred label. `marked` draws a second ring.
	Node {
		/// Element drawn.
		id: ElementId,
		/// Centre x.
		x: f64,
		/// Centre y.
		y: f64,
		/// Text inside the circle.
		label: String,
		/// Draw the second ring.
		marked: bool,
	},
	/// Rectangle, optionally bound to an element.
	Cell {
		/// Element drawn, if any.
		id: Option<ElementId>,
		/// Left edge.
		x: f64,
		/// Top edge.
		y: f64,
		/// Width.
		w: f64,
		/// Height.
		h: f64,
		/// Centred text.
		label: String,
	},
	/// Line between two points. `ends` are the joined elements, used to
	/// light the edge when a step pairs them.
	Edge {
		/// Edge element, if it has one.
		id: Option<ElementId>,
		/// Joined elements.
		ends: Option<(ElementId, ElementId)>,
		/// Start point.
		from: (f64, f64),
		/// End point.
		to: (f64, f64),
		/// Text at the midpoint.
		label: Option<String>,
		/// Draw an arrowhead at `to`.
		arrow: bool,
	},
	/// Free-standing caption.
	Text {
		/// Left edge of the text.
		x: f64,
		/// Baseline.
		y: f64,
		/// Caption.
		text: String,
	},
}

impl Shape {
	/// Element this shape stands for.
	pub fn id(&self) -> Option<ElementId> {
		match self {
			Shape::Node { id, .. } => Some(*id),
			Shape::Cell { id, .. } | Shape::Edge { id, .. } => *id,
			Shape::Text { .. } => None,
		}
	}
}

/// Everything one frame paints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Shapes in paint order.
	pub shapes: Vec<Shape>,
}

impl Scene {
	/// Empty scene of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			shapes: Vec::new(),
		}
	}

	/// Append a shape on top.
	pub fn push(&mut self, shape: Shape) {
		self.shapes.push(shape);
	}

	/// Centre of the node drawn for `id`.
	pub fn position(&self, id: ElementId) -> Option<(f64, f64)> {
		self.shapes.iter().find_map(|s| match s {
			Shape::Node { id: n, x, y, .. } if *n == id => Some((*x, *y)),
			_ => None,
		})
	}

	/// Number of node shapes.
	pub fn nodes(&self) -> usize {
		self.shapes
			.iter()
			.filter(|s| matches!(s, Shape::Node { .. }))
			.count()
	}

	/// Number of edge shapes.
	pub fn edges(&self) -> usize {
		self.shapes
			.iter()
			.filter(|s| matches!(s, Shape::Edge { .. }))
			.count()
	}

	/// Grow the canvas so every shape fits with a margin.
	pub fn fit(&mut self) {
		let (mut w, mut h) = (self.width, self.height);
		for shape in &self.shapes {
			let (right, bottom) = match shape {
				Shape::Node { x, y, .. } => (x + NODE_RADIUS, y + NODE_RADIUS),
				Shape::Cell { x, y, w, h, .. } => (x + w, y + h),
				Shape::Edge { from, to, .. } => (from.0.max(to.0), from.1.max(to.1)),
				Shape::Text { x, y, .. } => (*x + CELL_WIDTH, *y),
			};
			w = w.max(right + MARGIN);
			h = h.max(bottom + MARGIN);
		}
		self.width = w;
		self.height = h;
	}
}

/// Emphasis of one element under the current highlight, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
	/// The element the step is about.
	Focus,
	/// One of a compared or swapped pair.
	Paired,
	/// Part of the step's selection.
	Selected,
	/// Seen earlier in the walk.
	Visited,
	/// No emphasis.
	Plain,
}

impl Tone {
	/// Tone of the element `id`.
	pub fn of(highlight: &HighlightState, id: Option<ElementId>) -> Tone {
		let Some(id) = id else {
			return Tone::Plain;
		};
		if highlight.is_focus(id) {
			Tone::Focus
		} else if highlight.is_paired(id) {
			Tone::Paired
		} else if highlight.is_selected_edge(id) {
			Tone::Selected
		} else if highlight.is_visited(id) {
			Tone::Visited
		} else {
			Tone::Plain
		}
	}

	/// Tone of an edge: its own id first, then a pairing of its ends.
	pub fn of_edge(
		highlight: &HighlightState,
		id: Option<ElementId>,
		ends: Option<(ElementId, ElementId)>,
	) -> Tone {
		match Tone::of(highlight, id) {
			Tone::Plain | Tone::Visited => {}
			tone => return tone,
		}
		let Some((a, b)) = ends else {
			return Tone::of(highlight, id);
		};
		match highlight.pair {
			Some((x, y)) if (x == a && y == b) || (x == b && y == a) => Tone::Paired,
			_ if highlight.is_visited(a) && highlight.is_visited(b) => Tone::Visited,
			_ => Tone::Plain,
		}
	}

	/// Fill colour for this tone.
	pub fn color(self) -> &'static str {
		match self {
			Tone::Focus => "#ff7f0e",
			Tone::Paired => "#d62728",
			Tone::Selected => "#2ca02c",
			Tone::Visited => "#17becf",
			Tone::Plain => "#1f77b4",
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::engine::AuxView;

	fn id(n: u64) -> ElementId {
		ElementId::from_raw(n)
	}

	#[test]
	fn focus_outranks_visited() {
		let hl = HighlightState {
			focus: Some(id(1)),
			visited: vec![id(1), id(2)],
			..HighlightState::default()
		};
		assert_eq!(Tone::of(&hl, Some(id(1))), Tone::Focus);
		assert_eq!(Tone::of(&hl, Some(id(2))), Tone::Visited);
		assert_eq!(Tone::of(&hl, Some(id(3))), Tone::Plain);
		assert_eq!(Tone::of(&hl, None), Tone::Plain);
	}

	#[test]
	fn edges_light_up_by_pair_or_edge_set() {
		let hl = HighlightState {
			pair: Some((id(2), id(1))),
			aux: Some(AuxView::EdgeSet(vec![id(9)])),
			..HighlightState::default()
		};
		assert_eq!(Tone::of_edge(&hl, None, Some((id(1), id(2)))), Tone::Paired);
		assert_eq!(Tone::of_edge(&hl, Some(id(9)), Some((id(5), id(6)))), Tone::Selected);
		assert_eq!(Tone::of_edge(&hl, Some(id(8)), Some((id(5), id(6)))), Tone::Plain);
	}

	#[test]
	fn fit_grows_to_contain_shapes() {
		let mut scene = Scene::new(10.0, 10.0);
		scene.push(Shape::Cell {
			id: None,
			x: 100.0,
			y: 40.0,
			w: CELL_WIDTH,
			h: CELL_HEIGHT,
			label: String::new(),
		});
		scene.fit();
		assert_eq!(scene.width, 100.0 + CELL_WIDTH + MARGIN);
		assert_eq!(scene.height, 40.0 + CELL_HEIGHT + MARGIN);
	}
}
