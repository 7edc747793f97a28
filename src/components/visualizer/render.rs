use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::HighlightState;
use crate::layout::{NODE_RADIUS, Scene, Shape, Tone};

const BACKGROUND: &str = "#1a1a2e";
const INK: &str = "rgba(255, 255, 255, 0.85)";

/// Paint `scene` with the colours `highlight` asks for.
pub fn render(scene: &Scene, highlight: &HighlightState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	ctx.set_font("14px sans-serif");

	for shape in &scene.shapes {
		if let Shape::Edge {
			id,
			ends,
			from,
			to,
			label,
			arrow,
		} = shape
		{
			draw_edge(ctx, Tone::of_edge(highlight, *id, *ends), *from, *to, label.as_deref(), *arrow);
		}
	}
	for shape in &scene.shapes {
		match shape {
			Shape::Node {
				id,
				x,
				y,
				label,
				marked,
			} => draw_node(ctx, Tone::of(highlight, Some(*id)), *x, *y, label, *marked),
			Shape::Cell {
				id,
				x,
				y,
				w,
				h,
				label,
			} => draw_cell(ctx, Tone::of(highlight, *id), (*x, *y, *w, *h), label, id.is_some()),
			Shape::Text { x, y, text } => {
				ctx.set_fill_style_str(INK);
				let _ = ctx.fill_text(text, *x, *y);
			}
			Shape::Edge { .. } => {}
		}
	}
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	tone: Tone,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	label: Option<&str>,
	arrow: bool,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (color, width) = match tone {
		Tone::Plain => ("rgba(100, 180, 255, 0.6)", 1.5),
		Tone::Visited => (tone.color(), 2.0),
		_ => (tone.color(), 3.5),
	};
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	// The pair under comparison is dashed.
	if tone == Tone::Paired {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0)));
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let arrow_size = if arrow { 10.0 } else { 0.0 };
	// Edges between circles stop at the rim; the rest are drawn end to end.
	let inset = if dist > 2.0 * NODE_RADIUS { NODE_RADIUS } else { 0.0 };
	ctx.begin_path();
	ctx.move_to(x1 + ux * inset, y1 + uy * inset);
	ctx.line_to(x2 - ux * (inset + arrow_size), y2 - uy * (inset + arrow_size));
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	if arrow {
		ctx.set_fill_style_str(color);
		let (tip_x, tip_y) = (x2 - ux * inset, y2 - uy * inset);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	if let Some(label) = label {
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(mx - 10.0, my - 10.0, 20.0, 18.0);
		ctx.set_fill_style_str(INK);
		let _ = ctx.fill_text(label, mx - 4.0 * label.len() as f64, my + 4.0);
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, tone: Tone, x: f64, y: f64, label: &str, marked: bool) {
	if tone == Tone::Focus {
		glow(ctx, x, y);
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(tone.color());
	ctx.fill();

	if marked {
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS + 4.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(INK);
		ctx.set_line_width(1.5);
		ctx.stroke();
	}

	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(label, x - 4.0 * label.chars().count() as f64, y + 5.0);
}

fn draw_cell(
	ctx: &CanvasRenderingContext2d,
	tone: Tone,
	(x, y, w, h): (f64, f64, f64, f64),
	label: &str,
	occupied: bool,
) {
	if occupied {
		ctx.set_fill_style_str(tone.color());
		ctx.fill_rect(x, y, w, h);
	}
	ctx.set_stroke_style_str(INK);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, w, h);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(label, x + w / 2.0 - 4.0 * label.chars().count() as f64, y + h / 2.0 + 5.0);
}

fn glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, NODE_RADIUS * 0.3, x, y, NODE_RADIUS * 2.4) else {
		return;
	};
	let stops = [
		(0.0, "rgba(255, 255, 255, 0.35)"),
		(0.6, "rgba(255, 200, 120, 0.15)"),
		(1.0, "rgba(255, 255, 255, 0)"),
	];
	for (offset, color) in stops {
		if gradient.add_color_stop(offset, color).is_err() {
			return;
		}
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, NODE_RADIUS * 2.4, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

/// Resize the backing canvas to the scene; returns whether it changed.
pub fn fit_canvas(canvas: &HtmlCanvasElement, scene: &Scene) -> bool {
	let (w, h) = (scene.width.ceil() as u32, scene.height.ceil() as u32);
	if canvas.width() == w && canvas.height() == h {
		return false;
	}
	canvas.set_width(w);
	canvas.set_height(h);
	let _ = canvas.style().set_property("max-width", "100%");
	true
}
