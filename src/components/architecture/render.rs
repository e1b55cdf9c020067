use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::highlight::{EdgeEmphasis, Emphasis};
use super::state::{ArchitectureState, DETAIL_LINE_HEIGHT, DrawnNode};
use super::types::{Point, ServiceNode};

const BACKGROUND: &str = "#1f2937";
const DIMMED_ALPHA: f64 = 0.3;
const ARROW_SIZE: f64 = 9.0;
const CORNER_RADIUS: f64 = 8.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ArchitectureState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let (c, o, k) = (state.center(), state.viewport.offset(), state.viewport.scale());
	ctx.save();
	let _ = ctx.translate(c.x + o.x, c.y + o.y);
	let _ = ctx.scale(k, k);
	let _ = ctx.translate(-c.x, -c.y);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn edge_emphasis(state: &ArchitectureState, flow: usize) -> EdgeEmphasis {
	state
		.shown_highlight()
		.map(|h| h.edges[flow])
		.unwrap_or(state.highlight.edges[flow])
}

fn draw_edges(state: &ArchitectureState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.fade.t);

	for (i, flow) in state.data.flows.iter().enumerate() {
		let emphasis = edge_emphasis(state, i);
		if emphasis == EdgeEmphasis::Hidden {
			continue;
		}
		let (Some(from), Some(to)) = (
			state.data.placed_index(&flow.from).and_then(|idx| state.node_box(idx)),
			state.data.placed_index(&flow.to).and_then(|idx| state.node_box(idx)),
		) else {
			continue;
		};

		let highlighted = emphasis == EdgeEmphasis::Highlighted;
		let (alpha, width) = if highlighted {
			(DIMMED_ALPHA + (1.0 - DIMMED_ALPHA) * t, 2.0 + t)
		} else {
			(DIMMED_ALPHA, 2.0)
		};

		let start = from.center;
		let tip = to.boundary_toward(from.center);
		let (dx, dy) = (tip.x - start.x, tip.y - start.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let color = flow.kind.color();

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		let dash = if flow.kind.is_dashed() {
			js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0))
		} else {
			js_sys::Array::new()
		};
		let _ = ctx.set_line_dash(&dash);

		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.line_to(tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(color);
		let (back_x, back_y) = (tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip.x, tip.y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if highlighted && t > 0.01 {
			let mid = Point::new((start.x + tip.x) / 2.0, (start.y + tip.y) / 2.0);
			ctx.set_global_alpha(t);
			ctx.set_font("bold 11px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&flow.label, mid.x, mid.y);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ArchitectureState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.fade.t);

	for (idx, emphasis) in state.draw_order(state.shown_highlight()) {
		let (Some(node), Some(drawn)) = (state.data.nodes.get(idx), state.drawn_node(idx, emphasis, t))
		else {
			continue;
		};
		draw_node(ctx, node, &drawn, emphasis == Emphasis::Primary, t);
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &ServiceNode,
	drawn: &DrawnNode,
	primary: bool,
	t: f64,
) {
	let Point { x, y } = drawn.top_left();
	let (w, h) = (drawn.frame.half_width * 2.0, drawn.frame.half_height * 2.0);

	if primary && t > 0.01 {
		ctx.set_shadow_color(&format!("rgba(0, 0, 0, {})", 0.6 * t));
		ctx.set_shadow_blur(24.0 * t);
	} else {
		ctx.set_shadow_color("rgba(0, 0, 0, 0.4)");
		ctx.set_shadow_blur(8.0);
	}
	rounded_rect(ctx, x, y, w, h, CORNER_RADIUS);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_stroke_style_str("white");
	ctx.set_line_width(2.0);
	ctx.stroke();

	ctx.set_text_align("left");
	ctx.set_fill_style_str("white");
	ctx.set_font("bold 13px sans-serif");
	let _ = ctx.fill_text(&node.name, x + 10.0, y + 22.0);
	if let Some(port) = &node.port {
		ctx.set_global_alpha(0.9);
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(port, x + 10.0, y + 42.0);
		ctx.set_global_alpha(1.0);
	}

	if !drawn.details.is_empty() {
		let top = y + drawn.header_height;
		rounded_rect(ctx, x + 6.0, top, w - 12.0, h - drawn.header_height - 6.0, 4.0);
		ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", 0.3 * t));
		ctx.fill();
		ctx.set_global_alpha(t);
		ctx.set_fill_style_str("white");
		ctx.set_font("11px sans-serif");
		for (i, line) in drawn.details.iter().enumerate() {
			let _ = ctx.fill_text(line, x + 10.0, top + 16.0 + i as f64 * DETAIL_LINE_HEIGHT);
		}
		ctx.set_global_alpha(1.0);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
	ctx.line_to(x + r, y + h);
	let _ = ctx.arc(x + r, y + h - r, r, PI / 2.0, PI);
	ctx.line_to(x, y + r);
	let _ = ctx.arc(x + r, y + r, r, PI, 1.5 * PI);
	ctx.close_path();
}
