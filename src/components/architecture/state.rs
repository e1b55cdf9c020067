use log::{debug, info};

use super::gesture::{GestureRecognizer, PointerInput};
use super::highlight::{Emphasis, Highlight, HoverState, resolve};
use super::types::{GraphData, Point};
use super::viewport::{COMPACT_SCALE, Viewport, default_scale};

pub const NODE_WIDTH: f64 = 160.0;
pub const COMPACT_NODE_WIDTH: f64 = 140.0;
pub const NODE_HEIGHT: f64 = 56.0;

/// Size increase of emphasized nodes at full fade.
const PRIMARY_GROWTH: f64 = 0.10;
const CONNECTED_GROWTH: f64 = 0.05;

/// Description panel under the hovered node, laid out for an 11px font.
const DETAIL_CHAR_WIDTH: f64 = 6.0;
pub const DETAIL_LINE_HEIGHT: f64 = 14.0;
const DETAIL_PADDING: f64 = 12.0;
const DETAIL_INSET: f64 = 16.0;

/// Emphasis fade rates, per second. About 300ms to settle.
const FADE_IN_RATE: f64 = 10.0;
const FADE_OUT_RATE: f64 = 8.0;

/// Axis-aligned node box in diagram pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox {
	pub center: Point,
	pub half_width: f64,
	pub half_height: f64,
}

impl NodeBox {
	pub fn contains(&self, p: Point) -> bool {
		(p.x - self.center.x).abs() <= self.half_width
			&& (p.y - self.center.y).abs() <= self.half_height
	}

	/// Where the segment from the center towards `toward` leaves the box.
	pub fn boundary_toward(&self, toward: Point) -> Point {
		let (dx, dy) = (toward.x - self.center.x, toward.y - self.center.y);
		let tx = if dx == 0.0 { f64::INFINITY } else { self.half_width / dx.abs() };
		let ty = if dy == 0.0 { f64::INFINITY } else { self.half_height / dy.abs() };
		let t = tx.min(ty).min(1.0);
		Point::new(self.center.x + dx * t, self.center.y + dy * t)
	}
}

/// A node as it appears on screen: grown by its emphasis and, when hovered,
/// extended downward by its description lines.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawnNode {
	pub frame: NodeBox,
	/// Height of the name/port block at the top of `frame`.
	pub header_height: f64,
	pub details: Vec<String>,
}

impl DrawnNode {
	pub fn top_left(&self) -> Point {
		Point::new(
			self.frame.center.x - self.frame.half_width,
			self.frame.center.y - self.frame.half_height,
		)
	}
}

/// Greedy word wrap at a fixed average glyph width.
pub fn wrap_text(text: &str, max_width: f64) -> Vec<String> {
	let max_chars = (max_width / DETAIL_CHAR_WIDTH).floor().max(1.0) as usize;
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in text.split_whitespace() {
		if line.is_empty() {
			line.push_str(word);
		} else if line.chars().count() + 1 + word.chars().count() <= max_chars {
			line.push(' ');
			line.push_str(word);
		} else {
			lines.push(std::mem::replace(&mut line, word.to_string()));
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

#[derive(Clone, Debug, Default)]
pub struct HighlightFade {
	/// 0 = no emphasis, 1 = fully emphasized.
	pub t: f64,
	/// Classification kept on screen while fading out after hover ends.
	pub fading: Option<Highlight>,
}

/// Everything one mounted diagram owns.
pub struct ArchitectureState {
	pub data: GraphData,
	pub viewport: Viewport,
	pub gesture: GestureRecognizer,
	pub hover: HoverState,
	pub highlight: Highlight,
	pub fade: HighlightFade,
	pub width: f64,
	pub height: f64,
	pub compact: bool,
}

impl ArchitectureState {
	pub fn new(data: &GraphData, width: f64, height: f64, compact: bool) -> Self {
		let mut viewport = Viewport::default();
		viewport.reset(default_scale(compact));
		Self {
			highlight: resolve(data, None),
			data: data.clone(),
			viewport,
			gesture: GestureRecognizer::default(),
			hover: HoverState::default(),
			fade: HighlightFade::default(),
			width,
			height,
			compact,
		}
	}

	/// Swap in new graph data. Hover and emphasis start over; the view stays.
	pub fn set_data(&mut self, data: &GraphData) {
		self.data = data.clone();
		self.hover = HoverState::default();
		self.highlight = resolve(&self.data, None);
		self.fade = HighlightFade::default();
		debug!("graph data replaced: {} nodes", self.data.nodes.len());
	}

	/// Transform origin: the middle of the canvas.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn screen_to_diagram(&self, p: Point) -> Point {
		let (c, o, k) = (self.center(), self.viewport.offset(), self.viewport.scale());
		Point::new(c.x + (p.x - c.x - o.x) / k, c.y + (p.y - c.y - o.y) / k)
	}

	pub fn node_center(&self, idx: usize) -> Option<Point> {
		let pos = self.data.nodes.get(idx)?.position?;
		Some(Point::new(
			pos.x * self.width / 100.0,
			pos.y * self.height / 100.0,
		))
	}

	pub fn node_box(&self, idx: usize) -> Option<NodeBox> {
		let width = if self.compact { COMPACT_NODE_WIDTH } else { NODE_WIDTH };
		Some(NodeBox {
			center: self.node_center(idx)?,
			half_width: width / 2.0,
			half_height: NODE_HEIGHT / 2.0,
		})
	}

	/// Paint order under `highlight`: neutral, then connected, then primary,
	/// by index within each group. Last entry is on top.
	pub fn draw_order(&self, highlight: Option<&Highlight>) -> Vec<(usize, Emphasis)> {
		let mut order: Vec<(usize, Emphasis)> = (0..self.data.nodes.len())
			.map(|idx| {
				let emphasis = highlight
					.and_then(|h| h.nodes.get(idx).copied())
					.unwrap_or(Emphasis::Neutral);
				(idx, emphasis)
			})
			.collect();
		order.sort_by_key(|&(_, e)| match e {
			Emphasis::Neutral => 0,
			Emphasis::Connected => 1,
			Emphasis::Primary => 2,
		});
		order
	}

	/// On-screen geometry of a node at fade progress `t`.
	pub fn drawn_node(&self, idx: usize, emphasis: Emphasis, t: f64) -> Option<DrawnNode> {
		let base = self.node_box(idx)?;
		let growth = match emphasis {
			Emphasis::Primary => PRIMARY_GROWTH,
			Emphasis::Connected => CONNECTED_GROWTH,
			Emphasis::Neutral => 0.0,
		};
		let s = 1.0 + growth * t;
		let (half_width, header_height) = (base.half_width * s, base.half_height * s * 2.0);

		let details = match self.hover.node() {
			Some(_) if emphasis == Emphasis::Primary => wrap_text(
				&self.data.nodes[idx].description,
				half_width * 2.0 - DETAIL_INSET,
			),
			_ => Vec::new(),
		};
		let details_height = if details.is_empty() {
			0.0
		} else {
			details.len() as f64 * DETAIL_LINE_HEIGHT + DETAIL_PADDING
		};

		let top = base.center.y - header_height / 2.0;
		let height = header_height + details_height;
		Some(DrawnNode {
			frame: NodeBox {
				center: Point::new(base.center.x, top + height / 2.0),
				half_width,
				half_height: height / 2.0,
			},
			header_height,
			details,
		})
	}

	/// Topmost node under a screen point, against the boxes as drawn once
	/// the current hover has fully faded in.
	pub fn node_at_position(&self, screen: Point) -> Option<usize> {
		let p = self.screen_to_diagram(screen);
		self.draw_order(Some(&self.highlight))
			.into_iter()
			.rev()
			.find(|&(idx, emphasis)| {
				self.drawn_node(idx, emphasis, 1.0)
					.is_some_and(|d| d.frame.contains(p))
			})
			.map(|(idx, _)| idx)
	}

	pub fn hovered_index(&self) -> Option<usize> {
		self.hover.node().and_then(|id| self.data.node_index(id))
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hovered_index() == node {
			return;
		}
		let previous = self.hover.node().map(str::to_string);
		if let Some(prev) = previous.as_deref() {
			self.hover.leave(prev);
		}
		let next = node.and_then(|idx| self.data.nodes.get(idx)).map(|n| n.id.clone());
		if let Some(id) = next.as_deref() {
			self.hover.enter(id);
		}
		debug!("hover {:?} -> {:?}", previous, next);

		let resolved = resolve(&self.data, self.hover.node());
		let outgoing = std::mem::replace(&mut self.highlight, resolved);
		self.fade.fading =
			(self.hover == HoverState::Idle && previous.is_some()).then_some(outgoing);
	}

	/// Highlight to draw: the live one while hovering, else the one fading out.
	pub fn shown_highlight(&self) -> Option<&Highlight> {
		match self.hover {
			HoverState::Hovering(_) => Some(&self.highlight),
			HoverState::Idle => self.fade.fading.as_ref(),
		}
	}

	pub fn pointer_moved(&mut self, screen: Point) {
		let node = self.node_at_position(screen);
		self.set_hover(node);
	}

	/// Touching a node shows its details; touching empty space keeps them.
	pub fn tap(&mut self, screen: Point) {
		if let Some(idx) = self.node_at_position(screen) {
			self.set_hover(Some(idx));
		}
	}

	pub fn handle_input(&mut self, input: PointerInput) -> bool {
		self.gesture.handle(input, &mut self.viewport)
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in();
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out();
	}

	pub fn reset(&mut self) {
		self.viewport.reset(default_scale(self.compact));
		info!("view reset to {}%", self.viewport.zoom_percent());
	}

	pub fn resize(&mut self, width: f64, height: f64, compact: bool) {
		self.width = width;
		self.height = height;
		if compact != self.compact {
			info!("compact layout: {compact}");
			self.compact = compact;
		}
		if compact {
			self.viewport.set_scale(COMPACT_SCALE);
		}
	}

	pub fn tick(&mut self, dt: f64) {
		if self.hover.node().is_some() {
			self.fade.t += (1.0 - self.fade.t) * (FADE_IN_RATE * dt).min(1.0);
		} else {
			self.fade.t -= self.fade.t * (FADE_OUT_RATE * dt).min(1.0);
			if self.fade.t < 0.01 {
				self.fade.t = 0.0;
				self.fade.fading = None;
			}
		}
	}
}
