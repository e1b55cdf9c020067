/// A point in screen or diagram pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Position as percentages (0..=100) of the diagram's bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PercentPoint {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug)]
pub struct ServiceNode {
	pub id: String,
	pub name: String,
	pub port: Option<String>,
	pub description: String,
	pub color: String,
	pub position: Option<PercentPoint>,
	pub connections: Vec<String>,
}

/// Category of a flow; selects stroke color and dash style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
	Primary,
	Secondary,
	Data,
	Service,
	External,
}

impl FlowKind {
	pub fn color(self) -> &'static str {
		match self {
			FlowKind::Primary => "#3b82f6",
			FlowKind::Secondary => "#8b5cf6",
			FlowKind::Data => "#10b981",
			FlowKind::Service => "#f59e0b",
			FlowKind::External => "#06b6d4",
		}
	}

	pub fn is_dashed(self) -> bool {
		self == FlowKind::Data
	}
}

#[derive(Clone, Debug)]
pub struct Flow {
	pub from: String,
	pub to: String,
	pub label: String,
	pub kind: FlowKind,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<ServiceNode>,
	pub flows: Vec<Flow>,
}

impl GraphData {
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	pub fn node(&self, id: &str) -> Option<&ServiceNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Index of a node that can actually be drawn, i.e. one with a position.
	pub fn placed_index(&self, id: &str) -> Option<usize> {
		self.node_index(id)
			.filter(|&idx| self.nodes[idx].position.is_some())
	}
}
