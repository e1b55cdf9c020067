//! Hover tracking and the node/edge emphasis it implies.

use super::types::GraphData;

/// At most one node is hovered at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
	#[default]
	Idle,
	Hovering(String),
}

impl HoverState {
	pub fn node(&self) -> Option<&str> {
		match self {
			HoverState::Idle => None,
			HoverState::Hovering(id) => Some(id),
		}
	}

	pub fn enter(&mut self, id: &str) {
		*self = HoverState::Hovering(id.to_string());
	}

	/// Leaving a node other than the hovered one changes nothing.
	pub fn leave(&mut self, id: &str) {
		if self.node() == Some(id) {
			*self = HoverState::Idle;
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Primary,
	Connected,
	Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEmphasis {
	Highlighted,
	Dimmed,
	/// An endpoint has no position; the edge is not drawn.
	Hidden,
}

/// Per-node and per-flow classification, parallel to `GraphData::nodes`
/// and `GraphData::flows`.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
	pub nodes: Vec<Emphasis>,
	pub edges: Vec<EdgeEmphasis>,
}

/// Adjacency counts in both directions: `a` lists `b`, or `b` lists `a`.
pub fn are_connected(data: &GraphData, a: &str, b: &str) -> bool {
	let lists = |from: &str, to: &str| {
		data.node(from)
			.is_some_and(|n| n.connections.iter().any(|c| c == to))
	};
	lists(a, b) || lists(b, a)
}

pub fn resolve(data: &GraphData, hovered: Option<&str>) -> Highlight {
	let nodes = data
		.nodes
		.iter()
		.map(|node| match hovered {
			Some(h) if node.id == h => Emphasis::Primary,
			Some(h) if are_connected(data, &node.id, h) => Emphasis::Connected,
			_ => Emphasis::Neutral,
		})
		.collect();

	let edges = data
		.flows
		.iter()
		.map(|flow| {
			if data.placed_index(&flow.from).is_none() || data.placed_index(&flow.to).is_none() {
				EdgeEmphasis::Hidden
			} else if hovered.is_some_and(|h| flow.from == h || flow.to == h) {
				EdgeEmphasis::Highlighted
			} else {
				EdgeEmphasis::Dimmed
			}
		})
		.collect();

	Highlight { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::architecture::dataset::platform_architecture;
	use crate::components::architecture::types::{Flow, FlowKind};

	fn connected_ids(data: &GraphData, h: &Highlight) -> Vec<String> {
		let mut ids: Vec<String> = data
			.nodes
			.iter()
			.zip(&h.nodes)
			.filter(|(_, e)| **e == Emphasis::Connected)
			.map(|(n, _)| n.id.clone())
			.collect();
		ids.sort();
		ids
	}

	fn highlighted_flows(data: &GraphData, h: &Highlight) -> Vec<(String, String)> {
		data.flows
			.iter()
			.zip(&h.edges)
			.filter(|(_, e)| **e == EdgeEmphasis::Highlighted)
			.map(|(f, _)| (f.from.clone(), f.to.clone()))
			.collect()
	}

	#[test]
	fn hovering_calc() {
		let data = platform_architecture();
		let h = resolve(&data, Some("calc"));

		assert_eq!(connected_ids(&data, &h), ["db", "frontend", "redis"]);
		assert_eq!(
			highlighted_flows(&data, &h),
			[("frontend", "calc"), ("calc", "db"), ("calc", "redis")]
				.map(|(a, b)| (a.to_string(), b.to_string()))
		);

		let primary: Vec<&str> = data
			.nodes
			.iter()
			.zip(&h.nodes)
			.filter(|(_, e)| **e == Emphasis::Primary)
			.map(|(n, _)| n.id.as_str())
			.collect();
		assert_eq!(primary, ["calc"]);
		assert_eq!(
			h.edges.iter().filter(|e| **e == EdgeEmphasis::Dimmed).count(),
			9
		);
	}

	#[test]
	fn nothing_hovered_is_all_neutral() {
		let data = platform_architecture();
		let h = resolve(&data, None);
		assert!(h.nodes.iter().all(|e| *e == Emphasis::Neutral));
		assert!(h.edges.iter().all(|e| *e == EdgeEmphasis::Dimmed));
		assert!(!h.nodes.contains(&Emphasis::Primary));
	}

	#[test]
	fn connection_is_symmetric() {
		let data = platform_architecture();
		for (ai, a) in data.nodes.iter().enumerate() {
			for (bi, b) in data.nodes.iter().enumerate() {
				if ai == bi {
					continue;
				}
				let a_marks_b = resolve(&data, Some(&a.id)).nodes[bi] == Emphasis::Connected;
				let b_marks_a = resolve(&data, Some(&b.id)).nodes[ai] == Emphasis::Connected;
				assert_eq!(a_marks_b, b_marks_a, "{} / {}", a.id, b.id);
			}
		}
	}

	#[test]
	fn unplaced_edges_are_hidden_without_affecting_others() {
		let mut data = platform_architecture();
		let baseline = resolve(&data, Some("llm"));

		data.flows.push(Flow {
			from: "llm".into(),
			to: "nowhere".into(),
			label: "ghost".into(),
			kind: FlowKind::External,
		});
		let h = resolve(&data, Some("llm"));

		assert_eq!(h.edges.last(), Some(&EdgeEmphasis::Hidden));
		assert_eq!(&h.edges[..baseline.edges.len()], baseline.edges.as_slice());
		assert_eq!(h.nodes, baseline.nodes);
	}

	#[test]
	fn node_without_position_hides_its_edges() {
		let mut data = platform_architecture();
		let idx = data.node_index("redis").expect("redis");
		data.nodes[idx].position = None;

		let h = resolve(&data, Some("calc"));
		let redis_flow = data
			.flows
			.iter()
			.position(|f| f.to == "redis")
			.expect("calc -> redis");
		assert_eq!(h.edges[redis_flow], EdgeEmphasis::Hidden);
		assert_eq!(
			h.edges.iter().filter(|e| **e == EdgeEmphasis::Highlighted).count(),
			2
		);
	}

	#[test]
	fn hover_enter_and_leave() {
		let mut hover = HoverState::default();
		hover.enter("ml");
		assert_eq!(hover.node(), Some("ml"));

		hover.leave("pdf");
		assert_eq!(hover.node(), Some("ml"));

		hover.enter("pdf");
		assert_eq!(hover, HoverState::Hovering("pdf".into()));

		hover.leave("pdf");
		assert_eq!(hover, HoverState::Idle);
	}
}
