//! The fixed platform map and the reference content shown beside it.

use super::types::{Flow, FlowKind, GraphData, PercentPoint, ServiceNode};

struct NodeRow {
	id: &'static str,
	name: &'static str,
	port: &'static str,
	color: &'static str,
	at: (f64, f64),
	connections: &'static [&'static str],
	description: &'static str,
}

const NODES: &[NodeRow] = &[
	NodeRow {
		id: "frontend",
		name: "Next.js Frontend",
		port: ":3000",
		color: "#3b82f6",
		at: (50.0, 10.0),
		connections: &["calc", "ml", "pdf", "llm"],
		description: "User interface, forms, dashboards, and visualizations",
	},
	NodeRow {
		id: "calc",
		name: "Calculation Service",
		port: ":8001",
		color: "#22c55e",
		at: (20.0, 35.0),
		connections: &["db", "redis"],
		description: "ADEME carbon calculations, scope analysis, and benchmarking",
	},
	NodeRow {
		id: "ml",
		name: "ML Service",
		port: ":8010",
		color: "#a855f7",
		at: (50.0, 35.0),
		connections: &["db", "storage"],
		description: "Anomaly detection, imputation, and action ranking",
	},
	NodeRow {
		id: "pdf",
		name: "PDF Service",
		port: ":8020",
		color: "#f97316",
		at: (80.0, 35.0),
		connections: &["llm", "storage"],
		description: "Report generation with charts and narratives",
	},
	NodeRow {
		id: "llm",
		name: "LLM/RAG Service",
		port: ":8030",
		color: "#ec4899",
		at: (35.0, 60.0),
		connections: &["db", "external"],
		description: "AI insights, chat assistant, and content generation",
	},
	NodeRow {
		id: "db",
		name: "PostgreSQL + pgvector",
		port: ":5432",
		color: "#6366f1",
		at: (20.0, 85.0),
		connections: &[],
		description: "Primary database with vector search for RAG",
	},
	NodeRow {
		id: "redis",
		name: "Redis Cache",
		port: ":6379",
		color: "#ef4444",
		at: (40.0, 85.0),
		connections: &[],
		description: "Caching, sessions, and job queues",
	},
	NodeRow {
		id: "storage",
		name: "File Storage",
		port: "",
		color: "#6b7280",
		at: (60.0, 85.0),
		connections: &[],
		description: "PDF reports, charts, and ML models",
	},
	NodeRow {
		id: "external",
		name: "External APIs",
		port: "",
		color: "#14b8a6",
		at: (80.0, 60.0),
		connections: &[],
		description: "Minimax LLM (OpenRouter), ADEME data",
	},
];

const FLOWS: &[(&str, &str, &str, FlowKind)] = &[
	("frontend", "calc", "POST /api/calculate", FlowKind::Primary),
	("frontend", "ml", "POST /api/ml/benchmark", FlowKind::Secondary),
	("frontend", "pdf", "POST /api/pdf/generate", FlowKind::Primary),
	("frontend", "llm", "POST /api/llm/chat", FlowKind::Secondary),
	("calc", "db", "Store calculations", FlowKind::Data),
	("calc", "redis", "Cache results", FlowKind::Data),
	("ml", "db", "Query benchmarks", FlowKind::Data),
	("ml", "storage", "Load/save models", FlowKind::Data),
	("pdf", "llm", "Generate narrative", FlowKind::Service),
	("pdf", "storage", "Save PDF reports", FlowKind::Data),
	("llm", "db", "Vector search (RAG)", FlowKind::Data),
	("llm", "external", "LLM API calls", FlowKind::External),
];

/// Build the platform architecture graph.
pub fn platform_architecture() -> GraphData {
	let nodes = NODES
		.iter()
		.map(|row| ServiceNode {
			id: row.id.into(),
			name: row.name.into(),
			port: (!row.port.is_empty()).then(|| row.port.into()),
			description: row.description.into(),
			color: row.color.into(),
			position: Some(PercentPoint {
				x: row.at.0,
				y: row.at.1,
			}),
			connections: row.connections.iter().map(|c| c.to_string()).collect(),
		})
		.collect();

	let flows = FLOWS
		.iter()
		.map(|&(from, to, label, kind)| Flow {
			from: from.into(),
			to: to.into(),
			label: label.into(),
			kind,
		})
		.collect();

	GraphData { nodes, flows }
}

pub struct LegendEntry {
	pub kind: FlowKind,
	pub title: &'static str,
	pub caption: &'static str,
}

pub const LEGEND: &[LegendEntry] = &[
	LegendEntry {
		kind: FlowKind::Primary,
		title: "Primary API",
		caption: "Main user flows",
	},
	LegendEntry {
		kind: FlowKind::Secondary,
		title: "Secondary API",
		caption: "Enhancement flows",
	},
	LegendEntry {
		kind: FlowKind::Data,
		title: "Data Flow",
		caption: "Database operations",
	},
	LegendEntry {
		kind: FlowKind::Service,
		title: "Service-to-Service",
		caption: "Internal service calls",
	},
	LegendEntry {
		kind: FlowKind::External,
		title: "External API",
		caption: "Third-party services",
	},
];

/// Numbered end-to-end walkthrough: (title, description).
pub const DATA_FLOW_STEPS: &[(&str, &str)] = &[
	(
		"User Submission",
		"User fills questionnaire → Frontend validates → POST to Calculation Service",
	),
	(
		"Carbon Calculation",
		"Calculation Service processes ADEME factors → Stores in PostgreSQL → Caches in Redis",
	),
	(
		"ML Enhancement",
		"Frontend calls ML Service → Anomaly detection → Benchmarking → Action ranking",
	),
	(
		"Dashboard Display",
		"Frontend fetches data from cache/DB → Renders charts and metrics",
	),
	(
		"PDF Generation",
		"PDF Service calls LLM Service for narrative → Generates charts → Assembles PDF → Saves to storage",
	),
	(
		"AI Insights",
		"LLM Service performs vector search on pgvector → Retrieves context → Calls Minimax API → Returns grounded response",
	),
];

pub struct EndpointGroup {
	pub service: &'static str,
	pub color: &'static str,
	pub routes: &'static [&'static str],
}

pub const ENDPOINTS: &[EndpointGroup] = &[
	EndpointGroup {
		service: "calc",
		color: "#4ade80",
		routes: &[
			"POST /api/calculate",
			"GET /api/calculation/:id",
			"POST /api/validate",
			"POST /api/analyze-scenario",
		],
	},
	EndpointGroup {
		service: "ml",
		color: "#c084fc",
		routes: &[
			"POST /api/ml/detect-anomalies",
			"POST /api/ml/impute",
			"POST /api/ml/benchmark",
			"POST /api/ml/rank-actions",
		],
	},
	EndpointGroup {
		service: "pdf",
		color: "#fb923c",
		routes: &[
			"POST /api/pdf/generate",
			"GET /api/pdf/reports",
			"GET /api/pdf/file/:filename",
			"POST /api/pdf/chart",
		],
	},
];
