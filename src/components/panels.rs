//! Static reference panels shown under the map.

use leptos::prelude::*;

use super::architecture::dataset::{DATA_FLOW_STEPS, ENDPOINTS, LEGEND, platform_architecture};

#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<div class="legend">
			{LEGEND
				.iter()
				.map(|entry| {
					let color = entry.kind.color();
					let swatch = if entry.kind.is_dashed() {
						format!("border-top: 3px dashed {color};")
					} else {
						format!("background: {color};")
					};
					view! {
						<div class="panel legend-entry">
							<div class="legend-title">
								<span class="legend-swatch" style=swatch></span>
								<span>{entry.title}</span>
							</div>
							<p class="caption">{entry.caption}</p>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

#[component]
pub fn DataFlow() -> impl IntoView {
	let half = DATA_FLOW_STEPS.len().div_ceil(2);
	let column = move |steps: &'static [(&'static str, &'static str)], first: usize| {
		steps
			.iter()
			.enumerate()
			.map(|(i, (title, description))| {
				view! {
					<h3>{format!("{}. {}", first + i + 1, title)}</h3>
					<p>{*description}</p>
				}
			})
			.collect_view()
	};

	view! {
		<section class="panel wide">
			<h2>"Complete Data Flow"</h2>
			<div class="columns">
				<div>{column(&DATA_FLOW_STEPS[..half], 0)}</div>
				<div>{column(&DATA_FLOW_STEPS[half..], half)}</div>
			</div>
		</section>
	}
}

#[component]
pub fn Endpoints() -> impl IntoView {
	let data = platform_architecture();

	view! {
		<section class="panel wide">
			<h2>"Key API Endpoints"</h2>
			<div class="endpoint-grid">
				{ENDPOINTS
					.iter()
					.map(|group| {
						let heading = data
							.node(group.service)
							.map(|n| format!("{} {}", n.name, n.port.as_deref().unwrap_or_default()))
							.unwrap_or_else(|| group.service.to_string());
						view! {
							<div class="endpoint-card">
								<h3 style=format!("color: {};", group.color)>{heading}</h3>
								<ul>
									{group
										.routes
										.iter()
										.map(|route| view! { <li>{format!("• {route}")}</li> })
										.collect_view()}
								</ul>
							</div>
						}
					})
					.collect_view()}
			</div>
		</section>
	}
}
