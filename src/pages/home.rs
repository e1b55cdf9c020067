use leptos::prelude::*;

use crate::components::architecture::{ArchitectureMap, platform_architecture};
use crate::components::panels::{DataFlow, Endpoints, Legend};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(platform_architecture);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="page">
				<header class="page-header">
					<h1>"CarbonScore Platform Architecture"</h1>
				</header>
				<ArchitectureMap data=graph_data />
				<Legend />
				<DataFlow />
				<Endpoints />
			</div>
		</ErrorBoundary>
	}
}
