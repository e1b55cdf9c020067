use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<h1>"Page not found"</h1>
			<p class="caption">
				<a href="/">"Back to the architecture map"</a>
			</p>
		</div>
	}
}
