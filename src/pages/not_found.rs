use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<div class="container">
				<h1>"Uh oh!" <br /> "We couldn't find that page!"</h1>
				<a href="/">"Back to the diagram editor"</a>
			</div>
		</div>
	}
}
