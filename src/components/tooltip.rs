use leptos::prelude::*;

/// A small "!" badge that reveals `text` on hover or keyboard focus.
#[component]
pub fn Tooltip(text: &'static str) -> impl IntoView {
	view! {
		<span class="tooltip">
			<span class="tooltip-badge" tabindex="0" aria-label="Info">
				"!"
			</span>
			<span role="tooltip" class="tooltip-body">
				{text}
			</span>
		</span>
	}
}
