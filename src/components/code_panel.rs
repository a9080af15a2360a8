use leptos::prelude::*;

/// Titled card with a scrollable `<pre><code>` block.
#[component]
pub fn CodePanel(title: &'static str, children: Children) -> impl IntoView {
	view! {
		<div class="card code-panel">
			<div class="card-title">{title}</div>
			<pre class="code-block">
				<code>{children()}</code>
			</pre>
		</div>
	}
}
