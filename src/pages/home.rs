use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};

use crate::browser;
use crate::components::{CodePanel, GraphView, Tooltip};
use crate::config::AppConfig;
use crate::constants::{
	CODE_PLACEHOLDER, EXAMPLES, GRAPH_PLACEHOLDER, MARKDOWN_PLACEHOLDER, PREVIEW_PLACEHOLDER,
	PROMPT_PLACEHOLDER, THEME_TOOLTIP,
};
use crate::diagram::{self, MermaidPreset, MermaidTheme, init_mermaid};
use crate::services;
use crate::settings::BrowserSiteTheme;
use crate::state::{GenerationJob, UiState};
use crate::types::{DiagramKind, Direction, Engine, SiteTheme};

/// Fetch, style, render. Each step re-checks the job's token so a superseded
/// generation never touches the page.
async fn run_generation(state: RwSignal<UiState>, config: AppConfig, job: GenerationJob) {
	info!(
		"generating {} diagram with {} ({})",
		job.request.diagram, job.request.renderer, job.request.direction
	);

	let response = match services::submit(&config, &job.request).await {
		Ok(response) => response,
		Err(e) => {
			warn!("generation request failed: {}", e);
			state.maybe_update(|s| s.fail(job.token, e));
			return;
		}
	};

	let styled = diagram::styled_source(&response.code, &job.style);
	let mut accepted = false;
	state.maybe_update(|s| {
		accepted = s.accept_response(job.token, response);
		accepted
	});
	if !accepted {
		debug!("discarding stale response for {}", job.render_id);
		return;
	}

	let result = diagram::render_styled(&job.render_id, &styled).await;
	let mut applied = false;
	state.maybe_update(|s| {
		applied = match result {
			Ok(svg) => {
				info!("rendered {} ({} bytes)", job.render_id, svg.len());
				s.succeed(job.token, svg)
			}
			Err(e) => {
				warn!("render of {} failed: {}", job.render_id, e);
				s.fail(job.token, e)
			}
		};
		applied
	});
	if !applied {
		debug!("discarding stale render {}", job.render_id);
	}
}

fn preview_placeholder() -> String {
	format!(
		r#"<div class="preview-placeholder"><span>{}</span></div>"#,
		PREVIEW_PLACEHOLDER
	)
}

fn or_placeholder(text: String, placeholder: &str) -> String {
	if text.is_empty() {
		placeholder.to_string()
	} else {
		text
	}
}

/// `<option>` list for one of the selection enums.
fn choice_options<T>(
	all: &'static [T],
	current: impl Fn() -> T + Copy + Send + Sync + 'static,
	value: fn(T) -> &'static str,
	label: fn(T) -> &'static str,
) -> impl IntoView
where
	T: Copy + PartialEq + Send + Sync + 'static,
{
	all.iter()
		.map(move |&item| {
			view! {
				<option value=value(item) prop:selected=move || current() == item>
					{label(item)}
				</option>
			}
		})
		.collect_view()
}

fn copy_to_clipboard(text: String) {
	if text.is_empty() {
		return;
	}
	spawn_local(async move {
		match browser::copy_text(&text).await {
			Ok(()) => debug!("copied {} chars", text.len()),
			Err(e) => warn!("copy failed: {}", e),
		}
	});
}

/// Prompt editor, generation controls, result panels and preview.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let settings = use_context::<BrowserSiteTheme>().unwrap_or_default();
	let state = RwSignal::new(UiState::new(settings.load()));

	let loading = Memo::new(move |_| state.with(UiState::is_loading));
	let code = Memo::new(move |_| state.with(UiState::effective_code));
	let markdown = Memo::new(move |_| state.with(UiState::markdown_snippet));
	let graph_json = Memo::new(move |_| state.with(UiState::graph_json));
	let graph = Memo::new(move |_| state.with(|s| s.graph.clone()));
	let svg = Memo::new(move |_| state.with(|s| s.svg.clone()));
	let error = Memo::new(move |_| state.with(|s| s.error.clone()));
	let site_theme = Memo::new(move |_| state.with(|s| s.site_theme));
	let mermaid_theme = Memo::new(move |_| state.with(|s| s.mermaid_theme));

	Effect::new(move |_| init_mermaid(mermaid_theme.get()));
	Effect::new(move |_| settings.apply(site_theme.get()));

	let on_generate = move |_| {
		if state.with_untracked(UiState::is_loading) {
			return;
		}
		let Some(job) = state.try_update(|s| s.begin(js_sys::Date::now())) else {
			return;
		};
		spawn_local(run_generation(state, config.clone(), job));
	};

	let on_download = move |_| {
		let markup = svg.get_untracked();
		if markup.is_empty() {
			return;
		}
		match browser::download_svg(&markup) {
			Ok(name) => info!("saved {}", name),
			Err(e) => error!("download failed: {}", e),
		}
	};

	view! {
		<div class="page">
			<div class="container">
				<header class="header">
					<h1>"DiagramAI"</h1>
					<div class="header-controls">
						<div class="control">
							<label>"Theme " <Tooltip text=THEME_TOOLTIP /></label>
							<select
								class="select"
								on:change=move |ev| {
									if let Ok(v) = event_target_value(&ev).parse::<MermaidTheme>() {
										state.update(|s| s.mermaid_theme = v);
									}
								}
							>
								{choice_options(
									MermaidTheme::ALL,
									move || state.with(|s| s.mermaid_theme),
									MermaidTheme::as_str,
									MermaidTheme::label,
								)}
							</select>
							<select
								class="select"
								on:change=move |ev| {
									if let Ok(v) = event_target_value(&ev).parse::<MermaidPreset>() {
										state.update(|s| s.preset = v);
									}
								}
							>
								{choice_options(
									MermaidPreset::ALL,
									move || state.with(|s| s.preset),
									MermaidPreset::as_str,
									MermaidPreset::label,
								)}
							</select>
						</div>
						<div class="control">
							<label>"Site"</label>
							<select
								class="select"
								on:change=move |ev| {
									if let Ok(v) = event_target_value(&ev).parse::<SiteTheme>() {
										state.update(|s| s.site_theme = v);
									}
								}
							>
								{choice_options(
									SiteTheme::ALL,
									move || site_theme.get(),
									SiteTheme::as_str,
									SiteTheme::label,
								)}
							</select>
						</div>
					</div>
				</header>

				<section class="workspace">
					<div class="card editor">
						<div class="editor-head">
							<label for="prompt" class="card-title">
								"Description / Mini-DSL"
							</label>
							<div class="editor-examples">
								{EXAMPLES
									.iter()
									.map(|&example| {
										view! {
											<button
												class="btn btn-soft"
												on:click=move |_| state.update(|s| s.load_example(&example))
											>
												{format!("Use {} Example", example.label)}
											</button>
										}
									})
									.collect_view()}
							</div>
						</div>

						<textarea
							id="prompt"
							class="prompt"
							placeholder=PROMPT_PLACEHOLDER
							prop:value=move || state.with(|s| s.prompt.clone())
							on:input=move |ev| {
								let value = event_target_value(&ev);
								state.update(|s| s.prompt = value);
							}
						/>

						<div class="selectors">
							<div class="control">
								<label>"Engine"</label>
								<select
									class="select"
									on:change=move |ev| {
										if let Ok(v) = event_target_value(&ev).parse::<Engine>() {
											state.update(|s| s.engine = v);
										}
									}
								>
									{choice_options(
										Engine::ALL,
										move || state.with(|s| s.engine),
										Engine::as_str,
										Engine::label,
									)}
								</select>
							</div>
							<div class="control">
								<label>"Diagram"</label>
								<select
									class="select"
									on:change=move |ev| {
										if let Ok(v) = event_target_value(&ev).parse::<DiagramKind>() {
											state.update(|s| s.diagram = v);
										}
									}
								>
									{choice_options(
										DiagramKind::ALL,
										move || state.with(|s| s.diagram),
										DiagramKind::as_str,
										DiagramKind::label,
									)}
								</select>
							</div>
							<Show when=move || state.with(UiState::shows_direction)>
								<div class="control">
									<label>"Direction"</label>
									<select
										class="select"
										on:change=move |ev| {
											if let Ok(v) = event_target_value(&ev).parse::<Direction>() {
												state.update(|s| s.direction = v);
											}
										}
									>
										{choice_options(
											Direction::ALL,
											move || state.with(|s| s.direction),
											Direction::as_str,
											Direction::label,
										)}
									</select>
								</div>
							</Show>
						</div>

						<div class="actions">
							<button
								class="btn btn-primary"
								on:click=on_generate
								disabled=move || loading.get()
							>
								{move || if loading.get() { "Generating…" } else { "Generate Diagram" }}
							</button>
							<button
								class="btn btn-soft"
								on:click=move |_| copy_to_clipboard(code.get_untracked())
								disabled=move || code.with(String::is_empty)
							>
								"Copy Code"
							</button>
							<button
								class="btn btn-soft"
								on:click=move |_| copy_to_clipboard(markdown.get_untracked())
								disabled=move || markdown.with(String::is_empty)
							>
								"Copy Markdown"
							</button>
							<button
								class="btn btn-soft"
								on:click=on_download
								disabled=move || svg.with(String::is_empty)
							>
								"Download SVG"
							</button>
						</div>

						{move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}
					</div>

					<div class="panels">
						<CodePanel title="Diagram Code">
							{move || or_placeholder(code.get(), CODE_PLACEHOLDER)}
						</CodePanel>
						<CodePanel title="Markdown Snippet">
							{move || or_placeholder(markdown.get(), MARKDOWN_PLACEHOLDER)}
						</CodePanel>
						<CodePanel title="Graph JSON">
							{move || graph_json.get().unwrap_or_else(|| GRAPH_PLACEHOLDER.to_string())}
						</CodePanel>
					</div>
				</section>

				<section class="card">
					<div class="card-title">"Diagram Preview"</div>
					<div
						class="preview"
						inner_html=move || {
							let markup = svg.get();
							if markup.is_empty() { preview_placeholder() } else { markup }
						}
					/>
				</section>

				<section class="card">
					<div class="card-title">"Graph View"</div>
					<GraphView graph=graph site_theme=site_theme />
				</section>

				<footer class="footer">
					<p>
						"Tip: the API base URL is baked in at build time from DIAGRAM_API_BASE; enable CORS on the service for this origin."
					</p>
				</footer>
			</div>
		</div>
	}
}
