//! Adapters over the Mermaid and Viz.js bundles loaded by `index.html`.
//! Both resolve to SVG markup; library errors come back as
//! [`AppError::Render`] carrying the library's own message.

use std::cell::RefCell;

use js_sys::{Object, Promise, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::mermaid::MermaidTheme;
use crate::error::{AppError, js_message};

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = mermaid, js_name = initialize)]
	fn mermaid_initialize(config: &JsValue);

	#[wasm_bindgen(js_namespace = mermaid, js_name = render, catch)]
	fn mermaid_render(id: &str, src: &str) -> Result<Promise, JsValue>;

	type Viz;

	#[wasm_bindgen(catch, constructor, js_class = "Viz")]
	fn new() -> Result<Viz, JsValue>;

	#[wasm_bindgen(method, js_name = renderString, catch)]
	fn render_string(this: &Viz, src: &str) -> Result<Promise, JsValue>;
}

thread_local! {
	static VIZ: RefCell<Option<Viz>> = const { RefCell::new(None) };
}

/// Produces `m-<millis>-<n>` ids so repeated renders never share a DOM id.
#[derive(Clone, Debug, Default)]
pub struct RenderIds {
	counter: u64,
}

impl RenderIds {
	/// Next id for a render started at `now_ms`.
	pub fn next_id(&mut self, now_ms: f64) -> String {
		self.counter += 1;
		format!("m-{}-{}", now_ms as u64, self.counter)
	}
}

/// Re-initialises Mermaid with a new base theme. Must run before renders
/// that should pick it up.
pub fn init_mermaid(theme: MermaidTheme) {
	let cfg = Object::new();
	let set = |key: &str, value: JsValue| Reflect::set(&cfg, &JsValue::from_str(key), &value);
	if let Err(e) = set("startOnLoad", JsValue::FALSE).and(set("theme", theme.as_str().into())) {
		warn!("mermaid config rejected: {}", js_message(&e));
		return;
	}
	mermaid_initialize(&cfg);
}

/// Renders styled Mermaid source under the DOM id `id`.
pub async fn render_mermaid(id: &str, src: &str) -> Result<String, AppError> {
	let promise = mermaid_render(id, src).map_err(AppError::render)?;
	let result = JsFuture::from(promise).await.map_err(AppError::render)?;
	let svg = Reflect::get(&result, &JsValue::from_str("svg")).map_err(AppError::render)?;
	svg.as_string()
		.ok_or_else(|| AppError::Render("mermaid returned no svg".into()))
}

fn with_viz<T>(f: impl FnOnce(&Viz) -> Result<T, JsValue>) -> Result<T, AppError> {
	VIZ.with(|cell| {
		let mut slot = cell.borrow_mut();
		if slot.is_none() {
			*slot = Some(Viz::new().map_err(AppError::render)?);
		}
		match slot.as_ref() {
			Some(viz) => f(viz).map_err(AppError::render),
			None => Err(AppError::Browser("Viz")),
		}
	})
}

/// Renders styled DOT source with Viz.js.
pub async fn render_dot(src: &str) -> Result<String, AppError> {
	let promise = with_viz(|viz| viz.render_string(src))?;
	match JsFuture::from(promise).await {
		Ok(svg) => svg
			.as_string()
			.ok_or_else(|| AppError::Render("graphviz returned no svg".into())),
		Err(e) => {
			// A Viz instance is unusable after a failed render.
			debug!("resetting graphviz engine after render failure");
			VIZ.with(|cell| cell.borrow_mut().take());
			Err(AppError::render(e))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_ids_are_unique_within_a_millisecond() {
		let mut ids = RenderIds::default();
		let a = ids.next_id(1_700_000_000_123.0);
		let b = ids.next_id(1_700_000_000_123.0);
		assert_eq!(a, "m-1700000000123-1");
		assert_eq!(b, "m-1700000000123-2");
	}
}
