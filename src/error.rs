//! Error type shared by the request, render and browser layers.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Generic message used when the service gives no `detail`.
pub const REQUEST_FAILED: &str = "Request failed";

/// Failures surfaced to the user as a single banner message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
	/// The fetch was rejected or the service answered with a non-success status.
	#[error("{0}")]
	Request(String),
	/// Mermaid or Graphviz rejected the styled source.
	#[error("{0}")]
	Render(String),
	/// The renderer's SVG could not be parsed for sanitizing.
	#[error("could not sanitize diagram markup: {0}")]
	Sanitize(String),
	/// A browser API the client relies on is not available.
	#[error("{0} is not available")]
	Browser(&'static str),
}

impl AppError {
	/// Wraps a rejected fetch.
	pub fn request(err: JsValue) -> Self {
		AppError::Request(js_message(&err))
	}

	/// Wraps a renderer exception, keeping the library's message.
	pub fn render(err: JsValue) -> Self {
		AppError::Render(js_message(&err))
	}
}

/// Best-effort text for a thrown JS value: `Error.message`, a thrown string,
/// or the debug form of anything else.
pub fn js_message(err: &JsValue) -> String {
	if let Some(e) = err.dyn_ref::<js_sys::Error>() {
		return String::from(e.message());
	}
	if let Some(s) = err.as_string() {
		return s;
	}
	format!("{:?}", err)
}
