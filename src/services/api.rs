use log::debug;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::config::AppConfig;
use crate::error::{AppError, REQUEST_FAILED};
use crate::types::{GenerateRequest, GenerateResponse};

#[derive(Deserialize)]
struct ErrorBody {
	detail: Option<serde_json::Value>,
}

fn detail_message(detail: serde_json::Value) -> Option<String> {
	match detail {
		serde_json::Value::String(s) => Some(s).filter(|s| !s.is_empty()),
		serde_json::Value::Null => None,
		// e.g. validation error lists
		other => Some(other.to_string()),
	}
}

/// Interprets a `/generate` reply.
///
/// Non-success statuses fail with the server's `detail` when it has one and
/// [`REQUEST_FAILED`] otherwise. Successful bodies are returned as parsed.
pub fn decode_response(status: u16, body: &str) -> Result<GenerateResponse, AppError> {
	if !(200..300).contains(&status) {
		let message = serde_json::from_str::<ErrorBody>(body)
			.ok()
			.and_then(|b| b.detail)
			.and_then(detail_message)
			.unwrap_or_else(|| REQUEST_FAILED.to_string());
		return Err(AppError::Request(message));
	}
	serde_json::from_str(body).map_err(|e| AppError::Request(format!("Invalid response: {e}")))
}

/// Sends one generation request. No retry and no timeout.
pub async fn submit(config: &AppConfig, req: &GenerateRequest) -> Result<GenerateResponse, AppError> {
	let window = web_sys::window().ok_or(AppError::Browser("window"))?;
	let payload =
		serde_json::to_string(req).map_err(|e| AppError::Request(format!("Invalid request: {e}")))?;

	let headers = Headers::new().map_err(AppError::request)?;
	headers
		.set("Content-Type", "application/json")
		.map_err(AppError::request)?;
	let init = RequestInit::new();
	init.set_method("POST");
	init.set_headers(&headers);
	init.set_body(&JsValue::from_str(&payload));

	let url = config.generate_url();
	let request = Request::new_with_str_and_init(&url, &init).map_err(AppError::request)?;
	debug!("POST {}", url);

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(AppError::request)?
		.dyn_into()
		.map_err(AppError::request)?;
	let text = JsFuture::from(response.text().map_err(AppError::request)?)
		.await
		.map_err(AppError::request)?
		.as_string()
		.unwrap_or_default();
	debug!("POST {} -> {}", url, response.status());

	decode_response(response.status(), &text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unprocessable_entity_surfaces_detail() {
		let err = decode_response(422, r#"{"detail":"invalid prompt"}"#).unwrap_err();
		assert_eq!(err, AppError::Request("invalid prompt".into()));
		assert_eq!(err.to_string(), "invalid prompt");
	}

	#[test]
	fn missing_detail_falls_back_to_generic_message() {
		for body in ["{}", "<html>Bad Gateway</html>", "", r#"{"detail":null}"#] {
			let err = decode_response(502, body).unwrap_err();
			assert_eq!(err.to_string(), REQUEST_FAILED);
		}
	}

	#[test]
	fn structured_detail_is_stringified() {
		let err = decode_response(422, r#"{"detail":[{"msg":"field required"}]}"#).unwrap_err();
		assert!(err.to_string().contains("field required"));
	}

	#[test]
	fn success_body_is_returned_unchanged() {
		let body = r#"{
			"code": "flowchart LR\n    A[\"Service A\"]\n    A -- calls --> B",
			"markdown": "```mermaid\nflowchart LR\n```",
			"graph": {"nodes": [{"id": "A", "label": "Service A"}, {"id": "B"}], "edges": [{"source": "A", "target": "B", "label": "calls"}]}
		}"#;
		let resp = decode_response(200, body).unwrap();
		assert!(resp.code.starts_with("flowchart LR"));
		assert_eq!(resp.graph.nodes.len(), 2);
		assert_eq!(resp.graph.edges[0].label.as_deref(), Some("calls"));
	}

	#[test]
	fn malformed_success_body_is_a_request_error() {
		let err = decode_response(200, "not json").unwrap_err();
		assert!(matches!(err, AppError::Request(m) if m.starts_with("Invalid response")));
	}
}
