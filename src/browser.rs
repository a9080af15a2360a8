//! Clipboard and file download helpers.

use js_sys::Array;
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::{AppError, js_message};

const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

/// `diagram-<epoch millis>.svg`
pub fn svg_file_name(now_ms: f64) -> String {
	format!("diagram-{}.svg", now_ms as u64)
}

/// Writes plain text to the system clipboard.
pub async fn copy_text(text: &str) -> Result<(), AppError> {
	let window = web_sys::window().ok_or(AppError::Browser("window"))?;
	let promise = window.navigator().clipboard().write_text(text);
	JsFuture::from(promise)
		.await
		.map(|_| ())
		.map_err(|e| {
			warn!("clipboard write failed: {}", js_message(&e));
			AppError::Browser("clipboard")
		})
}

/// Offers `svg` as a download through a temporary object URL.
pub fn download_svg(svg: &str) -> Result<String, AppError> {
	let window = web_sys::window().ok_or(AppError::Browser("window"))?;
	let document = window.document().ok_or(AppError::Browser("document"))?;
	let body = document.body().ok_or(AppError::Browser("document body"))?;

	let opts = BlobPropertyBag::new();
	opts.set_type(SVG_MIME);
	let parts = Array::of1(&JsValue::from_str(svg));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
		.map_err(|_| AppError::Browser("Blob"))?;
	let url = Url::create_object_url_with_blob(&blob).map_err(|_| AppError::Browser("URL"))?;

	let name = svg_file_name(js_sys::Date::now());
	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.ok()
		.and_then(|el| el.dyn_into().ok())
		.ok_or(AppError::Browser("anchor element"))?;
	anchor.set_href(&url);
	anchor.set_download(&name);
	body.append_child(&anchor)
		.map_err(|_| AppError::Browser("document body"))?;
	anchor.click();
	anchor.remove();
	let _ = Url::revoke_object_url(&url);
	Ok(name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_name_carries_timestamp() {
		assert_eq!(svg_file_name(1_760_000_000_000.7), "diagram-1760000000000.svg");
	}
}
