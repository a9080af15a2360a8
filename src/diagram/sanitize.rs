//! Scrubs renderer output before it is written into the page with
//! `inner_html`. Diagram text partly originates from user prompts relayed by
//! a remote service, so the markup is untrusted.

use std::borrow::Cow;
use std::sync::OnceLock;

use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::{Captures, Regex};

use crate::error::AppError;

/// Elements that survive sanitizing, lowercased. Anything else is unwrapped
/// and its children are checked on their own.
const ALLOWED_TAGS: &[&str] = &[
	// svg
	"svg",
	"g",
	"defs",
	"desc",
	"title",
	"symbol",
	"use",
	"marker",
	"path",
	"rect",
	"circle",
	"ellipse",
	"line",
	"polyline",
	"polygon",
	"text",
	"tspan",
	"textpath",
	"a",
	"image",
	"clippath",
	"mask",
	"pattern",
	"lineargradient",
	"radialgradient",
	"stop",
	"filter",
	"feblend",
	"fecolormatrix",
	"fecomposite",
	"fedropshadow",
	"feflood",
	"fegaussianblur",
	"femerge",
	"femergenode",
	"feoffset",
	"style",
	"switch",
	"foreignobject",
	// html labels
	"div",
	"span",
	"p",
	"br",
	"b",
	"i",
	"u",
	"s",
	"em",
	"strong",
	"small",
	"sub",
	"sup",
	"code",
	"pre",
	"hr",
	"ul",
	"ol",
	"li",
	"table",
	"thead",
	"tbody",
	"tr",
	"th",
	"td",
	"img",
];

/// Removed together with their content.
const DROPPED_TAGS: &[&str] = &[
	"script",
	"iframe",
	"object",
	"embed",
	"set",
	"animate",
	"animatemotion",
	"animatetransform",
];

const URI_ATTRS: &[&str] = &[
	"href",
	"xlink:href",
	"src",
	"action",
	"formaction",
	"to",
	"from",
	"by",
	"values",
];

fn entity_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"(?i)&#x([0-9a-f]+);?|&#([0-9]+);?|&(colon|tab|newline);").expect("valid regex")
	})
}

/// Decodes numeric character references and the named entities browsers
/// accept inside URL schemes. `lol_html` hands out raw attribute text.
fn decode_entities(value: &str) -> Cow<'_, str> {
	entity_regex().replace_all(value, |caps: &Captures<'_>| {
		let code = if let Some(hex) = caps.get(1) {
			u32::from_str_radix(hex.as_str(), 16).ok()
		} else if let Some(dec) = caps.get(2) {
			dec.as_str().parse().ok()
		} else {
			match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
				Some("colon") => Some(u32::from(':')),
				Some("tab") => Some(u32::from('\t')),
				_ => Some(u32::from('\n')),
			}
		};
		code.and_then(char::from_u32)
			.map(String::from)
			.unwrap_or_default()
	})
}

fn is_unsafe_uri(value: &str) -> bool {
	let compact: String = decode_entities(value)
		.chars()
		.filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
		.collect::<String>()
		.to_ascii_lowercase();
	if compact.starts_with("javascript:") || compact.starts_with("vbscript:") {
		return true;
	}
	compact.starts_with("data:") && !compact.starts_with("data:image/")
}

/// Removes scripting vectors from SVG markup.
///
/// Elements outside a fixed SVG and label-HTML allowlist are unwrapped;
/// scripts, frames, plugins and SVG animation elements are dropped with their
/// content. Every `on*` attribute goes, as does any URI-carrying attribute
/// whose decoded value uses a script or non-image `data:` scheme. `<style>`
/// and `<foreignObject>` are kept: Mermaid relies on both for its labels and
/// theme CSS.
pub fn sanitize_svg(svg: &str) -> Result<String, AppError> {
	if svg.is_empty() {
		return Ok(String::new());
	}

	let handlers = vec![element!("*", |el| {
		let lc_tag = el.tag_name().to_ascii_lowercase();
		if DROPPED_TAGS.contains(&lc_tag.as_str()) {
			el.remove();
			return Ok(());
		}
		if !ALLOWED_TAGS.contains(&lc_tag.as_str()) {
			el.remove_and_keep_content();
			return Ok(());
		}

		let attrs: Vec<(String, String)> = el
			.attributes()
			.iter()
			.map(|a| (a.name(), a.value()))
			.collect();
		for (name, value) in attrs {
			let lc = name.to_ascii_lowercase();
			if lc.starts_with("on") || (URI_ATTRS.contains(&lc.as_str()) && is_unsafe_uri(&value))
			{
				el.remove_attribute(&name);
			}
		}
		Ok(())
	})];

	rewrite_str(
		svg,
		RewriteStrSettings {
			element_content_handlers: handlers,
			..RewriteStrSettings::new()
		},
	)
	.map_err(|e| AppError::Sanitize(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn removes_scripts_and_handlers() {
		let svg = r#"<svg id="m-1" xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script><g onclick="steal()" class="node"><rect width="10" height="10"></rect></g></svg>"#;
		let out = sanitize_svg(svg).unwrap();
		assert!(!out.contains("<script"));
		assert!(!out.contains("alert(1)"));
		assert!(!out.contains("onclick"));
		assert!(out.contains(r#"<g class="node">"#));
		assert!(out.starts_with("<svg"));
	}

	#[test]
	fn strips_script_uris_but_keeps_fragment_links() {
		let svg = r##"<svg><a href="javascript:alert(1)"><text>x</text></a><a xlink:href=" JaVaScRiPt:evil()">y</a><use href="#arrowhead"></use><image href="data:image/png;base64,AAAA"></image><a href="data:text/html;base64,PHNjcmlwdD4="></a></svg>"##;
		let out = sanitize_svg(svg).unwrap();
		assert!(!out.to_ascii_lowercase().contains("javascript:"));
		assert!(!out.contains("data:text/html"));
		assert!(out.contains(r##"href="#arrowhead""##));
		assert!(out.contains("data:image/png"));
	}

	#[test]
	fn entity_encoded_schemes_are_decoded_before_checking() {
		let svg = r#"<svg><a xlink:href="&#106;avascript:alert(1)"><text>a</text></a><a href="&#x6A;avascript&colon;alert(2)">b</a><a href="java&#9;script:alert(3)">c</a><a href="https://example.com/?q=&#49;">d</a></svg>"#;
		let out = sanitize_svg(svg).unwrap();
		assert!(!out.contains("alert(1)"));
		assert!(!out.contains("alert(2)"));
		assert!(!out.contains("alert(3)"));
		assert!(out.contains(r#"href="https://example.com/?q=&#49;""#));
	}

	#[test]
	fn animation_elements_cannot_rewrite_links() {
		let svg = r#"<svg><a><set attributeName="href" to="javascript:alert(1)"></set><animate attributeName="xlink:href" values="javascript:alert(2)"></animate><text>go</text></a></svg>"#;
		let out = sanitize_svg(svg).unwrap();
		assert!(!out.contains("javascript"));
		assert!(!out.contains("<set"));
		assert!(!out.contains("<animate"));
		assert!(out.contains("<text>go</text>"));
	}

	#[test]
	fn forms_inside_html_labels_are_unwrapped() {
		let svg = r#"<svg><foreignObject><div><form action="javascript:alert(1)"><button formaction="javascript:alert(2)">go</button></form></div></foreignObject></svg>"#;
		let out = sanitize_svg(svg).unwrap();
		assert!(!out.contains("javascript"));
		assert!(!out.contains("<form"));
		assert!(!out.contains("<button"));
		assert!(out.contains("<div>go</div>"));
	}

	#[test]
	fn keeps_theme_css_and_html_labels() {
		let svg = r#"<svg><style>#m-1 .node rect{fill:#111827;}</style><foreignObject width="40" height="20"><div xmlns="http://www.w3.org/1999/xhtml"><span class="nodeLabel">Gateway</span></div></foreignObject></svg>"#;
		let out = sanitize_svg(svg).unwrap();
		assert!(out.contains("<style>#m-1 .node rect{fill:#111827;}</style>"));
		assert!(out.contains(r#"<span class="nodeLabel">Gateway</span>"#));
	}

	#[test]
	fn removes_embedded_frames() {
		let out = sanitize_svg(r#"<svg><iframe src="https://x"></iframe><object data="x"></object><g/></svg>"#)
			.unwrap();
		assert!(!out.contains("iframe"));
		assert!(!out.contains("object"));
	}

	#[test]
	fn empty_markup_passes_through() {
		assert_eq!(sanitize_svg("").unwrap(), "");
	}
}
