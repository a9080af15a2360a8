use std::sync::OnceLock;

use regex::Regex;

use crate::types::SiteTheme;

fn header_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"(?i)^\s*(digraph|graph)\b").expect("valid regex"))
}

struct DotPalette {
	background: &'static str,
	node_border: &'static str,
	node_fill: &'static str,
	edge: &'static str,
}

const LIGHT: DotPalette = DotPalette {
	background: "white",
	node_border: "#e2e8f0",
	node_fill: "#ffffff",
	edge: "#94a3b8",
};

const DARK: DotPalette = DotPalette {
	background: "#0b1220",
	node_border: "#334155",
	node_fill: "#111827",
	edge: "#64748b",
};

/// Default graph/node/edge attribute statements for the site theme.
pub fn dot_attributes(theme: SiteTheme) -> String {
	let p = if theme.is_dark() { &DARK } else { &LIGHT };
	format!(
		"graph [bgcolor=\"{}\", pad=12, nodesep=0.5, ranksep=0.7, splines=true];\n\
		 node  [shape=box, style=\"rounded,filled\", color=\"{}\", fillcolor=\"{}\", fontname=\"Inter\", fontsize=12];\n\
		 edge  [color=\"{}\", penwidth=1.5, arrowsize=0.8];\n",
		p.background, p.node_border, p.node_fill, p.edge
	)
}

/// Applies theme attributes to DOT source.
///
/// Source with a `graph`/`digraph` header gets the attributes spliced in
/// right after its first `{`; anything else is wrapped in `digraph G { }`.
/// Not idempotent on its own output.
pub fn dot_styled(inner: &str, theme: SiteTheme) -> String {
	let attrs = dot_attributes(theme);
	if header_regex().is_match(inner) {
		if let Some(pos) = inner.find('{') {
			let mut out = String::with_capacity(inner.len() + attrs.len() + 1);
			out.push_str(&inner[..=pos]);
			out.push('\n');
			out.push_str(&attrs);
			out.push_str(&inner[pos + 1..]);
			return out;
		}
		return inner.to_string();
	}
	format!("digraph G {{\n{attrs}{inner}\n}}")
}

#[cfg(test)]
mod tests {
	use super::*;

	const BODY: &str = "  A [label=\"Gateway\"];\n  A -> B [label=\"calls\"];";

	#[test]
	fn attributes_follow_site_theme() {
		let light = dot_attributes(SiteTheme::Light);
		assert!(light.starts_with("graph [bgcolor=\"white\", pad=12"));
		assert!(light.contains("fillcolor=\"#ffffff\""));
		assert!(light.contains("edge  [color=\"#94a3b8\", penwidth=1.5, arrowsize=0.8];"));

		let dark = dot_attributes(SiteTheme::Dark);
		assert!(dark.contains("bgcolor=\"#0b1220\""));
		assert!(dark.contains("color=\"#334155\", fillcolor=\"#111827\""));
		assert_eq!(dark.lines().count(), 3);
	}

	#[test]
	fn splices_after_existing_header() {
		let src = format!("digraph G {{\n  rankdir=LR;\n{BODY}\n}}");
		let out = dot_styled(&src, SiteTheme::Light);
		assert!(out.starts_with("digraph G {\ngraph [bgcolor="));
		assert!(out.ends_with(&format!("\n  rankdir=LR;\n{BODY}\n}}")));
		assert_eq!(out.matches("digraph").count(), 1);
		assert_eq!(out.matches('{').count(), 1);
	}

	#[test]
	fn header_detection_ignores_case_and_leading_space() {
		let out = dot_styled("\n  GRAPH g { a -- b }", SiteTheme::Dark);
		assert!(out.starts_with("\n  GRAPH g {\ngraph [bgcolor=\"#0b1220\""));
		assert!(out.ends_with(" a -- b }"));
	}

	#[test]
	fn wraps_bare_statements() {
		let out = dot_styled(BODY, SiteTheme::Light);
		assert!(out.starts_with("digraph G {\n"));
		assert!(out.ends_with(&format!("{BODY}\n}}")));
		assert!(out.contains(BODY));
		assert_eq!(out.matches("digraph").count(), 1);
	}

	#[test]
	fn subgraph_keyword_is_not_a_header() {
		let out = dot_styled("subgraph cluster_a { a }", SiteTheme::Light);
		assert!(out.starts_with("digraph G {\n"));
	}

	#[test]
	fn reapplying_double_wraps() {
		let once = dot_styled(BODY, SiteTheme::Light);
		let twice = dot_styled(&once, SiteTheme::Light);
		assert_eq!(twice.matches("bgcolor").count(), 2);
	}
}
