//! Mermaid source styling: direction injection and the `%%{init}%%`
//! directive carrying theme variables, layout spacing and CSS overrides.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::presets::{MermaidPreset, PresetVars};
use crate::types::Direction;

option_enum! {
	/// Mermaid's built-in base themes.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
	#[serde(rename_all = "lowercase")]
	pub enum MermaidTheme {
		/// Mermaid's stock look.
		#[default]
		Default => ("default", "default"),
		/// Light text on dark shapes.
		Dark => ("dark", "dark"),
		/// Greys, suited to print.
		Neutral => ("neutral", "neutral"),
		/// Greens.
		Forest => ("forest", "forest"),
	}
}

const FONT_FAMILY: &str = "Inter, ui-sans-serif, system-ui, -apple-system";

const BASE_CSS: &str = "
      .node rect,.node circle,.node ellipse { rx:14; ry:14; filter: drop-shadow(0 4px 12px rgba(0,0,0,.12)); }
      .edgePath path { stroke-width: 1.6px; }
      .edgeLabel { font-weight: 600; }
      .cluster rect { rx:16; ry:16; }
";

const GLASS_CSS: &str = "      .node rect { backdrop-filter: blur(6px); fill-opacity:.85 }\n";

fn direction_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"(?m)^(?P<head>[ \t]*(?:flowchart|graph)[ \t]+)\w+").expect("valid regex")
	})
}

/// Sets the flow direction of `src`.
///
/// The first `flowchart <dir>` (or `graph <dir>`) declaration has only its
/// direction token replaced; without one, a `flowchart <dir>` line is
/// prepended. Empty input is returned unchanged.
pub fn apply_direction(src: &str, dir: Direction) -> String {
	if src.is_empty() {
		return String::new();
	}
	let re = direction_regex();
	if re.is_match(src) {
		re.replacen(src, 1, |caps: &regex::Captures<'_>| {
			format!("{}{}", &caps["head"], dir.as_str())
		})
		.into_owned()
	} else {
		format!("flowchart {}\n{}", dir.as_str(), src)
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables<'a> {
	font_family: &'static str,
	#[serde(flatten)]
	preset: &'a PresetVars,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlowchartLayout {
	curve: &'static str,
	padding: u32,
	node_spacing: u32,
	rank_spacing: u32,
}

const FLOWCHART_LAYOUT: FlowchartLayout = FlowchartLayout {
	curve: "basis",
	padding: 12,
	node_spacing: 48,
	rank_spacing: 64,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitConfig<'a> {
	theme: MermaidTheme,
	theme_variables: ThemeVariables<'a>,
	flowchart: &'a FlowchartLayout,
	#[serde(rename = "themeCSS")]
	theme_css: String,
}

fn theme_css(preset: MermaidPreset) -> String {
	let mut css = String::from(BASE_CSS);
	if preset == MermaidPreset::Glass {
		css.push_str(GLASS_CSS);
	}
	css.push_str("    ");
	css
}

/// JSON body of the `%%{init}%%` directive for a theme/preset pair.
pub fn init_config(theme: MermaidTheme, preset: MermaidPreset) -> serde_json::Value {
	let cfg = InitConfig {
		theme,
		theme_variables: ThemeVariables {
			font_family: FONT_FAMILY,
			preset: preset.vars(),
		},
		flowchart: &FLOWCHART_LAYOUT,
		theme_css: theme_css(preset),
	};
	serde_json::to_value(cfg).unwrap_or(serde_json::Value::Null)
}

/// Wraps `src` with the init directive and a `classDef default` epilogue.
pub fn mermaid_styled(src: &str, theme: MermaidTheme, preset: MermaidPreset) -> String {
	let v = preset.vars();
	let init = format!("%%{{init: {} }}%%", init_config(theme, preset));
	let class_defaults = format!(
		"classDef default fill:{},stroke:{},color:{},rx:14,ry:14;",
		v.primary_color, v.primary_border_color, v.primary_text_color
	);
	format!("{init}\n{src}\n{class_defaults}\n")
}
