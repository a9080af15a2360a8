//! Diagram source styling and rendering.
//!
//! Raw code from the generation service is first styled for the selected
//! engine ([`styled_source`]), then rendered to SVG by the matching adapter
//! and sanitized before it reaches the page ([`render_styled`]).

mod dot;
mod markdown;
mod mermaid;
mod presets;
mod render;
mod sanitize;

pub use dot::dot_styled;
pub use markdown::{markdown_fence, strip_fence};
pub use mermaid::{MermaidTheme, apply_direction, mermaid_styled};
pub use presets::{MermaidPreset, PresetVars};
pub use render::{RenderIds, init_mermaid, render_dot, render_mermaid};
pub use sanitize::sanitize_svg;

use crate::error::AppError;
use crate::types::{DiagramKind, Direction, Engine, SiteTheme};

/// Every selection that influences how code is styled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleOptions {
	/// Renderer the source is styled for.
	pub engine: Engine,
	/// Only flowcharts take a direction.
	pub diagram: DiagramKind,
	/// Flowchart direction.
	pub direction: Direction,
	/// Mermaid base theme.
	pub mermaid_theme: MermaidTheme,
	/// Mermaid colour preset.
	pub preset: MermaidPreset,
	/// Drives the DOT palette.
	pub site_theme: SiteTheme,
}

/// Source ready to hand to a renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyledSource {
	/// Mermaid text with its init directive.
	Mermaid(String),
	/// DOT text with theme attributes.
	Dot(String),
}

/// Code as shown in the Diagram Code panel: Mermaid flowcharts carry the
/// selected direction, everything else is shown verbatim.
pub fn effective_source(engine: Engine, diagram: DiagramKind, direction: Direction, code: &str) -> String {
	match (engine, diagram) {
		(Engine::Mermaid, DiagramKind::Flow) => apply_direction(code, direction),
		_ => code.to_string(),
	}
}

/// Applies direction and theme styling for the selected engine.
pub fn styled_source(code: &str, opts: &StyleOptions) -> StyledSource {
	match opts.engine {
		Engine::Mermaid => {
			let base = effective_source(opts.engine, opts.diagram, opts.direction, code);
			StyledSource::Mermaid(mermaid_styled(&base, opts.mermaid_theme, opts.preset))
		}
		Engine::Dot => StyledSource::Dot(dot_styled(code, opts.site_theme)),
	}
}

/// Renders styled source and sanitizes the resulting SVG.
pub async fn render_styled(render_id: &str, source: &StyledSource) -> Result<String, AppError> {
	let svg = match source {
		StyledSource::Mermaid(src) => render_mermaid(render_id, src).await?,
		StyledSource::Dot(src) => render_dot(src).await?,
	};
	sanitize_svg(&svg)
}

#[cfg(test)]
mod tests {
	use super::*;

	const FLOW_CODE: &str = "flowchart TD\n    WEB[\"Web App\"]\n    GW[\"API Gateway\"]\n    WEB -- browse --> GW";

	#[test]
	fn mermaid_flow_is_styled_with_selected_direction() {
		let opts = StyleOptions {
			direction: Direction::Lr,
			..StyleOptions::default()
		};
		let StyledSource::Mermaid(src) = styled_source(FLOW_CODE, &opts) else {
			panic!("expected mermaid source");
		};
		assert!(src.starts_with("%%{init: "));
		assert!(src.contains("\nflowchart LR\n    WEB[\"Web App\"]"));
		assert!(!src.contains("flowchart TD"));
	}

	#[test]
	fn mermaid_er_keeps_code_verbatim() {
		let code = "erDiagram\n    usr ||--o{ ord : \"places\"";
		let opts = StyleOptions {
			diagram: DiagramKind::Er,
			direction: Direction::Rl,
			..StyleOptions::default()
		};
		assert_eq!(effective_source(Engine::Mermaid, DiagramKind::Er, Direction::Rl, code), code);
		let StyledSource::Mermaid(src) = styled_source(code, &opts) else {
			panic!("expected mermaid source");
		};
		let body: Vec<&str> = src.lines().skip(1).collect();
		assert_eq!(body[..2], ["erDiagram", "    usr ||--o{ ord : \"places\""]);
		assert!(body[2].starts_with("classDef default "));
		assert!(!src.contains("flowchart RL"));
	}

	#[test]
	fn dot_ignores_direction_and_follows_site_theme() {
		let code = "digraph G {\n  rankdir=TB;\n  a -> b;\n}";
		let opts = StyleOptions {
			engine: Engine::Dot,
			direction: Direction::Lr,
			site_theme: SiteTheme::Dark,
			..StyleOptions::default()
		};
		assert_eq!(effective_source(Engine::Dot, DiagramKind::Flow, Direction::Lr, code), code);
		let StyledSource::Dot(src) = styled_source(code, &opts) else {
			panic!("expected dot source");
		};
		assert!(src.contains("bgcolor=\"#0b1220\""));
		assert!(src.contains("rankdir=TB;"));
	}
}
