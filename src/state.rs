//! The single UI state aggregate behind the home page and its transitions.
//!
//! A generation moves `Idle | Ready | Failed -> Generating -> Ready | Failed`.
//! Every generation carries a [`GenerationToken`]; completions whose token is
//! no longer the latest are dropped instead of overwriting newer results.

use crate::constants::Example;
use crate::diagram::{
	MermaidPreset, MermaidTheme, RenderIds, StyleOptions, effective_source, markdown_fence,
};
use crate::error::AppError;
use crate::types::{
	DiagramKind, Direction, Engine, GenerateRequest, GenerateResponse, Graph, SiteTheme,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	Generating,
	Ready,
	Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

/// Issues generation tokens and remembers which one is current.
#[derive(Clone, Debug, Default)]
pub struct GenerationTracker {
	latest: u64,
}

impl GenerationTracker {
	pub fn issue(&mut self) -> GenerationToken {
		self.latest += 1;
		GenerationToken(self.latest)
	}

	pub fn is_current(&self, token: GenerationToken) -> bool {
		token.0 == self.latest
	}

	/// Makes every outstanding token stale.
	pub fn invalidate(&mut self) {
		self.latest += 1;
	}
}

/// Everything one generation needs, frozen when it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationJob {
	pub token: GenerationToken,
	pub request: GenerateRequest,
	pub style: StyleOptions,
	pub render_id: String,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
	pub prompt: String,
	pub diagram: DiagramKind,
	pub engine: Engine,
	pub mermaid_theme: MermaidTheme,
	pub preset: MermaidPreset,
	pub direction: Direction,
	pub site_theme: SiteTheme,

	pub code: String,
	pub markdown: String,
	pub graph: Option<Graph>,
	pub svg: String,
	pub phase: Phase,
	pub error: Option<String>,

	tracker: GenerationTracker,
	render_ids: RenderIds,
}

impl UiState {
	pub fn new(site_theme: SiteTheme) -> Self {
		Self {
			site_theme,
			..Self::default()
		}
	}

	pub fn is_loading(&self) -> bool {
		self.phase == Phase::Generating
	}

	pub fn style_options(&self) -> StyleOptions {
		StyleOptions {
			engine: self.engine,
			diagram: self.diagram,
			direction: self.direction,
			mermaid_theme: self.mermaid_theme,
			preset: self.preset,
			site_theme: self.site_theme,
		}
	}

	pub fn request(&self) -> GenerateRequest {
		GenerateRequest {
			prompt: self.prompt.clone(),
			diagram: self.diagram,
			renderer: self.engine,
			direction: self.direction,
		}
	}

	/// Enters `Generating`, clearing the preview and error, and snapshots
	/// the current selections.
	pub fn begin(&mut self, now_ms: f64) -> GenerationJob {
		self.phase = Phase::Generating;
		self.error = None;
		self.svg.clear();
		GenerationJob {
			token: self.tracker.issue(),
			request: self.request(),
			style: self.style_options(),
			render_id: self.render_ids.next_id(now_ms),
		}
	}

	/// Stores a fetched response. Returns `false` (and changes nothing) for a
	/// stale token.
	pub fn accept_response(&mut self, token: GenerationToken, resp: GenerateResponse) -> bool {
		if !self.tracker.is_current(token) {
			return false;
		}
		self.code = resp.code;
		self.markdown = resp.markdown;
		self.graph = Some(resp.graph);
		true
	}

	/// `Generating -> Ready` with the rendered SVG. Returns `false` for a
	/// stale token.
	pub fn succeed(&mut self, token: GenerationToken, svg: String) -> bool {
		if !self.tracker.is_current(token) {
			return false;
		}
		self.svg = svg;
		self.error = None;
		self.phase = Phase::Ready;
		true
	}

	/// `Generating -> Failed`. The preview is cleared; code panels keep the
	/// last fetched text.
	pub fn fail(&mut self, token: GenerationToken, err: AppError) -> bool {
		if !self.tracker.is_current(token) {
			return false;
		}
		self.svg.clear();
		self.error = Some(err.to_string());
		self.phase = Phase::Failed;
		true
	}

	/// Loads a canned prompt and resets results; in-flight work is orphaned.
	pub fn load_example(&mut self, example: &Example) {
		self.tracker.invalidate();
		self.prompt = example.prompt.to_string();
		self.diagram = example.diagram;
		self.code.clear();
		self.svg.clear();
		self.graph = None;
		self.error = None;
		self.phase = Phase::Idle;
	}

	/// Code for the Diagram Code panel and "Copy Code".
	pub fn effective_code(&self) -> String {
		effective_source(self.engine, self.diagram, self.direction, &self.code)
	}

	pub fn markdown_snippet(&self) -> String {
		markdown_fence(self.engine, &self.effective_code())
	}

	pub fn graph_json(&self) -> Option<String> {
		self.graph
			.as_ref()
			.and_then(|g| serde_json::to_string_pretty(g).ok())
	}

	pub fn shows_direction(&self) -> bool {
		self.diagram == DiagramKind::Flow
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::constants::{ER_EXAMPLE, FLOW_EXAMPLE};
	use crate::diagram::strip_fence;
	use crate::types::{Edge, Node};

	fn response(code: &str) -> GenerateResponse {
		GenerateResponse {
			code: code.to_string(),
			markdown: format!("```mermaid\n{code}\n```"),
			graph: Graph {
				nodes: vec![
					Node {
						id: "A".into(),
						label: Some("Service A".into()),
						..Node::default()
					},
					Node {
						id: "B".into(),
						..Node::default()
					},
				],
				edges: vec![Edge {
					source: "A".into(),
					target: "B".into(),
					label: Some("calls".into()),
					kind: None,
				}],
			},
		}
	}

	#[test]
	fn tracker_only_honours_latest_token() {
		let mut t = GenerationTracker::default();
		let first = t.issue();
		let second = t.issue();
		assert!(!t.is_current(first));
		assert!(t.is_current(second));
		t.invalidate();
		assert!(!t.is_current(second));
	}

	#[test]
	fn successful_generation_reaches_ready() {
		let mut s = UiState::new(SiteTheme::Light);
		s.prompt = FLOW_EXAMPLE.prompt.into();
		s.direction = Direction::Lr;

		let job = s.begin(1000.0);
		assert!(s.is_loading());
		assert_eq!(job.request.direction, Direction::Lr);
		assert_eq!(job.request.renderer, Engine::Mermaid);
		assert_eq!(job.render_id, "m-1000-1");

		assert!(s.accept_response(job.token, response("flowchart TD\n    A --> B")));
		assert!(s.succeed(job.token, "<svg id=\"m-1000-1\"></svg>".into()));
		assert_eq!(s.phase, Phase::Ready);
		assert!(s.svg.starts_with("<svg"));
		assert_eq!(s.effective_code(), "flowchart LR\n    A --> B");
	}

	#[test]
	fn request_failure_keeps_previous_code() {
		let mut s = UiState::default();
		let job = s.begin(1.0);
		s.accept_response(job.token, response("flowchart TD\n    A --> B"));
		s.succeed(job.token, "<svg></svg>".into());

		let job = s.begin(2.0);
		assert!(s.svg.is_empty());
		s.fail(job.token, AppError::Request("invalid prompt".into()));
		assert_eq!(s.phase, Phase::Failed);
		assert_eq!(s.error.as_deref(), Some("invalid prompt"));
		assert_eq!(s.code, "flowchart TD\n    A --> B");
	}

	#[test]
	fn render_failure_clears_svg_but_keeps_fetched_code() {
		let mut s = UiState::default();
		let job = s.begin(1.0);
		s.accept_response(job.token, response("flowchart TD\n  A -->"));
		s.fail(job.token, AppError::Render("Parse error on line 2".into()));
		assert!(s.svg.is_empty());
		assert_eq!(s.code, "flowchart TD\n  A -->");
		assert_eq!(s.error.as_deref(), Some("Parse error on line 2"));
	}

	#[test]
	fn stale_completions_are_discarded() {
		let mut s = UiState::default();
		let old = s.begin(1.0);
		let new = s.begin(2.0);
		assert!(s.accept_response(new.token, response("flowchart TD\n  N")));
		assert!(s.succeed(new.token, "<svg>new</svg>".into()));

		assert!(!s.accept_response(old.token, response("flowchart TD\n  O")));
		assert!(!s.fail(old.token, AppError::Render("late".into())));
		assert_eq!(s.svg, "<svg>new</svg>");
		assert_eq!(s.code, "flowchart TD\n  N");
		assert_eq!(s.error, None);
	}

	#[test]
	fn retry_after_failure_clears_the_error() {
		let mut s = UiState::default();
		let job = s.begin(1.0);
		assert!(s.fail(job.token, AppError::Request("Request failed".into())));
		assert_eq!(s.phase, Phase::Failed);

		let job = s.begin(2.0);
		assert_eq!(s.phase, Phase::Generating);
		assert_eq!(s.error, None);
		assert!(s.accept_response(job.token, response("flowchart TD\n  A --> B")));
		assert!(s.succeed(job.token, "<svg></svg>".into()));
		assert_eq!(s.phase, Phase::Ready);
		assert_eq!(s.error, None);
	}

	#[test]
	fn loading_an_example_orphans_in_flight_work() {
		let mut s = UiState::default();
		let job = s.begin(1.0);
		s.load_example(&ER_EXAMPLE);
		assert_eq!(s.phase, Phase::Idle);
		assert_eq!(s.diagram, DiagramKind::Er);
		assert!(s.prompt.starts_with("Entities (use these ids)"));
		assert!(!s.accept_response(job.token, response("erDiagram")));
		assert!(s.code.is_empty());
		assert!(s.graph.is_none());
	}

	#[test]
	fn direction_change_reformats_without_refetch() {
		let mut s = UiState::default();
		let job = s.begin(1.0);
		s.accept_response(job.token, response("flowchart TD\n  A --> B"));
		s.direction = Direction::Bt;
		assert_eq!(s.effective_code(), "flowchart BT\n  A --> B");
		s.engine = Engine::Dot;
		assert_eq!(s.effective_code(), "flowchart TD\n  A --> B");
	}

	#[test]
	fn markdown_snippet_round_trips_to_code_panel() {
		let mut s = UiState::default();
		assert_eq!(s.markdown_snippet(), "");
		let job = s.begin(1.0);
		s.accept_response(job.token, response("flowchart TD\n  A -- calls --> B"));
		s.direction = Direction::Rl;
		let snippet = s.markdown_snippet();
		assert!(snippet.starts_with("```mermaid\n"));
		assert_eq!(strip_fence(&snippet), Some(s.effective_code().as_str()));
	}

	#[test]
	fn graph_json_is_pretty_printed() {
		let mut s = UiState::default();
		assert_eq!(s.graph_json(), None);
		let job = s.begin(1.0);
		s.accept_response(job.token, response("A"));
		let json = s.graph_json().unwrap();
		assert!(json.contains("\n  \"nodes\": ["));
		assert!(json.contains("\"label\": \"calls\""));
	}
}
