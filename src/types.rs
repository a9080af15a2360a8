//! Wire types shared with the generation service and the option enums behind
//! every `<select>` in the UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Returned by `FromStr` when a string names no known variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown option `{0}`")]
pub struct UnknownVariant(pub String);

/// Declares a fieldless enum whose variants map to fixed option strings and
/// human labels, with `ALL`, `as_str`, `label`, `Display` and `FromStr`.
macro_rules! option_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$($(#[$vmeta:meta])* $variant:ident => ($value:literal, $label:literal)),+ $(,)?
		}
	) => {
		$(#[$meta])*
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}

		impl $name {
			/// Every variant in display order.
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			/// Option value, identical to the wire value.
			pub fn as_str(self) -> &'static str {
				match self {
					$($name::$variant => $value),+
				}
			}

			/// Text shown to the user.
			pub fn label(self) -> &'static str {
				match self {
					$($name::$variant => $label),+
				}
			}
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl ::std::str::FromStr for $name {
			type Err = $crate::types::UnknownVariant;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($value => Ok($name::$variant),)+
					other => Err($crate::types::UnknownVariant(other.to_string())),
				}
			}
		}
	};
}

option_enum! {
	/// Light or dark page chrome, persisted across sessions.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(rename_all = "lowercase")]
	pub enum SiteTheme {
		/// Default when nothing is stored.
		#[default]
		Light => ("light", "light"),
		/// Sets the `dark` class on the document root.
		Dark => ("dark", "dark"),
	}
}

impl SiteTheme {
	/// `true` for [`SiteTheme::Dark`].
	pub fn is_dark(self) -> bool {
		self == SiteTheme::Dark
	}
}

option_enum! {
	/// Diagram source dialect requested from the service and rendered locally.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(rename_all = "lowercase")]
	pub enum Engine {
		/// Mermaid flowchart and ER syntax.
		#[default]
		Mermaid => ("mermaid", "Mermaid"),
		/// Graphviz DOT, rendered with Viz.js.
		Dot => ("dot", "Graphviz (DOT)"),
	}
}

impl Engine {
	/// Info string used for markdown code fences.
	pub fn fence(self) -> &'static str {
		match self {
			Engine::Mermaid => "mermaid",
			Engine::Dot => "dot",
		}
	}
}

option_enum! {
	/// Semantic category of the requested diagram.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(rename_all = "lowercase")]
	pub enum DiagramKind {
		/// Flowchart; the only kind with a direction.
		#[default]
		Flow => ("flow", "flow"),
		/// Entity-relationship diagram.
		Er => ("er", "er"),
	}
}

option_enum! {
	/// Flow direction of a flowchart.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(rename_all = "UPPERCASE")]
	pub enum Direction {
		/// Top to bottom.
		#[default]
		Td => ("TD", "Top→Down"),
		/// Left to right.
		Lr => ("LR", "Left→Right"),
		/// Bottom to top.
		Bt => ("BT", "Bottom→Top"),
		/// Right to left.
		Rl => ("RL", "Right→Left"),
	}
}

/// Graph vertex as produced by the generation service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Identifier referenced by edges.
	pub id: String,
	/// Display text.
	#[serde(default)]
	pub label: Option<String>,
	/// Free-form category such as `service` or `entity`.
	#[serde(default)]
	pub kind: Option<String>,
	/// Arbitrary key/value attributes.
	#[serde(default)]
	pub props: Option<BTreeMap<String, String>>,
}

impl Node {
	/// Label to display, falling back to the id.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.id)
	}
}

/// Directed relation between two node ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Id of the tail node.
	pub source: String,
	/// Id of the head node.
	pub target: String,
	/// Text drawn along the edge.
	#[serde(default)]
	pub label: Option<String>,
	/// Free-form relation category.
	#[serde(default)]
	pub kind: Option<String>,
}

/// Read-only graph returned alongside the diagram code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	/// Vertices.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Relations between [`Graph::nodes`].
	#[serde(default)]
	pub edges: Vec<Edge>,
}

/// Body of `POST /generate`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateRequest {
	/// Natural-language description or mini-DSL text.
	pub prompt: String,
	/// Requested diagram kind.
	pub diagram: DiagramKind,
	/// Source dialect to generate.
	pub renderer: Engine,
	/// Flow direction hint.
	pub direction: Direction,
}

/// Successful `/generate` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
	/// Raw diagram source.
	pub code: String,
	/// Server-side fenced snippet; stored but not displayed.
	#[serde(default)]
	pub markdown: String,
	/// Structure the code was generated from.
	pub graph: Graph,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn option_strings_round_trip() {
		for d in Direction::ALL {
			assert_eq!(d.as_str().parse::<Direction>(), Ok(*d));
		}
		for e in Engine::ALL {
			assert_eq!(e.as_str().parse::<Engine>(), Ok(*e));
		}
		assert_eq!(
			"sideways".parse::<Direction>(),
			Err(UnknownVariant("sideways".into()))
		);
		let err: Box<dyn std::error::Error> = Box::new(UnknownVariant("sideways".into()));
		assert_eq!(err.to_string(), "unknown option `sideways`");
	}

	#[test]
	fn request_serializes_wire_values() {
		let req = GenerateRequest {
			prompt: "NODES: A(a)".into(),
			diagram: DiagramKind::Er,
			renderer: Engine::Dot,
			direction: Direction::Rl,
		};
		let json = serde_json::to_value(&req).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"prompt": "NODES: A(a)",
				"diagram": "er",
				"renderer": "dot",
				"direction": "RL",
			})
		);
	}

	#[test]
	fn response_tolerates_null_optionals() {
		let body = r#"{
			"code": "flowchart TD\n    A --> B",
			"markdown": "",
			"graph": {
				"nodes": [{"id": "A", "label": null, "kind": null, "props": null}, {"id": "B", "label": "Bee"}],
				"edges": [{"source": "A", "target": "B", "label": null}]
			}
		}"#;
		let resp: GenerateResponse = serde_json::from_str(body).unwrap();
		assert_eq!(resp.graph.nodes[0].display_label(), "A");
		assert_eq!(resp.graph.nodes[1].display_label(), "Bee");
		assert_eq!(resp.graph.edges[0].label, None);
	}
}
