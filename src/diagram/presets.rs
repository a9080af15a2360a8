use serde::Serialize;

option_enum! {
	/// Named colour bundle applied through Mermaid's theme variables.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
	pub enum MermaidPreset {
		/// Dark slate nodes with blue lines.
		#[default]
		Slate => ("slate", "slate"),
		/// Deep navy with cyan accents.
		Ocean => ("ocean", "ocean"),
		/// Warm oranges.
		Sunset => ("sunset", "sunset"),
		/// Dark teal with mint borders.
		Mint => ("mint", "mint"),
		/// Pinks.
		Rose => ("rose", "rose"),
		/// Greyscale on white.
		Mono => ("mono", "mono"),
		/// Translucent fills with a backdrop blur.
		Glass => ("glass", "glass"),
	}
}

/// The subset of Mermaid theme variables a preset controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetVars {
	/// Node fill.
	pub primary_color: &'static str,
	/// Node stroke.
	pub primary_border_color: &'static str,
	/// Node label colour.
	pub primary_text_color: &'static str,
	/// Edge colour.
	pub line_color: &'static str,
	/// Free text colour.
	pub text_color: &'static str,
	/// Background of secondary shapes.
	pub tertiary_color: &'static str,
	/// Subgraph fill, when the preset sets one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cluster_bkg: Option<&'static str>,
	/// Subgraph stroke, when the preset sets one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cluster_border: Option<&'static str>,
}

const SLATE: PresetVars = PresetVars {
	primary_color: "#111827",
	primary_border_color: "#334155",
	primary_text_color: "#e5e7eb",
	line_color: "#60a5fa",
	text_color: "#e5e7eb",
	tertiary_color: "#0b1220",
	cluster_bkg: Some("#0f172a"),
	cluster_border: Some("#334155"),
};

const OCEAN: PresetVars = PresetVars {
	primary_color: "#0f172a",
	primary_border_color: "#155e75",
	primary_text_color: "#e2f5ff",
	line_color: "#22d3ee",
	text_color: "#dbeafe",
	tertiary_color: "#07121f",
	cluster_bkg: Some("#082f49"),
	cluster_border: Some("#155e75"),
};

const SUNSET: PresetVars = PresetVars {
	primary_color: "#2a1612",
	primary_border_color: "#fb923c",
	primary_text_color: "#ffedd5",
	line_color: "#fb7185",
	text_color: "#ffedd5",
	tertiary_color: "#1a0e0b",
	cluster_bkg: Some("#3b1c16"),
	cluster_border: Some("#fb923c"),
};

const MINT: PresetVars = PresetVars {
	primary_color: "#052e2b",
	primary_border_color: "#34d399",
	primary_text_color: "#d1fae5",
	line_color: "#2dd4bf",
	text_color: "#ecfeff",
	tertiary_color: "#041f1d",
	cluster_bkg: Some("#06332f"),
	cluster_border: Some("#34d399"),
};

const ROSE: PresetVars = PresetVars {
	primary_color: "#2b1220",
	primary_border_color: "#f472b6",
	primary_text_color: "#ffe4f1",
	line_color: "#a78bfa",
	text_color: "#ffe4f1",
	tertiary_color: "#1d0c15",
	cluster_bkg: Some("#341627"),
	cluster_border: Some("#f472b6"),
};

const MONO: PresetVars = PresetVars {
	primary_color: "#ffffff",
	primary_border_color: "#e5e7eb",
	primary_text_color: "#0f172a",
	line_color: "#6b7280",
	text_color: "#111827",
	tertiary_color: "#f8fafc",
	cluster_bkg: Some("#f8fafc"),
	cluster_border: Some("#e5e7eb"),
};

// Translucent fills; the blur comes from the glass themeCSS tweak.
const GLASS: PresetVars = PresetVars {
	primary_color: "#ffffffcc",
	primary_border_color: "#e2e8f0",
	primary_text_color: "#0f172a",
	line_color: "#64748b",
	text_color: "#0f172a",
	tertiary_color: "#f8fafc80",
	cluster_bkg: Some("#ffffffaa"),
	cluster_border: Some("#e2e8f0"),
};

impl MermaidPreset {
	/// Colour variables for this preset.
	pub fn vars(self) -> &'static PresetVars {
		match self {
			MermaidPreset::Slate => &SLATE,
			MermaidPreset::Ocean => &OCEAN,
			MermaidPreset::Sunset => &SUNSET,
			MermaidPreset::Mint => &MINT,
			MermaidPreset::Rose => &ROSE,
			MermaidPreset::Mono => &MONO,
			MermaidPreset::Glass => &GLASS,
		}
	}
}
