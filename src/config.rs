//! Build-time client configuration.

/// Address of a locally running generation service.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Settings baked into the bundle when it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	pub api_base: String,
}

impl AppConfig {
	/// Reads `DIAGRAM_API_BASE` at compile time, falling back to
	/// [`DEFAULT_API_BASE`].
	pub fn from_env() -> Self {
		Self::with_base(option_env!("DIAGRAM_API_BASE"))
	}

	pub fn with_base(base: Option<&str>) -> Self {
		let base = base
			.map(str::trim)
			.filter(|b| !b.is_empty())
			.unwrap_or(DEFAULT_API_BASE);
		Self {
			api_base: base.trim_end_matches('/').to_string(),
		}
	}

	pub fn generate_url(&self) -> String {
		format!("{}/generate", self.api_base)
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::with_base(None)
	}
}
