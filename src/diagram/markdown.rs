use crate::types::Engine;

/// Fenced markdown block for `body`, or an empty string when there is no body.
pub fn markdown_fence(engine: Engine, body: &str) -> String {
	if body.is_empty() {
		return String::new();
	}
	format!("```{}\n{}\n```", engine.fence(), body)
}

/// Inverse of [`markdown_fence`]: the body between the fence lines.
pub fn strip_fence(snippet: &str) -> Option<&str> {
	let rest = snippet.strip_prefix("```")?;
	let (_, body) = rest.split_once('\n')?;
	body.strip_suffix("\n```")
}
