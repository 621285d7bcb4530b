use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Pulls a JSON value out of an LLM response.
///
/// Accepts bare JSON, JSON wrapped in markdown code fences, or JSON surrounded
/// by prose (first `{` to last `}`).
pub fn extract_json<T: DeserializeOwned>(response: &str) -> Result<T> {
    let cleaned = strip_code_fences(response);

    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Ok(value);
    }

    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&cleaned[start..=end])
            .map_err(|e| anyhow!("Failed to parse JSON from response: {}", e)),
        _ => Err(anyhow!("No JSON object found in response")),
    }
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
