//! Name generation: prompt assembly and completion parsing.
//!
//! The model is asked for `{"names": [...]}` but the parser also accepts a
//! bare JSON array or a plain list, one name per line.

use contracts::{GeneratedNames, NameGeneratorParams};
use serde_json::Value;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

const OUTPUT_FORMAT_INSTRUCTION: &str = "Respond only with a JSON object of the form \
{\"names\": [\"First\", \"Second\"]}. Do not include explanations.";

#[derive(Debug, thiserror::Error)]
pub enum NamesError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("generator returned no names")]
    Empty,
}

/// System prompt sent to the model: the caller's instructions plus the
/// fixed output-format requirement.
#[must_use]
pub fn build_system_prompt(params: &NameGeneratorParams) -> String {
    format!("{}\n\n{OUTPUT_FORMAT_INSTRUCTION}", params.system_prompt.trim())
}

/// Run one generation round for `params`.
///
/// # Errors
///
/// Returns [`NamesError::Llm`] when the backend call fails and
/// [`NamesError::Empty`] when the completion contains no usable names.
pub async fn generate(llm: &dyn LlmChat, params: &NameGeneratorParams) -> Result<GeneratedNames, NamesError> {
    let system = build_system_prompt(params);
    let messages = [Message::user(params.user_prompt.trim())];
    let response = llm.chat(&system, &messages).await?;

    tracing::debug!(
        generator_type = %params.generator_type,
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "name generation completed"
    );

    let names = parse_names(&response.text);
    if names.is_empty() {
        return Err(NamesError::Empty);
    }
    Ok(GeneratedNames { names })
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract candidate names from completion text.
#[must_use]
pub fn parse_names(text: &str) -> Vec<String> {
    let body = strip_code_fence(text);
    let raw = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| names_from_json(&value))
        .unwrap_or_else(|| body.lines().filter_map(clean_line).collect());
    dedupe(raw)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line (e.g. ```json).
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// `None` means the JSON is not a list-shaped answer and the text should be
/// read line by line instead.
fn names_from_json(value: &Value) -> Option<Vec<String>> {
    let items = match value {
        // Models sometimes rename the key; take the first array they return.
        Value::Object(map) => map
            .get("names")
            .and_then(Value::as_array)
            .or_else(|| map.values().find_map(Value::as_array))
            .map_or(&[][..], Vec::as_slice),
        Value::Array(items) => items.as_slice(),
        _ => return None,
    };
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn clean_line(line: &str) -> Option<String> {
    let mut s = line.trim();
    s = s.trim_start_matches(['-', '*', '•']).trim_start();

    // "1." / "12)" numbering
    let digits = s.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = s[digits..].strip_prefix(['.', ')']) {
            s = rest.trim_start();
        }
    }

    let s = s.trim_matches(|c| c == '*' || c == '_').trim();
    let s = s.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();
    if s.is_empty() || s.ends_with(':') {
        return None;
    }
    Some(s.to_string())
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
