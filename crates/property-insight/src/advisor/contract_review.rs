use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tools::ToolDefinition;

pub const CONTRACT_REVIEWER_TOOL: &str = "contract_reviewer";

const SYSTEM_PROMPT: &str = r#"You are an expert real estate contract reviewer with extensive knowledge of property law, lease agreements, and real estate transactions. Your role is to analyze contracts and provide comprehensive insights.

When reviewing a contract, you must:

1. **Summary**: Provide a clear, concise summary of the contract's main purpose and key terms
2. **Highlights**: Identify and list the most important clauses, terms, and conditions
3. **Warnings**: Flag any potentially problematic, unusual, or risky clauses that require attention
4. **Suggestions**: Offer actionable recommendations for improvements, negotiations, or clarifications

Focus on these key areas:
- Financial terms (rent, deposits, fees, penalties)
- Lease duration and renewal terms
- Maintenance and repair responsibilities
- Pet policies and restrictions
- Termination and eviction clauses
- Insurance and liability requirements
- Subletting and assignment rights
- Property condition and inspection terms

Always respond in JSON format with the following structure:
{
    "summary": "Brief overview of the contract",
    "highlights": ["Key point 1", "Key point 2", ...],
    "warnings": ["Warning 1", "Warning 2", ...],
    "suggestions": ["Suggestion 1", "Suggestion 2", ...]
}

Be thorough but concise. Focus on practical implications for the parties involved."#;

pub fn contract_review_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

pub fn contract_review_user_prompt(file_content: &str) -> String {
    format!(
        "Please review the following property contract and provide your analysis:\n\n\
         CONTRACT CONTENT:\n{file_content}\n\n\
         Please analyze this contract and provide your response in the specified JSON format."
    )
}

pub fn contract_reviewer_tool() -> ToolDefinition {
    ToolDefinition::with_string_argument(
        CONTRACT_REVIEWER_TOOL,
        "Analyzes property contracts to provide summaries, highlights, warnings, and suggestions",
        "file_content",
        "The text content of the contract to review",
    )
}

/// Structured review of a property contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractReview {
    pub summary: String,
    pub highlights: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    /// Model output kept when it could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ContractReview {
    /// Review returned when the model could not be reached.
    pub fn failed(reason: impl Display) -> Self {
        Self {
            summary: format!("Error analyzing contract: {reason}"),
            highlights: Vec::new(),
            warnings: vec![format!("Analysis failed: {reason}")],
            suggestions: vec!["Please try again or check the contract format".to_string()],
            raw_response: None,
        }
    }

    /// Review returned when the model answered with something other than a JSON object.
    pub fn unparsable(raw_response: &str) -> Self {
        Self {
            summary: "Failed to parse AI response properly".to_string(),
            highlights: vec!["Review the raw response for details".to_string()],
            warnings: vec!["Response parsing error occurred".to_string()],
            suggestions: vec!["Please try again with a clearer contract format".to_string()],
            raw_response: Some(raw_response.to_string()),
        }
    }
}

/// Parse the model's answer into a review.
///
/// Accepts a bare JSON object or one wrapped in a Markdown code fence. Missing
/// fields become empty; anything that is not a JSON object yields
/// [`ContractReview::unparsable`].
pub fn parse_contract_review(raw: &str) -> ContractReview {
    let object = match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(object)) => object,
        _ => return ContractReview::unparsable(raw),
    };

    ContractReview {
        summary: text_field(&object, "summary"),
        highlights: list_field(&object, "highlights"),
        warnings: list_field(&object, "warnings"),
        suggestions: list_field(&object, "suggestions"),
        raw_response: None,
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (`json`) on the opening fence line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn list_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(text)) if !text.is_empty() => vec![text.clone()],
        _ => Vec::new(),
    }
}
