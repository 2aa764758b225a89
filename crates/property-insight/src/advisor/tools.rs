use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Function-calling tool advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Tool taking a single required string argument.
    pub fn with_string_argument(
        name: &str,
        description: &str,
        argument: &str,
        argument_description: &str,
    ) -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert(
            argument.to_string(),
            serde_json::json!({
                "type": "string",
                "description": argument_description,
            }),
        );

        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": [argument],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_argument_schema_marks_argument_required() {
        let tool = ToolDefinition::with_string_argument("echo", "Echo text", "text", "Text to echo");

        assert_eq!(tool.parameters["type"], "object");
        assert_eq!(tool.parameters["properties"]["text"]["type"], "string");
        assert_eq!(tool.parameters["required"][0], "text");
    }
}
