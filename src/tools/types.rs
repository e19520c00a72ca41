//! Tool parameter schemas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON Schema for a tool's arguments, always an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentToolParameters {
    pub schema: Value,
}

impl AgentToolParameters {
    /// Wrap a schema advertised by a tool server.
    ///
    /// Servers sometimes omit `type` or `properties`; chat-completions
    /// endpoints reject function schemas without them, so both are filled in.
    /// Anything that is not a JSON object becomes the empty schema.
    pub fn from_schema(schema: Value) -> Self {
        let Value::Object(mut object) = schema else {
            return Self::empty();
        };
        object
            .entry("type")
            .or_insert_with(|| Value::String("object".into()));
        object
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        Self {
            schema: Value::Object(object),
        }
    }

    pub fn empty() -> Self {
        Self {
            schema: serde_json::json!({
                "type": "object",
                "properties": {},
            }),
        }
    }
}
