//! Wire types for the realtime session protocol.
//!
//! Only the slice of the protocol that the assistant layer touches is modelled here:
//! the tool declarations it advertises, the client events it emits in reply to a
//! function call, and the server events it consumes to learn about those calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable function advertised to the conversational engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ToolDeclaration {
    #[serde(rename = "function")]
    Function {
        name: String,
        description: String,
        /// JSON Schema of the argument object.
        parameters: Value,
    },
}

impl ToolDeclaration {
    pub fn name(&self) -> &str {
        match self {
            ToolDeclaration::Function { name, .. } => name,
        }
    }
}

/// How the engine decides that the user has finished speaking.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnDetection {
    #[default]
    ServerVad,
}

/// Session-level settings pushed with a `session.update` event.
///
/// `instructions` replaces the system prompt of the running session; it is never
/// appended to the conversation history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub instructions: String,
    pub temperature: f64,
    pub turn_detection: TurnDetection,
    pub tools: Vec<ToolDeclaration>,
}

/// A conversation item created by the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// The result of a function call, correlated with the call by `call_id`.
    FunctionCallOutput { call_id: String, output: String },
}

/// Events sent from the assistant layer to the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "session.update")]
    SessionUpdate { session: SessionConfig },
    #[serde(rename = "conversation.item.create")]
    ConversationItemCreate { item: Item },
    /// Asks the engine to produce a response, e.g. after a function output was appended.
    #[serde(rename = "response.create")]
    ResponseCreate,
}

impl ClientEvent {
    /// Wraps a tool result as a `function_call_output` item.
    pub fn function_call_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        ClientEvent::ConversationItemCreate {
            item: Item::FunctionCallOutput {
                call_id: call_id.into(),
                output: output.into(),
            },
        }
    }
}

/// Error payload attached to a server `error` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Events received from the engine. Everything the assistant layer does not act on
/// collapses into [`ServerEvent::Other`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// The engine has finished streaming the arguments of a function call.
    #[serde(rename = "response.function_call_arguments.done")]
    ResponseFunctionCallArgumentsDone {
        call_id: String,
        name: String,
        /// JSON-encoded argument object.
        arguments: String,
    },
    #[serde(rename = "error")]
    Error { error: ErrorDetails },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_declaration_shape() {
        let decl = ToolDeclaration::Function {
            name: "get_weather".to_string(),
            description: "weather".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        };

        assert_eq!(decl.name(), "get_weather");
        assert_eq!(
            serde_json::to_value(&decl).unwrap(),
            json!({
                "type": "function",
                "name": "get_weather",
                "description": "weather",
                "parameters": {"type": "object", "properties": {}}
            })
        );
    }

    #[test]
    fn test_function_call_output_shape() {
        let event = ClientEvent::function_call_output("call-1", "done");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "conversation.item.create",
                "item": {"type": "function_call_output", "call_id": "call-1", "output": "done"}
            })
        );
    }

    #[test]
    fn test_session_update_shape() {
        let event = ClientEvent::SessionUpdate {
            session: SessionConfig {
                instructions: "be helpful".to_string(),
                temperature: 0.6,
                turn_detection: TurnDetection::ServerVad,
                tools: vec![],
            },
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "session.update",
                "session": {
                    "instructions": "be helpful",
                    "temperature": 0.6,
                    "turn_detection": {"type": "server_vad"},
                    "tools": []
                }
            })
        );
    }

    #[test]
    fn test_response_create_shape() {
        let json = serde_json::to_string(&ClientEvent::ResponseCreate).unwrap();
        assert_eq!(json, r#"{"type":"response.create"}"#);
    }

    #[test]
    fn test_server_function_call_event_ignores_extra_fields() {
        let text = r#"{
            "type": "response.function_call_arguments.done",
            "event_id": "evt_1",
            "response_id": "resp_1",
            "item_id": "item_1",
            "output_index": 0,
            "call_id": "call-9",
            "name": "navigate_to",
            "arguments": "{\"destination\":\"Oslo\"}"
        }"#;

        let event: ServerEvent = serde_json::from_str(text).unwrap();
        assert_eq!(
            event,
            ServerEvent::ResponseFunctionCallArgumentsDone {
                call_id: "call-9".to_string(),
                name: "navigate_to".to_string(),
                arguments: r#"{"destination":"Oslo"}"#.to_string(),
            }
        );
    }

    #[test]
    fn test_unhandled_server_events_collapse_to_other() {
        let event: ServerEvent =
            serde_json::from_str(r#"{"type":"response.audio.delta","delta":"AAAA"}"#).unwrap();
        assert_eq!(event, ServerEvent::Other);
    }

    #[test]
    fn test_server_error_event() {
        let event: ServerEvent = serde_json::from_str(
            r#"{"type":"error","error":{"message":"bad session","code":"invalid_value"}}"#,
        )
        .unwrap();
        match event {
            ServerEvent::Error { error } => {
                assert_eq!(error.message, "bad session");
                assert_eq!(error.code.as_deref(), Some("invalid_value"));
            }
            other => panic!("Expected error event, got {:?}", other),
        }
    }
}
