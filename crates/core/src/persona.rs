//! Personas and the configuration bundle they produce on activation.

use crate::prompt::{PromptContext, PromptTemplate};
use crate::tool::ToolDescriptor;
use realtime_types::{ClientEvent, SessionConfig, ToolDeclaration, TurnDetection};

/// Sampling temperature applied when a persona becomes active.
pub const DEFAULT_TEMPERATURE: f64 = 0.6;

/// A named assistant specialization: a prompt template plus an ordered tool set.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub prompt: PromptTemplate,
    pub tools: Vec<ToolDescriptor>,
    pub temperature: f64,
    pub turn_detection: TurnDetection,
}

impl Persona {
    pub fn new(name: impl Into<String>, prompt: PromptTemplate) -> Self {
        Self {
            name: name.into(),
            prompt,
            tools: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            turn_detection: TurnDetection::ServerVad,
        }
    }

    pub fn with_tool(mut self, tool: ToolDescriptor) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Declarations of this persona's tools, in registration order.
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(ToolDescriptor::declaration).collect()
    }

    /// Builds a fresh configuration bundle. The prompt is rendered anew each time.
    pub fn build_config(&self, context: &PromptContext) -> PersonaConfig {
        PersonaConfig {
            persona: self.name.clone(),
            system_prompt: self.prompt.render(context),
            tools: self.declarations(),
            temperature: self.temperature,
            turn_detection: self.turn_detection,
        }
    }
}

/// Everything the session layer needs to (re)configure itself for a persona.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaConfig {
    pub persona: String,
    pub system_prompt: String,
    pub tools: Vec<ToolDeclaration>,
    pub temperature: f64,
    pub turn_detection: TurnDetection,
}

impl PersonaConfig {
    /// The `session.update` event that replaces the session's instructions and tools.
    pub fn into_session_update(self) -> ClientEvent {
        ClientEvent::SessionUpdate {
            session: SessionConfig {
                instructions: self.system_prompt,
                temperature: self.temperature,
                turn_detection: self.turn_detection,
                tools: self.tools,
            },
        }
    }
}
