//! Assistant Registry
//!
//! Owns the personas, in registration order, and answers every lookup the
//! dispatcher and session layer need: tool declarations, configuration bundles
//! and tool resolution, either globally or scoped to one persona.

use crate::builtin;
use crate::error::{AssistantError, Result};
use crate::persona::{Persona, PersonaConfig};
use crate::prompt::{PromptContext, PromptTemplate};
use crate::tool::ToolDescriptor;
use realtime_types::ToolDeclaration;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct AssistantRegistry {
    personas: Vec<Persona>,
}

impl AssistantRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The base configuration: `GenericAssistant` followed by `CarAssistant`.
    pub fn builtin() -> Self {
        Self {
            personas: vec![builtin::generic_assistant(), builtin::car_assistant()],
        }
    }

    /// Adds a persona. Persona names are unique across the registry and tool
    /// names are unique within a persona.
    pub fn register(&mut self, persona: Persona) -> Result<()> {
        if self.persona(&persona.name).is_some() {
            return Err(AssistantError::DuplicatePersona(persona.name));
        }
        let mut seen = HashSet::new();
        for tool in &persona.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(AssistantError::DuplicateTool {
                    persona: persona.name.clone(),
                    tool: tool.name.clone(),
                });
            }
        }
        info!(persona = %persona.name, tools = persona.tools.len(), "Registered persona");
        self.personas.push(persona);
        Ok(())
    }

    /// Replaces the prompt of every persona whose name has an entry in `prompts`.
    /// Returns the names of the personas that were updated.
    pub fn override_prompts(&mut self, prompts: &HashMap<String, PromptTemplate>) -> Vec<String> {
        let mut updated = Vec::new();
        for persona in &mut self.personas {
            if let Some(template) = prompts.get(&persona.name) {
                persona.prompt = template.clone();
                updated.push(persona.name.clone());
            }
        }
        info!(personas = ?updated, "Applied prompt overrides");
        updated
    }

    pub fn persona(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    pub fn persona_names(&self) -> impl Iterator<Item = &str> {
        self.personas.iter().map(|p| p.name.as_str())
    }

    /// Declarations for `persona`, in registration order.
    ///
    /// An unregistered persona yields an empty list rather than an error.
    pub fn list_tool_declarations(&self, persona: &str) -> Vec<ToolDeclaration> {
        match self.persona(persona) {
            Some(p) => {
                debug!(persona, tools = p.tools.len(), "Listing tool declarations");
                p.declarations()
            }
            None => {
                warn!(persona, "Tool declarations requested for unknown persona");
                Vec::new()
            }
        }
    }

    /// Builds the prompt and tool bundle for `persona`.
    pub fn build_persona_config(
        &self,
        persona: &str,
        context: &PromptContext,
    ) -> Result<PersonaConfig> {
        self.persona(persona)
            .map(|p| p.build_config(context))
            .ok_or_else(|| AssistantError::UnknownPersona(persona.to_string()))
    }

    /// Finds a tool by name across all personas; the first persona in
    /// registration order that declares it wins.
    pub fn find_tool(&self, tool: &str) -> Option<(&Persona, &ToolDescriptor)> {
        self.personas
            .iter()
            .find_map(|p| p.tool(tool).map(|t| (p, t)))
    }

    /// Finds a tool among the tools of `persona` only.
    pub fn find_scoped_tool(&self, persona: &str, tool: &str) -> Result<&ToolDescriptor> {
        let p = self
            .persona(persona)
            .ok_or_else(|| AssistantError::UnknownPersona(persona.to_string()))?;
        p.tool(tool).ok_or_else(|| AssistantError::ToolNotFound {
            tool: tool.to_string(),
            persona: Some(persona.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{CAR_ASSISTANT, GENERIC_ASSISTANT};
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct NoArgs {}

    fn names(decls: &[ToolDeclaration]) -> Vec<&str> {
        decls.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_builtin_declarations_in_registration_order() {
        let registry = AssistantRegistry::builtin();

        assert_eq!(
            names(&registry.list_tool_declarations(GENERIC_ASSISTANT)),
            vec!["get_weather", "Assistant_CarAssistant"]
        );
        assert_eq!(
            names(&registry.list_tool_declarations(CAR_ASSISTANT)),
            vec!["control_ac", "control_media", "navigate_to", "control_window"]
        );
    }

    #[test]
    fn test_declarations_have_no_duplicates() {
        let registry = AssistantRegistry::builtin();
        for persona in registry.persona_names() {
            let decls = registry.list_tool_declarations(persona);
            let unique: HashSet<&str> = decls.iter().map(|d| d.name()).collect();
            assert_eq!(unique.len(), decls.len(), "duplicates in {}", persona);
        }
    }

    #[test]
    fn test_unknown_persona_has_no_declarations() {
        let registry = AssistantRegistry::builtin();
        assert!(registry.list_tool_declarations("PilotAssistant").is_empty());
        assert!(registry.list_tool_declarations("").is_empty());
        assert!(registry.list_tool_declarations("genericassistant").is_empty());
    }

    #[test]
    fn test_build_unknown_persona_fails() {
        let registry = AssistantRegistry::builtin();
        let err = registry
            .build_persona_config("PilotAssistant", &PromptContext::default())
            .unwrap_err();
        assert!(matches!(err, AssistantError::UnknownPersona(name) if name == "PilotAssistant"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let registry = AssistantRegistry::builtin();
        let context = PromptContext::default();

        let first = registry.build_persona_config(GENERIC_ASSISTANT, &context).unwrap();
        let second = registry.build_persona_config(GENERIC_ASSISTANT, &context).unwrap();
        assert_eq!(first.system_prompt.as_bytes(), second.system_prompt.as_bytes());
        assert_eq!(first, second);
    }

    #[test]
    fn test_language_change_only_affects_later_builds() {
        let registry = AssistantRegistry::builtin();
        let mut context = PromptContext::default();

        let english = registry.build_persona_config(GENERIC_ASSISTANT, &context).unwrap();
        context.language = "Korean".to_string();
        let korean = registry.build_persona_config(GENERIC_ASSISTANT, &context).unwrap();

        assert!(english.system_prompt.contains("native speaker of English"));
        assert!(!english.system_prompt.contains("Korean"));
        assert!(korean.system_prompt.contains("native speaker of Korean"));
        assert!(korean.system_prompt.contains("Reply in Korean"));
        assert_eq!(
            english.system_prompt.replace("English", "Korean"),
            korean.system_prompt
        );

        let car_english = registry
            .build_persona_config(CAR_ASSISTANT, &PromptContext::default())
            .unwrap();
        let car_korean = registry.build_persona_config(CAR_ASSISTANT, &context).unwrap();
        assert_eq!(car_english.system_prompt, car_korean.system_prompt);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = AssistantRegistry::builtin();

        let err = registry
            .register(Persona::new(CAR_ASSISTANT, PromptTemplate::new("again")))
            .unwrap_err();
        assert!(matches!(err, AssistantError::DuplicatePersona(_)));

        let doubled = Persona::new("Echo", PromptTemplate::new("echo"))
            .with_tool(ToolDescriptor::handoff(CAR_ASSISTANT, "car"))
            .with_tool(ToolDescriptor::handoff(CAR_ASSISTANT, "car again"));
        let err = registry.register(doubled).unwrap_err();
        assert!(matches!(err, AssistantError::DuplicateTool { tool, .. } if tool == "Assistant_CarAssistant"));
        assert_eq!(registry.persona_names().count(), 2);
    }

    #[test]
    fn test_registry_is_extensible() {
        let mut registry = AssistantRegistry::builtin();
        registry
            .register(
                Persona::new("PilotAssistant", PromptTemplate::new("Fly."))
                    .with_tool(ToolDescriptor::handoff(GENERIC_ASSISTANT, "back to front desk")),
            )
            .unwrap();

        assert_eq!(
            registry.persona_names().collect::<Vec<_>>(),
            vec![GENERIC_ASSISTANT, CAR_ASSISTANT, "PilotAssistant"]
        );
        assert_eq!(
            names(&registry.list_tool_declarations("PilotAssistant")),
            vec!["Assistant_GenericAssistant"]
        );
    }

    #[test]
    fn test_global_lookup_prefers_first_registered() {
        let mut registry = AssistantRegistry::new();
        registry
            .register(Persona::new("First", PromptTemplate::new("one")).with_tool(
                ToolDescriptor::text("shared", "first", |_: NoArgs| "first".to_string()),
            ))
            .unwrap();
        registry
            .register(Persona::new("Second", PromptTemplate::new("two")).with_tool(
                ToolDescriptor::text("shared", "second", |_: NoArgs| "second".to_string()),
            ))
            .unwrap();

        let (persona, tool) = registry.find_tool("shared").unwrap();
        assert_eq!(persona.name, "First");
        assert_eq!(tool.description, "first");

        let scoped = registry.find_scoped_tool("Second", "shared").unwrap();
        assert_eq!(scoped.description, "second");
    }

    #[test]
    fn test_scoped_lookup_errors() {
        let registry = AssistantRegistry::builtin();

        let err = registry
            .find_scoped_tool(GENERIC_ASSISTANT, "control_ac")
            .unwrap_err();
        match err {
            AssistantError::ToolNotFound { tool, persona } => {
                assert_eq!(tool, "control_ac");
                assert_eq!(persona.as_deref(), Some(GENERIC_ASSISTANT));
            }
            other => panic!("Expected ToolNotFound, got {:?}", other),
        }

        assert!(matches!(
            registry.find_scoped_tool("Nobody", "control_ac"),
            Err(AssistantError::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_override_prompts() {
        let mut registry = AssistantRegistry::builtin();
        let mut prompts = HashMap::new();
        prompts.insert(CAR_ASSISTANT.to_string(), PromptTemplate::new("Car in {language}"));
        prompts.insert("Unrelated".to_string(), PromptTemplate::new("ignored"));

        let updated = registry.override_prompts(&prompts);
        assert_eq!(updated, vec![CAR_ASSISTANT.to_string()]);

        let config = registry
            .build_persona_config(CAR_ASSISTANT, &PromptContext::new("Dutch"))
            .unwrap();
        assert_eq!(config.system_prompt, "Car in Dutch");
    }
}
