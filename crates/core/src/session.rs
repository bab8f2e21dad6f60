//! Session driver: tracks the active persona and applies handoffs.

use crate::dispatcher::{Dispatcher, ToolCallResult};
use crate::error::{AssistantError, Result};
use crate::prompt::PromptContext;
use realtime_types::ClientEvent;
use std::sync::Arc;
use tracing::info;

/// Per-session view over a shared [`Dispatcher`].
///
/// Function calls are resolved against the active persona only. A handoff
/// result switches the active persona before the reconfiguration event is
/// returned, so the next call is already scoped to the new tool set.
#[derive(Debug)]
pub struct AssistantSession {
    dispatcher: Arc<Dispatcher>,
    context: PromptContext,
    active: String,
}

impl AssistantSession {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        persona: &str,
        context: PromptContext,
    ) -> Result<Self> {
        if dispatcher.registry().persona(persona).is_none() {
            return Err(AssistantError::UnknownPersona(persona.to_string()));
        }
        Ok(Self {
            dispatcher,
            context,
            active: persona.to_string(),
        })
    }

    pub fn active_persona(&self) -> &str {
        &self.active
    }

    pub fn context(&self) -> &PromptContext {
        &self.context
    }

    /// Takes effect on the next prompt build; the running session keeps its
    /// current instructions until then.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.context.language = language.into();
        info!(language = %self.context.language, "Session language changed");
    }

    /// The `session.update` for the active persona, sent at session start.
    pub fn session_update(&self) -> Result<ClientEvent> {
        let config = self
            .dispatcher
            .registry()
            .build_persona_config(&self.active, &self.context)?;
        Ok(config.into_session_update())
    }

    /// Makes `persona` active and returns its `session.update`.
    pub fn activate(&mut self, persona: &str) -> Result<ClientEvent> {
        let config = self
            .dispatcher
            .registry()
            .build_persona_config(persona, &self.context)?;
        info!(from = %self.active, to = %persona, "Activated persona");
        self.active = persona.to_string();
        Ok(config.into_session_update())
    }

    /// Runs a function call emitted by the engine against the active persona.
    pub async fn handle_function_call(
        &mut self,
        name: &str,
        args_json: &str,
        call_id: &str,
    ) -> Result<ClientEvent> {
        let result = self
            .dispatcher
            .call_scoped(&self.active, name, args_json, call_id)
            .await?;
        match result {
            ToolCallResult::Handoff { target } => self.activate(&target),
            output => self.dispatcher.respond(output, &self.context),
        }
    }
}
