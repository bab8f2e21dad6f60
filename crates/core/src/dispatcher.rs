//! Tool Dispatcher
//!
//! Resolves a tool call emitted by the engine, validates its arguments against
//! the tool's schema, runs the executor and turns the outcome into the client
//! event the session must forward: a `function_call_output` item for ordinary
//! results, or a `session.update` for a persona handoff.

use crate::error::{AssistantError, Result};
use crate::prompt::PromptContext;
use crate::registry::AssistantRegistry;
use crate::tool::{ToolDescriptor, ToolOutcome};
use realtime_types::ClientEvent;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The classified result of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallResult {
    Output { call_id: String, output: String },
    Handoff { target: String },
}

/// Executes tool calls against a shared, read-only registry.
///
/// The dispatcher keeps no per-session state, so one instance can serve any
/// number of concurrent calls; results are correlated by call id only.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<AssistantRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AssistantRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AssistantRegistry {
        &self.registry
    }

    /// Runs `tool`, looked up across every registered persona.
    pub async fn call(&self, tool: &str, args_json: &str, call_id: &str) -> Result<ToolCallResult> {
        let (_, descriptor) =
            self.registry
                .find_tool(tool)
                .ok_or_else(|| AssistantError::ToolNotFound {
                    tool: tool.to_string(),
                    persona: None,
                })?;
        invoke(descriptor, args_json, call_id).await
    }

    /// Runs `tool` only if `persona` declares it.
    pub async fn call_scoped(
        &self,
        persona: &str,
        tool: &str,
        args_json: &str,
        call_id: &str,
    ) -> Result<ToolCallResult> {
        let descriptor = self.registry.find_scoped_tool(persona, tool)?;
        invoke(descriptor, args_json, call_id).await
    }

    /// Global-lookup dispatch, answered with the event to forward to the engine.
    pub async fn execute(
        &self,
        tool: &str,
        args_json: &str,
        call_id: &str,
        context: &PromptContext,
    ) -> Result<ClientEvent> {
        let result = self.call(tool, args_json, call_id).await?;
        self.respond(result, context)
    }

    /// Scoped dispatch, answered with the event to forward to the engine.
    pub async fn execute_scoped(
        &self,
        persona: &str,
        tool: &str,
        args_json: &str,
        call_id: &str,
        context: &PromptContext,
    ) -> Result<ClientEvent> {
        let result = self.call_scoped(persona, tool, args_json, call_id).await?;
        self.respond(result, context)
    }

    /// Translates a classified result into its protocol event. A handoff builds
    /// the target persona's bundle with the given context.
    pub fn respond(&self, result: ToolCallResult, context: &PromptContext) -> Result<ClientEvent> {
        match result {
            ToolCallResult::Output { call_id, output } => {
                Ok(ClientEvent::function_call_output(call_id, output))
            }
            ToolCallResult::Handoff { target } => {
                let config = self.registry.build_persona_config(&target, context)?;
                Ok(config.into_session_update())
            }
        }
    }
}

#[instrument(skip(descriptor, args_json), fields(tool = %descriptor.name))]
async fn invoke(
    descriptor: &ToolDescriptor,
    args_json: &str,
    call_id: &str,
) -> Result<ToolCallResult> {
    let args = descriptor.parameters.validate(args_json).map_err(|source| {
        warn!(error = %source, "Rejected tool arguments");
        AssistantError::MalformedArguments {
            tool: descriptor.name.clone(),
            source,
        }
    })?;

    let outcome = descriptor
        .executor
        .execute(args)
        .await
        .map_err(|message| AssistantError::ToolFailed {
            tool: descriptor.name.clone(),
            message,
        })?;

    match outcome {
        ToolOutcome::Output(output) => {
            info!("Tool executed");
            Ok(ToolCallResult::Output {
                call_id: call_id.to_string(),
                output,
            })
        }
        ToolOutcome::Handoff(target) => {
            info!(%target, "Tool requested persona handoff");
            Ok(ToolCallResult::Handoff { target })
        }
    }
}
