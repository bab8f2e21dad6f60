//! Tool descriptors and the executor contract.

use crate::schema::ParameterSchema;
use async_trait::async_trait;
use realtime_types::ToolDeclaration;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;

/// Name prefix of the pseudo-tools that hand the session over to another persona.
pub const HANDOFF_TOOL_PREFIX: &str = "Assistant_";

/// What an executor produced.
///
/// Handoffs are signalled through this tag only; an `Output` whose text happens to
/// name a persona is still plain output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Text to return to the conversation as the function result.
    Output(String),
    /// Switch the session to the named persona.
    Handoff(String),
}

/// Runs a tool against an argument object that has already been validated
/// against the tool's [`ParameterSchema`].
///
/// Executors may take arbitrarily long; several may be in flight at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, args: Map<String, Value>) -> Result<ToolOutcome, String>;
}

/// A tool as registered on a persona. Immutable once registered.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
    pub executor: Arc<dyn ToolExecutor>,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
        executor: impl ToolExecutor + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            executor: Arc::new(executor),
        }
    }

    /// A parameterless pseudo-tool named `Assistant_<target>` that hands the
    /// session over to `target`.
    pub fn handoff(target: &str, description: impl Into<String>) -> Self {
        Self::new(
            format!("{HANDOFF_TOOL_PREFIX}{target}"),
            description,
            ParameterSchema::object(),
            HandoffExecutor {
                target: target.to_string(),
            },
        )
    }

    /// A tool that reads its arguments as `A` and renders a text result.
    ///
    /// The declared schema is generated from `A`, and the dispatcher rejects any
    /// argument object that does not deserialize into `A` before `render` runs.
    pub fn text<A, F>(name: impl Into<String>, description: impl Into<String>, render: F) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> String + Send + Sync + 'static,
    {
        Self::new(
            name,
            description,
            ParameterSchema::of::<A>(),
            TextExecutor {
                render,
                _args: PhantomData,
            },
        )
    }

    /// The declaration advertised to the engine.
    pub fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration::Function {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.to_json(),
        }
    }
}

/// Always requests a handoff to a fixed persona.
pub struct HandoffExecutor {
    pub target: String,
}

#[async_trait]
impl ToolExecutor for HandoffExecutor {
    async fn execute(&self, _args: Map<String, Value>) -> Result<ToolOutcome, String> {
        Ok(ToolOutcome::Handoff(self.target.clone()))
    }
}

/// Adapts a synchronous formatting function over typed arguments into an executor.
pub struct TextExecutor<A, F> {
    render: F,
    _args: PhantomData<fn() -> A>,
}

#[async_trait]
impl<A, F> ToolExecutor for TextExecutor<A, F>
where
    A: DeserializeOwned + Send + 'static,
    F: Fn(A) -> String + Send + Sync + 'static,
{
    async fn execute(&self, args: Map<String, Value>) -> Result<ToolOutcome, String> {
        let args: A = serde_json::from_value(Value::Object(args))
            .map_err(|e| format!("Failed to read arguments: {}", e))?;
        Ok(ToolOutcome::Output((self.render)(args)))
    }
}
