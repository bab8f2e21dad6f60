use crate::schema::SchemaError;

/// Errors surfaced by the registry, the dispatcher and the session driver.
///
/// Nothing is retried internally; every variant reaches the immediate caller.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Tool '{tool}' not found")]
    ToolNotFound {
        tool: String,
        /// The persona the lookup was scoped to, if any.
        persona: Option<String>,
    },
    #[error("Malformed arguments for tool '{tool}': {source}")]
    MalformedArguments {
        tool: String,
        #[source]
        source: SchemaError,
    },
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),
    #[error("Persona '{0}' is already registered")]
    DuplicatePersona(String),
    #[error("Persona '{persona}' declares tool '{tool}' more than once")]
    DuplicateTool { persona: String, tool: String },
    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },
}

pub type Result<T> = std::result::Result<T, AssistantError>;
