//! Assistant personas, tool dispatch and persona handoff for realtime voice sessions.
//!
//! The [`registry::AssistantRegistry`] holds each persona's prompt template and
//! ordered tool set. The [`dispatcher::Dispatcher`] runs tool calls emitted by the
//! conversational engine and answers with the protocol event to forward: a
//! function output, or a session reconfiguration when a tool hands the session
//! over to another persona. [`session::AssistantSession`] keeps track of which
//! persona is active for one session.

pub mod builtin;
pub mod dispatcher;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod registry;
pub mod schema;
pub mod session;
pub mod tool;

pub use dispatcher::{Dispatcher, ToolCallResult};
pub use error::{AssistantError, Result};
pub use persona::{Persona, PersonaConfig};
pub use prompt::{PromptContext, PromptTemplate};
pub use registry::AssistantRegistry;
pub use session::AssistantSession;
pub use tool::{ToolDescriptor, ToolExecutor, ToolOutcome};
