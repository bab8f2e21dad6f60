//! Main Entrypoint for the Audia assistant service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the persona registry, applying prompt overrides if configured.
//! 4. Running the requested command: inspecting personas and tools, executing a
//!    single tool call, or bridging a realtime session over stdio.

use anyhow::Context;
use audia_core::{AssistantSession, Dispatcher, PromptContext};
use audia_service::{bridge, config::Config, registry::build_registry};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "audia", version, about = "Assistant personas and tool dispatch for realtime voice sessions")]
struct Cli {
    /// Language the assistant speaks. Overrides ASSISTANT_LANGUAGE.
    #[arg(long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered personas.
    Personas,
    /// Print the tool declarations of a persona.
    Tools { persona: String },
    /// Print the session.update event that activates a persona.
    Config { persona: Option<String> },
    /// Execute a single tool call and print the resulting event.
    Call {
        tool: String,
        /// JSON-encoded argument object.
        #[arg(default_value = "{}")]
        arguments: String,
        #[arg(long, default_value = "call-1")]
        call_id: String,
        /// Only resolve tools declared by this persona.
        #[arg(long)]
        persona: Option<String>,
    },
    /// Answer function calls from JSON-lines server events on stdin.
    Bridge {
        /// Persona active at session start. Overrides INITIAL_PERSONA.
        #[arg(long)]
        persona: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let mut config = Config::from_env().context("Failed to load configuration")?;
    config
        .override_language(cli.language.as_deref())
        .context("Invalid command line")?;

    // --- 2. Initialize Logging ---
    // Logs go to stderr; stdout carries protocol events only.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Build the Registry ---
    let registry = build_registry(&config)?;
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry)));
    let context = PromptContext::new(config.language.clone());
    info!(language = %context.language, "Registry ready");

    // --- 4. Run the Command ---
    match cli.command {
        Command::Personas => {
            for name in dispatcher.registry().persona_names() {
                println!("{}", name);
            }
        }
        Command::Tools { persona } => {
            print_json(&dispatcher.registry().list_tool_declarations(&persona))?;
        }
        Command::Config { persona } => {
            let persona = persona.unwrap_or_else(|| config.initial_persona.clone());
            let bundle = dispatcher.registry().build_persona_config(&persona, &context)?;
            print_json(&bundle.into_session_update())?;
        }
        Command::Call {
            tool,
            arguments,
            call_id,
            persona,
        } => {
            let event = match persona {
                Some(persona) => {
                    dispatcher
                        .execute_scoped(&persona, &tool, &arguments, &call_id, &context)
                        .await?
                }
                None => dispatcher.execute(&tool, &arguments, &call_id, &context).await?,
            };
            print_json(&event)?;
        }
        Command::Bridge { persona } => {
            let persona = persona.unwrap_or_else(|| config.initial_persona.clone());
            let mut session = AssistantSession::new(dispatcher, &persona, context)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let summary = bridge::run(&mut session, stdin, tokio::io::stdout()).await?;
            info!(
                calls = summary.calls,
                handoffs = summary.handoffs,
                failures = summary.failures,
                "Bridge finished"
            );
        }
    }

    Ok(())
}
