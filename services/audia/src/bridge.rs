//! Line-delimited JSON bridge between a realtime engine and an assistant session.
//!
//! Reads server events one per line, answers every completed function call with
//! the client event produced by the session, and writes client events one per
//! line. Audio, transcripts and everything else the engine emits pass by untouched.

use anyhow::Result;
use audia_core::AssistantSession;
use realtime_types::{ClientEvent, ServerEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

/// Counters reported when the input stream ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSummary {
    pub calls: usize,
    pub handoffs: usize,
    pub failures: usize,
}

/// Runs the bridge until `reader` is exhausted.
///
/// The active persona's `session.update` is written first. Ordinary and failed
/// calls are answered with a `function_call_output` for their call id, the
/// latter carrying the error text. A handoff call is answered with the target
/// persona's `session.update` only: no output item is written for its call id
/// and no `response.create` follows.
pub async fn run<R, W>(session: &mut AssistantSession, reader: R, mut writer: W) -> Result<BridgeSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_event(&mut writer, &session.session_update()?).await?;
    info!(persona = %session.active_persona(), "Session configured");

    let mut summary = BridgeSummary::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let event = match serde_json::from_str::<ServerEvent>(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable server event");
                continue;
            }
        };

        match event {
            ServerEvent::ResponseFunctionCallArgumentsDone {
                call_id,
                name,
                arguments,
            } => {
                summary.calls += 1;
                match session.handle_function_call(&name, &arguments, &call_id).await {
                    Ok(update @ ClientEvent::SessionUpdate { .. }) => {
                        summary.handoffs += 1;
                        info!(%call_id, persona = %session.active_persona(), "Handed off session");
                        write_event(&mut writer, &update).await?;
                    }
                    Ok(output) => {
                        write_event(&mut writer, &output).await?;
                        write_event(&mut writer, &ClientEvent::ResponseCreate).await?;
                    }
                    Err(e) => {
                        summary.failures += 1;
                        error!(%call_id, tool = %name, error = %e, "Function call failed");
                        let output = ClientEvent::function_call_output(call_id, format!("Error: {}", e));
                        write_event(&mut writer, &output).await?;
                        write_event(&mut writer, &ClientEvent::ResponseCreate).await?;
                    }
                }
            }
            ServerEvent::Error { error } => {
                warn!(message = %error.message, code = ?error.code, "Engine reported an error");
            }
            ServerEvent::Other => {}
        }
    }

    writer.flush().await?;
    info!(?summary, "Input closed");
    Ok(summary)
}

async fn write_event<W: AsyncWrite + Unpin>(writer: &mut W, event: &ClientEvent) -> Result<()> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
