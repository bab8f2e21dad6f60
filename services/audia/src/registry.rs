//! Registry setup shared by every `audia` command.

use crate::config::Config;
use anyhow::Context;
use audia_core::AssistantRegistry;
use audia_core::prompt::load_prompts;
use tracing::warn;

/// Builds the built-in registry and applies the prompt overrides found in
/// `config.prompts_path`, if one is set.
///
/// An unreadable override directory is an error. Override files that match no
/// persona are logged and skipped.
pub fn build_registry(config: &Config) -> anyhow::Result<AssistantRegistry> {
    let mut registry = AssistantRegistry::builtin();
    let Some(path) = &config.prompts_path else {
        return Ok(registry);
    };

    let prompts = load_prompts(path)
        .with_context(|| format!("Failed to load prompts from {}", path.display()))?;
    let updated = registry.override_prompts(&prompts);
    for name in prompts.keys().filter(|name| !updated.contains(name)) {
        warn!(prompt = %name, "Prompt override matches no persona");
    }
    Ok(registry)
}
