//! System prompt templates.
//!
//! Templates are plain text with a single `{language}` placeholder. They are
//! rendered on every persona activation; nothing is cached.

use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_LANGUAGE: &str = "English";

const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// Values a prompt is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    /// Spoken and written language of the assistant.
    pub language: String,
}

impl PromptContext {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl Default for PromptContext {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Surrounding whitespace is trimmed.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn render(&self, context: &PromptContext) -> String {
        self.text.replace(LANGUAGE_PLACEHOLDER, &context.language)
    }
}

/// Loads every `*.md` file in `dir` as a template keyed by its file stem.
pub fn load_prompts(dir: &Path) -> std::io::Result<HashMap<String, PromptTemplate>> {
    let mut prompts = HashMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }
        if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
            let content = std::fs::read_to_string(&path)?;
            prompts.insert(key.to_string(), PromptTemplate::new(content));
        }
    }
    Ok(prompts)
}
