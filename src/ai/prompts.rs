//! System prompt variants and context serialization

use crate::pipeline::ChatContext;

/// System prompt for prompt-only requests.
pub const GENERAL_SYSTEM_PROMPT: &str = "You are a helpful and honest AI assistant. \
Answer clearly and concisely. If you do not know something, say so rather than guessing.";

/// System prompt for requests carrying file context.
///
/// The model never sees raw file bytes, only the structured summaries below
/// the user's message; it must not pretend otherwise.
pub const FILE_ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a helpful and honest AI assistant analyzing files a user has uploaded.

RULES:
1. Answer using ONLY the structured file context supplied with the message.
2. The context contains summaries, statistics, and text previews - never the raw files. Do not fabricate file contents you cannot see.
3. If a file's summary carries an "error" field, acknowledge that the file could not be processed instead of inventing its contents.
4. When previews are truncated, say your answer is based on a preview."#;

/// Combine the user's prompt with the serialized file context.
///
/// The context is pretty-printed JSON with stable field order, readable by
/// both the model and anyone debugging the request.
pub fn build_combined_prompt(prompt: &str, context: &ChatContext) -> String {
    let serialized = serde_json::to_string_pretty(context)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize context: {}\"}}", e));

    format!(
        "{}\n\n--- UPLOADED FILE CONTEXT ---\n{}\n--- END FILE CONTEXT ---",
        prompt, serialized
    )
}
