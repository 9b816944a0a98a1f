//! Request orchestration and context assembly
//!
//! Decides whether a request is prompt-only or prompt+context before the
//! language model is invoked. With no files, the model sees the general
//! system prompt and the user's prompt unmodified. With files, the pipeline's
//! records are serialized into the combined prompt under the file-analysis
//! system prompt, and the same context is returned to the caller verbatim.

use super::client::LanguageModel;
use super::prompts;
use crate::error::RequestError;
use crate::pipeline::{ChatContext, FileRecord, Pipeline, UploadedFile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which system prompt a request is answered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPromptVariant {
    General,
    FileAnalysis,
}

impl SystemPromptVariant {
    pub fn prompt(&self) -> &'static str {
        match self {
            SystemPromptVariant::General => prompts::GENERAL_SYSTEM_PROMPT,
            SystemPromptVariant::FileAnalysis => prompts::FILE_ANALYSIS_SYSTEM_PROMPT,
        }
    }
}

/// A request ready to hand to the language model.
#[derive(Debug, Clone)]
pub struct AssembledRequest {
    pub combined_prompt: String,
    pub variant: SystemPromptVariant,
    pub context: Option<ChatContext>,
}

/// Build the combined prompt and pick the system prompt variant.
///
/// The model only ever receives text derived by the summarizers — never raw
/// file bytes.
pub fn assemble(prompt: &str, records: Vec<FileRecord>) -> AssembledRequest {
    if records.is_empty() {
        return AssembledRequest {
            combined_prompt: prompt.to_string(),
            variant: SystemPromptVariant::General,
            context: None,
        };
    }

    let context = ChatContext { files: records };
    AssembledRequest {
        combined_prompt: prompts::build_combined_prompt(prompt, &context),
        variant: SystemPromptVariant::FileAnalysis,
        context: Some(context),
    }
}

/// Response body returned to the caller: the model's answer, a status flag,
/// and the file context for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

/// One chat request end to end: validate, run the pipeline, assemble, invoke
/// the model.
///
/// The model and pipeline are injected at construction; there is no ambient
/// global state, so tests run against stubs.
pub struct ChatService {
    model: Arc<dyn LanguageModel>,
    pipeline: Pipeline,
}

impl ChatService {
    pub fn new(model: Arc<dyn LanguageModel>, pipeline: Pipeline) -> Self {
        Self { model, pipeline }
    }

    pub async fn handle(
        &self,
        prompt: &str,
        uploads: Vec<UploadedFile>,
    ) -> Result<ChatResponse, RequestError> {
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }

        let records = if uploads.is_empty() {
            Vec::new()
        } else {
            tracing::info!("[Chat] Processing {} uploaded file(s)", uploads.len());
            self.pipeline.process(uploads).await?
        };

        let assembled = assemble(prompt, records);
        tracing::debug!(
            "[Chat] Answering under {:?} prompt ({} chars combined)",
            assembled.variant,
            assembled.combined_prompt.len()
        );

        let response = self
            .model
            .generate(assembled.variant.prompt(), &assembled.combined_prompt)
            .await
            .map_err(RequestError::Model)?;

        Ok(ChatResponse {
            response,
            status: "success".to_string(),
            context: assembled.context,
        })
    }
}
