//! Language-model integration: collaborator trait, prompt variants, and the
//! request orchestration that ties the pipeline's context to a response.

pub mod chat;
pub mod client;
pub mod prompts;

pub use chat::{assemble, AssembledRequest, ChatResponse, ChatService, SystemPromptVariant};
pub use client::{ChatCompletionClient, LanguageModel};
