//! dossier — file intelligence pipeline for chat assistants
//!
//! Converts heterogeneous uploads (tabular data, documents, images, audio,
//! video) into bounded, structured summaries a language model can reason
//! over, and decides per request whether the model sees a plain prompt or a
//! prompt plus file context. Raw file bytes never reach the model.
//!
//! ```no_run
//! use dossier::ai::{ChatCompletionClient, ChatService};
//! use dossier::config::PipelineConfig;
//! use dossier::pipeline::{Pipeline, UploadedFile};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), dossier::error::RequestError> {
//! dossier::init_tracing();
//!
//! let service = ChatService::new(
//!     Arc::new(ChatCompletionClient::from_env()),
//!     Pipeline::new(PipelineConfig::from_env()),
//! );
//!
//! let upload = UploadedFile::new("sales.csv", std::fs::read("sales.csv").unwrap());
//! let reply = service.handle("What does my data show?", vec![upload]).await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod services;

use tracing_subscriber::EnvFilter;

/// Load `.env` and initialize tracing with a `RUST_LOG` env filter.
///
/// Default: warn for dependencies, info for this crate. Call once at startup;
/// repeated calls are ignored.
pub fn init_tracing() {
    let _ = dotenvy::dotenv();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,dossier=info")),
        )
        .try_init();
}
