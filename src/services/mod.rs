//! External capability integrations
//!
//! Each heavy extraction capability (OCR, speech-to-text, media tooling) is a
//! trait with a CLI-backed default implementation. The pipeline only ever
//! talks to the traits, so tests run with stubs and a missing tool degrades
//! into a per-file error summary instead of a crash.

pub mod media_tools;
pub mod ocr;
pub mod transcribe;

pub use media_tools::{FfmpegTools, MediaTools};
pub use ocr::{OcrEngine, TesseractOcr};
pub use transcribe::{Transcriber, Transcript, WhisperCli};
