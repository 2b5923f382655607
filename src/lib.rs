//! Autobiography generation: build a prompt from book details, ask a hosted
//! model for a table of contents plus the full narrative, clean the reply,
//! and write it out in fixed-size chunks.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;

pub use config::{Config, ProviderKind};
pub use error::{BookError, BookResult, ErrorKind};
pub use models::{BookSpec, GeneratedText, GenerationReport, OutputFormat, Prompt};
pub use services::llm::{Provider, TextGenerator};
pub use services::pipeline::Pipeline;
