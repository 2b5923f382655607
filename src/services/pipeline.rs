use crate::error::{BookError, BookResult};
use crate::models::{BookSpec, GenerationReport, OutputFormat};
use crate::services::chunker::{self, DEFAULT_CHUNK_SIZE};
use crate::services::llm::TextGenerator;
use crate::services::{normalizer, prompt, writer};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Runs prompt building, generation, cleanup, chunking and writing in order.
///
/// No stage is retried and no error is handled locally. A failed model call
/// leaves the output path untouched.
#[derive(Debug, Clone)]
pub struct Pipeline<G> {
    generator: G,
    chunk_size: usize,
    format: OutputFormat,
    output: PathBuf,
}

impl<G: TextGenerator> Pipeline<G> {
    pub fn new(generator: G, output: impl Into<PathBuf>) -> Self {
        Pipeline {
            generator,
            chunk_size: DEFAULT_CHUNK_SIZE,
            format: OutputFormat::Text,
            output: output.into(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub async fn run(&self, spec: &BookSpec) -> BookResult<GenerationReport> {
        self.run_to(spec, &self.output).await
    }

    #[instrument(
        skip(self, spec, path),
        fields(
            provider = self.generator.provider_name(),
            format = %self.format,
            path = %path.display(),
        )
    )]
    pub async fn run_to(&self, spec: &BookSpec, path: &Path) -> BookResult<GenerationReport> {
        if self.chunk_size == 0 {
            return Err(BookError::InvalidArgument(
                "chunk size must be a positive integer".to_string(),
            ));
        }

        let prompt = prompt::build_prompt(spec);
        info!(prompt_len = prompt.len(), "Prompt built");

        let raw = self.generator.generate(&prompt).await?;
        let content = normalizer::normalize(&raw.text, &spec.author);
        let chunks = chunker::chunk(&content, self.chunk_size)?;
        info!(
            chars = content.chars().count(),
            chunks = chunks.len(),
            "Content prepared"
        );

        let message = match self.format {
            OutputFormat::Text => writer::write_chunks(&chunks, path)?,
            OutputFormat::Epub => writer::write_epub(spec, &chunks, path)?,
        };
        info!("{}", message);

        Ok(GenerationReport {
            message,
            path: path.to_path_buf(),
            chunk_count: chunks.len(),
        })
    }
}
