pub mod chunker;
pub mod llm;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;
pub mod writer;
