#![allow(dead_code)]

use autobiographer::{BookError, BookResult, BookSpec, GeneratedText, Prompt, TextGenerator};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn jane_doe() -> BookSpec {
    BookSpec {
        title: "My Life".into(),
        subtitle: "A Journey".into(),
        author: "Jane Doe".into(),
        style: "Storytelling".into(),
        language: "English".into(),
        length: "5000".into(),
    }
}

/// Replies with fixed text and remembers every prompt it saw.
pub struct CannedGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        CannedGenerator {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &Prompt) -> BookResult<GeneratedText> {
        self.prompts
            .lock()
            .unwrap()
            .push(prompt.as_str().to_string());
        Ok(GeneratedText {
            text: self.reply.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned-model"
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Authentication,
    Invocation,
}

/// Always fails, counting how often it was called.
pub struct FailingGenerator {
    failure: Failure,
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new(failure: Failure) -> Self {
        FailingGenerator {
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &Prompt) -> BookResult<GeneratedText> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.failure {
            Failure::Authentication => BookError::Authentication {
                provider: "failing",
                message: "credential rejected".into(),
            },
            Failure::Invocation => BookError::ModelInvocation {
                provider: "failing",
                message: "HTTP 429 Too Many Requests: quota".into(),
            },
        })
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}
