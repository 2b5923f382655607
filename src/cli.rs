//! Command-line surface: flags and the interactive metadata prompts.

use crate::config::ProviderKind;
use crate::models::{BookSpec, OutputFormat};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Generate an AI-written autobiography from a handful of book details.
#[derive(Parser, Debug)]
#[command(name = "autobiographer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Model provider (gemini, openai, ollama)
    #[arg(long, global = true)]
    pub provider: Option<ProviderKind>,

    /// Characters per chunk
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Output format (txt, epub)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask for the book details on stdin and write the book (default)
    Write {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the generator over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: SocketAddr,

        /// Directory generated books are written to
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
}

const QUESTIONS: [&str; 6] = [
    "Enter Book Title: ",
    "Enter Subtitle: ",
    "Enter Author Name: ",
    "Enter Writing Style (e.g., Storytelling, Informative): ",
    "Enter Language: ",
    "Enter Approximate Length (e.g., 5000 words, 10 pages): ",
];

/// Asks the six book questions in order and collects the answers verbatim.
///
/// Only the line terminator is removed. A closed input stream answers with
/// an empty string.
pub fn read_book_spec<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<BookSpec> {
    let mut answers: [String; 6] = Default::default();
    for (question, answer) in QUESTIONS.iter().zip(answers.iter_mut()) {
        output.write_all(question.as_bytes())?;
        output.flush()?;
        input.read_line(answer)?;
        let trimmed = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(trimmed);
    }

    let [title, subtitle, author, style, language, length] = answers;
    Ok(BookSpec {
        title,
        subtitle,
        author,
        style,
        language,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_answers_in_order() {
        let mut input =
            Cursor::new("My Life\nA Journey\nJane Doe\nStorytelling\nEnglish\r\n5000\n");
        let mut output = Vec::new();
        let spec = read_book_spec(&mut input, &mut output).unwrap();

        assert_eq!(spec.title, "My Life");
        assert_eq!(spec.subtitle, "A Journey");
        assert_eq!(spec.author, "Jane Doe");
        assert_eq!(spec.style, "Storytelling");
        assert_eq!(spec.language, "English");
        assert_eq!(spec.length, "5000");

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown, QUESTIONS.concat());
    }

    #[test]
    fn keeps_inner_whitespace_and_empty_answers() {
        let mut input = Cursor::new("  padded title  \n\n");
        let spec = read_book_spec(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(spec.title, "  padded title  ");
        assert_eq!(spec.subtitle, "");
        assert_eq!(spec.length, "");
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "autobiographer",
            "--provider",
            "openai",
            "--format",
            "epub",
            "write",
            "-o",
            "book.epub",
        ]);
        assert_eq!(cli.provider, Some(ProviderKind::OpenAi));
        assert_eq!(cli.format, Some(OutputFormat::Epub));
        assert!(matches!(cli.command, Some(Command::Write { output: Some(_) })));
    }

    #[test]
    fn defaults_to_interactive_write() {
        let cli = Cli::parse_from(["autobiographer"]);
        assert!(cli.command.is_none());
        assert!(cli.chunk_size.is_none());
    }
}
