use crate::error::{BookError, BookResult};
use crate::models::BookSpec;
use epub_builder::{EpubBuilder, EpubContent, ReferenceType, ZipLibrary};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n\s*").expect("valid paragraph pattern"));

fn epub<E: std::fmt::Display>(err: E) -> BookError {
    BookError::Epub(err.to_string())
}

fn saved_message(path: &Path) -> String {
    format!("Book content saved successfully: {}", path.display())
}

/// Writes each chunk followed by a blank line, truncating any existing file.
///
/// A failed write leaves whatever was already flushed on disk.
#[instrument(skip(chunks, path), fields(chunks = chunks.len(), path = %path.display()))]
pub fn write_chunks(chunks: &[&str], path: &Path) -> BookResult<String> {
    let file = File::create(path).map_err(|e| BookError::io(path, e))?;
    let mut out = BufWriter::new(file);

    for chunk in chunks {
        out.write_all(chunk.as_bytes())
            .and_then(|_| out.write_all(b"\n\n"))
            .map_err(|e| BookError::io(path, e))?;
    }
    out.flush().map_err(|e| BookError::io(path, e))?;

    debug!("text file written");
    Ok(saved_message(path))
}

/// Writes the chunks as an EPUB, one section per chunk, with an inline
/// table of contents.
#[instrument(skip(spec, chunks, path), fields(chunks = chunks.len(), path = %path.display()))]
pub fn write_epub(spec: &BookSpec, chunks: &[&str], path: &Path) -> BookResult<String> {
    let mut builder = EpubBuilder::new(ZipLibrary::new().map_err(epub)?).map_err(epub)?;
    builder
        .metadata("title", spec.title.as_str())
        .map_err(epub)?
        .metadata("author", spec.author.as_str())
        .map_err(epub)?
        .metadata("lang", spec.language.as_str())
        .map_err(epub)?;
    if !spec.subtitle.is_empty() {
        builder
            .metadata("description", spec.subtitle.as_str())
            .map_err(epub)?;
    }

    for (idx, chunk) in chunks.iter().enumerate() {
        let title = format!("Part {}", idx + 1);
        let xhtml = section_xhtml(&title, chunk);
        builder
            .add_content(
                EpubContent::new(format!("part_{:03}.xhtml", idx + 1), xhtml.as_bytes())
                    .title(title)
                    .reftype(ReferenceType::Text),
            )
            .map_err(epub)?;
    }
    builder.inline_toc();

    let mut file = File::create(path).map_err(|e| BookError::io(path, e))?;
    builder.generate(&mut file).map_err(epub)?;
    file.flush().map_err(|e| BookError::io(path, e))?;

    debug!("epub written");
    Ok(saved_message(path))
}

fn section_xhtml(title: &str, chunk: &str) -> String {
    let mut body = String::new();
    for paragraph in PARAGRAPH_BREAK.split(chunk.trim()) {
        if paragraph.trim().is_empty() {
            continue;
        }
        let lines: Vec<String> = paragraph
            .lines()
            .map(|line| html_escape::encode_text(line.trim()).into_owned())
            .collect();
        body.push_str("<p>");
        body.push_str(&lines.join("<br/>"));
        body.push_str("</p>\n");
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\">\n\
         <head><title>{}</title></head>\n\
         <body>\n{}</body>\n\
         </html>\n",
        html_escape::encode_text(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_blank_line_after_every_chunk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.txt");
        let message = write_chunks(&["abc", "de"], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc\n\nde\n\n");
        assert_eq!(
            message,
            format!("Book content saved successfully: {}", path.display())
        );
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();
        write_chunks(&["new"], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n\n");
    }

    #[test]
    fn empty_sequence_truncates_to_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "old").unwrap();
        write_chunks(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("book.txt");
        let err = write_chunks(&["abc"], &path).unwrap_err();
        assert!(matches!(err, BookError::Io { .. }));
    }

    #[test]
    fn section_markup_is_escaped() {
        let xhtml = section_xhtml("Part 1", "By <Jane> & Co\n\nline one\nline two\n\n\n x ");
        assert!(xhtml.contains("<p>By &lt;Jane&gt; &amp; Co</p>"));
        assert!(xhtml.contains("<p>line one<br/>line two</p>"));
        assert!(xhtml.contains("<p>x</p>"));
        assert!(xhtml.contains("<title>Part 1</title>"));
    }

    #[test]
    fn epub_is_a_zip_archive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.epub");
        let spec = BookSpec {
            title: "My Life".into(),
            author: "Jane Doe".into(),
            language: "en".into(),
            ..BookSpec::default()
        };
        let message = write_epub(&spec, &["By Jane Doe\n\nChapter 1", "More"], &path).unwrap();
        assert!(message.ends_with("book.epub"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
