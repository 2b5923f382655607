use crate::error::{BookError, BookResult};

pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Splits `content` into consecutive slices of `size` characters.
///
/// Boundaries are positional only and may fall mid-word. The last slice holds
/// the remainder; empty input yields no slices.
pub fn chunk(content: &str, size: usize) -> BookResult<Vec<&str>> {
    if size == 0 {
        return Err(BookError::InvalidArgument(
            "chunk size must be a positive integer".to_string(),
        ));
    }

    let mut chunks = Vec::with_capacity(content.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in content.char_indices() {
        if count == size {
            chunks.push(&content[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < content.len() {
        chunks.push(&content[start..]);
    }

    Ok(chunks)
}
