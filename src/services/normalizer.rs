/// Strips `*` emphasis markers and surrounding whitespace from model output.
pub fn clean(raw: &str) -> String {
    raw.replace('*', "").trim().to_string()
}

/// Prefixes `By {author}` and a blank line, once.
///
/// `*` is dropped from the author as well. Content that already starts with
/// this byline, or is nothing but the byline, is returned with a single one.
pub fn with_byline(author: &str, content: &str) -> String {
    let byline = format!("By {}\n\n", author.replace('*', ""));
    if content.starts_with(&byline) {
        content.to_string()
    } else if content == byline.trim_end() {
        byline
    } else {
        byline + content
    }
}

pub fn normalize(raw: &str, author: &str) -> String {
    with_byline(author, &clean(raw))
}
