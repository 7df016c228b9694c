use std::num::NonZeroUsize;

/// Default maximum characters per chunk handed to the semantic extractor
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(6000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Cleans text into non-empty trimmed lines
///
/// This function normalizes text content by:
/// - Trimming whitespace from each line
/// - Removing empty lines
/// - Joining the remaining lines with a single newline, keeping their order
pub fn clean_lines(text: &str) -> String {
    split_into_lines(text).join("\n")
}

/// Splits text into trimmed, non-empty lines
pub fn split_into_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits text into contiguous chunks of `max_length` characters.
///
/// Every chunk except the last holds exactly `max_length` characters; the last
/// holds the remainder. Chunks never overlap and may split mid-word, so
/// concatenating them in order gives back `text`. Empty text yields no chunks.
pub fn chunk(text: &str, max_length: NonZeroUsize) -> Vec<&str> {
    let max_length = max_length.get();
    let mut chunks = Vec::with_capacity(text.len() / max_length + 1);
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_length {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
