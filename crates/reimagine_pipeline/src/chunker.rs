//! Paragraph-aggregating text chunker.

use tracing::{debug, info, instrument};

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split `text` into chunks of whole paragraphs bounded by a word budget.
///
/// Text within the budget comes back as a single chunk holding the input
/// verbatim. Longer text is split on blank lines and paragraphs are packed
/// greedily; a paragraph that would overflow a non-empty chunk starts the
/// next one. A paragraph longer than the budget is never split and sits
/// alone in its own chunk. Blank paragraphs are dropped.
///
/// # Examples
///
/// ```
/// use reimagine_pipeline::chunk;
///
/// let chunks = chunk("one two\n\nthree four\n\nfive", 4);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0], vec!["one two".to_string(), "three four".to_string()]);
/// assert_eq!(chunks[1], vec!["five".to_string()]);
///
/// assert_eq!(chunk("short story", 2000), vec![vec!["short story".to_string()]]);
/// ```
#[instrument(skip(text), fields(words = word_count(text)))]
pub fn chunk(text: &str, budget: usize) -> Vec<Vec<String>> {
    if word_count(text) <= budget {
        info!("Created 1 chunk (text within budget)");
        return vec![vec![text.to_string()]];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_words = 0;

    for paragraph in paragraphs(text) {
        let words = word_count(&paragraph);
        if current_words + words > budget && !current.is_empty() {
            debug!(paragraphs = current.len(), words = current_words, "Closing chunk");
            chunks.push(std::mem::take(&mut current));
            current_words = 0;
        }
        current.push(paragraph);
        current_words += words;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    info!(chunks = chunks.len(), "Created chunks");
    chunks
}

/// Paragraphs separated by one or more blank lines, trimmed, blanks dropped.
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !lines.is_empty() {
                paragraphs.push(lines.join("\n").trim().to_string());
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        paragraphs.push(lines.join("\n").trim().to_string());
    }

    paragraphs
}
