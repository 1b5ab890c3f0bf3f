//! Chunk preview command handler.

use reimagine::{
    PipelineError, PipelineErrorKind, ReimagineConfig, ReimagineResult, chunk, word_count,
};
use std::path::Path;

/// Print the chunk layout of a text file without calling any backend.
pub async fn show_chunks(text_file: &Path, budget: Option<usize>) -> ReimagineResult<()> {
    let budget = match budget {
        Some(budget) => budget,
        None => *ReimagineConfig::load()?.pipeline().chunk_size(),
    };

    let text = tokio::fs::read_to_string(text_file).await.map_err(|e| {
        PipelineError::new(PipelineErrorKind::InputRead(format!(
            "{}: {}",
            text_file.display(),
            e
        )))
    })?;

    let chunks = chunk(&text, budget);
    println!(
        "{} words in {} chunk(s), budget {}",
        word_count(&text),
        chunks.len(),
        budget
    );
    for (index, paragraphs) in chunks.iter().enumerate() {
        let words: usize = paragraphs.iter().map(|p| word_count(p)).sum();
        println!(
            "  chunk {:>3}: {:>3} paragraph(s), {:>6} words",
            index + 1,
            paragraphs.len(),
            words
        );
    }
    Ok(())
}
