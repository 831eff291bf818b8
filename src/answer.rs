//! Extractive answer composition.
//!
//! The answer is built only from retrieved text: the best match verbatim,
//! then a fixed-length preview of the runner-up. Ranks 3 and below are
//! returned to the caller but never quoted.

use crate::retriever::SearchResult;

/// Returned when the knowledge base holds no documents.
pub const FALLBACK_ANSWER: &str =
    "No information available. Add some documents to the knowledge base first.";

/// Lead-in for the rank-1 document.
pub const PRIMARY_LEAD_IN: &str = "Based on the most relevant information:\n\n";

/// Lead-in for the rank-2 preview.
pub const SECONDARY_LEAD_IN: &str = "\n\nAdditional context:\n\n";

/// Number of characters of the rank-2 document included in the answer.
pub const SECONDARY_PREVIEW_CHARS: usize = 200;

pub const ELLIPSIS: &str = "...";

/// Compose the answer text for results already sorted by rank.
pub fn compose_answer(results: &[SearchResult]) -> String {
    let Some(primary) = results.first() else {
        return FALLBACK_ANSWER.to_string();
    };

    let mut answer = format!("{}{}", PRIMARY_LEAD_IN, primary.text);

    if let Some(secondary) = results.get(1) {
        answer.push_str(SECONDARY_LEAD_IN);
        answer.push_str(&preview(&secondary.text, SECONDARY_PREVIEW_CHARS));
        answer.push_str(ELLIPSIS);
    }

    answer
}

/// First `max_chars` characters of `text`, cut without regard to words.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
