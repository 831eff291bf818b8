//! Offline feature-hashing embedder.

use std::collections::BTreeMap;

use tracing::debug;

use super::Embedder;
use crate::error::{QaError, Result};
use crate::vector::Vector;

/// Model identifier reported by [`HashingEmbedder`].
pub const MODEL_NAME: &str = "trigram-v1";

const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "what", "how", "does", "do",
];

/// Deterministic embedder built from word and character-trigram hashes.
///
/// Texts sharing vocabulary land close together in L2 space, which is
/// enough for a local, dependency-free knowledge base. It is not a
/// semantic model: synonyms do not match.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vector {
        let mut embedding = vec![0.0f32; self.dimension];
        let lower = text.to_lowercase();

        // Ordered so slot accumulation happens in the same order on every call.
        let mut word_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let slot = hash_chars(window, 37) % self.dimension as u64;
                embedding[slot as usize] += (*freq as f32).sqrt();
            }

            let slot = hash_chars(&chars, 31) % self.dimension as u64;
            embedding[slot as usize] += *freq as f32;
        }

        let mut vector = Vector::new(embedding);
        // Texts without any usable word stay at the origin.
        if vector.normalize().is_err() {
            debug!(text_len = text.len(), "no features extracted, using zero vector");
        }
        vector
    }
}

fn hash_chars(chars: &[char], multiplier: u64) -> u64 {
    chars.iter().fold(0u64, |acc, c| {
        acc.wrapping_mul(multiplier).wrapping_add(*c as u64)
    })
}

impl Embedder for HashingEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if self.dimension == 0 {
            return Err(QaError::Config(
                "Embedding dimension must be greater than zero".to_string(),
            ));
        }
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
