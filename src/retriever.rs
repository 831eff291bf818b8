//! Question answering over the knowledge base.
//!
//! A [`Retriever`] owns one embedder and one knowledge base. Documents go in
//! through [`Retriever::add_documents`]; questions come back out through
//! [`Retriever::answer_question`] as an extractive answer plus the ranked
//! matches it was built from.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::answer::compose_answer;
use crate::distance::similarity_from_distance;
use crate::embedding::Embedder;
use crate::error::{QaError, Result};
use crate::flat_index::FlatIndex;
use crate::index::VectorIndex;
use crate::ingest::split_paragraphs;
use crate::knowledge_base::KnowledgeBase;

/// Number of neighbors retrieved when answering a question.
pub const DEFAULT_TOP_K: usize = 3;

/// A ranked match for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Insertion position of the document
    pub id: usize,
    pub text: String,
    /// Squared L2 distance to the query
    pub distance: f32,
    /// `1 / (1 + distance)`
    pub similarity: f32,
    /// 1-based position within this result list
    pub rank: usize,
}

/// An extractive answer and the results it was composed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub results: Vec<SearchResult>,
}

/// What an `add_documents` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    /// `count` documents were stored, the first under id `first_id`.
    Added { count: usize, first_id: usize },
    /// Nothing usable was supplied; the knowledge base is unchanged.
    Empty,
}

/// Summary of the knowledge base for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBaseStats {
    pub documents: usize,
    pub dimension: usize,
    pub model: String,
}

pub struct Retriever<E: Embedder, I: VectorIndex = FlatIndex> {
    embedder: E,
    knowledge_base: KnowledgeBase<I>,
}

impl<E: Embedder> Retriever<E, FlatIndex> {
    /// Create a retriever over an empty flat knowledge base sized for `embedder`.
    pub fn with_flat_index(embedder: E) -> Self {
        let knowledge_base = KnowledgeBase::new(embedder.dimension());
        Self {
            embedder,
            knowledge_base,
        }
    }
}

impl<E: Embedder, I: VectorIndex> Retriever<E, I> {
    /// Create a retriever over an existing knowledge base.
    pub fn new(embedder: E, knowledge_base: KnowledgeBase<I>) -> Result<Self> {
        if embedder.dimension() != knowledge_base.dimension() {
            return Err(QaError::DimensionMismatch {
                expected: knowledge_base.dimension(),
                actual: embedder.dimension(),
            });
        }
        Ok(Self {
            embedder,
            knowledge_base,
        })
    }

    /// Embed and store documents, preserving their order.
    ///
    /// The whole batch is encoded with a single embedder call. An empty
    /// batch is a no-op reported as [`AddOutcome::Empty`].
    pub fn add_documents(&mut self, texts: Vec<String>) -> Result<AddOutcome> {
        if texts.is_empty() {
            debug!("add_documents called with an empty batch");
            return Ok(AddOutcome::Empty);
        }

        let start = Instant::now();
        let vectors = self.embedder.encode(&texts)?;
        if vectors.len() != texts.len() {
            return Err(QaError::Embedding(format!(
                "embedder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        let first_id = self.knowledge_base.len();
        let count = texts.len();
        self.knowledge_base.insert(vectors, texts)?;

        info!(
            count,
            first_id,
            total = self.knowledge_base.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "added documents"
        );
        Ok(AddOutcome::Added { count, first_id })
    }

    /// Split a pasted blob into paragraphs and add each as a document.
    pub fn add_text_blob(&mut self, blob: &str) -> Result<AddOutcome> {
        self.add_documents(split_paragraphs(blob))
    }

    /// Find the `top_k` documents closest to `question`.
    ///
    /// Short-circuits to an empty list without calling the embedder when
    /// the knowledge base is empty or `top_k` is zero.
    pub fn search(&self, question: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.knowledge_base.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let k = top_k.min(self.knowledge_base.len());
        let query = self
            .embedder
            .encode(&[question.to_string()])?
            .pop()
            .ok_or_else(|| QaError::Embedding("No embedding returned for query".to_string()))?;

        let neighbors = self.knowledge_base.search(&query, k)?;
        debug!(k, found = neighbors.len(), "searched knowledge base");

        neighbors
            .into_iter()
            .enumerate()
            .map(|(position, (id, distance))| -> Result<SearchResult> {
                let text = self.knowledge_base.document(id).ok_or_else(|| {
                    QaError::IndexError(format!("index returned unknown document id {}", id))
                })?;
                Ok(SearchResult {
                    id,
                    text: text.to_string(),
                    distance,
                    similarity: similarity_from_distance(distance),
                    rank: position + 1,
                })
            })
            .collect()
    }

    /// Answer a question from the top [`DEFAULT_TOP_K`] matches.
    pub fn answer_question(&self, question: &str) -> Result<Answer> {
        let results = self.search(question, DEFAULT_TOP_K)?;
        if results.is_empty() {
            info!("no documents available, returning fallback answer");
        } else {
            debug!(
                top_similarity = results[0].similarity,
                results = results.len(),
                "composing answer"
            );
        }

        Ok(Answer {
            text: compose_answer(&results),
            results,
        })
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        KnowledgeBaseStats {
            documents: self.knowledge_base.len(),
            dimension: self.knowledge_base.dimension(),
            model: self.embedder.model_name().to_string(),
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase<I> {
        &self.knowledge_base
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}
