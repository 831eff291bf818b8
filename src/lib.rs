//! # Snippet QA
//!
//! Extractive question answering over a small, user-extensible document
//! collection.
//!
//! This library provides:
//! - An exact brute-force L2 vector index behind a swappable trait
//! - A knowledge base that keeps embeddings and texts in lockstep
//! - A pluggable embedder interface with an offline hashing embedder
//! - A retriever that ranks documents and composes an extractive answer
//!
//! ## Example
//!
//! ```rust
//! use snippet_qa::embedding::HashingEmbedder;
//! use snippet_qa::Retriever;
//!
//! let mut retriever = Retriever::with_flat_index(HashingEmbedder::new(384));
//!
//! retriever
//!     .add_documents(vec![
//!         "The Eiffel Tower is located in Paris.".to_string(),
//!         "Mount Everest is the highest mountain on Earth.".to_string(),
//!     ])
//!     .unwrap();
//!
//! let answer = retriever.answer_question("Where is the Eiffel Tower?").unwrap();
//! assert_eq!(answer.results[0].rank, 1);
//! assert!(answer.text.contains("Paris"));
//! ```

pub mod answer;
pub mod config;
pub mod distance;
pub mod embedding;
pub mod error;
pub mod flat_index;
pub mod index;
pub mod ingest;
pub mod knowledge_base;
pub mod logging;
pub mod metrics;
pub mod retriever;
pub mod server;
pub mod vector;

pub use config::QaConfig;
pub use embedding::Embedder;
pub use error::{QaError, Result};
pub use flat_index::FlatIndex;
pub use index::VectorIndex;
pub use knowledge_base::KnowledgeBase;
pub use retriever::{AddOutcome, Answer, Retriever, SearchResult};
pub use vector::Vector;
