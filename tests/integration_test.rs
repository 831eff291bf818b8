//! End-to-end scenarios for the question answering core

use std::collections::HashMap;

use snippet_qa::answer::{ELLIPSIS, FALLBACK_ANSWER, PRIMARY_LEAD_IN, SECONDARY_LEAD_IN};
use snippet_qa::embedding::HashingEmbedder;
use snippet_qa::{
    AddOutcome, Embedder, KnowledgeBase, QaError, Result, Retriever, Vector, VectorIndex,
};

/// Embeds known texts to fixed points; everything else goes to the origin.
struct FixedEmbedder {
    points: HashMap<String, Vec<f32>>,
}

impl FixedEmbedder {
    fn new(points: &[(&str, [f32; 2])]) -> Self {
        Self {
            points: points
                .iter()
                .map(|(text, p)| (text.to_string(), p.to_vec()))
                .collect(),
        }
    }
}

impl Embedder for FixedEmbedder {
    fn model_name(&self) -> &str {
        "fixed"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        Ok(texts
            .iter()
            .map(|t| Vector::new(self.points.get(t).cloned().unwrap_or(vec![0.0, 0.0])))
            .collect())
    }
}

#[test]
fn test_empty_knowledge_base_fallback() {
    let retriever = Retriever::with_flat_index(HashingEmbedder::new(384));
    let answer = retriever.answer_question("anything").unwrap();

    assert_eq!(answer.text, FALLBACK_ANSWER);
    assert!(answer.results.is_empty());
}

#[test]
fn test_single_document_has_no_secondary_section() {
    let mut retriever = Retriever::with_flat_index(FixedEmbedder::new(&[
        ("A", [1.0, 1.0]),
        ("question", [1.0, 0.5]),
    ]));
    retriever.add_documents(vec!["A".to_string()]).unwrap();

    let answer = retriever.answer_question("question").unwrap();
    assert_eq!(answer.text, format!("{}A", PRIMARY_LEAD_IN));
    assert!(!answer.text.contains(SECONDARY_LEAD_IN));
    assert_eq!(answer.results.len(), 1);
}

#[test]
fn test_secondary_section_is_truncated_preview() {
    let a: String = "The quick brown fox jumps. ".chars().cycle().take(50).collect();
    let b: String = "Lorem ipsum dolor sit amet, consectetur. "
        .chars()
        .cycle()
        .take(500)
        .collect();

    let mut retriever = Retriever::with_flat_index(FixedEmbedder::new(&[
        (a.as_str(), [0.0, 1.0]),
        (b.as_str(), [0.0, 3.0]),
        ("question", [0.0, 0.0]),
    ]));
    retriever.add_documents(vec![a.clone(), b.clone()]).unwrap();

    let answer = retriever.answer_question("question").unwrap();
    let b_preview: String = b.chars().take(200).collect();
    assert_eq!(
        answer.text,
        format!("{PRIMARY_LEAD_IN}{a}{SECONDARY_LEAD_IN}{b_preview}{ELLIPSIS}")
    );
    assert!(!answer.text.contains(&b));
}

#[test]
fn test_empty_batch_leaves_count_unchanged() {
    let mut retriever = Retriever::with_flat_index(HashingEmbedder::new(32));
    retriever
        .add_documents(vec!["one".to_string(), "two".to_string()])
        .unwrap();

    assert_eq!(retriever.add_documents(vec![]).unwrap(), AddOutcome::Empty);
    assert_eq!(retriever.knowledge_base().len(), 2);
}

#[test]
fn test_wrong_dimension_insert_is_rejected() {
    let mut kb = KnowledgeBase::new(4);
    kb.insert(vec![Vector::new(vec![0.0; 4])], vec!["ok".to_string()])
        .unwrap();

    let result = kb.insert(vec![Vector::new(vec![0.0; 5])], vec!["bad".to_string()]);
    assert!(matches!(
        result,
        Err(QaError::DimensionMismatch { expected: 4, actual: 5 })
    ));
    assert_eq!(kb.len(), 1);
    assert_eq!(kb.vector_count(), 1);
    assert_eq!(kb.index().len(), 1);
}

#[test]
fn test_zero_dimension_embedder_fails_without_storing() {
    let mut retriever = Retriever::with_flat_index(HashingEmbedder::new(0));
    let result = retriever.add_documents(vec!["hello world".to_string()]);

    assert!(matches!(result, Err(QaError::Config(_))));
    assert!(retriever.knowledge_base().is_empty());
    assert_eq!(retriever.knowledge_base().vector_count(), 0);
}

#[test]
fn test_ids_follow_insertion_order_across_batches() {
    let mut retriever = Retriever::with_flat_index(HashingEmbedder::new(64));
    let first = retriever
        .add_documents(vec!["alpha".to_string(), "beta".to_string()])
        .unwrap();
    let second = retriever
        .add_text_blob("gamma\n\ndelta\n\n\nepsilon")
        .unwrap();

    assert_eq!(first, AddOutcome::Added { count: 2, first_id: 0 });
    assert_eq!(second, AddOutcome::Added { count: 3, first_id: 2 });

    let kb = retriever.knowledge_base();
    let docs: Vec<&str> = kb.documents().collect();
    assert_eq!(docs, vec!["alpha", "beta", "gamma", "delta", "epsilon"]);
}

#[test]
fn test_hashing_embedder_finds_relevant_paragraph() {
    let mut retriever = Retriever::with_flat_index(HashingEmbedder::new(384));
    retriever
        .add_text_blob(
            "Photosynthesis converts sunlight, water and carbon dioxide into glucose and oxygen.\n\n\
             The French Revolution began in 1789 with the storming of the Bastille.\n\n\
             Rust's ownership system enforces memory safety at compile time.",
        )
        .unwrap();

    let answer = retriever
        .answer_question("How does Rust enforce memory safety?")
        .unwrap();

    assert_eq!(answer.results.len(), 3);
    assert_eq!(answer.results[0].id, 2);
    assert!(answer.text.starts_with(PRIMARY_LEAD_IN));
    assert!(answer.text.contains("Rust's ownership system"));
    for pair in answer.results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}
