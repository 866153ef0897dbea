//! Question answering over retrieved context.
//!
//! Assembles the retrieved chunks into a grounded prompt, asks the
//! generation provider for an answer, and reports how confident the
//! retrieval itself was.

use corpus_vector::SearchResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::llm::LLMClient;
use crate::types::Result;

/// How strongly the retrieved context supports the answer.
///
/// Bucketed from the mean similarity score of the retrieved chunks. The
/// thresholds apply to the raw signed score: cosine similarity can be
/// negative, and a negative mean lands in `Low` exactly like a small
/// positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Mean score above 0.7.
    High,
    /// Mean score above 0.5.
    Medium,
    /// Everything else, including an empty result set.
    Low,
}

impl Confidence {
    /// Bucket the mean score of `results`.
    pub fn from_results(results: &[SearchResult]) -> Self {
        if results.is_empty() {
            return Confidence::Low;
        }
        let mean = results.iter().map(|r| r.score as f64).sum::<f64>() / results.len() as f64;
        if mean > 0.7 {
            Confidence::High
        } else if mean > 0.5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

const SYSTEM_PROMPT: &str = "You are a careful question-answering assistant. \
Answer using only the reference material provided.\n\
Rules:\n\
1. Base every statement on the reference material\n\
2. If the material does not contain the answer, say so explicitly\n\
3. Be accurate and well organized\n\
4. Cite sources where appropriate";

/// Join retrieved chunks into a reference block, one source per section.
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("[Source: {}]\n{}", r.chunk.title, r.chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Answer `question` grounded in `results`, in the requested language.
///
/// Returns the generated answer together with the retrieval confidence.
/// Provider failures propagate unchanged.
pub async fn answer(
    llm: &dyn LLMClient,
    question: &str,
    results: &[SearchResult],
    language: &str,
) -> Result<(String, Confidence)> {
    let context = build_context(results);
    let prompt = format!(
        "Answer the question using the reference material below.\n\n\
         ## Reference material\n{}\n\n\
         ## Question\n{}\n\n\
         Answer in {}.",
        context, question, language
    );

    let answer = llm.generate_with_system(SYSTEM_PROMPT, &prompt).await?;
    let confidence = Confidence::from_results(results);

    Ok((answer.trim().to_string(), confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_vector::Chunk;

    fn result(title: &str, content: &str, score: f32) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "d_0".to_string(),
                document_id: "d".to_string(),
                title: title.to_string(),
                content: content.to_string(),
                sequence_index: 0,
            },
            score,
        }
    }

    #[test]
    fn test_confidence_buckets() {
        let high = [result("t", "c", 0.9), result("t", "c", 0.8)];
        assert_eq!(Confidence::from_results(&high), Confidence::High);

        let medium = [result("t", "c", 0.6), result("t", "c", 0.65)];
        assert_eq!(Confidence::from_results(&medium), Confidence::Medium);

        let low = [result("t", "c", 0.2)];
        assert_eq!(Confidence::from_results(&low), Confidence::Low);
    }

    #[test]
    fn test_confidence_boundaries_are_exclusive() {
        assert_eq!(
            Confidence::from_results(&[result("t", "c", 0.7)]),
            Confidence::Medium
        );
        assert_eq!(
            Confidence::from_results(&[result("t", "c", 0.5)]),
            Confidence::Low
        );
    }

    #[test]
    fn test_confidence_negative_and_empty_are_low() {
        assert_eq!(
            Confidence::from_results(&[result("t", "c", -0.4)]),
            Confidence::Low
        );
        assert_eq!(Confidence::from_results(&[]), Confidence::Low);
    }

    #[test]
    fn test_build_context_format() {
        let results = [
            result("Manual", "Press the red button.", 0.9),
            result("FAQ", "Do not press the red button.", 0.8),
        ];
        let context = build_context(&results);
        assert_eq!(
            context,
            "[Source: Manual]\nPress the red button.\n\n---\n\n[Source: FAQ]\nDo not press the red button."
        );
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Confidence::High).unwrap(),
            "\"high\""
        );
        assert_eq!(Confidence::Medium.as_str(), "medium");
    }
}
