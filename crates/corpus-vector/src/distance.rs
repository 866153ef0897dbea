//! Distance metrics for vector similarity.
//!
//! Provides the scoring functions used to compare embeddings. The metric is
//! chosen once when the index is constructed, so callers never pick a
//! strategy per search.

use std::fmt;

/// Distance metric for vector similarity calculations.
///
/// - **Cosine**: Best for normalized embeddings (most LLM embeddings).
/// - **DotProduct**: Best for vectors that are already normalized.
/// - **Euclidean**: Best for raw feature vectors where magnitude matters.
/// - **Manhattan**: Robust to outliers, good for sparse vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine similarity: `dot(a, b) / (|a| * |b|)`.
    ///
    /// Range: [-1, 1], where 1 means identical direction. Defined as `0.0`
    /// when either vector has zero norm.
    #[default]
    Cosine,

    /// Dot product (inner product).
    ///
    /// Range: (-inf, inf), where higher is more similar.
    DotProduct,

    /// Euclidean (L2) distance, reported as the similarity `1 / (1 + d)`.
    Euclidean,

    /// Manhattan (L1) distance, reported as the similarity `1 / (1 + d)`.
    Manhattan,
}

impl DistanceMetric {
    /// Compute the similarity score between two vectors.
    ///
    /// Returns a score where **higher is more similar** for all metrics.
    /// Vectors of different lengths score `0.0` rather than panicking; the
    /// index validates widths on insert, so this only arises for queries.
    #[inline]
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        match self {
            DistanceMetric::Cosine => cosine_similarity(a, b),
            DistanceMetric::DotProduct => dot_product(a, b),
            DistanceMetric::Euclidean => 1.0 / (1.0 + euclidean_distance(a, b)),
            DistanceMetric::Manhattan => 1.0 / (1.0 + manhattan_distance(a, b)),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::DotProduct => "dot_product",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" | "cos" => Ok(DistanceMetric::Cosine),
            "dot" | "dot_product" | "dotproduct" | "inner" => Ok(DistanceMetric::DotProduct),
            "euclidean" | "l2" | "euclid" => Ok(DistanceMetric::Euclidean),
            "manhattan" | "l1" | "taxicab" => Ok(DistanceMetric::Manhattan),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}

/// Compute cosine similarity between two equal-length vectors.
///
/// Returns a value in [-1, 1], or `0.0` when either norm is zero.
#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[inline]
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[inline]
fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
