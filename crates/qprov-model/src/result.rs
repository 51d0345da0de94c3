//! Measurement results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::hash;

/// Raw measurement counts for one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Outcome bitstring → number of occurrences.
    pub raw: BTreeMap<String, u64>,
    /// Total shots the counts were drawn from.
    pub shots: u64,
}

impl Counts {
    /// Build counts from (outcome, count) pairs; shots is their sum.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, u64)>) -> Self {
        let raw: BTreeMap<String, u64> = pairs.into_iter().collect();
        let shots = raw.values().sum();
        Self { raw, shots }
    }

    /// Derived probability distribution.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        if self.shots == 0 {
            return BTreeMap::new();
        }
        self.raw
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / self.shots as f64))
            .collect()
    }

    /// The `n` most probable outcomes, descending, ties broken by bitstring.
    pub fn top_results(&self, n: usize) -> Vec<(String, f64)> {
        let mut probs: Vec<(String, f64)> = self.probabilities().into_iter().collect();
        probs.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        probs.truncate(n);
        probs
    }
}

/// Execution results with a verification hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Raw measurement counts.
    pub counts: Counts,
    /// Shot-by-shot outcomes, if the backend provided them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<String>>,
    /// Free-form result metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    /// Content hash of the raw counts, for tamper detection.
    pub hash: String,
    /// Mitigated counts, if error mitigation was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigated_counts: Option<Counts>,
}

impl ExperimentResult {
    /// Build a result from counts, computing the verification hash.
    pub fn from_counts(counts: Counts) -> Self {
        let hash = Self::counts_hash(&counts);
        Self {
            counts,
            memory: None,
            metadata: BTreeMap::new(),
            hash,
            mitigated_counts: None,
        }
    }

    /// Content hash over the raw counts map.
    pub fn counts_hash(counts: &Counts) -> String {
        hash::digest(&json!({ "counts": counts.raw, "shots": counts.shots }))
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
