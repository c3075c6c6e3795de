use crate::domain::entities::similarity_result::SimilarityResult;
use crate::domain::ports::vector_store::{Snapshot, VectorStore};
use crate::domain::values::embedding::Embedding;
use crate::domain::values::similarity::cosine_similarity;
use std::cmp::Ordering;

/// Brute-force cosine ranking over every stored user.
///
/// O(n) similarity computations plus an O(n log n) sort per call. Meant for
/// populations in the tens to low hundreds; there is no index behind it.
pub struct SimilarityRanker;

impl SimilarityRanker {
    /// Top `k` users by descending similarity to `query`, skipping `exclude`.
    ///
    /// Equal scores keep the store's enumeration order. `k == 0` yields an
    /// empty list.
    pub fn rank(
        query: &Embedding,
        store: &dyn VectorStore,
        k: usize,
        exclude: Option<&str>,
    ) -> Vec<SimilarityResult> {
        Self::rank_snapshot(query, &store.all(), k, exclude)
    }

    pub fn rank_snapshot(
        query: &Embedding,
        snapshot: &Snapshot,
        k: usize,
        exclude: Option<&str>,
    ) -> Vec<SimilarityResult> {
        if k == 0 || snapshot.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = Vec::with_capacity(snapshot.len());
        for (i, record) in snapshot.iter().enumerate() {
            if exclude == Some(record.id.as_str()) {
                continue;
            }
            if record.embedding.dimension() != query.dimension() {
                tracing::warn!(
                    user = %record.id,
                    expected = query.dimension(),
                    actual = record.embedding.dimension(),
                    "skipping candidate with mismatched dimension"
                );
                continue;
            }
            let score = cosine_similarity(query.as_slice(), record.embedding.as_slice());
            scored.push((i, score));
        }

        // sort_by is stable, so ties stay in enumeration order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        let records = snapshot.records();
        let results: Vec<SimilarityResult> = scored
            .into_iter()
            .map(|(i, score)| SimilarityResult::from_record(&records[i], score))
            .collect();
        tracing::debug!(candidates = snapshot.len(), returned = results.len(), "ranked");
        results
    }
}
