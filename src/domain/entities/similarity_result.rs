use crate::domain::entities::user_record::UserRecord;
use crate::domain::values::interest_set::InterestSet;
use serde::Serialize;

/// One ranked match. Recomputed per query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub interests: InterestSet,
    /// Cosine similarity in [-1, 1].
    pub score: f64,
}

impl SimilarityResult {
    pub fn from_record(record: &UserRecord, score: f64) -> Self {
        Self {
            id: record.id.clone(),
            user_id: record.user_id.clone(),
            name: record.name.clone(),
            interests: record.interests.clone(),
            score,
        }
    }
}
