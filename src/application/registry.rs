use crate::application::user_index::UserIndex;
use crate::domain::entities::user_record::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::{RawUser, UserRepository};
use crate::domain::values::embedding::Embedding;
use crate::domain::values::interest_set::InterestSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedUser {
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub fetched: usize,
    pub indexed: usize,
    pub skipped: Vec<SkippedUser>,
    pub synced_at: DateTime<Utc>,
}

/// Keeps the vector index in step with the external user store.
///
/// The index only reflects the store between one completed `sync` and the
/// next. Walk-up users registered in between are dropped by the next sync.
pub struct UserRegistry {
    repo: Arc<dyn UserRepository>,
    index: UserIndex,
}

impl UserRegistry {
    pub fn new(repo: Arc<dyn UserRepository>, index: UserIndex) -> Self {
        Self { repo, index }
    }

    /// Rebuild the index from the full external population.
    ///
    /// Incomplete records are skipped and reported. If fetching or embedding
    /// fails the current index is left untouched.
    pub async fn sync(&self) -> Result<SyncReport, DomainError> {
        let raw = self.repo.fetch_all().map_err(|e| match e {
            DomainError::DataSource(_) => e,
            other => DomainError::DataSource(other.to_string()),
        })?;
        let fetched = raw.len();

        let mut valid: Vec<ValidUser> = Vec::with_capacity(fetched);
        let mut skipped = Vec::new();
        for user in raw {
            match validate(user) {
                Ok(v) => valid.push(v),
                Err(s) => {
                    tracing::warn!(
                        user = s.id.as_deref().unwrap_or("<no id>"),
                        reason = %s.reason,
                        "skipping incomplete user record"
                    );
                    skipped.push(s);
                }
            }
        }

        let sets: Vec<InterestSet> = valid.iter().map(|u| u.interests.clone()).collect();
        let embeddings = self.index.embedder().embed_many(&sets).await?;
        let records: Vec<UserRecord> = valid
            .into_iter()
            .zip(embeddings)
            .map(|(user, embedding)| {
                UserRecord::new(user.id, user.name, user.interests, embedding)
                    .with_user_id(user.user_id)
            })
            .collect();
        let indexed = records.len();

        self.index.store().replace_all(records)?;
        tracing::info!(fetched, indexed, skipped = skipped.len(), "user index synced");

        Ok(SyncReport {
            fetched,
            indexed,
            skipped,
            synced_at: Utc::now(),
        })
    }

    /// Index a transient user from comma-separated text and return its id.
    /// Nothing is written to the external store.
    pub async fn register_ad_hoc(&self, raw_interests: &str) -> Result<String, DomainError> {
        let interests = InterestSet::parse(raw_interests)?;
        let id = walkup_id();
        let record = self.index.upsert(&id, &display_name(&id), interests).await?;
        tracing::info!(user = %id, interests = %record.interests, "registered walk-up user");
        Ok(id)
    }

    /// Like `register_ad_hoc` for interests that were already embedded.
    pub(crate) fn register_embedded(
        &self,
        interests: InterestSet,
        embedding: Embedding,
    ) -> Result<String, DomainError> {
        let id = walkup_id();
        tracing::info!(user = %id, interests = %interests, "registered walk-up user");
        let record = UserRecord::new(id.clone(), display_name(&id), interests, embedding);
        self.index.store().put(record)?;
        Ok(id)
    }
}

fn walkup_id() -> String {
    format!("walkup-{}", uuid::Uuid::new_v4())
}

fn display_name(id: &str) -> String {
    format!("User {id}")
}

#[derive(Debug)]
struct ValidUser {
    id: String,
    user_id: String,
    name: String,
    interests: InterestSet,
}

fn validate(user: RawUser) -> Result<ValidUser, SkippedUser> {
    let id = match user.id.map(|s| s.trim().to_string()) {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(SkippedUser {
                id: None,
                reason: "missing identifier".into(),
            })
        }
    };
    let name = match user.name.map(|s| s.trim().to_string()) {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(SkippedUser {
                id: Some(id),
                reason: "missing name".into(),
            })
        }
    };
    let Some(interests) = user.interests else {
        return Err(SkippedUser {
            id: Some(id),
            reason: "missing interests".into(),
        });
    };
    // Rows without an account id stand for themselves.
    let user_id = user
        .user_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| id.clone());
    match InterestSet::new(interests) {
        Ok(interests) => Ok(ValidUser {
            id,
            user_id,
            name,
            interests,
        }),
        Err(_) => Err(SkippedUser {
            id: Some(id),
            reason: "no non-empty interests".into(),
        }),
    }
}
