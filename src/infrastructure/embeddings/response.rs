use crate::domain::error::DomainError;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

/// `{"data": [{"index": i, "embedding": [...]}, ...]}`, shared by the
/// OpenAI and Voyage embedding endpoints.
#[derive(Deserialize)]
pub(crate) struct EmbeddingsBody {
    data: Vec<IndexedVector>,
}

#[derive(Deserialize)]
struct IndexedVector {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingsBody {
    /// Vectors in input order. Entries without an index keep their position.
    pub(crate) fn into_vectors(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|d| d.index);
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}

/// POST `body` to an embeddings endpoint and decode the reply.
pub(crate) async fn post_embeddings<B: Serialize>(
    client: &Client,
    vendor: &str,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<Vec<Vec<f32>>, DomainError> {
    let resp = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await
        .map_err(|e| DomainError::ModelFailure(format!("{vendor} request failed: {e}")))?;
    decode(vendor, resp).await
}

async fn decode(vendor: &str, resp: Response) -> Result<Vec<Vec<f32>>, DomainError> {
    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(DomainError::ModelFailure(format!("{vendor} returned {status}: {detail}")));
    }
    let body: EmbeddingsBody = resp
        .json()
        .await
        .map_err(|e| DomainError::ModelFailure(format!("{vendor} reply unreadable: {e}")))?;
    Ok(body.into_vectors())
}
