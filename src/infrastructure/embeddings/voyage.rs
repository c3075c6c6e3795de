use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::infrastructure::embeddings::response::post_embeddings;
use reqwest::Client;
use serde::Serialize;

const DEFAULT_MODEL: &str = "voyage-3-lite";
const DEFAULT_BASE_URL: &str = "https://api.voyageai.com";

pub struct VoyageProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    input: &'a [String],
    model: &'a str,
    // Population and query phrases share one input type so they land in the
    // same space.
    input_type: &'static str,
}

impl VoyageProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: format!("{}/v1/embeddings", base.trim_end_matches('/')),
        }
    }

    fn request<'a>(&'a self, texts: &'a [String]) -> EmbedRequest<'a> {
        EmbedRequest {
            input: texts,
            model: &self.model,
            input_type: "document",
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for VoyageProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let request = self.request(texts);
        post_embeddings(&self.client, "Voyage", &self.endpoint, &self.api_key, &request).await
    }

    fn dimension(&self) -> usize {
        match self.model.as_str() {
            "voyage-3-lite" => 512,
            "voyage-3" | "voyage-3-large" => 1024,
            "voyage-large-2" => 1536,
            _ => 0,
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
