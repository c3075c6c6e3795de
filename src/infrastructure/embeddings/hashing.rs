use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;

pub const DEFAULT_HASHING_DIM: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Offline encoder using signed feature hashing of lowercase word tokens.
///
/// Each token lands in one bucket (FNV-1a, stable across builds) with a
/// sign taken from the top hash bit; the result is L2-normalized. Phrases
/// that share words score high, unrelated phrases score near zero. It has
/// no notion of synonyms.
pub struct HashingProvider {
    dim: usize,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Result<Self, DomainError> {
        if dim == 0 {
            return Err(DomainError::InvalidInput(
                "hashing dimension must be positive".into(),
            ));
        }
        Ok(Self { dim })
    }

    fn fnv1a(token: &str) -> u64 {
        token.bytes().fold(FNV_OFFSET, |h, b| {
            (h ^ b as u64).wrapping_mul(FNV_PRIME)
        })
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; self.dim];
        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let h = Self::fnv1a(token);
            let idx = (h % self.dim as u64) as usize;
            let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
            v[idx] += sign;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self {
            dim: DEFAULT_HASHING_DIM,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.encode(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        "fnv-token-hashing"
    }
}
