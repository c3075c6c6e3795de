mod common;

use affinity::application::embed::{Embedder, EMBED_BATCH_SIZE};
use affinity::domain::error::DomainError;
use affinity::domain::values::interest_set::InterestSet;
use affinity::infrastructure::embeddings::hashing::HashingProvider;
use approx::assert_relative_eq;
use common::{CountingProvider, FailingProvider, FixedProvider};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn hashing_embedder() -> Embedder {
    Embedder::new(Arc::new(HashingProvider::default()))
}

#[tokio::test]
async fn test_average_is_permutation_invariant() {
    let embedder = hashing_embedder();
    let a = InterestSet::parse("web development, reading novels, singing").unwrap();
    let b = InterestSet::parse("singing, web development, reading novels").unwrap();
    let va = embedder.embed(&a).await.unwrap();
    let vb = embedder.embed(&b).await.unwrap();
    assert_eq!(va, vb);
}

#[tokio::test]
async fn test_average_weights_interests_equally() {
    // A one-token and a four-token interest still count once each.
    let embedder = hashing_embedder();
    let set = InterestSet::new(["cooking", "hiking climbing chess painting"]).unwrap();
    let mean = embedder.embed(&set).await.unwrap();

    let cooking = embedder.embed(&InterestSet::parse("cooking").unwrap()).await.unwrap();
    let other = embedder
        .embed(&InterestSet::parse("hiking climbing chess painting").unwrap())
        .await
        .unwrap();
    for i in 0..mean.dimension() {
        let expected = (cooking.as_slice()[i] + other.as_slice()[i]) / 2.0;
        assert_relative_eq!(mean.as_slice()[i], expected, epsilon = 1e-7);
    }
}

#[tokio::test]
async fn test_dimension_matches_provider() {
    let embedder = Embedder::new(Arc::new(HashingProvider::new(64).unwrap()));
    let v = embedder.embed(&InterestSet::parse("anime").unwrap()).await.unwrap();
    assert_eq!(v.dimension(), 64);
    assert_eq!(embedder.dimension(), 64);
}

#[tokio::test]
async fn test_model_error_surfaces_as_model_failure() {
    let embedder = Embedder::new(Arc::new(FailingProvider));
    let err = embedder
        .embed(&InterestSet::parse("chess").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ModelFailure(_)));
}

#[tokio::test]
async fn test_missing_vectors_rejected() {
    let embedder = Embedder::new(Arc::new(FixedProvider {
        vector: vec![1.0, 0.0],
        dimension: 2,
        drop_last: true,
    }));
    let err = embedder
        .embed(&InterestSet::parse("a, b").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ModelFailure(_)));
}

#[tokio::test]
async fn test_wrong_dimension_rejected() {
    let embedder = Embedder::new(Arc::new(FixedProvider {
        vector: vec![1.0, 0.0, 0.0],
        dimension: 2,
        drop_last: false,
    }));
    let err = embedder
        .embed(&InterestSet::parse("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ModelFailure(_)));
}

#[tokio::test]
async fn test_non_finite_rejected() {
    let embedder = Embedder::new(Arc::new(FixedProvider {
        vector: vec![f32::NAN, 1.0],
        dimension: 2,
        drop_last: false,
    }));
    let err = embedder
        .embed(&InterestSet::parse("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ModelFailure(_)));
}

#[test]
fn test_empty_interest_text_never_reaches_embedder() {
    assert!(matches!(InterestSet::parse(" , "), Err(DomainError::EmptyInput)));
}

#[tokio::test]
async fn test_embed_many_matches_single_calls() {
    let embedder = hashing_embedder();
    let sets = vec![
        InterestSet::parse("cooking, watching movies, anime").unwrap(),
        InterestSet::parse("Design, football").unwrap(),
        InterestSet::parse("music").unwrap(),
    ];
    let batched = embedder.embed_many(&sets).await.unwrap();
    assert_eq!(batched.len(), 3);
    for (set, vector) in sets.iter().zip(&batched) {
        assert_eq!(&embedder.embed(set).await.unwrap(), vector);
    }
}

#[tokio::test]
async fn test_embed_many_batches_requests() {
    let provider = Arc::new(CountingProvider::new());
    let embedder = Embedder::new(provider.clone());

    // 20 users x 2 interests = 40 strings
    let sets: Vec<InterestSet> = (0..20)
        .map(|i| InterestSet::new([format!("topic {i}"), format!("hobby {i}")]).unwrap())
        .collect();
    let out = embedder.embed_many(&sets).await.unwrap();

    assert_eq!(out.len(), 20);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        *provider.batch_sizes.lock().unwrap(),
        vec![EMBED_BATCH_SIZE, 40 - EMBED_BATCH_SIZE]
    );
}

#[tokio::test]
async fn test_embed_many_empty_makes_no_call() {
    let provider = Arc::new(CountingProvider::new());
    let embedder = Embedder::new(provider.clone());
    assert!(embedder.embed_many(&[]).await.unwrap().is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}
