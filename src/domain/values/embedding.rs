use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Dense `f32` vector. Stored and query vectors share this one precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Embedding(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Unweighted elementwise mean of equally sized vectors.
    ///
    /// Sums are accumulated in `f64` before narrowing, which makes the
    /// result independent of input order for realistic list lengths.
    pub fn mean<'a, I>(vectors: I) -> Result<Embedding, DomainError>
    where
        I: IntoIterator<Item = &'a [f32]>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next().ok_or(DomainError::EmptyInput)?;
        let mut sums: Vec<f64> = first.iter().map(|x| *x as f64).collect();
        let mut count = 1usize;

        for v in iter {
            if v.len() != sums.len() {
                return Err(DomainError::DimensionMismatch {
                    expected: sums.len(),
                    actual: v.len(),
                });
            }
            for (acc, x) in sums.iter_mut().zip(v) {
                *acc += *x as f64;
            }
            count += 1;
        }

        let n = count as f64;
        Ok(Embedding(sums.into_iter().map(|s| (s / n) as f32).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_two() {
        let a = [1.0_f32, 0.0, 2.0];
        let b = [3.0_f32, 2.0, 0.0];
        let m = Embedding::mean([&a[..], &b[..]]).unwrap();
        assert_eq!(m.as_slice(), &[2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_mean_single_is_identity() {
        let a = [0.25_f32, -0.5, 0.75];
        let m = Embedding::mean([&a[..]]).unwrap();
        assert_eq!(m.as_slice(), &a);
    }

    #[test]
    fn test_mean_is_order_independent() {
        let a = [0.1_f32, 0.7, -0.3];
        let b = [0.9_f32, -0.2, 0.4];
        let c = [-0.6_f32, 0.05, 0.33];
        let m1 = Embedding::mean([&a[..], &b[..], &c[..]]).unwrap();
        let m2 = Embedding::mean([&c[..], &a[..], &b[..]]).unwrap();
        assert_eq!(m1, m2);
    }

    #[test]
    fn test_mean_empty_is_error() {
        let none: Vec<&[f32]> = vec![];
        assert!(matches!(Embedding::mean(none), Err(DomainError::EmptyInput)));
    }

    #[test]
    fn test_mean_rejects_ragged_input() {
        let a = [1.0_f32, 2.0];
        let b = [1.0_f32, 2.0, 3.0];
        let err = Embedding::mean([&a[..], &b[..]]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }
}
