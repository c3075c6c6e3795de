use crate::domain::entities::user_record::UserRecord;
use crate::domain::error::DomainError;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable view of the index at one point in time.
///
/// Records keep insertion order; replacing a record keeps its slot. Once a
/// dimension is fixed every record must match it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<UserRecord>,
    positions: HashMap<String, usize>,
    dimension: Option<usize>,
}

impl Snapshot {
    pub fn empty(dimension: Option<usize>) -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
            dimension,
        }
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.positions.get(id).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Copy of this snapshot with `record` inserted or replaced.
    pub fn with_record(&self, record: UserRecord) -> Result<Snapshot, DomainError> {
        let mut next = self.clone();
        next.insert(record)?;
        Ok(next)
    }

    /// Empty snapshot with the same dimension, filled from `records`.
    /// A later record with a repeated id replaces the earlier one.
    pub fn rebuilt(&self, records: Vec<UserRecord>) -> Result<Snapshot, DomainError> {
        let mut next = Snapshot::empty(self.dimension);
        for record in records {
            next.insert(record)?;
        }
        Ok(next)
    }

    fn insert(&mut self, record: UserRecord) -> Result<(), DomainError> {
        let actual = record.embedding.dimension();
        match self.dimension {
            Some(expected) if expected != actual => {
                return Err(DomainError::DimensionMismatch { expected, actual });
            }
            None => self.dimension = Some(actual),
            _ => {}
        }
        match self.positions.get(&record.id) {
            Some(&i) => self.records[i] = record,
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
        Ok(())
    }
}

/// Shared in-process index of user vectors.
///
/// Writers publish whole snapshots; readers holding an `Arc<Snapshot>` never
/// see a partially applied change.
pub trait VectorStore: Send + Sync {
    fn put(&self, record: UserRecord) -> Result<(), DomainError>;
    /// Swap in a complete new population in one step.
    fn replace_all(&self, records: Vec<UserRecord>) -> Result<(), DomainError>;
    fn get(&self, id: &str) -> Result<UserRecord, DomainError>;
    fn all(&self) -> Arc<Snapshot>;
    fn clear(&self);
    fn size(&self) -> usize;
    fn dimension(&self) -> Option<usize>;
}
