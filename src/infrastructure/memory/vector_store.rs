use crate::domain::entities::user_record::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{Snapshot, VectorStore};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Copy-on-write vector index held in process memory.
///
/// Each write derives a new `Snapshot` under the write lock and publishes it
/// by swapping the `Arc`. Readers clone the `Arc` and drop the lock at once.
/// A panic while holding the lock cannot leave a half-built snapshot behind,
/// so poisoned locks are recovered on both paths.
pub struct InMemoryVectorStore {
    current: RwLock<Arc<Snapshot>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::with_dimension(None)
    }

    /// Store whose vectors must all have `dimension` components.
    /// `None` or `Some(0)` lets the first record fix the dimension.
    pub fn with_dimension(dimension: Option<usize>) -> Self {
        let dimension = dimension.filter(|d| *d > 0);
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty(dimension))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<Snapshot>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Snapshot>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish<F>(&self, change: F) -> Result<(), DomainError>
    where
        F: FnOnce(&Snapshot) -> Result<Snapshot, DomainError>,
    {
        let mut guard = self.write();
        let next = change(&**guard)?;
        *guard = Arc::new(next);
        Ok(())
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore for InMemoryVectorStore {
    fn put(&self, record: UserRecord) -> Result<(), DomainError> {
        self.publish(|snapshot| snapshot.with_record(record))
    }

    fn replace_all(&self, records: Vec<UserRecord>) -> Result<(), DomainError> {
        self.publish(|snapshot| snapshot.rebuilt(records))
    }

    fn get(&self, id: &str) -> Result<UserRecord, DomainError> {
        self.all()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("user {id}")))
    }

    fn all(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.read())
    }

    fn clear(&self) {
        let mut guard = self.write();
        let dimension = guard.dimension();
        *guard = Arc::new(Snapshot::empty(dimension));
    }

    fn size(&self) -> usize {
        self.all().len()
    }

    fn dimension(&self) -> Option<usize> {
        self.all().dimension()
    }
}
