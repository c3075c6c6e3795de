use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::{NewUser, UserRepository};
use crate::domain::values::interest_set::InterestSet;
use std::sync::Arc;

/// Writes a user into the external store. The index picks it up on the next sync.
pub struct AddUserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl AddUserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self, name: &str, interests: Vec<String>) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name must not be empty".into()));
        }
        let interests = InterestSet::new(interests)?;
        self.repo.add(&NewUser {
            name: name.to_string(),
            interests: interests.into(),
        })
    }
}
