use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::{NewUser, RawUser, UserRepository};
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteUserRepo {
    conn: Mutex<Connection>,
}

impl SqliteUserRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_user(row: &rusqlite::Row) -> Result<RawUser, rusqlite::Error> {
        let id: Option<String> = row.get(0)?;
        let interests_str: Option<String> = row.get(2)?;

        let interests = interests_str.and_then(|s| match serde_json::from_str::<Vec<String>>(&s) {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!(user = id.as_deref().unwrap_or("<no id>"), error = %e, "interests column is not a JSON string array");
                None
            }
        });

        Ok(RawUser {
            id,
            name: row.get(1)?,
            interests,
            user_id: row.get(3)?,
        })
    }
}

impl UserRepository for SqliteUserRepo {
    fn fetch_all(&self) -> Result<Vec<RawUser>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::DataSource(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, name, interests, user_id FROM users ORDER BY created_at, rowid")
            .map_err(|e| DomainError::DataSource(e.to_string()))?;
        let users = stmt
            .query_map([], Self::row_to_user)
            .map_err(|e| DomainError::DataSource(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::DataSource(format!("Failed to read users: {e}")))?;
        Ok(users)
    }

    fn add(&self, user: &NewUser) -> Result<String, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let id = uuid::Uuid::new_v4().to_string();
        let interests = serde_json::to_string(&user.interests)
            .map_err(|e| DomainError::InvalidInput(e.to_string()))?;
        conn.execute(
            "INSERT INTO users (id, name, interests, user_id, created_at) VALUES (?1, ?2, ?3, ?1, ?4)",
            params![id, user.name, interests, chrono::Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add user: {e}")))?;
        Ok(id)
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
