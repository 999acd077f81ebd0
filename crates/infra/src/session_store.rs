//! Persisted login flag.

use invtrack_auth::Session;

use crate::snapshot_store::{PersistenceError, SnapshotStore};

pub struct SessionRepository<S> {
    backend: S,
}

impl<S: SnapshotStore> SessionRepository<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Stored session; missing or unreadable data means logged out.
    pub fn load(&self) -> Result<Session, PersistenceError> {
        let Some(bytes) = self.backend.read()? else {
            return Ok(Session::anonymous());
        };
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable session");
            Session::anonymous()
        }))
    }

    pub fn save(&self, session: &Session) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(session)?;
        self.backend.write(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use invtrack_auth::Credentials;

    use crate::snapshot_store::InMemorySnapshotStore;

    #[test]
    fn defaults_to_logged_out() {
        let repo = SessionRepository::new(InMemorySnapshotStore::new());
        assert!(!repo.load().unwrap().is_authenticated);

        let corrupt = SessionRepository::new(InMemorySnapshotStore::with_contents("true"));
        assert_eq!(corrupt.load().unwrap(), Session::anonymous());
    }

    #[test]
    fn saved_session_loads_back() {
        let repo = SessionRepository::new(InMemorySnapshotStore::new());
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
        let session = Session::login(&Credentials::new("admin", "1234"), now).unwrap();

        repo.save(&session).unwrap();
        assert_eq!(repo.load().unwrap(), session);
    }
}
