use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invtrack_core::{DomainError, DomainResult};

use crate::credentials::{Credentials, authenticate};

/// Persisted login state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticate and open a session; on failure nothing is returned.
    pub fn login(credentials: &Credentials, now: DateTime<Utc>) -> DomainResult<Self> {
        authenticate(credentials)?;
        Ok(Self {
            is_authenticated: true,
            username: Some(credentials.username.clone()),
            logged_in_at: Some(now),
        })
    }

    pub fn logout(&mut self) {
        *self = Self::anonymous();
    }

    pub fn require_authenticated(&self) -> DomainResult<()> {
        if self.is_authenticated {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn login_then_logout() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        let mut session = Session::login(&Credentials::new("admin", "1234"), now).unwrap();
        assert_eq!(session.require_authenticated(), Ok(()));
        assert_eq!(session.username.as_deref(), Some("admin"));

        session.logout();
        assert_eq!(session, Session::anonymous());
        assert_eq!(session.require_authenticated(), Err(DomainError::Unauthorized));
    }

    #[test]
    fn failed_login_yields_no_session() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        assert!(Session::login(&Credentials::new("admin", "nope"), now).is_err());
    }

    #[test]
    fn older_flag_only_sessions_still_load() {
        let session: Session = serde_json::from_str(r#"{"isAuthenticated":true}"#).unwrap();
        assert_eq!(session.require_authenticated(), Ok(()));
        assert_eq!(session.username, None);
    }
}
