use serde::{Deserialize, Serialize};

use invtrack_core::{DomainError, DomainResult};

const OPERATOR_USERNAME: &str = "admin";
const OPERATOR_PASSWORD: &str = "1234";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Check `credentials` against the built-in operator account.
pub fn authenticate(credentials: &Credentials) -> DomainResult<()> {
    if credentials.username == OPERATOR_USERNAME && credentials.password == OPERATOR_PASSWORD {
        tracing::info!(username = %credentials.username, "login accepted");
        Ok(())
    } else {
        tracing::warn!(username = %credentials.username, "login rejected");
        Err(DomainError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_operator_account() {
        assert_eq!(authenticate(&Credentials::new("admin", "1234")), Ok(()));
    }

    #[test]
    fn rejects_anything_else() {
        for (user, pass) in [("admin", "12345"), ("Admin", "1234"), ("", ""), ("root", "1234")] {
            assert_eq!(
                authenticate(&Credentials::new(user, pass)),
                Err(DomainError::Unauthorized)
            );
        }
    }
}
