use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skytrip_shared::Masked;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use uuid::Uuid;

/// Handle of an active authentication session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Form field a failure should be reported against.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthField {
    Identifier,
    Secret,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: AuthField,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("identifier rejected")]
    IdentifierRejected,

    #[error("secret rejected")]
    SecretRejected,

    #[error("authentication provider failure: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Message to show next to the offending field. Unknown failures have
    /// none; callers log them instead.
    pub fn field_error(&self) -> Option<FieldError> {
        match self {
            AuthError::IdentifierRejected => Some(FieldError {
                field: AuthField::Identifier,
                message: "Incorrect email address",
            }),
            AuthError::SecretRejected => Some(FieldError {
                field: AuthField::Secret,
                message: "Incorrect password, Please enter correct password",
            }),
            AuthError::Unknown(_) => None,
        }
    }
}

/// The hosted identity service the app signs users in with.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, identifier: &str, secret: &Masked<String>) -> Result<SessionId, AuthError>;

    async fn sign_up(&self, identifier: &str, secret: &Masked<String>) -> Result<SessionId, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn is_session_active(&self) -> bool;
}

pub const MIN_SECRET_LEN: usize = 8;

/// Account store kept in process memory, for local runs and tests.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    inner: Mutex<Accounts>,
}

#[derive(Default)]
struct Accounts {
    secrets: HashMap<String, Masked<String>>,
    active: Option<SessionId>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_accounts<T>(&self, f: impl FnOnce(&mut Accounts) -> Result<T, AuthError>) -> Result<T, AuthError> {
        let mut accounts = self
            .inner
            .lock()
            .map_err(|_| AuthError::Unknown("account store lock poisoned".to_string()))?;
        f(&mut accounts)
    }
}

fn looks_like_email(identifier: &str) -> bool {
    match identifier.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

fn new_session() -> SessionId {
    SessionId(format!("sess_{}", Uuid::new_v4().simple()))
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, identifier: &str, secret: &Masked<String>) -> Result<SessionId, AuthError> {
        let session = self.with_accounts(|accounts| {
            let stored = accounts
                .secrets
                .get(identifier)
                .ok_or(AuthError::IdentifierRejected)?;
            if stored.expose() != secret.expose() {
                return Err(AuthError::SecretRejected);
            }
            let session = new_session();
            accounts.active = Some(session.clone());
            Ok(session)
        })?;

        tracing::info!("Signed in {} with session {}", identifier, session);
        Ok(session)
    }

    async fn sign_up(&self, identifier: &str, secret: &Masked<String>) -> Result<SessionId, AuthError> {
        if !looks_like_email(identifier) {
            return Err(AuthError::IdentifierRejected);
        }
        if secret.expose().chars().count() < MIN_SECRET_LEN {
            return Err(AuthError::SecretRejected);
        }

        let session = self.with_accounts(|accounts| {
            if accounts.secrets.contains_key(identifier) {
                return Err(AuthError::IdentifierRejected);
            }
            accounts.secrets.insert(identifier.to_string(), secret.clone());
            let session = new_session();
            accounts.active = Some(session.clone());
            Ok(session)
        })?;

        tracing::info!("Created account {} with session {}", identifier, session);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.with_accounts(|accounts| {
            accounts.active = None;
            Ok(())
        })
    }

    async fn is_session_active(&self) -> bool {
        self.inner
            .lock()
            .map(|accounts| accounts.active.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> Masked<String> {
        Masked::new(s.to_string())
    }

    #[tokio::test]
    async fn test_sign_up_sign_in_sign_out() {
        let provider = InMemoryAuthProvider::new();
        assert!(!provider.is_session_active().await);

        provider.sign_up("ada@example.com", &secret("correct-horse")).await.unwrap();
        assert!(provider.is_session_active().await);

        provider.sign_out().await.unwrap();
        assert!(!provider.is_session_active().await);

        provider.sign_in("ada@example.com", &secret("correct-horse")).await.unwrap();
        assert!(provider.is_session_active().await);
    }

    #[tokio::test]
    async fn test_sign_in_failure_kinds() {
        let provider = InMemoryAuthProvider::new();
        provider.sign_up("ada@example.com", &secret("correct-horse")).await.unwrap();
        provider.sign_out().await.unwrap();

        let err = provider.sign_in("bob@example.com", &secret("correct-horse")).await.unwrap_err();
        assert!(matches!(err, AuthError::IdentifierRejected));
        assert_eq!(err.field_error().unwrap().message, "Incorrect email address");

        let err = provider.sign_in("ada@example.com", &secret("wrong-horse")).await.unwrap_err();
        assert!(matches!(err, AuthError::SecretRejected));
        assert_eq!(err.field_error().unwrap().field, AuthField::Secret);
        assert!(!provider.is_session_active().await);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let provider = InMemoryAuthProvider::new();
        assert!(matches!(
            provider.sign_up("not-an-email", &secret("long-enough")).await,
            Err(AuthError::IdentifierRejected)
        ));
        assert!(matches!(
            provider.sign_up("ada@example.com", &secret("short")).await,
            Err(AuthError::SecretRejected)
        ));

        provider.sign_up("ada@example.com", &secret("long-enough")).await.unwrap();
        assert!(matches!(
            provider.sign_up("ada@example.com", &secret("long-enough")).await,
            Err(AuthError::IdentifierRejected)
        ));
    }

    #[test]
    fn test_unknown_failure_has_no_field_message() {
        assert!(AuthError::Unknown("network".to_string()).field_error().is_none());
    }
}
