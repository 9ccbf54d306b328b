//! Identity provider boundary
//!
//! Authentication is an external collaborator to the backend, behind a
//! trait so deployments can plug in a real provider. The bundled
//! [`LocalDirectory`] authenticates against the users collection, which is
//! what the demo data ships with.

use eventide_core::error::{Error, Result};
use eventide_core::records::User;
use eventide_core::types::Collection;
use eventide_store::Store;
use tracing::debug;

/// External identity provider
///
/// `authenticate` errors distinguish bad credentials
/// ([`Error::InvalidCredentials`]) from an unreachable provider
/// ([`Error::ProviderUnreachable`]); the backend's demo-identity fallback
/// triggers only on the latter.
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the account
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    /// Create a new account
    fn register(&self, user: User) -> Result<User>;

    /// Start account recovery for `email`
    ///
    /// Always acknowledges, whether or not the email is known, so the call
    /// cannot be used to probe for accounts.
    fn recover(&self, email: &str) -> Result<()>;
}

/// Identity provider backed by the users collection
pub struct LocalDirectory {
    store: Store,
}

impl LocalDirectory {
    /// Create a directory over `store`
    pub fn new(store: Store) -> Self {
        LocalDirectory { store }
    }

    fn users(&self) -> Result<Vec<User>> {
        self.store.get(Collection::Users, Vec::new())
    }
}

impl IdentityProvider for LocalDirectory {
    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let users = self.users()?;
        let user = users
            .into_iter()
            .find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .ok_or(Error::InvalidCredentials)?;
        match user.password.as_deref() {
            Some(stored) if stored == password => Ok(user),
            _ => Err(Error::InvalidCredentials),
        }
    }

    fn register(&self, user: User) -> Result<User> {
        let mut users = self.users()?;
        let email = user.email.as_deref().ok_or(Error::MissingField("email"))?;
        if users.iter().any(|u| {
            u.email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email))
        }) {
            return Err(Error::InvalidOperation(format!(
                "email already registered: {email}"
            )));
        }
        users.push(user.clone());
        self.store.set(Collection::Users, &users)?;
        Ok(user)
    }

    fn recover(&self, email: &str) -> Result<()> {
        let known = self.users()?.iter().any(|u| {
            u.email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email))
        });
        debug!(known, "recovery requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventide_core::types::UserRole;

    fn user(email: &str, password: &str) -> User {
        User {
            id: format!("user-{email}"),
            name: "Test".into(),
            role: UserRole::Client,
            avatar: String::new(),
            email: Some(email.into()),
            password: Some(password.into()),
            interests: vec![],
            created_at: None,
            provider_profile: None,
        }
    }

    fn directory_with(users: &[User]) -> LocalDirectory {
        let store = Store::builder().in_memory().open().unwrap();
        store.set(Collection::Users, &users).unwrap();
        LocalDirectory::new(store)
    }

    #[test]
    fn authenticate_matches_email_case_insensitively() {
        let dir = directory_with(&[user("ada@example.com", "pw")]);
        let found = dir.authenticate("ADA@example.com", "pw").unwrap();
        assert_eq!(found.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let dir = directory_with(&[user("ada@example.com", "pw")]);
        let err = dir.authenticate("ada@example.com", "nope").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn unknown_email_is_invalid_credentials() {
        let dir = directory_with(&[]);
        let err = dir.authenticate("ghost@example.com", "pw").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let dir = directory_with(&[user("ada@example.com", "pw")]);
        let err = dir.register(user("Ada@Example.com", "other")).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }

    #[test]
    fn register_then_authenticate() {
        let dir = directory_with(&[]);
        dir.register(user("new@example.com", "pw")).unwrap();
        assert!(dir.authenticate("new@example.com", "pw").is_ok());
    }

    #[test]
    fn recover_acknowledges_unknown_email() {
        let dir = directory_with(&[]);
        assert!(dir.recover("ghost@example.com").is_ok());
    }
}
