//! Backend: the facade composing store, relay and identity
//!
//! Backend is a cheap-clone handle; clones share the same store and relay.
//! One backend per context. Two backends whose relays share a bus (and, in
//! directory mode, whose stores share a directory) model two tabs of the
//! same deployment.

use crate::config::BackendConfig;
use crate::identity::{IdentityProvider, LocalDirectory};
use crate::seed;
use eventide_core::error::{Error, Result};
use eventide_core::records::{ProviderProfile, User};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection, UserRole};
use eventide_relay::Relay;
use eventide_store::Store;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New avatar URL
    pub avatar: Option<String>,
    /// New interest tags
    pub interests: Option<Vec<String>>,
}

/// The Eventide backend facade
#[derive(Clone)]
pub struct Backend {
    pub(crate) store: Store,
    pub(crate) relay: Relay,
    pub(crate) config: BackendConfig,
    identity: Arc<dyn IdentityProvider>,
}

impl Backend {
    /// Create a backend over `store` and `relay` with default config and
    /// the bundled [`LocalDirectory`] identity provider
    pub fn new(store: Store, relay: Relay) -> Self {
        Self::with_config(store, relay, BackendConfig::default())
    }

    /// Create a backend with explicit configuration
    pub fn with_config(store: Store, relay: Relay, config: BackendConfig) -> Self {
        let identity = Arc::new(LocalDirectory::new(store.clone()));
        Self::with_identity(store, relay, config, identity)
    }

    /// Create a backend with a custom identity provider
    pub fn with_identity(
        store: Store,
        relay: Relay,
        config: BackendConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Backend {
            store,
            relay,
            config,
            identity,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The underlying relay
    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Publish `payload` on `channel`, logging serialization failures
    ///
    /// Notifications are advisory; a publish that cannot serialize must not
    /// fail the already-committed write that triggered it.
    pub(crate) fn publish<T: Serialize>(&self, channel: Channel, payload: &T) {
        if let Err(e) = self.relay.publish(channel, payload) {
            warn!(channel = %channel, error = %e, "notification dropped");
        }
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Seed first-run collections; idempotent
    ///
    /// Each collection is seeded only if it has never been written, so
    /// calling this on every startup is safe and an existing deployment's
    /// data is never clobbered.
    pub fn init(&self) -> Result<()> {
        self.seed_if_absent(Collection::Users, &seed::users())?;
        self.seed_if_absent(Collection::Events, &seed::events())?;
        self.seed_if_absent(Collection::Vendors, &seed::vendors())?;
        self.seed_if_absent(Collection::VendorData, &seed::vendor_data())?;
        self.seed_if_absent(Collection::PlannerData, &seed::planner_data())?;
        self.seed_if_absent(Collection::ClientData, &seed::client_data())?;
        self.seed_if_absent(Collection::Bookings, &seed::bookings())?;
        self.seed_if_absent(Collection::Contracts, &seed::contracts())?;
        self.seed_if_absent(Collection::Conversations, &seed::conversations())?;
        self.seed_if_absent(Collection::DirectMessages, &seed::direct_messages())?;
        self.seed_if_absent(Collection::Services, &seed::services())?;
        self.seed_if_absent(Collection::Packages, &seed::packages())?;
        self.seed_if_absent(Collection::Reviews, &seed::reviews())?;
        self.seed_if_absent(Collection::Portfolios, &seed::portfolios())?;
        self.seed_if_absent(Collection::Projects, &seed::projects())?;
        self.heal_provider_profiles()?;
        info!("backend initialized");
        Ok(())
    }

    fn seed_if_absent<T: Serialize>(&self, collection: Collection, value: &T) -> Result<()> {
        if !self.store.contains(collection)? {
            debug!(collection = %collection, "seeding");
            self.store.set(collection, value)?;
        }
        Ok(())
    }

    /// Backfill provider profiles on vendor/planner accounts written by
    /// older deployments that predate the profile field
    fn heal_provider_profiles(&self) -> Result<()> {
        let mut users: Vec<User> = self.store.get(Collection::Users, Vec::new())?;
        let mut healed = false;
        for user in users.iter_mut() {
            if matches!(user.role, UserRole::Vendor | UserRole::Planner)
                && user.provider_profile.is_none()
            {
                user.provider_profile = Some(ProviderProfile::new_unverified(
                    &user.id, &user.name, user.role,
                ));
                healed = true;
            }
        }
        if healed {
            debug!("backfilled provider profiles");
            self.store.set(Collection::Users, &users)?;
        }
        Ok(())
    }

    // ========================================================================
    // Sessions and identity
    // ========================================================================

    /// Sign in and persist the session
    ///
    /// The account's role must match `role`; signing into a client account
    /// from the vendor login is [`Error::RoleMismatch`]. If the identity
    /// provider is unreachable and demo identity is enabled, the fixed demo
    /// account for `role` is signed in instead.
    pub fn login(&self, email: &str, password: &str, role: UserRole) -> Result<User> {
        let user = match self.identity.authenticate(email, password) {
            Ok(user) => user,
            Err(Error::ProviderUnreachable(reason)) if self.config.demo_identity => {
                info!(%reason, "identity provider unreachable, using demo identity");
                seed::demo_user(role)
            }
            Err(e) => return Err(e),
        };
        if user.role != role {
            return Err(Error::RoleMismatch {
                requested: role,
                actual: user.role,
            });
        }
        let session = user.into_session();
        self.store.set(Collection::Session, &session)?;
        info!(user = %session.id, role = %session.role, "logged in");
        Ok(session)
    }

    /// Create an account, sign it in, and persist the session
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User> {
        if name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        let id = crate::ids::next_id("user");
        let provider_profile = matches!(role, UserRole::Vendor | UserRole::Planner)
            .then(|| ProviderProfile::new_unverified(&id, name, role));
        let user = self.identity.register(User {
            id: id.clone(),
            name: name.to_string(),
            role,
            avatar: format!("https://i.pravatar.cc/150?u={id}"),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            interests: vec![],
            created_at: Some(now_rfc3339()),
            provider_profile,
        })?;
        let session = user.into_session();
        self.store.set(Collection::Session, &session)?;
        info!(user = %session.id, role = %session.role, "registered");
        Ok(session)
    }

    /// Start account recovery
    pub fn recover(&self, email: &str) -> Result<()> {
        self.identity.recover(email)
    }

    /// The active session, if any
    pub fn session(&self) -> Result<Option<User>> {
        self.store.get(Collection::Session, None)
    }

    /// The active session, or [`Error::NoSession`]
    pub(crate) fn require_session(&self) -> Result<User> {
        self.session()?.ok_or(Error::NoSession)
    }

    /// Sign out; removes only the session document
    pub fn logout(&self) -> Result<()> {
        self.store.remove(Collection::Session)?;
        info!("logged out");
        Ok(())
    }

    /// Look up an account by id
    pub fn get_user(&self, user_id: &str) -> Result<User> {
        let users: Vec<User> = self.store.get(Collection::Users, Vec::new())?;
        users
            .into_iter()
            .find(|u| u.id == user_id)
            .map(User::into_session)
            .ok_or_else(|| Error::not_found("user", user_id))
    }

    /// Apply a partial profile update to an account
    ///
    /// Updates the directory entry and, when the account is the active
    /// session, the session document too. Publishes `CLIENT_UPDATE`.
    pub fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let mut users: Vec<User> = self.store.get(Collection::Users, Vec::new())?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found("user", user_id))?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = avatar;
        }
        if let Some(interests) = update.interests {
            user.interests = interests;
        }
        let updated = user.clone().into_session();
        self.store.set(Collection::Users, &users)?;
        self.refresh_session(&updated)?;
        self.publish(Channel::Client, &json!({ "userId": user_id }));
        Ok(updated)
    }

    /// Replace the provider profile on a vendor/planner account
    pub fn update_provider_profile(
        &self,
        provider_id: &str,
        profile: ProviderProfile,
    ) -> Result<User> {
        let mut users: Vec<User> = self.store.get(Collection::Users, Vec::new())?;
        let user = users
            .iter_mut()
            .find(|u| u.id == provider_id)
            .ok_or_else(|| Error::not_found("user", provider_id))?;
        if !matches!(user.role, UserRole::Vendor | UserRole::Planner) {
            return Err(Error::InvalidOperation(format!(
                "account {provider_id} is not a provider"
            )));
        }
        user.provider_profile = Some(profile);
        let updated = user.clone().into_session();
        self.store.set(Collection::Users, &users)?;
        self.refresh_session(&updated)?;
        self.publish(Channel::Client, &json!({ "userId": provider_id }));
        Ok(updated)
    }

    fn refresh_session(&self, user: &User) -> Result<()> {
        if let Some(session) = self.session()? {
            if session.id == user.id {
                self.store.set(Collection::Session, user)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::PaymentPolicy;

    pub(crate) fn test_backend() -> Backend {
        let store = Store::builder().in_memory().open().unwrap();
        let backend = Backend::with_config(
            store,
            Relay::new(),
            BackendConfig::default().payment_policy(PaymentPolicy::Approve),
        );
        backend.init().unwrap();
        backend
    }

    struct DownProvider;

    impl IdentityProvider for DownProvider {
        fn authenticate(&self, _email: &str, _password: &str) -> Result<User> {
            Err(Error::ProviderUnreachable("connection refused".into()))
        }
        fn register(&self, _user: User) -> Result<User> {
            Err(Error::ProviderUnreachable("connection refused".into()))
        }
        fn recover(&self, _email: &str) -> Result<()> {
            Err(Error::ProviderUnreachable("connection refused".into()))
        }
    }

    fn backend_with_down_provider(demo: bool) -> Backend {
        let store = Store::builder().in_memory().open().unwrap();
        Backend::with_identity(
            store,
            Relay::new(),
            BackendConfig::default().demo_identity(demo),
            Arc::new(DownProvider),
        )
    }

    #[test]
    fn init_is_idempotent() {
        let backend = test_backend();
        let events: Vec<eventide_core::EventRecord> =
            backend.store.get(Collection::Events, vec![]).unwrap();
        let before = events.len();

        backend.init().unwrap();
        let events: Vec<eventide_core::EventRecord> =
            backend.store.get(Collection::Events, vec![]).unwrap();
        assert_eq!(events.len(), before);
    }

    #[test]
    fn login_writes_session_without_password() {
        let backend = test_backend();
        let user = backend
            .login("client@demo.eventide.app", "password", UserRole::Client)
            .unwrap();
        assert!(user.password.is_none());

        let session = backend.session().unwrap().unwrap();
        assert_eq!(session.id, user.id);
        assert!(session.password.is_none());
    }

    #[test]
    fn login_with_wrong_role_fails() {
        let backend = test_backend();
        let err = backend
            .login("client@demo.eventide.app", "password", UserRole::Vendor)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RoleMismatch {
                requested: UserRole::Vendor,
                actual: UserRole::Client,
            }
        ));
        assert!(backend.session().unwrap().is_none());
    }

    #[test]
    fn logout_removes_only_session() {
        let backend = test_backend();
        backend
            .login("client@demo.eventide.app", "password", UserRole::Client)
            .unwrap();
        backend.logout().unwrap();

        assert!(backend.session().unwrap().is_none());
        assert!(backend.store.contains(Collection::Users).unwrap());
        assert!(backend.store.contains(Collection::Events).unwrap());
    }

    #[test]
    fn unreachable_provider_fails_without_demo_identity() {
        let backend = backend_with_down_provider(false);
        let err = backend
            .login("a@b.c", "pw", UserRole::Client)
            .unwrap_err();
        assert!(matches!(err, Error::ProviderUnreachable(_)));
        assert!(backend.session().unwrap().is_none());
    }

    #[test]
    fn unreachable_provider_falls_back_when_demo_identity_enabled() {
        let backend = backend_with_down_provider(true);
        let user = backend.login("a@b.c", "pw", UserRole::Vendor).unwrap();
        assert_eq!(user.role, UserRole::Vendor);
        assert_eq!(user.id, "user-demo-vendor");
        assert!(backend.session().unwrap().is_some());
    }

    #[test]
    fn register_signs_in_and_creates_provider_profile() {
        let backend = test_backend();
        let user = backend
            .register("Nova Decor", "nova@example.com", "pw", UserRole::Vendor)
            .unwrap();
        assert!(user.provider_profile.is_some());
        assert_eq!(backend.session().unwrap().unwrap().id, user.id);

        // And the account authenticates afterwards.
        backend.logout().unwrap();
        backend
            .login("nova@example.com", "pw", UserRole::Vendor)
            .unwrap();
    }

    #[test]
    fn register_requires_name() {
        let backend = test_backend();
        let err = backend
            .register("  ", "x@example.com", "pw", UserRole::Client)
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("name")));
    }

    #[test]
    fn get_user_strips_password() {
        let backend = test_backend();
        let user = backend.get_user("user-demo-client").unwrap();
        assert!(user.password.is_none());
    }

    #[test]
    fn update_profile_touches_directory_and_session() {
        let backend = test_backend();
        backend
            .login("client@demo.eventide.app", "password", UserRole::Client)
            .unwrap();
        let updated = backend
            .update_profile(
                "user-demo-client",
                ProfileUpdate {
                    name: Some("Ada".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Ada");
        assert_eq!(backend.session().unwrap().unwrap().name, "Ada");
        assert_eq!(backend.get_user("user-demo-client").unwrap().name, "Ada");
    }

    #[test]
    fn update_provider_profile_rejects_clients() {
        let backend = test_backend();
        let profile = ProviderProfile::new_unverified("user-demo-client", "X", UserRole::Vendor);
        let err = backend
            .update_provider_profile("user-demo-client", profile)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }
}
