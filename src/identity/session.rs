use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::api::{ApiClient, RegistrationForm};
use crate::error::{ClientError, ClientResult};

use super::persist::{TokenStore, ACCOUNT_TYPE_KEY, TOKEN_KEY};
use super::user::{AccountType, User};

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Process-wide session state: the current bearer token and the cached user.
/// Initialized from the persistence port, mutated only by login/register/
/// logout/refresh. Invariant: no cached user without a token.
pub struct SessionStore {
    api: ApiClient,
    persist: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Builds a store, picking up any token persisted by a previous process.
    pub fn new(api: ApiClient, persist: Arc<dyn TokenStore>) -> Self {
        let token = persist.load(TOKEN_KEY);
        let state = SessionState { token, user: None };
        Self { api, persist, state: RwLock::new(state) }
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn cached_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    /// Authenticates against the backend; on success the token and user are
    /// installed in memory and in the persistence port. On failure existing
    /// state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let auth = self.api.login(email, password).await?;
        self.install(auth.token, auth.user.clone());
        debug!(target: "session", "session.login user={}", auth.user.id);
        Ok(auth.user)
    }

    /// Symmetric to `login`: a successful registration also signs the user in.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<User> {
        let auth = self.api.register(form).await?;
        self.install(auth.token, auth.user.clone());
        debug!(target: "session", "session.register user={}", auth.user.id);
        Ok(auth.user)
    }

    /// Fetches the signed-in user, refreshing the cache. Fails fast with an
    /// authorization error when no credential is present (no network call).
    /// A credential the server rejects is treated as expired and dropped.
    pub async fn current_user(&self) -> ClientResult<User> {
        let Some(token) = self.token() else {
            return Err(ClientError::authorization("no credential"));
        };
        match self.api.current_user(&token).await {
            Ok(user) => {
                let mut st = self.state.write();
                // Only refresh the cache if the token has not changed underneath us.
                if st.token.as_deref() == Some(token.as_str()) {
                    st.user = Some(user.clone());
                }
                Ok(user)
            }
            Err(err) if err.is_authorization() => {
                debug!(target: "session", "session.expired: {}", err.message());
                self.clear_session();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Clears the credential and cached user from memory and persisted
    /// storage. Never fails; no backend round trip.
    pub fn logout(&self) {
        self.clear_session();
        debug!(target: "session", "session.logout");
    }

    /// Persists the last-selected account type so the next launch can open
    /// the matching dashboard before any network call.
    pub fn remember_account_type(&self, account_type: AccountType) {
        if let Err(err) = self.persist.save(ACCOUNT_TYPE_KEY, account_type.as_str()) {
            warn!("session.persist account type failed: {err:#}");
        }
    }

    pub fn preferred_account_type(&self) -> Option<AccountType> {
        self.persist.load(ACCOUNT_TYPE_KEY).map(|tag| AccountType::parse(&tag))
    }

    fn install(&self, token: String, user: User) {
        {
            let mut st = self.state.write();
            st.token = Some(token.clone());
            st.user = Some(user);
        }
        if let Err(err) = self.persist.save(TOKEN_KEY, &token) {
            // The in-memory session is still valid; it just won't survive a restart.
            warn!("session.persist token failed: {err:#}");
        }
    }

    fn clear_session(&self) {
        {
            let mut st = self.state.write();
            st.token = None;
            st.user = None;
        }
        if let Err(err) = self.persist.clear(TOKEN_KEY) {
            warn!("session.clear token failed: {err:#}");
        }
    }
}
