use std::collections::HashMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::identity::{AccountType, User};

use super::envelope;

/// Registration form posted to `/register`. Profile fields are flattened
/// into the body the way the sign-up page submits them.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub account_type: AccountType,
    #[serde(flatten)]
    pub profile: HashMap<String, String>,
}

/// `{token, user}` returned by `/login` and `/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct MePayload {
    user: User,
}

#[derive(Deserialize)]
struct CategoriesPayload {
    categories: Vec<String>,
}

/// Account-type catalog entry from `/user-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTypeEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
struct UserTypesPayload {
    #[serde(rename = "userTypes")]
    user_types: Vec<UserTypeEntry>,
}

/// Thin client over the backend REST surface. Performs the call, decodes the
/// envelope and returns the payload verbatim; never retries, never stores
/// credentials (that is the session store's job).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Self::from_base_url(&config.api_url)
    }

    pub fn from_base_url(api_url: &str) -> ClientResult<Self> {
        // Normalize to a trailing slash so joins keep the /api path prefix.
        let mut normalized = api_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| ClientError::transport(format!("invalid base URL '{api_url}': {e}")))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::transport(format!("invalid endpoint '{path}': {e}")))
    }

    /// POST /register — responds with `{token, user}`.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<AuthPayload> {
        let url = self.endpoint("register")?;
        debug!(target: "api", "POST {url}");
        let resp = self.http.post(url).json(form).send().await?;
        envelope::decode(resp).await
    }

    /// POST /login — responds with `{token, user}`.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthPayload> {
        let url = self.endpoint("login")?;
        debug!(target: "api", "POST {url}");
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        envelope::decode(resp).await
    }

    /// GET /me with a bearer token — responds with `{user}`.
    pub async fn current_user(&self, token: &str) -> ClientResult<User> {
        let url = self.endpoint("me")?;
        debug!(target: "api", "GET {url}");
        let resp = self.http.get(url).bearer_auth(token).send().await?;
        let payload: MePayload = envelope::decode_authorized(resp).await?;
        Ok(payload.user)
    }

    /// GET /categories?type= — responds with `{categories}`.
    pub async fn categories(&self, account_type: AccountType) -> ClientResult<Vec<String>> {
        let url = self.endpoint("categories")?;
        debug!(target: "api", "GET {url}?type={account_type}");
        let resp = self
            .http
            .get(url)
            .query(&[("type", account_type.as_str())])
            .send()
            .await?;
        let payload: CategoriesPayload = envelope::decode(resp).await?;
        Ok(payload.categories)
    }

    /// GET /user-types — responds with `{userTypes}`.
    pub async fn user_types(&self) -> ClientResult<Vec<UserTypeEntry>> {
        let url = self.endpoint("user-types")?;
        debug!(target: "api", "GET {url}");
        let resp = self.http.get(url).send().await?;
        let payload: UserTypesPayload = envelope::decode(resp).await?;
        Ok(payload.user_types)
    }
}
