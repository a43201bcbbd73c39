//! Uniform response envelope shared by every backend endpoint.
//! Bodies carry `success: bool`, a `message` when `success=false`, and the
//! payload fields flattened alongside (`token`, `user`, `categories`, ...).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Decodes an envelope. `success=false` maps to an application error with
/// the backend's message verbatim; a body that is not JSON maps to a
/// transport error.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    decode_inner(resp, false).await
}

/// Like `decode`, but for credentialed endpoints: a 401/403 means the server
/// rejected the credential, which is surfaced as an authorization error so
/// callers can treat it as "session expired".
pub(crate) async fn decode_authorized<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    decode_inner(resp, true).await
}

async fn decode_inner<T: DeserializeOwned>(resp: reqwest::Response, credentialed: bool) -> ClientResult<T> {
    let status = resp.status();
    let body: Value = resp
        .json()
        .await
        .map_err(|e| ClientError::transport(format!("malformed response body: {e}")))?;

    // Valid JSON that is not an envelope (null, array, missing `success`)
    // counts as a failed envelope, not a transport fault.
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        if credentialed && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
            return Err(ClientError::Authorization { message });
        }
        return Err(ClientError::Application { message });
    }

    // Payload fields live next to `success`; unknown fields are ignored.
    serde_json::from_value(body)
        .map_err(|e| ClientError::transport(format!("unexpected payload shape: {e}")))
}
