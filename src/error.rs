//! Unified client error model.
//! One enum used across the transport, session store and CLI so callers can
//! tell "the backend said no" apart from "the network is down" and from
//! "the credential is no longer accepted".

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Network unreachable, caller-imposed timeout, or a body that does not decode.
    #[error("transport: {message}")]
    Transport { message: String },
    /// The backend replied `success: false`; `message` is presentable verbatim.
    #[error("{message}")]
    Application { message: String },
    /// The server rejected the credential, or no credential is present.
    /// Callers should treat this as "session expired".
    #[error("authorization: {message}")]
    Authorization { message: String },
}

impl ClientError {
    pub fn transport<S: Into<String>>(msg: S) -> Self { ClientError::Transport { message: msg.into() } }
    pub fn application<S: Into<String>>(msg: S) -> Self { ClientError::Application { message: msg.into() } }
    pub fn authorization<S: Into<String>>(msg: S) -> Self { ClientError::Authorization { message: msg.into() } }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Transport { message }
            | ClientError::Application { message }
            | ClientError::Authorization { message } => message.as_str(),
        }
    }

    pub fn is_transport(&self) -> bool { matches!(self, ClientError::Transport { .. }) }
    pub fn is_application(&self) -> bool { matches!(self, ClientError::Application { .. }) }
    pub fn is_authorization(&self) -> bool { matches!(self, ClientError::Authorization { .. }) }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport { message: err.to_string() }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
