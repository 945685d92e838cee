//! Error taxonomy for the admin client.
//!
//! Failures are classified by how the caller recovers: a failed list load
//! leaves prior state intact, a rejected mutation keeps the dialog open,
//! a validation failure never reaches the network.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A list or stats GET failed. Callers keep whatever they had.
    #[error("failed to load {resource}")]
    Load {
        resource: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server refused a create/update/delete/status change.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// Transport-level failure (connect, timeout, body decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A client-side check failed before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// Login was rejected. The message is shown inline on the login form.
    #[error("{0}")]
    Auth(String),
}

impl Error {
    pub(crate) fn load(
        resource: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Load {
            resource,
            source: source.into(),
        }
    }

    /// The message the server sent back with a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message for user display: the server's own words when it sent any,
    /// otherwise the resource-specific fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(msg) | Error::Auth(msg) => msg.clone(),
            _ => self
                .server_message()
                .unwrap_or(fallback)
                .to_string(),
        }
    }
}
