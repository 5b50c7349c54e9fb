//! Caller identity and the authorization context sent with every request.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity of the caller as handed over by the identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Identity {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    /// An identity that carries no token at all.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Authorization context required by the management API on every call.
///
/// `identity` is the bearer token, or `None` when the caller's identity had
/// none. Requests built from an empty context carry no `Authorization`
/// header and are left for the endpoint to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub identity: Option<String>,
}

impl AuthorizationContext {
    pub fn authorization_header(&self) -> Option<String> {
        self.identity.as_deref().map(|token| format!("Bearer {token}"))
    }
}

/// Build a fresh context from `identity`. A missing token is not an error.
pub fn build_context(identity: &Identity) -> AuthorizationContext {
    if identity.access_token.is_none() {
        debug!("identity carries no access token, context will be anonymous");
    }
    AuthorizationContext {
        identity: identity.access_token.clone(),
    }
}
