use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier resolved by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder identity for an unauthenticated caller.
    ///
    /// Open meetings admit anonymous users; they still need an identifier
    /// for the video session, so one is generated on the spot.
    pub fn guest() -> Self {
        Self(crate::utils::generate_meeting_id())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Seam to the external authentication provider.
///
/// The engine never authenticates; it only consumes an already-resolved
/// identifier, or `None` before sign-in.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}
