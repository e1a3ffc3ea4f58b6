//! Claims carried by identity-provider access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned by the identity provider to signed-in users.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// JWT claims for access tokens.
///
/// Mirrors the token layout of the hosted auth service: the subject is the
/// stable user identifier used to scope companies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User email, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role granted by the provider.
    pub role: String,
    /// Audience.
    pub aud: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        email: Option<String>,
        audience: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            role: AUTHENTICATED_ROLE.to_string(),
            aud: audience.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns true if the provider marked the session as signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.role == AUTHENTICATED_ROLE
    }
}
