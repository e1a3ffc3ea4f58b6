//! Port to the external identity provider.

use async_trait::async_trait;
use bizpulse_shared::types::UserId;

use crate::error::{BusinessError, BusinessResult};

/// Resolves the signed-in user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current user's ID.
    ///
    /// Fails with `BusinessError::Unauthenticated` when nobody is signed in.
    async fn current_user_id(&self) -> BusinessResult<UserId>;
}

/// Identity fixed at construction time.
///
/// Used by the seeder and by tests; `None` behaves as signed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticIdentity(pub Option<UserId>);

impl StaticIdentity {
    /// Identity of a signed-in user.
    #[must_use]
    pub const fn signed_in(user_id: UserId) -> Self {
        Self(Some(user_id))
    }

    /// No signed-in user.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self(None)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user_id(&self) -> BusinessResult<UserId> {
        self.0.ok_or(BusinessError::Unauthenticated)
    }
}
