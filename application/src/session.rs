//! [`Session`]-related definitions.

use axum::{async_trait, extract::FromRequestParts};
use service::domain::user;

use crate::define_error;

/// Name of the HTTP header identifying the acting user.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Session of the user performing the current HTTP request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Session {
    /// ID of the user associated with this [`Session`].
    pub user_id: user::Id,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(AuthError::AuthorizationRequired)?;
        let user_id = header
            .to_str()
            .ok()
            .and_then(|h| h.trim().parse().ok())
            .ok_or(AuthError::InvalidUserId)?;

        Ok(Self { user_id })
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_USER_ID"]
        #[status = BAD_REQUEST]
        #[message = "`X-User-Id` header must contain a valid UUID"]
        InvalidUserId,
    }
}
