pub mod assets;
pub mod health;
pub mod prices;
pub mod snapshots;
pub mod transactions;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::AppError;

/// The authenticated user, resolved from the `x-user-id` header the auth
/// gateway sets. Keeping it an explicit handler argument (and an explicit
/// `user_id` parameter all the way down to the queries) is what scopes every
/// read and write to one user — no ambient request context.
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
