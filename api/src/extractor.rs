use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use kernel::model::{auth::Principal, id::UserId};
use registry::AppRegistry;
use shared::error::AppError;

/// Requires a valid bearer credential. Verification is purely
/// cryptographic, so rejection happens before any repository is touched.
pub struct AuthorizedUser(Principal);

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.0.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }

    pub fn principal(&self) -> Principal {
        self.0
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts.headers.get(AUTHORIZATION))?;
        let principal = registry.token_provider().verify(token)?;
        Ok(Self(principal))
    }
}

/// Role gate in front of admin-only routes. Runs the credential check
/// first, then requires the admin role.
pub struct AdminUser(pub AuthorizedUser);

#[async_trait]
impl FromRequestParts<AppRegistry> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthorizedUser::from_request_parts(parts, registry).await?;
        if !user.is_admin() {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(Self(user))
    }
}

fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let value = header.ok_or(AppError::MissingCredential)?;
    let value = value.to_str().map_err(|_| AppError::MalformedCredential)?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::MalformedCredential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_is_missing_credential() {
        assert!(matches!(
            bearer_token(None),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn header_without_scheme_is_malformed() {
        let value = HeaderValue::from_static("some-raw-token");
        assert!(matches!(
            bearer_token(Some(&value)),
            Err(AppError::MalformedCredential)
        ));
    }

    #[test]
    fn bearer_without_token_segment_is_malformed() {
        let value = HeaderValue::from_static("Bearer ");
        assert!(matches!(
            bearer_token(Some(&value)),
            Err(AppError::MalformedCredential)
        ));
    }

    #[test]
    fn token_segment_is_extracted() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&value)).unwrap(), "abc.def.ghi");
    }
}
