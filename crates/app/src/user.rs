use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use learn_core::model::UserId;
use tracing::debug;

pub const USER_COOKIE: &str = "learn_user";

/// The user a request acts for, taken from the `learn_user` cookie.
///
/// A missing or malformed cookie falls back to the default user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, USER_COOKIE))
            .and_then(|raw| match raw.parse::<UserId>() {
                Ok(user) => Some(user),
                Err(err) => {
                    debug!(error = %err, "ignoring invalid user cookie");
                    None
                }
            })
            .unwrap_or_default();
        Ok(Self(user))
    }
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie_among_others() {
        assert_eq!(
            cookie_value("theme=dark; learn_user=alice; x=1", USER_COOKIE),
            Some("alice")
        );
        assert_eq!(cookie_value("theme=dark", USER_COOKIE), None);
        assert_eq!(cookie_value("", USER_COOKIE), None);
    }
}
