//! Bearer token extraction.
//!
//! Handlers that require a caller take an [`Authenticated`] argument. The
//! extractor resolves the `Authorization: Bearer <token>` header to a user
//! id through the [`TokenService`](crate::domain::ports::TokenService)
//! held in [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{AuthContext, Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(UserId);

impl Authenticated {
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Auth context to hand to domain services.
    #[must_use]
    pub fn context(&self) -> AuthContext {
        AuthContext::for_subject(self.0)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("no token found in request"))?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("auth header value in unexpected format"))?;

    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::system("http state is not configured"))?;
    state.tokens.subject(token).map(Authenticated).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("invalid token")
    })
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
