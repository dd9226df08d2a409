//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod courses;
pub mod error;
pub mod health;
pub mod languages;
pub mod lessons;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every versioned resource route under `/v1`, plus the
/// unversioned `/auth` and `/ping` endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(validation::configure)
        .service(auth::authenticate)
        .service(health::ping)
        .service(
            web::scope("/v1")
                .configure(users::configure)
                .configure(languages::configure)
                .configure(courses::configure)
                .configure(lessons::configure),
        );
}
