//! Extractor configuration mapping Actix parse failures onto the domain
//! error taxonomy.
//!
//! Without these handlers Actix answers malformed bodies, paths and query
//! strings with plain-text responses; registering them keeps every client
//! error in the `{code, message, details}` shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

/// Validation detail codes reported alongside `invalid_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailCode {
    MalformedBody,
    MalformedPath,
    MalformedQuery,
}

impl DetailCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::MalformedPath => "malformed_path",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn invalid(message: &str, code: DetailCode, reason: impl ToString) -> Error {
    Error::invalid_input(message).with_details(json!({
        "code": code.as_str(),
        "reason": reason.to_string(),
    }))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid(
        "request body is not valid JSON for this operation",
        DetailCode::MalformedBody,
        err,
    )
    .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    invalid("request path is malformed", DetailCode::MalformedPath, err).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid(
        "query string is malformed",
        DetailCode::MalformedQuery,
        err,
    )
    .into()
}

/// Register the error-mapping extractor configs on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));
}
