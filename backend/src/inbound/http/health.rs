//! Ping endpoint for load balancers and smoke tests.

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};

use crate::inbound::http::state::HttpState;

/// Ping payload.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PingResponse {
    /// Always `ok`.
    #[schema(example = "ok")]
    pub status: String,
    /// Deployed service version.
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Report that the service is up, with its version.
#[utoipa::path(
    get,
    path = "/ping",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    )
)]
#[get("/ping")]
pub async fn ping(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(PingResponse {
            status: "ok".to_owned(),
            version: state.version.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestPorts, state_with};
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn ping_reports_status_and_version() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(TestPorts::default())))
                .service(ping),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"status": "ok", "version": "1.2.3"}));
    }
}
