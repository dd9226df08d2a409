//! End-to-end coverage of registration, authentication and account upkeep.

#[allow(
    dead_code,
    reason = "Shared helpers include items unused in this specific crate."
)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

use support::{PASSWORD, app, login, register, state};

#[actix_web::test]
async fn registered_user_can_read_their_profile() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(ada.authorization())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["first_name"], "Ada");
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = test::init_service(app(state())).await;
    register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({
                "email": "ada@example.com",
                "password": PASSWORD,
                "first_name": "Other",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "resource_conflict");
}

#[rstest]
#[case(json!({"email": "", "password": PASSWORD, "first_name": "Ada"}))]
#[case(json!({"email": "ada@example.com", "password": "", "first_name": "Ada"}))]
#[case(json!({"email": "not-an-email", "password": PASSWORD, "first_name": "Ada"}))]
#[actix_web::test]
async fn invalid_registration_is_rejected(#[case] payload: Value) {
    let app = test::init_service(app(state())).await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/v1/users")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_input");
}

#[rstest]
#[case("ada@example.com", "wrong password", StatusCode::UNAUTHORIZED)]
#[case("nobody@example.com", PASSWORD, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn bad_credentials_do_not_yield_a_token(
    #[case] email: &str,
    #[case] password: &str,
    #[case] status: StatusCode,
) {
    let app = test::init_service(app(state())).await;
    register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth")
            .set_json(json!({"email": email, "password": password}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
    let body: Value = test::read_body_json(response).await;
    assert!(body.get("access_token").is_none());
}

#[actix_web::test]
async fn patch_updates_profile_and_repeat_is_a_no_op() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;
    let patch = json!([{"op": "replace", "path": "/first_name", "value": "Augusta"}]);

    for _ in 0..2 {
        let response = test::call_service(
            &app,
            TestRequest::patch()
                .uri(&format!("/v1/users/{}", ada.id))
                .insert_header(ada.authorization())
                .set_json(patch.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let user: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(ada.authorization())
            .to_request(),
    )
    .await;
    assert_eq!(user["first_name"], "Augusta");
    assert_eq!(user["last_name"], "Lovelace");
}

#[actix_web::test]
async fn patch_breaking_an_invariant_is_rejected() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::patch()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(ada.authorization())
            .set_json(json!([{"op": "replace", "path": "/email", "value": "nope"}]))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn users_cannot_modify_each_other() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;
    let grace = register(&app, "grace@example.com").await;

    let patch = test::call_service(
        &app,
        TestRequest::patch()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(grace.authorization())
            .set_json(json!([{"op": "replace", "path": "/first_name", "value": "X"}]))
            .to_request(),
    )
    .await;
    assert_eq!(patch.status(), StatusCode::UNAUTHORIZED);

    let delete = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(grace.authorization())
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn new_password_replaces_the_old_one() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::put()
            .uri(&format!("/v1/users/{}/password", ada.id))
            .insert_header(ada.authorization())
            .set_json(json!({"password": "an entirely new secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stale = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth")
            .set_json(json!({"email": ada.email, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

    let token = login(&app, &ada.email, "an entirely new secret").await;
    assert!(!token.is_empty());
}

#[actix_web::test]
async fn deleted_user_is_gone() {
    let app = test::init_service(app(state())).await;
    let ada = register(&app, "ada@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(ada.authorization())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let lookup = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/v1/users/{}", ada.id))
            .insert_header(ada.authorization())
            .to_request(),
    )
    .await;
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}
