//! Handler tests for the users API.

use super::*;
use crate::domain::{CourseId, Error, UserId};
use crate::inbound::http::test_utils::{CALLER, TestPorts, bearer, caller, state_with};
use crate::inbound::http::validation;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::json;

const COURSE: &str = "9b2f1a5e-3c4d-4e6f-8a9b-0c1d2e3f4a5b";

fn user() -> User {
    User {
        id: caller(),
        email: "ada@example.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        profile_pic: String::new(),
        password_hash: "$2b$04$secret".to_owned(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn send(ports: TestPorts, request: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(ports)))
            .service(
                web::scope("/v1")
                    .configure(validation::configure)
                    .configure(configure),
            ),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

#[actix_web::test]
async fn registration_returns_created_user_without_hash() {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|new_user| new_user.email == "ada@example.com" && *new_user.password == "hunter2")
        .return_once(|_| Ok(user()));

    let response = send(
        ports,
        test::TestRequest::post().uri("/v1/users").set_json(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "first_name": "Ada",
            "last_name": "Lovelace",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["id"], CALLER);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_create_user()
        .return_once(|_| Err(Error::conflict("user already exists")));

    let response = send(
        ports,
        test::TestRequest::post().uri("/v1/users").set_json(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "first_name": "Ada",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn registration_with_missing_fields_is_invalid_input() {
    let mut ports = TestPorts::default();
    ports.users.expect_create_user().never();

    let response = send(
        ports,
        test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({"email": "ada@example.com"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_input");
}

#[actix_web::test]
async fn get_user_requires_a_token() {
    let mut ports = TestPorts::default();
    ports.users.expect_get_user().never();

    let response = send(
        ports,
        test::TestRequest::get().uri(&format!("/v1/users/{CALLER}")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn get_user_returns_the_user() {
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_get_user()
        .with(eq(CALLER))
        .return_once(|_| Ok(user()));

    let response = send(
        ports,
        test::TestRequest::get()
            .uri(&format!("/v1/users/{CALLER}"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["first_name"], "Ada");
}

#[actix_web::test]
async fn patch_passes_document_and_caller_through() {
    let document = json!([{"op": "replace", "path": "/first_name", "value": "Augusta"}]);
    let expected = document.clone();
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_patch_user()
        .withf(move |ctx, id, patch| {
            ctx.subject() == Some(&caller()) && id == CALLER && *patch == expected
        })
        .return_once(|_, _, _| Ok(()));

    let response = send(
        ports,
        test::TestRequest::patch()
            .uri(&format!("/v1/users/{CALLER}"))
            .insert_header(bearer())
            .set_json(document),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case(Error::unauthorized("users are only authorised to patch their own accounts"), StatusCode::UNAUTHORIZED)]
#[case(Error::invalid_input("user email must not be empty"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("user does not exist"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn patch_failures_map_to_status(#[case] error: Error, #[case] status: StatusCode) {
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_patch_user()
        .return_once(move |_, _, _| Err(error));

    let response = send(
        ports,
        test::TestRequest::patch()
            .uri(&format!("/v1/users/{CALLER}"))
            .insert_header(bearer())
            .set_json(json!([])),
    )
    .await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn delete_user_returns_no_content() {
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_delete_user()
        .withf(|ctx, id| ctx.subject() == Some(&caller()) && id == CALLER)
        .return_once(|_, _| Ok(()));

    let response = send(
        ports,
        test::TestRequest::delete()
            .uri(&format!("/v1/users/{CALLER}"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn enroll_returns_the_enrollment() {
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_enroll()
        .withf(|_, user_id, course_id| user_id == CALLER && course_id == COURSE)
        .return_once(|_, _, course_id| {
            Ok(UserCourse {
                user_id: caller(),
                course_id: CourseId::new(course_id).expect("fixture course id"),
                active_lesson_id: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

    let response = send(
        ports,
        test::TestRequest::put()
            .uri(&format!("/v1/users/{CALLER}/courses/{COURSE}"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["course_id"], COURSE);
    assert_eq!(body["active_lesson_id"], Value::Null);
}

#[actix_web::test]
async fn list_courses_of_another_user_is_unauthorized() {
    let other = UserId::from_uuid(uuid::Uuid::new_v4()).to_string();
    let mut ports = TestPorts::authenticated();
    ports.users.expect_list_enrollments().return_once(|_, _| {
        Err(Error::unauthorized(
            "users cannot see which courses other users are enrolled in",
        ))
    });

    let response = send(
        ports,
        test::TestRequest::get()
            .uri(&format!("/v1/users/{other}/courses"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_pic_and_password_updates_return_no_content() {
    let mut ports = TestPorts::authenticated();
    ports
        .users
        .expect_set_profile_pic()
        .withf(|_, _, pic| pic == "https://cdn.example.com/ada.png")
        .return_once(|_, _, _| Ok(()));
    ports
        .users
        .expect_set_password()
        .withf(|_, _, password| password == "correct horse")
        .return_once(|_, _, _| Ok(()));
    let state = web::Data::new(state_with(ports));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/v1").configure(configure)),
    )
    .await;

    let pic = test::TestRequest::put()
        .uri(&format!("/v1/users/{CALLER}/profilePic"))
        .insert_header(bearer())
        .set_json(json!({"profile_pic": "https://cdn.example.com/ada.png"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, pic).await.status(),
        StatusCode::NO_CONTENT
    );

    let password = test::TestRequest::put()
        .uri(&format!("/v1/users/{CALLER}/password"))
        .insert_header(bearer())
        .set_json(json!({"password": "correct horse"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, password).await.status(),
        StatusCode::NO_CONTENT
    );
}
