//! Tests for the user service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;
use serde_json::json;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockCourseRepository, MockEnrollmentRepository, MockPasswordService, MockUserRepository,
    RepositoryError,
};
use crate::domain::test_fixtures::{
    created_at, ctx_for, fixture_clock, now, random_user_id, sample_course, sample_user, uuid_ids,
};

type Service = UserServiceImpl<MockUserRepository, MockCourseRepository, MockEnrollmentRepository>;

struct Mocks {
    users: MockUserRepository,
    courses: MockCourseRepository,
    enrollments: MockEnrollmentRepository,
    passwords: MockPasswordService,
}

impl Mocks {
    fn new() -> Self {
        let mut passwords = MockPasswordService::new();
        passwords.expect_is_valid().returning(|candidate| !candidate.starts_with("$2"));
        passwords
            .expect_hash()
            .returning(|plain| Ok(format!("hashed:{plain}")));
        Self {
            users: MockUserRepository::new(),
            courses: MockCourseRepository::new(),
            enrollments: MockEnrollmentRepository::new(),
            passwords,
        }
    }

    fn with_user(mut self, user: &User) -> Self {
        let stored = user.clone();
        self.users
            .expect_find_by_id()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(stored.clone())));
        self
    }

    fn build(self) -> Service {
        UserServiceImpl::new(
            Arc::new(self.users),
            Arc::new(self.courses),
            Arc::new(self.enrollments),
            uuid_ids(),
            Arc::new(self.passwords),
            fixture_clock(),
        )
    }
}

fn new_user() -> NewUser {
    NewUser {
        email: "ada@example.com".to_owned(),
        password: Zeroizing::new("correct horse".to_owned()),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        profile_pic: String::new(),
    }
}

#[tokio::test]
async fn create_user_hashes_password_and_stamps_timestamps() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_create()
        .withf(|user| user.password_hash == "hashed:correct horse")
        .times(1)
        .returning(|_| Ok(()));

    let user = mocks.build().create_user(new_user()).await.expect("user created");

    assert!(user.id.is_well_formed());
    assert_eq!(user.created_at, now());
    assert_eq!(user.updated_at, now());
    assert_eq!(user.email, "ada@example.com");
}

#[rstest]
#[case::email(|u: &mut NewUser| u.email.clear())]
#[case::password(|u: &mut NewUser| u.password = Zeroizing::new(String::new()))]
#[case::first_name(|u: &mut NewUser| u.first_name.clear())]
#[tokio::test]
async fn create_user_requires_core_fields(#[case] mutate: fn(&mut NewUser)) {
    let mut request = new_user();
    mutate(&mut request);

    let err = Mocks::new()
        .build()
        .create_user(request)
        .await
        .expect_err("missing field");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn create_user_rejects_invalid_email_before_storing() {
    let mut request = new_user();
    request.email = "ada-at-example".to_owned();
    let mut mocks = Mocks::new();
    mocks.users.expect_create().never();

    let err = mocks.build().create_user(request).await.expect_err("bad email");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "user is invalid");
}

#[tokio::test]
async fn create_user_reports_duplicate_email_as_conflict() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_create()
        .returning(|_| Err(RepositoryError::conflict("users_email_key")));

    let err = mocks.build().create_user(new_user()).await.expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::ResourceConflict);
}

#[rstest]
#[case("")]
#[case("abc")]
#[tokio::test]
async fn get_user_rejects_malformed_id(#[case] raw: &str) {
    let err = Mocks::new().build().get_user(raw).await.expect_err("bad id");
    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "format of userID is invalid");
}

#[tokio::test]
async fn get_user_reports_missing_user() {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().returning(|_| Ok(None));

    let err = mocks
        .build()
        .get_user(&random_user_id().to_string())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    assert_eq!(err.message(), "user does not exist");
}

#[tokio::test]
async fn get_user_maps_repository_failure_to_system_error() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_id()
        .returning(|_| Err(RepositoryError::connection("pool timed out")));

    let err = mocks
        .build()
        .get_user(&random_user_id().to_string())
        .await
        .expect_err("repository down");

    assert_eq!(err.code(), ErrorCode::SystemError);
    assert_eq!(err.message(), "failed to retrieve user");
}

fn with_email_lookup(mocks: &mut Mocks, user: Option<User>) {
    mocks
        .users
        .expect_find_by_email()
        .returning(move |_| Ok(user.clone()));
}

#[tokio::test]
async fn authenticate_returns_user_on_match() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new();
    with_email_lookup(&mut mocks, Some(user.clone()));
    mocks.passwords.expect_check().returning(|_, _| Ok(()));

    let found = mocks
        .build()
        .authenticate("ada@example.com", "pw")
        .await
        .expect("credentials match");

    assert_eq!(found, user);
}

#[rstest]
#[case(Err(PasswordCheckError::Mismatch), ErrorCode::Unauthorized)]
#[case(Err(PasswordCheckError::failure("corrupt hash")), ErrorCode::SystemError)]
#[tokio::test]
async fn authenticate_maps_check_failures(
    #[case] outcome: Result<(), PasswordCheckError>,
    #[case] expected: ErrorCode,
) {
    let mut mocks = Mocks::new();
    with_email_lookup(&mut mocks, Some(sample_user(random_user_id())));
    mocks
        .passwords
        .expect_check()
        .return_once(move |_, _| outcome);

    let err = mocks
        .build()
        .authenticate("ada@example.com", "pw")
        .await
        .expect_err("check fails");

    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn authenticate_reports_unknown_email() {
    let mut mocks = Mocks::new();
    with_email_lookup(&mut mocks, None);

    let err = mocks
        .build()
        .authenticate("nobody@example.com", "pw")
        .await
        .expect_err("unknown");

    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
}

#[rstest]
#[case("", "pw")]
#[case("ada@example.com", "")]
#[tokio::test]
async fn authenticate_requires_email_and_password(#[case] email: &str, #[case] password: &str) {
    let err = Mocks::new()
        .build()
        .authenticate(email, password)
        .await
        .expect_err("blank credentials");
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn patch_user_persists_changed_names() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new().with_user(&user);
    mocks
        .users
        .expect_update()
        .withf(|u| u.first_name == "Augusta" && u.last_name == "Lovelace" && u.updated_at == now())
        .times(1)
        .returning(|_| Ok(true));

    mocks
        .build()
        .patch_user(
            &ctx_for(user.id),
            &user.id.to_string(),
            json!([{ "op": "replace", "path": "/first_name", "value": "Augusta" }]),
        )
        .await
        .expect("patch applied");
}

#[tokio::test]
async fn patch_user_skips_write_for_no_op() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new().with_user(&user);
    mocks.users.expect_update().never();

    mocks
        .build()
        .patch_user(
            &ctx_for(user.id),
            &user.id.to_string(),
            json!([{ "op": "replace", "path": "/email", "value": "ada@example.com" }]),
        )
        .await
        .expect("no-op succeeds");
}

#[rstest]
#[case::password(json!([{ "op": "add", "path": "/password_hash", "value": "x" }]))]
#[case::invalid_email(json!([{ "op": "replace", "path": "/email", "value": "nope" }]))]
#[case::empty_last_name(json!([{ "op": "replace", "path": "/last_name", "value": "" }]))]
#[tokio::test]
async fn patch_user_rejects_invalid_results_without_writing(#[case] patch: Value) {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new().with_user(&user);
    mocks.users.expect_update().never();

    let err = mocks
        .build()
        .patch_user(&ctx_for(user.id), &user.id.to_string(), patch)
        .await
        .expect_err("invalid result");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn patch_user_rejects_other_subjects_before_loading() {
    let target = random_user_id();
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().never();
    mocks.users.expect_update().never();

    let err = mocks
        .build()
        .patch_user(
            &ctx_for(random_user_id()),
            &target.to_string(),
            json!([{ "op": "replace", "path": "/first_name", "value": "Mallory" }]),
        )
        .await
        .expect_err("not the owner");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(
        err.message(),
        "users are only authorised to patch their own accounts"
    );
}

#[tokio::test]
async fn patch_user_rejects_undecodable_documents() {
    let user = sample_user(random_user_id());

    let err = Mocks::new()
        .build()
        .patch_user(&ctx_for(user.id), &user.id.to_string(), json!({ "op": "replace" }))
        .await
        .expect_err("not a patch");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert_eq!(err.message(), "patch could not be decoded");
}

#[tokio::test]
async fn delete_user_reports_missing_user() {
    let id = random_user_id();
    let mut mocks = Mocks::new();
    mocks.users.expect_delete().with(eq(id)).returning(|_| Ok(false));

    let err = mocks
        .build()
        .delete_user(&ctx_for(id), &id.to_string())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn delete_user_is_limited_to_self() {
    let mut mocks = Mocks::new();
    mocks.users.expect_delete().never();

    let err = mocks
        .build()
        .delete_user(&ctx_for(random_user_id()), &random_user_id().to_string())
        .await
        .expect_err("other user");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn set_password_stores_a_hash() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new().with_user(&user);
    mocks
        .users
        .expect_update()
        .withf(|u| u.password_hash == "hashed:new secret")
        .times(1)
        .returning(|_| Ok(true));

    mocks
        .build()
        .set_password(&ctx_for(user.id), &user.id.to_string(), "new secret")
        .await
        .expect("password set");
}

#[tokio::test]
async fn set_password_rejects_values_that_look_hashed() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new();
    mocks.users.expect_update().never();

    let err = mocks
        .build()
        .set_password(&ctx_for(user.id), &user.id.to_string(), "$2b$12$already")
        .await
        .expect_err("already hashed");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[tokio::test]
async fn set_profile_pic_updates_only_the_picture() {
    let user = sample_user(random_user_id());
    let expected_hash = user.password_hash.clone();
    let mut mocks = Mocks::new().with_user(&user);
    mocks
        .users
        .expect_update()
        .withf(move |u| {
            u.profile_pic == "new.png" && u.password_hash == expected_hash && u.created_at == created_at()
        })
        .times(1)
        .returning(|_| Ok(true));

    mocks
        .build()
        .set_profile_pic(&ctx_for(user.id), &user.id.to_string(), "new.png")
        .await
        .expect("picture set");
}

#[tokio::test]
async fn enroll_requires_existing_course() {
    let user = sample_user(random_user_id());
    let mut mocks = Mocks::new().with_user(&user);
    mocks.courses.expect_find_by_id().returning(|_| Ok(None));
    mocks.enrollments.expect_enroll().never();

    let err = mocks
        .build()
        .enroll(
            &ctx_for(user.id),
            &user.id.to_string(),
            &uuid::Uuid::new_v4().to_string(),
        )
        .await
        .expect_err("no course");

    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    assert_eq!(err.message(), "course does not exist");
}

#[tokio::test]
async fn enroll_records_enrollment() {
    let user = sample_user(random_user_id());
    let course = sample_course(random_user_id(), vec![]);
    let course_id = course.id;
    let mut mocks = Mocks::new().with_user(&user);
    mocks
        .courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(course.clone())));
    mocks
        .enrollments
        .expect_enroll()
        .withf(move |e| e.course_id == course_id && e.active_lesson_id.is_none())
        .times(1)
        .returning(|_| Ok(()));

    let enrollment = mocks
        .build()
        .enroll(&ctx_for(user.id), &user.id.to_string(), &course_id.to_string())
        .await
        .expect("enrolled");

    assert_eq!(enrollment.user_id, user.id);
    assert_eq!(enrollment.created_at, now());
}

#[tokio::test]
async fn enroll_rejects_malformed_course_id() {
    let id = random_user_id();
    let err = Mocks::new()
        .build()
        .enroll(&ctx_for(id), &id.to_string(), "course-1")
        .await
        .expect_err("bad course id");
    assert_eq!(err.message(), "format of courseID is invalid");
}

#[tokio::test]
async fn list_enrollments_is_limited_to_self() {
    let mut mocks = Mocks::new();
    mocks.enrollments.expect_list_for_user().never();

    let err = mocks
        .build()
        .list_enrollments(&AuthContext::anonymous(), &random_user_id().to_string())
        .await
        .expect_err("anonymous");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[derive(Debug, Clone, Copy)]
enum SelfOnly {
    Password,
    ProfilePic,
    Enroll,
}

#[rstest]
#[case::password(SelfOnly::Password)]
#[case::profile_pic(SelfOnly::ProfilePic)]
#[case::enroll(SelfOnly::Enroll)]
#[tokio::test]
async fn account_mutations_reject_other_subjects(#[case] operation: SelfOnly) {
    let target = random_user_id().to_string();
    let caller = ctx_for(random_user_id());
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_id().times(0);
    mocks.users.expect_update().times(0);
    mocks.courses.expect_find_by_id().times(0);
    mocks.enrollments.expect_enroll().times(0);
    let service = mocks.build();

    let err = match operation {
        SelfOnly::Password => service
            .set_password(&caller, &target, "a fresh secret")
            .await
            .expect_err("not the owner"),
        SelfOnly::ProfilePic => service
            .set_profile_pic(&caller, &target, "mallory.png")
            .await
            .expect_err("not the owner"),
        SelfOnly::Enroll => service
            .enroll(&caller, &target, &uuid::Uuid::new_v4().to_string())
            .await
            .map(|_| ())
            .expect_err("not the owner"),
    };

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
