//! User self-service domain logic.
//!
//! Every mutating operation follows the same sequence: validate the
//! identifier, check the caller is the target user, load the current record,
//! mutate, re-validate and persist. A JSON Patch that changes nothing ends
//! the sequence early without a write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{
    CourseRepository, EnrollmentRepository, IdService, NewUser, PasswordCheckError,
    PasswordService, UserRepository, UserService,
};
use crate::domain::service_support::{parse_id, read_failed, write_failed};
use crate::domain::{
    AuthContext, CourseId, Error, LoginCredentials, PatchDocument, PatchOutcome, User, UserCourse,
    UserId, apply_patch,
};

const INVALID_USER_ID: &str = "format of userID is invalid";
const INVALID_COURSE_ID: &str = "format of courseID is invalid";
const USER_NOT_FOUND: &str = "user does not exist";

/// User service implementing the [`UserService`] driving port.
#[derive(Clone)]
pub struct UserServiceImpl<U, C, E> {
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    ids: Arc<dyn IdService>,
    passwords: Arc<dyn PasswordService>,
    clock: Arc<dyn Clock>,
}

impl<U, C, E> UserServiceImpl<U, C, E> {
    /// Create a new service from its collaborators.
    pub fn new(
        users: Arc<U>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        ids: Arc<dyn IdService>,
        passwords: Arc<dyn PasswordService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            courses,
            enrollments,
            ids,
            passwords,
            clock,
        }
    }
}

impl<U, C, E> UserServiceImpl<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    fn user_id(&self, raw: &str) -> Result<UserId, Error> {
        parse_id(self.ids.as_ref(), raw, INVALID_USER_ID)
    }

    async fn fetch(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(read_failed("failed to retrieve user"))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn store(&self, mut user: User, failure: &'static str) -> Result<(), Error> {
        user.updated_at = self.clock.utc();
        let updated = self
            .users
            .update(&user)
            .await
            .map_err(write_failed(failure, "email is already registered"))?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }

    async fn hash_password(&self, plaintext: &str) -> Result<String, Error> {
        self.passwords.hash(plaintext).await.map_err(|err| {
            Error::system("failed to salt and hash password").with_cause(err)
        })
    }
}

#[async_trait]
impl<U, C, E> UserService for UserServiceImpl<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        if new_user.email.is_empty() || new_user.password.is_empty() || new_user.first_name.is_empty()
        {
            return Err(Error::invalid_input(
                "each of email, password, first_name must not be empty",
            ));
        }
        if !self.passwords.is_valid(&new_user.password) {
            return Err(Error::invalid_input("password is not acceptable"));
        }

        let id = self
            .ids
            .generate()
            .map_err(|err| Error::system("failed to generate valid ID").with_cause(err))?;
        let password_hash = self.hash_password(&new_user.password).await?;

        let now = self.clock.utc();
        let user = User {
            id: UserId::from_uuid(id),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            profile_pic: new_user.profile_pic,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        user.validate()
            .map_err(|err| Error::invalid_input("user is invalid").with_cause(err))?;

        self.users.create(&user).await.map_err(write_failed(
            "failed to store new user",
            "email is already registered",
        ))?;
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, Error> {
        let id = self.user_id(user_id)?;
        self.fetch(&id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, Error> {
        if email.is_empty() {
            return Err(Error::invalid_input("email must not be empty"));
        }
        self.users
            .find_by_email(email)
            .await
            .map_err(read_failed("failed to retrieve user"))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let user = self.get_user_by_email(credentials.email()).await?;

        match self
            .passwords
            .check(&user.password_hash, credentials.password())
            .await
        {
            Ok(()) => Ok(user),
            Err(PasswordCheckError::Mismatch) => Err(Error::unauthorized("invalid credentials")),
            Err(err @ PasswordCheckError::Failure { .. }) => {
                Err(Error::system("failed to validate password").with_cause(err))
            }
        }
    }

    async fn list_enrollments(
        &self,
        ctx: &AuthContext,
        user_id: &str,
    ) -> Result<Vec<UserCourse>, Error> {
        let id = self.user_id(user_id)?;
        ctx.authorize(
            &id,
            "users cannot see which courses other users are enrolled in",
        )?;
        self.enrollments
            .list_for_user(&id)
            .await
            .map_err(read_failed("failed to retrieve courses"))
    }

    async fn patch_user(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        patch: Value,
    ) -> Result<(), Error> {
        let id = self.user_id(user_id)?;
        ctx.authorize(&id, "users are only authorised to patch their own accounts")?;
        let doc = PatchDocument::decode(patch)?;

        let mut user = self.fetch(&id).await?;
        let PatchOutcome::Patched(patched) = apply_patch(&user.patchable(), &doc)? else {
            return Ok(());
        };

        user.merge(patched);
        user.validate().map_err(|err| {
            Error::invalid_input("patch would leave user in invalid state").with_cause(err)
        })?;
        self.store(user, "failed to update user with patched attributes")
            .await
    }

    async fn delete_user(&self, ctx: &AuthContext, user_id: &str) -> Result<(), Error> {
        let id = self.user_id(user_id)?;
        ctx.authorize(&id, "users are only authorised to delete their own accounts")?;
        let deleted = self
            .users
            .delete(&id)
            .await
            .map_err(read_failed("failed to delete user"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }

    async fn set_profile_pic(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        profile_pic: &str,
    ) -> Result<(), Error> {
        let id = self.user_id(user_id)?;
        ctx.authorize(
            &id,
            "users are only authorised to set their own profile picture",
        )?;
        let mut user = self.fetch(&id).await?;
        profile_pic.clone_into(&mut user.profile_pic);
        self.store(user, "failed to update user with profile pic").await
    }

    async fn set_password(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        password: &str,
    ) -> Result<(), Error> {
        let id = self.user_id(user_id)?;
        ctx.authorize(&id, "users are only authorised to set their own password")?;
        if password.is_empty() {
            return Err(Error::invalid_input("password must not be empty"));
        }
        if !self.passwords.is_valid(password) {
            return Err(Error::invalid_input("password is not acceptable"));
        }

        let mut user = self.fetch(&id).await?;
        user.password_hash = self.hash_password(password).await?;
        user.validate()
            .map_err(|err| Error::invalid_input("password would leave user in invalid state").with_cause(err))?;
        self.store(user, "failed to update user with password").await
    }

    async fn enroll(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        course_id: &str,
    ) -> Result<UserCourse, Error> {
        let user = self.user_id(user_id)?;
        let course: CourseId = parse_id(self.ids.as_ref(), course_id, INVALID_COURSE_ID)?;
        ctx.authorize(
            &user,
            "users are only authorised to enroll themselves on courses",
        )?;

        self.fetch(&user).await?;
        self.courses
            .find_by_id(&course)
            .await
            .map_err(read_failed("failed to retrieve course"))?
            .ok_or_else(|| Error::not_found("course does not exist"))?;

        let now = self.clock.utc();
        let enrollment = UserCourse {
            user_id: user,
            course_id: course,
            active_lesson_id: None,
            created_at: now,
            updated_at: now,
        };
        self.enrollments.enroll(&enrollment).await.map_err(write_failed(
            "failed to enroll user",
            "user is already enrolled on this course",
        ))?;
        Ok(enrollment)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
