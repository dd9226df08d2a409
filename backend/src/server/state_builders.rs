//! Builders wiring repositories and adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use lang_learn::domain::ports::{
    CourseRepository, EnrollmentRepository, IdService, LanguageRepository, LessonRepository,
    PasswordService, UserRepository,
};
use lang_learn::domain::{
    CourseServiceImpl, LanguageServiceImpl, LessonServiceImpl, UserServiceImpl,
};
use lang_learn::inbound::http::state::{HttpState, HttpStatePorts};
use lang_learn::outbound::ids::UuidV4IdService;
use lang_learn::outbound::memory::MemoryStore;
use lang_learn::outbound::password::BcryptPasswordService;
use lang_learn::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselEnrollmentRepository, DieselLanguageRepository,
    DieselLessonRepository, DieselUserRepository,
};
use lang_learn::outbound::token::JwtTokenService;

use super::ServerConfig;

/// Repository adapters backing the domain services.
struct Repositories<U, L, C, S, E> {
    users: Arc<U>,
    languages: Arc<L>,
    courses: Arc<C>,
    lessons: Arc<S>,
    enrollments: Arc<E>,
}

impl
    Repositories<
        DieselUserRepository,
        DieselLanguageRepository,
        DieselCourseRepository,
        DieselLessonRepository,
        DieselEnrollmentRepository,
    >
{
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            languages: Arc::new(DieselLanguageRepository::new(pool.clone())),
            courses: Arc::new(DieselCourseRepository::new(pool.clone())),
            lessons: Arc::new(DieselLessonRepository::new(pool.clone())),
            enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        }
    }
}

impl Repositories<MemoryStore, MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            languages: store.clone(),
            courses: store.clone(),
            lessons: store.clone(),
            enrollments: store,
        }
    }
}

fn build_ports<U, L, C, S, E>(
    repos: Repositories<U, L, C, S, E>,
    config: &ServerConfig,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    L: LanguageRepository + 'static,
    C: CourseRepository + 'static,
    S: LessonRepository + 'static,
    E: EnrollmentRepository + 'static,
{
    let Repositories {
        users,
        languages,
        courses,
        lessons,
        enrollments,
    } = repos;
    let ids: Arc<dyn IdService> = Arc::new(UuidV4IdService);
    let passwords: Arc<dyn PasswordService> =
        Arc::new(BcryptPasswordService::new(config.bcrypt_cost));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    HttpStatePorts {
        users: Arc::new(UserServiceImpl::new(
            users,
            courses.clone(),
            enrollments,
            ids.clone(),
            passwords,
            clock.clone(),
        )),
        languages: Arc::new(LanguageServiceImpl::new(languages, clock.clone())),
        courses: Arc::new(CourseServiceImpl::new(courses, ids.clone(), clock.clone())),
        lessons: Arc::new(LessonServiceImpl::new(lessons, ids, clock.clone())),
        tokens: Arc::new(JwtTokenService::new(
            &config.token_secret,
            config.token_issuer.clone(),
            config.token_ttl,
            clock,
        )),
    }
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by an in-process store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_ports(Repositories::diesel(pool), config)
        }
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            build_ports(Repositories::memory(), config)
        }
    };
    web::Data::new(HttpState::new(ports, config.version.clone()))
}
