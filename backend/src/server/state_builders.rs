//! Builders for the HTTP state backed by the configured user store.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use user_directory::domain::UserDirectoryService;
use user_directory::domain::ports::UserRepository;
use user_directory::inbound::http::state::HttpState;
use user_directory::outbound::memory::InMemoryUserRepository;
use user_directory::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the directory state over the repository made from `pool`, or over
/// a fresh in-memory store when no pool is configured.
fn build_directory_state_with_pool<Pool, R>(
    pool: &Option<Pool>,
    make_repository: impl FnOnce(&Pool) -> Arc<R>,
) -> HttpState
where
    R: UserRepository + 'static,
{
    match pool {
        Some(pool) => {
            HttpState::from_service(Arc::new(UserDirectoryService::new(make_repository(pool))))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            let repository = Arc::new(InMemoryUserRepository::new());
            HttpState::from_service(Arc::new(UserDirectoryService::new(repository)))
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_directory_state_with_pool(&config.db_pool, |pool| {
        Arc::new(DieselUserRepository::new(pool.clone()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use user_directory::domain::{ErrorCode, Handle, UserRegistration};

    #[fixture]
    fn handle() -> Handle {
        Handle::new("alee").expect("valid handle")
    }

    async fn seeded_repository() -> Arc<InMemoryUserRepository> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let registration = UserRegistration::try_from_parts(
            "Ann",
            "Lee",
            NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            "ann@example.com",
            "555-0100",
        )
        .expect("valid registration");
        repository
            .create(&registration.with_handle(Handle::new("alee").expect("valid handle")))
            .await
            .expect("seed user");
        repository
    }

    #[rstest]
    #[tokio::test]
    async fn pool_present_uses_the_pooled_repository(handle: Handle) {
        let seeded = seeded_repository().await;
        let state = build_directory_state_with_pool(&Some(()), |_| seeded.clone());

        let user = state
            .directory_query
            .get(&handle)
            .await
            .expect("seeded user is visible");
        assert_eq!(user.email().as_ref(), "ann@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn pool_absent_starts_with_an_empty_memory_store(handle: Handle) {
        let seeded = seeded_repository().await;
        let state = build_directory_state_with_pool::<(), _>(&None, |_| seeded.clone());

        let err = state
            .directory_query
            .get(&handle)
            .await
            .expect_err("memory store starts empty");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
