//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserDirectoryCommand, UserDirectoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn UserDirectoryCommand>,
    pub directory_query: Arc<dyn UserDirectoryQuery>,
}

impl HttpState {
    /// Construct state from separate command and query ports.
    pub fn new(
        directory: Arc<dyn UserDirectoryCommand>,
        directory_query: Arc<dyn UserDirectoryQuery>,
    ) -> Self {
        Self {
            directory,
            directory_query,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::domain::UserDirectoryService;
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()));
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _queries = state.directory_query.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UserDirectoryCommand + UserDirectoryQuery + 'static,
    {
        Self {
            directory: service.clone(),
            directory_query: service,
        }
    }
}
