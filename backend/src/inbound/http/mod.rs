//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Versioned API scope with the user routes and extractor error handling.
///
/// Handlers expect an [`state::HttpState`] registered as application data.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::create_user)
        .service(users::search_users)
        .service(users::get_user)
        .service(users::delete_user)
}
