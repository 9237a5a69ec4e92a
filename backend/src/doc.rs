//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP endpoint together with the request,
//! response and error schemas. The document backs Swagger UI in debug builds
//! and is exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Registration, lookup, search and removal of users keyed by generated handles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CreateUserRequest, UserResponse, Error, ErrorCode)),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
