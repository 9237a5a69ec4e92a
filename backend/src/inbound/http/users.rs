//! User directory HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users
//! GET    /api/v1/users?q=lee&limit=10&offset=0
//! GET    /api/v1/users/{handle}
//! DELETE /api/v1/users/{handle}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, web};
use chrono::NaiveDate;
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Handle, User, UserRegistration, UserSearchFilter, UserSearchQuery, user_not_found,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, page_request_error, parse_birth_date, user_validation_error,
};

const BIRTH_DATE: FieldName = FieldName::new("birthDate");

/// Registration payload for `POST /api/v1/users`.
///
/// Example JSON:
/// `{"firstName":"Ann","lastName":"Lee","birthDate":"1990-04-12","email":"ann@example.com","phone":"555-0100"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    /// Calendar date formatted as `YYYY-MM-DD`.
    #[schema(example = "1990-04-12")]
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

impl CreateUserRequest {
    fn into_registration(self) -> Result<UserRegistration, Error> {
        let birth_date = parse_birth_date(&self.birth_date, BIRTH_DATE)?;
        UserRegistration::try_from_parts(
            &self.first_name,
            &self.last_name,
            birth_date,
            &self.email,
            &self.phone,
        )
        .map_err(|err| user_validation_error(&err))
    }
}

/// Public view of a stored user. The surrogate id is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub handle: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            handle: user.handle().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            birth_date: user.birth_date(),
            email: user.email().to_string(),
            phone: user.phone().to_string(),
        }
    }
}

/// Query parameters accepted by `GET /api/v1/users`.
///
/// Text filters match case-insensitive substrings and are combined with AND.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserSearchParams {
    /// Matches any of the text fields.
    pub q: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub handle: Option<String>,
    /// Page size, 1 to 200. Defaults to 50.
    pub limit: Option<i64>,
    /// Rows to skip. Defaults to 0.
    pub offset: Option<i64>,
}

impl UserSearchParams {
    fn into_query(self) -> Result<UserSearchQuery, Error> {
        let page = PageRequest::try_new(self.limit, self.offset).map_err(page_request_error)?;
        let filter = UserSearchFilter {
            q: self.q,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            handle: self.handle,
        };
        Ok(UserSearchQuery::new(&filter, page))
    }
}

/// Path handles that are not well formed cannot name a stored user.
fn parse_path_handle(raw: &str) -> Result<Handle, Error> {
    Handle::new(raw).map_err(|_| user_not_found(raw))
}

/// Register a user and assign their handle.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse,
            headers(("Location" = String, description = "Canonical URL of the new user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload.into_inner().into_registration()?;
    let user = state.directory.register(registration).await?;
    let location = format!("/api/v1/users/{}", user.handle());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(UserResponse::from(&user)))
}

/// Search users by free text and per-field filters.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserSearchParams),
    responses(
        (status = 200, description = "Matching users in registration order", body = [UserResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users")]
pub async fn search_users(
    state: web::Data<HttpState>,
    params: web::Query<UserSearchParams>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let query = params.into_inner().into_query()?;
    let users = state.directory_query.search(query).await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch one user by handle.
#[utoipa::path(
    get,
    path = "/api/v1/users/{handle}",
    params(("handle" = String, Path, description = "User handle")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{handle}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let handle = parse_path_handle(&path)?;
    let user = state.directory_query.get(&handle).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete a user by handle. The handle becomes available again.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{handle}",
    params(("handle" = String, Path, description = "User handle")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{handle}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let handle = parse_path_handle(&path)?;
    state.directory.delete(&handle).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
